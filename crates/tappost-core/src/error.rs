use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid card UID: {0}")]
    InvalidUid(String),

    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
