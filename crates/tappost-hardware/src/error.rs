//! Error types for peripheral operations.

/// Result type alias for peripheral operations.
pub type Result<T> = std::result::Result<T, HardwareError>;

/// Errors that can occur while talking to a peripheral device.
#[derive(Debug, thiserror::Error)]
pub enum HardwareError {
    /// Device is not connected or has been disconnected.
    #[error("Device disconnected: {device}")]
    Disconnected { device: String },

    /// Device initialization failed.
    ///
    /// Raised during startup when a peripheral does not respond; the station
    /// treats this as fatal and parks.
    #[error("Initialization failed: {message}")]
    InitializationFailed { message: String },

    /// Invalid data received from device.
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// Card reading error.
    #[error("Card read error: {message}")]
    CardReadError { message: String },
}

impl HardwareError {
    /// Create a new disconnected error.
    pub fn disconnected(device: impl Into<String>) -> Self {
        Self::Disconnected {
            device: device.into(),
        }
    }

    /// Create a new initialization failed error.
    pub fn initialization_failed(message: impl Into<String>) -> Self {
        Self::InitializationFailed {
            message: message.into(),
        }
    }

    /// Create a new invalid data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /// Create a new card read error.
    pub fn card_read(message: impl Into<String>) -> Self {
        Self::CardReadError {
            message: message.into(),
        }
    }
}
