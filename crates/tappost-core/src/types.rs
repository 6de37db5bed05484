use crate::{
    Result,
    constants::{MAX_UID_LENGTH, MIN_UID_LENGTH},
    error::Error,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Active device mode.
///
/// The station is always in exactly one mode. Switching is driven solely by a
/// long press of the fetch button; nothing else mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceMode {
    /// Cards tapped on the reader are submitted for registration.
    Registration,
    /// Cards tapped on the reader are checked in against the active event.
    Attendance,
}

impl DeviceMode {
    /// The mode a long press switches into.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            DeviceMode::Registration => DeviceMode::Attendance,
            DeviceMode::Attendance => DeviceMode::Registration,
        }
    }
}

impl fmt::Display for DeviceMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DeviceMode::Registration => write!(f, "Registration"),
            DeviceMode::Attendance => write!(f, "Attendance"),
        }
    }
}

/// Normalized contactless card identifier.
///
/// Stored as colon-separated uppercase hex pairs (`"04:AB:CD:EF"`), one pair
/// per UID byte. Construction validates the ISO 14443 length range (4-10
/// bytes), so a value of this type is always well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardUid(String);

impl CardUid {
    /// Build a UID from the raw bytes reported by the reader.
    ///
    /// # Errors
    /// Returns `Error::InvalidUid` if the byte count is outside 4-10.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let len = bytes.len();
        if !(MIN_UID_LENGTH..=MAX_UID_LENGTH).contains(&len) {
            return Err(Error::InvalidUid(format!(
                "UID must be {MIN_UID_LENGTH}-{MAX_UID_LENGTH} bytes, got {len}"
            )));
        }

        let text = bytes
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>()
            .join(":");

        Ok(CardUid(text))
    }

    /// Get the normalized UID string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of UID bytes this identifier encodes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.0.len() / 3 + 1
    }
}

impl fmt::Display for CardUid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CardUid {
    type Err = Error;

    /// Parse a UID already in colon-separated hex form.
    ///
    /// Lowercase hex digits are accepted and normalized to uppercase.
    fn from_str(s: &str) -> Result<Self> {
        let bytes = s
            .split(':')
            .map(|pair| {
                if pair.len() != 2 {
                    return Err(Error::InvalidUid(format!("Malformed UID byte: {pair:?}")));
                }
                u8::from_str_radix(pair, 16)
                    .map_err(|_| Error::InvalidUid(format!("Malformed UID byte: {pair:?}")))
            })
            .collect::<Result<Vec<u8>>>()?;

        CardUid::from_bytes(&bytes)
    }
}

/// Attendance event currently loaded on the station.
///
/// Present only while the attendance flow is in a state that can check cards
/// in; cleared on mode entry and by the clear button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEvent {
    /// Backend identifier used in check-in requests.
    pub id: String,
    /// Human-readable name shown on the ready screen.
    pub name: String,
}

impl ActiveEvent {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Result of a successful check-in, consumed immediately by the welcome screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInReceipt {
    /// Name of the student the card belongs to.
    #[serde(rename = "studentName")]
    pub student_name: String,
}
