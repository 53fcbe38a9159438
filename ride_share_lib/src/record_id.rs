use std::{fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;

/// Number of random bytes behind an id. Rendered as twice as many hex digits.
pub const ID_BYTES: usize = 12;
pub const ID_LENGTH: usize = ID_BYTES * 2;

/// Store-generated identity of a provider or receiver document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct RecordId(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a valid record id")]
pub struct InvalidRecordId(pub String);

impl RecordId {
    pub fn generate() -> Self {
        let bytes: [u8; ID_BYTES] = rand::random();
        Self(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RecordId {
    type Err = InvalidRecordId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ID_LENGTH || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidRecordId(s.to_string()));
        }

        Ok(Self(s.to_ascii_lowercase()))
    }
}

impl TryFrom<String> for RecordId {
    type Error = InvalidRecordId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
