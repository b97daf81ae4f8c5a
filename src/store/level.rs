//! Focus level values
//!
//! A `Level` is the per-hour ordinal stored in each record field.
//! It is persisted as its decimal digit; an empty field means `None`.

use crate::store::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};

/// Focus intensity for one hour of one day
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// No value recorded
    #[default]
    None = 0,
    VeryLow = 1,
    Low = 2,
    Medium = 3,
    High = 4,
    /// Deep, uninterrupted focus
    Flow = 5,
}

impl Level {
    /// All defined levels, in ordinal order
    pub fn all() -> &'static [Level] {
        &[
            Level::None,
            Level::VeryLow,
            Level::Low,
            Level::Medium,
            Level::High,
            Level::Flow,
        ]
    }

    /// Ordinal value as stored on disk
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// The single decimal digit this level serializes to
    pub fn encode(self) -> String {
        (self as u8).to_string()
    }

    /// Parse a raw record field. An empty field is `None`; anything
    /// non-numeric or out of range is file corruption.
    pub fn decode(field: &str) -> StoreResult<Level> {
        if field.is_empty() {
            return Ok(Level::None);
        }
        let n: u8 = field
            .parse()
            .map_err(|_| StoreError::Corrupt(format!("non-numeric level field: {field:?}")))?;
        Level::try_from(n)
    }
}

impl TryFrom<u8> for Level {
    type Error = StoreError;

    fn try_from(n: u8) -> StoreResult<Level> {
        match n {
            0 => Ok(Level::None),
            1 => Ok(Level::VeryLow),
            2 => Ok(Level::Low),
            3 => Ok(Level::Medium),
            4 => Ok(Level::High),
            5 => Ok(Level::Flow),
            _ => Err(StoreError::Corrupt(format!("level out of range: {n}"))),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Level::None => "None",
            Level::VeryLow => "Very low",
            Level::Low => "Low",
            Level::Medium => "Medium",
            Level::High => "High",
            Level::Flow => "Flow",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode() {
        for &level in Level::all() {
            let s = level.encode();
            assert_eq!(Level::decode(&s).unwrap(), level);
        }
    }

    #[test]
    fn test_empty_field_is_none() {
        assert_eq!(Level::decode("").unwrap(), Level::None);
    }

    #[test]
    fn test_garbage_is_corruption() {
        assert!(matches!(Level::decode("x"), Err(StoreError::Corrupt(_))));
        assert!(matches!(Level::decode("7"), Err(StoreError::Corrupt(_))));
        assert!(matches!(Level::decode("-1"), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn test_display() {
        assert_eq!(Level::VeryLow.to_string(), "Very low");
        assert_eq!(Level::Flow.to_string(), "Flow");
    }

    #[test]
    fn test_single_digit_encoding() {
        // The write path relies on every level occupying exactly one byte.
        for &level in Level::all() {
            assert_eq!(level.encode().len(), 1);
        }
    }
}
