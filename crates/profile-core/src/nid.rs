//! National identifier validation
//!
//! A national identifier is exactly ten ASCII digits. The leading digit
//! encodes the holder type (`1` citizen, `2` resident) and the whole string
//! must satisfy a digit-doubling checksum: digits at even positions (0-based,
//! left to right) are doubled and reduced to their digit sum, digits at odd
//! positions are added as-is, and the total must be a multiple of ten.
//!
//! [`validate`] is the total, side-effect free predicate. [`NationalId`] is
//! the value type for callers that want to keep a validated identifier around
//! or know why one was rejected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Number of digits in a national identifier
pub const NATIONAL_ID_LEN: usize = 10;

/// Reason a string is not a valid national identifier
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NationalIdError {
    /// Not exactly ten characters after trimming
    #[error("national id must be {NATIONAL_ID_LEN} digits, got {0} characters")]
    Length(usize),

    /// A character that is not an ASCII digit
    #[error("national id contains a non-digit at position {0}")]
    NonDigit(usize),

    /// The first digit is neither `1` nor `2`
    #[error("national id must start with 1 or 2, got {0}")]
    LeadingDigit(char),

    /// The checksum sum is not a multiple of ten
    #[error("national id checksum mismatch")]
    Checksum,
}

/// Holder type encoded by the leading digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HolderKind {
    /// Leading digit `1`
    Citizen,
    /// Leading digit `2`
    Resident,
}

/// Returns `true` iff `id` is a valid national identifier.
///
/// Surrounding whitespace is ignored. Never panics.
pub fn validate(id: &str) -> bool {
    NationalId::parse(id).is_ok()
}

/// A validated ten-digit national identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NationalId(String);

impl NationalId {
    /// Parses and validates an identifier, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns the first rule the input breaks, checked in order: length,
    /// digits, leading digit, checksum.
    pub fn parse(id: &str) -> Result<Self, NationalIdError> {
        let id = id.trim();

        let len = id.chars().count();
        if len != NATIONAL_ID_LEN {
            return Err(NationalIdError::Length(len));
        }

        let mut digits = [0u32; NATIONAL_ID_LEN];
        for (i, c) in id.chars().enumerate() {
            digits[i] = c.to_digit(10).ok_or(NationalIdError::NonDigit(i))?;
        }

        if !matches!(digits[0], 1 | 2) {
            let lead = id.chars().next().unwrap_or_default();
            return Err(NationalIdError::LeadingDigit(lead));
        }

        if checksum(&digits) % 10 != 0 {
            return Err(NationalIdError::Checksum);
        }

        Ok(Self(id.to_string()))
    }

    /// The identifier digits
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Holder type derived from the leading digit
    pub fn kind(&self) -> HolderKind {
        if self.0.starts_with('1') {
            HolderKind::Citizen
        } else {
            HolderKind::Resident
        }
    }
}

/// Digit-doubling sum over all ten digits.
fn checksum(digits: &[u32; NATIONAL_ID_LEN]) -> u32 {
    digits
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 0 {
                let doubled = d * 2;
                if doubled >= 10 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum()
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NationalId {
    type Err = NationalIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for NationalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for NationalId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NationalId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
