//! Session rating value object (1 to 5 stars).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// How the user rated a sitting, collected on exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SessionRating(u8);

impl SessionRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Creates a rating, returning error if outside 1..=5.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::out_of_range(
                "rating",
                Self::MIN as i64,
                Self::MAX as i64,
                value as i64,
            ))
        }
    }

    /// Parses user input such as `" 4 "`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let value: i64 = trimmed
            .parse()
            .map_err(|_| ValidationError::invalid_format("rating", "expected a number from 1 to 5"))?;
        let value = u8::try_from(value).map_err(|_| {
            ValidationError::out_of_range("rating", Self::MIN as i64, Self::MAX as i64, value)
        })?;
        Self::new(value)
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for SessionRating {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SessionRating> for u8 {
    fn from(rating: SessionRating) -> Self {
        rating.0
    }
}

impl fmt::Display for SessionRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}
