//! Coupon Codes

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use thiserror::Error;

/// Longest accepted coupon code.
pub const MAX_CODE_LENGTH: usize = 32;

/// Errors raised while parsing a coupon code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CouponCodeError {
    /// Nothing left after trimming whitespace.
    #[error("coupon code is empty")]
    Empty,

    /// Longer than [`MAX_CODE_LENGTH`].
    #[error("coupon code exceeds {MAX_CODE_LENGTH} characters")]
    TooLong,

    /// Contains something other than ASCII letters, digits, `-` or `_`.
    #[error("coupon code contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// A normalised, uppercase coupon code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CouponCode(String);

impl CouponCode {
    /// Parse and normalise a raw coupon code.
    ///
    /// Surrounding whitespace is trimmed and letters are uppercased, so
    /// `" test20 "` and `"TEST20"` are the same code.
    ///
    /// # Errors
    ///
    /// Returns a [`CouponCodeError`] describing the first problem found.
    pub fn parse(raw: &str) -> Result<Self, CouponCodeError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(CouponCodeError::Empty);
        }

        if trimmed.chars().count() > MAX_CODE_LENGTH {
            return Err(CouponCodeError::TooLong);
        }

        if let Some(invalid) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(CouponCodeError::InvalidCharacter(invalid));
        }

        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// The normalised code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CouponCode {
    type Err = CouponCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for CouponCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CouponCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
