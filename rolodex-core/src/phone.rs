//! Phone number parsing and canonical form.
//!
//! Accepted shape after all whitespace is removed:
//!
//! ```text
//! [+][CC][(]0XX[)]NNNNNNN
//! ```
//!
//! `CC` is an optional two-digit country code (defaults to `38`), `0XX` is
//! the operator code and `NNNNNNN` the seven-digit subscriber number, which
//! must end the input.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;

/// Country code assumed when the input carries none.
pub const DEFAULT_COUNTRY_CODE: &str = "38";

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?([0-9]{2})?(?:\(?(0[0-9]{2})\)?)?([0-9]{7})$").expect("valid phone regex")
});

/// A phone number split into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber {
    pub country_code: String,
    pub operator_code: String,
    pub subscriber: String,
}

impl PhoneNumber {
    /// Parses free-form user input.
    ///
    /// Fails with [`ValidationError::NoPhoneNumber`] when the shape does not
    /// match at all and with [`ValidationError::MissingOperatorCode`] when
    /// only the operator code is missing.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        let caps = PHONE_RE
            .captures(&compact)
            .ok_or_else(|| ValidationError::NoPhoneNumber {
                input: compact.clone(),
            })?;

        let operator_code = caps
            .get(2)
            .ok_or_else(|| ValidationError::MissingOperatorCode {
                input: compact.clone(),
            })?
            .as_str()
            .to_owned();
        let country_code = caps
            .get(1)
            .map_or(DEFAULT_COUNTRY_CODE, |m| m.as_str())
            .to_owned();
        let subscriber = caps[3].to_owned();

        Ok(Self {
            country_code,
            operator_code,
            subscriber,
        })
    }

    /// `+{country}{operator}{subscriber}` with no separators.
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "+{}{}{}",
            self.country_code, self.operator_code, self.subscriber
        )
    }
}
