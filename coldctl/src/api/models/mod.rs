//! API request/response types.
//!
//! These are the wire shapes: camelCase JSON in and out, converted to and
//! from the snake_case records in [`crate::db::models`] at the handler
//! boundary. Optional text fields are normalized to `""` on the way in and
//! on the way out, so clients never see `null` for them.

pub mod customers;
pub mod employees;
pub mod files;

pub use customers::*;
pub use employees::*;
pub use files::*;

use crate::errors::{Error, messages};

/// Collect the names of required fields that are empty or missing, and turn
/// them into a single validation error.
pub(crate) fn require_non_empty(fields: &[(&str, &str)]) -> crate::errors::Result<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::validation(messages::REQUIRED_FIELDS, missing.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_are_listed_in_the_error() {
        let err = require_non_empty(&[("companyName", ""), ("inn", "  "), ("status", "Активен")]).unwrap_err();
        match err {
            Error::Validation { message, error } => {
                assert_eq!(message, messages::REQUIRED_FIELDS);
                assert_eq!(error, "companyName, inn");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
