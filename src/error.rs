//! Error handling for the yield simulator
//!
//! Defines the domain error types and establishes a unified Result type
//! using anyhow for context chaining and error propagation.

use thiserror::Error;

/// Core error types for yield calculations
#[derive(Error, Debug)]
pub enum CalculatorError {
    /// Non-positive principal/term, negative rate, and similar bad input.
    /// Surfaced to the user as a validation message, never retried.
    #[error("invalid input: {field} {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("rate unavailable: {0}")]
    RateUnavailable(String),

    #[error("parse error: {0}")]
    ParseError(String),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

impl CalculatorError {
    pub fn invalid(field: &str, reason: &str) -> Self {
        CalculatorError::InvalidInput {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for application operations
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_formatting_is_readable() {
        let err = CalculatorError::invalid("principal", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "invalid input: principal must be greater than zero"
        );
    }

    #[test]
    fn test_anyhow_context_chains_errors() {
        use anyhow::Context;
        let result: Result<()> = Err(CalculatorError::RateUnavailable("timeout".into()))
            .context("failed to resolve CDI rate");
        match result {
            Err(e) => {
                assert!(e.to_string().contains("failed to resolve CDI rate"));
                let debug_msg = format!("{:?}", e);
                assert!(debug_msg.contains("rate unavailable"));
                assert!(e.downcast_ref::<CalculatorError>().is_some());
            }
            Ok(_) => panic!("expected error"),
        }
    }

    #[test]
    fn test_error_variants() {
        let rate_err = CalculatorError::RateUnavailable("offline".to_string());
        assert!(rate_err.to_string().starts_with("rate unavailable"));

        let parse_err = CalculatorError::ParseError("test".to_string());
        assert!(parse_err.to_string().starts_with("parse error"));
    }
}
