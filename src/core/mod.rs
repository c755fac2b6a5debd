//! Core business logic - framework-agnostic period handling and record services.
//!
//! The services take an authenticated owner id plus request fields and return
//! response projections or an [`Error`](crate::errors::Error). Transport concerns
//! (routing, authentication, status codes) live outside this crate.

/// Injectable time source
pub mod clock;
/// Expense service
pub mod expense;
/// Past-period mutation policy
pub mod guard;
/// Monthly limit service
pub mod limit;
/// `"YYYY-MM"` period keys
pub mod period;
/// Monthly spending summary
pub mod summary;

use crate::errors::{Error, Result};

/// Amounts must be finite and strictly positive.
pub(crate) fn ensure_positive_amount(amount: f64) -> Result<()> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidAmount { amount })
    }
}

/// Returns the trimmed description, rejecting blank input.
pub(crate) fn normalize_description(description: &str) -> Result<String> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyDescription);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_amount_validation() {
        assert!(ensure_positive_amount(0.01).is_ok());
        assert!(ensure_positive_amount(1500.0).is_ok());
        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                ensure_positive_amount(bad),
                Err(Error::InvalidAmount { .. })
            ));
        }
    }

    #[test]
    fn test_description_validation() {
        assert_eq!(normalize_description("  Groceries ").unwrap(), "Groceries");
        assert!(matches!(
            normalize_description(""),
            Err(Error::EmptyDescription)
        ));
        assert!(matches!(
            normalize_description("   "),
            Err(Error::EmptyDescription)
        ));
    }
}
