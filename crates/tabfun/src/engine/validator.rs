//! Validation of evaluator configuration.
//!
//! ## Purpose
//!
//! This module checks builder parameters before an evaluator is constructed.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Non-goals
//!
//! * This module does not validate evaluation inputs; any real triple is accepted.
//! * This module does not inspect the sample source.

use num_traits::Float;

use crate::primitives::errors::EvalError;

/// Validation utility for evaluator configuration.
pub struct Validator;

impl Validator {
    /// Validate the magnitude bound of the range guard.
    pub fn validate_range_limit<T: Float>(limit: T) -> Result<(), EvalError> {
        if !limit.is_finite() || limit <= T::zero() {
            return Err(EvalError::InvalidRangeLimit(
                limit.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Fail if any builder parameter was set more than once.
    pub fn validate_no_duplicates(duplicate: Option<&'static str>) -> Result<(), EvalError> {
        if let Some(parameter) = duplicate {
            return Err(EvalError::DuplicateParameter { parameter });
        }
        Ok(())
    }
}
