//! Group formula: weighted pair of normalized evaluations with local recovery.
//!
//! ## Purpose
//!
//! This module computes `x + y` plus a weighted combination of
//! `normalize(x, z)` and `normalize(y, z)`, and is the layer that absorbs
//! degenerate divisions raised below it.
//!
//! ## Key concepts
//!
//! ```text
//! x + y >= z :  x + y + 0.3·N(x, z) + 0.7·N(y, z)
//! x + y <  z :  x + y + 1.3·N(x, z) - 0.3·N(y, z)
//! ```
//!
//! ## Invariants
//!
//! * `DegenerateDivision { value }` from either normalized call abandons the
//!   whole sum and yields `value + 1`; the partial `x + y` is discarded.
//! * Each intercepted error emits exactly one diagnostic before returning.
//! * Every other error propagates unchanged.

use num_traits::Float;

use crate::algorithms::kernel::FormulaParams;
use crate::algorithms::normalized::normalize;
use crate::evaluation::diagnostics::{Diagnostic, Stage};
use crate::primitives::errors::EvalError;

/// Evaluate the group formula at `(x, y, z)`.
pub fn group<T: Float>(params: &FormulaParams<'_, T>, x: T, y: T, z: T) -> Result<T, EvalError> {
    match weighted_sum(params, x, y, z) {
        Err(EvalError::DegenerateDivision { value }) => {
            let err = EvalError::DegenerateDivision { value };
            params.sink.emit(Diagnostic::intercepted(Stage::Group, &err));
            Ok(T::from(value).unwrap_or_else(T::nan) + T::one())
        }
        other => other,
    }
}

fn weighted_sum<T: Float>(params: &FormulaParams<'_, T>, x: T, y: T, z: T) -> Result<T, EvalError> {
    let base = x + y;
    let spread = if x + y >= z {
        T::from(0.3).unwrap() * normalize(params, x, z)?
            + T::from(0.7).unwrap() * normalize(params, y, z)?
    } else {
        T::from(1.3).unwrap() * normalize(params, x, z)?
            - T::from(0.3).unwrap() * normalize(params, y, z)?
    };
    Ok(base + spread)
}
