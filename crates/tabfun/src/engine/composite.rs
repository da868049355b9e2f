//! Composite function and its recovery paths.
//!
//! ## Purpose
//!
//! This module sums three weighted group evaluations over permuted arguments
//! and owns the top-level recovery: a single retry after a range error, the
//! closed-form fallback after a data-source error, and the outermost safety
//! net that turns anything left into a value.
//!
//! ## Key concepts
//!
//! ```text
//! primary : x·G(x,y,z) + y·G(y,z,x) + z·G(z,x,y)
//! retry   : x·G(x,y,z') + y·G(y,z',x) + z'·G(z',x,y) - x·y·z'·G(y,x,z')   z' = v/2
//! fallback: 1.3498·x + 2.2362·y - 2.348·x·y·z
//! ```
//!
//! ## Invariants
//!
//! * At most one retry; a failure inside the retry propagates.
//! * The fallback always uses the caller's original `z`.
//! * Errors other than range and data-source errors propagate unchanged
//!   from [`evaluate_composite`].
//! * [`evaluate_guarded`] never fails.
//!
//! ## Non-goals
//!
//! * This module does not validate inputs; NaN and infinities flow through.

use num_traits::Float;

use crate::algorithms::group::group;
use crate::algorithms::kernel::FormulaParams;
use crate::engine::output::{Evaluation, EvaluationPath};
use crate::evaluation::diagnostics::{Diagnostic, Stage};
use crate::primitives::errors::EvalError;

// ============================================================================
// Closed Form
// ============================================================================

/// Table-free approximation used when the table cannot be consulted.
pub fn closed_form<T: Float>(x: T, y: T, z: T) -> T {
    T::from(1.3498).unwrap() * x + T::from(2.2362).unwrap() * y
        - T::from(2.348).unwrap() * x * y * z
}

// ============================================================================
// Composite Function
// ============================================================================

/// Evaluate the composite function, recovering range and data-source errors.
pub fn evaluate_composite<T: Float>(
    params: &FormulaParams<'_, T>,
    x: T,
    y: T,
    z: T,
) -> Result<Evaluation<T>, EvalError> {
    let finish = |value, path| Evaluation {
        x,
        y,
        z,
        value,
        path,
    };

    let err = match primary(params, x, y, z) {
        Ok(value) => return Ok(finish(value, EvaluationPath::Primary)),
        Err(err) => err,
    };

    match &err {
        EvalError::OutOfRange { value, .. } => {
            params
                .sink
                .emit(Diagnostic::intercepted(Stage::Composite, &err));
            let half = value / 2.0;
            tracing::debug!(offending = value, z = half, "retrying with substituted z");
            let z_sub = T::from(half).unwrap_or_else(T::nan);
            let value = retry(params, x, y, z_sub)?;
            Ok(finish(value, EvaluationPath::RangeRetry { z: half }))
        }
        EvalError::SourceUnavailable { .. } => {
            params
                .sink
                .emit(Diagnostic::intercepted(Stage::Composite, &err));
            tracing::debug!("table unavailable, using closed form");
            Ok(finish(closed_form(x, y, z), EvaluationPath::SourceFallback))
        }
        _ => Err(err),
    }
}

fn primary<T: Float>(params: &FormulaParams<'_, T>, x: T, y: T, z: T) -> Result<T, EvalError> {
    Ok(x * group(params, x, y, z)? + y * group(params, y, z, x)? + z * group(params, z, x, y)?)
}

fn retry<T: Float>(params: &FormulaParams<'_, T>, x: T, y: T, z: T) -> Result<T, EvalError> {
    Ok(x * group(params, x, y, z)? + y * group(params, y, z, x)? + z * group(params, z, x, y)?
        - x * y * z * group(params, y, x, z)?)
}

// ============================================================================
// Safety Net
// ============================================================================

/// Evaluate the composite function and convert any escaped error into a value.
///
/// * `OutOfRange { value }` yields `value / 10`.
/// * Any other error yields the closed form at the original inputs.
pub fn evaluate_guarded<T: Float>(params: &FormulaParams<'_, T>, x: T, y: T, z: T) -> Evaluation<T> {
    let err = match evaluate_composite(params, x, y, z) {
        Ok(evaluation) => return evaluation,
        Err(err) => err,
    };

    params
        .sink
        .emit(Diagnostic::intercepted(Stage::Boundary, &err));

    let (value, path) = match err {
        EvalError::OutOfRange { value, .. } => (
            T::from(value / 10.0).unwrap_or_else(T::nan),
            EvaluationPath::BoundaryRange { value },
        ),
        _ => (closed_form(x, y, z), EvaluationPath::BoundaryFallback),
    };
    Evaluation {
        x,
        y,
        z,
        value,
        path,
    }
}
