//! Normalized formula: project onto the unit circle, then apply the kernel.
//!
//! `(x, y)` is scaled by `r = sqrt(x² + y²)`. When `x > y` the kernel runs on
//! `(x/r, y/r, x/r)` weighted by 0.42, otherwise on `(y/r, x/r, y/r)` weighted
//! by 0.57. The third kernel argument always repeats the first.
//!
//! Every kernel argument issued from here has magnitude at most 1.

use num_traits::Float;

use crate::algorithms::kernel::{kernel, FormulaParams};
use crate::primitives::errors::EvalError;

/// Weight applied when `x > y`.
const WEIGHT_X_LEADS: f64 = 0.42;

/// Weight applied otherwise.
const WEIGHT_Y_LEADS: f64 = 0.57;

/// Evaluate the normalized formula at `(x, y)`.
///
/// Fails with `DegenerateDivision { value: 0 }` at the origin.
pub fn normalize<T: Float>(params: &FormulaParams<'_, T>, x: T, y: T) -> Result<T, EvalError> {
    let r = (x * x + y * y).sqrt();
    if r == T::zero() {
        return Err(EvalError::DegenerateDivision {
            value: r.to_f64().unwrap_or(f64::NAN),
        });
    }

    let (nx, ny) = (x / r, y / r);
    if x > y {
        Ok(T::from(WEIGHT_X_LEADS).unwrap() * kernel(params, nx, ny, nx)?)
    } else {
        Ok(T::from(WEIGHT_Y_LEADS).unwrap() * kernel(params, ny, nx, ny)?)
    }
}
