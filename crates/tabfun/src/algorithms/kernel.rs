//! Kernel formula: three-way selection over two table lookups.
//!
//! ## Purpose
//!
//! This module combines interpolated table values according to the sign and
//! magnitude of its first two arguments. It is the first layer that can
//! refuse a division.
//!
//! ## Key concepts
//!
//! | Region                  | Guard                 | Result                 |
//! |-------------------------|-----------------------|------------------------|
//! | `x > 0` and `y <= 1`    | `z != 0`              | `t(x) + t(y) / z`      |
//! | `y > 1`                 | `x != 0`              | `t(y) + t(z) / x`      |
//! | `y == 0`                | always fails          |                        |
//! | otherwise               | none (see below)      | `t(z) + t(x) / z`      |
//!
//! Guard failures raise `DegenerateDivision { value: x }`. The last region
//! divides by `z` without a guard; under [`ZeroDivisor::Propagate`] the IEEE
//! result (±inf or NaN) flows on, under [`ZeroDivisor::Fault`] it becomes a
//! typed `DivisionFault`.
//!
//! ## Invariants
//!
//! * Guards are checked before any table lookup.
//! * Lookups are issued left to right, so the first lookup error wins.
//! * Lookup errors pass through unchanged.

use num_traits::Float;

use crate::evaluation::diagnostics::DiagnosticSink;
use crate::math::interpolation::TableInterpolator;
use crate::primitives::errors::EvalError;

// ============================================================================
// Parameters
// ============================================================================

/// Behavior of the unguarded division in the last kernel region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroDivisor {
    /// Divide anyway and let ±inf or NaN propagate.
    #[default]
    Propagate,

    /// Fail with [`EvalError::DivisionFault`].
    Fault,
}

/// Shared context threaded through the formula layers.
#[derive(Clone, Copy)]
pub struct FormulaParams<'a, T> {
    /// Table lookup at the bottom of the chain.
    pub table: &'a TableInterpolator<T>,

    /// Policy for the unguarded kernel division.
    pub zero_divisor: ZeroDivisor,

    /// Receiver of diagnostics for intercepted errors.
    pub sink: &'a dyn DiagnosticSink,
}

// ============================================================================
// Kernel
// ============================================================================

/// Evaluate the kernel formula at `(x, y, z)`.
pub fn kernel<T: Float>(params: &FormulaParams<'_, T>, x: T, y: T, z: T) -> Result<T, EvalError> {
    let table = params.table;
    let degenerate = || EvalError::DegenerateDivision {
        value: x.to_f64().unwrap_or(f64::NAN),
    };

    if x > T::zero() && y <= T::one() {
        if z == T::zero() {
            return Err(degenerate());
        }
        let head = table.interpolate(x)?;
        Ok(head + table.interpolate(y)? / z)
    } else if y > T::one() {
        if x == T::zero() {
            return Err(degenerate());
        }
        let head = table.interpolate(y)?;
        Ok(head + table.interpolate(z)? / x)
    } else if y == T::zero() {
        Err(degenerate())
    } else {
        let head = table.interpolate(z)?;
        let tail = table.interpolate(x)?;
        if z == T::zero() && params.zero_divisor == ZeroDivisor::Fault {
            return Err(EvalError::DivisionFault {
                value: x.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(head + tail / z)
    }
}
