//! Output types for composite evaluation.
//!
//! ## Purpose
//!
//! This module defines [`Evaluation`], the record returned for one call of
//! the composite function, and [`EvaluationPath`], which says how the value
//! was obtained.
//!
//! ## Design notes
//!
//! * **Transparent**: The path records which recovery (if any) produced the value.
//! * **Display**: Renders a short human-readable summary.
//!
//! ## Non-goals
//!
//! * This module does not compute anything.
//! * This module does not persist results.

use std::fmt::{Display, Formatter, Result};

use num_traits::Float;

// ============================================================================
// Evaluation Path
// ============================================================================

/// How an evaluation arrived at its value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvaluationPath {
    /// Primary three-term sum succeeded.
    Primary,

    /// A range error triggered the single retry with `z` replaced.
    RangeRetry {
        /// The substituted `z` (half the offending value).
        z: f64,
    },

    /// The data source was unavailable; closed-form fallback used.
    SourceFallback,

    /// A range error escaped the composite function; value is `offending / 10`.
    BoundaryRange {
        /// The offending value that escaped.
        value: f64,
    },

    /// Some other error escaped the composite function; closed-form fallback used.
    BoundaryFallback,
}

impl EvaluationPath {
    /// Whether the value came from the table-driven formulas.
    pub fn is_table_driven(&self) -> bool {
        matches!(self, Self::Primary | Self::RangeRetry { .. })
    }
}

impl Display for EvaluationPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::RangeRetry { z } => write!(f, "range retry (z = {z})"),
            Self::SourceFallback => write!(f, "closed-form fallback (source unavailable)"),
            Self::BoundaryRange { value } => write!(f, "boundary range recovery ({value} / 10)"),
            Self::BoundaryFallback => write!(f, "closed-form fallback (unrecovered fault)"),
        }
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// Result of one composite evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation<T> {
    /// First input.
    pub x: T,

    /// Second input.
    pub y: T,

    /// Third input, as supplied by the caller (before any retry substitution).
    pub z: T,

    /// Computed value.
    pub value: T,

    /// How `value` was obtained.
    pub path: EvaluationPath,
}

impl<T: Float> Evaluation<T> {
    /// Whether any recovery path was taken.
    pub fn recovered(&self) -> bool {
        self.path != EvaluationPath::Primary
    }
}

impl<T: Float + Display> Display for Evaluation<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Inputs: x = {}, y = {}, z = {}", self.x, self.y, self.z)?;
        writeln!(f, "  Path:   {}", self.path)?;
        write!(f, "  Value:  {}", self.value)
    }
}
