//! Error types for table evaluation.
//!
//! ## Purpose
//!
//! This module defines every failure that can surface while evaluating the
//! formula chain: guard violations raised by the table lookup, data-source
//! failures, degenerate divisions in the formulas, and builder configuration
//! mistakes.
//!
//! ## Design notes
//!
//! * **Tagged**: One enum, one payload per kind. Layers intercept errors by
//!   pattern matching on the variant.
//! * **Contextual**: Errors carry the offending value or the source name.
//! * **Comparable**: `Clone + PartialEq` so tests can assert on exact errors.
//!
//! ## Key concepts
//!
//! 1. **Lookup failures**: `OutOfRange`, `SourceUnavailable`, `MalformedSample`
//!    and `SampleNotFound` only originate in the table interpolator.
//! 2. **Formula failures**: `DegenerateDivision` and `DivisionFault` originate
//!    in the kernel and normalized formulas.
//! 3. **Configuration failures**: reported by `build()`.
//!
//! ## Invariants
//!
//! * `DegenerateDivision` is intercepted by the group formula.
//! * `OutOfRange` and `SourceUnavailable` pass through the kernel, normalized
//!   and group formulas untouched.
//! * Numeric payloads are stored as `f64` regardless of the evaluation type.
//!
//! ## Non-goals
//!
//! * This module does not decide recovery values.
//! * This module does not emit diagnostics.

use std::error::Error;
use std::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for table evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Query magnitude exceeds the configured range limit.
    OutOfRange {
        /// The rejected query value.
        value: f64,
        /// The active limit (default 10).
        limit: f64,
    },

    /// The sample source could not be opened or read.
    SourceUnavailable {
        /// Name of the source (e.g. `dat_1.dat`).
        source: String,
        /// Underlying cause as reported by the source.
        reason: String,
    },

    /// A formula would divide by zero.
    DegenerateDivision {
        /// Value attached by the formula that refused to divide.
        value: f64,
    },

    /// The source yielded something that is not an `(x, y)` pair of numbers.
    MalformedSample {
        /// Name of the source.
        source: String,
        /// 1-based line number of the bad token.
        line: usize,
        /// The offending token, or a description of what is missing.
        token: String,
    },

    /// No sample matched or straddled the query (strict lookup only).
    SampleNotFound {
        /// The query value.
        value: f64,
    },

    /// The unguarded kernel branch hit a zero divisor (strict mode only).
    DivisionFault {
        /// First kernel argument at the time of the fault.
        value: f64,
    },

    /// Range limit must be positive and finite.
    InvalidRangeLimit(f64),

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

impl EvalError {
    /// Offending numeric value carried by the error, if any.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::OutOfRange { value, .. }
            | Self::DegenerateDivision { value }
            | Self::SampleNotFound { value }
            | Self::DivisionFault { value } => Some(*value),
            Self::InvalidRangeLimit(limit) => Some(*limit),
            Self::SourceUnavailable { .. }
            | Self::MalformedSample { .. }
            | Self::DuplicateParameter { .. } => None,
        }
    }

    /// Short, stable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "OutOfRange",
            Self::SourceUnavailable { .. } => "SourceUnavailable",
            Self::DegenerateDivision { .. } => "DegenerateDivision",
            Self::MalformedSample { .. } => "MalformedSample",
            Self::SampleNotFound { .. } => "SampleNotFound",
            Self::DivisionFault { .. } => "DivisionFault",
            Self::InvalidRangeLimit(_) => "InvalidRangeLimit",
            Self::DuplicateParameter { .. } => "DuplicateParameter",
        }
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for EvalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::OutOfRange { value, limit } => {
                write!(f, "Value out of range: {value} (limit is ±{limit})")
            }
            Self::SourceUnavailable { source, reason } => {
                write!(f, "Cannot open data source {source}: {reason}")
            }
            Self::DegenerateDivision { value } => {
                write!(f, "Division by zero: {value}")
            }
            Self::MalformedSample {
                source,
                line,
                token,
            } => {
                write!(f, "Malformed sample in {source} at line {line}: {token}")
            }
            Self::SampleNotFound { value } => {
                write!(f, "No sample matches or straddles {value}")
            }
            Self::DivisionFault { value } => {
                write!(f, "Unguarded division by zero in kernel at x = {value}")
            }
            Self::InvalidRangeLimit(limit) => {
                write!(f, "Invalid range limit: {limit} (must be > 0 and finite)")
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

impl Error for EvalError {}
