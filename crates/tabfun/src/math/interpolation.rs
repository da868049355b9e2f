//! Linear interpolation over a streamed sample table.
//!
//! ## Purpose
//!
//! This module implements the table lookup at the bottom of the evaluation
//! chain. A query is range-checked, then the sample source is opened and
//! scanned until the query is matched exactly or straddled by two
//! consecutive samples.
//!
//! ## Design notes
//!
//! * **Guard first**: The range check happens before any I/O.
//! * **Streaming**: Samples are pulled one at a time; the scan stops at the
//!   first hit and the stream is dropped (closing the source).
//! * **No caching**: Every call re-opens the source.
//!
//! ## Key concepts
//!
//! * **Exact hit**: a sample whose `x` equals the query returns its `y`.
//! * **Straddle**: `x_0 < q < x_1` returns `y_0 + (y_1 - y_0)(q - x_0)/(x_1 - x_0)`.
//! * **Miss**: an exhausted scan returns `0` unless [`LookupMiss::Fail`] is set.
//!
//! ## Invariants
//!
//! * `|q| > limit` always fails with `OutOfRange`, and nothing else does.
//! * Samples are assumed ascending by `x`; they are never re-sorted.
//!
//! ## Non-goals
//!
//! * This module does not extrapolate beyond the table.
//! * This module does not provide higher-order interpolation.

use num_traits::Float;

use crate::primitives::errors::EvalError;
use crate::primitives::source::SampleSource;

// ============================================================================
// Miss Policy
// ============================================================================

/// Behavior when a scan ends without matching or straddling the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupMiss {
    /// Return `0` silently.
    #[default]
    ReturnZero,

    /// Fail with [`EvalError::SampleNotFound`].
    Fail,
}

// ============================================================================
// Table Interpolator
// ============================================================================

/// Range-guarded linear interpolation over a [`SampleSource`].
pub struct TableInterpolator<T> {
    source: Box<dyn SampleSource<T>>,
    limit: T,
    miss: LookupMiss,
}

impl<T: Float> TableInterpolator<T> {
    /// Interpolator over `source` guarding `[-limit, limit]`.
    pub fn new(source: Box<dyn SampleSource<T>>, limit: T, miss: LookupMiss) -> Self {
        Self {
            source,
            limit,
            miss,
        }
    }

    /// Name of the backing source.
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Active range limit.
    pub fn limit(&self) -> T {
        self.limit
    }

    /// Interpolated table value at `x`.
    pub fn interpolate(&self, x: T) -> Result<T, EvalError> {
        if x > self.limit || x < -self.limit {
            return Err(EvalError::OutOfRange {
                value: x.to_f64().unwrap_or(f64::NAN),
                limit: self.limit.to_f64().unwrap_or(f64::NAN),
            });
        }

        let value = self.scan(x)?;
        tracing::trace!(
            source = self.source.name(),
            query = x.to_f64(),
            value = ?value.and_then(|v| v.to_f64()),
            "table lookup"
        );

        match (value, self.miss) {
            (Some(v), _) => Ok(v),
            (None, LookupMiss::ReturnZero) => Ok(T::zero()),
            (None, LookupMiss::Fail) => Err(EvalError::SampleNotFound {
                value: x.to_f64().unwrap_or(f64::NAN),
            }),
        }
    }

    /// Scan the source for `x`; `None` if the stream ran out first.
    fn scan(&self, x: T) -> Result<Option<T>, EvalError> {
        let mut samples = self.source.open()?;

        let Some(first) = samples.next().transpose()? else {
            return Ok(None);
        };
        if first.x == x {
            return Ok(Some(first.y));
        }

        let mut prev = first;
        for sample in samples {
            let curr = sample?;
            if prev.straddles(&curr, x) {
                return Ok(Some(prev.lerp(&curr, x)));
            }
            if curr.x == x {
                return Ok(Some(curr.y));
            }
            prev = curr;
        }
        Ok(None)
    }
}
