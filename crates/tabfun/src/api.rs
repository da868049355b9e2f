//! High-level API for table-driven evaluation.
//!
//! ## Purpose
//!
//! This module provides the user-facing entry point: a fluent builder that
//! configures the sample source, range guard, strictness policies and
//! diagnostics, and the [`Evaluator`] it produces.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with defaults for the conventional
//!   setup (`dat_1.dat`, limit 10, silent miss, IEEE division, tracing).
//! * **Validated**: Parameters are checked when `.build()` is called.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ## Key concepts
//!
//! * [`Evaluator::evaluate`] is the boundary: it always returns a value.
//! * [`Evaluator::try_evaluate`] stops at the composite function and returns
//!   whatever escaped it.
//! * The individual layers are reachable for inspection.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`TabfunBuilder`] via `Tabfun::new()`.
//! 2. Chain configuration methods (`.source()`, `.range_limit()`, etc.).
//! 3. Call `.build()` to obtain an [`Evaluator`].

use num_traits::Float;

use crate::algorithms::group::group;
use crate::algorithms::kernel::{kernel, FormulaParams};
use crate::algorithms::normalized::normalize;
use crate::engine::composite::{evaluate_composite, evaluate_guarded};
use crate::engine::validator::Validator;
use crate::math::interpolation::TableInterpolator;
use crate::primitives::source::FileSource;

// Publicly re-exported types
pub use crate::algorithms::kernel::ZeroDivisor;
pub use crate::engine::composite::closed_form;
pub use crate::engine::output::{Evaluation, EvaluationPath};
pub use crate::evaluation::diagnostics::{
    Diagnostic, DiagnosticSink, RecordingSink, Stage, TracingSink,
};
pub use crate::math::interpolation::LookupMiss;
pub use crate::primitives::errors::EvalError;
pub use crate::primitives::sample::Sample;
pub use crate::primitives::source::{MemorySource, SampleSource, DEFAULT_SOURCE};

/// Default magnitude bound of the range guard.
pub const DEFAULT_RANGE_LIMIT: f64 = 10.0;

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring an [`Evaluator`].
pub struct TabfunBuilder<T> {
    /// Sample source (default: `dat_1.dat` on disk).
    pub source: Option<Box<dyn SampleSource<T>>>,

    /// Magnitude bound of the range guard (default: 10).
    pub range_limit: Option<T>,

    /// Behavior when a lookup finds nothing (default: ReturnZero).
    pub lookup_miss: Option<LookupMiss>,

    /// Behavior of the unguarded kernel division (default: Propagate).
    pub zero_divisor: Option<ZeroDivisor>,

    /// Diagnostic receiver (default: TracingSink).
    pub sink: Option<Box<dyn DiagnosticSink>>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float + 'static> Default for TabfunBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float + 'static> TabfunBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            source: None,
            range_limit: None,
            lookup_miss: None,
            zero_divisor: None,
            sink: None,
            duplicate_param: None,
        }
    }

    /// Set the sample source.
    pub fn source<S: SampleSource<T> + 'static>(mut self, source: S) -> Self {
        if self.source.is_some() {
            self.duplicate_param = Some("source");
        }
        self.source = Some(Box::new(source));
        self
    }

    /// Set the magnitude bound of the range guard.
    pub fn range_limit(mut self, limit: T) -> Self {
        if self.range_limit.is_some() {
            self.duplicate_param = Some("range_limit");
        }
        self.range_limit = Some(limit);
        self
    }

    /// Set the behavior when a lookup matches no sample.
    pub fn lookup_miss(mut self, policy: LookupMiss) -> Self {
        if self.lookup_miss.is_some() {
            self.duplicate_param = Some("lookup_miss");
        }
        self.lookup_miss = Some(policy);
        self
    }

    /// Set the behavior of the unguarded kernel division.
    pub fn zero_divisor(mut self, policy: ZeroDivisor) -> Self {
        if self.zero_divisor.is_some() {
            self.duplicate_param = Some("zero_divisor");
        }
        self.zero_divisor = Some(policy);
        self
    }

    /// Set the diagnostic receiver.
    pub fn diagnostics<D: DiagnosticSink + 'static>(mut self, sink: D) -> Self {
        if self.sink.is_some() {
            self.duplicate_param = Some("diagnostics");
        }
        self.sink = Some(Box::new(sink));
        self
    }

    /// Validate the configuration and build an evaluator.
    pub fn build(self) -> Result<Evaluator<T>, EvalError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let limit = match self.range_limit {
            Some(limit) => limit,
            None => T::from(DEFAULT_RANGE_LIMIT).unwrap(),
        };
        Validator::validate_range_limit(limit)?;

        let source = self
            .source
            .unwrap_or_else(|| Box::new(FileSource::default()));

        Ok(Evaluator {
            table: TableInterpolator::new(source, limit, self.lookup_miss.unwrap_or_default()),
            zero_divisor: self.zero_divisor.unwrap_or_default(),
            sink: self.sink.unwrap_or_else(|| Box::new(TracingSink)),
        })
    }
}

// ============================================================================
// Evaluator
// ============================================================================

/// Configured evaluation chain.
pub struct Evaluator<T> {
    table: TableInterpolator<T>,
    zero_divisor: ZeroDivisor,
    sink: Box<dyn DiagnosticSink>,
}

impl<T: Float> Evaluator<T> {
    fn params(&self) -> FormulaParams<'_, T> {
        FormulaParams {
            table: &self.table,
            zero_divisor: self.zero_divisor,
            sink: &*self.sink,
        }
    }

    /// Evaluate `fun(x, y, z)`; never fails.
    pub fn evaluate(&self, x: T, y: T, z: T) -> Evaluation<T> {
        evaluate_guarded(&self.params(), x, y, z)
    }

    /// Evaluate `fun(x, y, z)` without the outermost safety net.
    pub fn try_evaluate(&self, x: T, y: T, z: T) -> Result<Evaluation<T>, EvalError> {
        evaluate_composite(&self.params(), x, y, z)
    }

    /// Table lookup layer.
    pub fn interpolate(&self, x: T) -> Result<T, EvalError> {
        self.table.interpolate(x)
    }

    /// Kernel formula layer.
    pub fn kernel(&self, x: T, y: T, z: T) -> Result<T, EvalError> {
        kernel(&self.params(), x, y, z)
    }

    /// Normalized formula layer.
    pub fn normalize(&self, x: T, y: T) -> Result<T, EvalError> {
        normalize(&self.params(), x, y)
    }

    /// Group formula layer, including its local recovery.
    pub fn group(&self, x: T, y: T, z: T) -> Result<T, EvalError> {
        group(&self.params(), x, y, z)
    }

    /// Name of the configured sample source.
    pub fn source_name(&self) -> &str {
        self.table.source_name()
    }

    /// Active range limit.
    pub fn range_limit(&self) -> T {
        self.table.limit()
    }
}
