//! Diagnostics for intercepted errors.
//!
//! ## Purpose
//!
//! Whenever a layer catches an error and substitutes a value, it reports the
//! interception here. A diagnostic is a plain value built from the error by a
//! pure function; where it ends up is decided by a [`DiagnosticSink`].
//!
//! ## Design notes
//!
//! * **One per interception**: each caught error produces exactly one
//!   diagnostic, tagged with the [`Stage`] that caught it.
//! * **Pluggable**: [`TracingSink`] forwards to `tracing`; [`RecordingSink`]
//!   keeps diagnostics in memory for inspection.
//!
//! ## Non-goals
//!
//! * This module does not decide which layer catches what.
//! * This module does not install a tracing subscriber.

use std::fmt::{Display, Formatter, Result};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::primitives::errors::EvalError;

// ============================================================================
// Diagnostic
// ============================================================================

/// Layer of the evaluation chain that intercepted an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Group formula (degenerate divisions).
    Group,

    /// Composite function (range and data-source errors).
    Composite,

    /// Outermost safety net.
    Boundary,
}

impl Stage {
    /// Lowercase name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Composite => "composite",
            Self::Boundary => "boundary",
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.name())
    }
}

/// Record of one intercepted error.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Layer that caught the error.
    pub stage: Stage,

    /// The error that was caught.
    pub error: EvalError,
}

impl Diagnostic {
    /// Diagnostic for `error` caught at `stage`.
    pub fn intercepted(stage: Stage, error: &EvalError) -> Self {
        Self {
            stage,
            error: error.clone(),
        }
    }

    /// Offending value carried by the error, if any.
    pub fn value(&self) -> Option<f64> {
        self.error.value()
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}: {}", self.stage, self.error)
    }
}

// ============================================================================
// Sinks
// ============================================================================

/// Receiver of diagnostics.
pub trait DiagnosticSink {
    /// Accept one diagnostic.
    fn emit(&self, diagnostic: Diagnostic);
}

/// Emits each diagnostic as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        tracing::warn!(
            stage = diagnostic.stage.name(),
            kind = diagnostic.error.kind(),
            value = diagnostic.value(),
            "{}",
            diagnostic.error
        );
    }
}

/// Keeps diagnostics in memory. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    log: Arc<Mutex<Vec<Diagnostic>>>,
}

impl RecordingSink {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        self.log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of everything recorded so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    /// Rendered one-line messages, in emission order.
    pub fn lines(&self) -> Vec<String> {
        self.lock().iter().map(ToString::to_string).collect()
    }

    /// Number of diagnostics recorded.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        self.lock().push(diagnostic);
    }
}
