//! # tabfun: Table interpolation with layered error recovery
//!
//! `tabfun` evaluates a composite function `fun(x, y, z)` assembled from a
//! chain of formulas whose lowest layer interpolates a table of `(x, y)`
//! samples. Every layer can fail for its own reason, and every failure is
//! intercepted at a fixed layer and replaced by a substitute value, so a call
//! always produces a number.
//!
//! ## The chain
//!
//! ```text
//! fun(x, y, z)        composite   range retry, closed-form fallback
//!   └─ G(x, y, z)     group       absorbs degenerate divisions
//!       └─ N(x, y)    normalized  unit-circle projection
//!           └─ K(x, y, z)  kernel three-way selection
//!               └─ t(x)    table  range guard + linear interpolation
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use tabfun::prelude::*;
//!
//! let table = MemorySource::from_pairs(
//!     "table",
//!     &[(-1.0, 0.5), (-0.5, 1.0), (0.0, 2.0), (0.5, 2.5), (1.0, 4.0)],
//! );
//!
//! let evaluator = Tabfun::new().source(table).build()?;
//!
//! let result = evaluator.evaluate(1.0, 2.0, 3.0);
//! assert_eq!(result.path, Primary);
//! println!("{}", result);
//! # Result::<(), EvalError>::Ok(())
//! ```
//!
//! ```text
//! Summary:
//!   Inputs: x = 1, y = 2, z = 3
//!   Path:   primary
//!   Value:  44.27824888082674
//! ```
//!
//! ## Recovery at a glance
//!
//! | Error                | Raised by          | Caught by  | Substitute                    |
//! |----------------------|--------------------|------------|-------------------------------|
//! | `DegenerateDivision` | kernel, normalized | group      | `value + 1`                   |
//! | `OutOfRange`         | table              | composite  | one retry with `z = value/2`  |
//! | `SourceUnavailable`  | table              | composite  | closed form                   |
//! | anything else        | any                | boundary   | closed form (`value/10` for a range error) |
//!
//! Each interception emits one [`prelude::Diagnostic`] to the configured sink;
//! the default sink logs through `tracing`.
//!
//! ```rust
//! use tabfun::prelude::*;
//!
//! let sink = RecordingSink::new();
//! let evaluator = Tabfun::new()
//!     .source(MemorySource::from_pairs("table", &[(0.0, 1.0), (1.0, 2.0)]))
//!     .diagnostics(sink.clone())
//!     .build()?;
//!
//! // Every group call hits the origin and is recovered locally.
//! let result = evaluator.evaluate(0.0, 0.0, 0.0);
//! assert_eq!(result.value, 0.0);
//! assert_eq!(sink.len(), 3);
//! # Result::<(), EvalError>::Ok(())
//! ```

// Layer 1: Primitives - errors, samples, sources.
mod primitives;

// Layer 2: Math - table interpolation.
mod math;

// Layer 3: Algorithms - kernel, normalized and group formulas.
mod algorithms;

// Layer 4: Evaluation - diagnostics.
mod evaluation;

// Layer 5: Engine - composite function and recovery.
mod engine;

// High-level fluent API.
mod api;

// Standard tabfun prelude.
pub mod prelude {
    pub use crate::api::{
        closed_form, Diagnostic, DiagnosticSink, EvalError, Evaluation,
        EvaluationPath::{self, BoundaryFallback, BoundaryRange, Primary, RangeRetry, SourceFallback},
        Evaluator,
        LookupMiss::{self, Fail, ReturnZero},
        MemorySource, RecordingSink, Sample, SampleSource, Stage, TabfunBuilder as Tabfun,
        TracingSink,
        ZeroDivisor::{self, Fault, Propagate},
        DEFAULT_RANGE_LIMIT, DEFAULT_SOURCE,
    };
    pub use crate::primitives::source::FileSource;
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
