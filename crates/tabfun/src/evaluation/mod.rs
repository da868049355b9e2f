//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer turns intercepted errors into diagnostics and routes them to a
//! sink.
//!
//! # Architecture
//!
//! ```text
//! API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Diagnostic records and sinks.
pub mod diagnostics;
