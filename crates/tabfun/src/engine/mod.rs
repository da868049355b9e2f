//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates a full evaluation: the composite sum, its range
//! retry and closed-form fallbacks, the outermost safety net, the result
//! record, and configuration validation.
//!
//! # Architecture
//!
//! ```text
//! API
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Composite function, retry and fallbacks.
pub mod composite;

/// Evaluation result types.
pub mod output;

/// Configuration validation.
pub mod validator;
