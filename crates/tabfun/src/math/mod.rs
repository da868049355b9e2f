//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides the table lookup: a range-guarded linear interpolation
//! over a streamed sample source. It knows nothing about the formulas built
//! on top of it.
//!
//! # Architecture
//!
//! ```text
//! API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Range-guarded linear interpolation.
pub mod interpolation;
