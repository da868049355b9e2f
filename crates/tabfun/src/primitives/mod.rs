//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the data types shared by every other layer: the error
//! taxonomy, table samples, and the sources samples are streamed from. It has
//! zero internal dependencies within the crate.
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Shared error types.
pub mod errors;

/// Table sample pairs.
pub mod sample;

/// Sample sources (file and in-memory).
pub mod source;
