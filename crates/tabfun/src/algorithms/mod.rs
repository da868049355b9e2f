//! Layer 3: Algorithms
//!
//! This layer implements the formula chain between the table lookup and the
//! composite function: kernel, normalized and group formulas. The group
//! formula is where degenerate divisions are absorbed.

// Three-way kernel selection over table lookups.
pub mod kernel;

// Unit-circle normalization feeding the kernel.
pub mod normalized;

// Weighted pair of normalized evaluations with local recovery.
pub mod group;
