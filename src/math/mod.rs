//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical building blocks used by every
//! engine:
//! - The linear algebra kernel (transpose, multiply, invert, solve)
//! - Planar distances and a KD-tree for nearest-neighbour search
//! - Descriptive statistics and the inverse normal CDF
//!
//! These are reusable mathematical building blocks with no algorithm-specific logic.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
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

/// Linear algebra kernel.
pub mod linalg;

/// Distance computation.
pub mod distance;

/// KD-tree nearest-neighbour search.
pub mod neighborhood;

/// Descriptive statistics.
pub mod stats;
