//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the data model and basic utilities used throughout
//! the crate:
//! - Graph and surface records
//! - Configuration errors
//! - Reusable search buffers
//! - Seeded random number generation
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Graph and surface records.
pub mod data;

/// Configuration error type.
pub mod errors;

/// Scratch buffers for neighbour queries.
pub mod buffer;

/// Seeded random number generation.
pub mod random;
