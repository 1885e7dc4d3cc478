//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates the lower layers:
//! - Option sets with defaults and validation
//! - The executor that runs each operation
//! - Result types with text summaries
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
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

/// Option sets and execution.
pub mod executor;

/// Result types.
pub mod output;

/// Configuration validation.
pub mod validator;
