//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer holds the analytics engines:
//! - Graph model builder (adjacency matrix)
//! - Community detection
//! - Anomaly scoring
//! - Surface interpolation
//! - Predictive regression
//!
//! Engines share only the math layer; none calls another.
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
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Graph model builder.
pub mod adjacency;

/// Anomaly scoring.
pub mod anomaly;

/// Community detection.
pub mod community;

/// Surface interpolation.
pub mod interpolation;

/// Predictive regression.
pub mod regression;
