//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer post-processes fitted models:
//! - Fit metrics (R², MSE, MAE)
//! - Confidence bands around predictions
//! - Grid predictions and forecasts
//! - Cross-validated model selection
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
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

/// Cross-validated model selection.
pub mod cv;

/// Grid predictions and forecasts.
pub mod forecast;

/// Confidence bands.
pub mod intervals;

/// Fit metrics.
pub mod metrics;
