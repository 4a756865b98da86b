//! Sphera Animation
//!
//! Frame-driven timing helpers for transient visual feedback.
//!
//! # Features
//!
//! - **Scoped feedback timers**: one pending reset per element, restarted on retrigger
//! - **Deterministic ticking**: callers pass the frame timestamp, nothing runs in the background

pub mod scheduler;

pub use scheduler::{Expired, FeedbackId, FeedbackScheduler};
