//! Common types and utilities for the ifx implement-interface engine.
//!
//! This crate provides foundational types used across all ifx crates:
//! - String interning (`Atom`, `Interner`)
//! - Cooperative cancellation (`CancellationToken`)
//! - Engine limits and thresholds

// String interning for identifier deduplication
pub mod interner;
pub use interner::{Atom, Interner};

// Cooperative cancellation between units of work
pub mod cancellation;
pub use cancellation::CancellationToken;

// Centralized limits and thresholds
pub mod limits;
