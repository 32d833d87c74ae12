//! Synthetic retail inventory panel generator.
//!
//! Builds a store × product × day panel of prices, demand, inventory and
//! promotion flags from a single seed, then writes it as one CSV file.

pub mod attributes;
pub mod calendar;
pub mod config;
pub mod demand;
pub mod engine;
pub mod error;
pub mod event;
pub mod export;
pub mod panel;
pub mod rng;
pub mod rollforward;
pub mod signals;
pub mod stage;
pub mod summary;
pub mod types;
pub mod universe;
