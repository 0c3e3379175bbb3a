//! Staged pipeline state and result accumulation.
//!
//! This module provides:
//! - The ordered stage list and its event-driven transition table
//! - The cumulative result aggregate with whole-field merge rules

mod aggregate;
mod stages;

pub use aggregate::*;
pub use stages::*;
