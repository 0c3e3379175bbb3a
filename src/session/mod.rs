//! Analysis session orchestration.
//!
//! This module provides:
//! - The owned [`Session`] value published as immutable snapshots
//! - The [`AnalysisEngine`] driving one run from request to terminal state

mod engine;
mod session;

pub use engine::*;
pub use session::*;
