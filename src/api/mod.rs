//! Analysis service API client and wire types.
//!
//! This module provides:
//! - HTTP client for the streaming analysis endpoint
//! - Wire frame payload types and the typed [`Event`] decode
//! - Verification report normalization

mod client;
mod types;

pub use client::*;
pub use types::*;
