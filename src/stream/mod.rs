//! Incremental stream ingestion.
//!
//! This module provides:
//! - Streaming UTF-8 decoding that survives multi-byte splits
//! - Line reassembly across arbitrary chunk boundaries
//! - Frame decoding from assembled lines to typed events

mod decoder;
mod framing;

pub use decoder::*;
pub use framing::*;
