//! # Factcheck Stream
//!
//! A client for a remote fact-checking analysis service. It submits a block
//! of text and incrementally reconstructs the structured result - extracted
//! claims, search queries, gathered evidence, a verification report, and a
//! rewritten "verified" text - as the service streams events back over a
//! long-lived HTTP response.
//!
//! ## Architecture
//!
//! ```text
//! network bytes → Utf8StreamDecoder → LineAssembler → decode_line
//!                                                         ↓
//!                            AnalysisEngine → {StagePipeline, ResultAggregate}
//!                                                         ↓
//!                                            watch<Session> snapshots
//! ```
//!
//! Data flows strictly one way. Presentation layers (the CLI binary, or any
//! other consumer) subscribe to immutable [`Session`] snapshots and never
//! mutate pipeline state.
//!
//! ## Example
//!
//! ```ignore
//! use factcheck_stream::{api::AnalysisClient, AnalysisEngine, Config};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let client = AnalysisClient::new(&config.service, config.request.clone())?;
//!     let engine = AnalysisEngine::new(client);
//!     let session = engine
//!         .analyze("The population of Paris is over 10 million.", CancellationToken::new())
//!         .await?;
//!     println!("{:#?}", session);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

/// Analysis service API client and wire types.
pub mod api;
/// Configuration management for the client.
pub mod config;
/// Error types and result aliases for the application.
pub mod error;
/// Staged pipeline state and result accumulation.
pub mod pipeline;
/// Analysis session orchestration.
pub mod session;
/// Incremental stream ingestion primitives.
pub mod stream;

pub use config::Config;
pub use error::{AnalysisError, AppError, AppResult};
pub use session::{AnalysisEngine, Session, SessionStatus};
