//! # tubegrab - YouTube downloader
//!
//! Resolves videos to their available streams, picks one (interactively or
//! by best quality) and downloads it. Four run modes:
//!
//! - `single`: one video
//! - `multiple`: print details for every URL in a `.txt` list
//! - `playlist`: every video of a playlist, failures reported per item
//! - `description`: append the publish date and description to `description.txt`
//!
//! ## Example
//!
//! ```rust,no_run
//! use tubegrab::core::{DownloadOrchestrator, RunConfig, RunMode, SelectionPolicy, TerminalPrompt, VideoReference};
//! use tubegrab::download::HttpTransfer;
//! use tubegrab::platform::{HttpClientConfig, InnerTubeProvider, PlatformClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PlatformClient::with_config(HttpClientConfig::default())?;
//!     let mut orchestrator = DownloadOrchestrator::new(
//!         InnerTubeProvider::new(client.clone()),
//!         HttpTransfer::new(client.clone()),
//!         client,
//!         TerminalPrompt::default(),
//!     );
//!
//!     let reference = VideoReference::parse("https://www.youtube.com/watch?v=VIDEO_ID")?;
//!     let config = RunConfig::new(RunMode::Single(reference), "./downloads")?
//!         .with_policy(SelectionPolicy::MaxQuality);
//!
//!     let outcome = orchestrator.run(&config).await?;
//!     println!("{:?}", outcome);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod download;
pub mod error;
pub mod platform;
pub mod utils;

// Re-export main types
pub use crate::core::{DownloadOrchestrator, RunConfig, RunMode, RunOutcome, StreamDescriptor, VideoInfo};
pub use error::TubeError;

/// Result type alias for tubegrab operations
pub type Result<T> = std::result::Result<T, TubeError>;
