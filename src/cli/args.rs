//! Command line argument parsing

use crate::core::orchestrator::{RunConfig, RunMode};
use crate::core::video_info::{ListFile, SelectionPolicy, VideoReference};
use crate::error::TubeError;
use crate::platform::client::HttpClientConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// YouTube Downloader (Unofficial)
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// What to do with the source
    #[arg(value_enum)]
    pub mode: Mode,

    /// Video, playlist URL or path to a .txt list of URLs
    pub url: String,

    /// Audio-only streams
    #[arg(short, long)]
    pub audio: bool,

    /// Destination directory
    #[arg(short, long, value_name = "PATH", default_value = ".")]
    pub output: PathBuf,

    /// Take the best stream without asking
    #[arg(short, long)]
    pub maxquality: bool,

    /// Do not print video details (playlist mode)
    #[arg(long)]
    pub silent: bool,

    /// HTTP timeout (e.g., 30s, 1m)
    #[arg(long, value_name = "DURATION", default_value = "30s")]
    pub timeout: humantime::Duration,

    /// HTTP retries for transient errors
    #[arg(long, default_value = "3")]
    pub retries: u32,

    /// Override User-Agent header
    #[arg(long, value_name = "USER_AGENT")]
    pub user_agent: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output (only errors)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Run mode
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum Mode {
    /// Download one video
    Single,
    /// Show details for every URL in a .txt file
    Multiple,
    /// Download a whole playlist
    Playlist,
    /// Save the video description to description.txt
    Description,
}

impl Args {
    /// Get HTTP timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        self.timeout.into()
    }

    /// Get output verbosity level
    pub fn verbosity_level(&self) -> VerbosityLevel {
        if self.quiet {
            VerbosityLevel::Quiet
        } else if self.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }

    pub fn selection_policy(&self) -> SelectionPolicy {
        if self.maxquality {
            SelectionPolicy::MaxQuality
        } else {
            SelectionPolicy::Interactive
        }
    }

    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            timeout: self.timeout_duration(),
            max_retries: self.retries,
            user_agent: self.user_agent.clone(),
        }
    }

    /// Validate the source and destination and build the run configuration.
    ///
    /// Runs before any network activity.
    pub fn to_run_config(&self) -> Result<RunConfig, TubeError> {
        let mode = match self.mode {
            Mode::Single => RunMode::Single(VideoReference::parse(&self.url)?),
            Mode::Multiple => RunMode::Multiple(ListFile::parse(&self.url)?),
            Mode::Playlist => RunMode::Playlist(VideoReference::parse(&self.url)?),
            Mode::Description => RunMode::Description(VideoReference::parse(&self.url)?),
        };

        Ok(RunConfig::new(mode, &self.output)?
            .with_policy(self.selection_policy())
            .with_audio_only(self.audio)
            .with_silent(self.silent && self.mode == Mode::Playlist))
    }
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbosityLevel {
    /// Quiet (only errors)
    Quiet,
    /// Normal
    Normal,
    /// Verbose (debug info)
    Verbose,
}
