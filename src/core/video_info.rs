//! Video information structures

use crate::error::TubeError;
use crate::utils::url::{is_canonical_url, is_list_file};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Canonical URL of a video or page on the platform
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoReference(String);

impl VideoReference {
    /// Validate a URL against the canonical platform pattern
    pub fn parse(url: &str) -> Result<Self, TubeError> {
        let url = url.trim();
        if !is_canonical_url(url) {
            return Err(TubeError::InvalidUrl(url.to_string()));
        }
        Ok(Self(url.to_string()))
    }

    /// The URL as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for VideoReference {
    type Error = TubeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VideoReference> for String {
    fn from(value: VideoReference) -> Self {
        value.0
    }
}

/// Plain-text file holding one video URL per line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFile(PathBuf);

impl ListFile {
    /// Accept only `.txt` sources
    pub fn parse(source: &str) -> Result<Self, TubeError> {
        if !is_list_file(source) {
            return Err(TubeError::UnsupportedListFile(source.to_string()));
        }
        Ok(Self(PathBuf::from(source)))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Video metadata shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Video title
    pub title: String,
    /// Channel name
    pub author: String,
    /// Duration formatted as `HH:MM:SS`
    pub duration: String,
    /// Average rating on a 0 to 5 scale
    pub rating: f64,
    /// View count
    pub view_count: u64,
}

/// What a stream carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    AudioOnly,
    VideoOnly,
    AudioVideo,
}

/// A selectable container and quality variant of a video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    /// Platform format ID (itag)
    pub itag: u32,
    /// Container tag used as file extension (e.g. "mp4", "m4a")
    pub container: String,
    /// Resolution for video (e.g. "640x360"), bitrate for audio (e.g. "128k")
    pub quality: String,
    /// Media kind
    pub kind: MediaKind,
    /// Bitrate in bits per second
    pub bitrate: u32,
    /// Video height, if any
    pub height: Option<u32>,
    /// Direct media URL
    pub url: String,
}

impl StreamDescriptor {
    pub fn is_audio_only(&self) -> bool {
        self.kind == MediaKind::AudioOnly
    }

    pub fn has_video_and_audio(&self) -> bool {
        self.kind == MediaKind::AudioVideo
    }
}

/// Everything the provider knows about one video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    /// Video ID
    pub id: String,
    /// Display metadata
    pub metadata: VideoMetadata,
    /// Streams in provider order
    pub streams: Vec<StreamDescriptor>,
}

/// Rule used to pick one stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Ask the user for an index
    Interactive,
    /// Take the provider's best-ranked stream
    MaxQuality,
}

/// Format a duration in seconds as `HH:MM:SS`
pub fn format_duration_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
