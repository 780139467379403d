//! Video metadata and stream resolution through the InnerTube API

use crate::core::video_info::{
    format_duration_hms, MediaKind, StreamDescriptor, VideoInfo, VideoMetadata, VideoReference,
};
use crate::error::TubeError;
use crate::platform::client::{PageSource, PlatformClient};
use crate::utils::mime::MimeInfo;
use crate::utils::url::{extract_video_id, BASE_ORIGIN};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

const ANDROID_CLIENT_VERSION: &str = "20.10.38";
const ANDROID_USER_AGENT: &str = "com.google.android.youtube/20.10.38 (Linux; U; Android 11) gzip";

static API_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""INNERTUBE_API_KEY":"([^"]+)""#).expect("valid regex"));

/// Resolves a video reference to metadata and streams
#[async_trait]
pub trait StreamProvider: Send + Sync {
    /// Fetch metadata and the ordered stream list for one video
    async fn fetch(&self, reference: &VideoReference) -> Result<VideoInfo, TubeError>;

    /// The provider's best-ranked stream
    fn best_stream<'a>(
        &self,
        streams: &'a [StreamDescriptor],
        audio_only: bool,
    ) -> Option<&'a StreamDescriptor> {
        rank_best(streams, audio_only)
    }
}

/// Default "best" ranking.
///
/// Audio-only requests take the highest-bitrate audio stream. Otherwise the
/// tallest muxed audio+video stream wins (bitrate breaks ties), falling back
/// to any stream when no muxed one exists.
pub fn rank_best(streams: &[StreamDescriptor], audio_only: bool) -> Option<&StreamDescriptor> {
    if audio_only {
        return streams
            .iter()
            .filter(|s| s.is_audio_only())
            .max_by_key(|s| s.bitrate);
    }

    let rank = |s: &&StreamDescriptor| (s.height.unwrap_or(0), s.bitrate);
    streams
        .iter()
        .filter(|s| s.has_video_and_audio())
        .max_by_key(rank)
        .or_else(|| streams.iter().max_by_key(rank))
}

/// Stream provider backed by the InnerTube `player` endpoint
pub struct InnerTubeProvider {
    client: PlatformClient,
    base_url: String,
    api_key: Mutex<Option<String>>,
}

impl InnerTubeProvider {
    /// Create a provider talking to the public platform origin
    pub fn new(client: PlatformClient) -> Self {
        Self::with_base_url(client, BASE_ORIGIN)
    }

    /// Create a provider talking to another origin
    pub fn with_base_url(client: PlatformClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: Mutex::new(None),
        }
    }

    /// Scrape the InnerTube API key from the watch page, once per run
    async fn ensure_api_key(&self, video_id: &str) -> Result<String, TubeError> {
        let mut api_key = self.api_key.lock().await;
        if let Some(key) = api_key.as_ref() {
            return Ok(key.clone());
        }

        let watch_url = format!("{}/watch?v={}", self.base_url, video_id);
        info!("Extracting API key from {}", watch_url);
        let body = self.client.fetch_page(&watch_url).await?;

        let key = API_KEY
            .captures(&body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or(TubeError::ApiKeyNotFound)?;

        debug!("Extracted API key: {}...", key.chars().take(10).collect::<String>());
        *api_key = Some(key.clone());
        Ok(key)
    }

    async fn get_player_response(&self, video_id: &str) -> Result<PlayerResponse, TubeError> {
        let api_key = self.ensure_api_key(video_id).await?;
        let url = format!("{}/youtubei/v1/player?key={}", self.base_url, api_key);

        let request_body = serde_json::json!({
            "context": {
                "client": {
                    "clientName": "ANDROID",
                    "clientVersion": ANDROID_CLIENT_VERSION,
                    "androidSdkVersion": 30,
                    "osName": "Android",
                    "osVersion": "11",
                    "userAgent": ANDROID_USER_AGENT,
                }
            },
            "videoId": video_id,
        });

        let headers = [
            ("X-YouTube-Client-Name", "3"),
            ("X-YouTube-Client-Version", ANDROID_CLIENT_VERSION),
            ("User-Agent", ANDROID_USER_AGENT),
        ];

        let response: PlayerResponse = self.client.post_json(&url, &headers, &request_body).await?;
        response.check_playability()?;
        Ok(response)
    }
}

#[async_trait]
impl StreamProvider for InnerTubeProvider {
    async fn fetch(&self, reference: &VideoReference) -> Result<VideoInfo, TubeError> {
        let video_id = extract_video_id(reference.as_str())?;
        info!("Fetching player response for video ID: {}", video_id);

        let response = self.get_player_response(&video_id).await?;
        let info = response.into_video_info(&video_id)?;
        debug!("Found {} streams for {}", info.streams.len(), video_id);
        Ok(info)
    }
}

/// Player response from InnerTube API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub playability_status: Option<PlayabilityStatus>,
    pub video_details: Option<VideoDetails>,
    pub streaming_data: Option<StreamingData>,
}

#[derive(Debug, Deserialize)]
pub struct PlayabilityStatus {
    pub status: String,
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    pub video_id: String,
    pub title: String,
    pub author: String,
    pub length_seconds: String,
    pub view_count: Option<String>,
    pub average_rating: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingData {
    pub formats: Option<Vec<FormatData>>,
    pub adaptive_formats: Option<Vec<FormatData>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatData {
    pub itag: u32,
    pub url: Option<String>,
    pub mime_type: String,
    pub bitrate: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub quality_label: Option<String>,
    pub signature_cipher: Option<String>,
}

impl PlayerResponse {
    /// Map the playability status onto domain errors
    pub fn check_playability(&self) -> Result<(), TubeError> {
        let Some(status) = &self.playability_status else {
            return Ok(());
        };
        let reason = status.reason.as_deref().unwrap_or_default().to_lowercase();

        match status.status.as_str() {
            "OK" => Ok(()),
            "LOGIN_REQUIRED" if reason.contains("private") => Err(TubeError::Private),
            "LOGIN_REQUIRED" => Err(TubeError::AgeRestricted),
            "UNPLAYABLE" if reason.contains("private") => Err(TubeError::Private),
            "ERROR" if reason.contains("rate limit") || reason.contains("quota") => {
                Err(TubeError::RateLimited)
            }
            other => {
                warn!("Video not playable ({}): {}", other, reason);
                Err(TubeError::VideoUnavailable)
            }
        }
    }

    /// Convert into domain types, keeping provider order: muxed streams
    /// first, then adaptive ones
    pub fn into_video_info(self, video_id: &str) -> Result<VideoInfo, TubeError> {
        let details = self.video_details.ok_or(TubeError::VideoUnavailable)?;

        let metadata = VideoMetadata {
            title: details.title,
            author: details.author,
            duration: format_duration_hms(details.length_seconds.parse().unwrap_or(0)),
            rating: details.average_rating.unwrap_or(0.0),
            view_count: details
                .view_count
                .as_deref()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        };

        let streaming = self.streaming_data;
        let muxed = streaming.as_ref().and_then(|s| s.formats.as_ref());
        let adaptive = streaming.as_ref().and_then(|s| s.adaptive_formats.as_ref());

        let streams: Vec<StreamDescriptor> = muxed
            .into_iter()
            .flatten()
            .map(|f| (f, true))
            .chain(adaptive.into_iter().flatten().map(|f| (f, false)))
            .filter_map(|(format, is_muxed)| format.to_descriptor(is_muxed))
            .collect();

        if streams.is_empty() {
            return Err(TubeError::NoStreamFound);
        }

        Ok(VideoInfo {
            id: video_id.to_string(),
            metadata,
            streams,
        })
    }
}

impl FormatData {
    /// Build a descriptor; streams behind a signature cipher are skipped
    fn to_descriptor(&self, is_muxed: bool) -> Option<StreamDescriptor> {
        let url = match (&self.url, &self.signature_cipher) {
            (Some(url), _) if !url.is_empty() => url.clone(),
            _ => {
                debug!("Skipping itag {} (no direct URL)", self.itag);
                return None;
            }
        };

        let mime = MimeInfo::parse(&self.mime_type);
        let kind = if mime.is_audio() {
            MediaKind::AudioOnly
        } else if !mime.is_video() {
            debug!("Skipping itag {} ({})", self.itag, mime.essence);
            return None;
        } else if is_muxed || mime.codecs.len() > 1 {
            MediaKind::AudioVideo
        } else {
            MediaKind::VideoOnly
        };

        let bitrate = self.bitrate.unwrap_or(0);
        let quality = match (kind, self.width, self.height) {
            (MediaKind::AudioOnly, _, _) => format!("{}k", bitrate / 1000),
            (_, Some(width), Some(height)) => format!("{}x{}", width, height),
            _ => self.quality_label.clone().unwrap_or_else(|| "unknown".to_string()),
        };

        Some(StreamDescriptor {
            itag: self.itag,
            container: mime.extension().to_string(),
            quality,
            kind,
            bitrate,
            height: self.height,
            url,
        })
    }
}
