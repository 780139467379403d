//! Raw media transfer: write the bytes of one stream to one path

use crate::core::progress::Progress;
use crate::core::video_info::StreamDescriptor;
use crate::error::TubeError;
use crate::platform::client::{check_status, PlatformClient};
use async_trait::async_trait;
use futures_util::StreamExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Callback invoked as bytes arrive
pub type ProgressCallback = Arc<dyn Fn(Progress) + Send + Sync>;

/// Writes the bytes of a stream to a local path
#[async_trait]
pub trait Transfer: Send + Sync {
    /// Transfer `stream` to `path`, returning the number of bytes written
    async fn transfer(&self, stream: &StreamDescriptor, path: &Path) -> Result<u64, TubeError>;
}

/// Streaming HTTP transfer.
///
/// Bytes go to a sibling `.tmp` file which is renamed into place once the
/// body is fully read, so a failed transfer never leaves a truncated file
/// under the final name.
pub struct HttpTransfer {
    client: PlatformClient,
    progress_callback: Option<ProgressCallback>,
}

impl HttpTransfer {
    pub fn new(client: PlatformClient) -> Self {
        Self {
            client,
            progress_callback: None,
        }
    }

    /// Set progress callback
    pub fn with_progress_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(Progress) + Send + Sync + 'static,
    {
        self.progress_callback = Some(Arc::new(callback));
        self
    }

    async fn stream_to(&self, url: &str, file: &mut File) -> Result<u64, TubeError> {
        let response = self.client.create_media_request(url).send().await?;
        let response = check_status(response)?;

        let mut progress = Progress::new(response.content_length().unwrap_or(0));
        let mut stream = response.bytes_stream();
        let mut downloaded = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;

            progress.update(downloaded);
            self.report(&progress);
        }

        file.flush().await?;
        file.sync_all().await?;

        if downloaded == 0 {
            return Err(TubeError::TransferFailed("Empty download (0 bytes)".to_string()));
        }

        // Unknown-length bodies are complete once the stream ends
        if progress.total_size == 0 {
            progress.total_size = downloaded;
            progress.update(downloaded);
            self.report(&progress);
        }

        Ok(downloaded)
    }

    fn report(&self, progress: &Progress) {
        if let Some(callback) = &self.progress_callback {
            callback(progress.clone());
        }
    }
}

#[async_trait]
impl Transfer for HttpTransfer {
    async fn transfer(&self, stream: &StreamDescriptor, path: &Path) -> Result<u64, TubeError> {
        info!("Transferring itag {} to {}", stream.itag, path.display());

        let tmp_path = temp_path(path);
        let mut file = File::create(&tmp_path).await?;

        match self.stream_to(&stream.url, &mut file).await {
            Ok(bytes) => {
                drop(file);
                tokio::fs::rename(&tmp_path, path).await?;
                debug!("Transfer completed: {} bytes", bytes);
                Ok(bytes)
            }
            Err(e) => {
                warn!("Transfer failed: {}, cleaning up temp file", e);
                drop(file);
                let _ = tokio::fs::remove_file(&tmp_path).await;
                Err(e)
            }
        }
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
