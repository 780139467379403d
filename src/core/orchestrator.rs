//! Top-level driver for the four run modes

use crate::core::description::{append_description, render_metadata};
use crate::core::selector::{ChoicePrompt, StreamSelector};
use crate::core::video_info::{ListFile, SelectionPolicy, StreamDescriptor, VideoReference};
use crate::error::TubeError;
use crate::platform::client::PageSource;
use crate::platform::page::extract_description;
use crate::platform::playlist::PlaylistScraper;
use crate::platform::provider::StreamProvider;
use crate::download::transfer::Transfer;
use crate::utils::filename::{next_free_path, to_safe_filename};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What to do and with which source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Download one video
    Single(VideoReference),
    /// Report metadata for every URL listed in a text file
    Multiple(ListFile),
    /// Download every video of a playlist
    Playlist(VideoReference),
    /// Append a video's publish date and description to `description.txt`
    Description(VideoReference),
}

/// Validated run configuration
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub mode: RunMode,
    pub policy: SelectionPolicy,
    pub audio_only: bool,
    pub destination: PathBuf,
    /// Suppress metadata blocks (playlist mode only)
    pub silent: bool,
}

impl RunConfig {
    /// Build a configuration, checking that `destination` is an existing
    /// directory
    pub fn new(mode: RunMode, destination: impl Into<PathBuf>) -> Result<Self, TubeError> {
        let destination = destination.into();
        if !destination.is_dir() {
            return Err(TubeError::MissingDestination(destination));
        }

        Ok(Self {
            mode,
            policy: SelectionPolicy::Interactive,
            audio_only: false,
            destination,
            silent: false,
        })
    }

    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_audio_only(mut self, audio_only: bool) -> Self {
        self.audio_only = audio_only;
        self
    }

    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }
}

/// Where a transfer lands
#[derive(Debug, Clone)]
pub struct DownloadTarget {
    directory: PathBuf,
    title: Option<String>,
}

impl DownloadTarget {
    pub fn new(directory: &Path) -> Self {
        Self {
            directory: directory.to_path_buf(),
            title: None,
        }
    }

    /// Name the output after `title` instead of the fallback
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Output path for `stream`, named `<safe title>.<container>`.
    ///
    /// A name already taken in the directory gets a ` (n)` suffix, so items
    /// sharing a title never overwrite each other.
    pub fn file_path(&self, fallback_title: &str, stream: &StreamDescriptor) -> PathBuf {
        let title = self.title.as_deref().unwrap_or(fallback_title);
        next_free_path(&self.directory.join(to_safe_filename(title, &stream.container)))
    }
}

/// Result of one item in a batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Succeeded {
        reference: String,
        path: Option<PathBuf>,
    },
    Failed {
        reference: String,
        reason: String,
    },
}

/// Per-item outcomes of a Multiple or Playlist run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    items: Vec<ItemOutcome>,
}

impl BatchReport {
    pub fn record_success(&mut self, reference: impl Into<String>, path: Option<PathBuf>) {
        self.items.push(ItemOutcome::Succeeded {
            reference: reference.into(),
            path,
        });
    }

    pub fn record_failure(&mut self, reference: impl Into<String>, error: &TubeError) {
        self.items.push(ItemOutcome::Failed {
            reference: reference.into(),
            reason: error.to_string(),
        });
    }

    pub fn items(&self) -> &[ItemOutcome] {
        &self.items
    }

    pub fn succeeded(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i, ItemOutcome::Succeeded { .. }))
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().filter_map(|item| match item {
            ItemOutcome::Failed { reference, reason } => Some((reference.as_str(), reason.as_str())),
            ItemOutcome::Succeeded { .. } => None,
        })
    }

    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} items succeeded", self.succeeded(), self.items.len())
    }
}

/// What a completed run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Single mode wrote one file
    Downloaded(PathBuf),
    /// Multiple or Playlist mode finished
    Batch(BatchReport),
    /// Description mode appended to this file
    Described(PathBuf),
    /// Nothing was done
    Skipped(String),
}

/// Drives provider, selector and transfer for one run
pub struct DownloadOrchestrator<P, T, S, C> {
    provider: P,
    transfer: T,
    pages: S,
    selector: StreamSelector<C>,
}

impl<P, T, S, C> DownloadOrchestrator<P, T, S, C>
where
    P: StreamProvider,
    T: Transfer,
    S: PageSource,
    C: ChoicePrompt,
{
    pub fn new(provider: P, transfer: T, pages: S, prompt: C) -> Self {
        Self {
            provider,
            transfer,
            pages,
            selector: StreamSelector::new(prompt),
        }
    }

    /// The selector, and through it the prompt
    pub fn selector(&self) -> &StreamSelector<C> {
        &self.selector
    }

    /// Run the configured mode to completion.
    ///
    /// Batch modes record per-item failures in the returned report and keep
    /// going; only [`TubeError::Cancelled`] aborts them.
    pub async fn run(&mut self, config: &RunConfig) -> Result<RunOutcome, TubeError> {
        match &config.mode {
            RunMode::Single(reference) => self
                .download_one(reference, config, true)
                .await
                .map(RunOutcome::Downloaded),
            RunMode::Multiple(list) => self.run_multiple(list).await.map(RunOutcome::Batch),
            RunMode::Playlist(reference) => self
                .run_playlist(reference, config)
                .await
                .map(RunOutcome::Batch),
            RunMode::Description(reference) => self.run_description(reference, config).await,
        }
    }

    /// Fetch, report, select and transfer one video.
    ///
    /// Playlist items are named after their title explicitly; otherwise the
    /// provider's title is the fallback name.
    async fn download_one(
        &mut self,
        reference: &VideoReference,
        config: &RunConfig,
        show_metadata: bool,
    ) -> Result<PathBuf, TubeError> {
        let info = self.provider.fetch(reference).await?;
        if show_metadata {
            self.selector.prompt_mut().report(&render_metadata(&info.metadata));
        }

        let stream = self
            .selector
            .select(&self.provider, &info.streams, config.policy, config.audio_only)
            .await?;

        let mut target = DownloadTarget::new(&config.destination);
        if matches!(config.mode, RunMode::Playlist(_)) {
            target = target.with_title(&info.metadata.title);
        }
        let path = target.file_path(&info.metadata.title, &stream);

        let bytes = self.transfer.transfer(&stream, &path).await?;
        info!("Saved {} ({} bytes)", path.display(), bytes);
        Ok(path)
    }

    async fn run_multiple(&mut self, list: &ListFile) -> Result<BatchReport, TubeError> {
        let content = tokio::fs::read_to_string(list.path()).await?;
        let mut report = BatchReport::default();

        for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let result = match VideoReference::parse(line) {
                Ok(reference) => self.provider.fetch(&reference).await,
                Err(e) => Err(e),
            };

            match result {
                Ok(info) => {
                    self.selector.prompt_mut().report(&render_metadata(&info.metadata));
                    report.record_success(line, None);
                }
                Err(e) => {
                    warn!("Skipping {}: {}", line, e);
                    report.record_failure(line, &e);
                }
            }
        }

        Ok(report)
    }

    async fn run_playlist(
        &mut self,
        playlist: &VideoReference,
        config: &RunConfig,
    ) -> Result<BatchReport, TubeError> {
        let references = PlaylistScraper::new(&self.pages).scrape(playlist).await?;
        self.selector
            .prompt_mut()
            .report(&format!("This playlist contains {} videos.", references.len()));

        let mut report = BatchReport::default();
        for (index, reference) in references.iter().enumerate() {
            debug!("Playlist item {}/{}: {}", index + 1, references.len(), reference);

            match self.download_one(reference, config, !config.silent).await {
                Ok(path) => report.record_success(reference.as_str(), Some(path)),
                Err(TubeError::Cancelled) => return Err(TubeError::Cancelled),
                Err(e) => {
                    warn!("Playlist item {} failed: {}", reference, e);
                    report.record_failure(reference.as_str(), &e);
                }
            }
        }

        Ok(report)
    }

    async fn run_description(
        &mut self,
        reference: &VideoReference,
        config: &RunConfig,
    ) -> Result<RunOutcome, TubeError> {
        if reference.as_str().contains(".txt") {
            warn!("Description mode does not take list files: {}", reference);
            return Ok(RunOutcome::Skipped(
                "Description mode does not take list files.".to_string(),
            ));
        }

        let html = self.pages.fetch_page(reference.as_str()).await?;
        let page = extract_description(&html)?;
        let path = append_description(&config.destination, &page.date, &page.description).await?;
        Ok(RunOutcome::Described(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::selector::tests::{stream, ScriptedPrompt};
    use crate::core::video_info::{MediaKind, VideoInfo, VideoMetadata};
    use crate::utils::url::extract_video_id;
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeProvider {
        videos: HashMap<String, VideoInfo>,
    }

    impl FakeProvider {
        fn with_video(mut self, url: &str, title: &str) -> Self {
            let id = extract_video_id(url).unwrap();
            let info = VideoInfo {
                id: id.clone(),
                metadata: VideoMetadata {
                    title: title.to_string(),
                    author: "Someone".to_string(),
                    duration: "00:01:00".to_string(),
                    rating: 4.5,
                    view_count: 1_500,
                },
                streams: vec![
                    stream(18, MediaKind::AudioVideo, Some(360), 500_000),
                    stream(22, MediaKind::AudioVideo, Some(720), 1_500_000),
                    stream(140, MediaKind::AudioOnly, None, 128_000),
                ],
            };
            self.videos.insert(id, info);
            self
        }
    }

    #[async_trait]
    impl StreamProvider for FakeProvider {
        async fn fetch(&self, reference: &VideoReference) -> Result<VideoInfo, TubeError> {
            let id = extract_video_id(reference.as_str())?;
            self.videos.get(&id).cloned().ok_or(TubeError::VideoUnavailable)
        }
    }

    #[derive(Default)]
    struct RecordingTransfer {
        calls: Mutex<Vec<(u32, PathBuf)>>,
        failing_files: HashSet<String>,
    }

    impl RecordingTransfer {
        fn failing_on(file_name: &str) -> Self {
            Self {
                failing_files: HashSet::from([file_name.to_string()]),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<(u32, PathBuf)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transfer for RecordingTransfer {
        async fn transfer(&self, stream: &StreamDescriptor, path: &Path) -> Result<u64, TubeError> {
            self.calls.lock().unwrap().push((stream.itag, path.to_path_buf()));
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            if self.failing_files.contains(&name) {
                return Err(TubeError::TransferFailed("connection reset".to_string()));
            }
            std::fs::write(path, stream.itag.to_string()).unwrap();
            Ok(1)
        }
    }

    #[derive(Default)]
    struct FakePages {
        pages: HashMap<String, String>,
        fetched: Mutex<Vec<String>>,
    }

    impl FakePages {
        fn with_page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), html.to_string());
            self
        }
    }

    #[async_trait]
    impl PageSource for FakePages {
        async fn fetch_page(&self, url: &str) -> Result<String, TubeError> {
            self.fetched.lock().unwrap().push(url.to_string());
            self.pages.get(url).cloned().ok_or(TubeError::VideoUnavailable)
        }
    }

    const V1: &str = "https://www.youtube.com/watch?v=one";
    const V2: &str = "https://www.youtube.com/watch?v=two";
    const V3: &str = "https://www.youtube.com/watch?v=three";
    const PLAYLIST: &str = "https://www.youtube.com/playlist?list=PL1";

    fn reference(url: &str) -> VideoReference {
        VideoReference::parse(url).unwrap()
    }

    fn playlist_html() -> String {
        ["one", "two", "three"]
            .iter()
            .enumerate()
            .map(|(i, id)| format!(r#"<a href="/watch?v={id}&amp;index={}">x</a>"#, i + 1))
            .collect()
    }

    #[test]
    fn test_run_config_requires_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let result = RunConfig::new(RunMode::Single(reference(V1)), &missing);
        assert!(matches!(result, Err(TubeError::MissingDestination(p)) if p == missing));

        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        assert!(RunConfig::new(RunMode::Single(reference(V1)), &file).is_err());

        let config = RunConfig::new(RunMode::Single(reference(V1)), dir.path()).unwrap();
        assert_eq!(config.policy, SelectionPolicy::Interactive);
        assert!(!config.audio_only);
        assert!(!config.silent);
    }

    #[test]
    fn test_download_target_naming() {
        let s = stream(22, MediaKind::AudioVideo, Some(720), 1);
        let target = DownloadTarget::new(Path::new("/out"));
        assert_eq!(target.file_path("A: B", &s), PathBuf::from("/out/A_ B.mp4"));

        let titled = target.with_title("Named");
        assert_eq!(titled.file_path("ignored", &s), PathBuf::from("/out/Named.mp4"));
    }

    #[test]
    fn test_batch_report() {
        let mut report = BatchReport::default();
        report.record_success("a", None);
        report.record_failure("b", &TubeError::VideoUnavailable);

        assert_eq!(report.succeeded(), 1);
        assert!(!report.is_clean());
        assert_eq!(
            report.failures().collect::<Vec<_>>(),
            vec![("b", "Video unavailable")]
        );
        assert_eq!(report.to_string(), "1 of 2 items succeeded");
    }

    #[tokio::test]
    async fn test_single_max_quality_transfers_best_once() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig::new(RunMode::Single(reference(V1)), dir.path())
            .unwrap()
            .with_policy(SelectionPolicy::MaxQuality);

        let mut orchestrator = DownloadOrchestrator::new(
            FakeProvider::default().with_video(V1, "First Video"),
            RecordingTransfer::default(),
            FakePages::default(),
            ScriptedPrompt::default(),
        );

        let outcome = orchestrator.run(&config).await.unwrap();
        let expected = dir.path().join("First Video.mp4");

        assert_eq!(outcome, RunOutcome::Downloaded(expected.clone()));
        assert_eq!(orchestrator.transfer.calls(), vec![(22, expected)]);

        let prompt = orchestrator.selector().prompt();
        assert_eq!(prompt.reads, 0);
        assert!(prompt.shown.is_empty());
        assert!(prompt.reported[0].contains("First Video"));
    }

    #[tokio::test]
    async fn test_single_interactive_audio() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig::new(RunMode::Single(reference(V1)), dir.path())
            .unwrap()
            .with_audio_only(true);

        let mut orchestrator = DownloadOrchestrator::new(
            FakeProvider::default().with_video(V1, "First Video"),
            RecordingTransfer::default(),
            FakePages::default(),
            ScriptedPrompt::with_lines(&["5", "0"]),
        );

        orchestrator.run(&config).await.unwrap();
        assert_eq!(
            orchestrator.transfer.calls(),
            vec![(140, dir.path().join("First Video.m4a"))]
        );

        // Metadata is informational; the table and errors are part of the prompt
        let prompt = orchestrator.selector().prompt();
        assert_eq!(prompt.reported.len(), 1);
        assert!(prompt.reported[0].contains("First Video"));
        assert!(prompt.shown[0].contains("Available Streams"));
        assert_eq!(prompt.shown[1], "The choice is invalid.");
    }

    #[tokio::test]
    async fn test_single_lookup_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig::new(RunMode::Single(reference(V1)), dir.path()).unwrap();

        let mut orchestrator = DownloadOrchestrator::new(
            FakeProvider::default(),
            RecordingTransfer::default(),
            FakePages::default(),
            ScriptedPrompt::default(),
        );

        assert!(matches!(
            orchestrator.run(&config).await,
            Err(TubeError::VideoUnavailable)
        ));
        assert!(orchestrator.transfer.calls().is_empty());
    }

    #[tokio::test]
    async fn test_playlist_continues_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig::new(RunMode::Playlist(reference(PLAYLIST)), dir.path())
            .unwrap()
            .with_policy(SelectionPolicy::MaxQuality);

        let mut orchestrator = DownloadOrchestrator::new(
            FakeProvider::default()
                .with_video(V1, "One")
                .with_video(V2, "Two")
                .with_video(V3, "Three"),
            RecordingTransfer::failing_on("Two.mp4"),
            FakePages::default().with_page(PLAYLIST, &playlist_html()),
            ScriptedPrompt::default(),
        );

        let RunOutcome::Batch(report) = orchestrator.run(&config).await.unwrap() else {
            panic!("expected a batch report");
        };

        let files: Vec<PathBuf> = orchestrator
            .transfer
            .calls()
            .into_iter()
            .map(|(_, p)| p)
            .collect();
        assert_eq!(
            files,
            vec![
                dir.path().join("One.mp4"),
                dir.path().join("Two.mp4"),
                dir.path().join("Three.mp4"),
            ]
        );
        assert_eq!(report.items().len(), 3);
        assert_eq!(report.succeeded(), 2);
        let failures: Vec<_> = report.failures().map(|(r, _)| r.to_string()).collect();
        assert_eq!(failures, vec!["https://www.youtube.com/watch?v=two&index=2"]);

        let prompt = orchestrator.selector().prompt();
        assert_eq!(prompt.reported[0], "This playlist contains 3 videos.");
    }

    #[tokio::test]
    async fn test_playlist_items_sharing_a_title_keep_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig::new(RunMode::Playlist(reference(PLAYLIST)), dir.path())
            .unwrap()
            .with_policy(SelectionPolicy::MaxQuality)
            .with_silent(true);

        let mut orchestrator = DownloadOrchestrator::new(
            FakeProvider::default()
                .with_video(V1, "Episode")
                .with_video(V2, "Episode")
                .with_video(V3, "Episode"),
            RecordingTransfer::default(),
            FakePages::default().with_page(PLAYLIST, &playlist_html()),
            ScriptedPrompt::default(),
        );

        let RunOutcome::Batch(report) = orchestrator.run(&config).await.unwrap() else {
            panic!("expected a batch report");
        };

        assert_eq!(report.succeeded(), 3);
        let expected = vec![
            dir.path().join("Episode.mp4"),
            dir.path().join("Episode (1).mp4"),
            dir.path().join("Episode (2).mp4"),
        ];
        let files: Vec<PathBuf> = orchestrator
            .transfer
            .calls()
            .into_iter()
            .map(|(_, p)| p)
            .collect();
        assert_eq!(files, expected);
        assert!(expected.iter().all(|p| p.exists()));
    }

    #[tokio::test]
    async fn test_playlist_lookup_failure_is_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig::new(RunMode::Playlist(reference(PLAYLIST)), dir.path())
            .unwrap()
            .with_policy(SelectionPolicy::MaxQuality)
            .with_silent(true);

        let mut orchestrator = DownloadOrchestrator::new(
            FakeProvider::default().with_video(V1, "One").with_video(V3, "Three"),
            RecordingTransfer::default(),
            FakePages::default().with_page(PLAYLIST, &playlist_html()),
            ScriptedPrompt::default(),
        );

        let RunOutcome::Batch(report) = orchestrator.run(&config).await.unwrap() else {
            panic!("expected a batch report");
        };

        assert_eq!(report.succeeded(), 2);
        assert_eq!(orchestrator.transfer.calls().len(), 2);
        // Silent mode prints only the count
        assert_eq!(orchestrator.selector().prompt().reported.len(), 1);
    }

    #[tokio::test]
    async fn test_playlist_cancel_aborts_run() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig::new(RunMode::Playlist(reference(PLAYLIST)), dir.path()).unwrap();

        let mut orchestrator = DownloadOrchestrator::new(
            FakeProvider::default()
                .with_video(V1, "One")
                .with_video(V2, "Two")
                .with_video(V3, "Three"),
            RecordingTransfer::default(),
            FakePages::default().with_page(PLAYLIST, &playlist_html()),
            ScriptedPrompt::with_lines(&["0"]),
        );

        assert!(matches!(
            orchestrator.run(&config).await,
            Err(TubeError::Cancelled)
        ));
        assert_eq!(orchestrator.transfer.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_multiple_reports_metadata_only() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("list.txt");
        std::fs::write(&list, format!("{V1}\n\nnot a url\n{V2}\n  \n")).unwrap();

        let config = RunConfig::new(
            RunMode::Multiple(ListFile::parse(list.to_str().unwrap()).unwrap()),
            dir.path(),
        )
        .unwrap();

        let mut orchestrator = DownloadOrchestrator::new(
            FakeProvider::default().with_video(V1, "One"),
            RecordingTransfer::default(),
            FakePages::default(),
            ScriptedPrompt::default(),
        );

        let RunOutcome::Batch(report) = orchestrator.run(&config).await.unwrap() else {
            panic!("expected a batch report");
        };

        assert!(orchestrator.transfer.calls().is_empty());
        assert_eq!(report.items().len(), 3);
        assert_eq!(report.succeeded(), 1);
        let failed: Vec<&str> = report.failures().map(|(r, _)| r).collect();
        assert_eq!(failed, vec!["not a url", V2]);

        let prompt = orchestrator.selector().prompt();
        assert!(prompt.shown.is_empty());
        assert_eq!(prompt.reported.len(), 1);
        assert!(prompt.reported[0].contains("One"));
        assert_eq!(prompt.reads, 0);
    }

    #[tokio::test]
    async fn test_description_appends_record() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig::new(RunMode::Description(reference(V1)), dir.path()).unwrap();
        let html = r#"<strong class="watch-time-text">Published on Jan 1</strong>
                      <p id="eow-description">A video.</p>"#;

        let mut orchestrator = DownloadOrchestrator::new(
            FakeProvider::default(),
            RecordingTransfer::default(),
            FakePages::default().with_page(V1, html),
            ScriptedPrompt::default(),
        );

        let outcome = orchestrator.run(&config).await.unwrap();
        let path = dir.path().join("description.txt");
        assert_eq!(outcome, RunOutcome::Described(path.clone()));
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "Published on Jan 1\n\nA video.\n\n\n"
        );
    }

    #[tokio::test]
    async fn test_description_missing_nodes() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig::new(RunMode::Description(reference(V1)), dir.path()).unwrap();

        let mut orchestrator = DownloadOrchestrator::new(
            FakeProvider::default(),
            RecordingTransfer::default(),
            FakePages::default().with_page(V1, "<html></html>"),
            ScriptedPrompt::default(),
        );

        assert!(matches!(
            orchestrator.run(&config).await,
            Err(TubeError::MissingPageNode(_))
        ));
        assert!(!dir.path().join("description.txt").exists());
    }

    #[tokio::test]
    async fn test_description_skips_list_files() {
        let dir = tempfile::tempdir().unwrap();
        let source = reference("https://www.youtube.com/list.txt");
        let config = RunConfig::new(RunMode::Description(source), dir.path()).unwrap();

        let mut orchestrator = DownloadOrchestrator::new(
            FakeProvider::default(),
            RecordingTransfer::default(),
            FakePages::default(),
            ScriptedPrompt::default(),
        );

        let outcome = orchestrator.run(&config).await.unwrap();
        assert!(matches!(outcome, RunOutcome::Skipped(_)));
        assert!(orchestrator.pages.fetched.lock().unwrap().is_empty());
    }
}
