//! Playlist page scraping

use crate::core::video_info::VideoReference;
use crate::error::TubeError;
use crate::platform::client::PageSource;
use crate::utils::url::normalize_link;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, info};

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid link selector"));

/// Extracts the videos a playlist page links to
pub struct PlaylistScraper<S> {
    source: S,
}

impl<S: PageSource> PlaylistScraper<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetch the playlist page and return its distinct video references in
    /// page order
    pub async fn scrape(&self, playlist: &VideoReference) -> Result<Vec<VideoReference>, TubeError> {
        info!("Scraping playlist: {}", playlist);
        let html = self.source.fetch_page(playlist.as_str()).await?;
        let references = extract_playlist_links(&html);
        debug!("Playlist {} yielded {} videos", playlist, references.len());
        Ok(references)
    }
}

/// Collect every `a[href]` carrying `index=`, resolve it against the
/// platform origin and drop repeats, keeping the first occurrence
pub fn extract_playlist_links(html: &str) -> Vec<VideoReference> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut references = Vec::new();

    for anchor in document.select(&LINK_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !href.contains("index=") {
            continue;
        }

        let Some(absolute) = normalize_link(href) else {
            debug!("Skipping unresolvable link: {}", href);
            continue;
        };
        if !seen.insert(absolute.clone()) {
            continue;
        }

        match VideoReference::parse(&absolute) {
            Ok(reference) => references.push(reference),
            Err(_) => debug!("Skipping off-platform link: {}", absolute),
        }
    }

    references
}
