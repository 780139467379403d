//! Platform access: HTTP, stream resolution and page scraping

pub mod client;
pub mod page;
pub mod playlist;
pub mod provider;

pub use client::{HttpClientConfig, PageSource, PlatformClient};
pub use page::{extract_description, PageDescription};
pub use playlist::{extract_playlist_links, PlaylistScraper};
pub use provider::{rank_best, InnerTubeProvider, StreamProvider};
