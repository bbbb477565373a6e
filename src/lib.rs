//! TikTok Downloader - archive liked and bookmarked TikTok posts
//!
//! This library reads the liked and bookmarked post links from a TikTok user
//! data export and downloads every post through an authenticated browser
//! session.
//!
//! # Features
//!
//! - Cookie-based session restore with interactive login fallback
//! - Post page classification (video, photo slideshow, unavailable)
//! - Video download through yt-dlp with exported session cookies
//! - Slideshow image download into numbered files
//! - Skips posts already present in the output folders
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use tiktok_downloader::{
//!     ActivityExport, ChromiumSessionProvider, Config, HttpImageDownloader, PageMarkers,
//!     Pipeline, SessionProvider, YtDlpDownloader, download_activity,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let export = ActivityExport::load(Path::new("user_data.json"))?;
//!
//!     let markers = PageMarkers::from_config(&config.selectors)?;
//!     let provider = ChromiumSessionProvider::new(&config, markers.clone());
//!     let (session, cookies) = provider.obtain(Path::new("cookies.json")).await?;
//!
//!     let videos = YtDlpDownloader::new(&config);
//!     let images = HttpImageDownloader::new(&config.download)?;
//!     let pipeline = Pipeline {
//!         fetcher: &session,
//!         markers: &markers,
//!         videos: &videos,
//!         images: &images,
//!         cookies: &cookies,
//!         options: &config.options,
//!     };
//!
//!     download_activity(&pipeline, &export, Path::new("out")).await?;
//!     session.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod activity;
pub mod cli;
pub mod config;
pub mod dedup;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;
pub mod session;

// Re-exports for convenience
pub use activity::{ActivityExport, Category};
pub use config::Config;
pub use download::{
    download_activity, download_category, download_post, DownloadState, GlobalState,
    HttpImageDownloader, Pipeline, PostOutcome, YtDlpDownloader,
};
pub use error::{Error, Result};
pub use media::{PageKind, PageMarkers};
pub use session::{ChromiumSessionProvider, CookieJar, PageFetcher, SessionProvider};
