//! Download module for post downloading.
//!
//! This module provides:
//! - Download state tracking
//! - Slideshow image downloading over HTTP
//! - Video downloading through yt-dlp
//! - Per-post dispatch and the batch driver over an activity export

pub mod batch;
pub mod images;
pub mod post;
pub mod state;
pub mod video;

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::session::CookieJar;

pub use batch::{download_activity, download_category};
pub use images::HttpImageDownloader;
pub use post::{download_post, DispatchState, Pipeline, PostOutcome};
pub use state::{DownloadState, GlobalState};
pub use video::YtDlpDownloader;

/// Downloads a video post.
#[async_trait]
pub trait VideoDownloader: Send + Sync {
    /// Download the video at `url` into `dest_dir` as `<post id>.<ext>`,
    /// authenticating with `cookies`.
    async fn download_video(&self, url: &str, cookies: &CookieJar, dest_dir: &Path) -> Result<()>;
}

/// Downloads the images of a slideshow post.
#[async_trait]
pub trait ImageDownloader: Send + Sync {
    /// Create `dest_dir` (which must not exist yet) and download each link
    /// into it as `01.<ext>`, `02.<ext>`, ... Failed images are logged and
    /// skipped. Returns the number of images written.
    async fn download_images(&self, links: &[String], dest_dir: &Path) -> Result<usize>;
}
