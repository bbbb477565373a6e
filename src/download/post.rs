//! Single post download logic.

use std::fmt;
use std::path::Path;

use crate::config::{parse_post_id, OptionsConfig};
use crate::dedup::is_post_downloaded;
use crate::download::{ImageDownloader, VideoDownloader};
use crate::error::Result;
use crate::fs::slideshow_folder;
use crate::media::{PageKind, PageMarkers};
use crate::session::{CookieJar, PageFetcher};

/// Everything a post download needs, shared by every link of a run.
pub struct Pipeline<'a> {
    pub fetcher: &'a dyn PageFetcher,
    pub markers: &'a PageMarkers,
    pub videos: &'a dyn VideoDownloader,
    pub images: &'a dyn ImageDownloader,
    pub cookies: &'a CookieJar,
    pub options: &'a OptionsConfig,
}

/// Terminal state of a post download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Skipped,
    Done,
    Failed,
}

/// What happened to a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOutcome {
    /// A file or folder named after the post already exists.
    AlreadyDownloaded,
    /// The post is a video; `downloaded` is false when yt-dlp failed.
    Video { downloaded: bool },
    /// The post is a slideshow of `found` images, `downloaded` of which were written.
    Slideshow { found: usize, downloaded: usize },
    /// The post was deleted or is private.
    Unavailable,
    /// The slideshow markup had no image links.
    EmptySlideshow,
    /// The slideshow folder could not be created.
    ImageFolderFailed,
    /// The page showed none of the known markers.
    UnknownPage,
    /// The browser failed to load the page.
    FetchFailed,
}

impl PostOutcome {
    pub fn state(&self) -> DispatchState {
        match self {
            PostOutcome::AlreadyDownloaded => DispatchState::Skipped,
            PostOutcome::Video { .. } | PostOutcome::Slideshow { .. } | PostOutcome::Unavailable => {
                DispatchState::Done
            }
            PostOutcome::EmptySlideshow
            | PostOutcome::ImageFolderFailed
            | PostOutcome::UnknownPage
            | PostOutcome::FetchFailed => DispatchState::Failed,
        }
    }
}

impl fmt::Display for PostOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostOutcome::AlreadyDownloaded => write!(f, "already downloaded"),
            PostOutcome::Video { downloaded: true } => write!(f, "video downloaded"),
            PostOutcome::Video { downloaded: false } => write!(f, "video download failed"),
            PostOutcome::Slideshow { found, downloaded } => {
                write!(f, "slideshow, {}/{} images downloaded", downloaded, found)
            }
            PostOutcome::Unavailable => write!(f, "unavailable"),
            PostOutcome::EmptySlideshow => write!(f, "slideshow without images"),
            PostOutcome::ImageFolderFailed => write!(f, "slideshow folder could not be created"),
            PostOutcome::UnknownPage => write!(f, "unknown page type"),
            PostOutcome::FetchFailed => write!(f, "page could not be loaded"),
        }
    }
}

/// Download a single post into `outfolder`.
///
/// Only a link without a valid post ID is an error; every other failure is
/// logged and reported through the outcome.
pub async fn download_post(
    pipeline: &Pipeline<'_>,
    link: &str,
    outfolder: &Path,
) -> Result<PostOutcome> {
    tracing::info!("Downloading link {}", link);

    let id = parse_post_id(link)?;

    if is_post_downloaded(outfolder, &id)? {
        if pipeline.options.show_skipped_downloads {
            tracing::info!("Skipping post {}: file already exists", id);
        }
        return Ok(PostOutcome::AlreadyDownloaded);
    }

    let page = match pipeline.fetcher.fetch_and_classify(link).await {
        Ok(page) => page,
        Err(e) => {
            tracing::error!("Failed to load post {}: {}", id, e);
            return Ok(PostOutcome::FetchFailed);
        }
    };

    let outcome = match page.kind {
        PageKind::Video => {
            tracing::info!("Downloading video {}", id);

            match pipeline
                .videos
                .download_video(link, pipeline.cookies, outfolder)
                .await
            {
                Ok(()) => PostOutcome::Video { downloaded: true },
                Err(e) => {
                    tracing::error!("Failed to download video {}: {}", id, e);
                    PostOutcome::Video { downloaded: false }
                }
            }
        }
        PageKind::Slideshow => {
            let markup = page.markup.unwrap_or_default();
            let image_links = pipeline.markers.slideshow_links(&markup);

            if image_links.is_empty() {
                tracing::error!("Slideshow {} had 0 images", id);
                return Ok(PostOutcome::EmptySlideshow);
            }

            tracing::info!(
                "Downloading {} images for slideshow {}",
                image_links.len(),
                id
            );

            let image_folder = slideshow_folder(outfolder, &id);
            match pipeline
                .images
                .download_images(&image_links, &image_folder)
                .await
            {
                Ok(downloaded) => PostOutcome::Slideshow {
                    found: image_links.len(),
                    downloaded,
                },
                Err(e) => {
                    tracing::error!("Failed to download slideshow {}: {}", id, e);
                    PostOutcome::ImageFolderFailed
                }
            }
        }
        PageKind::Unavailable => {
            tracing::info!(
                "Skipping video {} because post was deleted or is unavailable",
                id
            );
            PostOutcome::Unavailable
        }
        PageKind::Unknown => {
            tracing::error!("Skipping video {} because page type was unknown", id);
            PostOutcome::UnknownPage
        }
    };

    Ok(outcome)
}
