//! Browser session module.
//!
//! This module provides:
//! - The session and page-fetching seams used by the downloader
//! - A Chromium implementation driven over the DevTools protocol
//! - Cookie store persistence and Netscape cookie-file export

pub mod browser;
pub mod cookies;

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::media::FetchedPage;

pub use browser::{ChromiumSession, ChromiumSessionProvider};
pub use cookies::{CookieJar, CookieRecord};

/// Loads a post page and classifies it.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Navigate to `url`, wait for the page to show one of its markers and
    /// classify it. A page that shows none of them in time is `Unknown`.
    async fn fetch_and_classify(&self, url: &str) -> Result<FetchedPage>;
}

/// Supplies an authenticated session.
#[async_trait]
pub trait SessionProvider {
    type Session: PageFetcher;

    /// Restore the session from `cookie_store`, logging in interactively and
    /// writing the store first when it is missing or empty.
    async fn obtain(&self, cookie_store: &Path) -> Result<(Self::Session, CookieJar)>;
}
