//! Configuration structures and loading logic.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub selectors: SelectorConfig,

    #[serde(default)]
    pub download: DownloadConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Browser session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Run the session browser without a window.
    #[serde(default = "default_true")]
    pub headless: bool,

    /// Path to the Chrome/Chromium executable (None for auto-detection).
    #[serde(default)]
    pub chrome_executable: Option<PathBuf>,

    /// Page opened before cookies are applied and used for the login check.
    #[serde(default = "default_home_url")]
    pub home_url: String,

    /// Seconds to wait for a post page to show one of its markers.
    #[serde(default = "default_page_timeout")]
    pub page_timeout_secs: u64,

    /// Seconds to wait for the user to finish an interactive login.
    #[serde(default = "default_login_timeout")]
    pub login_timeout_secs: u64,

    /// Seconds to wait for the logged-in marker after restoring cookies.
    #[serde(default = "default_session_check_timeout")]
    pub session_check_timeout_secs: u64,
}

/// CSS selectors used to recognise the state of a post page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Image elements of a photo slideshow.
    #[serde(default = "default_slideshow_selector")]
    pub slideshow_image: String,

    /// Container shown when a post cannot be displayed.
    #[serde(default = "default_error_container_selector")]
    pub error_container: String,

    /// Text inside the error container for deleted or private posts.
    #[serde(default = "default_unavailable_text")]
    pub unavailable_text: String,

    /// Native video element.
    #[serde(default = "default_video_selector")]
    pub video: String,

    /// Element only present for a logged-in user.
    #[serde(default = "default_logged_in_selector")]
    pub logged_in: String,
}

/// Download configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// yt-dlp executable.
    #[serde(default = "default_yt_dlp_path")]
    pub yt_dlp_path: PathBuf,

    /// yt-dlp format selector.
    #[serde(default = "default_video_format")]
    pub video_format: String,

    /// Where the Netscape cookie file for yt-dlp is written.
    #[serde(default)]
    pub cookie_file: Option<PathBuf>,

    /// Extension given to every slideshow image.
    #[serde(default = "default_image_extension")]
    pub image_extension: String,

    /// Upper bound for a single image or video transfer.
    #[serde(default = "default_transfer_timeout")]
    pub transfer_timeout_secs: u64,

    /// User agent for image requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Run options configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Abort the whole run when a link has no valid post ID.
    #[serde(default)]
    pub stop_on_invalid_link: bool,

    /// Whether to log posts skipped because they already exist.
    #[serde(default = "default_true")]
    pub show_skipped_downloads: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            chrome_executable: None,
            home_url: default_home_url(),
            page_timeout_secs: default_page_timeout(),
            login_timeout_secs: default_login_timeout(),
            session_check_timeout_secs: default_session_check_timeout(),
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            slideshow_image: default_slideshow_selector(),
            error_container: default_error_container_selector(),
            unavailable_text: default_unavailable_text(),
            video: default_video_selector(),
            logged_in: default_logged_in_selector(),
        }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            yt_dlp_path: default_yt_dlp_path(),
            video_format: default_video_format(),
            cookie_file: None,
            image_extension: default_image_extension(),
            transfer_timeout_secs: default_transfer_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            stop_on_invalid_link: false,
            show_skipped_downloads: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_home_url() -> String {
    "https://www.tiktok.com/".to_string()
}

fn default_page_timeout() -> u64 {
    10
}

fn default_login_timeout() -> u64 {
    120
}

fn default_session_check_timeout() -> u64 {
    10
}

fn default_slideshow_selector() -> String {
    ".css-brxox6-ImgPhotoSlide.e10jea832".to_string()
}

fn default_error_container_selector() -> String {
    ".css-1osbocj-DivErrorContainer".to_string()
}

fn default_unavailable_text() -> String {
    "Video currently unavailable".to_string()
}

fn default_video_selector() -> String {
    "video".to_string()
}

fn default_logged_in_selector() -> String {
    r#"[data-e2e="following-accounts"]"#.to_string()
}

fn default_yt_dlp_path() -> PathBuf {
    PathBuf::from("yt-dlp")
}

fn default_video_format() -> String {
    "best[vcodec!=none]".to_string()
}

fn default_image_extension() -> String {
    "jpg".to_string()
}

fn default_transfer_timeout() -> u64 {
    600
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/144.0.0.0 Safari/537.36".to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Default location of the config file in the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "tiktok-downloader")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Get the effective path of the Netscape cookie file handed to yt-dlp.
    pub fn netscape_cookie_file(&self) -> PathBuf {
        self.download
            .cookie_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("cookies"))
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.browser.page_timeout_secs)
    }

    pub fn login_timeout(&self) -> Duration {
        Duration::from_secs(self.browser.login_timeout_secs)
    }

    pub fn session_check_timeout(&self) -> Duration {
        Duration::from_secs(self.browser.session_check_timeout_secs)
    }

    pub fn transfer_timeout(&self) -> Duration {
        Duration::from_secs(self.download.transfer_timeout_secs)
    }
}
