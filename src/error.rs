//! Error types for the tiktok-downloader application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // Input errors
    #[error("Invalid activity export: {0}")]
    ActivityExport(String),

    #[error("Id {id} from url {link} is not valid")]
    InvalidPostId { id: String, link: String },

    // Session errors
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Login failed: {0}")]
    Authentication(String),

    #[error("Invalid cookie store: {0}")]
    CookieStore(String),

    // Download errors
    #[error("Download failed: {0}")]
    Download(String),

    #[error("Timed out after {0} seconds")]
    Timeout(u64),

    // External tool errors
    #[error("yt-dlp error: {0}")]
    YtDlp(String),

    #[error("yt-dlp not found. Please install yt-dlp and ensure it's in your PATH.")]
    YtDlpNotFound,

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // CDP errors (boxed to reduce enum size)
    #[error("DevTools protocol error: {0}")]
    Cdp(Box<chromiumoxide::error::CdpError>),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Error::Cdp(Box::new(err))
    }
}

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const SESSION_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const DOWNLOAD_ERROR: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
}
