//! Configuration validation logic.

use crate::config::loader::Config;
use crate::error::{Error, Result};
use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

static IMAGE_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{1,8}$").expect("valid extension pattern"));

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_timeout("browser.page_timeout_secs", config.browser.page_timeout_secs)?;
    validate_timeout("browser.login_timeout_secs", config.browser.login_timeout_secs)?;
    validate_timeout(
        "browser.session_check_timeout_secs",
        config.browser.session_check_timeout_secs,
    )?;
    validate_timeout(
        "download.transfer_timeout_secs",
        config.download.transfer_timeout_secs,
    )?;

    validate_home_url(&config.browser.home_url)?;

    // Page marker selectors are checked when `PageMarkers` compiles them.
    validate_selector("selectors.logged_in", &config.selectors.logged_in)?;

    validate_image_extension(&config.download.image_extension)?;

    if config.download.yt_dlp_path.as_os_str().is_empty() {
        return Err(Error::ConfigValidation {
            field: "download.yt_dlp_path".to_string(),
            message: "Path to yt-dlp cannot be empty".to_string(),
        });
    }

    Ok(())
}

/// Validate that a timeout is non-zero.
pub fn validate_timeout(field: &str, seconds: u64) -> Result<()> {
    if seconds == 0 {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: "Timeout must be at least 1 second".to_string(),
        });
    }

    Ok(())
}

/// Validate the browser home URL.
pub fn validate_home_url(home_url: &str) -> Result<()> {
    let url = url::Url::parse(home_url)?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::ConfigValidation {
            field: "browser.home_url".to_string(),
            message: format!("Unsupported URL scheme '{}'", url.scheme()),
        });
    }

    Ok(())
}

/// Validate that a CSS selector parses.
pub fn validate_selector(field: &str, selector: &str) -> Result<()> {
    Selector::parse(selector).map_err(|e| Error::ConfigValidation {
        field: field.to_string(),
        message: format!("Invalid CSS selector '{}': {}", selector, e),
    })?;

    Ok(())
}

/// Validate the image file extension.
pub fn validate_image_extension(extension: &str) -> Result<()> {
    if !IMAGE_EXTENSION.is_match(extension) {
        return Err(Error::ConfigValidation {
            field: "download.image_extension".to_string(),
            message: format!(
                "Extension '{}' must be 1-8 alphanumeric characters without a dot",
                extension
            ),
        });
    }

    Ok(())
}

/// Extract the numeric post ID from a post link.
///
/// The ID is the last non-empty path segment, e.g.
/// `https://www.tiktokv.com/share/video/7234567890123456789/` gives
/// `7234567890123456789`.
pub fn parse_post_id(link: &str) -> Result<String> {
    let id = link
        .split('/')
        .filter(|segment| !segment.trim().is_empty())
        .last()
        .unwrap_or("");

    if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidPostId {
            id: id.to_string(),
            link: link.to_string(),
        });
    }

    Ok(id.to_string())
}
