//! Configuration module for the tiktok-downloader.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Configuration validation
//! - Post ID extraction from links

pub mod loader;
pub mod validation;

pub use loader::{BrowserConfig, Config, DownloadConfig, OptionsConfig, SelectorConfig};
pub use validation::{parse_post_id, validate_config};
