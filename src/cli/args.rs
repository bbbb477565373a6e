//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// TikTok liked and bookmarked post downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "tiktok-downloader",
    version,
    about = "Download your liked and bookmarked TikTok posts",
    long_about = "Reads the liked and bookmarked post links from a TikTok data export and \
                  downloads every post.\n\n\
                  Videos are saved as <output>/<Liked|Bookmarked>/<id>.<ext>, photo slideshows \
                  as <output>/<Liked|Bookmarked>/<id>/01.jpg, 02.jpg, ..."
)]
pub struct Args {
    /// Directory the Liked and Bookmarked folders are created in.
    #[arg(long)]
    pub output: PathBuf,

    /// User data export (user_data.json).
    #[arg(long = "userjson")]
    pub user_json: PathBuf,

    /// Cookie store. Created after an interactive login when missing.
    #[arg(long)]
    pub cookies: PathBuf,

    /// Directory for per-run log folders.
    #[arg(long)]
    pub logs: PathBuf,

    /// Path to configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show the browser window while downloading.
    #[arg(long)]
    pub show_browser: bool,

    /// Chrome/Chromium executable.
    #[arg(long = "chrome")]
    pub chrome_executable: Option<PathBuf>,

    /// yt-dlp executable.
    #[arg(long = "yt-dlp")]
    pub yt_dlp: Option<PathBuf>,

    /// Stop the run at the first link without a post ID.
    #[arg(long)]
    pub strict_links: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(ref chrome) = self.chrome_executable {
            config.browser.chrome_executable = Some(chrome.clone());
        }

        if let Some(ref yt_dlp) = self.yt_dlp {
            config.download.yt_dlp_path = yt_dlp.clone();
        }

        // Boolean flags (only override if set to non-default)
        if self.show_browser {
            config.browser.headless = false;
        }

        if self.strict_links {
            config.options.stop_on_invalid_link = true;
        }
    }

    /// Config file to load: the explicit `--config`, else the platform
    /// default when it exists.
    pub fn config_path(&self) -> Option<PathBuf> {
        match self.config {
            Some(ref path) => Some(path.clone()),
            None => Config::default_path().filter(|path| path.exists()),
        }
    }
}
