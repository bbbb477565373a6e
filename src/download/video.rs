//! Video downloading through yt-dlp.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::{parse_post_id, Config};
use crate::download::VideoDownloader;
use crate::error::{Error, Result};
use crate::fs::video_output_template;
use crate::session::CookieJar;

/// Runs the `yt-dlp` executable for video posts.
#[derive(Debug, Clone)]
pub struct YtDlpDownloader {
    binary: PathBuf,
    format: String,
    cookie_file: PathBuf,
    timeout: Duration,
}

impl YtDlpDownloader {
    pub fn new(config: &Config) -> Self {
        Self {
            binary: config.download.yt_dlp_path.clone(),
            format: config.download.video_format.clone(),
            cookie_file: config.netscape_cookie_file(),
            timeout: config.transfer_timeout(),
        }
    }

    /// Command-line arguments for downloading `url` into `dest_dir`.
    pub fn build_args(&self, url: &str, dest_dir: &Path) -> Vec<String> {
        vec![
            "--output".to_string(),
            video_output_template(dest_dir),
            "--format".to_string(),
            self.format.clone(),
            "--no-playlist".to_string(),
            "--cookies".to_string(),
            self.cookie_file.to_string_lossy().into_owned(),
            url.to_string(),
        ]
    }

    async fn run(&self, url: &str, dest_dir: &Path) -> Result<()> {
        let run = Command::new(&self.binary)
            .args(self.build_args(url, dest_dir))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        // Dropping the timed-out future kills the child.
        let output = tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| Error::Timeout(self.timeout.as_secs()))?
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::YtDlpNotFound
                } else {
                    Error::YtDlp(format!("Failed to run yt-dlp: {}", e))
                }
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
            tracing::debug!("yt-dlp: {}", line);
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr
                .lines()
                .rev()
                .find(|l| !l.trim().is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("exited with status: {}", output.status));
            return Err(Error::YtDlp(message));
        }

        Ok(())
    }
}

#[async_trait]
impl VideoDownloader for YtDlpDownloader {
    async fn download_video(&self, url: &str, cookies: &CookieJar, dest_dir: &Path) -> Result<()> {
        if cookies.is_empty() {
            tracing::warn!("No session cookies for yt-dlp, private posts will fail");
        }
        cookies.write_netscape_file(&self.cookie_file).await?;

        let result = self.run(url, dest_dir).await;

        // Leftovers would match the post ID and skip the post on later runs.
        if result.is_err() {
            if let Ok(id) = parse_post_id(url) {
                remove_partial_files(dest_dir, &id).await;
            }
        }

        result
    }
}

/// Whether `name` is an unfinished yt-dlp download of post `id`.
fn is_partial_file(name: &str, id: &str) -> bool {
    name.starts_with(id)
        && (name.ends_with(".part") || name.ends_with(".ytdl") || name.contains(".part-Frag"))
}

async fn remove_partial_files(dest_dir: &Path, id: &str) {
    let mut entries = match tokio::fs::read_dir(dest_dir).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Cannot list {}: {}", dest_dir.display(), e);
            return;
        }
    };

    while let Ok(Some(entry)) = entries.next_entry().await {
        let name = entry.file_name().to_string_lossy().into_owned();
        if !is_partial_file(&name, id) {
            continue;
        }

        match tokio::fs::remove_file(entry.path()).await {
            Ok(()) => tracing::debug!("Removed partial download {}", name),
            Err(e) => tracing::warn!("Failed to remove partial download {}: {}", name, e),
        }
    }
}
