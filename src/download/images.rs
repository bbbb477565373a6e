//! Slideshow image downloading.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, Response};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::config::DownloadConfig;
use crate::download::ImageDownloader;
use crate::error::{Error, Result};
use crate::fs::image_filename;
use crate::output::create_download_bar;

/// Minimum file size to show progress bar (5 MB).
const PROGRESS_THRESHOLD: u64 = 5 * 1024 * 1024;

/// Streams slideshow images over HTTP.
pub struct HttpImageDownloader {
    client: Client,
    extension: String,
}

impl HttpImageDownloader {
    pub fn new(config: &DownloadConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.transfer_timeout_secs))
            .build()
            .map_err(|e| Error::Download(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            extension: config.image_extension.clone(),
        })
    }

    async fn fetch(&self, url: &str) -> Result<Response> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(Error::Download(format!(
                "Failed to download file: HTTP {}",
                response.status()
            )));
        }

        Ok(response)
    }

    /// Download one image, removing the partial file on failure.
    async fn download_one(&self, url: &str, output_path: &Path) -> Result<u64> {
        let response = self.fetch(url).await?;

        let result = self.stream_to_file(response, output_path).await;
        if result.is_err() {
            let _ = tokio::fs::remove_file(output_path).await;
        }

        result
    }

    async fn stream_to_file(&self, response: Response, output_path: &Path) -> Result<u64> {
        let progress = match response.content_length() {
            Some(len) if len > PROGRESS_THRESHOLD => {
                Some(create_download_bar(len))
            }
            _ => None,
        };

        let mut file = File::create(output_path).await?;
        let mut stream = response.bytes_stream();
        let mut downloaded: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;

            if let Some(ref pb) = progress {
                pb.set_position(downloaded);
            }
        }

        file.flush().await?;

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        Ok(downloaded)
    }
}

#[async_trait]
impl ImageDownloader for HttpImageDownloader {
    async fn download_images(&self, links: &[String], dest_dir: &Path) -> Result<usize> {
        tokio::fs::create_dir(dest_dir).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                Error::Download(format!("Folder already exists: {}", dest_dir.display()))
            } else {
                Error::Io(e)
            }
        })?;

        let mut written = 0;

        for (i, link) in links.iter().enumerate() {
            let output_path = dest_dir.join(image_filename(i + 1, &self.extension));

            match self.download_one(link, &output_path).await {
                Ok(bytes) => {
                    written += 1;
                    tracing::info!(
                        "Downloaded image: {} ({} bytes)",
                        remote_file_name(link),
                        bytes
                    );
                }
                Err(e) => {
                    tracing::error!("Failed to download {}: {}", link, e);
                }
            }
        }

        Ok(written)
    }
}

/// Last path segment of a URL without its query, for log lines.
fn remote_file_name(link: &str) -> String {
    url::Url::parse(link)
        .ok()
        .and_then(|url| {
            url.path_segments()
                .and_then(|segments| segments.last().map(str::to_string))
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| link.to_string())
}
