//! Session cookie handling.
//!
//! Cookies are persisted as a JSON array in the browser-driver layout so a
//! store written after one interactive login can be reused by later runs,
//! and converted to the Netscape cookie-file format for yt-dlp.

use std::fmt::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single browser cookie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieRecord {
    pub domain: String,
    pub name: String,
    pub value: String,

    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default)]
    pub secure: bool,

    #[serde(default)]
    pub http_only: bool,

    /// Expiry as seconds since the epoch; absent for session cookies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_site: Option<String>,
}

fn default_path() -> String {
    "/".to_string()
}

/// Cookies captured from an authenticated session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CookieJar {
    cookies: Vec<CookieRecord>,
}

impl CookieJar {
    pub fn new(cookies: Vec<CookieRecord>) -> Self {
        Self { cookies }
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Render the jar in the Netscape cookie-file format.
    pub fn to_netscape(&self) -> String {
        let mut out = String::from(
            "# Netscape HTTP Cookie File\n# This file is generated by tiktok-downloader\n\n",
        );

        for cookie in &self.cookies {
            let include_subdomains = if cookie.domain.starts_with('.') {
                "TRUE"
            } else {
                "FALSE"
            };
            let secure = if cookie.secure { "TRUE" } else { "FALSE" };

            // Writing to a String cannot fail.
            let _ = writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                cookie.domain,
                include_subdomains,
                cookie.path,
                secure,
                cookie.expiry.unwrap_or(0),
                cookie.name,
                cookie.value
            );
        }

        out
    }

    /// Write the jar as a Netscape cookie file.
    pub async fn write_netscape_file(&self, path: &Path) -> Result<()> {
        tokio::fs::write(path, self.to_netscape()).await?;
        Ok(())
    }
}

/// Check whether a usable cookie store exists (present and non-empty).
pub fn cookie_store_exists(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.len() > 0)
        .unwrap_or(false)
}

/// Load a cookie store.
pub fn load_cookie_store(path: &Path) -> Result<Vec<CookieRecord>> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| {
        Error::CookieStore(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Save a cookie store.
pub fn save_cookie_store(path: &Path, cookies: &[CookieRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let content = serde_json::to_string(cookies)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookie(domain: &str, name: &str, secure: bool, expiry: Option<i64>) -> CookieRecord {
        CookieRecord {
            domain: domain.to_string(),
            name: name.to_string(),
            value: format!("{}-value", name),
            path: "/".to_string(),
            secure,
            http_only: false,
            expiry,
            same_site: None,
        }
    }

    #[test]
    fn test_netscape_format() {
        let jar = CookieJar::new(vec![
            cookie(".tiktok.com", "sessionid", true, Some(1767225600)),
            cookie("www.tiktok.com", "tt_csrf_token", false, None),
        ]);

        let text = jar.to_netscape();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "# Netscape HTTP Cookie File");
        assert!(lines[1].starts_with('#'));
        assert_eq!(lines[2], "");
        assert_eq!(
            lines[3],
            ".tiktok.com\tTRUE\t/\tTRUE\t1767225600\tsessionid\tsessionid-value"
        );
        assert_eq!(
            lines[4],
            "www.tiktok.com\tFALSE\t/\tFALSE\t0\ttt_csrf_token\ttt_csrf_token-value"
        );
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_parse_driver_cookie_layout() {
        let json = r#"[
            {"domain": ".tiktok.com", "expiry": 1767225600, "httpOnly": true,
             "name": "sessionid", "path": "/", "sameSite": "Lax", "secure": true,
             "value": "abc"},
            {"domain": "www.tiktok.com", "name": "msToken", "value": "xyz"}
        ]"#;

        let cookies: Vec<CookieRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(cookies.len(), 2);
        assert!(cookies[0].http_only);
        assert_eq!(cookies[0].same_site.as_deref(), Some("Lax"));
        assert_eq!(cookies[1].path, "/");
        assert!(!cookies[1].secure);
        assert_eq!(cookies[1].expiry, None);
    }

    #[test]
    fn test_cookie_store_exists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        assert!(!cookie_store_exists(&path));

        std::fs::write(&path, "").unwrap();
        assert!(!cookie_store_exists(&path));

        save_cookie_store(&path, &[cookie(".tiktok.com", "sid", true, None)]).unwrap();
        assert!(cookie_store_exists(&path));
        assert_eq!(load_cookie_store(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_load_invalid_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            load_cookie_store(&path),
            Err(Error::CookieStore(_))
        ));
    }

    #[tokio::test]
    async fn test_write_netscape_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies");
        let jar = CookieJar::new(vec![cookie(".tiktok.com", "sid", false, Some(5))]);

        jar.write_netscape_file(&path).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.ends_with(".tiktok.com\tTRUE\t/\tFALSE\t5\tsid\tsid-value\n"));
    }
}
