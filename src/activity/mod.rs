//! User activity export.
//!
//! Reads the JSON data export and yields the liked and bookmarked post links.

pub mod types;

use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};

pub use types::{Activity, LinkEntry, UserData};

/// Which activity list a link came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Liked,
    Bookmarked,
}

impl Category {
    /// All categories, in processing order.
    pub const ALL: [Category; 2] = [Category::Liked, Category::Bookmarked];

    /// Get the output folder name for this category.
    pub fn folder_name(&self) -> &'static str {
        match self {
            Category::Liked => "Liked",
            Category::Bookmarked => "Bookmarked",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Liked => write!(f, "liked"),
            Category::Bookmarked => write!(f, "bookmarked"),
        }
    }
}

/// Parsed activity export.
#[derive(Debug)]
pub struct ActivityExport {
    liked: Vec<LinkEntry>,
    bookmarked: Vec<LinkEntry>,
}

impl ActivityExport {
    /// Load the export from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::ActivityExport(format!("File not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        Self::from_json(&content)
    }

    /// Parse the export from a JSON string.
    pub fn from_json(content: &str) -> Result<Self> {
        let data: UserData = serde_json::from_str(content)
            .map_err(|e| Error::ActivityExport(format!("Failed to parse export: {}", e)))?;

        let Activity {
            like_list,
            favorite_videos,
        } = data.activity;

        Ok(Self {
            liked: like_list.and_then(|l| l.items).unwrap_or_default(),
            bookmarked: favorite_videos.and_then(|f| f.items).unwrap_or_default(),
        })
    }

    /// Get the entries of a category.
    pub fn entries(&self, category: Category) -> &[LinkEntry] {
        match category {
            Category::Liked => &self.liked,
            Category::Bookmarked => &self.bookmarked,
        }
    }

    /// Total number of links across all categories.
    pub fn total_links(&self) -> usize {
        self.liked.len() + self.bookmarked.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = r#"{
        "Activity": {
            "Like List": {
                "ItemFavoriteList": [
                    {"Date": "2024-01-02 10:00:00", "Link": "https://www.tiktokv.com/share/video/111/"},
                    {"Date": "2024-01-01 09:00:00", "Link": "https://www.tiktokv.com/share/video/222/"}
                ]
            },
            "Favorite Videos": {
                "FavoriteVideoList": [
                    {"Date": "2024-01-03 08:00:00", "Link": "https://www.tiktokv.com/share/video/333/"}
                ]
            },
            "Search History": {"SearchList": []}
        },
        "Profile": {}
    }"#;

    #[test]
    fn test_parse_both_lists() {
        let export = ActivityExport::from_json(EXPORT).unwrap();

        let liked: Vec<&str> = export
            .entries(Category::Liked)
            .iter()
            .map(|e| e.link.as_str())
            .collect();
        assert_eq!(
            liked,
            vec![
                "https://www.tiktokv.com/share/video/111/",
                "https://www.tiktokv.com/share/video/222/"
            ]
        );

        let bookmarked = export.entries(Category::Bookmarked);
        assert_eq!(bookmarked.len(), 1);
        assert_eq!(bookmarked[0].date.as_deref(), Some("2024-01-03 08:00:00"));
        assert_eq!(export.total_links(), 3);
    }

    #[test]
    fn test_missing_and_null_lists() {
        let export = ActivityExport::from_json(
            r#"{"Activity": {"Like List": {"ItemFavoriteList": null}}}"#,
        )
        .unwrap();

        assert!(export.entries(Category::Liked).is_empty());
        assert!(export.entries(Category::Bookmarked).is_empty());
    }

    #[test]
    fn test_lowercase_link_key() {
        let export = ActivityExport::from_json(
            r#"{"Activity": {"Favorite Videos": {"FavoriteVideoList": [{"date": "x", "link": "https://t/9"}]}}}"#,
        )
        .unwrap();

        assert_eq!(export.entries(Category::Bookmarked)[0].link, "https://t/9");
    }

    #[test]
    fn test_missing_activity_is_error() {
        let err = ActivityExport::from_json(r#"{"Profile": {}}"#).unwrap_err();
        assert!(matches!(err, Error::ActivityExport(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ActivityExport::load(&dir.path().join("user_data.json")).unwrap_err();
        assert!(matches!(err, Error::ActivityExport(_)));
    }

    #[test]
    fn test_category_folders() {
        assert_eq!(Category::Liked.folder_name(), "Liked");
        assert_eq!(Category::Bookmarked.folder_name(), "Bookmarked");
        assert_eq!(Category::ALL, [Category::Liked, Category::Bookmarked]);
    }
}
