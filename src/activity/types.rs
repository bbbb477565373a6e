//! Data export type definitions.

use serde::Deserialize;

/// Top level of the user data export.
#[derive(Debug, Deserialize)]
pub struct UserData {
    #[serde(rename = "Activity")]
    pub activity: Activity,
}

/// The `Activity` section of the export.
#[derive(Debug, Default, Deserialize)]
pub struct Activity {
    #[serde(rename = "Like List", default)]
    pub like_list: Option<LikeList>,

    #[serde(rename = "Favorite Videos", default)]
    pub favorite_videos: Option<FavoriteVideos>,
}

/// Liked posts.
#[derive(Debug, Default, Deserialize)]
pub struct LikeList {
    #[serde(rename = "ItemFavoriteList", default)]
    pub items: Option<Vec<LinkEntry>>,
}

/// Bookmarked (favorited) posts.
#[derive(Debug, Default, Deserialize)]
pub struct FavoriteVideos {
    #[serde(rename = "FavoriteVideoList", default)]
    pub items: Option<Vec<LinkEntry>>,
}

/// A single post reference.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkEntry {
    #[serde(rename = "Link", alias = "link")]
    pub link: String,

    #[serde(rename = "Date", alias = "date", default)]
    pub date: Option<String>,
}
