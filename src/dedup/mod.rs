//! Deduplication module.
//!
//! The output folders are the only record of what has been downloaded: a
//! post is skipped when a file or folder named after its ID already exists.

pub mod tracker;

pub use tracker::is_post_downloaded;
