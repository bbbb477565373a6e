//! Deduplication against files already on disk.

use std::path::Path;

use crate::error::Result;

/// Check whether a post has already been downloaded into `dir`.
///
/// A post counts as downloaded when any entry of `dir` (a video file or a
/// slideshow folder) has a name starting with the post ID.
pub fn is_post_downloaded(dir: &Path, post_id: &str) -> Result<bool> {
    if !dir.exists() {
        return Ok(false);
    }

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with(post_id) {
            return Ok(true);
        }
    }

    Ok(false)
}
