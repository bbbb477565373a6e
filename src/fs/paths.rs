//! Path and directory management.

use std::path::{Path, PathBuf};

use crate::activity::Category;
use crate::error::Result;

/// Get the output folder of a category.
pub fn category_folder(output_dir: &Path, category: Category) -> PathBuf {
    output_dir.join(category.folder_name())
}

/// Get the folder that holds the images of a slideshow post.
pub fn slideshow_folder(category_dir: &Path, post_id: &str) -> PathBuf {
    category_dir.join(post_id)
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_folder() {
        let output = PathBuf::from("/downloads");
        assert_eq!(
            category_folder(&output, Category::Liked),
            PathBuf::from("/downloads/Liked")
        );
        assert_eq!(
            category_folder(&output, Category::Bookmarked),
            PathBuf::from("/downloads/Bookmarked")
        );
    }

    #[test]
    fn test_slideshow_folder() {
        assert_eq!(
            slideshow_folder(Path::new("/downloads/Liked"), "7234"),
            PathBuf::from("/downloads/Liked/7234")
        );
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        ensure_dir(&nested).unwrap();
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
