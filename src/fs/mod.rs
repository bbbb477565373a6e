//! Filesystem module.
//!
//! Provides:
//! - Output folder layout
//! - Image, video and log file naming

pub mod naming;
pub mod paths;

pub use naming::{image_filename, log_folder_name, video_output_template, LOG_FILE_NAME};
pub use paths::{category_folder, ensure_dir, slideshow_folder};
