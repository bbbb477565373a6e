//! Filename generation.

use std::path::Path;

use chrono::{DateTime, TimeZone};

/// Name of the log file inside a run's log folder.
pub const LOG_FILE_NAME: &str = "main.log";

/// File name of the `index`-th slideshow image (1-based), e.g. `01.jpg`.
pub fn image_filename(index: usize, extension: &str) -> String {
    format!("{:02}.{}", index, extension)
}

/// yt-dlp output template writing `<post id>.<ext>` into `dir`.
pub fn video_output_template(dir: &Path) -> String {
    dir.join("%(id)s.%(ext)s").to_string_lossy().into_owned()
}

/// Folder name for a run's logs, from its start time.
pub fn log_folder_name<Tz: TimeZone>(started_at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    started_at.format("%Y-%m-%d_%H-%M-%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_image_filename() {
        assert_eq!(image_filename(1, "jpg"), "01.jpg");
        assert_eq!(image_filename(9, "jpg"), "09.jpg");
        assert_eq!(image_filename(10, "webp"), "10.webp");
        assert_eq!(image_filename(123, "jpg"), "123.jpg");
    }

    #[test]
    fn test_video_output_template() {
        let template = video_output_template(Path::new("/out/Liked"));
        assert_eq!(template, "/out/Liked/%(id)s.%(ext)s");
    }

    #[test]
    fn test_log_folder_name() {
        let started = Utc.with_ymd_and_hms(2024, 3, 7, 14, 5, 9).unwrap();
        assert_eq!(log_folder_name(&started), "2024-03-07_14-05-09");
    }
}
