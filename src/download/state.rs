//! Download state tracking.

use crate::activity::Category;
use crate::download::post::{DispatchState, PostOutcome};

/// Per-category download state.
#[derive(Debug)]
pub struct DownloadState {
    pub category: Category,

    // Statistics
    pub links_total: u64,
    pub skipped_count: u64,
    pub video_count: u64,
    pub slideshow_count: u64,
    pub image_count: u64,
    pub unavailable_count: u64,
    pub failed_count: u64,
    pub invalid_link_count: u64,
}

impl DownloadState {
    /// Create a new download state for a category.
    pub fn new(category: Category) -> Self {
        Self {
            category,
            links_total: 0,
            skipped_count: 0,
            video_count: 0,
            slideshow_count: 0,
            image_count: 0,
            unavailable_count: 0,
            failed_count: 0,
            invalid_link_count: 0,
        }
    }

    /// Record the outcome of one post.
    pub fn record(&mut self, outcome: &PostOutcome) {
        self.links_total += 1;

        match outcome.state() {
            DispatchState::Skipped => self.skipped_count += 1,
            DispatchState::Failed => self.failed_count += 1,
            DispatchState::Done => match *outcome {
                PostOutcome::Video { downloaded: true } => self.video_count += 1,
                // Done for the dispatcher, but nothing was saved.
                PostOutcome::Video { downloaded: false } => self.failed_count += 1,
                PostOutcome::Slideshow { downloaded, .. } => {
                    self.slideshow_count += 1;
                    self.image_count += downloaded as u64;
                }
                PostOutcome::Unavailable => self.unavailable_count += 1,
                _ => {}
            },
        }
    }

    /// Record a link without a valid post ID.
    pub fn record_invalid_link(&mut self) {
        self.links_total += 1;
        self.invalid_link_count += 1;
    }

    /// Record a post that failed with an unexpected error.
    pub fn record_error(&mut self) {
        self.links_total += 1;
        self.failed_count += 1;
    }

    /// Get the number of posts downloaded in this run.
    pub fn total_downloaded(&self) -> u64 {
        self.video_count + self.slideshow_count
    }
}

/// Global statistics across all categories.
#[derive(Debug, Default)]
pub struct GlobalState {
    pub links_total: u64,
    pub skipped_count: u64,
    pub video_count: u64,
    pub slideshow_count: u64,
    pub image_count: u64,
    pub unavailable_count: u64,
    pub failed_count: u64,
    pub invalid_link_count: u64,
    pub categories_processed: u64,
}

impl GlobalState {
    /// Add statistics from a category's download state.
    pub fn add_category_stats(&mut self, state: &DownloadState) {
        self.links_total += state.links_total;
        self.skipped_count += state.skipped_count;
        self.video_count += state.video_count;
        self.slideshow_count += state.slideshow_count;
        self.image_count += state.image_count;
        self.unavailable_count += state.unavailable_count;
        self.failed_count += state.failed_count;
        self.invalid_link_count += state.invalid_link_count;
        self.categories_processed += 1;
    }

    /// Get the number of posts downloaded in this run.
    pub fn total_downloaded(&self) -> u64 {
        self.video_count + self.slideshow_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_outcomes() {
        let mut state = DownloadState::new(Category::Liked);

        state.record(&PostOutcome::AlreadyDownloaded);
        state.record(&PostOutcome::Video { downloaded: true });
        state.record(&PostOutcome::Video { downloaded: false });
        state.record(&PostOutcome::Slideshow {
            found: 4,
            downloaded: 3,
        });
        state.record(&PostOutcome::Unavailable);
        state.record(&PostOutcome::UnknownPage);
        state.record(&PostOutcome::FetchFailed);
        state.record_invalid_link();

        assert_eq!(state.links_total, 8);
        assert_eq!(state.skipped_count, 1);
        assert_eq!(state.video_count, 1);
        assert_eq!(state.slideshow_count, 1);
        assert_eq!(state.image_count, 3);
        assert_eq!(state.unavailable_count, 1);
        assert_eq!(state.failed_count, 3);
        assert_eq!(state.invalid_link_count, 1);
        assert_eq!(state.total_downloaded(), 2);
    }

    #[test]
    fn test_global_totals() {
        let mut liked = DownloadState::new(Category::Liked);
        liked.record(&PostOutcome::Video { downloaded: true });
        let mut bookmarked = DownloadState::new(Category::Bookmarked);
        bookmarked.record(&PostOutcome::Slideshow {
            found: 2,
            downloaded: 2,
        });
        bookmarked.record_error();

        let mut global = GlobalState::default();
        global.add_category_stats(&liked);
        global.add_category_stats(&bookmarked);

        assert_eq!(global.categories_processed, 2);
        assert_eq!(global.links_total, 3);
        assert_eq!(global.total_downloaded(), 2);
        assert_eq!(global.image_count, 2);
        assert_eq!(global.failed_count, 1);
    }
}
