//! Statistics reporting.

use console::style;

use crate::download::{DownloadState, GlobalState};

/// Print statistics for a single category.
pub fn print_category_stats(state: &DownloadState) {
    println!();
    println!(
        "{}",
        style(format!("Statistics for {} posts:", state.category)).bold()
    );
    println!("  Links:       {}", state.links_total);
    println!("  Videos:      {}", state.video_count);
    println!(
        "  Slideshows:  {} ({} images)",
        state.slideshow_count, state.image_count
    );
    println!("  Unavailable: {}", state.unavailable_count);
    println!("  Skipped:     {} (already downloaded)", state.skipped_count);
    if state.failed_count > 0 {
        println!("  Failed:      {}", style(state.failed_count).red());
    }
    if state.invalid_link_count > 0 {
        println!("  Invalid:     {}", style(state.invalid_link_count).red());
    }
}

/// Print global statistics across all categories.
pub fn print_global_stats(state: &GlobalState) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Global Statistics:").bold());
    println!("  Links processed: {}", state.links_total);
    println!("  Videos:      {}", state.video_count);
    println!(
        "  Slideshows:  {} ({} images)",
        state.slideshow_count, state.image_count
    );
    println!("  Unavailable: {}", state.unavailable_count);
    println!("  Skipped:     {} (already downloaded)", state.skipped_count);
    if state.failed_count > 0 {
        println!("  Failed:      {}", style(state.failed_count).red());
    }
    if state.invalid_link_count > 0 {
        println!("  Invalid:     {}", style(state.invalid_link_count).red());
    }
    println!(
        "  Total:       {} downloaded",
        style(state.total_downloaded()).green()
    );
    println!("{}", style("═".repeat(50)).dim());
}
