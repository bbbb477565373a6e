//! Batch download over an activity export.

use std::path::Path;

use crate::activity::{ActivityExport, Category};
use crate::download::post::{download_post, Pipeline};
use crate::download::state::{DownloadState, GlobalState};
use crate::error::{Error, Result};
use crate::fs::{category_folder, ensure_dir};

/// Download every post of one category into `<output_dir>/<Category>/`.
///
/// Links are processed sequentially in export order. A link without a valid
/// post ID is counted and skipped unless `stop_on_invalid_link` is set, in
/// which case the error ends the run.
pub async fn download_category(
    pipeline: &Pipeline<'_>,
    export: &ActivityExport,
    category: Category,
    output_dir: &Path,
) -> Result<DownloadState> {
    let outfolder = category_folder(output_dir, category);
    ensure_dir(&outfolder)?;

    let entries = export.entries(category);
    let mut state = DownloadState::new(category);

    tracing::info!("Downloading {} {} posts...", entries.len(), category);

    for (i, entry) in entries.iter().enumerate() {
        tracing::debug!(
            "[{}/{}] {} ({})",
            i + 1,
            entries.len(),
            entry.link,
            entry.date.as_deref().unwrap_or("no date")
        );

        match download_post(pipeline, &entry.link, &outfolder).await {
            Ok(outcome) => {
                tracing::debug!("{}: {} ({:?})", entry.link, outcome, outcome.state());
                state.record(&outcome);
            }
            Err(e @ Error::InvalidPostId { .. }) => {
                if pipeline.options.stop_on_invalid_link {
                    return Err(e);
                }
                tracing::error!("{}", e);
                state.record_invalid_link();
            }
            Err(e) => {
                tracing::error!("Failed to download {}: {}", entry.link, e);
                state.record_error();
            }
        }
    }

    tracing::info!(
        "Finished {} posts: {} downloaded, {} skipped",
        category,
        state.total_downloaded(),
        state.skipped_count
    );

    Ok(state)
}

/// Download the liked posts, then the bookmarked posts.
pub async fn download_activity(
    pipeline: &Pipeline<'_>,
    export: &ActivityExport,
    output_dir: &Path,
) -> Result<GlobalState> {
    let mut global = GlobalState::default();

    for category in Category::ALL {
        let state = download_category(pipeline, export, category, output_dir).await?;
        crate::output::print_category_stats(&state);
        global.add_category_stats(&state);
    }

    Ok(global)
}
