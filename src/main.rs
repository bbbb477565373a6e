//! TikTok Downloader - CLI entry point.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tiktok_downloader::{
    activity::ActivityExport,
    cli::Args,
    config::{validate_config, Config},
    download::{download_activity, HttpImageDownloader, Pipeline, YtDlpDownloader},
    error::{exit_codes, Error, Result},
    fs::{ensure_dir, log_folder_name, LOG_FILE_NAME},
    media::PageMarkers,
    output::{
        print_banner, print_config_summary, print_error, print_global_stats, print_info,
        print_warning,
    },
    session::{ChromiumSessionProvider, SessionProvider},
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            tracing::error!("{}", e);
            print_error(&format!("{}", e));
            match e {
                Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::ActivityExport(_)
                | Error::InvalidPostId { .. }
                | Error::TomlParse(_)
                | Error::UrlParse(_) => ExitCode::from(exit_codes::CONFIG_ERROR as u8),
                Error::Browser(_)
                | Error::Authentication(_)
                | Error::CookieStore(_)
                | Error::Cdp(_) => ExitCode::from(exit_codes::SESSION_ERROR as u8),
                Error::Download(_) | Error::YtDlp(_) | Error::YtDlpNotFound => {
                    ExitCode::from(exit_codes::DOWNLOAD_ERROR as u8)
                }
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

/// Create `<logs>/<timestamp>/main.log` and install the console and file
/// subscribers.
fn init_logging(logs_dir: &Path, debug: bool) -> Result<PathBuf> {
    let run_dir = logs_dir.join(log_folder_name(&chrono::Local::now()));
    ensure_dir(&run_dir)?;

    let log_path = run_dir.join(LOG_FILE_NAME);
    let log_file = File::create(&log_path)?;

    let log_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();

    Ok(log_path)
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_path = init_logging(&args.logs, args.debug)?;

    // Print banner
    print_banner();

    // Load configuration
    let mut config = match args.config_path() {
        Some(path) => {
            print_info(&format!("Using configuration file {}", path.display()));
            Config::load(&path)?
        }
        None => Config::default(),
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    // Validate configuration
    validate_config(&config)?;

    print_config_summary(&args.output, &args.user_json, &args.cookies, &log_path);

    let export = ActivityExport::load(&args.user_json)?;
    print_info(&format!("Found {} links in the export", export.total_links()));
    if export.total_links() == 0 {
        print_warning("The export has no liked or bookmarked posts");
    }

    ensure_dir(&args.output)?;

    let markers = PageMarkers::from_config(&config.selectors)?;
    let videos = YtDlpDownloader::new(&config);
    let images = HttpImageDownloader::new(&config.download)?;

    // Start the browser session
    print_info("Starting browser session...");
    let provider = ChromiumSessionProvider::new(&config, markers.clone());
    let (session, cookies) = provider.obtain(&args.cookies).await?;

    let pipeline = Pipeline {
        fetcher: &session,
        markers: &markers,
        videos: &videos,
        images: &images,
        cookies: &cookies,
        options: &config.options,
    };
    let result = download_activity(&pipeline, &export, &args.output).await;

    session.shutdown().await;

    let global_state = result?;

    // Print global statistics
    print_global_stats(&global_state);

    tracing::info!("Done");

    Ok(())
}
