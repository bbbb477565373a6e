//! Console output utilities.

use std::path::Path;

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = format!(
        r#"
╔═══════════════════════════════════════════════════════╗
║     TikTok Downloader v{:<31}║
║     Liked and bookmarked posts from a data export     ║
╚═══════════════════════════════════════════════════════╝
"#,
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", style(banner).cyan());
}

/// Print the paths the run will use.
pub fn print_config_summary(output: &Path, user_json: &Path, cookies: &Path, log_file: &Path) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Output:   {}", output.display());
    println!("  Export:   {}", user_json.display());
    println!("  Cookies:  {}", cookies.display());
    println!("  Log file: {}", log_file.display());
    println!();
}
