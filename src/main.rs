use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use reel::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "reel", about = "Browse, search and favorite movies from TMDB")]
struct Args {
    /// TMDB API key (overrides TMDB_API_KEY and the config file)
    #[arg(long)]
    api_key: Option<String>,

    /// TMDB API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Path of the favorites JSON file
    #[arg(long)]
    favorites: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to reel.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("reel.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    // A malformed config file is fatal
    let file_config = config::load_config().inspect_err(|e| log::error!("{e}"))?;
    let cli = CliOverrides {
        api_key: args.api_key,
        base_url: args.base_url,
        favorites_file: args.favorites,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "Reel starting up against {} (favorites at {})",
        resolved.base_url,
        resolved.favorites_file.display()
    );

    reel::tui::run(resolved)
}
