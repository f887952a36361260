use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use tale::core::config;

#[derive(Parser)]
#[command(name = "tale", about = "Interactive AI adventure stories in your terminal")]
struct Args {
    /// Story backend base URL (overrides TALE_API_URL and the config file)
    #[arg(long)]
    api_url: Option<String>,

    /// Where to write the log file
    #[arg(long, default_value = "tale.log")]
    log_file: PathBuf,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The terminal belongs to the TUI, so logs go to a file
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: {e}. Using defaults.");
            log::warn!("Config load failed: {}", e);
            config::TaleConfig::default()
        }
    };
    let resolved = config::resolve(&file_config, args.api_url.as_deref());

    log::info!("Adventure Tale starting up against {}", resolved.base_url);

    tale::tui::run(resolved)
}
