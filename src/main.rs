use clap::Parser;
use luma::core::config::{self, CliOverrides, LumaConfig};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "luma", about = "Luminous AI Search: web results plus multi-model analysis")]
struct Args {
    /// Search API base URL (e.g. http://localhost:8000/api)
    #[arg(long)]
    base_url: Option<String>,

    /// Number of web results to request
    #[arg(short = 'n', long)]
    num_results: Option<u32>,

    /// Typewriter speed in milliseconds per character
    #[arg(long = "speed", value_name = "MS")]
    speed_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to luma.log in current directory.
    // Starts fully open so config loading is logged; narrowed once resolved.
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("luma.log") {
        let _ = WriteLogger::init(LevelFilter::Trace, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Config error, using defaults: {}", e);
        LumaConfig::default()
    });
    let cli = CliOverrides {
        base_url: args.base_url,
        num_results: args.num_results,
        speed_ms: args.speed_ms,
    };
    let resolved = config::resolve(&file_config, &cli);
    log::set_max_level(resolved.log_level);

    log::info!(
        "Luma starting up: base_url={}, num_results={}, speed={:?}",
        resolved.base_url,
        resolved.num_results,
        resolved.typing_speed
    );

    luma::tui::run(resolved)
}
