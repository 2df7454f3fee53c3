use clap::Parser;
use glucodash::ScreenArg;
use glucodash::core::config;
use glucodash::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "glucodash", about = "Terminal demo dashboard for a glucose-monitoring agent")]
struct Args {
    /// Screen to open on startup
    #[arg(short, long, value_enum)]
    screen: Option<ScreenArg>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to glucodash.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("glucodash.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Config unusable ({e}), falling back to defaults");
        Default::default()
    });
    let resolved = config::resolve(&file_config, args.screen.map(|s| s.route()));

    log::info!("glucodash starting on screen {:?}", resolved.start_screen);

    tui::run(resolved)
}
