use clap::Parser;
use logreport_core::conf::load_config;
use logreport_core::logging::init_logging;
use logreport_core::report::run_report;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(
    name = "logreport",
    version,
    about = "Nginx access-log analyzer: per-endpoint time report"
)]
struct Cli {
    /// Path to the JSON config file
    #[arg(long, default_value = "./config.json")]
    config: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    // Failures before the subscriber is up go straight to stderr.
    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("logreport: {e}");
            process::exit(1);
        }
    };

    let _guard = match init_logging(config.logging.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("logreport: cannot open log destination: {e}");
            process::exit(1);
        }
    };

    tracing::info!(?config, "logreport started");

    if let Err(e) = run_report(&config) {
        tracing::error!("{e}");
        process::exit(1);
    }
}
