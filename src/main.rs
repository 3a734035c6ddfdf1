use clap::Parser;
use log::{debug, info};
use querykit::cli::{self, Args};
use querykit::config::QueryKitConfig;
use querykit::types::QueryError;

fn init_logger(filter: &str) {
    if let Err(e) = env_logger::Builder::new()
        .parse_filters(filter)
        .parse_default_env()
        .try_init()
    {
        eprintln!("⚠ logging disabled: {e}");
    }
}

fn start(args: Args) -> Result<String, QueryError> {
    let config = QueryKitConfig::load(args.config.as_deref())?;
    init_logger(&config.log_filter);

    match QueryKitConfig::locate(args.config.as_deref()) {
        Some(path) => info!("config loaded from {}", path.display()),
        None => debug!("no config file found, using defaults"),
    }

    cli::run(args, &config)
}

fn main() {
    let args = Args::parse();

    match start(args) {
        Ok(out) => print!("{out}"),
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    }
}
