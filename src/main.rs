//! Tally - frequency tables and summary statistics
//!
//! A CLI front end that reads text from a file or stdin, aggregates it, and
//! prints a Markdown or JSON report.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Error (bad arguments, unreadable input, empty numeric input, etc.)

use anyhow::{Context, Result};
use tally::cli::{Args, OutputFormat};
use tally::config::{Config, DEFAULT_CONFIG_FILE};
use std::path::PathBuf;
use tally::{input, report};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Config is read first so `[general] verbose` can raise the log level
    let (config, origin) = load_config(&args);
    init_logging(&args, &config);
    origin.log();

    debug!("tally v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = config.and_then(|config| run(args, config)) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .tally.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!("{} already exists. Remove it first or edit it manually.", DEFAULT_CONFIG_FILE);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("Created {} with default settings.", DEFAULT_CONFIG_FILE);
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// `RUST_LOG` is honored unless `--verbose` or `--quiet` is given. Logs go to
/// stderr so reports printed to stdout stay clean.
fn init_logging(args: &Args, config: &Result<Config>) {
    let config_verbose = config.as_ref().map_or(false, |c| c.general.verbose);
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directives = args.log_directives(config_verbose, rust_log.as_deref());

    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|e| {
        eprintln!("Ignoring invalid log filter '{}': {}", directives, e);
        EnvFilter::new(args.log_level(config_verbose).as_str().to_lowercase())
    });

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

fn run(args: Args, mut config: Config) -> Result<()> {
    config.merge_with_args(&args);

    let source = args
        .input
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdin".to_string());

    let text = input::read_source(args.input.as_deref())?;
    info!("Read {} bytes from {}", text.len(), source);

    let built = report::build_report(args.mode, &text, &source, &config)
        .with_context(|| format!("Failed to aggregate {}", source))?;

    if built.metadata.items_skipped > 0 {
        info!("Skipped {} items", built.metadata.items_skipped);
    }

    match args.output {
        Some(ref path) => {
            report::save_report(&built, args.format, config.report.precision, path)?;
            info!("Report saved to {}", path.display());
        }
        None => {
            let output = match args.format {
                OutputFormat::Json => report::generate_json_report(&built)?,
                OutputFormat::Markdown => {
                    report::generate_markdown_report(&built, config.report.precision)
                }
            };
            print!("{}", output);
        }
    }

    Ok(())
}

/// Where the configuration came from, logged once the subscriber is up.
enum ConfigOrigin {
    Explicit(PathBuf),
    DefaultFile,
    Builtin,
    Fallback(anyhow::Error),
}

impl ConfigOrigin {
    fn log(&self) {
        match self {
            ConfigOrigin::Explicit(path) => info!("Loading config from: {}", path.display()),
            ConfigOrigin::DefaultFile => info!("Loaded default config from {}", DEFAULT_CONFIG_FILE),
            ConfigOrigin::Builtin => debug!("No config file found, using defaults"),
            ConfigOrigin::Fallback(e) => warn!("Failed to load config: {:#}", e),
        }
    }
}

/// Load configuration from file or use defaults.
///
/// Only an explicit `--config` path that fails to load is an error.
fn load_config(args: &Args) -> (Result<Config>, ConfigOrigin) {
    if let Some(ref config_path) = args.config {
        return (
            Config::load(config_path),
            ConfigOrigin::Explicit(config_path.clone()),
        );
    }

    match Config::load_default() {
        Ok(Some(config)) => (Ok(config), ConfigOrigin::DefaultFile),
        Ok(None) => (Ok(Config::default()), ConfigOrigin::Builtin),
        Err(e) => (Ok(Config::default()), ConfigOrigin::Fallback(e)),
    }
}
