use anyhow::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use metacheck_core::reference::MediaType;
use tracing::info;

mod app;

#[derive(Parser, Debug)]
#[command(author, version, about = "metacheck - validate extracted media metadata against reference tables", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Reference file, overriding the configured one
    #[arg(short, long)]
    reference: Option<Utf8PathBuf>,

    /// Reference table to run (mp3, wma, wmv)
    #[arg(short, long, default_value = "mp3")]
    table: MediaType,

    /// Run a single sample, e.g. ID3V1V2
    #[arg(short, long)]
    sample: Option<String>,

    /// Treat WMA support as available
    #[arg(long)]
    enable_wma: bool,

    /// Treat WMV support as available
    #[arg(long)]
    enable_wmv: bool,

    /// Stop checking a file at its first mismatching field
    #[arg(long)]
    fail_fast: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = if let Some(config_path) = args.config {
        metacheck_core::config::Config::load_from_path(config_path)?
    } else {
        metacheck_core::config::Config::load_or_default()
    };

    // Initialize logging
    let log_level = if args.verbose {
        "debug".to_owned()
    } else {
        config.general.log_level.clone()
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    info!("Starting metacheck v{}", env!("CARGO_PKG_VERSION"));

    // Override with CLI arguments
    if let Some(reference) = args.reference {
        config.general.reference_file = reference;
    }
    config.capabilities.wma_enabled |= args.enable_wma;
    config.capabilities.wmv_enabled |= args.enable_wmv;
    config.validation.fail_fast |= args.fail_fast;

    info!("Reference file: {}", config.general.reference_file);

    let summary = app::run(&config, args.table, args.sample.as_deref())?;
    print!("{}", app::render(&summary));

    if !summary.is_success() {
        anyhow::bail!("{} of {} cases failed", summary.failed(), summary.cases.len());
    }
    Ok(())
}
