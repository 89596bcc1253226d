use burndown::config::toml_config::TomlConfig;
use burndown::core::ConfigProvider;
use burndown::utils::{error::BurndownError, logger, validation::Validate};
use burndown::{BurndownRunner, LocalStorage, ReportPipeline};
use clap::Parser;

#[derive(Parser)]
#[command(name = "toml-burndown")]
#[command(about = "Burndown export driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "burndown.toml")]
    config: String,

    /// Enable verbose output (overrides [logging] level)
    #[arg(short, long)]
    verbose: bool,

    /// Override the output directory from the config
    #[arg(long)]
    output_path: Option<String>,

    /// Dry run - show what would be computed without writing anything
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // load the TOML config
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    let level = if args.verbose { "debug" } else { config.log_level() };
    logger::init_with_level(level, config.log_json());

    tracing::info!("🚀 Starting TOML-based burndown tool");
    tracing::info!("📁 Configuration loaded from: {}", args.config);

    // command-line overrides win
    if let Some(output_path) = args.output_path {
        tracing::info!("🔧 Output path overridden to: {}", output_path);
        config.load.output_path = output_path;
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    display_config_summary(&config, args.dry_run)?;

    let storage = LocalStorage::new(".".to_string());
    let runner = BurndownRunner::new(ReportPipeline::new(storage, config));

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        return match runner.compute() {
            Ok(burndown) => {
                println!("🔍 Dry Run Analysis:");
                println!("  Days: {}", burndown.len());
                println!("  Ideal:  {:?}", burndown.ideal);
                println!("  Actual: {:?}", burndown.actual);
                Ok(())
            }
            Err(e) => {
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(e.exit_code());
            }
        };
    }

    match runner.run() {
        Ok(outcome) => {
            tracing::info!("✅ Burndown computed for {} days", outcome.burndown.len());
            println!("✅ Burndown written to: {}", outcome.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Burndown failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, dry_run: bool) -> Result<(), BurndownError> {
    println!("📋 Configuration Summary:");
    println!("  Chart: {}", config.title());
    println!(
        "  Range: {} .. {}",
        display_or_missing(config.start_date()),
        display_or_missing(config.end_date())
    );
    println!("  Total: {}", config.total());
    println!("  Tick weekday: {}", config.tick_weekday()?);

    if let Some(kind) = config.sample()? {
        println!("  Sample data: {:?}", kind);
    } else {
        if let Some(path) = config.observations_file() {
            println!("  Observations file: {}", path);
        }
        println!("  Inline observations: {}", config.inline_observations().len());
    }

    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output_formats().join(", "));
    if let Some(zip) = config.zip_filename() {
        println!("  Compression: {} (ZIP)", zip);
    }

    if dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
    Ok(())
}

fn display_or_missing(value: &str) -> &str {
    if value.is_empty() {
        "(missing)"
    } else {
        value
    }
}
