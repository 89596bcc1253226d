use burndown::utils::error::BurndownError;
use burndown::utils::{logger, validation::Validate};
use burndown::{BurndownRunner, CliConfig, LocalStorage, ReportPipeline};
use clap::Parser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose, config.log_json);

    tracing::info!("Starting burndown CLI");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    // paths resolve against the working directory
    let storage = LocalStorage::new(".".to_string());
    let pipeline = ReportPipeline::new(storage, config);
    let runner = BurndownRunner::new(pipeline);

    match runner.run() {
        Ok(outcome) => {
            tracing::info!("✅ Burndown computed for {} days", outcome.burndown.len());
            println!("✅ Burndown written to: {}", outcome.output_path);
        }
        Err(e) => exit_with(e),
    }

    Ok(())
}

fn exit_with(e: BurndownError) -> ! {
    tracing::error!(
        "❌ Burndown failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    // user-facing message
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // exit code follows severity
    std::process::exit(e.exit_code());
}
