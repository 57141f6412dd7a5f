use anyhow::Context;
use clap::Parser;
use order_export::utils::{logger, validation::Validate};
use order_export::{CliConfig, ExportEngine, LocalStorage, OrderPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose, None);
    }

    tracing::info!("Starting order-export");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("error: {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let print_csv = config.stdout;
    let pipeline = OrderPipeline::new(LocalStorage::default(), config);
    let engine = ExportEngine::new(pipeline);

    match engine.run().await {
        Ok(csv_path) => {
            if print_csv {
                let csv = std::fs::read_to_string(&csv_path)
                    .with_context(|| format!("reading back {}", csv_path))?;
                println!("{}", csv);
            } else {
                println!("Orders exported to: {}", csv_path);
            }
        }
        Err(e) => {
            tracing::error!(
                "Export failed: {} (category: {:?}, severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("error: {}", e.user_friendly_message());
            eprintln!("hint: {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
