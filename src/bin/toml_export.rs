use clap::Parser;
use order_export::core::ConfigProvider;
use order_export::utils::{logger, validation::Validate};
use order_export::{ExportEngine, LocalStorage, OrderPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-export")]
#[command(about = "Order export driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "order-export.toml")]
    config: String,

    /// Override `source.input` from the config
    #[arg(short, long)]
    input: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Validate the configuration and print a summary without exporting
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: failed to load config file '{}': {}", args.config, e);
            eprintln!("hint: make sure the file exists and is valid TOML");
            std::process::exit(1);
        }
    };

    if config.json_logging() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose, config.log_level());
    }
    tracing::info!("Loaded configuration from: {}", args.config);

    if let Some(input) = args.input {
        tracing::info!("Input overridden to: {}", input);
        config.source.input = Some(input);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("error: {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("Dry run, nothing exported");
        return Ok(());
    }

    let pipeline = OrderPipeline::new(LocalStorage::default(), config);
    let engine = ExportEngine::new(pipeline);

    match engine.run().await {
        Ok(csv_path) => {
            println!("Orders exported to: {}", csv_path);
        }
        Err(e) => {
            tracing::error!(
                "Export failed: {} (category: {:?}, severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("error: {}", e.user_friendly_message());
            eprintln!("hint: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    let options = config.extractor_options();
    println!("Configuration summary:");
    println!("  Input:       {}", config.input_path());
    println!("  Output:      {}/{}.*", config.output_path(), config.basename());
    println!("  Formats:     {}", config.output_formats().join(", "));
    println!("  Annotate:    {}", config.annotate_page());
    println!("  Dates:       {:?}", options.date_policy);
    println!("  Order nodes: {}", options.selectors.order_node);
    println!("  Item titles: {}", options.selectors.item_title);
    println!();
}
