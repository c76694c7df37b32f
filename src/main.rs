use anyhow::Context;
use clap::Parser;
use fulfillment_bridge::config::Command;
use fulfillment_bridge::core::request_builder::RequestBuilder;
use fulfillment_bridge::utils::error::ErrorSeverity;
use fulfillment_bridge::utils::{logger, validation::Validate};
use fulfillment_bridge::{
    CliConfig, FulfillmentConfig, FulfillmentError, FulfillmentSubmitter, HttpTransport,
    NormalizingService, Shipment, SubmitOutcome, TrackOutcome, TrackingResolver,
};
use std::path::Path;

const EXIT_ABORT: i32 = 4;
const EXIT_PENDING: i32 = 5;

fn load_shipment(path: &Path) -> anyhow::Result<Shipment> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read shipment file '{}'", path.display()))?;
    let shipment = serde_json::from_str(&content)
        .with_context(|| format!("Invalid shipment JSON in '{}'", path.display()))?;
    Ok(shipment)
}

fn exit_code_for(e: &FulfillmentError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: FulfillmentError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code_for(&e));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting fulfillment-bridge");
    tracing::info!("📁 Loading configuration from: {}", cli.config.display());

    let mut config = match FulfillmentConfig::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => fail(e),
    };

    if let Some(development_mode) = cli.development_mode {
        config.development_mode = development_mode;
        tracing::info!("🔧 development_mode overridden to: {}", development_mode);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        fail(e);
    }
    if config.development_mode {
        tracing::warn!("⚠️ development_mode is enabled - catalog faults will be ignored");
    }

    match cli.command {
        Command::Submit { shipment, dry_run } => {
            let shipment = load_shipment(&shipment)?;

            if dry_run {
                tracing::info!("🔍 DRY RUN MODE - nothing will be sent");
                let request = match RequestBuilder::new(&config).build(&shipment) {
                    Ok(request) => request,
                    Err(e) => fail(e),
                };
                println!("{}", serde_json::to_string_pretty(&request)?);
                return Ok(());
            }

            let transport = HttpTransport::new(&config).unwrap_or_else(|e| fail(e));
            let submitter = FulfillmentSubmitter::new(NormalizingService::new(transport), config);

            match submitter.submit(&shipment).await {
                Ok(SubmitOutcome::Accepted) => {
                    println!("✅ Shipment {} submitted", shipment.number);
                }
                Ok(SubmitOutcome::Abort(reason)) => {
                    eprintln!("🛑 Shipment {} aborted: {}", shipment.number, reason);
                    std::process::exit(EXIT_ABORT);
                }
                Err(e) => fail(e),
            }
        }
        Command::Track { shipment } => {
            let shipment = load_shipment(&shipment)?;
            let transport = HttpTransport::new(&config).unwrap_or_else(|e| fail(e));
            let resolver = TrackingResolver::new(NormalizingService::new(transport), &config);

            match resolver.resolve(&shipment).await {
                TrackOutcome::Found(details) => {
                    println!("{}", serde_json::to_string_pretty(&details)?);
                }
                TrackOutcome::Pending => {
                    println!("⏳ Tracking for {} not available yet", shipment.number);
                    std::process::exit(EXIT_PENDING);
                }
                TrackOutcome::PermanentFailure => {
                    eprintln!(
                        "🛑 Order {} not found by the fulfillment service; stop polling",
                        shipment.number
                    );
                    std::process::exit(EXIT_ABORT);
                }
            }
        }
    }

    Ok(())
}
