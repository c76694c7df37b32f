use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "fulfillment-bridge")]
#[command(about = "Submit shipments to the fulfillment service and poll for tracking")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "fulfillment.toml")]
    pub config: PathBuf,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    /// Override development_mode from config
    #[arg(long)]
    pub development_mode: Option<bool>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit a ready shipment for fulfillment
    Submit {
        /// Shipment JSON file
        shipment: PathBuf,

        /// Print the request that would be sent and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Fetch tracking details for a submitted shipment
    Track {
        /// Shipment JSON file
        shipment: PathBuf,
    },
}
