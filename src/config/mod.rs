#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use toml_config::FulfillmentConfig;

/// Customer-facing comment attached to every submitted order unless configured otherwise.
pub const DEFAULT_COMMENT: &str = "Thank you for your order.";
