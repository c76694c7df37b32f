pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{HttpTransport, NormalizingService};
pub use config::FulfillmentConfig;
pub use crate::core::{submitter::FulfillmentSubmitter, tracking::TrackingResolver};
pub use domain::model::{Shipment, SubmitOutcome, TrackOutcome};
pub use utils::error::{FulfillmentError, Result};
