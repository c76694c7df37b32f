use crate::core::pacing::FixedDelayPacer;
use crate::core::request_builder::RequestBuilder;
use crate::domain::model::{AbortReason, Shipment, SubmitOutcome};
use crate::domain::ports::{ConfigProvider, FulfillmentService, Pacer};
use crate::utils::error::Result;

/// Fault the service reports when a SKU is unknown to its catalog.
/// Tolerated only in development mode, where test catalogs are incomplete.
pub const IGNORABLE_CATALOG_FAULT: &str = "ItemMissingCatalogData";

/// Sends a ready shipment to the fulfillment service.
pub struct FulfillmentSubmitter<S: FulfillmentService, C: ConfigProvider, P: Pacer = FixedDelayPacer> {
    service: S,
    config: C,
    pacer: P,
}

impl<S: FulfillmentService, C: ConfigProvider> FulfillmentSubmitter<S, C> {
    pub fn new(service: S, config: C) -> Self {
        let pacer = FixedDelayPacer::new(config.pacing_delay());
        Self::with_pacer(service, config, pacer)
    }
}

impl<S: FulfillmentService, C: ConfigProvider, P: Pacer> FulfillmentSubmitter<S, C, P> {
    pub fn with_pacer(service: S, config: C, pacer: P) -> Self {
        Self {
            service,
            config,
            pacer,
        }
    }

    /// Submit the shipment.
    ///
    /// Only data defects (missing SKU, incomplete address) come back as `Err`.
    /// Every remote failure is folded into [`SubmitOutcome::Abort`].
    pub async fn submit(&self, shipment: &Shipment) -> Result<SubmitOutcome> {
        tracing::info!("📦 Fulfillment submit start: {}", shipment.number);

        if !shipment.is_ready() {
            tracing::warn!("wrong state: {}", shipment.state);
            return Ok(SubmitOutcome::Abort(AbortReason::NotReady(
                shipment.state.clone(),
            )));
        }

        let request = RequestBuilder::new(&self.config).build(shipment)?;
        tracing::debug!(
            "{}; {:?}; {:?}; {:?}",
            request.order_id,
            request.address,
            request.line_items,
            request.options
        );

        self.pacer.pause().await;

        let response = match self.service.submit_order(&request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("❌ Submit failed - {}", e);
                return Ok(SubmitOutcome::Abort(AbortReason::Transport(e.to_string())));
            }
        };
        tracing::debug!("Submit response params: {:?}", response.params);

        if !response.success {
            if self.config.development_mode() && response.fault_contains(IGNORABLE_CATALOG_FAULT) {
                tracing::warn!(
                    "Ignoring missing catalog item (development setting - should not be seen in production)"
                );
            } else {
                tracing::error!(
                    "❌ Abort - response was in error: {}",
                    response.fault_string.as_deref().unwrap_or("no fault string")
                );
                return Ok(SubmitOutcome::Abort(AbortReason::Rejected(
                    response.fault_string,
                )));
            }
        }

        tracing::info!("✅ Fulfillment submit end: {}", shipment.number);
        Ok(SubmitOutcome::Accepted)
    }
}
