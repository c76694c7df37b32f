use crate::core::pacing::FixedDelayPacer;
use crate::domain::model::{Shipment, TrackOutcome};
use crate::domain::ports::{ConfigProvider, FulfillmentService, Pacer};

/// Fault the service reports for an order it has no record of.
pub const ORDER_NOT_FOUND_FAULT: &str = "requested order not found";

/// Polls the fulfillment service for a submitted shipment's tracking details.
pub struct TrackingResolver<S: FulfillmentService, P: Pacer = FixedDelayPacer> {
    service: S,
    pacer: P,
}

impl<S: FulfillmentService> TrackingResolver<S> {
    pub fn new<C: ConfigProvider>(service: S, config: &C) -> Self {
        Self::with_pacer(service, FixedDelayPacer::new(config.pacing_delay()))
    }
}

impl<S: FulfillmentService, P: Pacer> TrackingResolver<S, P> {
    pub fn with_pacer(service: S, pacer: P) -> Self {
        Self { service, pacer }
    }

    pub async fn resolve(&self, shipment: &Shipment) -> TrackOutcome {
        self.pacer.pause().await;

        tracing::info!("🔎 Fetching tracking for order id {}", shipment.number);
        let response = match self.service.fetch_tracking(&shipment.number).await {
            Ok(response) => response,
            Err(e) => {
                // 傳輸錯誤可能自行恢復，下次輪詢再試
                tracing::warn!("Tracking fetch failed, will retry on next poll - {}", e);
                return TrackOutcome::Pending;
            }
        };
        tracing::debug!("Tracking response params: {:?}", response.params);

        if !response.success {
            if response.fault_contains(ORDER_NOT_FOUND_FAULT) {
                tracing::error!(
                    "❌ Order {} unknown to fulfillment service; tracking will never arrive",
                    shipment.number
                );
                return TrackOutcome::PermanentFailure;
            }
            tracing::warn!(
                "Tracking fetch unsuccessful: {}",
                response.fault_string.as_deref().unwrap_or("no fault string")
            );
        }

        let Some(mut tracking) = response.tracking.filter(|info| !info.is_empty()) else {
            tracing::info!("Tracking not yet available for {}", shipment.number);
            return TrackOutcome::Pending;
        };

        match tracking.remove(&shipment.number) {
            Some(details) => {
                tracing::info!(
                    "✅ Tracking for {}: {} ({})",
                    shipment.number,
                    details.tracking_number,
                    details.carrier.as_deref().unwrap_or("unknown carrier")
                );
                TrackOutcome::Found(details)
            }
            None => {
                tracing::warn!(
                    "Tracking section has no entry for {} (got {} other order(s))",
                    shipment.number,
                    tracking.len()
                );
                TrackOutcome::Pending
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{FulfillmentResult, TrackingDetails, TrackingInfo};
    use crate::test_support::{events, sample_shipment, EventLog, MockService, RecordingPacer, Reply};

    fn build_resolver(reply: Reply) -> (TrackingResolver<MockService, RecordingPacer>, EventLog) {
        let log = EventLog::default();
        let service = MockService::new(log.clone(), reply);
        let pacer = RecordingPacer { log: log.clone() };
        (TrackingResolver::with_pacer(service, pacer), log)
    }

    fn details(tracking_number: &str) -> TrackingDetails {
        TrackingDetails {
            tracking_number: tracking_number.to_string(),
            carrier: Some("UPS".to_string()),
            ship_time: None,
            eta: None,
        }
    }

    #[tokio::test]
    async fn test_found_returns_entry_for_shipment() {
        let mut info = TrackingInfo::new();
        info.insert("H123456789", details("1Z123"));
        let result = FulfillmentResult {
            tracking: Some(info),
            ..FulfillmentResult::success()
        };
        let (resolver, log) = build_resolver(Reply::Result(result));

        let outcome = resolver.resolve(&sample_shipment()).await;

        assert_eq!(outcome, TrackOutcome::Found(details("1Z123")));
        assert_eq!(events(&log), vec!["pause", "track:H123456789"]);
    }

    #[tokio::test]
    async fn test_order_not_found_is_permanent() {
        let (resolver, _) = build_resolver(Reply::Result(FulfillmentResult::failure(Some(
            "The requested order not found".to_string(),
        ))));

        assert_eq!(
            resolver.resolve(&sample_shipment()).await,
            TrackOutcome::PermanentFailure
        );
    }

    #[tokio::test]
    async fn test_success_without_tracking_is_pending() {
        let (resolver, _) = build_resolver(Reply::Result(FulfillmentResult::success()));
        assert_eq!(resolver.resolve(&sample_shipment()).await, TrackOutcome::Pending);

        let empty = FulfillmentResult {
            tracking: Some(TrackingInfo::new()),
            ..FulfillmentResult::success()
        };
        let (resolver, _) = build_resolver(Reply::Result(empty));
        assert_eq!(resolver.resolve(&sample_shipment()).await, TrackOutcome::Pending);
    }

    #[tokio::test]
    async fn test_other_faults_and_transport_errors_are_pending() {
        let (resolver, _) = build_resolver(Reply::Result(FulfillmentResult::failure(Some(
            "Request is throttled".to_string(),
        ))));
        assert_eq!(resolver.resolve(&sample_shipment()).await, TrackOutcome::Pending);

        let (resolver, _) = build_resolver(Reply::TransportError);
        assert_eq!(resolver.resolve(&sample_shipment()).await, TrackOutcome::Pending);
    }

    #[tokio::test]
    async fn test_entry_for_other_order_is_pending() {
        let mut info = TrackingInfo::new();
        info.insert("SOMEONE-ELSE", details("1Z777"));
        let result = FulfillmentResult {
            tracking: Some(info),
            ..FulfillmentResult::success()
        };
        let (resolver, _) = build_resolver(Reply::Result(result));

        assert_eq!(resolver.resolve(&sample_shipment()).await, TrackOutcome::Pending);
    }
}
