//! Fixtures shared by unit tests.

use crate::config::DEFAULT_COMMENT;
use crate::domain::model::{
    FulfillmentRequest, FulfillmentResult, InventoryUnit, Order, ShipAddress, Shipment,
    ShipmentState, ShippingMethod, Variant,
};
use crate::domain::ports::{ConfigProvider, FulfillmentService, Pacer};
use crate::utils::error::{FulfillmentError, Result};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct StaticConfig {
    pub max_quantity_failsafe: Option<u32>,
    pub development_mode: bool,
    pub comment: String,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            max_quantity_failsafe: None,
            development_mode: false,
            comment: DEFAULT_COMMENT.to_string(),
        }
    }
}

impl ConfigProvider for StaticConfig {
    fn api_key(&self) -> &str {
        "test-api-key"
    }

    fn secret_key(&self) -> &str {
        "test-secret-key"
    }

    fn endpoint(&self) -> &str {
        "http://localhost/fulfillment"
    }

    fn max_quantity_failsafe(&self) -> Option<u32> {
        self.max_quantity_failsafe
    }

    fn development_mode(&self) -> bool {
        self.development_mode
    }

    fn pacing_delay(&self) -> Duration {
        Duration::ZERO
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(5)
    }

    fn comment(&self) -> &str {
        &self.comment
    }
}

pub fn sample_shipment() -> Shipment {
    Shipment {
        number: "H123456789".to_string(),
        state: ShipmentState::Ready,
        shipping_method: Some(ShippingMethod {
            name: "UPS Ground".to_string(),
        }),
        order: Order {
            number: "R987654321".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 15, 0).unwrap(),
            email: "ada@example.com".to_string(),
            ship_address: Some(ShipAddress {
                firstname: Some("Ada".to_string()),
                lastname: Some("Lovelace".to_string()),
                address1: Some("12 Analytical Way".to_string()),
                address2: None,
                city: Some("Portland".to_string()),
                state_abbr: Some("OR".to_string()),
                country_iso: Some("US".to_string()),
                zipcode: Some("97201".to_string()),
            }),
        },
        inventory_units: vec![InventoryUnit {
            variant: Variant {
                name: "Blue Mug".to_string(),
                sku: Some("MUG-BLUE".to_string()),
            },
        }],
    }
}

/// Ordered record of pacing pauses and remote calls.
pub type EventLog = Arc<Mutex<Vec<String>>>;

fn record(log: &EventLog, event: impl Into<String>) {
    if let Ok(mut events) = log.lock() {
        events.push(event.into());
    }
}

pub struct RecordingPacer {
    pub log: EventLog,
}

#[async_trait]
impl Pacer for RecordingPacer {
    async fn pause(&self) {
        record(&self.log, "pause");
    }
}

pub enum Reply {
    Result(FulfillmentResult),
    TransportError,
}

pub struct MockService {
    pub log: EventLog,
    pub reply: Reply,
    pub requests: Arc<Mutex<Vec<FulfillmentRequest>>>,
}

impl MockService {
    pub fn new(log: EventLog, reply: Reply) -> Self {
        Self {
            log,
            reply,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn respond(&self) -> Result<FulfillmentResult> {
        match &self.reply {
            Reply::Result(result) => Ok(result.clone()),
            Reply::TransportError => Err(FulfillmentError::TransportError {
                status: 503,
                message: "connection reset".to_string(),
            }),
        }
    }
}

#[async_trait]
impl FulfillmentService for MockService {
    async fn submit_order(&self, request: &FulfillmentRequest) -> Result<FulfillmentResult> {
        record(&self.log, format!("submit:{}", request.order_id));
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        self.respond()
    }

    async fn fetch_tracking(&self, order_id: &str) -> Result<FulfillmentResult> {
        record(&self.log, format!("track:{}", order_id));
        self.respond()
    }
}

pub fn events(log: &EventLog) -> Vec<String> {
    log.lock().map(|events| events.clone()).unwrap_or_default()
}
