use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Shipment view: the slice of the store's order model this crate reads.
// ---------------------------------------------------------------------------

/// Store-side shipment state. States this crate does not act on are kept
/// verbatim in `Other` so they can still be reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShipmentState {
    Pending,
    Ready,
    Shipped,
    Canceled,
    Other(String),
}

impl ShipmentState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Ready => "ready",
            Self::Shipped => "shipped",
            Self::Canceled => "canceled",
            Self::Other(state) => state,
        }
    }
}

impl From<String> for ShipmentState {
    fn from(state: String) -> Self {
        match state.as_str() {
            "pending" => Self::Pending,
            "ready" => Self::Ready,
            "shipped" => Self::Shipped,
            "canceled" => Self::Canceled,
            _ => Self::Other(state),
        }
    }
}

impl From<ShipmentState> for String {
    fn from(state: ShipmentState) -> Self {
        match state {
            ShipmentState::Other(state) => state,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ShipmentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shipment {
    /// External order number; the remote service keys orders by it.
    pub number: String,
    pub state: ShipmentState,
    #[serde(default)]
    pub shipping_method: Option<ShippingMethod>,
    pub order: Order,
    #[serde(default)]
    pub inventory_units: Vec<InventoryUnit>,
}

impl Shipment {
    pub fn is_ready(&self) -> bool {
        self.state == ShipmentState::Ready
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingMethod {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub number: String,
    pub created_at: DateTime<Utc>,
    pub email: String,
    #[serde(default)]
    pub ship_address: Option<ShipAddress>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipAddress {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state_abbr: Option<String>,
    pub country_iso: Option<String>,
    pub zipcode: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryUnit {
    pub variant: Variant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
}

// ---------------------------------------------------------------------------
// Fulfillment request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub name: String,
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub sku: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShippingSpeed {
    Standard,
    Expedited,
    Priority,
}

impl ShippingSpeed {
    /// Wire name of the speed category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Expedited => "Expedited",
            Self::Priority => "Priority",
        }
    }
}

impl fmt::Display for ShippingSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentOptions {
    pub shipping_method: ShippingSpeed,
    pub order_date: DateTime<Utc>,
    pub comment: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentRequest {
    pub order_id: String,
    pub address: Address,
    pub line_items: Vec<LineItem>,
    pub options: FulfillmentOptions,
}

// ---------------------------------------------------------------------------
// Remote responses
// ---------------------------------------------------------------------------

/// Bytes exactly as the transport received them; not yet known to be valid text.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingDetails {
    pub tracking_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta: Option<String>,
}

/// Tracking details keyed by the remote order identifier.
///
/// An empty mapping means tracking has not been generated yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingInfo {
    entries: BTreeMap<String, TrackingDetails>,
}

impl TrackingInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, order_id: impl Into<String>, details: TrackingDetails) {
        self.entries.insert(order_id.into(), details);
    }

    pub fn get(&self, order_id: &str) -> Option<&TrackingDetails> {
        self.entries.get(order_id)
    }

    pub fn remove(&mut self, order_id: &str) -> Option<TrackingDetails> {
        self.entries.remove(order_id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TrackingDetails)> {
        self.entries.iter()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FulfillmentResult {
    pub success: bool,
    /// Response fields as reported by the remote service.
    pub params: BTreeMap<String, serde_json::Value>,
    pub fault_string: Option<String>,
    /// Only populated for tracking responses that carried a tracking section.
    pub tracking: Option<TrackingInfo>,
}

impl FulfillmentResult {
    pub fn success() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    pub fn failure(fault_string: Option<String>) -> Self {
        Self {
            success: false,
            fault_string,
            ..Self::default()
        }
    }

    pub fn fault_contains(&self, pattern: &str) -> bool {
        self.fault_string
            .as_deref()
            .map(|fault| fault.contains(pattern))
            .unwrap_or(false)
    }
}

// ---------------------------------------------------------------------------
// Workflow outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    NotReady(ShipmentState),
    Transport(String),
    Rejected(Option<String>),
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady(state) => write!(f, "wrong state: {}", state),
            Self::Transport(message) => write!(f, "remote call failed: {}", message),
            Self::Rejected(Some(fault)) => write!(f, "response was in error: {}", fault),
            Self::Rejected(None) => f.write_str("response was in error"),
        }
    }
}

/// Result of a submit step. `Abort` tells the workflow engine to halt the transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Abort(AbortReason),
}

impl SubmitOutcome {
    pub fn is_abort(&self) -> bool {
        matches!(self, Self::Abort(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackOutcome {
    Found(TrackingDetails),
    /// Tracking not generated yet; poll again later.
    Pending,
    /// The order will never produce tracking; stop polling.
    PermanentFailure,
}
