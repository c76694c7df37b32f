pub mod encoding;
pub mod pacing;
pub mod request_builder;
pub mod response_parser;
pub mod submitter;
pub mod tracking;

pub use crate::domain::model::{
    FulfillmentRequest, FulfillmentResult, Shipment, SubmitOutcome, TrackOutcome, TrackingInfo,
};
pub use crate::domain::ports::{ConfigProvider, FulfillmentService, FulfillmentTransport, Pacer};
pub use crate::utils::error::Result;
