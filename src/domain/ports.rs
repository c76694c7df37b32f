use crate::domain::model::{FulfillmentRequest, FulfillmentResult, RawResponse};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn api_key(&self) -> &str;
    fn secret_key(&self) -> &str;
    fn endpoint(&self) -> &str;
    fn max_quantity_failsafe(&self) -> Option<u32>;
    fn development_mode(&self) -> bool;
    fn pacing_delay(&self) -> Duration;
    fn request_timeout(&self) -> Duration;
    fn comment(&self) -> &str;
}

/// Wire-level access to the remote service. Returns bodies untouched.
#[async_trait]
pub trait FulfillmentTransport: Send + Sync {
    async fn submit_order(&self, request: &FulfillmentRequest) -> Result<RawResponse>;
    async fn fetch_tracking(&self, order_id: &str) -> Result<RawResponse>;
}

/// The submit / fetch-tracking capability the workflow steps consume.
#[async_trait]
pub trait FulfillmentService: Send + Sync {
    async fn submit_order(&self, request: &FulfillmentRequest) -> Result<FulfillmentResult>;
    async fn fetch_tracking(&self, order_id: &str) -> Result<FulfillmentResult>;
}

#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self);
}
