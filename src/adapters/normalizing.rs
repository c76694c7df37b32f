use crate::core::encoding;
use crate::core::response_parser;
use crate::domain::model::{FulfillmentRequest, FulfillmentResult, RawResponse};
use crate::domain::ports::{FulfillmentService, FulfillmentTransport};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Submit,
    Tracking,
}

/// Wraps a raw transport and turns every response body into a [`FulfillmentResult`].
///
/// Bodies are repaired to valid UTF-8 before parsing. A body that still is not
/// well-formed XML becomes an unsuccessful result and is logged in full.
pub struct NormalizingService<T: FulfillmentTransport> {
    inner: T,
}

impl<T: FulfillmentTransport> NormalizingService<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    fn normalize_response(&self, op: Operation, raw: RawResponse) -> FulfillmentResult {
        let body = encoding::normalize(&raw.body);

        let doc = match roxmltree::Document::parse(&body) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::info!("{} xml parse error: {}", "*".repeat(20), e);
                tracing::info!("{}", body);
                let mut result = FulfillmentResult::failure(None);
                result
                    .params
                    .insert("response_status".to_string(), Value::from("Failure"));
                result
                    .params
                    .insert("http_status".to_string(), Value::from(raw.status));
                return result;
            }
        };

        let fault = response_parser::fault_string(&doc);
        let success = fault.is_none() && (200..300).contains(&raw.status);

        let mut result = if success {
            FulfillmentResult::success()
        } else {
            FulfillmentResult::failure(fault.clone())
        };

        let status = if success { "Success" } else { "Failure" };
        result
            .params
            .insert("response_status".to_string(), Value::from(status));
        result
            .params
            .insert("http_status".to_string(), Value::from(raw.status));
        if let Some(fault) = fault {
            result.params.insert("faultstring".to_string(), Value::from(fault));
        }
        if let Some(request_id) = response_parser::request_id(&doc) {
            result
                .params
                .insert("request_id".to_string(), Value::from(request_id));
        }

        if op == Operation::Tracking && success {
            let tracking = response_parser::parse_tracking(&doc);
            if !tracking.is_empty() {
                let numbers: serde_json::Map<String, Value> = tracking
                    .iter()
                    .map(|(id, details)| (id.clone(), Value::from(details.tracking_number.clone())))
                    .collect();
                result
                    .params
                    .insert("tracking_numbers".to_string(), Value::Object(numbers));
                if let Ok(info) = serde_json::to_value(&tracking) {
                    result.params.insert("fulfillment_info".to_string(), info);
                }
                result.tracking = Some(tracking);
            }
        }

        result
    }
}

#[async_trait]
impl<T: FulfillmentTransport> FulfillmentService for NormalizingService<T> {
    async fn submit_order(&self, request: &FulfillmentRequest) -> Result<FulfillmentResult> {
        let raw = self.inner.submit_order(request).await?;
        Ok(self.normalize_response(Operation::Submit, raw))
    }

    async fn fetch_tracking(&self, order_id: &str) -> Result<FulfillmentResult> {
        let raw = self.inner.fetch_tracking(order_id).await?;
        Ok(self.normalize_response(Operation::Tracking, raw))
    }
}
