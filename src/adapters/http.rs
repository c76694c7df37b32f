use crate::domain::model::{FulfillmentRequest, RawResponse};
use crate::domain::ports::{ConfigProvider, FulfillmentTransport};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::SecondsFormat;
use reqwest::Client;

const SUBMIT_ACTION: &str = "CreateFulfillmentOrder";
const TRACKING_ACTION: &str = "GetFulfillmentOrder";

/// Form-encoded POST transport for the fulfillment web service.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    api_key: String,
    secret_key: String,
}

impl HttpTransport {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout()).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint().to_string(),
            api_key: config.api_key().to_string(),
            secret_key: config.secret_key().to_string(),
        })
    }

    async fn post(&self, action: &str, form: Vec<(String, String)>) -> Result<RawResponse> {
        tracing::debug!("📡 POST {} Action={}", self.endpoint, action);

        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.api_key, Some(&self.secret_key))
            .form(&form)
            .send()
            .await?;

        let status = response.status().as_u16();
        tracing::debug!("API response status: {}", status);

        let body = response.bytes().await?.to_vec();
        Ok(RawResponse { status, body })
    }
}

/// Flatten a submit request into the service's dotted form fields.
pub fn submit_form(request: &FulfillmentRequest) -> Vec<(String, String)> {
    let mut form = vec![
        ("Action".to_string(), SUBMIT_ACTION.to_string()),
        (
            "MerchantFulfillmentOrderId".to_string(),
            request.order_id.clone(),
        ),
        ("DisplayableOrderId".to_string(), request.order_id.clone()),
        (
            "DisplayableOrderDateTime".to_string(),
            request
                .options
                .order_date
                .to_rfc3339_opts(SecondsFormat::Secs, true),
        ),
        (
            "DisplayableOrderComment".to_string(),
            request.options.comment.clone(),
        ),
        (
            "ShippingSpeedCategory".to_string(),
            request.options.shipping_method.as_str().to_string(),
        ),
        (
            "NotificationEmailList.member.1".to_string(),
            request.options.email.clone(),
        ),
    ];

    let addr = &request.address;
    let address_fields = [
        ("Name", Some(&addr.name)),
        ("Line1", Some(&addr.address1)),
        ("Line2", addr.address2.as_ref()),
        ("City", Some(&addr.city)),
        ("StateOrProvinceCode", Some(&addr.state)),
        ("CountryCode", Some(&addr.country)),
        ("PostalCode", Some(&addr.zip)),
    ];
    for (field, value) in address_fields {
        if let Some(value) = value {
            form.push((format!("DestinationAddress.{}", field), value.clone()));
        }
    }

    for (i, item) in request.line_items.iter().enumerate() {
        let n = i + 1;
        form.push((format!("Item.{}.MerchantSKU", n), item.sku.clone()));
        form.push((
            format!("Item.{}.MerchantFulfillmentOrderItemId", n),
            format!("{}-{}", request.order_id, n),
        ));
        form.push((format!("Item.{}.Quantity", n), item.quantity.to_string()));
    }

    form
}

#[async_trait]
impl FulfillmentTransport for HttpTransport {
    async fn submit_order(&self, request: &FulfillmentRequest) -> Result<RawResponse> {
        self.post(SUBMIT_ACTION, submit_form(request)).await
    }

    async fn fetch_tracking(&self, order_id: &str) -> Result<RawResponse> {
        let form = vec![
            ("Action".to_string(), TRACKING_ACTION.to_string()),
            ("MerchantFulfillmentOrderId".to_string(), order_id.to_string()),
        ];
        self.post(TRACKING_ACTION, form).await
    }
}
