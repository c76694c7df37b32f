use crate::domain::model::{
    Address, FulfillmentOptions, FulfillmentRequest, LineItem, Shipment, ShippingSpeed,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{FulfillmentError, Result};
use crate::utils::validation::require_address_field;

/// Projects a [`Shipment`] into the request shape the fulfillment service expects.
pub struct RequestBuilder<'a, C: ConfigProvider> {
    config: &'a C,
}

impl<'a, C: ConfigProvider> RequestBuilder<'a, C> {
    pub fn new(config: &'a C) -> Self {
        Self { config }
    }

    pub fn build(&self, shipment: &Shipment) -> Result<FulfillmentRequest> {
        Ok(FulfillmentRequest {
            order_id: shipment.number.clone(),
            address: self.address(shipment)?,
            line_items: self.line_items(shipment)?,
            options: self.options(shipment),
        })
    }

    pub fn address(&self, shipment: &Shipment) -> Result<Address> {
        let addr = shipment
            .order
            .ship_address
            .as_ref()
            .ok_or_else(|| FulfillmentError::ValidationError {
                message: format!("order {} has no ship address", shipment.order.number),
            })?;

        let firstname = require_address_field("firstname", &addr.firstname)?;
        let lastname = require_address_field("lastname", &addr.lastname)?;

        Ok(Address {
            name: format!("{} {}", firstname, lastname),
            address1: require_address_field("address1", &addr.address1)?,
            address2: addr.address2.clone().filter(|line| !line.trim().is_empty()),
            city: require_address_field("city", &addr.city)?,
            state: require_address_field("state_abbr", &addr.state_abbr)?,
            country: require_address_field("country_iso", &addr.country_iso)?,
            zip: require_address_field("zipcode", &addr.zipcode)?,
        })
    }

    /// One line per distinct SKU, in order of first appearance.
    ///
    /// A unit without a SKU is a data defect and fails the whole build.
    pub fn line_items(&self, shipment: &Shipment) -> Result<Vec<LineItem>> {
        let mut items: Vec<LineItem> = Vec::new();

        for unit in &shipment.inventory_units {
            let sku = match unit.variant.sku.as_deref() {
                Some(sku) if !sku.is_empty() => sku,
                _ => {
                    return Err(FulfillmentError::MissingSku {
                        variant: unit.variant.name.clone(),
                    })
                }
            };

            match items.iter_mut().find(|item| item.sku == sku) {
                Some(item) => item.quantity += 1,
                None => items.push(LineItem {
                    sku: sku.to_string(),
                    quantity: 1,
                }),
            }
        }

        for item in &mut items {
            item.quantity = self.cap_quantity(item.quantity);
        }
        Ok(items)
    }

    fn cap_quantity(&self, quantity: u32) -> u32 {
        match self.config.max_quantity_failsafe() {
            Some(max) => quantity.min(max),
            None => quantity,
        }
    }

    pub fn options(&self, shipment: &Shipment) -> FulfillmentOptions {
        FulfillmentOptions {
            shipping_method: shipping_speed(
                shipment.shipping_method.as_ref().map(|sm| sm.name.as_str()),
            ),
            order_date: shipment.order.created_at,
            comment: self.config.comment().to_string(),
            email: shipment.order.email.clone(),
        }
    }
}

/// Map a store shipping-method name onto the service's speed tiers.
pub fn shipping_speed(method_name: Option<&str>) -> ShippingSpeed {
    let Some(name) = method_name else {
        return ShippingSpeed::Standard;
    };
    let name = name.to_lowercase();
    if name.contains("expedited") {
        ShippingSpeed::Expedited
    } else if name.contains("priority") {
        ShippingSpeed::Priority
    } else {
        ShippingSpeed::Standard
    }
}
