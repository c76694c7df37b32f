//! Field extraction from the fulfillment service's XML responses.
//!
//! Element lookups match on local names, so `ns1:TrackingNumber` and
//! `TrackingNumber` are equivalent. Every lookup returns the first match in
//! document order.

use crate::domain::model::{TrackingDetails, TrackingInfo};
use roxmltree::{Document, Node};

const SHIPMENT: &str = "FulfillmentShipment";
const PACKAGE: &str = "FulfillmentShipmentPackage";
const TRACKING_NUMBER: &str = "TrackingNumber";
const ORDER_ID: &str = "MerchantFulfillmentOrderId";
const CARRIER_CODE: &str = "CarrierCode";
const SHIPPING_DATE_TIME: &str = "ShippingDateTime";
const ESTIMATED_ARRIVAL: &str = "EstimatedArrivalDateTime";

/// First element named `name` anywhere in the document.
fn find_first<'a, 'input>(doc: &'a Document<'input>, name: &str) -> Option<Node<'a, 'input>> {
    doc.descendants()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

/// First element named `child` whose parent element is named `parent`.
fn find_child_of<'a, 'input>(
    doc: &'a Document<'input>,
    parent: &str,
    child: &str,
) -> Option<Node<'a, 'input>> {
    doc.descendants().find(|n| {
        n.is_element()
            && n.tag_name().name() == child
            && n.parent_element()
                .map(|p| p.tag_name().name() == parent)
                .unwrap_or(false)
    })
}

fn node_text(node: Node<'_, '_>) -> String {
    node.text().map(str::trim).unwrap_or_default().to_string()
}

/// Trimmed text of `node`, or `None` when it is blank.
fn non_empty_text(node: Node<'_, '_>) -> Option<String> {
    Some(node_text(node)).filter(|text| !text.is_empty())
}

/// Extract per-order tracking details.
///
/// A document without a package tracking number yields an empty
/// [`TrackingInfo`]; that is the normal state before the order ships.
pub fn parse_tracking(doc: &Document<'_>) -> TrackingInfo {
    let mut info = TrackingInfo::new();

    // 空白的追蹤號碼視同尚未出貨
    let Some(tracking_number) =
        find_child_of(doc, PACKAGE, TRACKING_NUMBER).and_then(non_empty_text)
    else {
        return info;
    };

    let Some(order_id) = find_first(doc, ORDER_ID).and_then(non_empty_text) else {
        tracing::warn!(
            "Tracking number {} present without {}; ignoring",
            tracking_number,
            ORDER_ID
        );
        return info;
    };

    let details = TrackingDetails {
        tracking_number,
        carrier: find_child_of(doc, PACKAGE, CARRIER_CODE).map(node_text),
        ship_time: find_child_of(doc, SHIPMENT, SHIPPING_DATE_TIME).map(node_text),
        eta: find_child_of(doc, PACKAGE, ESTIMATED_ARRIVAL).map(node_text),
    };
    info.insert(order_id, details);
    info
}

/// Fault text of an unsuccessful response: a SOAP `faultstring`, or an `Error/Message`.
pub fn fault_string(doc: &Document<'_>) -> Option<String> {
    find_first(doc, "faultstring")
        .or_else(|| find_child_of(doc, "Error", "Message"))
        .map(node_text)
}

pub fn request_id(doc: &Document<'_>) -> Option<String> {
    find_first(doc, "RequestId").map(node_text)
}
