use crate::condition::OrderCondition;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single fulfillable line of a customer order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub item_id: String,
    pub order_id: String,
    pub asin: String,
    pub title: String,
    pub quantity: i32,
    pub merchant_id: String,
    pub approval_date: DateTime<Utc>,
    pub supply_code: String,
    pub supply_code_date: DateTime<Utc>,
    /// When false, `confidence` carries a meaningless filler value and must
    /// be ignored.
    pub confidence_tracked: bool,
    pub confidence: i32,
}

/// An item reference carried by a shipment. Quantity never exceeds the
/// ordered quantity of the referenced item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentItem {
    pub item_id: String,
    pub quantity: i32,
}

/// A physical fulfillment unit covering a subset of an order's items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shipment {
    pub shipment_id: String,
    pub zip: String,
    pub condition: String,
    pub warehouse_id: String,
    pub ship_option: String,
    pub creation_date: DateTime<Utc>,
    pub ship_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    /// The shipping authority's promise is the active one iff this is true;
    /// the fulfillment authority's promise is active iff it is false.
    pub shipping_promise_active: bool,
    pub fulfillment_promise_active: bool,
    /// Whether the two authorities' promise dates are defined to agree for
    /// the items in this shipment.
    pub promises_agree: bool,
    pub items: Vec<ShipmentItem>,
}

impl Shipment {
    pub fn includes_item(&self, item_id: &str) -> bool {
        self.items.iter().any(|item| item.item_id == item_id)
    }
}

/// A customer purchase record with its items and shipments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub customer_id: String,
    pub marketplace_id: String,
    pub condition: OrderCondition,
    pub ship_option: String,
    pub order_date: DateTime<Utc>,
    pub items: Vec<OrderItem>,
    pub shipments: Vec<Shipment>,
}

impl Order {
    /// The shipment carrying the given item, if any.
    pub fn shipment_for_item(&self, item_id: &str) -> Option<&Shipment> {
        self.shipments.iter().find(|s| s.includes_item(item_id))
    }

    pub fn item_ids(&self) -> BTreeSet<&str> {
        self.items.iter().map(|item| item.item_id.as_str()).collect()
    }
}
