use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pool-internal representation of an order item. Converted into a domain
/// `OrderItem` at the authority boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemRecord {
    pub item_id: String,
    pub order_id: String,
    pub asin: String,
    pub title: String,
    pub quantity: i32,
    pub merchant_id: String,
    pub approval_date: DateTime<Utc>,
    pub supply_code: String,
    pub supply_code_date: DateTime<Utc>,
    pub confidence_tracked: bool,
    pub confidence: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentItemRecord {
    pub item_id: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    pub shipment_id: String,
    pub zip: String,
    pub condition: String,
    pub warehouse_id: String,
    pub ship_option: String,
    pub creation_date: DateTime<Utc>,
    pub ship_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub shipping_promise_active: bool,
    pub fulfillment_promise_active: bool,
    pub promises_agree: bool,
    pub items: Vec<ShipmentItemRecord>,
}

impl ShipmentRecord {
    pub fn includes_item(&self, item_id: &str) -> bool {
        self.items.iter().any(|item| item.item_id == item_id)
    }

    /// Marks which authority's promise is the active one. The two flags are
    /// complementary, so they are only ever set together.
    pub fn set_shipping_promise_active(&mut self, active: bool) {
        self.shipping_promise_active = active;
        self.fulfillment_promise_active = !active;
    }
}

/// Pool-internal representation of an order. Carries the raw numeric
/// condition code; mapping to `OrderCondition` happens at the authority
/// boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub customer_id: String,
    pub marketplace_id: String,
    pub condition: i32,
    pub ship_option: String,
    pub order_date: DateTime<Utc>,
    pub items: Vec<OrderItemRecord>,
    pub shipments: Vec<ShipmentRecord>,
}

impl OrderRecord {
    /// A copy of this record rewritten to the requested order id. Only the
    /// order id and the items' owning-order references change; item content,
    /// shipments and dates are untouched.
    pub fn personalized(&self, order_id: &str) -> OrderRecord {
        let mut order = self.clone();
        order.order_id = order_id.to_string();
        for item in &mut order.items {
            item.order_id = order_id.to_string();
        }
        order
    }
}
