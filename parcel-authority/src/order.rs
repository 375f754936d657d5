use parcel_core::{Order, OrderCondition, OrderItem, Shipment, ShipmentItem};
use parcel_data::{OrderItemRecord, OrderRecord, SampleStore, ShipmentRecord};
use std::sync::Arc;

/// Vends order details from the sample store as domain types. The single
/// conversion point from pool records to the model the rest of the system
/// consumes.
pub struct OrderAuthority {
    store: Arc<SampleStore>,
}

impl OrderAuthority {
    pub fn new(store: Arc<SampleStore>) -> Self {
        Self { store }
    }

    /// Order lookup. Unknown ids return `None`; so do records whose
    /// condition code falls outside the known range.
    pub fn order_by_id(&self, order_id: &str) -> Option<Order> {
        let record = self.store.order(order_id)?;
        convert_order(&record)
    }

    pub fn item_by_id(&self, item_id: &str) -> Option<OrderItem> {
        self.store.item(item_id).map(convert_item)
    }
}

fn convert_order(record: &OrderRecord) -> Option<Order> {
    let condition = OrderCondition::from_code(record.condition)?;

    Some(Order {
        order_id: record.order_id.clone(),
        customer_id: record.customer_id.clone(),
        marketplace_id: record.marketplace_id.clone(),
        condition,
        ship_option: record.ship_option.clone(),
        order_date: record.order_date,
        items: record.items.iter().map(convert_item).collect(),
        shipments: record.shipments.iter().map(convert_shipment).collect(),
    })
}

fn convert_item(record: &OrderItemRecord) -> OrderItem {
    OrderItem {
        item_id: record.item_id.clone(),
        order_id: record.order_id.clone(),
        asin: record.asin.clone(),
        title: record.title.clone(),
        quantity: record.quantity,
        merchant_id: record.merchant_id.clone(),
        approval_date: record.approval_date,
        supply_code: record.supply_code.clone(),
        supply_code_date: record.supply_code_date,
        confidence_tracked: record.confidence_tracked,
        confidence: record.confidence,
    }
}

fn convert_shipment(record: &ShipmentRecord) -> Shipment {
    Shipment {
        shipment_id: record.shipment_id.clone(),
        zip: record.zip.clone(),
        condition: record.condition.clone(),
        warehouse_id: record.warehouse_id.clone(),
        ship_option: record.ship_option.clone(),
        creation_date: record.creation_date,
        ship_date: record.ship_date,
        delivery_date: record.delivery_date,
        shipping_promise_active: record.shipping_promise_active,
        fulfillment_promise_active: record.fulfillment_promise_active,
        promises_agree: record.promises_agree,
        items: record
            .items
            .iter()
            .map(|item| ShipmentItem {
                item_id: item.item_id.clone(),
                quantity: item.quantity,
            })
            .collect(),
    }
}
