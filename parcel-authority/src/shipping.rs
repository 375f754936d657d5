use chrono::Duration;
use parcel_core::{Promise, PromiseSource};
use parcel_data::SampleStore;
use std::sync::Arc;

pub(crate) const PROMISE_DATA_SOURCE: &str = "SLAM";

/// The shipping authority: derives a delivery-promise window for an item
/// from its order date alone. The promise is active iff the owning
/// shipment's shipping-promise flag is set.
pub struct ShippingPromiseAuthority {
    store: Arc<SampleStore>,
}

impl ShippingPromiseAuthority {
    pub fn new(store: Arc<SampleStore>) -> Self {
        Self { store }
    }
}

impl PromiseSource for ShippingPromiseAuthority {
    fn provided_by(&self) -> &'static str {
        "DPS"
    }

    fn promise_for_item(&self, item_id: &str) -> Option<Promise> {
        let item = self.store.item(item_id)?;
        let order = self.store.order(&item.order_id)?;

        let effective_date = order.order_date + Duration::hours(1);
        let latest_arrival_date = effective_date + Duration::days(2);
        let latest_ship_date = latest_arrival_date - Duration::hours(18);

        let active = order
            .shipments
            .iter()
            .find(|shipment| shipment.includes_item(item_id))
            .map(|shipment| shipment.shipping_promise_active)
            .unwrap_or(false);

        Some(Promise {
            item_id: item.item_id.clone(),
            order_id: order.order_id.clone(),
            asin: item.asin.clone(),
            quantity: item.quantity,
            data_source: PROMISE_DATA_SOURCE.to_string(),
            effective_date,
            latest_ship_date,
            latest_arrival_date,
            delivery_date: None,
            active,
            provided_by: self.provided_by().to_string(),
            confidence_tracked: false,
            confidence: 0,
        })
    }
}
