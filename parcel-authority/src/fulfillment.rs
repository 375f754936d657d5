use crate::shipping::{ShippingPromiseAuthority, PROMISE_DATA_SOURCE};
use chrono::Duration;
use parcel_core::{Promise, PromiseSource};
use parcel_data::SampleStore;
use std::sync::Arc;

/// The fulfillment authority: issues its own promise for an item, absent
/// whenever the owning shipment marks the fulfillment promise inactive.
///
/// When the owning shipment says the two authorities agree, this promise
/// mirrors the shipping authority's dates exactly; otherwise it commits to
/// a strictly later window.
pub struct FulfillmentPromiseAuthority {
    store: Arc<SampleStore>,
    shipping: ShippingPromiseAuthority,
}

impl FulfillmentPromiseAuthority {
    pub fn new(store: Arc<SampleStore>) -> Self {
        let shipping = ShippingPromiseAuthority::new(store.clone());
        Self { store, shipping }
    }
}

impl PromiseSource for FulfillmentPromiseAuthority {
    fn provided_by(&self) -> &'static str {
        "OFS"
    }

    fn promise_for_item(&self, item_id: &str) -> Option<Promise> {
        let item = self.store.item(item_id)?;
        let order = self.store.order(&item.order_id)?;

        let owning_shipment = order
            .shipments
            .iter()
            .find(|shipment| shipment.includes_item(item_id));

        let active = owning_shipment
            .map(|shipment| shipment.fulfillment_promise_active)
            .unwrap_or(false);
        if !active {
            return None;
        }

        // The shipping promise always exists once the item and order do;
        // its window anchors this authority's dates.
        let baseline = self.shipping.promise_for_item(item_id)?;

        let promises_agree = owning_shipment
            .map(|shipment| shipment.promises_agree)
            .unwrap_or(false);
        let (latest_arrival_date, latest_ship_date) = if promises_agree {
            (baseline.latest_arrival_date, baseline.latest_ship_date)
        } else {
            let arrival = baseline.latest_arrival_date + Duration::days(1) + Duration::hours(2);
            (arrival, arrival - Duration::hours(15))
        };

        Some(Promise {
            item_id: item.item_id.clone(),
            order_id: order.order_id.clone(),
            asin: item.asin.clone(),
            quantity: item.quantity,
            data_source: PROMISE_DATA_SOURCE.to_string(),
            effective_date: order.order_date + Duration::hours(8),
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
