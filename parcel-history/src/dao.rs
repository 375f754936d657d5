use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parcel_authority::OrderAuthority;
use parcel_core::{Order, Promise, PromiseSource, ReadOnlyDao};
use std::sync::Arc;

/// Read-only access to orders by order id.
pub struct OrderDao {
    authority: Arc<OrderAuthority>,
}

impl OrderDao {
    pub fn new(authority: Arc<OrderAuthority>) -> Self {
        Self { authority }
    }
}

#[async_trait]
impl ReadOnlyDao<str, Order> for OrderDao {
    async fn get(&self, order_id: &str) -> Option<Order> {
        self.authority.order_by_id(order_id)
    }
}

/// Read-only access to the promises for an order item, gathered from an
/// ordered list of interchangeable promise sources.
pub struct PromiseDao {
    authority: Arc<OrderAuthority>,
    sources: Vec<Arc<dyn PromiseSource>>,
}

impl PromiseDao {
    pub fn new(authority: Arc<OrderAuthority>, sources: Vec<Arc<dyn PromiseSource>>) -> Self {
        Self { authority, sources }
    }

    /// The delivery date of the shipment containing the given item, if the
    /// item exists and that shipment has been delivered.
    fn delivery_date_for_item(&self, item_id: &str) -> Option<DateTime<Utc>> {
        let item = self.authority.item_by_id(item_id)?;
        let order = self.authority.order_by_id(&item.order_id)?;
        order
            .shipment_for_item(item_id)
            .and_then(|shipment| shipment.delivery_date)
    }
}

#[async_trait]
impl ReadOnlyDao<str, Vec<Promise>> for PromiseDao {
    /// Every source's promise for the item, with the actual delivery date
    /// backfilled, ordered ascending by asin. An item with no promises
    /// yields an empty list, not an absence.
    async fn get(&self, item_id: &str) -> Option<Vec<Promise>> {
        let delivery_date = self.delivery_date_for_item(item_id);

        let mut promises = Vec::new();
        for source in &self.sources {
            if let Some(mut promise) = source.promise_for_item(item_id) {
                promise.set_delivery_date(delivery_date);
                promises.push(promise);
            } else {
                tracing::debug!("{} has no promise for item {item_id}", source.provided_by());
            }
        }
        promises.sort_by(|a, b| a.asin.cmp(&b.asin));

        Some(promises)
    }
}
