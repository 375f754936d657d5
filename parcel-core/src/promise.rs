use crate::models::Order;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A dated delivery commitment issued by one promise authority for one
/// order item. Produced fresh on each query, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Promise {
    pub item_id: String,
    pub order_id: String,
    pub asin: String,
    pub quantity: i32,
    pub data_source: String,
    pub effective_date: DateTime<Utc>,
    pub latest_ship_date: DateTime<Utc>,
    pub latest_arrival_date: DateTime<Utc>,
    /// Actual delivery date, backfilled from the owning shipment; `None`
    /// while undelivered.
    pub delivery_date: Option<DateTime<Utc>>,
    pub active: bool,
    /// Label identifying the authority that issued this promise.
    pub provided_by: String,
    pub confidence_tracked: bool,
    pub confidence: i32,
}

impl Promise {
    pub fn set_delivery_date(&mut self, delivery_date: Option<DateTime<Utc>>) {
        self.delivery_date = delivery_date;
    }

    pub fn set_confidence(&mut self, tracked: bool, confidence: i32) {
        self.confidence_tracked = tracked;
        self.confidence = confidence;
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("cannot add a promise to a history with no order")]
    MissingOrder,
}

/// The ordered collection of reconciled promises assembled for one order.
/// A history for an unknown order carries no order and accepts no promises.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromiseHistory {
    order: Option<Order>,
    promises: Vec<Promise>,
}

impl PromiseHistory {
    pub fn new(order: Order) -> Self {
        Self {
            order: Some(order),
            promises: Vec::new(),
        }
    }

    /// A history for an order that could not be found.
    pub fn without_order() -> Self {
        Self {
            order: None,
            promises: Vec::new(),
        }
    }

    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    pub fn promises(&self) -> &[Promise] {
        &self.promises
    }

    /// Appends a promise. Fails when the history has no order.
    pub fn push(&mut self, promise: Promise) -> Result<(), HistoryError> {
        if self.order.is_none() {
            return Err(HistoryError::MissingOrder);
        }
        self.promises.push(promise);
        Ok(())
    }
}
