use parcel_core::{HistoryError, Order, Promise, PromiseHistory, ReadOnlyDao};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ActivityError {
    /// The caller violated the argument contract; absence of data never
    /// surfaces this way.
    #[error("order ID cannot be blank")]
    InvalidOrderId,

    #[error(transparent)]
    History(#[from] HistoryError),
}

/// Handles the get-promise-history-by-order-id operation: fetches the
/// order, selects its first item as the representative, and assembles the
/// reconciled promise history for that item.
pub struct GetPromiseHistoryActivity {
    order_dao: Arc<dyn ReadOnlyDao<str, Order>>,
    promise_dao: Arc<dyn ReadOnlyDao<str, Vec<Promise>>>,
}

impl GetPromiseHistoryActivity {
    pub fn new(
        order_dao: Arc<dyn ReadOnlyDao<str, Order>>,
        promise_dao: Arc<dyn ReadOnlyDao<str, Vec<Promise>>>,
    ) -> Self {
        Self {
            order_dao,
            promise_dao,
        }
    }

    /// Returns the promise history for the given order id. An unknown order
    /// yields a history with no order and no promises rather than an error;
    /// a blank order id is an argument-contract violation and fails.
    pub async fn get_promise_history(
        &self,
        order_id: &str,
    ) -> Result<PromiseHistory, ActivityError> {
        if order_id.trim().is_empty() {
            return Err(ActivityError::InvalidOrderId);
        }

        let Some(order) = self.order_dao.get(order_id).await else {
            tracing::debug!("no order found for {order_id}");
            return Ok(PromiseHistory::without_order());
        };

        // Only the first item's promises are surfaced, even for multi-item
        // orders.
        let representative = order.items.first().cloned();
        let order_id = order.order_id.clone();
        let mut history = PromiseHistory::new(order);

        if let Some(item) = representative {
            if let Some(promises) = self.promise_dao.get(&item.item_id).await {
                for mut promise in promises {
                    // Pool-backed items resolve through an internal template
                    // order id; every surfaced promise carries the fetched
                    // order's id.
                    promise.order_id = order_id.clone();
                    promise.set_confidence(item.confidence_tracked, item.confidence);
                    history.push(promise)?;
                }
            }
        }

        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::{OrderDao, PromiseDao};
    use parcel_authority::{OrderAuthority, ShippingPromiseAuthority};
    use parcel_core::PromiseSource;
    use parcel_data::SampleStore;

    fn activity() -> GetPromiseHistoryActivity {
        let store = Arc::new(SampleStore::build().unwrap());
        let authority = Arc::new(OrderAuthority::new(store.clone()));
        let sources: Vec<Arc<dyn PromiseSource>> =
            vec![Arc::new(ShippingPromiseAuthority::new(store))];
        GetPromiseHistoryActivity::new(
            Arc::new(OrderDao::new(authority.clone())),
            Arc::new(PromiseDao::new(authority, sources)),
        )
    }

    #[tokio::test]
    async fn test_blank_order_id_is_rejected() {
        let activity = activity();
        assert!(matches!(
            activity.get_promise_history("").await,
            Err(ActivityError::InvalidOrderId)
        ));
        assert!(matches!(
            activity.get_promise_history("   ").await,
            Err(ActivityError::InvalidOrderId)
        ));
    }

    #[tokio::test]
    async fn test_unknown_order_yields_empty_history() {
        let activity = activity();
        let history = activity
            .get_promise_history("900-0000000-0000000")
            .await
            .unwrap();
        assert!(history.order().is_none());
        assert!(history.promises().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_order_id_is_absence_not_error() {
        let activity = activity();
        let history = activity.get_promise_history("123-456").await.unwrap();
        assert!(history.order().is_none());
        assert!(history.promises().is_empty());
    }

    #[tokio::test]
    async fn test_first_item_is_the_representative() {
        let activity = activity();
        let history = activity
            .get_promise_history("900-3746403-0000002")
            .await
            .unwrap();

        let order = history.order().unwrap();
        assert_eq!(order.items.len(), 3);
        let first_item_id = order.items[0].item_id.clone();

        assert!(!history.promises().is_empty());
        for promise in history.promises() {
            assert_eq!(promise.item_id, first_item_id);
        }
    }

    #[tokio::test]
    async fn test_pooled_order_promises_carry_the_requested_order_id() {
        let activity = activity();
        let history = activity
            .get_promise_history("123-4567890-0000013")
            .await
            .unwrap();

        assert_eq!(history.order().unwrap().order_id, "123-4567890-0000013");
        assert!(!history.promises().is_empty());
        for promise in history.promises() {
            assert_eq!(promise.order_id, "123-4567890-0000013");
        }
    }

    #[tokio::test]
    async fn test_confidence_is_propagated_from_the_item() {
        let activity = activity();
        let history = activity
            .get_promise_history("900-3746401-0000001")
            .await
            .unwrap();

        let item = &history.order().unwrap().items[0].clone();
        for promise in history.promises() {
            assert_eq!(promise.confidence_tracked, item.confidence_tracked);
            if item.confidence_tracked {
                assert_eq!(promise.confidence, item.confidence);
            }
        }
    }
}
