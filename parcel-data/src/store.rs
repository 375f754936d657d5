use crate::fixtures::{self, Fixture};
use crate::generators::OrderDataGenerator;
use crate::records::{OrderItemRecord, OrderRecord};
use parcel_core::validate;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Number of items in each generated pool order, in slot order.
const POOL_ITEM_COUNTS: &[usize] = &[1, 2, 2, 2, 3, 3, 4, 10];

/// 4 maps to the CLOSED order condition.
const CLOSED_ORDER_CONDITION: i32 = 4;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("generated data is inconsistent: {0}")]
    Inconsistent(String),
}

/// A fixed-size pool of internally consistent sample orders plus fixture
/// overrides. Populated exactly once, at construction; the built store is
/// immutable and safe to share behind an `Arc`.
///
/// Any well-formed order id maps onto the pool via its numeric suffix, so
/// the store answers for unboundedly many order ids out of a finite pool.
/// Item lookups only answer for items actually present in the pool or the
/// fixture catalog.
pub struct SampleStore {
    pool: Vec<OrderRecord>,
    items_by_id: HashMap<String, OrderItemRecord>,
    fixtures: BTreeMap<String, Fixture>,
    fixture_items_by_id: HashMap<String, OrderItemRecord>,
}

impl SampleStore {
    /// Generates the pool and the fixture catalog and builds the lookup
    /// indexes. Fails fast if any generated or fixture record violates the
    /// cross-record invariants; query-time consumers assume they hold.
    pub fn build() -> Result<Self, StoreError> {
        let mut generator = OrderDataGenerator::new();

        let mut pool = Vec::with_capacity(POOL_ITEM_COUNTS.len());
        for (index, &item_count) in POOL_ITEM_COUNTS.iter().enumerate() {
            pool.push(generator.build_order(&template_order_id(index), item_count));
        }

        let fixtures = fixtures::generate_fixtures(&mut generator);

        let mut fixture_items_by_id = HashMap::new();
        for fixture in fixtures.values() {
            let Some(order) = &fixture.order else {
                continue;
            };
            for item in &order.items {
                fixture_items_by_id.insert(item.item_id.clone(), item.clone());
            }
        }

        let mut items_by_id = HashMap::new();
        for order in &pool {
            for item in &order.items {
                items_by_id.insert(item.item_id.clone(), item.clone());
            }
        }

        let store = Self {
            pool,
            items_by_id,
            fixtures,
            fixture_items_by_id,
        };
        store.verify()?;

        tracing::info!(
            "sample store populated: {} pooled orders, {} fixtures, {} indexed items",
            store.pool.len(),
            store.fixtures.len(),
            store.items_by_id.len() + store.fixture_items_by_id.len()
        );

        Ok(store)
    }

    /// Order lookup. Fixtures take precedence; any other well-formed id is
    /// served by personalizing the pooled order its suffix hashes to.
    /// Malformed ids and the missing-order fixture return `None`.
    pub fn order(&self, order_id: &str) -> Option<OrderRecord> {
        if !validate::is_valid_order_id(order_id) {
            return None;
        }

        if let Some(fixture) = self.fixtures.get(order_id) {
            return fixture.order.clone();
        }

        let index = self.order_id_to_index(order_id)?;
        Some(self.pool[index].personalized(order_id))
    }

    /// Item lookup; fixture items take precedence over pooled items.
    pub fn item(&self, item_id: &str) -> Option<&OrderItemRecord> {
        self.fixture_items_by_id
            .get(item_id)
            .or_else(|| self.items_by_id.get(item_id))
    }

    /// Number of distinct pooled order records, which is also the modulus
    /// of the suffix hash.
    pub fn num_orders(&self) -> usize {
        self.pool.len()
    }

    pub fn fixtures(&self) -> &BTreeMap<String, Fixture> {
        &self.fixtures
    }

    /// Index of the pooled order serving the given id: the integer after
    /// the last hyphen, modulo the pool size. Keeping it this simple lets
    /// callers walk the pool by incrementing the suffix.
    fn order_id_to_index(&self, order_id: &str) -> Option<usize> {
        let suffix = order_id.rsplit('-').next()?;
        let suffix: usize = suffix.parse().ok()?;
        Some(suffix % self.pool.len())
    }

    fn verify(&self) -> Result<(), StoreError> {
        for order in &self.pool {
            verify_order(order)?;
        }
        for fixture in self.fixtures.values() {
            if let Some(order) = &fixture.order {
                verify_order(order)?;
            }
        }
        Ok(())
    }
}

fn template_order_id(index: usize) -> String {
    // Suffix equals the slot index, so the canonical id hashes back to its
    // own template.
    format!("777-0000000-{index:07}")
}

fn verify_order(order: &OrderRecord) -> Result<(), StoreError> {
    let order_id = &order.order_id;

    let mut quantities = HashMap::new();
    for item in &order.items {
        if item.order_id != *order_id {
            return Err(StoreError::Inconsistent(format!(
                "item {} of order {order_id} references order {}",
                item.item_id, item.order_id
            )));
        }
        if item.quantity <= 0 {
            return Err(StoreError::Inconsistent(format!(
                "item {} of order {order_id} has non-positive quantity",
                item.item_id
            )));
        }
        quantities.insert(item.item_id.as_str(), item.quantity);
    }

    let item_ids: BTreeSet<&str> = order.items.iter().map(|i| i.item_id.as_str()).collect();
    let mut shipped_ids = BTreeSet::new();

    for shipment in &order.shipments {
        let shipment_id = &shipment.shipment_id;

        if shipment.creation_date <= order.order_date {
            return Err(StoreError::Inconsistent(format!(
                "shipment {shipment_id} of order {order_id} created before the order"
            )));
        }
        match (shipment.ship_date, shipment.delivery_date) {
            (Some(ship), _) if ship <= shipment.creation_date => {
                return Err(StoreError::Inconsistent(format!(
                    "shipment {shipment_id} of order {order_id} shipped before creation"
                )));
            }
            (Some(ship), Some(delivery)) if delivery <= ship => {
                return Err(StoreError::Inconsistent(format!(
                    "shipment {shipment_id} of order {order_id} delivered before shipping"
                )));
            }
            (None, Some(_)) => {
                return Err(StoreError::Inconsistent(format!(
                    "shipment {shipment_id} of order {order_id} delivered without a ship date"
                )));
            }
            _ => {}
        }

        if order.condition == CLOSED_ORDER_CONDITION && shipment.delivery_date.is_none() {
            return Err(StoreError::Inconsistent(format!(
                "closed order {order_id} has undelivered shipment {shipment_id}"
            )));
        }

        for shipment_item in &shipment.items {
            let Some(&ordered_quantity) = quantities.get(shipment_item.item_id.as_str()) else {
                return Err(StoreError::Inconsistent(format!(
                    "shipment {shipment_id} of order {order_id} references unknown item {}",
                    shipment_item.item_id
                )));
            };
            if shipment_item.quantity > ordered_quantity {
                return Err(StoreError::Inconsistent(format!(
                    "shipment {shipment_id} of order {order_id} ships more of item {} than ordered",
                    shipment_item.item_id
                )));
            }
            shipped_ids.insert(shipment_item.item_id.as_str());
        }
    }

    if shipped_ids != item_ids {
        return Err(StoreError::Inconsistent(format!(
            "order {order_id} shipment items do not cover its item list exactly"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{ShipmentItemRecord, ShipmentRecord};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_build_succeeds_and_reports_pool_size() {
        let store = SampleStore::build().unwrap();
        assert_eq!(store.num_orders(), 8);
        assert_eq!(store.fixtures().len(), 8);
    }

    #[test]
    fn test_malformed_order_ids_return_none() {
        let store = SampleStore::build().unwrap();
        assert!(store.order("").is_none());
        assert!(store.order("not-an-order-id").is_none());
        assert!(store.order("900-3746401").is_none());
        assert!(store.order("900-3746401-000001").is_none());
    }

    #[test]
    fn test_missing_order_fixture_returns_none() {
        let store = SampleStore::build().unwrap();
        assert!(store.order("900-0000000-0000000").is_none());
    }

    #[test]
    fn test_lookup_is_deterministic() {
        let store = SampleStore::build().unwrap();
        let first = store.order("900-1234567-0000013").unwrap();
        let second = store.order("900-1234567-0000013").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_personalization_rewrites_only_ids() {
        let store = SampleStore::build().unwrap();

        // suffix 9 and the canonical suffix 1 both hash to pool slot 1
        let template = store.order("777-0000000-0000001").unwrap();
        let personalized = store.order("900-7654321-0000009").unwrap();

        assert_eq!(personalized.order_id, "900-7654321-0000009");
        assert_eq!(personalized.items.len(), template.items.len());
        for (theirs, ours) in template.items.iter().zip(&personalized.items) {
            assert_eq!(ours.order_id, "900-7654321-0000009");
            assert_eq!(ours.item_id, theirs.item_id);
            assert_eq!(ours.asin, theirs.asin);
            assert_eq!(ours.supply_code_date, theirs.supply_code_date);
        }
        assert_eq!(personalized.shipments, template.shipments);
        assert_eq!(personalized.order_date, template.order_date);
    }

    #[test]
    fn test_suffix_hash_walks_the_pool() {
        let store = SampleStore::build().unwrap();
        let sizes: Vec<usize> = (0..store.num_orders())
            .map(|n| {
                store
                    .order(&format!("111-1234567-{n:07}"))
                    .unwrap()
                    .items
                    .len()
            })
            .collect();
        assert_eq!(sizes, POOL_ITEM_COUNTS);
    }

    #[test]
    fn test_item_lookup_covers_pool_and_fixtures() {
        let store = SampleStore::build().unwrap();

        let pooled = store.order("111-1234567-0000000").unwrap();
        let pooled_item = &pooled.items[0];
        assert!(store.item(&pooled_item.item_id).is_some());

        let fixture_order = store.order("900-3746401-0000001").unwrap();
        let fixture_item = &fixture_order.items[0];
        let found = store.item(&fixture_item.item_id).unwrap();
        assert_eq!(found.order_id, "900-3746401-0000001");

        assert!(store.item("0").is_none());
    }

    #[test]
    fn test_every_order_satisfies_shipment_item_coverage() {
        let store = SampleStore::build().unwrap();

        let mut order_ids: Vec<String> = (0..store.num_orders())
            .map(|n| format!("111-1234567-{n:07}"))
            .collect();
        order_ids.extend(store.fixtures().keys().cloned());

        for order_id in order_ids {
            let Some(order) = store.order(&order_id) else {
                continue;
            };
            let item_ids: BTreeSet<&str> =
                order.items.iter().map(|i| i.item_id.as_str()).collect();
            let shipped: BTreeSet<&str> = order
                .shipments
                .iter()
                .flat_map(|s| s.items.iter().map(|i| i.item_id.as_str()))
                .collect();
            assert_eq!(shipped, item_ids, "order {order_id}");
        }
    }

    fn consistent_order() -> OrderRecord {
        let order_date = Utc.with_ymd_and_hms(2018, 7, 14, 0, 4, 11).unwrap();
        OrderRecord {
            order_id: "111-1234567-0000001".to_string(),
            customer_id: "375944385".to_string(),
            marketplace_id: "1 - US".to_string(),
            condition: CLOSED_ORDER_CONDITION,
            ship_option: "second".to_string(),
            order_date,
            items: vec![OrderItemRecord {
                item_id: "20655079937534".to_string(),
                order_id: "111-1234567-0000001".to_string(),
                asin: "B01MZEEFNX".to_string(),
                title: "Amazon Smart Plug".to_string(),
                quantity: 2,
                merchant_id: "14263472722".to_string(),
                approval_date: order_date,
                supply_code: "65".to_string(),
                supply_code_date: order_date,
                confidence_tracked: false,
                confidence: 0,
            }],
            shipments: vec![ShipmentRecord {
                shipment_id: "10350858571122".to_string(),
                zip: "98109".to_string(),
                condition: "6".to_string(),
                warehouse_id: "BFI7".to_string(),
                ship_option: "second".to_string(),
                creation_date: order_date + Duration::minutes(23),
                ship_date: Some(order_date + Duration::hours(7)),
                delivery_date: Some(order_date + Duration::days(2)),
                shipping_promise_active: false,
                fulfillment_promise_active: true,
                promises_agree: false,
                items: vec![ShipmentItemRecord {
                    item_id: "20655079937534".to_string(),
                    quantity: 2,
                }],
            }],
        }
    }

    #[test]
    fn test_verify_accepts_a_consistent_order() {
        assert!(verify_order(&consistent_order()).is_ok());
    }

    #[test]
    fn test_verify_rejects_orphan_shipment_items() {
        let mut order = consistent_order();
        order.shipments[0].items[0].item_id = "999999999999999".to_string();

        let error = verify_order(&order).unwrap_err();
        assert!(error.to_string().contains("unknown item"));
    }

    #[test]
    fn test_verify_rejects_delivery_without_ship_date() {
        let mut order = consistent_order();
        order.condition = 3;
        order.shipments[0].ship_date = None;

        let error = verify_order(&order).unwrap_err();
        assert!(error.to_string().contains("delivered without a ship date"));
    }

    #[test]
    fn test_verify_rejects_undelivered_closed_order() {
        let mut order = consistent_order();
        order.shipments[0].delivery_date = None;

        let error = verify_order(&order).unwrap_err();
        assert!(error.to_string().contains("undelivered shipment"));
    }

    #[test]
    fn test_verify_rejects_overshipped_quantity() {
        let mut order = consistent_order();
        order.shipments[0].items[0].quantity = 3;

        let error = verify_order(&order).unwrap_err();
        assert!(error.to_string().contains("more of item"));
    }

    #[test]
    fn test_verify_rejects_mismatched_item_owner() {
        let mut order = consistent_order();
        order.items[0].order_id = "222-1234567-0000001".to_string();

        let error = verify_order(&order).unwrap_err();
        assert!(error.to_string().contains("references order"));
    }

    #[test]
    fn test_closed_orders_are_fully_delivered() {
        let store = SampleStore::build().unwrap();
        for n in 0..store.num_orders() {
            let order = store.order(&format!("111-1234567-{n:07}")).unwrap();
            if order.condition == CLOSED_ORDER_CONDITION {
                for shipment in &order.shipments {
                    assert!(shipment.delivery_date.is_some());
                }
            }
        }
    }
}
