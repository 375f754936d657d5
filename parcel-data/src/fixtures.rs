use crate::generators::{utc_date, OrderDataGenerator, ShipmentDataGenerator};
use crate::records::{OrderItemRecord, OrderRecord, ShipmentItemRecord};
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

/// 3 maps to the AUTHORIZED order condition.
const AUTHORIZED_ORDER_CONDITION: i32 = 3;

/// A hand-authored scenario: a fully populated order, or no order at all
/// for the missing-order case, plus a description of what it scripts.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub order: Option<OrderRecord>,
    pub description: &'static str,
}

/// What time to base all fixture orders around, so the same records come
/// back for the same ids on every run. 2019-06-03T09:43:18-08:00.
fn date_origin() -> DateTime<Utc> {
    utc_date(2019, 6, 3, 17, 43, 18)
}

/// Builds the reserved scenarios that override the generated pool. Uses the
/// same generators as the pool so ids and dates stay internally consistent.
pub fn generate_fixtures(generator: &mut OrderDataGenerator) -> BTreeMap<String, Fixture> {
    let mut fixtures = BTreeMap::new();

    let mut insert = |fixtures: &mut BTreeMap<String, Fixture>, order: OrderRecord, description| {
        fixtures.insert(
            order.order_id.clone(),
            Fixture {
                order: Some(order),
                description,
            },
        );
    };

    // one item per order

    insert(
        &mut fixtures,
        single_item_not_shipped(generator, "900-3746401-0000001"),
        "single item, not shipped",
    );
    insert(
        &mut fixtures,
        single_item_shipped_not_delivered(generator, "900-3746401-0000002"),
        "single item, shipped, not delivered",
    );
    insert(
        &mut fixtures,
        single_item_shipped_and_delivered(generator, "900-3746401-0000003"),
        "single item, shipped and delivered",
    );

    // two items per order

    insert(
        &mut fixtures,
        two_items_two_shipments_one_unshipped_one_delivered(generator, "900-3746402-0000001"),
        "2 items/shipments, 1 unshipped, 1 delivered",
    );
    insert(
        &mut fixtures,
        two_items_one_shipment_unshipped_promises_disagree(generator, "900-3746402-0000002"),
        "2 items, 1 shipment promises disagree, not shipped",
    );

    // three items per order

    insert(
        &mut fixtures,
        three_items_two_shipments_one_shipped_disagree_one_delivered(
            generator,
            "900-3746403-0000001",
        ),
        "3 items, 2 shipments, 1 shipped promises disagree, 1 delivered",
    );
    insert(
        &mut fixtures,
        three_items_three_shipments_two_unshipped_one_delivered(generator, "900-3746403-0000002"),
        "3 items/shipments, 2 unshipped, 1 delivered promises disagree",
    );

    // valid but missing order id
    fixtures.insert(
        "900-0000000-0000000".to_string(),
        Fixture {
            order: None,
            description: "valid order ID but non-existing order",
        },
    );

    fixtures
}

fn base_order(
    generator: &mut OrderDataGenerator,
    order_id: &str,
    order_date: DateTime<Utc>,
    items: Vec<OrderItemRecord>,
    shipments: Vec<crate::records::ShipmentRecord>,
) -> OrderRecord {
    let mut order = generator.build_order(order_id, 0);
    order.order_date = order_date;
    order.condition = AUTHORIZED_ORDER_CONDITION;
    order.items = items;
    order.shipments = shipments;
    order
}

fn shipment_item(item: &OrderItemRecord) -> ShipmentItemRecord {
    ShipmentDataGenerator::shipment_item_for(item)
}

// CASES: one item per order

fn single_item_not_shipped(generator: &mut OrderDataGenerator, order_id: &str) -> OrderRecord {
    let order_date =
        date_origin() - Duration::hours(4) + Duration::minutes(33) + Duration::seconds(1);
    let item = generator.items.next_item(order_id);

    let mut shipment = generator.shipments.next_shipment(vec![shipment_item(&item)]);
    shipment.creation_date = order_date + Duration::minutes(20);
    shipment.ship_date = None;
    shipment.delivery_date = None;
    shipment.set_shipping_promise_active(true);

    base_order(generator, order_id, order_date, vec![item], vec![shipment])
}

fn single_item_shipped_not_delivered(
    generator: &mut OrderDataGenerator,
    order_id: &str,
) -> OrderRecord {
    let order_date =
        date_origin() - Duration::hours(8) - Duration::minutes(6) - Duration::seconds(22);
    let item = generator.items.next_item(order_id);

    let mut shipment = generator.shipments.next_shipment(vec![shipment_item(&item)]);
    shipment.creation_date = order_date + Duration::minutes(20);
    shipment.ship_date = Some(order_date + Duration::hours(1));
    shipment.delivery_date = None;
    shipment.promises_agree = true;
    shipment.set_shipping_promise_active(false);

    base_order(generator, order_id, order_date, vec![item], vec![shipment])
}

fn single_item_shipped_and_delivered(
    generator: &mut OrderDataGenerator,
    order_id: &str,
) -> OrderRecord {
    let order_date =
        date_origin() - Duration::hours(8) + Duration::minutes(13) - Duration::seconds(9);
    let item = generator.items.next_item(order_id);

    let mut shipment = generator.shipments.next_shipment(vec![shipment_item(&item)]);
    shipment.creation_date = order_date + Duration::minutes(20);
    shipment.ship_date = Some(order_date + Duration::hours(1));
    shipment.delivery_date = Some(order_date + Duration::hours(36));
    shipment.promises_agree = true;
    shipment.set_shipping_promise_active(false);

    base_order(generator, order_id, order_date, vec![item], vec![shipment])
}

// CASES: two items per order

fn two_items_two_shipments_one_unshipped_one_delivered(
    generator: &mut OrderDataGenerator,
    order_id: &str,
) -> OrderRecord {
    let order_date = date_origin() - Duration::hours(8);
    let unshipped_item = generator.items.next_item(order_id);
    let delivered_item = generator.items.next_item(order_id);

    let mut unshipped = generator
        .shipments
        .next_shipment(vec![shipment_item(&unshipped_item)]);
    unshipped.creation_date = order_date + Duration::hours(2);
    unshipped.ship_date = None;
    unshipped.delivery_date = None;
    unshipped.promises_agree = true;
    unshipped.set_shipping_promise_active(true);

    let mut delivered = generator
        .shipments
        .next_shipment(vec![shipment_item(&delivered_item)]);
    delivered.creation_date = order_date + Duration::minutes(45);
    delivered.ship_date = Some(order_date + Duration::hours(6));
    delivered.delivery_date = Some(order_date + Duration::hours(72));
    delivered.set_shipping_promise_active(false);

    base_order(
        generator,
        order_id,
        order_date,
        vec![unshipped_item, delivered_item],
        vec![unshipped, delivered],
    )
}

fn two_items_one_shipment_unshipped_promises_disagree(
    generator: &mut OrderDataGenerator,
    order_id: &str,
) -> OrderRecord {
    let order_date = date_origin() - Duration::hours(6) + Duration::minutes(37);
    let items = vec![
        generator.items.next_item(order_id),
        generator.items.next_item(order_id),
    ];

    let mut shipment = generator
        .shipments
        .next_shipment(items.iter().map(shipment_item).collect());
    shipment.creation_date = order_date + Duration::hours(3) + Duration::seconds(11);
    shipment.ship_date = None;
    shipment.delivery_date = None;
    shipment.promises_agree = false;
    shipment.set_shipping_promise_active(false);

    base_order(generator, order_id, order_date, items, vec![shipment])
}

// CASES: three items per order

fn three_items_two_shipments_one_shipped_disagree_one_delivered(
    generator: &mut OrderDataGenerator,
    order_id: &str,
) -> OrderRecord {
    let order_date =
        date_origin() - Duration::hours(46) - Duration::minutes(12) + Duration::seconds(18);

    let shipped_items = vec![
        generator.items.next_item(order_id),
        generator.items.next_item(order_id),
    ];
    let delivered_item = generator.items.next_item(order_id);

    let mut shipped = generator
        .shipments
        .next_shipment(shipped_items.iter().map(shipment_item).collect());
    shipped.creation_date =
        order_date + Duration::hours(8) + Duration::minutes(1) + Duration::seconds(29);
    shipped.ship_date = Some(order_date + Duration::hours(11) + Duration::minutes(10));
    shipped.delivery_date = None;
    shipped.promises_agree = false;
    shipped.set_shipping_promise_active(false);

    let mut delivered = generator
        .shipments
        .next_shipment(vec![shipment_item(&delivered_item)]);
    delivered.creation_date = order_date + Duration::hours(2);
    delivered.ship_date = Some(order_date + Duration::hours(6) + Duration::minutes(27));
    delivered.delivery_date = Some(order_date + Duration::hours(47));
    delivered.promises_agree = true;
    delivered.set_shipping_promise_active(false);

    let mut items = shipped_items;
    items.push(delivered_item);

    base_order(generator, order_id, order_date, items, vec![shipped, delivered])
}

fn three_items_three_shipments_two_unshipped_one_delivered(
    generator: &mut OrderDataGenerator,
    order_id: &str,
) -> OrderRecord {
    let order_date =
        date_origin() - Duration::hours(71) - Duration::minutes(44) + Duration::seconds(8);

    let unshipped_item_1 = generator.items.next_item(order_id);
    let unshipped_item_2 = generator.items.next_item(order_id);
    let delivered_item = generator.items.next_item(order_id);

    let mut unshipped_1 = generator
        .shipments
        .next_shipment(vec![shipment_item(&unshipped_item_1)]);
    unshipped_1.creation_date =
        order_date + Duration::hours(6) + Duration::minutes(5) + Duration::seconds(11);
    unshipped_1.ship_date = None;
    unshipped_1.delivery_date = None;
    unshipped_1.promises_agree = true;
    unshipped_1.set_shipping_promise_active(true);

    let mut unshipped_2 = generator
        .shipments
        .next_shipment(vec![shipment_item(&unshipped_item_2)]);
    unshipped_2.creation_date = order_date + Duration::hours(2) + Duration::seconds(41);
    unshipped_2.ship_date = None;
    unshipped_2.delivery_date = None;
    unshipped_2.promises_agree = true;
    unshipped_2.set_shipping_promise_active(true);

    let mut delivered_3 = generator
        .shipments
        .next_shipment(vec![shipment_item(&delivered_item)]);
    delivered_3.creation_date = order_date + Duration::minutes(17) + Duration::seconds(1);
    delivered_3.ship_date = Some(order_date + Duration::hours(2) + Duration::minutes(18));
    delivered_3.delivery_date = Some(order_date + Duration::hours(18) + Duration::seconds(10));
    delivered_3.promises_agree = false;
    delivered_3.set_shipping_promise_active(false);

    base_order(
        generator,
        order_id,
        order_date,
        vec![unshipped_item_1, unshipped_item_2, delivered_item],
        vec![unshipped_1, unshipped_2, delivered_3],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_catalog_contents() {
        let mut generator = OrderDataGenerator::new();
        let fixtures = generate_fixtures(&mut generator);

        assert_eq!(fixtures.len(), 8);
        assert!(fixtures["900-0000000-0000000"].order.is_none());

        for (order_id, fixture) in &fixtures {
            if let Some(order) = &fixture.order {
                assert_eq!(&order.order_id, order_id);
                for item in &order.items {
                    assert_eq!(&item.order_id, order_id);
                }
            }
        }
    }

    #[test]
    fn test_not_shipped_fixture_is_unshipped_with_active_shipping_promise() {
        let mut generator = OrderDataGenerator::new();
        let fixtures = generate_fixtures(&mut generator);

        let order = fixtures["900-3746401-0000001"].order.as_ref().unwrap();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.shipments.len(), 1);

        let shipment = &order.shipments[0];
        assert!(shipment.ship_date.is_none());
        assert!(shipment.delivery_date.is_none());
        assert!(shipment.shipping_promise_active);
        assert!(!shipment.fulfillment_promise_active);
    }

    #[test]
    fn test_delivered_fixture_dates_are_ordered() {
        let mut generator = OrderDataGenerator::new();
        let fixtures = generate_fixtures(&mut generator);

        let order = fixtures["900-3746401-0000003"].order.as_ref().unwrap();
        let shipment = &order.shipments[0];
        assert!(shipment.creation_date > order.order_date);
        assert!(shipment.ship_date.unwrap() > shipment.creation_date);
        assert!(shipment.delivery_date.unwrap() > shipment.ship_date.unwrap());
    }

    #[test]
    fn test_disagree_fixture_flags() {
        let mut generator = OrderDataGenerator::new();
        let fixtures = generate_fixtures(&mut generator);

        let order = fixtures["900-3746402-0000002"].order.as_ref().unwrap();
        assert_eq!(order.shipments.len(), 1);
        let shipment = &order.shipments[0];
        assert!(!shipment.promises_agree);
        assert!(!shipment.shipping_promise_active);
        assert!(shipment.fulfillment_promise_active);
        assert_eq!(shipment.items.len(), 2);
    }
}
