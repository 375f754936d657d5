use crate::records::{OrderItemRecord, OrderRecord, ShipmentItemRecord, ShipmentRecord};
use chrono::{DateTime, Duration, Months, TimeZone, Utc};
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Shared step applied to every rolling date stream, keeping independently
/// generated records temporally ordered relative to each other.
const DATE_STEP_HOURS: i64 = 9;

const DEFAULT_SHIP_OPTION: &str = "second";
const DEFAULT_MARKETPLACE_ID: &str = "1 - US";
/// 4 maps to the CLOSED order condition.
const DEFAULT_ORDER_CONDITION: i32 = 4;
const DEFAULT_SUPPLY_CODE: &str = "65";
const DEFAULT_ZIP: &str = "98109";
const DEFAULT_SHIPMENT_CONDITION: &str = "6";

/// Items are grouped into shipments by consuming these group sizes in order
/// until the order's items are exhausted.
const SHIPMENT_GROUPING: &[usize] = &[1, 2, 1, 4, 1000];

const WAREHOUSES: &[&str] = &["BFI4", "BFI7", "SEA8"];

/// Fixed ASIN / product title catalog the item generator rotates through.
const ASIN_CATALOG: &[(&str, &str)] = &[
    ("B01MZEEFNX", "Amazon Smart Plug - Simple set up, works with Alexa"),
    ("B07BHHC4S1", "Architects of the West Kingdom"),
    ("1984822179", "Normal People: A Novel"),
    (
        "B000LQ78YY",
        "Stonepoint Emergency LED Road Flare Kit - Set of 3 Super Bright LED Roadside Beacons with Magnetic Base",
    ),
    ("B0145IWKBE", "AmazonBasics Ladder Toss Set with Soft Carrying Case"),
    (
        "B07MVQL5RT",
        "Greenworks 21-Inch 40V Brushless Push Mower, 6AH Battery and Charger Included, M-210",
    ),
    ("B0019QEB86", "Miracle-Gro Indoor Plant Food, 48-Spikes"),
    ("B07FDNSJ63", "Mamma Mia! 2-Movie Collection"),
    ("B01BKTAY2I", "My Doggy Place - Ultra Absorbent Microfiber Dog Door Mat"),
    (
        "B06XYZBCYP",
        "Levoit Kana Himalayan/Hymilain Sea, Pink Crystal Salt Rock Lamp, Night Light",
    ),
];

/// An item is confidence-tracked iff its asin starts with "B0" followed by
/// an odd digit.
static CONFIDENCE_TRACKING_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^B0[13579]").expect("confidence pattern compiles"));

pub(crate) fn initial_order_date() -> DateTime<Utc> {
    utc_date(2018, 7, 13, 15, 4, 11)
}

pub(crate) fn utc_date(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .single()
        .expect("in-range utc timestamp")
}

fn date_step() -> Duration {
    Duration::hours(DATE_STEP_HOURS)
}

/// Produces deterministic, monotonically varying order item records. Every
/// call steps the private counters by a fixed amount, so replaying from a
/// fresh generator reproduces the same sequence.
pub struct ItemDataGenerator {
    current_item_id: u64,
    current_merchant_id: u64,
    current_supply_code_date: DateTime<Utc>,
    current_approval_date: DateTime<Utc>,
    asin_index: usize,
}

impl ItemDataGenerator {
    pub fn new() -> Self {
        Self {
            current_item_id: 20_655_079_937_521,
            current_merchant_id: 14_263_472_715,
            current_supply_code_date: initial_order_date(),
            current_approval_date: utc_date(2009, 8, 4, 11, 8, 5),
            asin_index: 0,
        }
    }

    /// Next item record, owned by the given order.
    pub fn next_item(&mut self, order_id: &str) -> OrderItemRecord {
        self.current_item_id += 13;
        self.current_merchant_id += 7;
        self.current_supply_code_date = self.current_supply_code_date + date_step();
        self.current_approval_date = self.current_approval_date + Months::new(1);
        self.asin_index = (self.asin_index + 1) % ASIN_CATALOG.len();

        let (asin, title) = ASIN_CATALOG[self.asin_index];
        let confidence_tracked = is_confidence_tracked(asin);

        OrderItemRecord {
            item_id: self.current_item_id.to_string(),
            order_id: order_id.to_string(),
            asin: asin.to_string(),
            title: title.to_string(),
            quantity: 1,
            merchant_id: self.current_merchant_id.to_string(),
            approval_date: self.current_approval_date,
            supply_code: DEFAULT_SUPPLY_CODE.to_string(),
            supply_code_date: self.current_supply_code_date,
            confidence_tracked,
            confidence: if confidence_tracked {
                tracked_confidence(asin)
            } else {
                untracked_filler(asin)
            },
        }
    }
}

impl Default for ItemDataGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn is_confidence_tracked(asin: &str) -> bool {
    CONFIDENCE_TRACKING_PATTERN.is_match(asin)
}

/// Confidence for a tracked item: drawn from a PRNG seeded with the asin's
/// third character, so the same asin always scores the same, in [-100, 100].
fn tracked_confidence(asin: &str) -> i32 {
    let seed = asin.as_bytes()[2] as u64;
    let mut rng = StdRng::seed_from_u64(seed);
    rng.gen_range(-100..=100)
}

/// Filler mimicking uninitialized memory. Meaningless by contract; consumers
/// must ignore it whenever the item is not confidence-tracked.
fn untracked_filler(asin: &str) -> i32 {
    let mut hasher = DefaultHasher::new();
    asin.hash(&mut hasher);
    (hasher.finish() % 101) as i32
}

/// Produces deterministic shipment records. Ship and delivery dates default
/// to the generator's rolling streams; fixture builders override them to
/// script unshipped or in-flight shipments.
pub struct ShipmentDataGenerator {
    current_shipment_id: u64,
    current_creation_date: DateTime<Utc>,
    current_ship_date: DateTime<Utc>,
    current_delivery_date: DateTime<Utc>,
    warehouse_index: usize,
}

impl ShipmentDataGenerator {
    pub fn new() -> Self {
        Self {
            current_shipment_id: 10_350_858_571_111,
            current_creation_date: initial_order_date() + Duration::minutes(23),
            current_ship_date: initial_order_date() + Duration::hours(7),
            current_delivery_date: initial_order_date() + Duration::days(2),
            warehouse_index: 0,
        }
    }

    /// Next shipment covering the given items.
    pub fn next_shipment(&mut self, items: Vec<ShipmentItemRecord>) -> ShipmentRecord {
        self.current_shipment_id += 11;
        self.current_creation_date = self.current_creation_date + date_step();
        self.current_ship_date = self.current_ship_date + date_step();
        self.current_delivery_date = self.current_delivery_date + date_step();
        self.warehouse_index = (self.warehouse_index + 1) % WAREHOUSES.len();

        ShipmentRecord {
            shipment_id: self.current_shipment_id.to_string(),
            zip: DEFAULT_ZIP.to_string(),
            condition: DEFAULT_SHIPMENT_CONDITION.to_string(),
            warehouse_id: WAREHOUSES[self.warehouse_index].to_string(),
            ship_option: DEFAULT_SHIP_OPTION.to_string(),
            creation_date: self.current_creation_date,
            ship_date: Some(self.current_ship_date),
            delivery_date: Some(self.current_delivery_date),
            shipping_promise_active: false,
            fulfillment_promise_active: true,
            promises_agree: self.current_shipment_id % 3 == 0,
            items,
        }
    }

    /// Shipment item covering the full ordered quantity of the given item.
    pub fn shipment_item_for(item: &OrderItemRecord) -> ShipmentItemRecord {
        ShipmentItemRecord {
            item_id: item.item_id.clone(),
            quantity: item.quantity,
        }
    }
}

impl Default for ShipmentDataGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Produces complete order records, delegating to the item and shipment
/// generators it owns. The sample store's population routine is the sole
/// owner of an instance, so no synchronization is needed around the
/// counters.
pub struct OrderDataGenerator {
    current_customer_id: u64,
    current_order_date: DateTime<Utc>,
    pub(crate) items: ItemDataGenerator,
    pub(crate) shipments: ShipmentDataGenerator,
}

impl OrderDataGenerator {
    pub fn new() -> Self {
        Self {
            current_customer_id: 375_944_378,
            current_order_date: initial_order_date(),
            items: ItemDataGenerator::new(),
            shipments: ShipmentDataGenerator::new(),
        }
    }

    /// Builds an order with the given number of generated items, partitioned
    /// into shipments by the fixed grouping pattern. Callers that assemble
    /// items and shipments themselves pass an item count of zero.
    pub fn build_order(&mut self, order_id: &str, item_count: usize) -> OrderRecord {
        let items: Vec<OrderItemRecord> =
            (0..item_count).map(|_| self.items.next_item(order_id)).collect();

        let mut shipments = Vec::new();
        let mut remaining = items.iter();
        for &group_size in SHIPMENT_GROUPING {
            let group: Vec<ShipmentItemRecord> = remaining
                .by_ref()
                .take(group_size)
                .map(ShipmentDataGenerator::shipment_item_for)
                .collect();
            if group.is_empty() {
                break;
            }
            shipments.push(self.shipments.next_shipment(group));
        }

        self.current_customer_id += 7;
        self.current_order_date = self.current_order_date + date_step();

        OrderRecord {
            order_id: order_id.to_string(),
            customer_id: self.current_customer_id.to_string(),
            marketplace_id: DEFAULT_MARKETPLACE_ID.to_string(),
            condition: DEFAULT_ORDER_CONDITION,
            ship_option: DEFAULT_SHIP_OPTION.to_string(),
            order_date: self.current_order_date,
            items,
            shipments,
        }
    }
}

impl Default for OrderDataGenerator {
    fn default() -> Self {
        Self::new()
    }
}
