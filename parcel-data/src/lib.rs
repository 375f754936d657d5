pub mod fixtures;
pub mod generators;
pub mod records;
pub mod store;

pub use fixtures::Fixture;
pub use generators::{ItemDataGenerator, OrderDataGenerator, ShipmentDataGenerator};
pub use records::{OrderItemRecord, OrderRecord, ShipmentItemRecord, ShipmentRecord};
pub use store::{SampleStore, StoreError};
