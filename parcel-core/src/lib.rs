pub mod condition;
pub mod dao;
pub mod models;
pub mod promise;
pub mod validate;

pub use condition::OrderCondition;
pub use dao::{PromiseSource, ReadOnlyDao};
pub use models::{Order, OrderItem, Shipment, ShipmentItem};
pub use promise::{HistoryError, Promise, PromiseHistory};
