pub mod fulfillment;
pub mod order;
pub mod shipping;

pub use fulfillment::FulfillmentPromiseAuthority;
pub use order::OrderAuthority;
pub use shipping::ShippingPromiseAuthority;
