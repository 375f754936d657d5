pub mod activity;
pub mod dao;

pub use activity::{ActivityError, GetPromiseHistoryActivity};
pub use dao::{OrderDao, PromiseDao};
