pub mod db_init;
pub mod order_store;
pub mod validation;

pub use order_store::OrderStore;
