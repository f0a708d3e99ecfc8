pub mod order;

pub use order::{NewOrder, Order, OrderType};
