pub mod order;
pub mod order_item;
