pub mod orders_errors;
pub mod orders_model;
pub mod orders_service;

pub use orders_errors::OrderError;
pub use orders_model::{change_due, payment_valid, CheckoutTotals};
pub use orders_service::{CheckoutService, OrderService};
