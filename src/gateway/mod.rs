pub mod gateway_client;
pub mod gateway_errors;
pub mod gateway_model;
pub mod gateway_traits;

pub use gateway_client::HttpGateway;
pub use gateway_errors::GatewayError;
pub use gateway_model::{
    CheckoutSummary, CloseSessionRequest, CreatedOrder, CreateOrderRequest, Discount,
    MethodTransactions, OpenSessionRequest, OrderItemRequest, OrderType, PaymentMethod,
    PaymentRequest, SessionDetails,
};
pub use gateway_traits::BackendGateway;
