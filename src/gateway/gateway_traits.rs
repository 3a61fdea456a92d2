use async_trait::async_trait;

use crate::gateway::gateway_errors::GatewayError;
use crate::gateway::gateway_model::{
    CheckoutSummary, CloseSessionRequest, CreatedOrder, CreateOrderRequest, Discount,
    MethodTransactions, OpenSessionRequest, OrderItemRequest, OrderType, PaymentMethod,
    PaymentRequest, SessionDetails,
};
use crate::money::RoundingConfig;

/// Typed client for the restaurant backend, one method per remote operation.
///
/// Implementations own request construction, auth-header attachment and
/// response decoding, and surface typed errors instead of panicking across
/// this boundary. They do not retry; callers choose their own fallbacks.
#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// Active payment channels. Inactive rows are filtered out and the
    /// legacy code is derived from the description.
    async fn fetch_payment_methods(&self) -> Result<Vec<PaymentMethod>, GatewayError>;

    async fn fetch_session(&self, session_id: i64) -> Result<SessionDetails, GatewayError>;

    /// Payments recorded for one method in one session. Independently
    /// callable per method; the reconciliation fan-out depends on that.
    async fn fetch_transactions_for_method(
        &self,
        session_id: i64,
        method_id: &str,
    ) -> Result<MethodTransactions, GatewayError>;

    /// Opens a session; returns the new session id when the backend sends one.
    async fn open_session(&self, request: &OpenSessionRequest)
        -> Result<Option<i64>, GatewayError>;

    async fn close_session(
        &self,
        session_id: i64,
        request: &CloseSessionRequest,
    ) -> Result<(), GatewayError>;

    async fn fetch_denominations(&self) -> Result<Vec<i64>, GatewayError>;

    async fn fetch_rounding_config(&self) -> Result<RoundingConfig, GatewayError>;

    async fn fetch_discounts(&self) -> Result<Vec<Discount>, GatewayError>;

    async fn fetch_order_types(&self) -> Result<Vec<OrderType>, GatewayError>;

    async fn create_order(&self, request: &CreateOrderRequest)
        -> Result<CreatedOrder, GatewayError>;

    async fn add_order_item(
        &self,
        order_id: i64,
        item: &OrderItemRequest,
    ) -> Result<(), GatewayError>;

    async fn checkout(
        &self,
        order_id: i64,
        discount_id: Option<i64>,
    ) -> Result<CheckoutSummary, GatewayError>;

    async fn submit_payment(&self, request: &PaymentRequest) -> Result<(), GatewayError>;
}
