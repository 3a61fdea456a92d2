//! Opening a cashier session: load the denomination list for the till form,
//! then submit the counted opening amount.

use std::sync::Arc;

use log::warn;
use rust_decimal::Decimal;

use crate::constants::FALLBACK_DENOMINATIONS;
use crate::context::SessionContext;
use crate::gateway::{BackendGateway, OpenSessionRequest};
use crate::sessions::sessions_errors::SessionError;
use crate::sessions::sessions_model::TillCount;

pub struct OpenSessionService {
    gateway: Arc<dyn BackendGateway>,
    context: Arc<SessionContext>,
}

impl OpenSessionService {
    pub fn new(gateway: Arc<dyn BackendGateway>, context: Arc<SessionContext>) -> Self {
        Self { gateway, context }
    }

    /// Builds the till form from the server's denomination list, falling back
    /// to the standard rupiah denominations when the fetch fails or comes
    /// back empty.
    pub async fn load_till(&self) -> TillCount {
        match self.gateway.fetch_denominations().await {
            Ok(denominations) if !denominations.is_empty() => TillCount::new(&denominations),
            Ok(_) => {
                warn!("denomination list empty, using fallback denominations");
                TillCount::new(&FALLBACK_DENOMINATIONS)
            }
            Err(error) => {
                warn!("failed to fetch denominations, using fallback: {error}");
                TillCount::new(&FALLBACK_DENOMINATIONS)
            }
        }
    }

    /// Opens a session with the counted till and records the returned
    /// session id as active. Returns the opening amount that was submitted.
    pub async fn open(
        &self,
        user_id: i64,
        till: &TillCount,
        notes: String,
    ) -> Result<Decimal, SessionError> {
        let opening_amount = till.total();
        let request = OpenSessionRequest {
            user_id,
            opening_amount,
            notes,
        };

        if let Some(session_id) = self.gateway.open_session(&request).await? {
            self.context.set_active_session_id(Some(session_id));
        }
        Ok(opening_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    use crate::gateway::{
        CheckoutSummary, CloseSessionRequest, CreatedOrder, CreateOrderRequest, Discount,
        GatewayError, MethodTransactions, OrderItemRequest, OrderType, PaymentMethod,
        PaymentRequest, SessionDetails,
    };
    use crate::money::RoundingConfig;

    #[derive(Default)]
    struct MockGateway {
        denominations: Option<Vec<i64>>,
        opened_session_id: Option<i64>,
        open_calls: Mutex<Vec<OpenSessionRequest>>,
    }

    #[async_trait]
    impl BackendGateway for MockGateway {
        async fn fetch_payment_methods(&self) -> Result<Vec<PaymentMethod>, GatewayError> {
            Err(GatewayError::Decode("not used".to_string()))
        }

        async fn fetch_session(&self, _session_id: i64) -> Result<SessionDetails, GatewayError> {
            Err(GatewayError::Decode("not used".to_string()))
        }

        async fn fetch_transactions_for_method(
            &self,
            _session_id: i64,
            _method_id: &str,
        ) -> Result<MethodTransactions, GatewayError> {
            Err(GatewayError::Decode("not used".to_string()))
        }

        async fn open_session(
            &self,
            request: &OpenSessionRequest,
        ) -> Result<Option<i64>, GatewayError> {
            self.open_calls.lock().unwrap().push(request.clone());
            Ok(self.opened_session_id)
        }

        async fn close_session(
            &self,
            _session_id: i64,
            _request: &CloseSessionRequest,
        ) -> Result<(), GatewayError> {
            Err(GatewayError::Decode("not used".to_string()))
        }

        async fn fetch_denominations(&self) -> Result<Vec<i64>, GatewayError> {
            self.denominations
                .clone()
                .ok_or_else(|| GatewayError::Network("denominations down".to_string()))
        }

        async fn fetch_rounding_config(&self) -> Result<RoundingConfig, GatewayError> {
            Err(GatewayError::Decode("not used".to_string()))
        }

        async fn fetch_discounts(&self) -> Result<Vec<Discount>, GatewayError> {
            Err(GatewayError::Decode("not used".to_string()))
        }

        async fn fetch_order_types(&self) -> Result<Vec<OrderType>, GatewayError> {
            Err(GatewayError::Decode("not used".to_string()))
        }

        async fn create_order(
            &self,
            _request: &CreateOrderRequest,
        ) -> Result<CreatedOrder, GatewayError> {
            Err(GatewayError::Decode("not used".to_string()))
        }

        async fn add_order_item(
            &self,
            _order_id: i64,
            _item: &OrderItemRequest,
        ) -> Result<(), GatewayError> {
            Err(GatewayError::Decode("not used".to_string()))
        }

        async fn checkout(
            &self,
            _order_id: i64,
            _discount_id: Option<i64>,
        ) -> Result<CheckoutSummary, GatewayError> {
            Err(GatewayError::Decode("not used".to_string()))
        }

        async fn submit_payment(&self, _request: &PaymentRequest) -> Result<(), GatewayError> {
            Err(GatewayError::Decode("not used".to_string()))
        }
    }

    #[tokio::test]
    async fn till_uses_server_denominations_when_available() {
        let gateway = Arc::new(MockGateway {
            denominations: Some(vec![75_000, 5_000]),
            ..Default::default()
        });
        let service = OpenSessionService::new(gateway, Arc::new(SessionContext::new()));

        let till = service.load_till().await;
        let values: Vec<i64> = till.rows().iter().map(|row| row.value).collect();
        assert_eq!(values, vec![75_000, 5_000]);
    }

    #[tokio::test]
    async fn till_falls_back_when_the_fetch_fails() {
        let gateway = Arc::new(MockGateway::default());
        let service = OpenSessionService::new(gateway, Arc::new(SessionContext::new()));

        let till = service.load_till().await;
        assert_eq!(till.rows().len(), FALLBACK_DENOMINATIONS.len());
        assert_eq!(till.rows()[0].value, FALLBACK_DENOMINATIONS[0]);
    }

    #[tokio::test]
    async fn till_falls_back_when_the_list_is_empty() {
        let gateway = Arc::new(MockGateway {
            denominations: Some(Vec::new()),
            ..Default::default()
        });
        let service = OpenSessionService::new(gateway, Arc::new(SessionContext::new()));

        let till = service.load_till().await;
        assert_eq!(till.rows().len(), FALLBACK_DENOMINATIONS.len());
    }

    #[tokio::test]
    async fn opening_records_the_returned_session_id() {
        let gateway = Arc::new(MockGateway {
            opened_session_id: Some(42),
            ..Default::default()
        });
        let context = Arc::new(SessionContext::new());
        let service = OpenSessionService::new(gateway.clone(), context.clone());

        let mut till = TillCount::new(&[100_000, 1_000]);
        till.set_quantity(100_000, "2");
        till.set_quantity(1_000, "10");

        let opening = service.open(5, &till, "morning shift".to_string()).await.unwrap();
        assert_eq!(opening, dec!(210000));
        assert_eq!(context.active_session_id(), Some(42));

        let calls = gateway.open_calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].user_id, 5);
        assert_eq!(calls[0].opening_amount, dec!(210000));
    }

    #[tokio::test]
    async fn opening_without_a_returned_id_leaves_the_context_clear() {
        let gateway = Arc::new(MockGateway::default());
        let context = Arc::new(SessionContext::new());
        let service = OpenSessionService::new(gateway, context.clone());

        let till = TillCount::new(&[1_000]);
        service.open(5, &till, String::new()).await.unwrap();
        assert_eq!(context.active_session_id(), None);
    }
}
