//! reqwest implementation of [`BackendGateway`].

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use log::debug;
use reqwest::{Client, Method, RequestBuilder};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use crate::constants::API_BASE_URL;
use crate::context::SessionContext;
use crate::gateway::gateway_errors::GatewayError;
use crate::gateway::gateway_model::{
    ApiEnvelope, CheckoutData, CheckoutSummary, CloseSessionRequest, CreatedOrder,
    CreatedOrderData, CreateOrderRequest, DenominationListData, Discount, MethodTransactions,
    ModePaymentData, OpenedSessionData, OpenSessionRequest, OrderItemRequest, OrderType,
    PaymentMethod, PaymentModeData, PaymentRequest, RoundingData, SessionData, SessionDetails,
};
use crate::gateway::gateway_traits::BackendGateway;
use crate::money::RoundingConfig;

pub struct HttpGateway {
    client: Client,
    base_url: String,
    context: Arc<SessionContext>,
}

impl HttpGateway {
    pub fn new(context: Arc<SessionContext>) -> Self {
        Self::with_base_url(API_BASE_URL, context)
    }

    pub fn with_base_url(base_url: impl Into<String>, context: Arc<SessionContext>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            context,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        let mut builder = self.client.request(method, url);
        if let Some(token) = self.context.auth_token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Sends the request, turning transport failures into `Network` errors
    /// and non-2xx responses into `Http` errors. Returns the raw 2xx body.
    async fn send_checked(&self, builder: RequestBuilder) -> Result<String, GatewayError> {
        let response = builder
            .send()
            .await
            .map_err(|error| GatewayError::Network(error.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| GatewayError::Network(error.to_string()))?;

        if !status.is_success() {
            return Err(GatewayError::Http {
                code: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    /// Sends the request and decodes the `{status, message?, data?}` envelope.
    async fn send_envelope<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<ApiEnvelope<T>, GatewayError> {
        let body = self.send_checked(builder).await?;
        let envelope = serde_json::from_str(&body)?;
        Ok(envelope)
    }

    /// Envelope variant for endpoints that must report `status == "success"`.
    async fn expect_success<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, GatewayError> {
        let envelope = self.send_envelope::<T>(builder).await?;
        if !envelope.is_success() {
            return Err(GatewayError::ApiLogic(envelope.message_or_default()));
        }
        envelope
            .data
            .ok_or_else(|| GatewayError::Decode("response data is missing".to_string()))
    }
}

/// Mines an open-session body for the optional session id. The body is not
/// part of the success contract, so empty or non-JSON payloads yield `None`
/// rather than an error.
fn opened_session_id(body: &str) -> Option<i64> {
    serde_json::from_str::<ApiEnvelope<OpenedSessionData>>(body)
        .ok()
        .and_then(|envelope| envelope.data)
        .and_then(|data| data.id)
}

fn parse_opened_at(raw: Option<&str>) -> DateTime<Utc> {
    let raw = match raw {
        Some(value) if !value.trim().is_empty() => value.trim(),
        // The backend sometimes omits the timestamp; fall back to now, the
        // same substitution the close screen has always displayed.
        _ => return Utc::now(),
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Utc);
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return parsed.and_utc();
    }

    debug!("unparseable opened_at '{raw}', substituting current time");
    Utc::now()
}

#[async_trait]
impl BackendGateway for HttpGateway {
    async fn fetch_payment_methods(&self) -> Result<Vec<PaymentMethod>, GatewayError> {
        let builder = self.request(Method::GET, "/payment-modes");
        let modes: Vec<PaymentModeData> = self.expect_success(builder).await?;

        Ok(modes
            .into_iter()
            .filter(|mode| mode.is_active)
            .map(|mode| {
                let code = PaymentMethod::code_from_description(&mode.description).to_string();
                PaymentMethod {
                    id: mode.id.to_string_id(),
                    name: mode.description,
                    code,
                }
            })
            .collect())
    }

    async fn fetch_session(&self, session_id: i64) -> Result<SessionDetails, GatewayError> {
        let builder = self.request(Method::GET, &format!("/cashier-sessions/{session_id}"));
        let data: SessionData = self.expect_success(builder).await?;

        Ok(SessionDetails {
            opening_amount: data
                .opening_amount
                .map(|amount| amount.to_decimal())
                .unwrap_or(Decimal::ZERO),
            cashier_name: data.cashier_name.unwrap_or_default(),
            opened_at: parse_opened_at(data.opened_at.as_deref()),
        })
    }

    async fn fetch_transactions_for_method(
        &self,
        session_id: i64,
        method_id: &str,
    ) -> Result<MethodTransactions, GatewayError> {
        let builder = self.request(
            Method::GET,
            &format!("/payments/session/{session_id}/mode/{method_id}"),
        );
        let payments: Vec<ModePaymentData> = self.expect_success(builder).await?;

        let mut total_amount = Decimal::ZERO;
        let mut order_ids = HashSet::new();
        for payment in payments {
            if let Some(amount) = payment.amount {
                total_amount += amount.to_decimal();
            }
            if let Some(order_id) = payment.order_id {
                let id = order_id.to_string_id();
                if !id.is_empty() {
                    order_ids.insert(id);
                }
            }
        }

        Ok(MethodTransactions {
            total_amount,
            order_ids,
        })
    }

    async fn open_session(
        &self,
        request: &OpenSessionRequest,
    ) -> Result<Option<i64>, GatewayError> {
        let builder = self
            .request(Method::POST, "/cashier-sessions/open")
            .json(request);
        // Any 2xx opens the session regardless of the body; some backends
        // answer 201 with no payload at all.
        let body = self.send_checked(builder).await?;
        Ok(opened_session_id(&body))
    }

    async fn close_session(
        &self,
        session_id: i64,
        request: &CloseSessionRequest,
    ) -> Result<(), GatewayError> {
        let builder = self
            .request(Method::PUT, &format!("/cashier-sessions/{session_id}/close"))
            .json(request);
        let envelope = self.send_envelope::<serde_json::Value>(builder).await?;
        if !envelope.is_success() {
            return Err(GatewayError::ApiLogic(envelope.message_or_default()));
        }
        Ok(())
    }

    async fn fetch_denominations(&self) -> Result<Vec<i64>, GatewayError> {
        let builder = self.request(Method::GET, "/cash-denominations");
        // This endpoint predates the status field; only the data shape counts.
        let envelope = self.send_envelope::<DenominationListData>(builder).await?;
        let data = envelope
            .data
            .ok_or_else(|| GatewayError::Decode("denomination list is missing".to_string()))?;
        Ok(data
            .denominations
            .into_iter()
            .map(|denomination| denomination.value)
            .collect())
    }

    async fn fetch_rounding_config(&self) -> Result<RoundingConfig, GatewayError> {
        let builder = self.request(Method::GET, "/roundings/values");
        let rows: Vec<RoundingData> = self.expect_success(builder).await?;
        let first = rows
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::Decode("rounding config list is empty".to_string()))?;
        Ok(RoundingConfig {
            rounding_below: first.rounding_below,
            rounding_number: first.rounding_number,
        })
    }

    async fn fetch_discounts(&self) -> Result<Vec<Discount>, GatewayError> {
        let builder = self.request(Method::GET, "/discounts/");
        self.expect_success(builder).await
    }

    async fn fetch_order_types(&self) -> Result<Vec<OrderType>, GatewayError> {
        let builder = self.request(Method::GET, "/order-types");
        self.expect_success(builder).await
    }

    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<CreatedOrder, GatewayError> {
        let builder = self.request(Method::POST, "/orders").json(request);
        let data: CreatedOrderData = self.expect_success(builder).await?;
        Ok(CreatedOrder {
            id: data.id,
            order_number: data.order_number,
        })
    }

    async fn add_order_item(
        &self,
        order_id: i64,
        item: &OrderItemRequest,
    ) -> Result<(), GatewayError> {
        let builder = self
            .request(Method::POST, &format!("/orders/{order_id}/items"))
            .json(item);
        let envelope = self.send_envelope::<serde_json::Value>(builder).await?;
        if !envelope.is_success() {
            return Err(GatewayError::ApiLogic(envelope.message_or_default()));
        }
        Ok(())
    }

    async fn checkout(
        &self,
        order_id: i64,
        discount_id: Option<i64>,
    ) -> Result<CheckoutSummary, GatewayError> {
        let mut payload = serde_json::Map::new();
        if let Some(discount_id) = discount_id {
            payload.insert("discount_id".to_string(), discount_id.into());
        }
        let builder = self
            .request(Method::POST, &format!("/payments/checkout/{order_id}"))
            .json(&serde_json::Value::Object(payload));
        let data: CheckoutData = self.expect_success(builder).await?;
        Ok(data.into_summary())
    }

    async fn submit_payment(&self, request: &PaymentRequest) -> Result<(), GatewayError> {
        let builder = self.request(Method::POST, "/payments").json(request);
        let envelope = self.send_envelope::<serde_json::Value>(builder).await?;
        if !envelope.is_success() {
            return Err(GatewayError::ApiLogic(envelope.message_or_default()));
        }
        Ok(())
    }
}
