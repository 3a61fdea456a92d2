//! Order and payment workflow: creation, item addition, checkout recompute
//! and payment submission. Same call-the-gateway-then-replace-local-state
//! shape as the reconciliation engine, but with a single in-flight request
//! at a time instead of a fan-out.

use std::sync::Arc;

use log::{debug, warn};
use rust_decimal::Decimal;

use crate::gateway::{
    BackendGateway, CreatedOrder, CreateOrderRequest, Discount, OrderItemRequest, OrderType,
    PaymentMethod, PaymentRequest,
};
use crate::money::RoundingConfig;
use crate::orders::orders_errors::OrderError;
use crate::orders::orders_model::{change_due, payment_valid, CheckoutTotals};

/// Order setup operations: creation, item addition and the picker listings.
pub struct OrderService {
    gateway: Arc<dyn BackendGateway>,
}

impl OrderService {
    pub fn new(gateway: Arc<dyn BackendGateway>) -> Self {
        Self { gateway }
    }

    pub async fn create_order(
        &self,
        table_number: &str,
        order_type_id: i64,
        user_id: i64,
    ) -> Result<CreatedOrder, OrderError> {
        if table_number.trim().is_empty() {
            return Err(OrderError::Validation("table number is required".to_string()));
        }
        let request = CreateOrderRequest {
            table_number: table_number.trim().to_string(),
            order_type_id,
            user_id,
        };
        Ok(self.gateway.create_order(&request).await?)
    }

    pub async fn add_item(
        &self,
        order_id: i64,
        menu_item_id: i64,
        variant_id: Option<i64>,
        quantity: i32,
        unit_price: Decimal,
    ) -> Result<(), OrderError> {
        if quantity <= 0 {
            return Err(OrderError::Validation("quantity must be positive".to_string()));
        }
        let item = OrderItemRequest {
            menu_item_id,
            variant_id,
            quantity,
            unit_price,
            total_price: unit_price * Decimal::from(quantity),
        };
        Ok(self.gateway.add_order_item(order_id, &item).await?)
    }

    pub async fn order_types(&self) -> Result<Vec<OrderType>, OrderError> {
        Ok(self.gateway.fetch_order_types().await?)
    }

    pub async fn discounts(&self) -> Result<Vec<Discount>, OrderError> {
        Ok(self.gateway.fetch_discounts().await?)
    }
}

/// Payment-screen coordinator for a single order.
pub struct CheckoutService {
    gateway: Arc<dyn BackendGateway>,
    order_id: i64,
    totals: CheckoutTotals,
    rounding: Option<RoundingConfig>,
    refresh_in_flight: bool,
}

impl CheckoutService {
    pub fn new(gateway: Arc<dyn BackendGateway>, order_id: i64) -> Self {
        Self {
            gateway,
            order_id,
            totals: CheckoutTotals::default(),
            rounding: None,
            refresh_in_flight: false,
        }
    }

    pub fn totals(&self) -> &CheckoutTotals {
        &self.totals
    }

    pub fn rounding(&self) -> Option<&RoundingConfig> {
        self.rounding.as_ref()
    }

    /// Fetches the cash rounding rule, substituting the hardcoded default
    /// when the endpoint is unavailable.
    pub async fn load_rounding_config(&mut self) {
        self.rounding = match self.gateway.fetch_rounding_config().await {
            Ok(config) => Some(config),
            Err(error) => {
                warn!("rounding config unavailable, using default: {error}");
                Some(RoundingConfig::default())
            }
        };
    }

    /// Re-runs checkout for the current discount selection and replaces the
    /// totals wholesale from the response.
    ///
    /// Overlapping triggers are ignored while a recompute is in flight;
    /// returns false when the call was skipped for that reason.
    pub async fn select_discount(
        &mut self,
        discount_id: Option<i64>,
    ) -> Result<bool, OrderError> {
        if self.refresh_in_flight {
            debug!("checkout recompute already in flight, ignoring trigger");
            return Ok(false);
        }
        self.refresh_in_flight = true;

        let result = self.gateway.checkout(self.order_id, discount_id).await;
        self.refresh_in_flight = false;

        let summary = result?;
        self.totals.apply(summary, discount_id);
        Ok(true)
    }

    pub fn payment_valid(&self, amount_paid: Decimal, method: &PaymentMethod) -> bool {
        payment_valid(
            amount_paid,
            self.totals.final_amount,
            &method.code,
            self.rounding.as_ref(),
        )
    }

    pub fn change_due(&self, amount_paid: Decimal) -> Decimal {
        change_due(amount_paid, self.totals.final_amount)
    }

    /// Submits the payment. Non-cash methods are forced to the exact final
    /// amount; cash must cover the rounded total.
    pub async fn submit_payment(
        &self,
        amount_paid: Decimal,
        method: &PaymentMethod,
        notes: Option<String>,
    ) -> Result<(), OrderError> {
        if !self.payment_valid(amount_paid, method) {
            return Err(OrderError::InsufficientPayment);
        }
        let amount = if method.is_cash() {
            amount_paid
        } else {
            self.totals.final_amount
        };

        let request = PaymentRequest {
            order_id: self.order_id,
            discount_id: self.totals.selected_discount_id,
            amount,
            payment_mode: method.id.clone(),
            notes,
        };
        Ok(self.gateway.submit_payment(&request).await?)
    }
}
