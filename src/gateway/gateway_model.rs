//! Domain types and wire DTOs for the backend API.
//!
//! The backend schema has drifted over time, so wire shapes accept every
//! known variant: amounts arrive as JSON numbers or comma-grouped strings,
//! ids as numbers or strings. Domain types are the cleaned-up view the rest
//! of the crate works with.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Domain types
// =============================================================================

/// A server-defined payment channel (cash, card, transfer, ...).
///
/// `id` correlates API calls, `code` carries the legacy cash/non-cash
/// distinction used by rounding and payment validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    pub name: String,
    pub code: String,
}

impl PaymentMethod {
    /// Derives the legacy code from the channel description when the backend
    /// does not provide one explicitly.
    pub fn code_from_description(description: &str) -> &'static str {
        let lowered = description.to_lowercase();
        for code in ["cash", "card", "transfer", "gopay", "ovo", "dana", "qris"] {
            if lowered.contains(code) {
                return code;
            }
        }
        "other"
    }

    pub fn is_cash(&self) -> bool {
        self.code.eq_ignore_ascii_case("cash")
    }
}

/// Session header fetched when the reconciliation screen opens.
#[derive(Debug, Clone)]
pub struct SessionDetails {
    pub opening_amount: Decimal,
    pub cashier_name: String,
    pub opened_at: DateTime<Utc>,
}

/// Payments the backend recorded for one method within a session.
#[derive(Debug, Clone, Default)]
pub struct MethodTransactions {
    pub total_amount: Decimal,
    pub order_ids: HashSet<String>,
}

/// Totals returned by the checkout endpoint. The client replaces its local
/// state with these wholesale; it never computes them itself.
#[derive(Debug, Clone, Default)]
pub struct CheckoutSummary {
    pub order_number: String,
    pub table_number: String,
    pub original_amount: Decimal,
    pub discount_amount: Decimal,
    pub final_amount: Decimal,
}

#[derive(Debug, Clone)]
pub struct CreatedOrder {
    pub id: i64,
    pub order_number: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderType {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Discount {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub percentage: Option<Decimal>,
}

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct OpenSessionRequest {
    pub user_id: i64,
    pub opening_amount: Decimal,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CloseSessionRequest {
    pub closing_amount: Decimal,
    pub expected_amount: Decimal,
    pub payment_mode_amounts: HashMap<String, Decimal>,
    pub expected_payment_mode_amounts: HashMap<String, Decimal>,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderRequest {
    pub table_number: String,
    pub order_type_id: i64,
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderItemRequest {
    pub menu_item_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<i64>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentRequest {
    pub order_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_id: Option<i64>,
    pub amount: Decimal,
    pub payment_mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// =============================================================================
// Wire shapes
// =============================================================================

/// Standard response envelope: `{status, message?, data?}`.
///
/// Every field is optional; serde leaves missing `Option` fields as `None`
/// without a `default` attribute, which would otherwise force a `Default`
/// bound onto the payload type.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope<T> {
    pub status: Option<String>,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub(crate) fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }

    pub(crate) fn message_or_default(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| "Unknown error".to_string())
    }
}

/// Amount fields the backend emits either as JSON numbers or as
/// comma-grouped strings such as `"12,500"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum WireAmount {
    Number(Decimal),
    Text(String),
}

impl WireAmount {
    pub(crate) fn to_decimal(&self) -> Decimal {
        match self {
            WireAmount::Number(amount) => *amount,
            WireAmount::Text(text) => {
                Decimal::from_str(text.replace(',', "").trim()).unwrap_or(Decimal::ZERO)
            }
        }
    }
}

/// Ids arrive as numbers in newer responses and strings in older ones.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum WireId {
    Number(i64),
    Text(String),
}

impl WireId {
    pub(crate) fn to_string_id(&self) -> String {
        match self {
            WireId::Number(id) => id.to_string(),
            WireId::Text(id) => id.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaymentModeData {
    pub id: WireId,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SessionData {
    #[serde(default)]
    pub opening_amount: Option<WireAmount>,
    #[serde(default)]
    pub cashier_name: Option<String>,
    #[serde(default)]
    pub opened_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModePaymentData {
    #[serde(default)]
    pub amount: Option<WireAmount>,
    #[serde(default)]
    pub order_id: Option<WireId>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DenominationListData {
    #[serde(default)]
    pub denominations: Vec<DenominationData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DenominationData {
    pub value: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RoundingData {
    #[serde(default = "default_rounding_below")]
    pub rounding_below: i64,
    #[serde(default = "default_rounding_number")]
    pub rounding_number: i64,
}

fn default_rounding_below() -> i64 {
    crate::constants::DEFAULT_ROUNDING_BELOW
}

fn default_rounding_number() -> i64 {
    crate::constants::DEFAULT_ROUNDING_NUMBER
}

#[derive(Debug, Deserialize)]
pub(crate) struct CheckoutData {
    #[serde(default)]
    pub order_number: String,
    #[serde(default)]
    pub table_number: String,
    #[serde(default)]
    pub final_charged_amount: Option<WireAmount>,
    #[serde(default)]
    pub final_amount: Option<WireAmount>,
    #[serde(default)]
    pub total_items_amount: Option<WireAmount>,
    #[serde(default)]
    pub discount_amount: Option<WireAmount>,
}

impl CheckoutData {
    pub(crate) fn into_summary(self) -> CheckoutSummary {
        // Newer backends send final_charged_amount; older ones final_amount,
        // sometimes as a comma-grouped string. Accept either.
        let final_amount = self
            .final_charged_amount
            .or(self.final_amount)
            .map(|amount| amount.to_decimal())
            .unwrap_or(Decimal::ZERO);
        let original_amount = self
            .total_items_amount
            .map(|amount| amount.to_decimal())
            .unwrap_or(final_amount);
        let discount_amount = self
            .discount_amount
            .map(|amount| amount.to_decimal())
            .unwrap_or(Decimal::ZERO);

        CheckoutSummary {
            order_number: self.order_number,
            table_number: self.table_number,
            original_amount,
            discount_amount,
            final_amount,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedOrderData {
    pub id: i64,
    #[serde(default)]
    pub order_number: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenedSessionData {
    #[serde(default, alias = "session_id")]
    pub id: Option<i64>,
}
