use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::gateway::PaymentMethod;

/// Lifecycle of the session-close screen.
///
/// Failures while loading payment methods or session data do not produce an
/// error-terminal state; the engine degrades to empty/zero values and keeps
/// going. The only gate is `AggregatingTransactions -> Ready`, which requires
/// every per-method fetch to have completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    LoadingPaymentMethods,
    LoadingSessionData,
    AggregatingTransactions,
    Ready,
    Closing,
    Closed,
}

/// One reconciliation row per payment method.
///
/// `difference == actual - system` holds after every mutation; both setters
/// recompute it, and there is no other way to touch the fields.
#[derive(Debug, Clone)]
pub struct ReconciliationLine {
    pub method: PaymentMethod,
    system_amount: Decimal,
    actual_amount: Option<Decimal>,
    difference: Decimal,
}

impl ReconciliationLine {
    pub fn new(method: PaymentMethod) -> Self {
        Self {
            method,
            system_amount: Decimal::ZERO,
            actual_amount: Some(Decimal::ZERO),
            difference: Decimal::ZERO,
        }
    }

    pub fn system_amount(&self) -> Decimal {
        self.system_amount
    }

    /// `None` when the cashier cleared the count field.
    pub fn actual_amount(&self) -> Option<Decimal> {
        self.actual_amount
    }

    pub fn difference(&self) -> Decimal {
        self.difference
    }

    /// Applies an aggregation result. Pre-fills the counted amount with the
    /// system total so the cashier only has to correct discrepancies.
    pub fn set_system_amount(&mut self, amount: Decimal) {
        self.system_amount = amount;
        self.actual_amount = Some(amount);
        self.recompute_difference();
    }

    pub fn set_actual_amount(&mut self, amount: Option<Decimal>) {
        self.actual_amount = amount;
        self.recompute_difference();
    }

    fn recompute_difference(&mut self) {
        self.difference = self.actual_amount.unwrap_or(Decimal::ZERO) - self.system_amount;
    }
}

/// Summary built while the reconciliation screen is open.
///
/// `total_sales` and `total_orders` are derived from the per-method fan-out,
/// never trusted from any single response, and are only final once the engine
/// reaches `Ready`. The summary is sent as the close payload and discarded.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub session_id: i64,
    pub cashier_name: String,
    pub opening_amount: Decimal,
    pub opened_at: DateTime<Utc>,
    pub total_sales: Decimal,
    pub total_orders: usize,
    pub lines: Vec<ReconciliationLine>,
    pub notes: String,
}

impl SessionSummary {
    pub fn new(session_id: i64, cashier_name: String) -> Self {
        Self {
            session_id,
            cashier_name,
            opening_amount: Decimal::ZERO,
            opened_at: Utc::now(),
            total_sales: Decimal::ZERO,
            total_orders: 0,
            lines: Vec::new(),
            notes: String::new(),
        }
    }

    pub fn line_for_method(&self, method_id: &str) -> Option<&ReconciliationLine> {
        self.lines.iter().find(|line| line.method.id == method_id)
    }

    pub fn line_for_method_mut(&mut self, method_id: &str) -> Option<&mut ReconciliationLine> {
        self.lines
            .iter_mut()
            .find(|line| line.method.id == method_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn cash_method() -> PaymentMethod {
        PaymentMethod {
            id: "1".to_string(),
            name: "Cash".to_string(),
            code: "cash".to_string(),
        }
    }

    #[test]
    fn difference_tracks_every_mutation() {
        let mut line = ReconciliationLine::new(cash_method());
        assert_eq!(line.difference(), dec!(0));

        line.set_system_amount(dec!(10000));
        // Pre-filled actual means zero difference right after aggregation.
        assert_eq!(line.actual_amount(), Some(dec!(10000)));
        assert_eq!(line.difference(), dec!(0));

        line.set_actual_amount(Some(dec!(10500)));
        assert_eq!(line.difference(), dec!(500));

        line.set_actual_amount(Some(dec!(9000)));
        assert_eq!(line.difference(), dec!(-1000));
    }

    #[test]
    fn cleared_count_behaves_as_zero_for_the_difference() {
        let mut line = ReconciliationLine::new(cash_method());
        line.set_system_amount(dec!(2500));
        line.set_actual_amount(None);
        assert_eq!(line.actual_amount(), None);
        assert_eq!(line.difference(), dec!(-2500));
    }

    #[test]
    fn system_amount_update_resets_the_counted_value() {
        let mut line = ReconciliationLine::new(cash_method());
        line.set_actual_amount(Some(dec!(777)));
        line.set_system_amount(dec!(5000));
        assert_eq!(line.actual_amount(), Some(dec!(5000)));
        assert_eq!(line.difference(), dec!(0));
    }
}
