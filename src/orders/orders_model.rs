use rust_decimal::Decimal;

use crate::gateway::CheckoutSummary;
use crate::money::{apply_rounding, RoundingConfig};

/// Checkout totals for the payment screen.
///
/// Replaced wholesale from every checkout response; the client never derives
/// `final_amount` from the items itself.
#[derive(Debug, Clone, Default)]
pub struct CheckoutTotals {
    pub order_number: String,
    pub table_number: String,
    pub original_amount: Decimal,
    pub discount_amount: Decimal,
    pub final_amount: Decimal,
    pub selected_discount_id: Option<i64>,
}

impl CheckoutTotals {
    pub(crate) fn apply(&mut self, summary: CheckoutSummary, discount_id: Option<i64>) {
        self.order_number = summary.order_number;
        self.table_number = summary.table_number;
        self.original_amount = summary.original_amount;
        self.discount_amount = summary.discount_amount;
        self.final_amount = summary.final_amount;
        self.selected_discount_id = discount_id;
    }
}

/// Cash payments must cover the rounded total; every other method is forced
/// to the exact total upstream and is always valid. The cash-only narrowing
/// is deliberate.
pub fn payment_valid(
    amount_paid: Decimal,
    final_amount: Decimal,
    method_code: &str,
    rounding: Option<&RoundingConfig>,
) -> bool {
    if !method_code.eq_ignore_ascii_case("cash") {
        return true;
    }
    let target = match rounding {
        Some(config) => apply_rounding(final_amount, config),
        None => final_amount,
    };
    amount_paid >= target
}

/// Change is computed against the unrounded total and never negative.
pub fn change_due(amount_paid: Decimal, final_amount: Decimal) -> Decimal {
    (amount_paid - final_amount).max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn non_cash_is_always_valid() {
        assert!(payment_valid(dec!(0), dec!(99999), "card", None));
        assert!(payment_valid(dec!(0), dec!(99999), "qris", Some(&RoundingConfig::default())));
    }

    #[test]
    fn cash_must_cover_the_rounded_total() {
        // 12_340 rounds down to 12_300 under the default rule
        let config = RoundingConfig::default();
        assert!(payment_valid(dec!(12300), dec!(12340), "cash", Some(&config)));
        assert!(!payment_valid(dec!(12299), dec!(12340), "cash", Some(&config)));
    }

    #[test]
    fn cash_without_config_compares_the_exact_total() {
        assert!(payment_valid(dec!(12340), dec!(12340), "cash", None));
        assert!(!payment_valid(dec!(12339), dec!(12340), "cash", None));
    }

    #[test]
    fn change_is_clamped_at_zero() {
        assert_eq!(change_due(dec!(20000), dec!(12340)), dec!(7660));
        assert_eq!(change_due(dec!(12000), dec!(12340)), dec!(0));
    }
}
