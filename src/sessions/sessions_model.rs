use rust_decimal::Decimal;

use crate::money::{sum_denominations, DenominationCount};

/// The counted opening till: one row per denomination, quantities as typed.
#[derive(Debug, Clone, Default)]
pub struct TillCount {
    rows: Vec<DenominationCount>,
}

impl TillCount {
    pub fn new(denominations: &[i64]) -> Self {
        Self {
            rows: denominations
                .iter()
                .map(|value| DenominationCount::new(*value))
                .collect(),
        }
    }

    pub fn rows(&self) -> &[DenominationCount] {
        &self.rows
    }

    /// Records the typed quantity for one denomination. Unknown values are
    /// ignored.
    pub fn set_quantity(&mut self, value: i64, quantity: impl Into<String>) {
        if let Some(row) = self.rows.iter_mut().find(|row| row.value == value) {
            row.quantity = quantity.into();
        }
    }

    pub fn total(&self) -> Decimal {
        sum_denominations(&self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn totals_the_counted_rows() {
        let mut till = TillCount::new(&[100_000, 50_000, 1_000]);
        till.set_quantity(100_000, "2");
        till.set_quantity(1_000, "5");
        assert_eq!(till.total(), dec!(205000));
    }

    #[test]
    fn ignores_unknown_denominations() {
        let mut till = TillCount::new(&[1_000]);
        till.set_quantity(2_000, "9");
        assert_eq!(till.total(), dec!(0));
    }
}
