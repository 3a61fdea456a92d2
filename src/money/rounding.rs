use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use super::money_model::RoundingConfig;

/// Rounds a cash amount to the configured unit for physical tendering.
///
/// Negative amounts pass through unchanged, and the rule is only ever applied
/// to cash payments; both narrowings are carried over deliberately.
pub fn apply_rounding(amount: Decimal, config: &RoundingConfig) -> Decimal {
    if amount < Decimal::ZERO || config.rounding_number <= 0 {
        return amount;
    }

    let amount_int = amount.round().to_i64().unwrap_or(0);
    let remainder = amount_int % config.rounding_number;

    let rounded = if remainder <= config.rounding_below {
        amount_int - remainder
    } else {
        amount_int + (config.rounding_number - remainder)
    };

    Decimal::from(rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn config(below: i64, unit: i64) -> RoundingConfig {
        RoundingConfig {
            rounding_below: below,
            rounding_number: unit,
        }
    }

    #[test]
    fn remainder_at_or_below_threshold_rounds_down() {
        assert_eq!(apply_rounding(dec!(130), &config(40, 100)), dec!(100));
        assert_eq!(apply_rounding(dec!(140), &config(40, 100)), dec!(100));
    }

    #[test]
    fn remainder_above_threshold_rounds_up() {
        assert_eq!(apply_rounding(dec!(170), &config(40, 100)), dec!(200));
        assert_eq!(apply_rounding(dec!(141), &config(40, 100)), dec!(200));
    }

    #[test]
    fn default_config_always_rounds_down() {
        // rounding_below 99 with unit 100 means every remainder rounds down
        let config = RoundingConfig::default();
        assert_eq!(apply_rounding(dec!(150), &config), dec!(100));
        assert_eq!(apply_rounding(dec!(199), &config), dec!(100));
        assert_eq!(apply_rounding(dec!(200), &config), dec!(200));
    }

    #[test]
    fn exact_multiples_are_unchanged() {
        assert_eq!(apply_rounding(dec!(500), &config(40, 100)), dec!(500));
        assert_eq!(apply_rounding(dec!(0), &config(40, 100)), dec!(0));
    }

    #[test]
    fn negative_amounts_pass_through() {
        assert_eq!(apply_rounding(dec!(-150), &config(40, 100)), dec!(-150));
    }
}
