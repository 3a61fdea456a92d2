use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use crate::constants::CURRENCY_PREFIX;

/// Formats an amount with the configured currency prefix:
/// `1234567` becomes `"Rp 1.234.567"`.
pub fn format_currency(amount: Decimal) -> String {
    format_with_prefix(amount, CURRENCY_PREFIX)
}

/// Integer-rounds, then inserts a dot every three digits from the right.
/// Always succeeds on any finite amount.
pub fn format_with_prefix(amount: Decimal, prefix: &str) -> String {
    let rounded = amount.round().to_i64().unwrap_or(0);
    let digits = rounded.abs().to_string();
    let length = digits.len();

    let mut grouped = String::with_capacity(length + length / 3);
    for (index, digit) in digits.chars().enumerate() {
        grouped.push(digit);
        if (length - index - 1) % 3 == 0 && index < length - 1 {
            grouped.push('.');
        }
    }

    let sign = if rounded < 0 { "-" } else { "" };
    format!("{} {}{}", prefix, sign, grouped)
}
