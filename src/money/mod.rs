pub mod formatter;
pub mod money_model;
pub mod rounding;

pub use formatter::{format_currency, format_with_prefix};
pub use money_model::{sum_denominations, DenominationCount, RoundingConfig};
pub use rounding::apply_rounding;
