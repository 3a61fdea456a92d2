/// Base URL of the restaurant backend.
pub const API_BASE_URL: &str = "https://api.pood.lol";

/// Currency prefix applied by the price formatter.
pub const CURRENCY_PREFIX: &str = "Rp";

/// Denominations offered when the backend list cannot be fetched, largest first.
pub const FALLBACK_DENOMINATIONS: [i64; 10] = [
    100_000, 50_000, 20_000, 10_000, 5_000, 2_000, 1_000, 500, 200, 100,
];

/// Cash rounding threshold used when `/roundings/values` is unavailable.
pub const DEFAULT_ROUNDING_BELOW: i64 = 99;

/// Cash rounding unit used when `/roundings/values` is unavailable.
pub const DEFAULT_ROUNDING_NUMBER: i64 = 100;
