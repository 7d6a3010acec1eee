//! System constants and configuration defaults for the CART route engine.

/// Default minimum gain a split must exceed to be accepted.
pub const DEFAULT_MIN_GAIN: f64 = 0.0;

/// Default minimum sample count each side of a split must exceed.
pub const DEFAULT_MIN_SAMPLES: usize = 0;

/// Anchor column holding the player's age.
pub const ANCHOR_AGE: &str = "Age";

/// Anchor column holding the player's height in centimetres.
pub const ANCHOR_HEIGHT: &str = "Height(CM)";

/// Anchor column holding the player's weight in kilograms.
pub const ANCHOR_WEIGHT: &str = "Weight(KG)";

/// Anchor columns pinned during route enumeration when none are configured.
pub const DEFAULT_ANCHOR_COLUMNS: [&str; 3] = [ANCHOR_AGE, ANCHOR_HEIGHT, ANCHOR_WEIGHT];

/// Separator between tokens of a rendered path string.
pub const PATH_DELIMITER: char = '|';

/// Decimal places kept by a leaf point estimate.
pub const POINT_ESTIMATE_DECIMALS: i32 = 2;

/// Decimal places kept by a percentage-weighted value.
pub const CALCULATED_VALUE_DECIMALS: i32 = 1;

/// Version stamped into persisted envelopes.
pub const MODEL_FORMAT_VERSION: u32 = 1;

/// Crate version string.
pub const CART_ROUTE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the score function.
pub const ENV_SCORE: &str = "CART_SCORE";

/// Environment variable overriding the minimum gain.
pub const ENV_MIN_GAIN: &str = "CART_MIN_GAIN";

/// Environment variable overriding the minimum sample count.
pub const ENV_MIN_SAMPLES: &str = "CART_MIN_SAMPLES";

/// Share of rows drawn (with replacement) for a bootstrap training set.
pub const DEFAULT_TRAIN_FRACTION: f64 = 0.7;

/// Seed used when a bootstrap caller does not supply one.
pub const DEFAULT_BOOTSTRAP_SEED: u64 = 1;
