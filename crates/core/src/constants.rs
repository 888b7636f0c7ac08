use std::time::Duration;

/// Upper bound for any single Goal Service call made by the reconciler.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Monetary values are rounded to cents.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Wire and form format for goal target dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Base URL of the Goal Service when none is configured.
pub const DEFAULT_GOAL_SERVICE_URL: &str = "http://127.0.0.1:8000";
