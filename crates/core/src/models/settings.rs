use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::currency::Currency;

/// Default USD→TRY rate used until the user edits it.
pub const DEFAULT_USD_TO_TRY_RATE: f64 = 34.50;

/// User-configurable settings. A singleton inside the store, materialized
/// with defaults on first access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// The currency all aggregate figures are displayed in
    pub display_currency: Currency,

    /// User-editable exchange rate: how many TRY one USD buys
    pub usd_to_try_rate: f64,

    /// When the exchange rate was last changed
    pub exchange_rate_updated: DateTime<Utc>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_currency: Currency::Try,
            usd_to_try_rate: DEFAULT_USD_TO_TRY_RATE,
            exchange_rate_updated: Utc::now(),
        }
    }
}
