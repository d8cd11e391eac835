use serde::{Deserialize, Serialize};

/// The two supported denomination currencies.
///
/// The tracker is a two-currency system: Turkish lira is the local currency,
/// US dollar the foreign one. The user-editable exchange rate in
/// [`Settings`](super::settings::Settings) is expressed as TRY per USD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// Turkish lira — the local currency
    #[serde(rename = "TRY")]
    Try,
    /// US dollar — the foreign currency
    #[serde(rename = "USD")]
    Usd,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::Try => write!(f, "TRY"),
            Currency::Usd => write!(f, "USD"),
        }
    }
}

impl Currency {
    /// The display symbol used in formatted amounts.
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Try => "₺",
            Currency::Usd => "$",
        }
    }

    /// Format an amount with two decimals and the currency symbol.
    /// Rounding happens here and only here — all computation keeps full precision.
    #[must_use]
    pub fn format_amount(&self, amount: f64) -> String {
        format!("{amount:.2} {}", self.symbol())
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TRY" => Ok(Currency::Try),
            "USD" => Ok(Currency::Usd),
            other => Err(format!("Unknown currency code '{other}' (expected TRY or USD)")),
        }
    }
}
