use serde::{Deserialize, Serialize};

/// The fixed set of asset classes used for grouping and allocation charts.
///
/// Categories carry no valuation semantics — an equity and a crypto holding
/// are valued identically. They exist purely so the distribution breakdown
/// can bucket holdings for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCategory {
    /// Investment funds
    Fund,
    /// Stocks / equities
    Equity,
    /// Foreign-exchange holdings
    ForeignExchange,
    /// Cryptocurrencies
    Crypto,
    /// Precious metals (gold, silver, ...)
    PreciousMetal,
}

impl AssetCategory {
    /// All categories in canonical order. The distribution breakdown always
    /// contains exactly these five, even when their value is zero.
    pub const ALL: [AssetCategory; 5] = [
        AssetCategory::Fund,
        AssetCategory::Equity,
        AssetCategory::ForeignExchange,
        AssetCategory::Crypto,
        AssetCategory::PreciousMetal,
    ];

    /// Fixed chart color for this category.
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            AssetCategory::Fund => "#3b82f6",
            AssetCategory::Equity => "#22c55e",
            AssetCategory::ForeignExchange => "#f59e0b",
            AssetCategory::Crypto => "#8b5cf6",
            AssetCategory::PreciousMetal => "#ef4444",
        }
    }
}

impl std::fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetCategory::Fund => write!(f, "Fund"),
            AssetCategory::Equity => write!(f, "Equity"),
            AssetCategory::ForeignExchange => write!(f, "Foreign Exchange"),
            AssetCategory::Crypto => write!(f, "Crypto"),
            AssetCategory::PreciousMetal => write!(f, "Precious Metal"),
        }
    }
}
