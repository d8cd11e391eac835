use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::category::AssetCategory;
use super::currency::Currency;

/// Value and share of one asset category inside a portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    /// Combined market value of this category's assets, in the display currency
    pub value: f64,

    /// This category's value as a share of total portfolio value (0 when
    /// total value is zero)
    pub percentage: f64,
}

/// Absolute and relative gain/loss of a single asset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GainLoss {
    /// Market value minus cost basis, in the display currency
    pub amount: f64,

    /// Gain/loss as a percentage of cost basis (0 when cost basis is zero)
    pub percentage: f64,
}

/// Currency-normalized summary of a whole portfolio.
///
/// All monetary fields are in `currency`. `asset_distribution` always
/// contains every [`AssetCategory`], including zero-valued ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStats {
    /// Display currency all figures are normalized to
    pub currency: Currency,

    /// Market value of held assets plus net realized profit from sales
    pub total_value: f64,

    /// Cost basis of held assets
    pub total_investment: f64,

    /// total_value − total_investment
    pub total_gain_loss: f64,

    /// total_gain_loss as a percentage of total_investment (0 when nothing
    /// is invested)
    pub total_gain_loss_percentage: f64,

    /// Per-category value and allocation share
    pub asset_distribution: HashMap<AssetCategory, CategoryBreakdown>,
}

impl PortfolioStats {
    /// An all-zero summary in the given currency, with every category present.
    #[must_use]
    pub fn empty(currency: Currency) -> Self {
        let asset_distribution = AssetCategory::ALL
            .iter()
            .map(|&c| (c, CategoryBreakdown::default()))
            .collect();
        Self {
            currency,
            total_value: 0.0,
            total_investment: 0.0,
            total_gain_loss: 0.0,
            total_gain_loss_percentage: 0.0,
            asset_distribution,
        }
    }
}
