use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::AssetCategory;
use super::currency::Currency;

/// A single holding inside a portfolio.
///
/// Prices are denominated in the asset's own `currency`; conversion to the
/// display currency is the valuation engine's job, never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Unique identifier
    pub id: Uuid,

    /// The portfolio that owns this asset
    pub portfolio_id: Uuid,

    /// Display name (e.g., "Apple Inc.", "Gram Altın")
    pub name: String,

    /// Asset class — used only for grouping in the distribution breakdown
    pub category: AssetCategory,

    /// Quantity held (always non-negative)
    pub amount: f64,

    /// Cost-basis unit price in the asset's own currency
    pub purchase_price: f64,

    /// Acquisition date (daily granularity)
    pub purchase_date: NaiveDate,

    /// Current unit price, if known. Valuation falls back to
    /// `purchase_price` when absent.
    #[serde(default)]
    pub current_price: Option<f64>,

    /// Denomination currency of both prices
    pub currency: Currency,

    /// Optional free-text notes
    #[serde(default)]
    pub notes: Option<String>,

    /// Set once on creation
    pub created_at: DateTime<Utc>,

    /// Stamped on every mutation
    pub updated_at: DateTime<Utc>,
}

impl Asset {
    pub fn new(
        portfolio_id: Uuid,
        name: impl Into<String>,
        category: AssetCategory,
        amount: f64,
        purchase_price: f64,
        purchase_date: NaiveDate,
        currency: Currency,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            portfolio_id,
            name: name.into(),
            category,
            amount,
            purchase_price,
            purchase_date,
            current_price: None,
            currency,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an asset with notes attached.
    #[allow(clippy::too_many_arguments)]
    pub fn with_notes(
        portfolio_id: Uuid,
        name: impl Into<String>,
        category: AssetCategory,
        amount: f64,
        purchase_price: f64,
        purchase_date: NaiveDate,
        currency: Currency,
        notes: impl Into<String>,
    ) -> Self {
        let mut asset = Self::new(
            portfolio_id,
            name,
            category,
            amount,
            purchase_price,
            purchase_date,
            currency,
        );
        asset.notes = Some(notes.into());
        asset
    }

    /// The unit price used for valuation: current price when known,
    /// purchase price otherwise.
    #[must_use]
    pub fn effective_price(&self) -> f64 {
        self.current_price.unwrap_or(self.purchase_price)
    }

    /// Market value in the asset's own currency (effective price × amount).
    #[must_use]
    pub fn market_value(&self) -> f64 {
        self.effective_price() * self.amount
    }

    /// Cost basis in the asset's own currency (purchase price × amount).
    #[must_use]
    pub fn cost_basis(&self) -> f64 {
        self.purchase_price * self.amount
    }
}

/// Partial update for an existing asset. `None` fields are left unchanged.
///
/// Mirrors the update DTO at the transport boundary: `current_price` and
/// `notes` can be set but not cleared through a patch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPatch {
    pub name: Option<String>,
    pub category: Option<AssetCategory>,
    pub amount: Option<f64>,
    pub purchase_price: Option<f64>,
    pub purchase_date: Option<NaiveDate>,
    pub current_price: Option<f64>,
    pub currency: Option<Currency>,
    pub notes: Option<String>,
}

/// Sort order for asset listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSortOrder {
    /// Newest acquisition first (default for display)
    DateDesc,
    /// Oldest acquisition first
    DateAsc,
    /// Alphabetical by name
    NameAsc,
    /// Reverse alphabetical by name
    NameDesc,
    /// Largest amount first
    AmountDesc,
    /// Smallest amount first
    AmountAsc,
}
