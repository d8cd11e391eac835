use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::currency::Currency;

/// A recorded disposal of (part of) an asset.
///
/// Sales reference their asset by id rather than being nested under it.
/// Realized gain/loss is always computed against the referenced asset's
/// cost basis at valuation time, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Unique identifier
    pub id: Uuid,

    /// The asset this sale disposes of
    pub asset_id: Uuid,

    /// Quantity sold (always positive)
    pub amount: f64,

    /// Unit sale price in the sale's own currency
    pub sale_price: f64,

    /// Date of the sale (daily granularity)
    pub sale_date: NaiveDate,

    /// Denomination currency of the sale price
    pub currency: Currency,

    /// Optional free-text notes
    #[serde(default)]
    pub notes: Option<String>,

    /// Set once on creation
    pub created_at: DateTime<Utc>,

    /// Stamped on every mutation
    pub updated_at: DateTime<Utc>,
}

impl Sale {
    pub fn new(
        asset_id: Uuid,
        amount: f64,
        sale_price: f64,
        sale_date: NaiveDate,
        currency: Currency,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            asset_id,
            amount,
            sale_price,
            sale_date,
            currency,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a sale with notes attached.
    pub fn with_notes(
        asset_id: Uuid,
        amount: f64,
        sale_price: f64,
        sale_date: NaiveDate,
        currency: Currency,
        notes: impl Into<String>,
    ) -> Self {
        let mut sale = Self::new(asset_id, amount, sale_price, sale_date, currency);
        sale.notes = Some(notes.into());
        sale
    }

    /// Gross proceeds in the sale's own currency (sale price × amount).
    #[must_use]
    pub fn proceeds(&self) -> f64 {
        self.sale_price * self.amount
    }
}

/// Partial update for an existing sale. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalePatch {
    pub amount: Option<f64>,
    pub sale_price: Option<f64>,
    pub sale_date: Option<NaiveDate>,
    pub currency: Option<Currency>,
    pub notes: Option<String>,
}
