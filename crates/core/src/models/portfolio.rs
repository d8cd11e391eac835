use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::asset::Asset;
use super::sale::Sale;

/// A named collection of assets and their sale history.
///
/// A portfolio owns its assets (deleting the portfolio deletes them) and an
/// asset owns its sales transitively. Both collections keep creation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    /// Unique identifier
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Optional free-text description
    #[serde(default)]
    pub description: Option<String>,

    /// Currently held assets, in creation order
    #[serde(default)]
    pub assets: Vec<Asset>,

    /// Recorded sales, in creation order. Sales reference assets by id.
    #[serde(default)]
    pub sales: Vec<Sale>,

    /// Set once on creation
    pub created_at: DateTime<Utc>,

    /// Stamped on every mutation
    pub updated_at: DateTime<Utc>,
}

impl Portfolio {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description,
            assets: Vec::new(),
            sales: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Find an asset by id.
    #[must_use]
    pub fn find_asset(&self, asset_id: Uuid) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == asset_id)
    }

    pub fn find_asset_mut(&mut self, asset_id: Uuid) -> Option<&mut Asset> {
        self.assets.iter_mut().find(|a| a.id == asset_id)
    }

    /// Find a sale by id.
    #[must_use]
    pub fn find_sale(&self, sale_id: Uuid) -> Option<&Sale> {
        self.sales.iter().find(|s| s.id == sale_id)
    }

    pub fn find_sale_mut(&mut self, sale_id: Uuid) -> Option<&mut Sale> {
        self.sales.iter_mut().find(|s| s.id == sale_id)
    }

    /// All sales referencing a given asset, in creation order.
    #[must_use]
    pub fn sales_for_asset(&self, asset_id: Uuid) -> Vec<&Sale> {
        self.sales.iter().filter(|s| s.asset_id == asset_id).collect()
    }

    /// Total quantity of an asset already sold.
    #[must_use]
    pub fn sold_amount(&self, asset_id: Uuid) -> f64 {
        self.sales
            .iter()
            .filter(|s| s.asset_id == asset_id)
            .map(|s| s.amount)
            .sum()
    }
}
