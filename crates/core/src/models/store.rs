use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::portfolio::Portfolio;
use super::settings::Settings;

/// The main data container. Everything in here gets serialized and saved
/// as one snapshot — the single source of truth a frontend synchronizes
/// against through explicit accessors, never through implicit shared state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    /// All portfolios, in creation order
    #[serde(default)]
    pub portfolios: Vec<Portfolio>,

    /// Singleton user settings; defaults are materialized when a snapshot
    /// predates the field
    #[serde(default)]
    pub settings: Settings,

    /// The portfolio currently selected in the UI, if any
    #[serde(default)]
    pub active_portfolio_id: Option<Uuid>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            portfolios: Vec::new(),
            settings: Settings::default(),
            active_portfolio_id: None,
        }
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a portfolio by id.
    #[must_use]
    pub fn find_portfolio(&self, portfolio_id: Uuid) -> Option<&Portfolio> {
        self.portfolios.iter().find(|p| p.id == portfolio_id)
    }

    pub fn find_portfolio_mut(&mut self, portfolio_id: Uuid) -> Option<&mut Portfolio> {
        self.portfolios.iter_mut().find(|p| p.id == portfolio_id)
    }

    /// Find the portfolio that owns a given asset.
    #[must_use]
    pub fn portfolio_of_asset(&self, asset_id: Uuid) -> Option<&Portfolio> {
        self.portfolios.iter().find(|p| p.find_asset(asset_id).is_some())
    }

    pub fn portfolio_of_asset_mut(&mut self, asset_id: Uuid) -> Option<&mut Portfolio> {
        self.portfolios
            .iter_mut()
            .find(|p| p.find_asset(asset_id).is_some())
    }

    /// Find the portfolio that holds a given sale record.
    #[must_use]
    pub fn portfolio_of_sale(&self, sale_id: Uuid) -> Option<&Portfolio> {
        self.portfolios.iter().find(|p| p.find_sale(sale_id).is_some())
    }

    pub fn portfolio_of_sale_mut(&mut self, sale_id: Uuid) -> Option<&mut Portfolio> {
        self.portfolios
            .iter_mut()
            .find(|p| p.find_sale(sale_id).is_some())
    }
}
