pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use uuid::Uuid;

use models::{
    asset::{Asset, AssetPatch, AssetSortOrder},
    category::AssetCategory,
    currency::Currency,
    history::ValuePoint,
    portfolio::Portfolio,
    sale::{Sale, SalePatch},
    settings::Settings,
    stats::{GainLoss, PortfolioStats},
    store::Store,
};
use services::{
    currency_service::CurrencyService, history_service::HistoryService,
    portfolio_service::PortfolioService, valuation_service::ValuationService,
};
use storage::manager::StorageManager;

use errors::CoreError;

/// Maximum value-history range in days (10 years).
const MAX_HISTORY_RANGE_DAYS: i64 = 3650;

/// Main entry point for the Investment Tracker core library.
/// Holds the store and all services needed to operate on it.
#[must_use]
pub struct InvestmentTracker {
    store: Store,
    portfolio_service: PortfolioService,
    valuation_service: ValuationService,
    currency_service: CurrencyService,
    history_service: HistoryService,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for InvestmentTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvestmentTracker")
            .field("portfolios", &self.store.portfolios.len())
            .field("settings", &self.store.settings)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl InvestmentTracker {
    /// Create a brand new empty tracker with default settings.
    pub fn create_new() -> Self {
        Self::build(Store::new())
    }

    /// Load an existing store from snapshot bytes.
    /// Use this where the frontend handles file I/O itself.
    pub fn load_from_bytes(data: &[u8]) -> Result<Self, CoreError> {
        let store = StorageManager::load_from_bytes(data)?;
        Ok(Self::build(store))
    }

    /// Save the current store to snapshot bytes.
    /// Returns raw bytes that the frontend can write to a file.
    /// Clears the unsaved-changes flag on success.
    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>, CoreError> {
        let bytes = StorageManager::save_to_bytes(&self.store)?;
        self.dirty = false;
        Ok(bytes)
    }

    /// Load from a snapshot file on disk.
    pub fn load_from_file(path: &str) -> Result<Self, CoreError> {
        let store = StorageManager::load_from_file(path)?;
        Ok(Self::build(store))
    }

    /// Save to a snapshot file on disk.
    /// Clears the unsaved-changes flag on success.
    pub fn save_to_file(&mut self, path: &str) -> Result<(), CoreError> {
        StorageManager::save_to_file(&self.store, path)?;
        self.dirty = false;
        Ok(())
    }

    // ── Portfolio Management ────────────────────────────────────────

    /// Create a new portfolio.
    pub fn create_portfolio(
        &mut self,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<Uuid, CoreError> {
        let portfolio = Portfolio::new(name, description);
        let id = portfolio.id;
        self.portfolio_service.add_portfolio(&mut self.store, portfolio)?;
        self.dirty = true;
        Ok(id)
    }

    /// Rename a portfolio and/or replace its description.
    /// `None` fields are left unchanged.
    pub fn update_portfolio(
        &mut self,
        portfolio_id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<(), CoreError> {
        self.portfolio_service
            .update_portfolio(&mut self.store, portfolio_id, name, description)?;
        self.dirty = true;
        Ok(())
    }

    /// Delete a portfolio together with all of its assets and sales.
    pub fn remove_portfolio(&mut self, portfolio_id: Uuid) -> Result<(), CoreError> {
        self.portfolio_service
            .remove_portfolio(&mut self.store, portfolio_id)?;
        self.dirty = true;
        Ok(())
    }

    /// Get a single portfolio by its ID.
    #[must_use]
    pub fn get_portfolio(&self, portfolio_id: Uuid) -> Option<&Portfolio> {
        self.store.find_portfolio(portfolio_id)
    }

    /// Get all portfolios in creation order.
    #[must_use]
    pub fn get_portfolios(&self) -> &[Portfolio] {
        &self.store.portfolios
    }

    /// Get the total number of portfolios.
    #[must_use]
    pub fn portfolio_count(&self) -> usize {
        self.store.portfolios.len()
    }

    /// Select the portfolio the UI is focused on, or clear with `None`.
    pub fn set_active_portfolio(&mut self, portfolio_id: Option<Uuid>) -> Result<(), CoreError> {
        self.portfolio_service
            .set_active_portfolio(&mut self.store, portfolio_id)?;
        self.dirty = true;
        Ok(())
    }

    /// The currently selected portfolio, if any.
    #[must_use]
    pub fn active_portfolio(&self) -> Option<&Portfolio> {
        self.store
            .active_portfolio_id
            .and_then(|id| self.store.find_portfolio(id))
    }

    // ── Asset Management ────────────────────────────────────────────

    /// Add an asset to a portfolio.
    #[allow(clippy::too_many_arguments)]
    pub fn add_asset(
        &mut self,
        portfolio_id: Uuid,
        name: impl Into<String>,
        category: AssetCategory,
        amount: f64,
        purchase_price: f64,
        purchase_date: NaiveDate,
        currency: Currency,
    ) -> Result<Uuid, CoreError> {
        let asset = Asset::new(
            portfolio_id,
            name,
            category,
            amount,
            purchase_price,
            purchase_date,
            currency,
        );
        let id = asset.id;
        self.portfolio_service.add_asset(&mut self.store, asset)?;
        self.dirty = true;
        Ok(id)
    }

    /// Add an asset with notes attached.
    #[allow(clippy::too_many_arguments)]
    pub fn add_asset_with_notes(
        &mut self,
        portfolio_id: Uuid,
        name: impl Into<String>,
        category: AssetCategory,
        amount: f64,
        purchase_price: f64,
        purchase_date: NaiveDate,
        currency: Currency,
        notes: impl Into<String>,
    ) -> Result<Uuid, CoreError> {
        let asset = Asset::with_notes(
            portfolio_id,
            name,
            category,
            amount,
            purchase_price,
            purchase_date,
            currency,
            notes,
        );
        let id = asset.id;
        self.portfolio_service.add_asset(&mut self.store, asset)?;
        self.dirty = true;
        Ok(id)
    }

    /// Apply a partial update to an existing asset.
    /// Validates the patched state before committing.
    pub fn update_asset(&mut self, asset_id: Uuid, patch: AssetPatch) -> Result<(), CoreError> {
        self.portfolio_service
            .update_asset(&mut self.store, asset_id, patch)?;
        self.dirty = true;
        Ok(())
    }

    /// Update only an asset's current market price.
    pub fn set_current_price(&mut self, asset_id: Uuid, price: f64) -> Result<(), CoreError> {
        self.portfolio_service
            .set_current_price(&mut self.store, asset_id, price)?;
        self.dirty = true;
        Ok(())
    }

    /// Remove an asset. Its sale records are cascade-deleted.
    pub fn remove_asset(&mut self, asset_id: Uuid) -> Result<(), CoreError> {
        self.portfolio_service.remove_asset(&mut self.store, asset_id)?;
        self.dirty = true;
        Ok(())
    }

    /// Get a single asset by its ID.
    #[must_use]
    pub fn get_asset(&self, asset_id: Uuid) -> Option<&Asset> {
        self.store
            .portfolio_of_asset(asset_id)
            .and_then(|p| p.find_asset(asset_id))
    }

    /// Get a portfolio's assets, newest-created first.
    pub fn get_assets(&self, portfolio_id: Uuid) -> Result<Vec<&Asset>, CoreError> {
        let portfolio = self
            .store
            .find_portfolio(portfolio_id)
            .ok_or_else(|| CoreError::PortfolioNotFound(portfolio_id.to_string()))?;
        let mut assets: Vec<&Asset> = portfolio.assets.iter().collect();
        assets.reverse(); // internal storage is creation order; reverse for newest-first
        Ok(assets)
    }

    /// Get a portfolio's assets sorted by a specific order.
    pub fn get_assets_sorted(
        &self,
        portfolio_id: Uuid,
        order: &AssetSortOrder,
    ) -> Result<Vec<&Asset>, CoreError> {
        let portfolio = self
            .store
            .find_portfolio(portfolio_id)
            .ok_or_else(|| CoreError::PortfolioNotFound(portfolio_id.to_string()))?;
        let mut assets: Vec<&Asset> = portfolio.assets.iter().collect();
        match order {
            AssetSortOrder::DateDesc => {
                assets.sort_by(|a, b| b.purchase_date.cmp(&a.purchase_date));
            }
            AssetSortOrder::DateAsc => {
                assets.sort_by(|a, b| a.purchase_date.cmp(&b.purchase_date));
            }
            AssetSortOrder::NameAsc => assets.sort_by(|a, b| a.name.cmp(&b.name)),
            AssetSortOrder::NameDesc => assets.sort_by(|a, b| b.name.cmp(&a.name)),
            AssetSortOrder::AmountDesc => assets.sort_by(|a, b| {
                b.amount
                    .partial_cmp(&a.amount)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
            AssetSortOrder::AmountAsc => assets.sort_by(|a, b| {
                a.amount
                    .partial_cmp(&b.amount)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
        }
        Ok(assets)
    }

    /// Search a portfolio's assets by matching query against name and notes
    /// (case-insensitive).
    pub fn search_assets(
        &self,
        portfolio_id: Uuid,
        query: &str,
    ) -> Result<Vec<&Asset>, CoreError> {
        let portfolio = self
            .store
            .find_portfolio(portfolio_id)
            .ok_or_else(|| CoreError::PortfolioNotFound(portfolio_id.to_string()))?;
        let q = query.to_lowercase();
        Ok(portfolio
            .assets
            .iter()
            .filter(|a| {
                a.name.to_lowercase().contains(&q)
                    || a.notes.as_deref().unwrap_or("").to_lowercase().contains(&q)
            })
            .collect())
    }

    // ── Sale Management ─────────────────────────────────────────────

    /// Record a sale against an existing asset.
    pub fn record_sale(
        &mut self,
        asset_id: Uuid,
        amount: f64,
        sale_price: f64,
        sale_date: NaiveDate,
        currency: Currency,
    ) -> Result<Uuid, CoreError> {
        let sale = Sale::new(asset_id, amount, sale_price, sale_date, currency);
        let id = sale.id;
        self.portfolio_service.add_sale(&mut self.store, sale)?;
        self.dirty = true;
        Ok(id)
    }

    /// Record a sale with notes attached.
    pub fn record_sale_with_notes(
        &mut self,
        asset_id: Uuid,
        amount: f64,
        sale_price: f64,
        sale_date: NaiveDate,
        currency: Currency,
        notes: impl Into<String>,
    ) -> Result<Uuid, CoreError> {
        let sale = Sale::with_notes(asset_id, amount, sale_price, sale_date, currency, notes);
        let id = sale.id;
        self.portfolio_service.add_sale(&mut self.store, sale)?;
        self.dirty = true;
        Ok(id)
    }

    /// Apply a partial update to an existing sale.
    pub fn update_sale(&mut self, sale_id: Uuid, patch: SalePatch) -> Result<(), CoreError> {
        self.portfolio_service
            .update_sale(&mut self.store, sale_id, patch)?;
        self.dirty = true;
        Ok(())
    }

    /// Remove a sale record.
    pub fn remove_sale(&mut self, sale_id: Uuid) -> Result<(), CoreError> {
        self.portfolio_service.remove_sale(&mut self.store, sale_id)?;
        self.dirty = true;
        Ok(())
    }

    /// Get a single sale by its ID.
    #[must_use]
    pub fn get_sale(&self, sale_id: Uuid) -> Option<&Sale> {
        self.store
            .portfolio_of_sale(sale_id)
            .and_then(|p| p.find_sale(sale_id))
    }

    /// Get a portfolio's sales, newest-created first.
    pub fn get_sales(&self, portfolio_id: Uuid) -> Result<Vec<&Sale>, CoreError> {
        let portfolio = self
            .store
            .find_portfolio(portfolio_id)
            .ok_or_else(|| CoreError::PortfolioNotFound(portfolio_id.to_string()))?;
        let mut sales: Vec<&Sale> = portfolio.sales.iter().collect();
        sales.reverse();
        Ok(sales)
    }

    /// Get all sales recorded against one asset, newest-created first.
    pub fn get_sales_for_asset(&self, asset_id: Uuid) -> Result<Vec<&Sale>, CoreError> {
        let portfolio = self
            .store
            .portfolio_of_asset(asset_id)
            .ok_or_else(|| CoreError::AssetNotFound(asset_id.to_string()))?;
        let mut sales = portfolio.sales_for_asset(asset_id);
        sales.reverse();
        Ok(sales)
    }

    // ── Valuation ───────────────────────────────────────────────────

    /// Full currency-normalized stats for a portfolio, in the display
    /// currency from settings.
    pub fn portfolio_stats(&self, portfolio_id: Uuid) -> Result<PortfolioStats, CoreError> {
        self.portfolio_stats_in(portfolio_id, self.store.settings.display_currency)
    }

    /// Full stats for a portfolio in an explicit display currency.
    pub fn portfolio_stats_in(
        &self,
        portfolio_id: Uuid,
        display_currency: Currency,
    ) -> Result<PortfolioStats, CoreError> {
        let portfolio = self
            .store
            .find_portfolio(portfolio_id)
            .ok_or_else(|| CoreError::PortfolioNotFound(portfolio_id.to_string()))?;
        self.valuation_service.compute_stats(
            portfolio,
            display_currency,
            self.store.settings.usd_to_try_rate,
        )
    }

    /// Market value of a single asset in the display currency from settings.
    pub fn asset_value(&self, asset_id: Uuid) -> Result<f64, CoreError> {
        let asset = self
            .get_asset(asset_id)
            .ok_or_else(|| CoreError::AssetNotFound(asset_id.to_string()))?;
        self.valuation_service.asset_value(
            asset,
            self.store.settings.display_currency,
            self.store.settings.usd_to_try_rate,
        )
    }

    /// Unrealized gain/loss of a single asset in the display currency from
    /// settings.
    pub fn asset_gain_loss(&self, asset_id: Uuid) -> Result<GainLoss, CoreError> {
        let asset = self
            .get_asset(asset_id)
            .ok_or_else(|| CoreError::AssetNotFound(asset_id.to_string()))?;
        self.valuation_service.asset_gain_loss(
            asset,
            self.store.settings.display_currency,
            self.store.settings.usd_to_try_rate,
        )
    }

    /// Net realized profit from a portfolio's sales, in the display currency
    /// from settings.
    pub fn total_sales_profit(&self, portfolio_id: Uuid) -> Result<f64, CoreError> {
        let portfolio = self
            .store
            .find_portfolio(portfolio_id)
            .ok_or_else(|| CoreError::PortfolioNotFound(portfolio_id.to_string()))?;
        self.valuation_service.total_sales_profit(
            portfolio,
            self.store.settings.display_currency,
            self.store.settings.usd_to_try_rate,
        )
    }

    /// Convert an amount between the two supported currencies using the
    /// stored exchange rate.
    pub fn convert(&self, amount: f64, from: Currency, to: Currency) -> Result<f64, CoreError> {
        self.currency_service
            .convert(amount, from, to, self.store.settings.usd_to_try_rate)
    }

    // ── Value History ───────────────────────────────────────────────

    /// Daily portfolio value over a date range (inclusive), in the display
    /// currency from settings.
    pub fn value_history(
        &self,
        portfolio_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ValuePoint>, CoreError> {
        if from > to {
            return Err(CoreError::ValidationError(format!(
                "'from' date ({from}) must not be after 'to' date ({to})"
            )));
        }
        let range_days = (to - from).num_days();
        if range_days > MAX_HISTORY_RANGE_DAYS {
            return Err(CoreError::ValidationError(format!(
                "History range of {range_days} days exceeds maximum of {MAX_HISTORY_RANGE_DAYS} days (10 years)"
            )));
        }

        let portfolio = self
            .store
            .find_portfolio(portfolio_id)
            .ok_or_else(|| CoreError::PortfolioNotFound(portfolio_id.to_string()))?;
        self.history_service.value_history(
            portfolio,
            from,
            to,
            self.store.settings.display_currency,
            self.store.settings.usd_to_try_rate,
        )
    }

    /// Daily portfolio value for the last `days` days up to today.
    pub fn value_history_days(
        &self,
        portfolio_id: Uuid,
        days: u32,
    ) -> Result<Vec<ValuePoint>, CoreError> {
        let to = chrono::Utc::now().date_naive();
        let from = to - chrono::Duration::days(i64::from(days));
        self.value_history(portfolio_id, from, to)
    }

    // ── Settings ────────────────────────────────────────────────────

    /// Get current settings.
    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.store.settings
    }

    /// Set the currency aggregate figures are displayed in.
    pub fn set_display_currency(&mut self, currency: Currency) {
        self.portfolio_service
            .set_display_currency(&mut self.store, currency);
        self.dirty = true;
    }

    /// Set the USD→TRY exchange rate and stamp its update time.
    /// The rate must be a positive finite number.
    pub fn set_exchange_rate(&mut self, rate: f64) -> Result<(), CoreError> {
        self.portfolio_service
            .set_exchange_rate(&mut self.store, rate)?;
        self.dirty = true;
        Ok(())
    }

    /// Returns `true` if the store has been modified since the last save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Export the full store as pretty JSON (unencrypted snapshot for
    /// debugging/display).
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.store)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize store: {e}")))
    }

    /// Build a tracker from a JSON export produced by [`Self::to_json`].
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let store: Store = serde_json::from_str(json)?;
        Ok(Self::build(store))
    }

    /// Export a portfolio's assets as a CSV string.
    /// Columns: id, name, category, amount, purchase_price, purchase_date,
    /// current_price, currency, notes
    pub fn export_assets_to_csv(&self, portfolio_id: Uuid) -> Result<String, CoreError> {
        let portfolio = self
            .store
            .find_portfolio(portfolio_id)
            .ok_or_else(|| CoreError::PortfolioNotFound(portfolio_id.to_string()))?;

        let mut csv = String::from(
            "id,name,category,amount,purchase_price,purchase_date,current_price,currency,notes\n",
        );
        for asset in &portfolio.assets {
            let current_price = asset
                .current_price
                .map(|p| p.to_string())
                .unwrap_or_default();
            let notes = asset.notes.as_deref().unwrap_or("");
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{},{}\n",
                asset.id,
                escape_csv_field(&asset.name),
                asset.category,
                asset.amount,
                asset.purchase_price,
                asset.purchase_date,
                current_price,
                asset.currency,
                escape_csv_field(notes),
            ));
        }
        Ok(csv)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(store: Store) -> Self {
        Self {
            store,
            portfolio_service: PortfolioService::new(),
            valuation_service: ValuationService::new(),
            currency_service: CurrencyService::new(),
            history_service: HistoryService::new(),
            dirty: false,
        }
    }
}

/// Quote a CSV field if it contains commas, quotes, or newlines.
fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
