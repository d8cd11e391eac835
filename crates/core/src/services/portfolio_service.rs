use chrono::Utc;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::asset::{Asset, AssetPatch};
use crate::models::currency::Currency;
use crate::models::portfolio::Portfolio;
use crate::models::sale::{Sale, SalePatch};
use crate::models::store::Store;

/// Validated record management over the store: portfolios, assets, sales,
/// and settings. Pure business logic — no I/O.
///
/// Every mutation stamps `updated_at` on the touched records, mirroring a
/// persistence layer that assigns timestamps on write.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    // ── Portfolios ──────────────────────────────────────────────────

    /// Add a new portfolio to the store. The name must not be blank.
    pub fn add_portfolio(&self, store: &mut Store, portfolio: Portfolio) -> Result<(), CoreError> {
        if portfolio.name.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Portfolio name must not be empty".into(),
            ));
        }
        log::debug!("adding portfolio '{}' ({})", portfolio.name, portfolio.id);
        store.portfolios.push(portfolio);
        Ok(())
    }

    /// Rename a portfolio and/or replace its description.
    pub fn update_portfolio(
        &self,
        store: &mut Store,
        portfolio_id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<(), CoreError> {
        let portfolio = store
            .find_portfolio_mut(portfolio_id)
            .ok_or_else(|| CoreError::PortfolioNotFound(portfolio_id.to_string()))?;

        if let Some(name) = name {
            if name.trim().is_empty() {
                return Err(CoreError::ValidationError(
                    "Portfolio name must not be empty".into(),
                ));
            }
            portfolio.name = name;
        }
        if let Some(description) = description {
            portfolio.description = Some(description);
        }
        portfolio.updated_at = Utc::now();
        Ok(())
    }

    /// Remove a portfolio. Owned assets and sales go with it.
    pub fn remove_portfolio(&self, store: &mut Store, portfolio_id: Uuid) -> Result<(), CoreError> {
        let idx = store
            .portfolios
            .iter()
            .position(|p| p.id == portfolio_id)
            .ok_or_else(|| CoreError::PortfolioNotFound(portfolio_id.to_string()))?;

        let removed = store.portfolios.remove(idx);
        log::info!(
            "removed portfolio '{}' with {} assets and {} sales",
            removed.name,
            removed.assets.len(),
            removed.sales.len()
        );

        if store.active_portfolio_id == Some(portfolio_id) {
            store.active_portfolio_id = None;
        }
        Ok(())
    }

    /// Select the active portfolio, or clear the selection with `None`.
    pub fn set_active_portfolio(
        &self,
        store: &mut Store,
        portfolio_id: Option<Uuid>,
    ) -> Result<(), CoreError> {
        if let Some(id) = portfolio_id {
            if store.find_portfolio(id).is_none() {
                return Err(CoreError::PortfolioNotFound(id.to_string()));
            }
        }
        store.active_portfolio_id = portfolio_id;
        Ok(())
    }

    // ── Assets ──────────────────────────────────────────────────────

    /// Add an asset to its portfolio. Validates before committing.
    pub fn add_asset(&self, store: &mut Store, asset: Asset) -> Result<(), CoreError> {
        Self::validate_asset_fields(
            &asset.name,
            asset.amount,
            asset.purchase_price,
            asset.current_price,
        )?;

        let portfolio = store
            .find_portfolio_mut(asset.portfolio_id)
            .ok_or_else(|| CoreError::PortfolioNotFound(asset.portfolio_id.to_string()))?;

        log::debug!("adding asset '{}' ({}) to '{}'", asset.name, asset.id, portfolio.name);
        portfolio.assets.push(asset);
        portfolio.updated_at = Utc::now();
        Ok(())
    }

    /// Apply a partial update to an asset. The patched state is validated
    /// before anything is committed.
    pub fn update_asset(
        &self,
        store: &mut Store,
        asset_id: Uuid,
        patch: AssetPatch,
    ) -> Result<(), CoreError> {
        let portfolio = store
            .portfolio_of_asset_mut(asset_id)
            .ok_or_else(|| CoreError::AssetNotFound(asset_id.to_string()))?;
        let asset = portfolio
            .find_asset_mut(asset_id)
            .ok_or_else(|| CoreError::AssetNotFound(asset_id.to_string()))?;

        // Validate the would-be state first so a bad patch leaves the
        // record untouched.
        let name = patch.name.as_deref().unwrap_or(&asset.name);
        let amount = patch.amount.unwrap_or(asset.amount);
        let purchase_price = patch.purchase_price.unwrap_or(asset.purchase_price);
        let current_price = patch.current_price.or(asset.current_price);
        Self::validate_asset_fields(name, amount, purchase_price, current_price)?;

        if let Some(name) = patch.name {
            asset.name = name;
        }
        if let Some(category) = patch.category {
            asset.category = category;
        }
        if let Some(amount) = patch.amount {
            asset.amount = amount;
        }
        if let Some(purchase_price) = patch.purchase_price {
            asset.purchase_price = purchase_price;
        }
        if let Some(purchase_date) = patch.purchase_date {
            asset.purchase_date = purchase_date;
        }
        if let Some(current_price) = patch.current_price {
            asset.current_price = Some(current_price);
        }
        if let Some(currency) = patch.currency {
            asset.currency = currency;
        }
        if let Some(notes) = patch.notes {
            asset.notes = Some(notes);
        }
        asset.updated_at = Utc::now();
        portfolio.updated_at = Utc::now();
        Ok(())
    }

    /// Update only an asset's current market price.
    pub fn set_current_price(
        &self,
        store: &mut Store,
        asset_id: Uuid,
        price: f64,
    ) -> Result<(), CoreError> {
        if !price.is_finite() || price < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Current price must be a non-negative finite number, got {price}"
            )));
        }
        let portfolio = store
            .portfolio_of_asset_mut(asset_id)
            .ok_or_else(|| CoreError::AssetNotFound(asset_id.to_string()))?;
        let asset = portfolio
            .find_asset_mut(asset_id)
            .ok_or_else(|| CoreError::AssetNotFound(asset_id.to_string()))?;
        asset.current_price = Some(price);
        asset.updated_at = Utc::now();
        Ok(())
    }

    /// Remove an asset. Its sales are cascade-deleted, which also discards
    /// their realized gain/loss history.
    pub fn remove_asset(&self, store: &mut Store, asset_id: Uuid) -> Result<(), CoreError> {
        let portfolio = store
            .portfolio_of_asset_mut(asset_id)
            .ok_or_else(|| CoreError::AssetNotFound(asset_id.to_string()))?;

        let idx = portfolio
            .assets
            .iter()
            .position(|a| a.id == asset_id)
            .ok_or_else(|| CoreError::AssetNotFound(asset_id.to_string()))?;

        let removed = portfolio.assets.remove(idx);
        let sales_before = portfolio.sales.len();
        portfolio.sales.retain(|s| s.asset_id != asset_id);
        let sales_dropped = sales_before - portfolio.sales.len();
        portfolio.updated_at = Utc::now();

        log::info!(
            "removed asset '{}' and {} associated sale(s)",
            removed.name,
            sales_dropped
        );
        Ok(())
    }

    // ── Sales ───────────────────────────────────────────────────────

    /// Record a sale against an existing asset. Validates before committing.
    ///
    /// Selling more than the held quantity is accepted — the books are the
    /// user's responsibility — but logged at warn level.
    pub fn add_sale(&self, store: &mut Store, sale: Sale) -> Result<(), CoreError> {
        Self::validate_sale_fields(sale.amount, sale.sale_price)?;

        let portfolio = store
            .portfolio_of_asset_mut(sale.asset_id)
            .ok_or_else(|| CoreError::AssetNotFound(sale.asset_id.to_string()))?;

        let held = portfolio
            .find_asset(sale.asset_id)
            .map(|a| a.amount)
            .unwrap_or(0.0);
        let already_sold = portfolio.sold_amount(sale.asset_id);
        if already_sold + sale.amount > held {
            log::warn!(
                "sale of {} exceeds held amount ({} held, {} already sold)",
                sale.amount,
                held,
                already_sold
            );
        }

        portfolio.sales.push(sale);
        portfolio.updated_at = Utc::now();
        Ok(())
    }

    /// Apply a partial update to a sale.
    pub fn update_sale(
        &self,
        store: &mut Store,
        sale_id: Uuid,
        patch: SalePatch,
    ) -> Result<(), CoreError> {
        let portfolio = store
            .portfolio_of_sale_mut(sale_id)
            .ok_or_else(|| CoreError::SaleNotFound(sale_id.to_string()))?;
        let sale = portfolio
            .find_sale_mut(sale_id)
            .ok_or_else(|| CoreError::SaleNotFound(sale_id.to_string()))?;

        let amount = patch.amount.unwrap_or(sale.amount);
        let sale_price = patch.sale_price.unwrap_or(sale.sale_price);
        Self::validate_sale_fields(amount, sale_price)?;

        if let Some(amount) = patch.amount {
            sale.amount = amount;
        }
        if let Some(sale_price) = patch.sale_price {
            sale.sale_price = sale_price;
        }
        if let Some(sale_date) = patch.sale_date {
            sale.sale_date = sale_date;
        }
        if let Some(currency) = patch.currency {
            sale.currency = currency;
        }
        if let Some(notes) = patch.notes {
            sale.notes = Some(notes);
        }
        sale.updated_at = Utc::now();
        portfolio.updated_at = Utc::now();
        Ok(())
    }

    /// Remove a sale record.
    pub fn remove_sale(&self, store: &mut Store, sale_id: Uuid) -> Result<(), CoreError> {
        let portfolio = store
            .portfolio_of_sale_mut(sale_id)
            .ok_or_else(|| CoreError::SaleNotFound(sale_id.to_string()))?;
        let idx = portfolio
            .sales
            .iter()
            .position(|s| s.id == sale_id)
            .ok_or_else(|| CoreError::SaleNotFound(sale_id.to_string()))?;
        portfolio.sales.remove(idx);
        portfolio.updated_at = Utc::now();
        Ok(())
    }

    // ── Settings ────────────────────────────────────────────────────

    /// Set the USD→TRY exchange rate. Must be a positive finite number.
    pub fn set_exchange_rate(&self, store: &mut Store, rate: f64) -> Result<(), CoreError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(CoreError::InvalidExchangeRate(rate));
        }
        store.settings.usd_to_try_rate = rate;
        store.settings.exchange_rate_updated = Utc::now();
        log::debug!("exchange rate set to {rate}");
        Ok(())
    }

    /// Set the currency aggregate figures are displayed in.
    pub fn set_display_currency(&self, store: &mut Store, currency: Currency) {
        store.settings.display_currency = currency;
    }

    // ── Validation ──────────────────────────────────────────────────

    fn validate_asset_fields(
        name: &str,
        amount: f64,
        purchase_price: f64,
        current_price: Option<f64>,
    ) -> Result<(), CoreError> {
        if name.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Asset name must not be empty".into(),
            ));
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Asset amount must be positive, got {amount}"
            )));
        }
        if !purchase_price.is_finite() || purchase_price < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Purchase price must be a non-negative finite number, got {purchase_price}"
            )));
        }
        if let Some(price) = current_price {
            if !price.is_finite() || price < 0.0 {
                return Err(CoreError::ValidationError(format!(
                    "Current price must be a non-negative finite number, got {price}"
                )));
            }
        }
        Ok(())
    }

    fn validate_sale_fields(amount: f64, sale_price: f64) -> Result<(), CoreError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Sale amount must be positive, got {amount}"
            )));
        }
        if !sale_price.is_finite() || sale_price < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Sale price must be a non-negative finite number, got {sale_price}"
            )));
        }
        Ok(())
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
