use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::asset::Asset;
use crate::models::category::AssetCategory;
use crate::models::currency::Currency;
use crate::models::portfolio::Portfolio;
use crate::models::sale::Sale;
use crate::models::stats::{CategoryBreakdown, GainLoss, PortfolioStats};
use crate::services::currency_service::CurrencyService;

/// Computes currency-normalized valuation figures for assets and portfolios.
///
/// Pure business logic — no I/O, no shared state. Every figure is derived
/// from the records passed in plus a single user-supplied exchange rate.
///
/// Total value follows total-return accounting: held assets contribute their
/// market value, sales contribute their net realized profit (not their gross
/// proceeds). Total value is therefore not a cash balance.
pub struct ValuationService {
    currency_service: CurrencyService,
}

impl ValuationService {
    pub fn new() -> Self {
        Self {
            currency_service: CurrencyService::new(),
        }
    }

    /// Market value of a single asset in the display currency.
    ///
    /// Uses the current price when known, the purchase price otherwise.
    pub fn asset_value(
        &self,
        asset: &Asset,
        display_currency: Currency,
        rate: f64,
    ) -> Result<f64, CoreError> {
        self.currency_service
            .convert(asset.market_value(), asset.currency, display_currency, rate)
    }

    /// Cost basis of a single asset in the display currency.
    pub fn asset_cost_basis(
        &self,
        asset: &Asset,
        display_currency: Currency,
        rate: f64,
    ) -> Result<f64, CoreError> {
        self.currency_service
            .convert(asset.cost_basis(), asset.currency, display_currency, rate)
    }

    /// Unrealized gain/loss of a single asset in the display currency.
    ///
    /// Percentage is relative to cost basis, defined as 0 when the cost
    /// basis is 0.
    pub fn asset_gain_loss(
        &self,
        asset: &Asset,
        display_currency: Currency,
        rate: f64,
    ) -> Result<GainLoss, CoreError> {
        let value = self.asset_value(asset, display_currency, rate)?;
        let cost_basis = self.asset_cost_basis(asset, display_currency, rate)?;

        let amount = value - cost_basis;
        let percentage = if cost_basis > 0.0 {
            (amount / cost_basis) * 100.0
        } else {
            0.0
        };

        Ok(GainLoss { amount, percentage })
    }

    /// Realized gain/loss of one sale against its asset's cost basis,
    /// in the display currency.
    ///
    /// The proceeds convert from the sale's currency and the cost basis of
    /// the sold quantity from the asset's currency — the two may differ.
    pub fn sale_profit(
        &self,
        sale: &Sale,
        asset: &Asset,
        display_currency: Currency,
        rate: f64,
    ) -> Result<f64, CoreError> {
        let proceeds =
            self.currency_service
                .convert(sale.proceeds(), sale.currency, display_currency, rate)?;
        let sold_cost_basis = self.currency_service.convert(
            asset.purchase_price * sale.amount,
            asset.currency,
            display_currency,
            rate,
        )?;
        Ok(proceeds - sold_cost_basis)
    }

    /// Net realized profit across all of a portfolio's sales, in the display
    /// currency. Sales whose asset no longer exists are skipped.
    pub fn total_sales_profit(
        &self,
        portfolio: &Portfolio,
        display_currency: Currency,
        rate: f64,
    ) -> Result<f64, CoreError> {
        let mut total = 0.0;
        for sale in &portfolio.sales {
            if let Some(asset) = portfolio.find_asset(sale.asset_id) {
                total += self.sale_profit(sale, asset, display_currency, rate)?;
            }
        }
        Ok(total)
    }

    /// Full currency-normalized summary of a portfolio.
    ///
    /// An empty portfolio yields all zeros with every category present.
    pub fn compute_stats(
        &self,
        portfolio: &Portfolio,
        display_currency: Currency,
        rate: f64,
    ) -> Result<PortfolioStats, CoreError> {
        let mut total_value = 0.0;
        let mut total_investment = 0.0;

        let mut asset_distribution: HashMap<AssetCategory, CategoryBreakdown> =
            AssetCategory::ALL
                .iter()
                .map(|&c| (c, CategoryBreakdown::default()))
                .collect();

        // 1. Held assets: market value, cost basis, category buckets
        for asset in &portfolio.assets {
            let value = self.asset_value(asset, display_currency, rate)?;
            let investment = self.asset_cost_basis(asset, display_currency, rate)?;

            total_value += value;
            total_investment += investment;

            if let Some(slice) = asset_distribution.get_mut(&asset.category) {
                slice.value += value;
            }
        }

        // 2. Sales: net realized profit flows into total value. A sale whose
        //    asset has been deleted has no cost basis left and is skipped.
        for sale in &portfolio.sales {
            if let Some(asset) = portfolio.find_asset(sale.asset_id) {
                total_value += self.sale_profit(sale, asset, display_currency, rate)?;
            }
        }

        // 3. Allocation percentages
        if total_value > 0.0 {
            for slice in asset_distribution.values_mut() {
                slice.percentage = (slice.value / total_value) * 100.0;
            }
        }

        // 4. Overall gain/loss
        let total_gain_loss = total_value - total_investment;
        let total_gain_loss_percentage = if total_investment > 0.0 {
            (total_gain_loss / total_investment) * 100.0
        } else {
            0.0
        };

        Ok(PortfolioStats {
            currency: display_currency,
            total_value,
            total_investment,
            total_gain_loss,
            total_gain_loss_percentage,
            asset_distribution,
        })
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}
