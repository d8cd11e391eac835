use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::currency::Currency;
use crate::models::history::ValuePoint;
use crate::models::portfolio::Portfolio;
use crate::services::valuation_service::ValuationService;

/// Generates chart-ready value series from portfolio records.
///
/// The system keeps no historical price data — the only prices it knows are
/// each asset's purchase and current price. The series is therefore a
/// deterministic replay of the records: an asset starts counting on its
/// purchase date (at its present effective price), a sale's realized profit
/// starts counting on its sale date. Deterministic, never synthetic.
pub struct HistoryService {
    valuation_service: ValuationService,
}

impl HistoryService {
    pub fn new() -> Self {
        Self {
            valuation_service: ValuationService::new(),
        }
    }

    /// Portfolio value for each day from `from` to `to` (inclusive), in the
    /// display currency. The caller validates the range.
    pub fn value_history(
        &self,
        portfolio: &Portfolio,
        from: NaiveDate,
        to: NaiveDate,
        display_currency: Currency,
        rate: f64,
    ) -> Result<Vec<ValuePoint>, CoreError> {
        let mut points = Vec::new();
        let mut current_date = from;

        while current_date <= to {
            let mut value = 0.0;

            for asset in &portfolio.assets {
                if asset.purchase_date <= current_date {
                    value += self
                        .valuation_service
                        .asset_value(asset, display_currency, rate)?;
                }
            }

            for sale in &portfolio.sales {
                if sale.sale_date <= current_date {
                    if let Some(asset) = portfolio.find_asset(sale.asset_id) {
                        value += self
                            .valuation_service
                            .sale_profit(sale, asset, display_currency, rate)?;
                    }
                }
            }

            points.push(ValuePoint {
                date: current_date,
                value,
            });

            current_date = match current_date.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        Ok(points)
    }
}

impl Default for HistoryService {
    fn default() -> Self {
        Self::new()
    }
}
