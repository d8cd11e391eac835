use crate::errors::CoreError;
use crate::models::currency::Currency;

/// Two-currency linear conversion between TRY and USD.
///
/// The rate is always expressed as TRY per USD, so USD→TRY multiplies and
/// TRY→USD divides. No rounding is applied here — rounding is a
/// presentation concern.
pub struct CurrencyService;

impl CurrencyService {
    pub fn new() -> Self {
        Self
    }

    /// Convert an amount between the two supported currencies.
    ///
    /// Same-currency conversion is the identity and succeeds for any rate,
    /// since the rate is never consulted. Cross-currency conversion requires
    /// a positive finite rate and fails with
    /// [`CoreError::InvalidExchangeRate`] otherwise.
    pub fn convert(
        &self,
        amount: f64,
        from: Currency,
        to: Currency,
        rate: f64,
    ) -> Result<f64, CoreError> {
        if from == to {
            return Ok(amount);
        }

        if !rate.is_finite() || rate <= 0.0 {
            return Err(CoreError::InvalidExchangeRate(rate));
        }

        match (from, to) {
            (Currency::Usd, Currency::Try) => Ok(amount * rate),
            (Currency::Try, Currency::Usd) => Ok(amount / rate),
            // Same-currency pairs are handled by the identity above
            _ => Ok(amount),
        }
    }
}

impl Default for CurrencyService {
    fn default() -> Self {
        Self::new()
    }
}
