use thiserror::Error;

/// Currency every stored and reported salary is expressed in.
pub const BASE_CURRENCY: &str = "RUB";

/// Codes the listing source uses for the base currency.
pub const BASE_CURRENCY_CODES: &[&str] = &["RUB", "RUR"];

pub fn is_base_currency(code: &str) -> bool {
    BASE_CURRENCY_CODES
        .iter()
        .any(|base| base.eq_ignore_ascii_case(code))
}

/// Converts an amount in a foreign currency into the base currency.
pub trait CurrencyConverter: Send + Sync {
    fn convert(&self, amount: u64, currency: &str) -> Result<u64, ConversionError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert {amount} {currency} to the base currency: {message}")]
pub struct ConversionError {
    pub amount: u64,
    pub currency: String,
    pub message: String,
}

impl ConversionError {
    pub fn new(amount: u64, currency: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            message: message.into(),
        }
    }
}

/// Converter for setups without a conversion service: every call fails.
///
/// Base-currency salaries never reach a converter, so those records still hydrate.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoConversion;

impl CurrencyConverter for NoConversion {
    fn convert(&self, amount: u64, currency: &str) -> Result<u64, ConversionError> {
        Err(ConversionError::new(
            amount,
            currency,
            "no conversion service configured",
        ))
    }
}
