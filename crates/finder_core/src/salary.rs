use finder_logging::finder_debug;
use serde_json::{Map, Value};

use crate::convert::{is_base_currency, CurrencyConverter};
use crate::VacancyError;

/// Salary bounds exactly as the listing source reports them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalaryRange {
    pub from: Option<u64>,
    pub to: Option<u64>,
    pub currency: String,
}

impl SalaryRange {
    /// Parses the raw `salary` field.
    ///
    /// Absent, `null` and `{}` mean "not specified" and yield `Ok(None)`.
    pub fn from_raw(value: Option<&Value>) -> Result<Option<Self>, VacancyError> {
        let object = match value {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Object(object)) if object.is_empty() => return Ok(None),
            Some(Value::Object(object)) => object,
            Some(other) => {
                return Err(VacancyError::InvalidSalary(format!(
                    "expected an object, found {other}"
                )))
            }
        };

        let currency = object
            .get("currency")
            .and_then(Value::as_str)
            .ok_or_else(|| VacancyError::InvalidSalary("missing currency".into()))?;

        Ok(Some(Self {
            from: parse_bound(object, "from")?,
            to: parse_bound(object, "to")?,
            currency: currency.to_string(),
        }))
    }

    /// Floor of the mean of both bounds, a missing bound counting as zero.
    pub fn midpoint(&self) -> u64 {
        let sum = u128::from(self.from.unwrap_or(0)) + u128::from(self.to.unwrap_or(0));
        // Half of a sum of two u64 values always fits back into u64.
        (sum / 2) as u64
    }

    pub fn normalize(&self, converter: &dyn CurrencyConverter) -> Result<u64, VacancyError> {
        let mid = self.midpoint();
        if is_base_currency(&self.currency) {
            return Ok(mid);
        }
        let converted = converter.convert(mid, &self.currency)?;
        finder_debug!(
            "Converted salary {} {} -> {}",
            mid,
            self.currency,
            converted
        );
        Ok(converted)
    }
}

/// Normalized salary of a raw `salary` field; 0 when none is given.
pub fn normalize_salary(
    value: Option<&Value>,
    converter: &dyn CurrencyConverter,
) -> Result<u64, VacancyError> {
    match SalaryRange::from_raw(value)? {
        Some(range) => range.normalize(converter),
        None => Ok(0),
    }
}

fn parse_bound(object: &Map<String, Value>, key: &str) -> Result<Option<u64>, VacancyError> {
    let invalid = || VacancyError::InvalidSalary(format!("`{key}` is not a non-negative amount"));
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => {
            if let Some(value) = number.as_u64() {
                return Ok(Some(value));
            }
            number
                .as_f64()
                .filter(|value| value.is_finite() && *value >= 0.0)
                .map(|value| Some(value.trunc() as u64))
                .ok_or_else(invalid)
        }
        Some(Value::String(text)) => text.trim().parse::<u64>().map(Some).map_err(|_| invalid()),
        Some(_) => Err(invalid()),
    }
}
