use crate::convert::CurrencyConverter;
use crate::raw::RawVacancy;
use crate::record::{Record, VacancyError};

/// Number of records `top_n` callers ask for unless told otherwise.
pub const DEFAULT_TOP_N: usize = 5;

/// Builds a record for every raw vacancy, stopping at the first failure.
pub fn hydrate(
    raw: &[RawVacancy],
    converter: &dyn CurrencyConverter,
) -> Result<Vec<Record>, VacancyError> {
    raw.iter()
        .map(|vacancy| Record::from_raw(vacancy, converter))
        .collect()
}

/// Sorts by salary, highest first, and keeps the first `n`.
///
/// The sort is stable: records with equal salaries keep their input order.
pub fn rank(mut records: Vec<Record>, n: usize) -> Vec<Record> {
    records.sort_by(|a, b| b.compare(a));
    records.truncate(n);
    records
}

/// The `n` best-paid vacancies among `raw`.
///
/// Any record that fails validation or conversion fails the whole batch.
pub fn top_n(
    raw: &[RawVacancy],
    n: usize,
    converter: &dyn CurrencyConverter,
) -> Result<Vec<Record>, VacancyError> {
    Ok(rank(hydrate(raw, converter)?, n))
}
