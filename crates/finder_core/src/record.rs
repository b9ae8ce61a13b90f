use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::convert::{ConversionError, CurrencyConverter};
use crate::raw::{field_text, RawVacancy};
use crate::salary::normalize_salary;

/// Shown instead of a salary when none was published.
pub const NEGOTIABLE: &str = "Negotiable";
/// Description used when the posting carries no requirements.
pub const NO_DESCRIPTION: &str = "Requirements not specified.";

static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(https?://)?[\da-z.-]+\.[a-z.]{2,6}([/\w .-]*)*/?$")
        .expect("link pattern compiles")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VacancyError {
    #[error("invalid url: {link}")]
    InvalidUrl { link: String },
    #[error("vacancy has no title")]
    MissingTitle,
    #[error("invalid salary: {0}")]
    InvalidSalary(String),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// A validated vacancy with its salary normalized to the base currency.
///
/// Records compare by salary alone: two different postings paying the same
/// amount are equal, and `<` looks at nothing but the salary. Identity for
/// display and dedup lives in the title/url, never in `==`.
#[derive(Debug, Clone)]
pub struct Record {
    title: String,
    url: String,
    salary: u64,
    description: String,
    location: String,
    contact: Option<String>,
}

impl Record {
    /// Builds a record from its raw form.
    ///
    /// Foreign-currency salaries are resolved through `converter`; a failed
    /// conversion fails the whole construction.
    pub fn from_raw(
        raw: &RawVacancy,
        converter: &dyn CurrencyConverter,
    ) -> Result<Self, VacancyError> {
        let title = field_text(raw, "name").ok_or(VacancyError::MissingTitle)?;
        let url = validate_link(raw.get("link"))?;
        let salary = normalize_salary(raw.get("salary"), converter)?;
        let description = field_text(raw, "description").unwrap_or_else(|| NO_DESCRIPTION.into());
        let location = field_text(raw, "area")
            .map(|area| title_case(&area))
            .unwrap_or_default();
        let contact = field_text(raw, "contact");

        Ok(Self {
            title,
            url,
            salary,
            description,
            location,
            contact,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Salary in the base currency; 0 means "not specified".
    pub fn salary(&self) -> u64 {
        self.salary
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn contact(&self) -> Option<&str> {
        self.contact.as_deref()
    }

    /// Salary-only ordering every comparison operator derives from.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.salary.cmp(&other.salary)
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for Record {}

impl PartialOrd for Record {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for Record {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.title, self.location)?;
        if self.salary == 0 {
            writeln!(f, "Salary: {NEGOTIABLE}")?;
        } else {
            writeln!(f, "Salary: {}", self.salary)?;
        }
        writeln!(f, "Requirements:\n{}", self.description)?;
        writeln!(f, "Contact: {}", self.contact.as_deref().unwrap_or("Not specified"))?;
        writeln!(f, "Link: {}", self.url)?;
        write!(f, "{}", "-".repeat(10))
    }
}

fn validate_link(link: Option<&Value>) -> Result<String, VacancyError> {
    match link {
        Some(Value::String(link)) if LINK_PATTERN.is_match(link) => Ok(link.clone()),
        Some(Value::String(link)) => Err(VacancyError::InvalidUrl { link: link.clone() }),
        Some(other) => Err(VacancyError::InvalidUrl {
            link: other.to_string(),
        }),
        None => Err(VacancyError::InvalidUrl {
            link: "<missing>".into(),
        }),
    }
}

/// Capitalizes the first letter of every word and lowercases the rest.
///
/// A word starts after any non-alphabetic character, so "санкт-петербург"
/// becomes "Санкт-Петербург".
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}
