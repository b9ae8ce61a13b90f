use finder_core::{field_text, BrowseView, CurrencyConverter, RawVacancy, Record, NAME_KEY};
use finder_engine::{AppendSummary, Degraded, DeleteOutcome, LoadOutcome};
use finder_logging::finder_warn;

/// Card text for one stored vacancy, or a one-line note when it cannot be shown.
pub fn vacancy_card(raw: &RawVacancy, converter: &dyn CurrencyConverter) -> String {
    match Record::from_raw(raw, converter) {
        Ok(record) => record.to_string(),
        Err(err) => {
            let name = field_text(raw, NAME_KEY).unwrap_or_else(|| "<unnamed>".to_string());
            finder_warn!("Cannot display vacancy {:?}: {}", name, err);
            format!("{name}: cannot display ({err})\n----------")
        }
    }
}

pub fn ranking(records: &[Record]) -> String {
    if records.is_empty() {
        return "No vacancies to rank.".to_string();
    }
    records
        .iter()
        .enumerate()
        .map(|(index, record)| format!("#{}\n{}", index + 1, record))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn browse_header(view: &BrowseView) -> String {
    format!(
        "Vacancy {} of {} (favorites: {})",
        view.position, view.total, view.favorites
    )
}

pub fn append_summary(summary: &AppendSummary) -> String {
    let mut text = format!(
        "Saved {} new vacancies ({} already stored",
        summary.added, summary.duplicates
    );
    if summary.unnamed > 0 {
        text.push_str(&format!(", {} without a name", summary.unnamed));
    }
    text.push_str(&format!("). {} in total.", summary.total));
    text
}

pub fn delete_outcome(outcome: &DeleteOutcome) -> String {
    match outcome {
        DeleteOutcome::Skipped => "Nothing deleted: both a field and a value are needed.".to_string(),
        DeleteOutcome::Deleted { removed, remaining } => {
            format!("Deleted {removed} vacancies, {remaining} left.")
        }
        DeleteOutcome::Failed(failure) => format!("Delete failed: {failure}"),
    }
}

/// Records of a listing, plus a note when the file could not be used.
pub fn listing(outcome: LoadOutcome) -> (Vec<RawVacancy>, Option<String>) {
    let note = outcome.degraded().map(|reason| match reason {
        Degraded::Missing(_) => "No vacancies saved yet.".to_string(),
        other => format!("Showing nothing: {other}"),
    });
    (outcome.into_records(), note)
}
