//! Job finder core: vacancy model, salary ranking and the pure browse state machine.
mod convert;
mod effect;
mod msg;
mod ranker;
mod raw;
mod record;
mod salary;
mod state;
mod update;
mod view_model;

pub use convert::{
    is_base_currency, ConversionError, CurrencyConverter, NoConversion, BASE_CURRENCY,
    BASE_CURRENCY_CODES,
};
pub use effect::Effect;
pub use msg::Msg;
pub use ranker::{hydrate, rank, top_n, DEFAULT_TOP_N};
pub use raw::{dedup_name, field_text, RawVacancy, NAME_KEY};
pub use record::{title_case, Record, VacancyError, NEGOTIABLE, NO_DESCRIPTION};
pub use salary::{normalize_salary, SalaryRange};
pub use state::BrowseState;
pub use update::update;
pub use view_model::BrowseView;
