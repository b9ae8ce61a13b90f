use crate::raw::RawVacancy;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Persist one vacancy into the main store.
    SaveVacancy(RawVacancy),
    /// Browsing ended; persist the favorites picked during the session.
    SaveFavorites(Vec<RawVacancy>),
}
