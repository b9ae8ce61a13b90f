use crate::raw::RawVacancy;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BrowseView {
    /// 1-based position of `current`.
    pub position: usize,
    pub total: usize,
    pub current: Option<RawVacancy>,
    pub favorites: usize,
    pub finished: bool,
}
