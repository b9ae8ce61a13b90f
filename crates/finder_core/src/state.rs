use crate::raw::RawVacancy;
use crate::view_model::BrowseView;
use crate::Effect;

/// One pass over a list of vacancies, one at a time, collecting favorites.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BrowseState {
    items: Vec<RawVacancy>,
    cursor: usize,
    favorites: Vec<usize>,
    finished: bool,
}

impl BrowseState {
    /// Starts browsing `items`. An empty list is finished from the start.
    pub fn new(items: Vec<RawVacancy>) -> Self {
        let finished = items.is_empty();
        Self {
            items,
            finished,
            ..Self::default()
        }
    }

    pub fn view(&self) -> BrowseView {
        BrowseView {
            position: (self.cursor + 1).min(self.items.len()),
            total: self.items.len(),
            current: self.current().cloned(),
            favorites: self.favorites.len(),
            finished: self.finished,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current(&self) -> Option<&RawVacancy> {
        if self.finished {
            return None;
        }
        self.items.get(self.cursor)
    }

    pub(crate) fn mark_favorite(&mut self) -> Option<RawVacancy> {
        let current = self.current()?.clone();
        self.favorites.push(self.cursor);
        Some(current)
    }

    /// Moves to the next item; returns `true` once the list is exhausted.
    pub(crate) fn advance(&mut self) -> bool {
        self.cursor += 1;
        self.cursor >= self.items.len()
    }

    pub(crate) fn finish(&mut self) -> Effect {
        self.finished = true;
        let favorites = self
            .favorites
            .iter()
            .filter_map(|index| self.items.get(*index).cloned())
            .collect();
        Effect::SaveFavorites(favorites)
    }
}
