#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    /// Save the current vacancy and remember it as a favorite.
    AddToFavorites,
    /// Move on to the next vacancy.
    Skip,
    /// Stop browsing.
    Quit,
    /// Unrecognized input; nothing changes.
    NoOp,
}
