use crate::{BrowseState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: BrowseState, msg: Msg) -> (BrowseState, Vec<Effect>) {
    if state.is_finished() {
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::AddToFavorites => {
            let mut effects = Vec::with_capacity(2);
            if let Some(current) = state.mark_favorite() {
                effects.push(Effect::SaveVacancy(current));
            }
            if state.advance() {
                effects.push(state.finish());
            }
            effects
        }
        Msg::Skip => {
            if state.advance() {
                vec![state.finish()]
            } else {
                Vec::new()
            }
        }
        Msg::Quit => vec![state.finish()],
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
