use gtk4::prelude::*;

use super::state::AppState;

/// Repaints the move counter and the best-score display. Best stays a
/// placeholder until the first recorded win.
pub(super) fn update_counters(st: &AppState) {
    if let Some(label) = &st.moves_label {
        label.set_text(&format!("Moves: {}", st.game.moves()));
    }
    if let Some(label) = &st.best_label {
        match st.game.best() {
            Some(best) => label.set_text(&format!("Best: {}", best)),
            None => label.set_text("Best: --"),
        }
    }
}

pub(super) fn sync_difficulty_selector(st: &AppState) {
    use crate::game::Difficulty;

    if let Some(selector) = &st.difficulty_selector {
        let position = Difficulty::ALL
            .iter()
            .position(|&difficulty| difficulty == st.game.difficulty())
            .unwrap_or(0);
        if selector.selected() != position as u32 {
            selector.set_selected(position as u32);
        }
    }
}
