use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use libadwaita as adw;
use adw::prelude::*;

use super::app::{redraw_button_child, restart_game};
use super::board::build_board_grid;
use super::hud;
use super::state::AppState;

/// Tears the old grid down and builds one for the current difficulty.
pub(super) fn rebuild_board(state: &Rc<RefCell<AppState>>) {
    let (board_container, grid_cols, grid_rows) = {
        let st = state.borrow();
        let (cols, rows) = st.game.difficulty().grid();
        (st.board_container.clone(), cols, rows)
    };
    let Some(board_container) = board_container else {
        return;
    };

    while let Some(child) = board_container.first_child() {
        board_container.remove(&child);
    }
    let grid = build_board_grid(state);
    let grid_ratio = if grid_rows > 0 {
        grid_cols as f32 / grid_rows as f32
    } else {
        1.0
    };
    let grid_frame = gtk::AspectFrame::new(0.5, 0.5, grid_ratio, false);
    grid_frame.set_halign(gtk::Align::Fill);
    grid_frame.set_valign(gtk::Align::Fill);
    grid_frame.set_hexpand(true);
    grid_frame.set_vexpand(true);
    grid_frame.set_child(Some(&grid));
    board_container.append(&grid_frame);
}

/// Puts every card button back to its face-down look and refreshes the HUD.
pub(super) fn reset_board_visuals(state: &Rc<RefCell<AppState>>) {
    let st = state.borrow();
    for button in &st.grid_buttons {
        button.remove_css_class("face-up");
        button.remove_css_class("matched");
        redraw_button_child(button);
    }
    hud::update_counters(&st);
    hud::sync_difficulty_selector(&st);
}

pub(super) fn show_victory(state: &Rc<RefCell<AppState>>) {
    let (moves, best, window) = {
        let st = state.borrow();
        (st.game.moves(), st.game.best(), st.window.clone())
    };
    let body = match best {
        Some(best) => format!("Solved in {} moves.\nBest: {} moves.", moves, best),
        None => format!("Solved in {} moves.", moves),
    };

    let dialog = adw::AlertDialog::new(Some("Board complete!"), Some(&body));
    dialog.add_response("again", "Play Again");
    dialog.add_response("close", "Close");
    dialog.set_default_response(Some("again"));
    dialog.set_close_response("close");
    dialog.connect_response(Some("again"), {
        let state = state.clone();
        move |_, _| {
            restart_game(&state);
        }
    });
    dialog.present(window.as_ref());
}
