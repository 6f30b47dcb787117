use gtk4 as gtk;
use libadwaita as adw;

use crate::game::{Difficulty, GameSession};
use crate::store::FileBestStore;

/// Widget handles plus the game session they render. The session owns all
/// game state; the widgets are a passive surface repainted after each
/// transition.
pub struct AppState {
    pub window: Option<adw::ApplicationWindow>,
    pub moves_label: Option<gtk::Label>,
    pub best_label: Option<gtk::Label>,
    pub difficulty_selector: Option<gtk::DropDown>,
    pub board_container: Option<gtk::Box>,
    pub grid_buttons: Vec<gtk::Button>,
    pub dynamic_css_provider: Option<gtk::CssProvider>,

    pub game: GameSession,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            window: None,
            moves_label: None,
            best_label: None,
            difficulty_selector: None,
            board_container: None,
            grid_buttons: Vec::new(),
            dynamic_css_provider: None,
            game: GameSession::new(Difficulty::Easy, Box::new(FileBestStore::new())),
        }
    }
}
