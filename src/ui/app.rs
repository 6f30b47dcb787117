use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;
use adw::prelude::*;
use gio::SimpleAction;

use crate::game::{Difficulty, FlipOutcome, MISMATCH_HIDE_MS};

use super::board::CONTENT_MARGIN;
use super::dialogs::{show_about_dialog, show_instructions_dialog};
use super::hud;
use super::scene;
use super::state::AppState;
use super::styles;

const APP_ID: &str = "io.github.pairup.PairUp";

pub(super) fn redraw_button_child(button: &gtk::Button) {
    if let Some(child) = button.child() {
        child.queue_draw();
    }
}

fn reveal_button(st: &AppState, index: usize) {
    if let Some(button) = st.grid_buttons.get(index) {
        button.add_css_class("face-up");
        redraw_button_child(button);
    }
}

pub fn handle_card_click(state: &Rc<RefCell<AppState>>, index: usize) {
    let mut st = state.borrow_mut();
    if index >= st.game.cards().len() {
        return;
    }

    let generation = st.game.generation();
    match st.game.flip(index) {
        FlipOutcome::Ignored => {}
        FlipOutcome::FirstUp(index) => {
            reveal_button(&st, index);
        }
        FlipOutcome::Matched { first, second, won } => {
            for index in [first, second] {
                if let Some(button) = st.grid_buttons.get(index) {
                    button.remove_css_class("face-up");
                    button.add_css_class("matched");
                    redraw_button_child(button);
                }
            }
            hud::update_counters(&st);
            if won {
                drop(st);
                scene::show_victory(state);
            }
        }
        FlipOutcome::Mismatched { first, second } => {
            reveal_button(&st, second);
            hud::update_counters(&st);
            drop(st);
            schedule_mismatch_conceal(state, first, second, generation);
        }
    }
}

/// The fixed mismatch observation delay. The callback captures the session
/// generation from schedule time; if a restart or difficulty change happened
/// in the meantime, `conceal_mismatch` refuses and the board is left alone.
fn schedule_mismatch_conceal(
    state: &Rc<RefCell<AppState>>,
    first: usize,
    second: usize,
    generation: u64,
) {
    let state_clone = state.clone();
    glib::timeout_add_local(
        std::time::Duration::from_millis(MISMATCH_HIDE_MS),
        move || {
            let mut st = state_clone.borrow_mut();
            if !st.game.conceal_mismatch(generation) {
                return glib::ControlFlow::Break;
            }
            for index in [first, second] {
                if let Some(button) = st.grid_buttons.get(index) {
                    button.remove_css_class("face-up");
                    redraw_button_child(button);
                }
            }
            glib::ControlFlow::Break
        },
    );
}

pub(super) fn restart_game(state: &Rc<RefCell<AppState>>) {
    state.borrow_mut().game.restart();
    scene::reset_board_visuals(state);
}

pub(super) fn apply_difficulty_change(state: &Rc<RefCell<AppState>>, difficulty: Difficulty) {
    {
        let mut st = state.borrow_mut();
        if st.game.difficulty() == difficulty {
            return;
        }
        st.game.set_difficulty(difficulty);
    }
    scene::rebuild_board(state);
    scene::reset_board_visuals(state);
}

pub fn run() {
    glib::set_prgname(Some(APP_ID));
    let app = adw::Application::builder().application_id(APP_ID).build();

    app.connect_activate(move |app| {
        styles::load_css();

        let state = Rc::new(RefCell::new(AppState::new()));

        let instructions_action = SimpleAction::new("instructions", None);
        instructions_action.connect_activate({
            let app = app.clone();
            move |_, _| {
                show_instructions_dialog(&app);
            }
        });
        app.add_action(&instructions_action);

        let about_action = SimpleAction::new("about", None);
        about_action.connect_activate({
            let app = app.clone();
            move |_, _| {
                show_about_dialog(&app);
            }
        });
        app.add_action(&about_action);

        let quit_action = SimpleAction::new("quit", None);
        quit_action.connect_activate({
            let app = app.clone();
            move |_, _| app.quit()
        });
        app.add_action(&quit_action);

        let dynamic_css_provider = gtk::CssProvider::new();
        if let Some(display) = gtk::gdk::Display::default() {
            gtk::style_context_add_provider_for_display(
                &display,
                &dynamic_css_provider,
                gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
            );
        }

        let title = gtk::Label::new(None);
        title.set_markup("<b>PairUp</b>");
        title.set_halign(gtk::Align::Center);

        let header = adw::HeaderBar::builder().title_widget(&title).build();
        header.add_css_class("app-header");
        header.add_css_class("flat");

        let difficulty_labels: Vec<&str> =
            Difficulty::ALL.iter().map(|level| level.label()).collect();
        let difficulty_selector = gtk::DropDown::from_strings(&difficulty_labels);
        difficulty_selector.set_tooltip_text(Some("Difficulty"));
        difficulty_selector.connect_selected_notify({
            let state = state.clone();
            move |selector| {
                let Some(&difficulty) = Difficulty::ALL.get(selector.selected() as usize) else {
                    return;
                };
                apply_difficulty_change(&state, difficulty);
            }
        });
        header.pack_start(&difficulty_selector);

        let restart_button = gtk::Button::builder()
            .icon_name("view-refresh-symbolic")
            .build();
        restart_button.set_tooltip_text(Some("New Game"));
        restart_button.connect_clicked({
            let state = state.clone();
            move |_| {
                restart_game(&state);
            }
        });

        let menu_model = gio::Menu::new();
        menu_model.append(Some("Instructions"), Some("app.instructions"));
        menu_model.append(Some("About PairUp"), Some("app.about"));
        menu_model.append(Some("Quit"), Some("app.quit"));
        let menu_button = gtk::MenuButton::builder()
            .icon_name("open-menu-symbolic")
            .menu_model(&menu_model)
            .build();

        let end_box = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        end_box.append(&restart_button);
        end_box.append(&menu_button);
        header.pack_end(&end_box);

        let content = build_game_view(&state);

        let toolbar = adw::ToolbarView::new();
        toolbar.set_hexpand(true);
        toolbar.set_vexpand(true);
        toolbar.add_top_bar(&header);
        toolbar.set_content(Some(&content));

        let win = adw::ApplicationWindow::builder()
            .application(app)
            .title("PairUp")
            .default_width(720)
            .default_height(780)
            .content(&toolbar)
            .build();
        win.set_size_request(360, 480);
        win.add_css_class("app-window");

        {
            let mut st = state.borrow_mut();
            st.window = Some(win.clone());
            st.difficulty_selector = Some(difficulty_selector);
            st.dynamic_css_provider = Some(dynamic_css_provider);
        }

        scene::rebuild_board(&state);
        {
            let st = state.borrow();
            hud::update_counters(&st);
        }

        win.present();
    });

    app.run();
}

fn build_game_view(state: &Rc<RefCell<AppState>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 0);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("game-root");

    let content = gtk::Box::new(gtk::Orientation::Vertical, 12);
    content.set_hexpand(true);
    content.set_vexpand(true);
    content.set_halign(gtk::Align::Fill);
    content.set_valign(gtk::Align::Fill);
    content.set_margin_top(CONTENT_MARGIN);
    content.set_margin_bottom(CONTENT_MARGIN);
    content.set_margin_start(CONTENT_MARGIN);
    content.set_margin_end(CONTENT_MARGIN);

    let stats_bar = gtk::Box::new(gtk::Orientation::Horizontal, 18);
    stats_bar.set_halign(gtk::Align::Center);
    stats_bar.add_css_class("stats-bar");

    let moves_label = gtk::Label::new(Some("Moves: 0"));
    moves_label.add_css_class("stat-label");
    let best_label = gtk::Label::new(Some("Best: --"));
    best_label.add_css_class("stat-label");
    stats_bar.append(&moves_label);
    stats_bar.append(&best_label);
    content.append(&stats_bar);

    let board_frame = gtk::AspectFrame::new(0.5, 0.5, 1.0, false);
    board_frame.set_halign(gtk::Align::Fill);
    board_frame.set_valign(gtk::Align::Fill);
    board_frame.set_hexpand(true);
    board_frame.set_vexpand(true);

    let board_card = gtk::Box::new(gtk::Orientation::Vertical, 0);
    board_card.set_halign(gtk::Align::Fill);
    board_card.set_valign(gtk::Align::Fill);
    board_card.set_hexpand(true);
    board_card.set_vexpand(true);
    board_card.add_css_class("board-container");

    board_frame.set_child(Some(&board_card));
    content.append(&board_frame);
    root.append(&content);

    {
        let mut st = state.borrow_mut();
        st.moves_label = Some(moves_label);
        st.best_label = Some(best_label);
        st.board_container = Some(board_card);
    }

    root
}
