use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;

pub fn show_instructions_dialog(app: &adw::Application) -> adw::AlertDialog {
    let dialog = adw::AlertDialog::new(
        Some("Instructions"),
        Some(
            "Flip two cards at a time to find matching pairs.\n\
Matched pairs stay revealed; mismatches turn back over.\n\
Clear the board in as few moves as you can.",
        ),
    );
    dialog.add_response("ok", "Got it");
    dialog.set_default_response(Some("ok"));
    dialog.set_close_response("ok");
    dialog.present(app.active_window().as_ref());
    dialog
}

pub fn show_about_dialog(app: &adw::Application) -> adw::AboutDialog {
    let dialog = adw::AboutDialog::builder()
        .application_name("PairUp")
        .application_icon("io.github.pairup.PairUp")
        .version("0.1.0")
        .comments("A memory game of matching pairs.")
        .build();
    dialog.add_legal_section("PairUp", None, gtk::License::MitX11, None);
    dialog.present(app.active_window().as_ref());
    dialog
}
