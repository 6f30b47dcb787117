use gtk4 as gtk;
use gtk4::prelude::*;

// Static presentation only; card-state classes are toggled from app.rs.
const APP_CSS: &str = "
.app-window {
    background: linear-gradient(135deg, #10141f, #1a2030);
}

.app-header {
    background: transparent;
}

.stats-bar {
    padding: 6px 14px;
    border-radius: 10px;
    background: alpha(#ffffff, 0.06);
}

.stat-label {
    font-weight: 700;
    font-family: monospace;
    color: #9fc6e8;
}

.board-container {
    padding: 10px;
    background: alpha(#ffffff, 0.04);
}

.pair-card {
    background: alpha(#4f79a8, 0.18);
    border: 1px solid alpha(#79a8d8, 0.35);
    transition: background 180ms ease, border-color 180ms ease;
}

.pair-card:hover {
    border-color: alpha(#9fc6e8, 0.7);
}

.pair-card.face-up {
    background: alpha(#2c3a52, 0.85);
    border: 2px solid alpha(#b49fe8, 0.6);
}

.pair-card.matched {
    background: alpha(#3a5c46, 0.6);
    border: 2px solid alpha(#7fd8a0, 0.5);
}

.pair-card-face {
    color: #e8eef6;
}
";

pub(super) fn load_css() {
    let Some(display) = gtk::gdk::Display::default() else {
        return;
    };

    let provider = gtk::CssProvider::new();
    provider.load_from_data(APP_CSS);
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}
