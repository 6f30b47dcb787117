mod game;
mod store;
mod ui;

fn main() {
    ui::app::run();
}
