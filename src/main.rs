mod app;
mod config;
mod contact;
mod date;
mod effects;
mod error;
mod hero;
mod hooks;
mod i18n;
mod logging;
mod nav_bar;
mod preferences;
mod sections;
mod subscription;

fn main() {
    logging::init();
    dioxus::launch(app::App);
}
