mod catalog;
mod components;
mod config;
mod engine;
mod error;
mod input;
mod model;
mod recognizer;
mod share;
mod state;
mod util;

use components::app::App;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
    yew::Renderer::<App>::new().render();
}
