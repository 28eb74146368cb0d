mod components;
mod config;
mod error;
mod location;
mod model;
mod network;
mod render;
mod state;
mod suggest;
mod util;
mod weather;

use components::app::App;

fn main() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }
    tracing::info!("starting commute dashboard");
    yew::Renderer::<App>::new().render();
}
