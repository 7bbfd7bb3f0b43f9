use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[macro_use]
pub mod macros;

pub mod command_executors;
pub mod constants;
pub mod messages;  // Message / Command enums
pub mod models;
pub mod network;
pub mod notifications;
pub mod reducers;
pub mod schema_validation;
pub mod state;
pub mod storage;
pub mod timers;
pub mod ui;
pub mod update;    // Root reducer
pub mod user_color;
pub mod utils;
pub mod views;     // ChatView snapshot

pub use ui::ChatApp;

// Main entry point for the WASM application
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize better panic messages
    console_error_panic_hook::set_once();

    debug_log!(
        "Chat client starting, server at {}",
        network::config::current().base_url()
    );

    spawn_local(notifications::request_permission_if_needed());

    Ok(())
}
