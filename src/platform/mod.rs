//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time/ticks (`time::FrameClock`)
//! - Input events (`input::InputState`)
//! - Logger setup
//!
//! Storage backends live in [`crate::persistence`].

pub mod input;
pub mod time;

pub use input::InputState;
pub use time::FrameClock;

/// Install the logger for the current target.
///
/// Native builds use `env_logger` (honours `RUST_LOG`, defaults to `info`);
/// wasm builds route to the browser console and install the panic hook.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::warn!("Logger already installed");
    }
}
