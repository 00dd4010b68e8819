pub mod commands;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use services::{enumerate_all_names, resolve_slug, CharacterSource, RickAndMortyClient};
pub use utils::{from_slug, to_slug};

/// Initialize logging once. Use RUST_LOG to override (e.g. `RUST_LOG=debug`).
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(
        if cfg!(debug_assertions) {
            "debug"
        } else {
            "info"
        },
    ))
    .try_init();
}
