use log::{error, info, warn};

mod app;
mod bindings;
mod config;
mod countdown;
mod dom;
mod error;
mod page;
mod navigation {
    pub mod active_link;
    pub mod menu;
    pub mod scroll_markers;
    pub mod smooth_scroll;
}
mod modals {
    pub mod carousel;
    pub mod event;
    pub mod member;
    pub mod shell;
}
mod effects {
    pub mod fade_in;
    pub mod reveal;
    pub mod tilt;
    pub mod typing;
}

use config::Config;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting site interactions");
    let config = match dom::document().and_then(|document| Config::from_document(&document)) {
        Ok(config) => config,
        Err(err) => {
            warn!("falling back to default config: {}", err);
            Config::default()
        }
    };

    if let Err(err) = app::mount(config) {
        error!("could not mount page behaviours: {}", err);
    }
}
