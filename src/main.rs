//! Entry point for the **stackwm** window manager.
//!
//! Opens the X11 session, grabs the key bindings and runs the event loop on
//! the main thread until quit is requested.

use log::{error, info};
use stackwm::config::{self, Config};
use stackwm::manager::Manager;
use stackwm::spawn::DetachedSpawner;
use stackwm::x11::X11Session;

/// Try to load the config from `$XDG_CONFIG_HOME/stackwm/config.json`,
/// falling back to compiled-in defaults.
fn load_config() -> Config {
    let path = config::default_path();
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no usable config file ({}), using defaults", e);
            Config::default()
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("starting stackwm");
    let config = load_config();

    let session = match X11Session::open() {
        Ok(s) => s,
        Err(e) => {
            error!("failed to open X11 session: {}", e);
            std::process::exit(1);
        }
    };

    let mut manager = Manager::new(session, DetachedSpawner, config);
    manager.grab_keys();

    if let Err(e) = manager.run() {
        error!("{}", e);
        std::process::exit(1);
    }
    info!("stackwm exited");
}
