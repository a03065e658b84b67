pub mod config;
pub use self::config::{Config, Host};

pub mod console;
pub use self::console::Console;

pub mod session;
pub use self::session::Session;

mod start;
pub use self::start::{get_config_file, start};

mod commands;
