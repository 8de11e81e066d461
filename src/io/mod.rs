pub mod config_io;
pub mod prefs;
pub mod script;
pub mod seed;
pub mod session;
