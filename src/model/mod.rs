pub mod community;
pub mod config;
pub mod member;
pub mod role;
pub mod roster;
pub mod state;

pub use community::*;
pub use config::*;
pub use member::*;
pub use role::*;
pub use roster::*;
pub use state::*;
