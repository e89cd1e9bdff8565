pub mod client;
pub mod controller;
pub mod device;
pub mod error;
pub mod hotkeys;
pub mod models;
pub mod overlay;
pub mod refresh;
pub mod volume;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
