mod config;
mod model;
mod populate;
mod selection;
mod store;

pub use config::*;
pub use store::*;
