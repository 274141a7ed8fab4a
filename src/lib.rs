pub mod cli;
pub mod config;
pub mod core;
pub mod error;

pub use config::Config;
pub use core::Engine;
pub use error::{Result, StrutscanError};
