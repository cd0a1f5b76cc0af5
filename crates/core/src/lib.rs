pub mod config;
pub mod document;
pub mod error;

pub use config::Config;
pub use document::*;
pub use error::*;
