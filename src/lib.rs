//! Resume tailor library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod letter;
pub mod output;
pub mod processing;
pub mod tailor;

pub use config::Config;
pub use error::{Result, TailorError};
