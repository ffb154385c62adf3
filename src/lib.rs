//! gofinances: a personal-finance ledger that summarizes income and expenses and breaks a month of
//! expenses down by category.

pub mod args;
pub mod commands;
mod config;
mod error;
pub mod format;
pub mod model;
pub mod resume;
pub mod screen;
pub mod storage;
pub mod summary;
mod utils;


pub use config::Config;
pub use error::{DataField, DataFormatError, Error, ErrorType, Result};
