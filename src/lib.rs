//! fintrack records income and expenses, tracks monthly budgets and derives the summaries a
//! personal finance dashboard shows: budget utilization, monthly rollups, spending by category and
//! the next date of recurring transactions.

pub mod args;
pub mod commands;
mod config;
pub mod derive;
mod error;
pub mod model;
pub mod session;
pub mod store;
mod utils;
pub mod views;


pub use config::Config;
pub use error::{Error, ErrorType, IntoResult, Result};
pub use session::Session;
pub use store::{JsonFileStore, MemoryStore, Store};
pub use views::LiveViews;
