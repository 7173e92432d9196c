pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod models;
pub mod ui;

pub use error::{AppError, Result};
