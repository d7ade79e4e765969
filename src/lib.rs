pub mod config;
pub mod error;
pub mod handlers;
pub mod services;

pub use error::{Error, Result};
pub use services::aggregate::{aggregate, InputRecord, OutputRecord, Value};
pub use services::cookbook::{parse_handwriting, Cookbook, Entry, RecipeSummary};
