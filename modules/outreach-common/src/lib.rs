pub mod categories;
pub mod config;
pub mod error;
pub mod types;

pub use categories::{Category, CategoryTable};
pub use config::{AuditorConfig, CollectorConfig};
pub use error::OutreachError;
pub use types::*;
