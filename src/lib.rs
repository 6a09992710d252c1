pub mod analyzers;
pub mod commands;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod project;
pub mod report;
pub mod text;
pub mod types;

pub use error::AnalysisError;
pub use pipeline::{analyze, AnalysisOptions};
