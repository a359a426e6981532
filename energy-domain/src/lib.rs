pub mod domain;
pub mod error;

pub use error::{AnalysisError, TableError};
