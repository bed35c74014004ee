//! Data types for the export pipeline.

mod config;
mod part;
mod table;

pub use config::*;
pub use part::*;
pub use table::*;
