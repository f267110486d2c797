//! csvdoc - Quote-aware delimited text tables
//!
//! Parses delimiter-separated text into an ordered table of string rows,
//! answers simple queries over it, normalizes columns in place, infers a
//! storage type per column and renders the result as CSV, JSON, HTML or a
//! record declaration.

pub mod config;
pub mod error;
pub mod infer;
pub mod model;
pub mod normalize;
pub mod output;
pub mod parser;

pub use config::Config;
pub use error::{Result, TableError};
pub use model::{Delimiter, Row, Table};
