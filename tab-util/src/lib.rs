//! Tab-delimited records and tables, and a sorted key index, shared by
//! the genomic format converters.
//!
//! - [`record`]: one row, fields addressed by column name or position
//! - [`table`]: rows sharing a header, loaded from tab-delimited text
//! - [`sorted_index`]: ordered key to payload lookup for joining files
//!   by identifier
//! - [`common_io`]: (gzip-aware) file helpers

pub mod common_io;
pub mod error;
pub mod record;
pub mod sorted_index;
pub mod table;

pub use error::{Result, TabError};
pub use record::{ColumnNames, Key, Record};
pub use sorted_index::{Feature, SortedIndex};
pub use table::{LoadOptions, LoadSummary, Table};
