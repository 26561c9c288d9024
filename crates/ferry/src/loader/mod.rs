//! Fetching and parsing of the fleet and timetable tables.

pub mod fetch;
pub mod table;

#[cfg(feature = "http")]
pub use fetch::HttpFetcher;
pub use fetch::{DataFetcher, FileFetcher, SourceFetcher};
pub use table::{load_table, parse_table, Row, Table};
