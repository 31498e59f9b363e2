//! Roster ingest and output.
//!
//! Rosters are read from CSV into an uninterpreted [`Roster`] table. After a
//! simulation the enriched rows can be written back out next to the original
//! columns.

mod reader;
mod table;
mod writer;

pub use reader::{read_csv, read_csv_path};
pub use table::{Roster, RosterRow};
pub use writer::write_enriched_csv;
