//! Tabular data access port trait.

use std::path::Path;

use crate::domain::error::TradelabError;
use crate::domain::table::RawTable;

pub trait TablePort {
    /// Read a delimited file with a header row into a [`RawTable`]. Rows may
    /// differ in width; shape checks belong to the loader.
    fn read_table(&self, path: &Path) -> Result<RawTable, TradelabError>;

    fn write_table(&self, table: &RawTable, path: &Path) -> Result<(), TradelabError>;
}
