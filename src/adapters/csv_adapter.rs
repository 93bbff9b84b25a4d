//! Delimited text adapter backed by the `csv` crate.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;

use crate::domain::error::TradelabError;
use crate::domain::table::RawTable;
use crate::ports::table_port::TablePort;

pub struct CsvAdapter {
    delimiter: u8,
}

impl Default for CsvAdapter {
    fn default() -> Self {
        Self::new(b',')
    }
}

impl CsvAdapter {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub fn read_from<R: Read>(&self, reader: R) -> Result<RawTable, TradelabError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(RawTable::new(headers, rows))
    }

    pub fn write_to<W: Write>(&self, table: &RawTable, writer: W) -> Result<(), TradelabError> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_writer(writer);
        wtr.write_record(&table.headers)?;
        for row in &table.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl TablePort for CsvAdapter {
    fn read_table(&self, path: &Path) -> Result<RawTable, TradelabError> {
        let file = File::open(path).map_err(|e| TradelabError::Csv {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        let table = self.read_from(file)?;
        debug!(
            path = %path.display(),
            columns = table.width(),
            rows = table.rows.len(),
            "read table"
        );
        Ok(table)
    }

    fn write_table(&self, table: &RawTable, path: &Path) -> Result<(), TradelabError> {
        let file = File::create(path)?;
        self.write_to(table, file)
    }
}
