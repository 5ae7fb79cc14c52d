use std::{fs::File, io::Read, path::Path};

use csv::ReaderBuilder;

use crate::{error::SourceError, row::Row};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

pub fn read_table(path: &Path) -> Result<Table, SourceError> {
    let display = path.display().to_string();
    let file = File::open(path).map_err(|source| SourceError::Open {
        path: display.clone(),
        source,
    })?;

    read_from(file).map_err(|source| SourceError::Csv {
        path: display,
        source,
    })
}

/// Reads CSV with a mandatory header row from any reader.
pub fn read_from<R: Read>(reader: R) -> Result<Table, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header_record = reader.headers()?.clone();
    let mut headers: Vec<String> = Vec::with_capacity(header_record.len());
    for header in &header_record {
        if !headers.iter().any(|existing| existing == header) {
            headers.push(header.to_string());
        }
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(Row::from_record(&header_record, &record));
    }

    Ok(Table { headers, rows })
}
