//! Immutable guess table and its delimited-text storage format.
//!
//! # Storage Format
//!
//! Comma-delimited text with a header row. Tables are written with the
//! columns in the order `response,category,timestamp`:
//!
//! ```text
//! response,category,timestamp
//! 5,C,2024-01-01 00:00:00
//! 2,A,2024-01-01 00:01:00
//! ```
//!
//! Readers locate columns by header name, so files with the columns in a
//! different order, or with extra columns, load as well.

use std::{
    fmt,
    fs::File,
    io::{self, BufWriter},
    path::Path,
};

use crate::{
    DatasetError,
    record::{Column, Record, TIMESTAMP_FORMAT, Value},
};

/// An ordered, immutable sequence of [`Record`]s.
///
/// The row count is fixed at construction; there is no way to append or
/// remove rows afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    records: Vec<Record>,
}

impl From<Vec<Record>> for Table {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl FromIterator<Record> for Table {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl Table {
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterates over the cells of one column in row order.
    pub fn column(&self, column: Column) -> impl ExactSizeIterator<Item = Value> + '_ {
        self.records.iter().map(move |record| record.get(column))
    }

    /// Returns the cells of a numeric column as `f64`.
    ///
    /// Timestamps are converted to seconds elapsed since the first row.
    /// Returns `None` for the non-numeric `category` column.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn numeric_column(&self, column: Column) -> Option<Vec<f64>> {
        match column {
            Column::Response => Some(self.records.iter().map(|r| r.response as f64).collect()),
            Column::Timestamp => {
                let Some(origin) = self.records.first().map(|r| r.timestamp) else {
                    return Some(vec![]);
                };
                Some(
                    self.records
                        .iter()
                        .map(|r| (r.timestamp - origin).num_seconds() as f64)
                        .collect(),
                )
            }
            Column::Category => None,
        }
    }

    /// Writes the table in the delimited storage format.
    pub fn write_csv<W>(&self, writer: W) -> io::Result<()>
    where
        W: io::Write,
    {
        self.write_csv_impl::<W, &str>(writer, None)
    }

    /// Writes the table with one derived column appended after the stored ones.
    ///
    /// # Panics
    ///
    /// Panics if `cells` does not have exactly one entry per row.
    pub fn write_csv_with_column<W, T>(&self, writer: W, name: &str, cells: &[T]) -> io::Result<()>
    where
        W: io::Write,
        T: fmt::Display,
    {
        assert_eq!(
            cells.len(),
            self.records.len(),
            "derived column must have one cell per row"
        );
        self.write_csv_impl(writer, Some((name, cells)))
    }

    fn write_csv_impl<W, T>(&self, writer: W, extra: Option<(&str, &[T])>) -> io::Result<()>
    where
        W: io::Write,
        T: fmt::Display,
    {
        let mut writer = csv::Writer::from_writer(writer);
        let mut header = Column::ALL.map(Column::name).to_vec();
        if let Some((name, _)) = extra {
            header.push(name);
        }
        writer.write_record(&header)?;
        for (idx, record) in self.records.iter().enumerate() {
            let mut row = vec![
                record.response.to_string(),
                record.category.to_string(),
                record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            ];
            if let Some((_, cells)) = extra {
                row.push(cells[idx].to_string());
            }
            writer.write_record(&row)?;
        }
        writer.flush()
    }

    /// Writes the table to `path`, replacing any existing file.
    pub fn save<P>(&self, path: P) -> Result<(), DatasetError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let io_error = |source| DatasetError::Io {
            path: path.to_owned(),
            source,
        };
        let file = File::create(path).map_err(io_error)?;
        self.write_csv(BufWriter::new(file)).map_err(io_error)?;
        tracing::info!(path = %path.display(), rows = self.len(), "dataset saved");
        Ok(())
    }

    /// Loads a table previously written by [`Table::save`].
    pub fn load<P>(path: P) -> Result<Self, DatasetError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_owned(),
            source,
        })?;
        let table = Self::read_csv(file, path)?;
        tracing::info!(path = %path.display(), rows = table.len(), "dataset loaded");
        Ok(table)
    }

    /// Parses a table from delimited text.
    pub fn from_csv_str(content: &str) -> Result<Self, DatasetError> {
        Self::read_csv(content.as_bytes(), Path::new("<memory>"))
    }

    fn read_csv<R>(reader: R, source: &Path) -> Result<Self, DatasetError>
    where
        R: io::Read,
    {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let header = reader
            .headers()
            .map_err(|e| csv_error(e, source))?
            .clone();
        if header.is_empty() {
            return Err(DatasetError::MalformedInput {
                line: 1,
                reason: "missing header row".to_owned(),
            });
        }
        if let Some(column) = Column::ALL
            .into_iter()
            .find(|column| !header.iter().any(|name| name == column.name()))
        {
            return Err(DatasetError::ColumnNotFound {
                name: column.name().to_owned(),
            });
        }

        let records = reader
            .deserialize::<Record>()
            .map(|record| record.map_err(|e| csv_error(e, source)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { records })
    }
}

/// Maps a reader error to an I/O failure on `source` or a malformed-input error.
fn csv_error(error: csv::Error, source: &Path) -> DatasetError {
    let line = error
        .position()
        .and_then(|pos| usize::try_from(pos.line()).ok())
        .unwrap_or(0);
    let reason = error.to_string();
    match error.into_kind() {
        csv::ErrorKind::Io(e) => DatasetError::Io {
            path: source.to_owned(),
            source: e,
        },
        _ => DatasetError::MalformedInput { line, reason },
    }
}
