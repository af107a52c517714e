use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};
use tracing::{debug, info};

use crate::error::FileFormatError;

/// Dense row-major numeric table, as stored in whitespace-delimited text
/// files.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Table {
    /// Build a table from equally sized rows.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, FileFormatError> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(FileFormatError::RaggedRow {
                    path: PathBuf::from("<memory>"),
                    line: i as u64 + 1,
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// `n x 1` table holding one value per row.
    pub fn column(values: &[f64]) -> Self {
        Self {
            rows: values.len(),
            cols: 1,
            data: values.to_vec(),
        }
    }

    pub(crate) fn from_row_major(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(rows * cols, data.len());
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.cols + j]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.rows).map(move |i| self.row(i))
    }

    /// Flatten a single-column or single-row table into a vector.
    pub fn to_vector(&self) -> Result<Vec<f64>, FileFormatError> {
        if self.cols == 1 || self.rows == 1 {
            Ok(self.data.clone())
        } else {
            Err(FileFormatError::NotAVector {
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Read a whitespace-delimited table. A `#` token starts a comment that
    /// runs to the end of the line; blank lines are skipped.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, FileFormatError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| FileFormatError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut reader = ReaderBuilder::new()
            .delimiter(b' ')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .comment(Some(b'#'))
            .from_reader(file);

        let mut data = Vec::new();
        let mut rows = 0usize;
        let mut cols: Option<usize> = None;

        for result in reader.records() {
            let record = result.map_err(|source| FileFormatError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
            let line = record.position().map_or(rows as u64 + 1, |p| p.line());

            let before = data.len();
            let tokens = record
                .iter()
                .flat_map(str::split_whitespace)
                .take_while(|t| !t.starts_with('#'));
            for token in tokens {
                let value = token
                    .parse::<f64>()
                    .map_err(|_| FileFormatError::InvalidNumber {
                        path: path.to_path_buf(),
                        line,
                        token: token.to_string(),
                    })?;
                data.push(value);
            }

            let found = data.len() - before;
            if found == 0 {
                continue;
            }
            match cols {
                None => cols = Some(found),
                Some(expected) if expected != found => {
                    return Err(FileFormatError::RaggedRow {
                        path: path.to_path_buf(),
                        line,
                        expected,
                        found,
                    });
                }
                Some(_) => {}
            }
            rows += 1;
        }

        let Some(cols) = cols else {
            return Err(FileFormatError::Empty {
                path: path.to_path_buf(),
            });
        };

        info!(path = %path.display(), rows, cols, "loaded table");
        Ok(Self { rows, cols, data })
    }

    /// Write the table with single-space delimiters in `%.18e` notation.
    ///
    /// An empty table is rejected, since it could not be read back.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), FileFormatError> {
        let path = path.as_ref();
        if self.data.is_empty() {
            return Err(FileFormatError::Empty {
                path: path.to_path_buf(),
            });
        }
        let file = File::create(path).map_err(|source| FileFormatError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut writer = WriterBuilder::new()
            .delimiter(b' ')
            .has_headers(false)
            .quote_style(QuoteStyle::Never)
            .from_writer(file);

        for row in self.iter_rows() {
            writer
                .write_record(row.iter().map(|v| format!("{v:.18e}")))
                .map_err(|source| FileFormatError::Csv {
                    path: path.to_path_buf(),
                    source,
                })?;
        }
        writer.flush().map_err(|source| FileFormatError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), rows = self.rows, cols = self.cols, "wrote table");
        Ok(())
    }
}

/// Read a table that holds a single row or a single column.
pub fn read_vector(path: impl AsRef<Path>) -> Result<Vec<f64>, FileFormatError> {
    Table::read(path)?.to_vector()
}

/// Write `values` as an `n x 1` table.
pub fn write_vector(values: &[f64], path: impl AsRef<Path>) -> Result<(), FileFormatError> {
    Table::column(values).write(path)
}
