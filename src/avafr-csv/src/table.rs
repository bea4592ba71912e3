use std::{collections::HashMap, fs::File, io::ErrorKind, path::Path};

use chrono::NaiveDate;
use csv::StringRecord;

use crate::{
    CsvError,
    helpers::{normalize_header, parse_count, parse_date, parse_float, parse_user_id},
};

pub(crate) const MINUTES_PER_DAY: u32 = 24 * 60;

/// Rows parsed from one file, with the number of malformed rows that were
/// skipped on the way.
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub records: Vec<T>,
    pub rows_read: usize,
    pub skipped: usize,
}

pub(crate) fn open_reader(path: &Path) -> Result<csv::Reader<File>, CsvError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => CsvError::FileNotFound(path.to_path_buf()),
        _ => CsvError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    Ok(csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file))
}

pub(crate) struct HeaderMap(HashMap<String, usize>);

impl HeaderMap {
    pub(crate) fn read(reader: &mut csv::Reader<File>, path: &Path) -> Result<Self, CsvError> {
        let headers = reader.headers().map_err(|source| CsvError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self(
            headers
                .iter()
                .enumerate()
                .map(|(idx, name)| (normalize_header(name), idx))
                .collect(),
        ))
    }

    pub(crate) fn index(&self, column: &str) -> Option<usize> {
        self.0.get(&normalize_header(column)).copied()
    }

    pub(crate) fn require(&self, path: &Path, column: &'static str) -> Result<usize, CsvError> {
        self.index(column).ok_or_else(|| CsvError::MissingColumn {
            path: path.to_path_buf(),
            column,
        })
    }
}

/// One data row with name-based field access.
pub(crate) struct Row<'a> {
    record: &'a StringRecord,
    headers: &'a HeaderMap,
}

impl Row<'_> {
    fn raw(&self, column: &str) -> Result<&str, String> {
        self.headers
            .index(column)
            .and_then(|idx| self.record.get(idx))
            .ok_or_else(|| format!("missing field `{column}`"))
    }

    /// `None` when the column is absent or the cell is empty.
    pub(crate) fn optional(&self, column: &str) -> Option<&str> {
        self.raw(column).ok().filter(|value| !value.is_empty())
    }

    pub(crate) fn user_id(&self, column: &str) -> Result<i64, String> {
        let value = self.raw(column)?;
        parse_user_id(value).ok_or_else(|| format!("invalid {column} `{value}`"))
    }

    pub(crate) fn date(&self, column: &str) -> Result<NaiveDate, String> {
        let value = self.raw(column)?;
        parse_date(value).ok_or_else(|| format!("invalid {column} `{value}`"))
    }

    pub(crate) fn count(&self, column: &str) -> Result<u32, String> {
        let value = self.raw(column)?;
        parse_count(value).ok_or_else(|| format!("invalid {column} `{value}`"))
    }

    /// A count of minutes within one day.
    pub(crate) fn minutes(&self, column: &str) -> Result<u32, String> {
        let minutes = self.count(column)?;
        if minutes > MINUTES_PER_DAY {
            return Err(format!("{column} `{minutes}` exceeds {MINUTES_PER_DAY} minutes"));
        }
        Ok(minutes)
    }

    /// Missing column or empty cell reads as zero.
    pub(crate) fn count_or_zero(&self, column: &str) -> Result<u32, String> {
        match self.optional(column) {
            Some(value) => parse_count(value).ok_or_else(|| format!("invalid {column} `{value}`")),
            None => Ok(0),
        }
    }

    pub(crate) fn float_or_zero(&self, column: &str) -> Result<f64, String> {
        match self.optional(column) {
            Some(value) => parse_float(value).ok_or_else(|| format!("invalid {column} `{value}`")),
            None => Ok(0.0),
        }
    }
}

/// Reads every row of `path`, validating `required` columns up front.
/// Rows that fail `parse` are logged and skipped.
pub(crate) fn read_rows<T, F>(
    path: &Path,
    required: &[&'static str],
    parse: F,
) -> Result<Loaded<T>, CsvError>
where
    F: Fn(&Row<'_>) -> Result<T, String>,
{
    let mut reader = open_reader(path)?;
    let headers = HeaderMap::read(&mut reader, path)?;
    for column in required {
        headers.require(path, column)?;
    }

    let mut records = Vec::new();
    let mut rows_read = 0;
    let mut skipped = 0;

    for (idx, result) in reader.records().enumerate() {
        // records start on line 2, after the header
        let line = idx + 2;
        rows_read += 1;

        let parsed = result
            .map_err(|e| e.to_string())
            .and_then(|record| parse(&Row { record: &record, headers: &headers }));

        match parsed {
            Ok(row) => records.push(row),
            Err(message) => {
                warn!("{}:{}: skipping row: {}", path.display(), line, message);
                skipped += 1;
            }
        }
    }

    debug!(
        "{}: {} rows read, {} skipped",
        path.display(),
        rows_read,
        skipped
    );

    Ok(Loaded {
        records,
        rows_read,
        skipped,
    })
}
