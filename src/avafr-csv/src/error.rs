use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("{}: missing required column `{column}`", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
