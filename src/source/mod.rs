use serde::de::DeserializeOwned;
use std::{
    fmt::Display,
    fs::{self, File},
    io::{self, Read},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;
use zip::ZipArchive;

mod config;
pub mod models;
pub use config::*;
pub use models::*;

/// Whole-source failures. Any of these aborts the load, no partial result is returned.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Csv file {0} is missing header")]
    MissingHeader(String),
    #[error("Csv file {file} is missing column {column}")]
    MissingColumn { file: String, column: String },
    #[error("Could not find file with name: {0}")]
    FileNotFound(String),
}

/// Where a dataset is read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Source {
    File(PathBuf),
    /// A named entry inside a zip archive.
    Zip { archive: PathBuf, entry: String },
}

impl Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Zip { archive, entry } => write!(f, "{}!{}", archive.display(), entry),
        }
    }
}

impl From<PathBuf> for Source {
    fn from(value: PathBuf) -> Self {
        Source::File(value)
    }
}

impl From<&Path> for Source {
    fn from(value: &Path) -> Self {
        Source::File(value.to_path_buf())
    }
}

impl From<&str> for Source {
    fn from(value: &str) -> Self {
        Source::parse(value)
    }
}

impl Source {
    pub fn file<P: Into<PathBuf>>(path: P) -> Self {
        Source::File(path.into())
    }

    pub fn zip<P: Into<PathBuf>, S: Into<String>>(archive: P, entry: S) -> Self {
        Source::Zip {
            archive: archive.into(),
            entry: entry.into(),
        }
    }

    /// Parses `path` or `archive.zip!entry`.
    pub fn parse(value: &str) -> Self {
        match value.split_once('!') {
            Some((archive, entry)) if !entry.is_empty() => Source::zip(archive, entry),
            _ => Source::file(value),
        }
    }

    /// The file on disk backing this source.
    pub fn path(&self) -> &Path {
        match self {
            Source::File(path) => path,
            Source::Zip { archive, .. } => archive,
        }
    }

    pub fn exists(&self) -> bool {
        self.path().exists()
    }

    /// Reads the whole source into memory.
    pub fn read(&self) -> Result<Vec<u8>, self::Error> {
        match self {
            Source::File(path) => fs::read(path).map_err(|err| self.not_found(err)),
            Source::Zip { archive, entry } => {
                let zip_file = File::open(archive).map_err(|err| self.not_found(err))?;
                let mut archive = ZipArchive::new(zip_file)?;
                let index = archive
                    .index_for_name(entry)
                    .ok_or(self::Error::FileNotFound(self.to_string()))?;
                let mut file = archive.by_index(index)?;
                let mut buf = Vec::new();
                file.read_to_end(&mut buf)?;
                Ok(buf)
            }
        }
    }

    /// A missing file is [`Error::FileNotFound`], any other IO failure stays [`Error::Io`].
    pub(crate) fn not_found(&self, err: io::Error) -> self::Error {
        if err.kind() == io::ErrorKind::NotFound {
            self::Error::FileNotFound(self.to_string())
        } else {
            self::Error::Io(err)
        }
    }
}

/// Reads every row of a delimited source into `T`, after renaming the header with `columns`.
///
/// A blank source is empty input and yields no rows. Short rows leave their
/// trailing fields unset. Rows that do not fit `T` are skipped.
pub(crate) fn read_rows<T>(
    source: &Source,
    columns: &ColumnMap,
    config: &Config,
) -> Result<Vec<T>, self::Error>
where
    T: DeserializeOwned,
{
    let bytes = source.read()?;
    if bytes.iter().all(|byte| byte.is_ascii_whitespace()) {
        debug!("{source} is empty");
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes.as_slice());
    let headers = reader.headers()?.clone();
    if headers.iter().all(|header| header.is_empty()) {
        return Err(self::Error::MissingHeader(source.to_string()));
    }

    let headers = columns.rename(&headers);
    if let Some(column) = columns.missing_required(&headers) {
        return Err(self::Error::MissingColumn {
            file: source.to_string(),
            column: column.to_string(),
        });
    }
    reader.set_headers(headers);

    let mut skipped = 0;
    let rows: Vec<T> = reader
        .deserialize()
        .filter_map(|row| match row {
            Ok(row) => Some(row),
            Err(_) => {
                skipped += 1;
                None
            }
        })
        .collect();
    debug!("Read {} rows from {source}, skipped {skipped}", rows.len());
    Ok(rows)
}

#[test]
fn parse_plain_path() {
    assert_eq!(Source::parse("data/gares.csv"), Source::file("data/gares.csv"));
}

#[test]
fn parse_zip_entry() {
    assert_eq!(
        Source::parse("exports.zip!gares.csv"),
        Source::zip("exports.zip", "gares.csv")
    );
    assert_eq!(Source::parse("exports.zip!"), Source::file("exports.zip!"));
}
