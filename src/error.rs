//! Crate-wide error type.
//!
//! Mirrors the flat, manually-implemented error style used throughout this
//! lineage of Parquet crates: one enum, no `thiserror`, a `Result` alias,
//! and a `From<std::io::Error>` so `?` works across I/O boundaries.

/// The kinds of failure the column encoding core can report.
#[derive(Debug)]
pub enum Error {
    /// The input bytes violate the wire format (bad varint termination,
    /// truncated run, invalid bit width, ...).
    Malformed(String),
    /// The page or column declares an `Encoding` this core recognizes by
    /// name but does not implement a codec for.
    EncodingUnsupported(String),
    /// A schema builder slot (list item, map key/value, struct child name)
    /// was assigned more than once.
    SchemaAssignConflict(String),
    /// Definition/repetition levels decoded for a column don't agree with
    /// what the column's position in the schema allows.
    LevelMismatch(String),
    /// A value's physical type doesn't match what the column descriptor
    /// declares.
    TypeMismatch(String),
    /// The underlying reader or writer failed.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Malformed(message) => write!(fmt, "malformed input: {}", message),
            Error::EncodingUnsupported(message) => write!(fmt, "unsupported encoding: {}", message),
            Error::SchemaAssignConflict(message) => write!(fmt, "schema conflict: {}", message),
            Error::LevelMismatch(message) => write!(fmt, "level mismatch: {}", message),
            Error::TypeMismatch(message) => write!(fmt, "type mismatch: {}", message),
            Error::Io(e) => write!(fmt, "IO error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

/// A specialized `Result` for this crate's errors.
pub type Result<T> = std::result::Result<T, Error>;

macro_rules! malformed_err {
    ($fmt:expr) => ($crate::error::Error::Malformed($fmt.to_owned()));
    ($fmt:expr, $($args:expr),*) => ($crate::error::Error::Malformed(format!($fmt, $($args),*)));
}
