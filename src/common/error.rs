//! Error types for rowstore.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in rowstore.
///
/// Variants fall into four groups so a front end can message the user
/// precisely:
/// - resource: [`Error::Io`]
/// - capacity and uniqueness: [`Error::TableFull`], [`Error::DuplicateKey`]
/// - integrity: [`Error::CorruptFile`], [`Error::CorruptPage`],
///   [`Error::PageOutOfBounds`], [`Error::PageNotLoaded`],
///   [`Error::CursorOutOfRange`]
/// - validation: [`Error::StringTooLong`], [`Error::InvalidString`],
///   [`Error::NegativeId`], [`Error::Syntax`], [`Error::UnrecognizedStatement`]
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The root leaf has no free cell left.
    #[error("Table full")]
    TableFull,

    /// A row with this key is already stored.
    #[error("Duplicate key: {0}")]
    DuplicateKey(u32),

    /// File length is not a whole number of pages.
    #[error("Corrupt database file: length {len} is not a multiple of the page size")]
    CorruptFile { len: u64 },

    /// Root page on disk is not a well-formed leaf.
    #[error("Page {0} is not a valid leaf node")]
    CorruptPage(u32),

    /// Page index beyond what the pager supports.
    #[error("Page {0} out of bounds")]
    PageOutOfBounds(u32),

    /// Attempted to flush a page that was never loaded.
    #[error("Page {0} is not loaded")]
    PageNotLoaded(u32),

    /// Cursor read past the last cell.
    #[error("Cursor is past the end of the table")]
    CursorOutOfRange,

    /// A column value exceeds its fixed width.
    #[error("String too long for {field}: {len} bytes (max {max})")]
    StringTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// A column value contains a `\0` byte, which the packed layout uses as
    /// its terminator.
    #[error("Invalid string for {field}: contains a NUL byte")]
    InvalidString { field: &'static str },

    /// Row id parsed as a negative number.
    #[error("ID must be positive")]
    NegativeId,

    /// Statement keyword recognized but arguments malformed.
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// Statement keyword not recognized.
    #[error("Unrecognized statement: {0}")]
    UnrecognizedStatement(String),
}

impl Error {
    /// Whether the table is still usable after this error.
    ///
    /// Capacity, uniqueness and validation errors leave the table untouched.
    /// Resource and integrity errors do not make that guarantee.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::TableFull
                | Error::DuplicateKey(_)
                | Error::StringTooLong { .. }
                | Error::InvalidString { .. }
                | Error::NegativeId
                | Error::Syntax(_)
                | Error::UnrecognizedStatement(_)
        )
    }
}
