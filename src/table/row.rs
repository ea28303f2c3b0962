//! Row - the fixed-schema record and its packed byte codec.

use std::fmt;

use crate::common::config::{
    EMAIL_OFFSET, EMAIL_SIZE, ID_OFFSET, ID_SIZE, ROW_SIZE, USERNAME_OFFSET, USERNAME_SIZE,
};
use crate::common::{Error, Result};

/// A single table row: `(id, username, email)`.
///
/// Construction through [`Row::new`] validates both strings against their
/// column widths, so every `Row` value fits its packed slot.
///
/// # Packed Layout ([`ROW_SIZE`] = 291 bytes)
/// ```text
/// Offset  Size  Field
/// ------  ----  -----
/// 0       4     id (little-endian)
/// 4       32    username (zero-padded)
/// 36      255   email (zero-padded)
/// ```
///
/// A string that fills its whole column has no terminating zero byte.
/// Decoding stops each string at its first zero byte, which is why
/// [`Row::new`] refuses strings containing `\0`.
///
/// # Example
/// ```
/// use rowstore::{Row, ROW_SIZE};
///
/// let row = Row::new(1, "user1", "person1@example.com").unwrap();
/// let mut buf = [0u8; ROW_SIZE];
/// row.serialize(&mut buf);
/// assert_eq!(Row::deserialize(&buf), row);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    id: u32,
    username: String,
    email: String,
}

impl Row {
    /// Create a row, rejecting strings that would not survive the packed
    /// layout.
    ///
    /// # Errors
    /// - `Error::StringTooLong` if a string is wider than its column
    /// - `Error::InvalidString` if a string contains a `\0` byte
    pub fn new(id: u32, username: impl Into<String>, email: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let email = email.into();

        check_column("username", &username, USERNAME_SIZE)?;
        check_column("email", &email, EMAIL_SIZE)?;

        Ok(Self {
            id,
            username,
            email,
        })
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[inline]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Pack this row into the first `ROW_SIZE` bytes of `dst`.
    ///
    /// # Panics
    /// Panics if `dst.len() < ROW_SIZE`.
    pub fn serialize(&self, dst: &mut [u8]) {
        assert!(dst.len() >= ROW_SIZE, "buffer too small for Row");

        dst[ID_OFFSET..ID_OFFSET + ID_SIZE].copy_from_slice(&self.id.to_le_bytes());
        write_fixed(
            &mut dst[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE],
            &self.username,
        );
        write_fixed(&mut dst[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE], &self.email);
    }

    /// Unpack a row from the first `ROW_SIZE` bytes of `src`.
    ///
    /// # Panics
    /// Panics if `src.len() < ROW_SIZE`.
    pub fn deserialize(src: &[u8]) -> Self {
        assert!(src.len() >= ROW_SIZE, "buffer too small for Row");

        let id = u32::from_le_bytes([
            src[ID_OFFSET],
            src[ID_OFFSET + 1],
            src[ID_OFFSET + 2],
            src[ID_OFFSET + 3],
        ]);

        Self {
            id,
            username: read_fixed(&src[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE]),
            email: read_fixed(&src[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE]),
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.username, self.email)
    }
}

fn check_column(field: &'static str, value: &str, max: usize) -> Result<()> {
    if value.as_bytes().contains(&0) {
        return Err(Error::InvalidString { field });
    }
    if value.len() > max {
        return Err(Error::StringTooLong {
            field,
            len: value.len(),
            max,
        });
    }
    Ok(())
}

/// Copy `value` into `slot` and zero the remainder.
fn write_fixed(slot: &mut [u8], value: &str) {
    let bytes = value.as_bytes();
    slot[..bytes.len()].copy_from_slice(bytes);
    slot[bytes.len()..].fill(0);
}

fn read_fixed(slot: &[u8]) -> String {
    let end = slot.iter().position(|&b| b == 0).unwrap_or(slot.len());
    String::from_utf8_lossy(&slot[..end]).into_owned()
}
