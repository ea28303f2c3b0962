//! Statement preparation - turns an input line into a [`Statement`].

use crate::common::{Error, Result};
use crate::table::Row;

/// A parsed data statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `insert <id> <username> <email>`
    Insert(Row),
    /// `select`
    Select,
}

impl Statement {
    /// Parse one input line.
    ///
    /// # Errors
    /// - `Error::Syntax` for a missing/extra argument or a non-numeric id
    /// - `Error::NegativeId` for an id below zero
    /// - `Error::StringTooLong` for a username or email wider than its column
    /// - `Error::UnrecognizedStatement` for any other keyword
    ///
    /// # Example
    /// ```
    /// use rowstore::execution::Statement;
    ///
    /// let stmt = Statement::prepare("insert 1 user1 person1@example.com").unwrap();
    /// assert!(matches!(stmt, Statement::Insert(ref row) if row.id() == 1));
    /// assert_eq!(Statement::prepare("select").unwrap(), Statement::Select);
    /// ```
    pub fn prepare(input: &str) -> Result<Self> {
        let mut tokens = input.split_whitespace();

        match tokens.next() {
            Some("insert") => prepare_insert(tokens),
            Some("select") => match tokens.next() {
                None => Ok(Statement::Select),
                Some(extra) => Err(Error::Syntax(format!(
                    "unexpected argument '{}' to select",
                    extra
                ))),
            },
            _ => Err(Error::UnrecognizedStatement(input.trim().to_string())),
        }
    }
}

fn prepare_insert<'a>(mut args: impl Iterator<Item = &'a str>) -> Result<Statement> {
    let (id, username, email) = match (args.next(), args.next(), args.next()) {
        (Some(id), Some(username), Some(email)) => (id, username, email),
        _ => {
            return Err(Error::Syntax(
                "insert expects <id> <username> <email>".to_string(),
            ))
        }
    };
    if let Some(extra) = args.next() {
        return Err(Error::Syntax(format!(
            "unexpected argument '{}' to insert",
            extra
        )));
    }

    let id: i64 = id
        .parse()
        .map_err(|_| Error::Syntax(format!("invalid id '{}'", id)))?;
    if id < 0 {
        return Err(Error::NegativeId);
    }
    let id = u32::try_from(id).map_err(|_| Error::Syntax(format!("id {} out of range", id)))?;

    Ok(Statement::Insert(Row::new(id, username, email)?))
}
