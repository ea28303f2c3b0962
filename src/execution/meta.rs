//! Meta commands - dot-prefixed lines handled outside the statement path.

use crate::common::config::ROW_SIZE;
use crate::common::Result;
use crate::storage::page::leaf::{
    COMMON_NODE_HEADER_SIZE, LEAF_NODE_CELL_SIZE, LEAF_NODE_HEADER_SIZE, LEAF_NODE_MAX_CELLS,
    LEAF_NODE_SPACE_FOR_CELLS,
};
use crate::table::Table;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaCommand {
    /// `.exit` - close the table and quit
    Exit,
    /// `.help`
    Help,
    /// `.btree` - dump the root leaf's keys
    BTree,
    /// `.constants` - dump the layout constants
    Constants,
    Unrecognized(String),
}

impl MetaCommand {
    /// Parse a line starting with `.`.
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            ".exit" => MetaCommand::Exit,
            ".help" => MetaCommand::Help,
            ".btree" => MetaCommand::BTree,
            ".constants" => MetaCommand::Constants,
            other => MetaCommand::Unrecognized(other.to_string()),
        }
    }
}

pub fn render_help() -> String {
    [
        "insert <id> <username> <email>   add a row",
        "select                           print every row in id order",
        ".btree                           print the root leaf",
        ".constants                       print layout constants",
        ".exit                            flush and quit",
    ]
    .join("\n")
}

/// Layout constants, one `NAME: value` per line.
pub fn render_constants() -> String {
    let constants = [
        ("ROW_SIZE", ROW_SIZE),
        ("COMMON_NODE_HEADER_SIZE", COMMON_NODE_HEADER_SIZE),
        ("LEAF_NODE_HEADER_SIZE", LEAF_NODE_HEADER_SIZE),
        ("LEAF_NODE_CELL_SIZE", LEAF_NODE_CELL_SIZE),
        ("LEAF_NODE_SPACE_FOR_CELLS", LEAF_NODE_SPACE_FOR_CELLS),
        ("LEAF_NODE_MAX_CELLS", LEAF_NODE_MAX_CELLS),
    ];

    constants
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The root leaf as `leaf (size N)` followed by one `  - i : key` per cell.
pub fn render_btree(table: &mut Table) -> Result<String> {
    let root = table.root_page();
    let leaf = table.leaf(root)?;

    let mut lines = vec![format!("leaf (size {})", leaf.num_cells())];
    lines.extend(
        leaf.keys()
            .enumerate()
            .map(|(cell, key)| format!("  - {} : {}", cell, key)),
    );
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::executor::execute_insert;
    use crate::table::Row;
    use tempfile::tempdir;

    #[test]
    fn test_parse() {
        assert_eq!(MetaCommand::parse(".exit"), MetaCommand::Exit);
        assert_eq!(MetaCommand::parse(".help\n"), MetaCommand::Help);
        assert_eq!(MetaCommand::parse(".btree"), MetaCommand::BTree);
        assert_eq!(MetaCommand::parse(".constants"), MetaCommand::Constants);
        assert_eq!(
            MetaCommand::parse(".foo"),
            MetaCommand::Unrecognized(".foo".to_string())
        );
    }

    #[test]
    fn test_render_constants() {
        let out = render_constants();
        assert_eq!(
            out,
            "ROW_SIZE: 291\n\
             COMMON_NODE_HEADER_SIZE: 8\n\
             LEAF_NODE_HEADER_SIZE: 12\n\
             LEAF_NODE_CELL_SIZE: 295\n\
             LEAF_NODE_SPACE_FOR_CELLS: 4084\n\
             LEAF_NODE_MAX_CELLS: 13"
        );
    }

    #[test]
    fn test_render_btree() {
        let dir = tempdir().unwrap();
        let mut table = Table::open(dir.path().join("test.db")).unwrap();

        assert_eq!(render_btree(&mut table).unwrap(), "leaf (size 0)");

        for id in [3, 1, 2] {
            execute_insert(&mut table, &Row::new(id, "u", "e").unwrap()).unwrap();
        }
        assert_eq!(
            render_btree(&mut table).unwrap(),
            "leaf (size 3)\n  - 0 : 1\n  - 1 : 2\n  - 2 : 3"
        );
    }
}
