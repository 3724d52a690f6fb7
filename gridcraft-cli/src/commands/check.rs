//! Layout validation command.

use std::path::Path;

use gridcraft_core::{BuilderSettings, LayoutTree};

use crate::error::CliError;
use crate::util::load_tree;

/// Check command handler
///
/// Loading already rejects duplicate item ids and normalizes heights; the
/// mirror check runs on the result as a final guard.
pub fn cmd_check(settings: &BuilderSettings, layout: Option<&Path>) -> Result<(), CliError> {
    let tree = load_tree(layout, settings)?;
    tree.check_mirror()?;

    let source = layout.map_or_else(|| "starter layout".to_string(), |p| p.display().to_string());
    println!("{source}: OK ({})", summarize(&tree));
    Ok(())
}

/// One-line count of rows, columns and items
fn summarize(tree: &LayoutTree) -> String {
    let columns: usize = tree.rows().values().map(|row| row.len()).sum();
    format!(
        "{} rows, {columns} columns, {} items",
        tree.row_count(),
        tree.item_count()
    )
}
