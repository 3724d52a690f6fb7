//! Unique key generation for rows and columns

use std::collections::HashSet;

/// Default prefix for generated row keys
pub const DEFAULT_ROW_PREFIX: &str = "row";

/// Default prefix for generated column keys
pub const DEFAULT_COLUMN_PREFIX: &str = "column";

/// Returns `prefix + n` for the smallest positive `n` not already taken.
///
/// `existing` is the key set of the scope the new key must be unique in:
/// all rows for a new row, the columns of one row for a new column.
#[must_use]
pub fn next_unique_key<'a, I>(existing: I, prefix: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: HashSet<&str> = existing.into_iter().collect();
    (1_u64..)
        .map(|n| format!("{prefix}{n}"))
        .find(|candidate| !taken.contains(candidate.as_str()))
        .unwrap_or_else(|| prefix.to_string())
}
