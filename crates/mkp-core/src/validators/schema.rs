//! Required-column checks for raw tables.

use crate::MkpError;
use crate::types::Table;
use std::collections::BTreeSet;

/// Checks a table's declared columns against a required set.
pub struct SchemaValidator;

impl SchemaValidator {
    /// Validate that `table` declares every column in `required`.
    ///
    /// A table with a header but no rows passes. A table with no header at
    /// all cannot supply anything and fails as `EmptyTable`, unless nothing
    /// is required of it.
    pub fn validate(table: &Table, required: &[String]) -> Result<(), MkpError> {
        if required.is_empty() {
            return Ok(());
        }

        if !table.has_header() {
            return Err(MkpError::EmptyTable {
                table: table.name().to_string(),
            });
        }

        let missing = Self::missing_columns(table.columns(), required);
        if !missing.is_empty() {
            return Err(MkpError::MissingColumns {
                table: table.name().to_string(),
                missing,
            });
        }

        Ok(())
    }

    /// Required columns absent from `columns`, sorted and deduplicated.
    #[must_use]
    pub fn missing_columns(columns: &[String], required: &[String]) -> Vec<String> {
        let declared: BTreeSet<&str> = columns.iter().map(String::as_str).collect();
        required
            .iter()
            .map(String::as_str)
            .filter(|column| !declared.contains(column))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
