//! # Validation Configuration
//!
//! The explicit, per-run configuration handed to the loader and the
//! aggregator. Built once per invocation; nothing here is global.

use crate::primitives::{
    DEFAULT_CORE_PREDICATES, DEFAULT_MODULE_PREDICATES, DEFAULT_TOP_LIMIT, ENTITY_TYPE_COLUMN,
    ENTITY_URN_COLUMN, RELATION_COLUMN, SOURCE_COLUMN, TARGET_COLUMN,
};
use crate::types::ScopeKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Allow-lists, required columns and report limit for one run.
///
/// Every field has a default, so a partial TOML `[validation]` table only
/// overrides what it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    /// Predicates allowed on Core relationships.
    pub core_predicates: BTreeSet<String>,
    /// Predicates allowed on Module relationships.
    pub module_predicates: BTreeSet<String>,
    /// Columns every entities table must declare.
    pub entity_columns: Vec<String>,
    /// Columns every relationships table must declare.
    pub relationship_columns: Vec<String>,
    /// Number of entries in the top-predicates report.
    pub top_limit: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            core_predicates: to_set(DEFAULT_CORE_PREDICATES),
            module_predicates: to_set(DEFAULT_MODULE_PREDICATES),
            entity_columns: vec![ENTITY_URN_COLUMN.to_string(), ENTITY_TYPE_COLUMN.to_string()],
            relationship_columns: vec![
                SOURCE_COLUMN.to_string(),
                RELATION_COLUMN.to_string(),
                TARGET_COLUMN.to_string(),
            ],
            top_limit: DEFAULT_TOP_LIMIT,
        }
    }
}

impl ValidationConfig {
    /// Create a configuration with the default allow-lists.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace both allow-lists.
    #[must_use]
    pub fn with_predicates<C, M, S>(mut self, core: C, module: M) -> Self
    where
        C: IntoIterator<Item = S>,
        M: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.core_predicates = core.into_iter().map(Into::into).collect();
        self.module_predicates = module.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_top_limit(mut self, limit: usize) -> Self {
        self.top_limit = limit;
        self
    }

    /// Required entity columns, always including the URN and type columns.
    #[must_use]
    pub fn required_entity_columns(&self) -> Vec<String> {
        with_fixed(&self.entity_columns, &[ENTITY_URN_COLUMN, ENTITY_TYPE_COLUMN])
    }

    /// Required relationship columns, always including source, relation and target.
    #[must_use]
    pub fn required_relationship_columns(&self) -> Vec<String> {
        with_fixed(
            &self.relationship_columns,
            &[SOURCE_COLUMN, RELATION_COLUMN, TARGET_COLUMN],
        )
    }

    /// The allow-list applicable to a scope kind.
    #[must_use]
    pub fn allow_list(&self, kind: ScopeKind) -> &BTreeSet<String> {
        match kind {
            ScopeKind::Core => &self.core_predicates,
            ScopeKind::Module => &self.module_predicates,
        }
    }
}

fn with_fixed(configured: &[String], fixed: &[&str]) -> Vec<String> {
    let mut columns: Vec<String> = fixed.iter().map(|c| (*c).to_string()).collect();
    for column in configured {
        if !columns.contains(column) {
            columns.push(column.clone());
        }
    }
    columns
}

fn to_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ValidationConfig::default();
        assert_eq!(config.top_limit, 3);
        assert_eq!(config.entity_columns, vec!["id", "type"]);
        assert_eq!(config.relationship_columns, vec!["source", "relation", "target"]);
        assert!(config.allow_list(ScopeKind::Core).contains("USES"));
        assert!(config.allow_list(ScopeKind::Module).contains("MENTIONS"));
        assert!(!config.allow_list(ScopeKind::Core).contains("MENTIONS"));
    }

    #[test]
    fn fixed_columns_are_always_required() {
        let config = ValidationConfig {
            entity_columns: vec!["name".to_string()],
            relationship_columns: Vec::new(),
            ..ValidationConfig::default()
        };

        assert_eq!(config.required_entity_columns(), vec!["id", "type", "name"]);
        assert_eq!(
            config.required_relationship_columns(),
            vec!["source", "relation", "target"]
        );
    }

    #[test]
    fn builders_replace_lists() {
        let config = ValidationConfig::new()
            .with_predicates(["A"], ["A", "B"])
            .with_top_limit(5);

        assert_eq!(config.core_predicates.len(), 1);
        assert!(config.allow_list(ScopeKind::Module).contains("B"));
        assert_eq!(config.top_limit, 5);
    }
}
