//! # Pipeline Primitives
//!
//! Fixed constants of the knowledge-pack format.
//!
//! These are compiled in. Everything a pack author may change per run
//! (allow-lists, required columns, report limit) lives in
//! [`ValidationConfig`](crate::config::ValidationConfig) instead.

/// Literal first segment of every URN.
pub const URN_SCHEME: &str = "urn";

/// Number of colon-delimited segments in a URN:
/// `urn:<namespace>:<type>:<identifier>`.
///
/// The identifier is the remainder after the third colon and may itself
/// contain colons.
pub const URN_SEGMENTS: usize = 4;

/// Entities-table column holding the entity URN.
pub const ENTITY_URN_COLUMN: &str = "id";

/// Entities-table column holding the entity type.
pub const ENTITY_TYPE_COLUMN: &str = "type";

/// Relationships-table column holding the source URN.
pub const SOURCE_COLUMN: &str = "source";

/// Relationships-table column holding the predicate.
pub const RELATION_COLUMN: &str = "relation";

/// Relationships-table column holding the target URN.
pub const TARGET_COLUMN: &str = "target";

/// Default number of entries in the top-predicates report.
pub const DEFAULT_TOP_LIMIT: usize = 3;

/// Predicates Core relationships may use unless configured otherwise.
pub const DEFAULT_CORE_PREDICATES: &[&str] = &[
    "AFFILIATED_WITH",
    "IS_A",
    "LOCATED_IN",
    "OPERATES",
    "PART_OF",
    "PROVIDES",
    "RELATED_TO",
    "TARGETS",
    "USES",
];

/// Predicates Module relationships may use unless configured otherwise.
pub const DEFAULT_MODULE_PREDICATES: &[&str] = &[
    "AFFILIATED_WITH",
    "EXTENDS",
    "IS_A",
    "LOCATED_IN",
    "MENTIONS",
    "OBSERVED_IN",
    "OPERATES",
    "PART_OF",
    "PROVIDES",
    "RELATED_TO",
    "TARGETS",
    "USES",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allow_lists_are_sorted_and_unique() {
        for list in [DEFAULT_CORE_PREDICATES, DEFAULT_MODULE_PREDICATES] {
            assert!(list.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn module_defaults_extend_core_defaults() {
        for predicate in DEFAULT_CORE_PREDICATES {
            assert!(DEFAULT_MODULE_PREDICATES.contains(predicate));
        }
    }
}
