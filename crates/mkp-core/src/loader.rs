//! # Graph Loader
//!
//! Orchestrates the validators over every scope and merges the result.
//!
//! - Core is loaded first, then each Module in name order
//! - Validation is fail-fast within a scope; a failing scope merges nothing
//! - Failures are wrapped with scope context exactly once, here
//! - The graph is only mutated after a scope has fully validated
//!
//! ## Canonical check order (per scope)
//!
//! 1. Schema of the entities table, then of the relationships table
//! 2. URN grammar of every entity row
//! 3. Core isolation (Modules only) and URN uniqueness of every entity row
//! 4. URN grammar of every relationship row (source, then target)
//! 5. Predicate allow-list of every relationship row
//! 6. Referential integrity of every relationship row (source, then target)
//! 7. Core isolation of every relationship row (Modules only)
//!
//! The first failure in this order is the one reported.

use crate::config::ValidationConfig;
use crate::graph::{KnowledgeGraph, ScopeSummary, StagedScope};
use crate::primitives::{
    ENTITY_TYPE_COLUMN, ENTITY_URN_COLUMN, RELATION_COLUMN, SOURCE_COLUMN, TARGET_COLUMN,
};
use crate::types::{
    Direction, Entity, Layered, PackTables, Relationship, Row, Scope, ScopeKind, ScopeTables,
    UrnContext,
};
use crate::validators::{
    CoreIsolationGuard, PredicateValidator, ReferentialIntegrityChecker, SchemaValidator,
    UrnValidator,
};
use crate::MkpError;
use std::collections::BTreeSet;

/// Loads and validates knowledge packs into a [`KnowledgeGraph`].
pub struct GraphLoader<'a> {
    config: &'a ValidationConfig,
}

impl<'a> GraphLoader<'a> {
    /// Create a loader for one run.
    #[must_use]
    pub fn new(config: &'a ValidationConfig) -> Self {
        Self { config }
    }

    /// Load a whole pack into a fresh graph.
    pub fn load(&self, pack: &PackTables) -> Result<KnowledgeGraph, MkpError> {
        let mut graph = KnowledgeGraph::new();
        self.load_into(&mut graph, pack)?;
        Ok(graph)
    }

    /// Load a whole pack into `graph`.
    ///
    /// On failure, scopes merged before the failing one stay in `graph`;
    /// the failing scope contributes nothing and no later scope is loaded.
    pub fn load_into(
        &self,
        graph: &mut KnowledgeGraph,
        pack: &PackTables,
    ) -> Result<Vec<ScopeSummary>, MkpError> {
        let mut summaries = Vec::with_capacity(pack.modules.len() + 1);

        summaries.push(self.load_scope(graph, &Scope::Core, &pack.core)?);
        for (name, tables) in &pack.modules {
            summaries.push(self.load_scope(graph, &Scope::module(name.as_str()), tables)?);
        }

        Ok(summaries)
    }

    /// Validate one scope against `graph` and merge it.
    ///
    /// Errors are wrapped with `scope`.
    pub fn load_scope(
        &self,
        graph: &mut KnowledgeGraph,
        scope: &Scope,
        tables: &ScopeTables,
    ) -> Result<ScopeSummary, MkpError> {
        Self::check_sequence(graph, scope)?;

        let staged = self
            .validate_scope(graph, scope, tables)
            .map_err(|e| e.in_scope(scope))?;

        Ok(graph.merge(scope, staged))
    }

    /// Core exactly once and first; each Module at most once.
    fn check_sequence(graph: &KnowledgeGraph, scope: &Scope) -> Result<(), MkpError> {
        match scope {
            Scope::Core if graph.has_core() => {
                Err(MkpError::Internal("Core scope loaded twice".to_string()))
            }
            Scope::Module(name) if !graph.has_core() => Err(MkpError::Internal(format!(
                "Module {} loaded before Core",
                name
            ))),
            Scope::Module(name)
                if graph
                    .scopes()
                    .iter()
                    .any(|s| s.kind == ScopeKind::Module && s.name == *name) =>
            {
                Err(MkpError::Internal(format!("Module {} loaded twice", name)))
            }
            _ => Ok(()),
        }
    }

    /// Run every check for one scope without touching the graph.
    fn validate_scope(
        &self,
        graph: &KnowledgeGraph,
        scope: &Scope,
        tables: &ScopeTables,
    ) -> Result<StagedScope, MkpError> {
        let entity_context = UrnContext::entities(scope);
        let relationship_context = UrnContext::relationships(scope);

        // 1. schema
        SchemaValidator::validate(&tables.entities, &self.config.required_entity_columns())?;
        SchemaValidator::validate(
            &tables.relationships,
            &self.config.required_relationship_columns(),
        )?;

        // 2. entity URN grammar
        for row in tables.entities.rows() {
            UrnValidator::validate(field(row, ENTITY_URN_COLUMN), entity_context)?;
        }

        // 3. ownership and uniqueness
        let mut scope_urns = BTreeSet::new();
        for row in tables.entities.rows() {
            let urn = field(row, ENTITY_URN_COLUMN);
            if scope.is_module() {
                CoreIsolationGuard::check_entity(urn, graph.core_urns())?;
            }
            if graph.contains(urn) || !scope_urns.insert(urn.to_string()) {
                return Err(MkpError::DuplicateUrn {
                    context: entity_context,
                    urn: urn.to_string(),
                });
            }
        }

        let entities: Vec<Entity> = tables.entities.rows().iter().map(entity_from_row).collect();
        let relationships: Vec<Relationship> = tables
            .relationships
            .rows()
            .iter()
            .map(relationship_from_row)
            .collect();

        // 4. relationship URN grammar
        for relationship in &relationships {
            for direction in Direction::ALL {
                UrnValidator::validate(relationship.endpoint(direction), relationship_context)?;
            }
        }

        // 5. predicates
        let predicates = PredicateValidator::new(self.config);
        for relationship in &relationships {
            predicates.validate(relationship.relation(), scope.kind())?;
        }

        // 6. referential integrity against everything merged so far plus this scope
        let known = Layered {
            base: graph,
            overlay: &scope_urns,
        };
        for relationship in &relationships {
            ReferentialIntegrityChecker::check(relationship, &known)?;
        }

        // 7. relationship ownership
        if scope.is_module() {
            for relationship in &relationships {
                CoreIsolationGuard::check_relationship(relationship, graph.core_urns())?;
            }
        }

        Ok(StagedScope {
            entities,
            relationships,
        })
    }
}

/// A cell value; absent cells read as empty.
fn field<'r>(row: &'r Row, column: &str) -> &'r str {
    row.get(column).map(String::as_str).unwrap_or("")
}

fn entity_from_row(row: &Row) -> Entity {
    let attributes = row
        .iter()
        .filter(|(column, value)| {
            column.as_str() != ENTITY_URN_COLUMN
                && column.as_str() != ENTITY_TYPE_COLUMN
                && !value.is_empty()
        })
        .map(|(column, value)| (column.clone(), value.clone()))
        .collect();

    Entity::new(
        field(row, ENTITY_URN_COLUMN),
        field(row, ENTITY_TYPE_COLUMN),
        attributes,
    )
}

fn relationship_from_row(row: &Row) -> Relationship {
    Relationship::new(
        field(row, SOURCE_COLUMN),
        field(row, RELATION_COLUMN),
        field(row, TARGET_COLUMN),
    )
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Table;

    fn entities(rows: &[(&str, &str)]) -> Table {
        Table::from_records(
            "entities.csv",
            &["id", "type", "name"],
            rows.iter().map(|(urn, kind)| vec![*urn, *kind, "label"]),
        )
    }

    fn relationships(rows: &[(&str, &str, &str)]) -> Table {
        Table::from_records(
            "relationships.csv",
            &["source", "relation", "target"],
            rows.iter().map(|(s, r, t)| vec![*s, *r, *t]),
        )
    }

    fn core_tables() -> ScopeTables {
        ScopeTables::new(
            entities(&[("urn:mkp:tool:nmap", "Tool"), ("urn:mkp:actor:apt28", "Actor")]),
            relationships(&[("urn:mkp:actor:apt28", "USES", "urn:mkp:tool:nmap")]),
        )
    }

    #[test]
    fn loads_core_only_pack() {
        let config = ValidationConfig::default();
        let graph = GraphLoader::new(&config)
            .load(&PackTables::new(core_tables()))
            .expect("load");

        assert_eq!(graph.entity_count(), 2);
        assert_eq!(graph.relationship_count(), 1);
        assert_eq!(graph.module_count(), 0);

        let nmap = graph.entity("urn:mkp:tool:nmap").expect("entity");
        assert_eq!(nmap.entity_type(), "Tool");
        assert_eq!(nmap.attribute("name"), Some("label"));
        assert_eq!(nmap.attribute("id"), None);
    }

    #[test]
    fn module_may_reference_core_targets() {
        let config = ValidationConfig::default();
        let pack = PackTables::new(core_tables()).with_module(
            "01_Module_DarkWeb",
            ScopeTables::new(
                entities(&[("urn:mkp:market:hydra", "Market")]),
                relationships(&[("urn:mkp:market:hydra", "MENTIONS", "urn:mkp:actor:apt28")]),
            ),
        );

        let graph = GraphLoader::new(&config).load(&pack).expect("load");
        assert_eq!(graph.module_count(), 1);
        assert_eq!(
            graph.owner_of("urn:mkp:market:hydra"),
            Some(&Scope::module("01_Module_DarkWeb"))
        );
    }

    #[test]
    fn core_failure_is_wrapped() {
        let config = ValidationConfig::default();
        let pack = PackTables::new(ScopeTables::new(
            entities(&[("bad:urn", "Tool")]),
            relationships(&[]),
        ));

        let err = GraphLoader::new(&config).load(&pack).expect_err("invalid");
        assert_eq!(
            err.to_string(),
            "Core validation failed: Invalid URN in entities: bad:urn"
        );
        assert_eq!(err.exit_code(), 22);
    }

    #[test]
    fn failing_scope_merges_nothing() {
        let config = ValidationConfig::default();
        let pack = PackTables::new(core_tables()).with_module(
            "m1",
            ScopeTables::new(
                entities(&[("urn:mkp:tool:zmap", "Tool")]),
                relationships(&[("urn:mkp:tool:zmap", "USES", "urn:mkp:tool:ghost")]),
            ),
        );

        let mut graph = KnowledgeGraph::new();
        let err = GraphLoader::new(&config)
            .load_into(&mut graph, &pack)
            .expect_err("dangling");

        assert_eq!(
            err.to_string(),
            "Module validation failed (m1): Dangling reference (target): urn:mkp:tool:ghost"
        );
        assert!(graph.has_core());
        assert_eq!(graph.module_count(), 0);
        assert!(!graph.contains("urn:mkp:tool:zmap"));
    }

    #[test]
    fn duplicate_within_scope_rejected() {
        let config = ValidationConfig::default();
        let pack = PackTables::new(ScopeTables::new(
            entities(&[("urn:mkp:tool:nmap", "Tool"), ("urn:mkp:tool:nmap", "Tool")]),
            relationships(&[]),
        ));

        let err = GraphLoader::new(&config).load(&pack).expect_err("duplicate");
        assert!(matches!(err.unscoped(), MkpError::DuplicateUrn { .. }));
    }

    #[test]
    fn sequence_is_enforced() {
        let config = ValidationConfig::default();
        let loader = GraphLoader::new(&config);
        let mut graph = KnowledgeGraph::new();

        let early = loader
            .load_scope(&mut graph, &Scope::module("m1"), &ScopeTables::default())
            .expect_err("module before core");
        assert_eq!(early.exit_code(), 1);

        loader
            .load_scope(&mut graph, &Scope::Core, &core_tables())
            .expect("core");
        let twice = loader
            .load_scope(&mut graph, &Scope::Core, &core_tables())
            .expect_err("core twice");
        assert!(matches!(twice, MkpError::Internal(_)));
    }
}
