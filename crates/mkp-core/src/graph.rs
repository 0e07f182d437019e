//! # Knowledge Graph
//!
//! The in-memory graph merged from every accepted scope.
//!
//! All data structures use `BTreeMap` for deterministic ordering.
//! The public API is read-only: records only enter through
//! [`GraphLoader`](crate::loader::GraphLoader) after their whole scope has
//! validated.

use crate::types::{Entity, Relationship, Scope, ScopeKind, UrnIndex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// SCOPE SUMMARY
// =============================================================================

/// Record counts contributed by one merged scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeSummary {
    /// "core" or the module name.
    pub name: String,
    pub kind: ScopeKind,
    pub entities: usize,
    pub relationships: usize,
}

/// A fully validated scope waiting to be merged.
#[derive(Debug, Default)]
pub(crate) struct StagedScope {
    pub(crate) entities: Vec<Entity>,
    pub(crate) relationships: Vec<Relationship>,
}

// =============================================================================
// GRAPH
// =============================================================================

/// The merged graph.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeGraph {
    /// URN -> Entity
    entities: BTreeMap<String, Entity>,

    /// URN -> scope that introduced it
    owners: BTreeMap<String, Scope>,

    /// URNs owned by Core
    core_urns: BTreeSet<String>,

    /// Relationships in merge order (scope order, then row order)
    relationships: Vec<Relationship>,

    /// Merged scopes in load order
    scopes: Vec<ScopeSummary>,
}

impl KnowledgeGraph {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a validated scope. Row order is preserved.
    pub(crate) fn merge(&mut self, scope: &Scope, staged: StagedScope) -> ScopeSummary {
        let summary = ScopeSummary {
            name: scope.label().to_string(),
            kind: scope.kind(),
            entities: staged.entities.len(),
            relationships: staged.relationships.len(),
        };

        for entity in staged.entities {
            let urn = entity.urn().to_string();
            if scope.kind() == ScopeKind::Core {
                self.core_urns.insert(urn.clone());
            }
            self.owners.insert(urn.clone(), scope.clone());
            self.entities.insert(urn, entity);
        }
        self.relationships.extend(staged.relationships);
        self.scopes.push(summary.clone());

        summary
    }

    #[must_use]
    pub fn entity(&self, urn: &str) -> Option<&Entity> {
        self.entities.get(urn)
    }

    /// All entities in URN order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// All relationships in merge order.
    #[must_use]
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// URNs owned by Core.
    #[must_use]
    pub fn core_urns(&self) -> &BTreeSet<String> {
        &self.core_urns
    }

    /// The scope that introduced `urn`.
    #[must_use]
    pub fn owner_of(&self, urn: &str) -> Option<&Scope> {
        self.owners.get(urn)
    }

    /// Merged scopes in load order.
    #[must_use]
    pub fn scopes(&self) -> &[ScopeSummary] {
        &self.scopes
    }

    #[must_use]
    pub fn has_core(&self) -> bool {
        self.scopes.iter().any(|s| s.kind == ScopeKind::Core)
    }

    #[must_use]
    pub fn contains(&self, urn: &str) -> bool {
        self.entities.contains_key(urn)
    }

    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    #[must_use]
    pub fn module_count(&self) -> usize {
        self.scopes
            .iter()
            .filter(|s| s.kind == ScopeKind::Module)
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.relationships.is_empty()
    }
}

impl UrnIndex for KnowledgeGraph {
    fn contains_urn(&self, urn: &str) -> bool {
        self.contains(urn)
    }
}

// =============================================================================
// TESTS
// =============================================================================
