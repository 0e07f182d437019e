//! # Statistics
//!
//! Deterministic aggregates over the merged graph.
//!
//! - Predicate ranking: count descending, then name ascending
//! - Pure functions of their input multiset; no hashing, no floats

use crate::graph::{KnowledgeGraph, ScopeSummary};
use crate::types::Relationship;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry of the top-predicates report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateCount {
    pub predicate: String,
    pub edge_count: usize,
}

impl PredicateCount {
    #[must_use]
    pub fn new(predicate: impl Into<String>, edge_count: usize) -> Self {
        Self {
            predicate: predicate.into(),
            edge_count,
        }
    }
}

/// Count every distinct relation, ordered by name.
pub fn count_relations<I, S>(relations: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for relation in relations {
        let count = counts.entry(relation.as_ref().to_string()).or_default();
        *count = count.saturating_add(1);
    }
    counts
}

/// Rank relations by frequency and keep the first `limit`.
///
/// Ties are broken by ascending predicate name, so the output only depends
/// on the input multiset.
pub fn rank_relations<I, S>(relations: I, limit: usize) -> Vec<PredicateCount>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut ranked: Vec<PredicateCount> = count_relations(relations)
        .into_iter()
        .map(|(predicate, edge_count)| PredicateCount {
            predicate,
            edge_count,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.edge_count
            .cmp(&a.edge_count)
            .then_with(|| a.predicate.cmp(&b.predicate))
    });
    ranked.truncate(limit);
    ranked
}

/// The `limit` most used predicates among `relationships`.
pub fn top_predicates(relationships: &[Relationship], limit: usize) -> Vec<PredicateCount> {
    rank_relations(relationships.iter().map(Relationship::relation), limit)
}

/// Summary statistics of a successfully loaded graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Per-scope counts in load order.
    pub scopes: Vec<ScopeSummary>,
    pub module_count: usize,
    pub entity_count: usize,
    pub relationship_count: usize,
    pub distinct_predicates: usize,
    pub top_predicates: Vec<PredicateCount>,
}

impl GraphStats {
    /// Aggregate statistics over the merged graph.
    #[must_use]
    pub fn collect(graph: &KnowledgeGraph, limit: usize) -> Self {
        let relationships = graph.relationships();
        Self {
            scopes: graph.scopes().to_vec(),
            module_count: graph.module_count(),
            entity_count: graph.entity_count(),
            relationship_count: relationships.len(),
            distinct_predicates: count_relations(relationships.iter().map(Relationship::relation))
                .len(),
            top_predicates: top_predicates(relationships, limit),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
