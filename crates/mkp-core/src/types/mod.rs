//! # Core Type Definitions
//!
//! This module contains the record and tag types shared by every stage of
//! the pipeline:
//! - Graph records (`Entity`, `Relationship`)
//! - Scope tags (`Scope`, `ScopeKind`, `UrnContext`, `Direction`)
//! - Raw tabular input (`Table`, `Row`, `ScopeTables`, `PackTables`)
//! - The `UrnIndex` lookup seam
//!
//! ## Determinism Guarantees
//!
//! All collections use `BTreeMap`/`BTreeSet` so that iteration order never
//! depends on hashing.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// =============================================================================
// GRAPH RECORDS
// =============================================================================

/// An entity of the knowledge graph.
///
/// Identified by its URN, which is unique across the merged graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    urn: String,
    #[serde(rename = "type")]
    entity_type: String,
    attributes: BTreeMap<String, String>,
}

impl Entity {
    /// Create a new entity.
    #[must_use]
    pub fn new(
        urn: impl Into<String>,
        entity_type: impl Into<String>,
        attributes: BTreeMap<String, String>,
    ) -> Self {
        Self {
            urn: urn.into(),
            entity_type: entity_type.into(),
            attributes,
        }
    }

    #[must_use]
    pub fn urn(&self) -> &str {
        &self.urn
    }

    #[must_use]
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    #[must_use]
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Get a single attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// A directed, typed edge between two entities.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Relationship {
    source: String,
    relation: String,
    target: String,
}

impl Relationship {
    /// Create a new relationship.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        relation: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            relation: relation.into(),
            target: target.into(),
        }
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The predicate labelling this edge.
    #[must_use]
    pub fn relation(&self) -> &str {
        &self.relation
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Get the endpoint URN for a direction.
    #[must_use]
    pub fn endpoint(&self, direction: Direction) -> &str {
        match direction {
            Direction::Source => &self.source,
            Direction::Target => &self.target,
        }
    }
}

// =============================================================================
// SCOPE TAGS
// =============================================================================

/// A load scope: the single Core or one named Module.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Scope {
    Core,
    Module(String),
}

impl Scope {
    /// Create a module scope.
    #[must_use]
    pub fn module(name: impl Into<String>) -> Self {
        Self::Module(name.into())
    }

    #[must_use]
    pub fn kind(&self) -> ScopeKind {
        match self {
            Self::Core => ScopeKind::Core,
            Self::Module(_) => ScopeKind::Module,
        }
    }

    #[must_use]
    pub fn is_module(&self) -> bool {
        matches!(self, Self::Module(_))
    }

    /// Short label used in reports ("core" or the module name).
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Core => "core",
            Self::Module(name) => name,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Core => write!(f, "Core"),
            Self::Module(name) => write!(f, "Module {}", name),
        }
    }
}

/// Which allow-list applies to a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    Core,
    Module,
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Core => write!(f, "core"),
            Self::Module => write!(f, "module"),
        }
    }
}

/// The table a URN string was read from.
///
/// Carried into URN errors for reporting; it never changes the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UrnContext {
    Entities,
    Relationships,
    ModuleEntities,
    ModuleRelationships,
}

impl UrnContext {
    /// Context for the entities table of a scope.
    #[must_use]
    pub fn entities(scope: &Scope) -> Self {
        match scope.kind() {
            ScopeKind::Core => Self::Entities,
            ScopeKind::Module => Self::ModuleEntities,
        }
    }

    /// Context for the relationships table of a scope.
    #[must_use]
    pub fn relationships(scope: &Scope) -> Self {
        match scope.kind() {
            ScopeKind::Core => Self::Relationships,
            ScopeKind::Module => Self::ModuleRelationships,
        }
    }
}

impl fmt::Display for UrnContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Entities => "entities",
            Self::Relationships => "relationships",
            Self::ModuleEntities => "module entities",
            Self::ModuleRelationships => "module relationships",
        };
        f.write_str(label)
    }
}

/// Endpoint of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Source,
    Target,
}

impl Direction {
    /// Both directions in canonical check order.
    pub const ALL: [Direction; 2] = [Direction::Source, Direction::Target];
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Target => write!(f, "target"),
        }
    }
}

// =============================================================================
// TABULAR INPUT
// =============================================================================

/// A single string-keyed record as supplied by the row source.
pub type Row = BTreeMap<String, String>;

/// A raw table: its declared header and its rows, in file order.
///
/// An empty `columns` list means the source had no header at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Create a table from a header and rows.
    #[must_use]
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    /// Build a table from positional records aligned with `columns`.
    ///
    /// Missing trailing cells are stored as empty strings.
    #[must_use]
    pub fn from_records<I, R, S>(name: impl Into<String>, columns: &[&str], records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let header: Vec<String> = columns.iter().map(|c| (*c).to_string()).collect();
        let rows = records
            .into_iter()
            .map(|record| {
                let mut cells = record.into_iter().map(Into::into);
                header
                    .iter()
                    .map(|column| (column.clone(), cells.next().unwrap_or_default()))
                    .collect()
            })
            .collect();
        Self::new(name, header, rows)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Whether the source supplied a header line.
    #[must_use]
    pub fn has_header(&self) -> bool {
        !self.columns.is_empty()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The two tables that make up one scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeTables {
    pub entities: Table,
    pub relationships: Table,
}

impl ScopeTables {
    #[must_use]
    pub fn new(entities: Table, relationships: Table) -> Self {
        Self {
            entities,
            relationships,
        }
    }
}

/// Every table of a knowledge pack: Core plus named Modules.
///
/// Modules are keyed by name, so they are unique and iterate in
/// lexicographic order, which is the order they are loaded in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackTables {
    pub core: ScopeTables,
    pub modules: BTreeMap<String, ScopeTables>,
}

impl PackTables {
    #[must_use]
    pub fn new(core: ScopeTables) -> Self {
        Self {
            core,
            modules: BTreeMap::new(),
        }
    }

    /// Add a module, replacing any module of the same name.
    #[must_use]
    pub fn with_module(mut self, name: impl Into<String>, tables: ScopeTables) -> Self {
        self.modules.insert(name.into(), tables);
        self
    }

    /// Module names in load order.
    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }
}

// =============================================================================
// URN INDEX
// =============================================================================

/// Membership lookup over a set of known URNs.
///
/// The referential-integrity checker and the core-isolation guard only ever
/// ask "is this URN known here?", so both take any `UrnIndex`.
pub trait UrnIndex {
    fn contains_urn(&self, urn: &str) -> bool;
}

impl UrnIndex for BTreeSet<String> {
    fn contains_urn(&self, urn: &str) -> bool {
        self.contains(urn)
    }
}

impl<T: UrnIndex + ?Sized> UrnIndex for &T {
    fn contains_urn(&self, urn: &str) -> bool {
        (**self).contains_urn(urn)
    }
}

/// Two indexes viewed as one (e.g. the merged graph plus a staged scope).
#[derive(Debug, Clone, Copy)]
pub struct Layered<A, B> {
    pub base: A,
    pub overlay: B,
}

impl<A: UrnIndex, B: UrnIndex> UrnIndex for Layered<A, B> {
    fn contains_urn(&self, urn: &str) -> bool {
        self.overlay.contains_urn(urn) || self.base.contains_urn(urn)
    }
}

// =============================================================================
// TESTS
// =============================================================================
