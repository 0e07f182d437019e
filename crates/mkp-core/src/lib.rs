//! # mkp-core
//!
//! The deterministic loader/validator for knowledge packs.
//!
//! A knowledge pack is a set of CSV-shaped entity and relationship tables,
//! split into one immutable Core scope and any number of named Module
//! scopes that extend it. This crate checks every table before the graph is
//! used and reports deterministic statistics over the result.
//!
//! ## Pipeline
//!
//! ```text
//! raw rows ──▶ validators ──▶ merged graph ──▶ stats ──▶ report
//!                  │
//!                  └── MkpError (scoped once) ──▶ exit code / exit class
//! ```
//!
//! ## Architectural Constraints
//!
//! - Single-threaded and synchronous; scopes load strictly in sequence
//! - No I/O: row supply, config files and rendering belong to the caller
//! - Deterministic: `BTreeMap`/`BTreeSet` only, no floats

// =============================================================================
// MODULES
// =============================================================================

pub mod config;
pub mod error;
pub mod exit;
pub mod graph;
pub mod loader;
pub mod primitives;
pub mod report;
pub mod stats;
pub mod types;
pub mod validators;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use types::{
    Direction, Entity, Layered, PackTables, Relationship, Row, Scope, ScopeKind, ScopeTables,
    Table, UrnContext, UrnIndex,
};

pub use error::{ErrorKind, HelperFailure, LoadFailure, MkpError};

// =============================================================================
// RE-EXPORTS: Pipeline
// =============================================================================

pub use config::ValidationConfig;
pub use exit::{ExitClass, exit_class, map_message_to_code};
pub use graph::{KnowledgeGraph, ScopeSummary};
pub use loader::GraphLoader;
pub use report::{Report, ReportStatus};
pub use stats::{GraphStats, PredicateCount, rank_relations, top_predicates};
pub use validators::{
    CoreIsolationGuard, PredicateValidator, ReferentialIntegrityChecker, SchemaValidator,
    UrnValidator,
};
