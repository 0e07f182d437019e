//! # Validators
//!
//! The record-level checks the loader runs, in pipeline order:
//!
//! 1. [`SchemaValidator`] - required columns per table
//! 2. [`UrnValidator`] - URN grammar per string
//! 3. [`PredicateValidator`] - relationship predicate vs. scope allow-list
//! 4. [`ReferentialIntegrityChecker`] - relationship endpoints resolve
//! 5. [`CoreIsolationGuard`] - Modules never touch Core-owned entities
//!
//! Each check is pure and reports the first violation it sees as an
//! unscoped [`MkpError`](crate::MkpError). Scope context is added by the loader.

mod integrity;
mod isolation;
mod predicate;
mod schema;
mod urn;

pub use integrity::ReferentialIntegrityChecker;
pub use isolation::CoreIsolationGuard;
pub use predicate::PredicateValidator;
pub use schema::SchemaValidator;
pub use urn::{UrnParts, UrnValidator};
