//! # Error Types
//!
//! Every failure the pipeline can surface, as one structured enum.
//!
//! - Each variant renders the stable, human-facing message for its kind
//! - `MkpError::kind()` exposes the kind; exit codes are a direct match on it
//! - Scope context is attached exactly once, at the scope boundary
//! - No failure is ever classified by re-parsing its rendered text

use crate::exit::{
    EXIT_CORE_MUTATION, EXIT_DANGLING_REFERENCE, EXIT_HELPER_EXIT, EXIT_HELPER_SPAWN,
    EXIT_INTERNAL, EXIT_INVALID_URN, EXIT_LOAD_MISSING, EXIT_LOAD_UNREADABLE,
    EXIT_PREDICATE_NOT_ALLOWED, EXIT_SCHEMA, ExitClass, exit_class,
};
use crate::types::{Direction, Scope, ScopeKind, UrnContext};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// FAILURE SUB-KINDS
// =============================================================================

/// I/O-level failure while supplying input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadFailure {
    /// The input file or directory does not exist.
    Missing,
    /// The input exists but could not be read or parsed.
    Unreadable,
}

/// Failure of the external helper process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HelperFailure {
    /// The helper could not be started.
    Spawn,
    /// The helper ran but did not complete successfully.
    Exit,
}

// =============================================================================
// ERROR KIND
// =============================================================================

/// The mutually exclusive failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Schema,
    InvalidUrn,
    PredicateNotAllowed,
    DanglingReference,
    CoreMutation,
    Load(LoadFailure),
    Helper(HelperFailure),
    Internal,
}

impl ErrorKind {
    /// The process exit code for this kind.
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Schema => EXIT_SCHEMA,
            Self::InvalidUrn => EXIT_INVALID_URN,
            Self::PredicateNotAllowed => EXIT_PREDICATE_NOT_ALLOWED,
            Self::DanglingReference => EXIT_DANGLING_REFERENCE,
            Self::CoreMutation => EXIT_CORE_MUTATION,
            Self::Load(LoadFailure::Missing) => EXIT_LOAD_MISSING,
            Self::Load(LoadFailure::Unreadable) => EXIT_LOAD_UNREADABLE,
            Self::Helper(HelperFailure::Spawn) => EXIT_HELPER_SPAWN,
            Self::Helper(HelperFailure::Exit) => EXIT_HELPER_EXIT,
            Self::Internal => EXIT_INTERNAL,
        }
    }

    #[must_use]
    pub fn exit_class(self) -> ExitClass {
        exit_class(self.exit_code())
    }
}

// =============================================================================
// ERROR
// =============================================================================

/// Errors that can occur while loading and validating a knowledge pack.
///
/// - No silent failures
/// - Use `Result<T, MkpError>` for fallible operations
/// - The pipeline never panics; every failure is one of these values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MkpError {
    /// The table header lacks required columns.
    #[error("{table}: missing columns {}", column_list(.missing))]
    MissingColumns { table: String, missing: Vec<String> },

    /// The table has no header at all.
    #[error("{table} is empty")]
    EmptyTable { table: String },

    /// A URN string does not match `urn:<namespace>:<type>:<identifier>`.
    #[error("Invalid URN in {context}: {urn}")]
    InvalidUrn { context: UrnContext, urn: String },

    /// An entity URN is defined twice. Rendered as an invalid URN so the
    /// text classifier agrees with the structured kind.
    #[error("Invalid URN in {context} (duplicate): {urn}")]
    DuplicateUrn { context: UrnContext, urn: String },

    /// A relationship predicate is outside the scope's allow-list.
    #[error("Predicate not allowed ({scope}): {relation}")]
    PredicateNotAllowed { scope: ScopeKind, relation: String },

    /// A relationship endpoint does not resolve to a known entity.
    #[error("Dangling reference ({direction}): {urn}")]
    DanglingReference { direction: Direction, urn: String },

    /// A Module redefines or takes ownership of a Core entity.
    #[error("Module attempts to mutate Core entity: {urn}")]
    CoreMutation { urn: String },

    /// A validation failure wrapped with the scope it occurred in.
    #[error("{}", scoped_message(.scope, .inner))]
    Scoped {
        scope: Scope,
        #[source]
        inner: Box<MkpError>,
    },

    /// Input could not be supplied.
    #[error("{detail}")]
    Load { failure: LoadFailure, detail: String },

    /// The external helper failed.
    #[error("{detail}")]
    Helper {
        failure: HelperFailure,
        detail: String,
    },

    /// Anything not covered above.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MkpError {
    /// Shorthand for a missing-input load error.
    pub fn load_missing(detail: impl Into<String>) -> Self {
        Self::Load {
            failure: LoadFailure::Missing,
            detail: detail.into(),
        }
    }

    /// Shorthand for an unreadable-input load error.
    pub fn load_unreadable(detail: impl Into<String>) -> Self {
        Self::Load {
            failure: LoadFailure::Unreadable,
            detail: detail.into(),
        }
    }

    /// Shorthand for a helper error.
    pub fn helper(failure: HelperFailure, detail: impl Into<String>) -> Self {
        Self::Helper {
            failure,
            detail: detail.into(),
        }
    }

    /// Attach scope context.
    ///
    /// Already-scoped errors are returned unchanged, so an error is wrapped
    /// at most once.
    #[must_use]
    pub fn in_scope(self, scope: &Scope) -> Self {
        match self {
            Self::Scoped { .. } => self,
            inner => Self::Scoped {
                scope: scope.clone(),
                inner: Box::new(inner),
            },
        }
    }

    /// The structured kind of this error. Scoped errors report their inner kind.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingColumns { .. } | Self::EmptyTable { .. } => ErrorKind::Schema,
            Self::InvalidUrn { .. } | Self::DuplicateUrn { .. } => ErrorKind::InvalidUrn,
            Self::PredicateNotAllowed { .. } => ErrorKind::PredicateNotAllowed,
            Self::DanglingReference { .. } => ErrorKind::DanglingReference,
            Self::CoreMutation { .. } => ErrorKind::CoreMutation,
            Self::Scoped { inner, .. } => inner.kind(),
            Self::Load { failure, .. } => ErrorKind::Load(*failure),
            Self::Helper { failure, .. } => ErrorKind::Helper(*failure),
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }

    #[must_use]
    pub fn exit_class(&self) -> ExitClass {
        self.kind().exit_class()
    }

    /// The scope this error was raised in, if it has been wrapped.
    #[must_use]
    pub fn scope(&self) -> Option<&Scope> {
        match self {
            Self::Scoped { scope, .. } => Some(scope),
            _ => None,
        }
    }

    /// The innermost error, with scope context stripped.
    #[must_use]
    pub fn unscoped(&self) -> &MkpError {
        match self {
            Self::Scoped { inner, .. } => inner.unscoped(),
            other => other,
        }
    }
}

fn scoped_message(scope: &Scope, inner: &MkpError) -> String {
    match scope {
        Scope::Core => format!("Core validation failed: {}", inner),
        Scope::Module(name) => format!("Module validation failed ({}): {}", name, inner),
    }
}

/// Render column names as `['a', 'b']`.
fn column_list(columns: &[String]) -> String {
    let quoted: Vec<String> = columns.iter().map(|c| format!("'{}'", c)).collect();
    format!("[{}]", quoted.join(", "))
}

// =============================================================================
// TESTS
// =============================================================================
