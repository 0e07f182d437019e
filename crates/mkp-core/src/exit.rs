//! # Exit Codes
//!
//! The stable exit-code contract at the process boundary.
//!
//! | Code  | Meaning                         | Class      |
//! |-------|---------------------------------|------------|
//! | 0     | success                         | success    |
//! | 21    | schema / missing columns        | validation |
//! | 22    | invalid URN                     | validation |
//! | 23    | predicate not allowed           | validation |
//! | 24    | dangling reference              | validation |
//! | 25    | module attempts to mutate Core  | validation |
//! | 31-32 | input load / I/O failure        | load       |
//! | 41-42 | external helper failure         | helper     |
//! | other | unclassified                    | internal   |
//!
//! Pipeline errors are classified through `MkpError::kind()`.
//! `map_message_to_code` only exists for free-text messages that arrive
//! without a structured kind.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_INTERNAL: i32 = 1;

pub const EXIT_SCHEMA: i32 = 21;
pub const EXIT_INVALID_URN: i32 = 22;
pub const EXIT_PREDICATE_NOT_ALLOWED: i32 = 23;
pub const EXIT_DANGLING_REFERENCE: i32 = 24;
pub const EXIT_CORE_MUTATION: i32 = 25;

pub const EXIT_LOAD_MISSING: i32 = 31;
pub const EXIT_LOAD_UNREADABLE: i32 = 32;

pub const EXIT_HELPER_SPAWN: i32 = 41;
pub const EXIT_HELPER_EXIT: i32 = 42;

/// Message fragments in matching priority order.
const MESSAGE_PATTERNS: [(&str, i32); 5] = [
    ("missing columns", EXIT_SCHEMA),
    ("Invalid URN", EXIT_INVALID_URN),
    ("Predicate not allowed", EXIT_PREDICATE_NOT_ALLOWED),
    ("Dangling reference", EXIT_DANGLING_REFERENCE),
    ("mutate Core", EXIT_CORE_MUTATION),
];

/// Coarse category of an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExitClass {
    Success,
    Validation,
    Load,
    Helper,
    Internal,
}

impl ExitClass {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Validation => "validation",
            Self::Load => "load",
            Self::Helper => "helper",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ExitClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify an exit code.
#[must_use]
pub fn exit_class(code: i32) -> ExitClass {
    match code {
        EXIT_SUCCESS => ExitClass::Success,
        21..=25 => ExitClass::Validation,
        31..=32 => ExitClass::Load,
        41..=42 => ExitClass::Helper,
        _ => ExitClass::Internal,
    }
}

/// Map a rendered validation message to its exit code.
///
/// First matching fragment wins; wrapped messages match on their inner
/// text. Anything unmatched falls back to the schema code.
#[must_use]
pub fn map_message_to_code(message: &str) -> i32 {
    MESSAGE_PATTERNS
        .iter()
        .find(|(fragment, _)| message.contains(fragment))
        .map(|(_, code)| *code)
        .unwrap_or(EXIT_SCHEMA)
}

// =============================================================================
// TESTS
// =============================================================================
