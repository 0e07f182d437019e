//! URN grammar: `urn:<namespace>:<type>:<identifier>`.

use crate::MkpError;
use crate::primitives::{URN_SCHEME, URN_SEGMENTS};
use crate::types::UrnContext;

/// The three variable segments of a well-formed URN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrnParts<'a> {
    pub namespace: &'a str,
    pub kind: &'a str,
    pub identifier: &'a str,
}

/// Checks strings against the URN grammar.
///
/// - Exactly the literal scheme `urn` first
/// - Namespace, type and identifier all non-empty
/// - No whitespace anywhere
/// - The identifier is everything after the third colon; it may contain
///   further colons, but none of its colon-separated parts may be empty
pub struct UrnValidator;

impl UrnValidator {
    /// Validate a URN read from `context`.
    pub fn validate(urn: &str, context: UrnContext) -> Result<(), MkpError> {
        match Self::parse(urn) {
            Some(_) => Ok(()),
            None => Err(MkpError::InvalidUrn {
                context,
                urn: urn.to_string(),
            }),
        }
    }

    /// Split a URN into its segments, or `None` if it is malformed.
    #[must_use]
    pub fn parse(urn: &str) -> Option<UrnParts<'_>> {
        if urn.chars().any(char::is_whitespace) {
            return None;
        }

        let segments: Vec<&str> = urn.splitn(URN_SEGMENTS, ':').collect();
        match *segments.as_slice() {
            [scheme, namespace, kind, identifier]
                if scheme == URN_SCHEME
                    && !namespace.is_empty()
                    && !kind.is_empty()
                    && !identifier.split(':').any(str::is_empty) =>
            {
                Some(UrnParts {
                    namespace,
                    kind,
                    identifier,
                })
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn is_valid(urn: &str) -> bool {
        Self::parse(urn).is_some()
    }
}
