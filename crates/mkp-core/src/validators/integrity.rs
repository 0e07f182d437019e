//! Referential integrity of relationship endpoints.

use crate::MkpError;
use crate::types::{Direction, Relationship, UrnIndex};

/// Checks that relationship endpoints resolve to known entities.
pub struct ReferentialIntegrityChecker;

impl ReferentialIntegrityChecker {
    /// Validate both endpoints of `relationship` against `known`.
    ///
    /// The source is checked before the target.
    pub fn check<I: UrnIndex>(relationship: &Relationship, known: &I) -> Result<(), MkpError> {
        for direction in Direction::ALL {
            let urn = relationship.endpoint(direction);
            if !known.contains_urn(urn) {
                return Err(MkpError::DanglingReference {
                    direction,
                    urn: urn.to_string(),
                });
            }
        }
        Ok(())
    }
}
