//! Core immutability across Module scopes.
//!
//! A Module owns the entities it defines and the relationships whose source
//! it owns. It may point at Core entities as targets, but it may neither
//! redefine a Core URN nor attach relationships sourced at one.

use crate::MkpError;
use crate::types::{Relationship, UrnIndex};

/// Rejects Module records that would change what Core owns.
pub struct CoreIsolationGuard;

impl CoreIsolationGuard {
    /// A Module entity must not reuse a Core URN.
    pub fn check_entity<I: UrnIndex>(urn: &str, core: &I) -> Result<(), MkpError> {
        if core.contains_urn(urn) {
            return Err(MkpError::CoreMutation {
                urn: urn.to_string(),
            });
        }
        Ok(())
    }

    /// A Module relationship must not be owned by (sourced at) a Core entity.
    pub fn check_relationship<I: UrnIndex>(
        relationship: &Relationship,
        core: &I,
    ) -> Result<(), MkpError> {
        Self::check_entity(relationship.source(), core)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn core() -> BTreeSet<String> {
        ["urn:mkp:tool:nmap".to_string()].into_iter().collect()
    }

    #[test]
    fn redefining_core_entity_fails() {
        let err = CoreIsolationGuard::check_entity("urn:mkp:tool:nmap", &core())
            .expect_err("mutation");
        assert_eq!(
            err.to_string(),
            "Module attempts to mutate Core entity: urn:mkp:tool:nmap"
        );
        assert_eq!(err.exit_code(), 25);
    }

    #[test]
    fn new_entity_passes() {
        assert!(CoreIsolationGuard::check_entity("urn:mkp:tool:zmap", &core()).is_ok());
    }

    #[test]
    fn relationship_into_core_passes() {
        let rel = Relationship::new("urn:mkp:tool:zmap", "RELATED_TO", "urn:mkp:tool:nmap");
        assert!(CoreIsolationGuard::check_relationship(&rel, &core()).is_ok());
    }

    #[test]
    fn relationship_owned_by_core_fails() {
        let rel = Relationship::new("urn:mkp:tool:nmap", "RELATED_TO", "urn:mkp:tool:zmap");
        let err = CoreIsolationGuard::check_relationship(&rel, &core()).expect_err("mutation");
        assert!(matches!(err, MkpError::CoreMutation { ref urn } if urn == "urn:mkp:tool:nmap"));
    }
}
