//! Predicate allow-listing per scope.

use crate::MkpError;
use crate::config::ValidationConfig;
use crate::types::ScopeKind;

/// Checks relationship predicates against the configured allow-lists.
pub struct PredicateValidator<'a> {
    config: &'a ValidationConfig,
}

impl<'a> PredicateValidator<'a> {
    #[must_use]
    pub fn new(config: &'a ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate `relation` against the allow-list for `scope`.
    pub fn validate(&self, relation: &str, scope: ScopeKind) -> Result<(), MkpError> {
        if self.config.allow_list(scope).contains(relation) {
            Ok(())
        } else {
            Err(MkpError::PredicateNotAllowed {
                scope,
                relation: relation.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ValidationConfig {
        ValidationConfig::new().with_predicates(["USES", "IS_A"], ["USES", "IS_A", "MENTIONS"])
    }

    #[test]
    fn scope_selects_allow_list() {
        let config = config();
        let validator = PredicateValidator::new(&config);

        assert!(validator.validate("USES", ScopeKind::Core).is_ok());
        assert!(validator.validate("MENTIONS", ScopeKind::Module).is_ok());
        assert!(validator.validate("MENTIONS", ScopeKind::Core).is_err());
    }

    #[test]
    fn error_is_scope_tagged() {
        let config = config();
        let validator = PredicateValidator::new(&config);

        let core = validator
            .validate("FOOBAR", ScopeKind::Core)
            .expect_err("not allowed");
        assert_eq!(core.to_string(), "Predicate not allowed (core): FOOBAR");

        let module = validator
            .validate("FOOBAR", ScopeKind::Module)
            .expect_err("not allowed");
        assert_eq!(module.to_string(), "Predicate not allowed (module): FOOBAR");
        assert_eq!(module.exit_code(), 23);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let config = config();
        let validator = PredicateValidator::new(&config);
        assert!(validator.validate("uses", ScopeKind::Core).is_err());
    }
}
