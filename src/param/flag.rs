//! Boolean flag descriptor.

use crate::error::DefinitionError;

use super::synopsis::{ParameterKind, SynopsisEntry};

/// A boolean switch. Always optional, never repeating, and always
/// defaults to `false` at bind time - only the description is
/// configurable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    name: String,
    description: Option<String>,
}

impl Flag {
    /// Create a flag. Names may contain lowercase letters, digits, `-`,
    /// and `_`.
    pub fn new(name: &str) -> Result<Self, DefinitionError> {
        if !is_valid_name(name) {
            return Err(DefinitionError::InvalidFlagName(name.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            description: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub(crate) fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    pub fn synopsis(&self) -> SynopsisEntry {
        let mut entry = SynopsisEntry::new(ParameterKind::Flag, &self.name, true, false);
        entry.description = self.description.clone();
        entry
    }
}

/// Flag names: lowercase letters, digits, `-`, `_`.
pub(crate) fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_names() {
        assert!(Flag::new("").is_err());
        assert!(Flag::new("Upper").is_err());
        assert!(Flag::new("has space").is_err());
        assert!(Flag::new("flag-one_2").is_ok());
    }

    #[test]
    fn test_synopsis_is_always_optional_non_repeating() {
        let entry = Flag::new("flag-one").unwrap().synopsis();
        assert_eq!(entry.kind, ParameterKind::Flag);
        assert_eq!(entry.name.as_deref(), Some("flag-one"));
        assert!(entry.optional);
        assert!(!entry.repeating);
        assert!(entry.default.is_none());
        assert!(entry.value.is_none());
    }

    #[test]
    fn test_synopsis_carries_description() {
        let entry = Flag::new("dry-run")
            .unwrap()
            .with_description("Skip writes")
            .synopsis();
        assert_eq!(entry.description.as_deref(), Some("Skip writes"));
    }
}
