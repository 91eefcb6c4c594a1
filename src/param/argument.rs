//! Positional argument descriptor.

use crate::error::DefinitionError;

use super::synopsis::{ParameterKind, SynopsisEntry};

/// A positional parameter, consumed in declared order from the raw
/// token stream.
///
/// Constructed by the signature parser or user code, configured via the
/// fluent `with_*` methods, then sealed into a [`Command`](crate::Command).
/// A repeating argument absorbs all remaining positional tokens and must
/// be the last argument of its command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    name: String,
    optional: bool,
    repeating: bool,
    default: Option<String>,
    description: Option<String>,
    options: Vec<String>,
}

impl Argument {
    /// Create a required, non-repeating argument. Names may contain
    /// letters, digits, `-`, and `_`.
    pub fn new(name: &str) -> Result<Self, DefinitionError> {
        if !is_valid_name(name) {
            return Err(DefinitionError::InvalidArgumentName(name.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            optional: false,
            repeating: false,
            default: None,
            description: None,
            options: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn is_repeating(&self) -> bool {
        self.repeating
    }

    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Enumerated allowed values, advisory only.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn with_repeating(mut self, repeating: bool) -> Self {
        self.repeating = repeating;
        self
    }

    /// Set a default value. Only meaningful together with `optional`;
    /// the combination is validated when the argument is sealed into a
    /// command and again at synopsis time.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_options(mut self, options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn set_default(&mut self, default: impl Into<String>) -> Result<(), DefinitionError> {
        if !self.optional {
            return Err(DefinitionError::RequiredArgumentWithDefault(self.name.clone()));
        }
        self.default = Some(default.into());
        Ok(())
    }

    pub(crate) fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    pub(crate) fn set_options(&mut self, options: Vec<String>) {
        self.options = options;
    }

    /// Validate internal consistency: a default requires `optional`.
    pub(crate) fn validate(&self) -> Result<(), DefinitionError> {
        if self.default.is_some() && !self.optional {
            return Err(DefinitionError::RequiredArgumentWithDefault(self.name.clone()));
        }
        Ok(())
    }

    pub fn synopsis(&self) -> Result<SynopsisEntry, DefinitionError> {
        self.validate()?;

        let mut entry = SynopsisEntry::new(
            ParameterKind::Positional,
            &self.name,
            self.optional,
            self.repeating,
        );
        entry.description = self.description.clone();
        entry.default = self.default.clone();
        entry.options = self.options.clone();
        Ok(entry)
    }
}

/// Argument names: letters, digits, `-`, `_`.
pub(crate) fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_names() {
        assert!(Argument::new("").is_err());
        assert!(Argument::new("has space").is_err());
        assert!(Argument::new("has.dot").is_err());
        assert!(Argument::new("arg-one_2").is_ok());
        assert!(Argument::new("UPPER").is_ok());
    }

    #[test]
    fn test_defaults() {
        let arg = Argument::new("arg").unwrap();
        assert!(!arg.is_optional());
        assert!(!arg.is_repeating());
        assert!(arg.default().is_none());
        assert!(arg.description().is_none());
        assert!(arg.options().is_empty());
    }

    #[test]
    fn test_synopsis_rejects_default_on_required_argument() {
        let arg = Argument::new("arg").unwrap().with_default("apple");
        assert_eq!(
            arg.synopsis(),
            Err(DefinitionError::RequiredArgumentWithDefault("arg".into()))
        );
    }

    #[test]
    fn test_synopsis_includes_configured_fields() {
        let arg = Argument::new("arg")
            .unwrap()
            .with_optional(true)
            .with_default("apple")
            .with_description("A fruit")
            .with_options(["apple", "banana"]);

        let entry = arg.synopsis().unwrap();
        assert_eq!(entry.kind, ParameterKind::Positional);
        assert_eq!(entry.name.as_deref(), Some("arg"));
        assert!(entry.optional);
        assert!(!entry.repeating);
        assert_eq!(entry.default.as_deref(), Some("apple"));
        assert_eq!(entry.description.as_deref(), Some("A fruit"));
        assert_eq!(entry.options, vec!["apple", "banana"]);
    }

    #[test]
    fn test_set_default_requires_optional() {
        let mut arg = Argument::new("arg").unwrap();
        assert!(arg.set_default("apple").is_err());

        let mut arg = Argument::new("arg").unwrap().with_optional(true);
        assert!(arg.set_default("apple").is_ok());
        assert_eq!(arg.default(), Some("apple"));
    }
}
