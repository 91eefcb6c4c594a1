//! Associative option descriptor.

use crate::error::DefinitionError;

use super::flag;
use super::synopsis::{ParameterKind, SynopsisEntry, ValueSynopsis};

/// A named parameter taking a string value (`--name=value`).
///
/// Optional by default. `value_is_optional` marks options that may be
/// passed bare (`--opt` vs `--opt=val`); a required option can never
/// have an optional value, and both setters reject the combination
/// eagerly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssocOption {
    name: String,
    optional: bool,
    default: Option<String>,
    description: Option<String>,
    options: Vec<String>,
    value_is_optional: bool,
}

impl AssocOption {
    /// Create an optional option. Names may contain lowercase letters,
    /// digits, `-`, and `_`.
    pub fn new(name: &str) -> Result<Self, DefinitionError> {
        if !flag::is_valid_name(name) {
            return Err(DefinitionError::InvalidOptionName(name.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            optional: true,
            default: None,
            description: None,
            options: Vec::new(),
            value_is_optional: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn value_is_optional(&self) -> bool {
        self.value_is_optional
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

    /// Mark the option required (or optional again). Rejected when the
    /// option's value is already optional.
    pub fn with_optional(mut self, optional: bool) -> Result<Self, DefinitionError> {
        if !optional && self.value_is_optional {
            return Err(DefinitionError::RequiredOptionWithOptionalValue(self.name.clone()));
        }
        self.optional = optional;
        Ok(self)
    }

    /// Allow the option to appear without a value. Rejected when the
    /// option is required.
    pub fn with_value_optional(mut self, value_is_optional: bool) -> Result<Self, DefinitionError> {
        if value_is_optional && !self.optional {
            return Err(DefinitionError::RequiredOptionWithOptionalValue(self.name.clone()));
        }
        self.value_is_optional = value_is_optional;
        Ok(self)
    }

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

    pub(crate) fn set_default(&mut self, default: impl Into<String>) {
        self.default = Some(default.into());
    }

    pub(crate) fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    pub(crate) fn set_options(&mut self, options: Vec<String>) {
        self.options = options;
    }

    pub fn synopsis(&self) -> SynopsisEntry {
        let mut entry = SynopsisEntry::new(ParameterKind::Assoc, &self.name, self.optional, false);
        entry.description = self.description.clone();
        entry.default = self.default.clone();
        entry.options = self.options.clone();
        if self.value_is_optional {
            entry.value = Some(ValueSynopsis {
                optional: true,
                name: self.name.clone(),
            });
        }
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_names() {
        assert!(AssocOption::new("").is_err());
        assert!(AssocOption::new("Upper").is_err());
        assert!(AssocOption::new("opt-one_2").is_ok());
    }

    #[test]
    fn test_optional_by_default() {
        assert!(AssocOption::new("opt").unwrap().is_optional());
    }

    #[test]
    fn test_required_and_optional_value_are_mutually_exclusive() {
        // Required first, then optional value.
        let opt = AssocOption::new("opt").unwrap().with_optional(false).unwrap();
        assert_eq!(
            opt.with_value_optional(true),
            Err(DefinitionError::RequiredOptionWithOptionalValue("opt".into()))
        );

        // Optional value first, then required.
        let opt = AssocOption::new("opt").unwrap().with_value_optional(true).unwrap();
        assert_eq!(
            opt.with_optional(false),
            Err(DefinitionError::RequiredOptionWithOptionalValue("opt".into()))
        );
    }

    #[test]
    fn test_synopsis_with_optional_value() {
        let entry = AssocOption::new("dbl-optional")
            .unwrap()
            .with_value_optional(true)
            .unwrap()
            .synopsis();

        assert_eq!(entry.kind, ParameterKind::Assoc);
        assert!(entry.optional);
        assert_eq!(
            entry.value,
            Some(ValueSynopsis {
                optional: true,
                name: "dbl-optional".into()
            })
        );
    }

    #[test]
    fn test_synopsis_includes_configured_fields() {
        let entry = AssocOption::new("opt")
            .unwrap()
            .with_default("fallback")
            .with_description("An option")
            .with_options(["a", "b"])
            .synopsis();

        assert_eq!(entry.default.as_deref(), Some("fallback"));
        assert_eq!(entry.description.as_deref(), Some("An option"));
        assert_eq!(entry.options, vec!["a", "b"]);
        assert!(!entry.repeating);
    }
}
