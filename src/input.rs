//! Per-invocation input resolution.
//!
//! [`Input::resolve`] walks a command's declared parameters against the
//! raw positional tokens and name/value pairs the host runner delivered,
//! producing three buckets that keep declaration order: arguments,
//! options, and flags. Resolution is a pure function of its inputs and
//! fails fast on arity violations.

use crate::command::Command;
use crate::error::ResolutionError;
use crate::param::NamedParameter;

/// Default bucket name for undeclared name/value pairs on commands
/// that accept arbitrary options.
pub const ARBITRARY_OPTIONS_KEY: &str = "arbitraryOptions";

/// A raw named value as delivered by the host runner: a string for
/// `--opt=value`, a bool for bare `--flag` / `--no-flag`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Str(String),
    Bool(bool),
}

impl RawValue {
    /// Flag coercion: a bare boolean keeps its value, any string
    /// presence counts as set.
    pub fn as_flag(&self) -> bool {
        match self {
            RawValue::Bool(b) => *b,
            RawValue::Str(_) => true,
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Str(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Str(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

/// A resolved positional argument: one token, or the tail of the token
/// stream for a repeating argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentValue {
    Single(String),
    Many(Vec<String>),
}

impl ArgumentValue {
    /// The single value, or the first of a repeating set.
    pub fn first(&self) -> Option<&str> {
        match self {
            ArgumentValue::Single(value) => Some(value),
            ArgumentValue::Many(values) => values.first().map(String::as_str),
        }
    }

    pub fn values(&self) -> Vec<&str> {
        match self {
            ArgumentValue::Single(value) => vec![value.as_str()],
            ArgumentValue::Many(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

/// A resolved option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Regular `--opt=value`.
    Str(String),
    /// Optional-value option passed bare (`--opt`).
    Bool(bool),
    /// The arbitrary-options bucket: undeclared pairs in arrival order.
    Map(Vec<(String, RawValue)>),
}

impl OptionValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(value) => Some(value),
            _ => None,
        }
    }
}

/// One of the three resolved buckets, for callers that look a name up
/// without knowing which bucket it landed in.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<'a> {
    Argument(&'a ArgumentValue),
    Option(&'a OptionValue),
    Flag(bool),
}

/// Resolved input for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    arguments: Vec<(String, ArgumentValue)>,
    options: Vec<(String, OptionValue)>,
    flags: Vec<(String, bool)>,
    raw_positional: Vec<String>,
    raw_named: Vec<(String, RawValue)>,
}

impl Input {
    /// Resolve with the default arbitrary-options bucket name.
    pub fn resolve(
        positional: Vec<String>,
        named: Vec<(String, RawValue)>,
        command: &Command,
    ) -> Result<Self, ResolutionError> {
        Self::resolve_with_bucket(positional, named, command, ARBITRARY_OPTIONS_KEY)
    }

    /// Resolve raw input against a command's declared parameters.
    ///
    /// Arguments are consumed in declared order; a repeating argument
    /// absorbs the remaining tail. Declared flags always resolve, false
    /// when absent. Undeclared named pairs either collect under
    /// `bucket_key` (when the command accepts arbitrary options) or
    /// fail resolution.
    pub fn resolve_with_bucket(
        positional: Vec<String>,
        named: Vec<(String, RawValue)>,
        command: &Command,
        bucket_key: &str,
    ) -> Result<Self, ResolutionError> {
        let full_name = command.full_name();
        let mut arguments = Vec::new();
        let mut tokens = positional.iter();

        for argument in command.arguments() {
            if argument.is_repeating() {
                let rest: Vec<String> = tokens.by_ref().cloned().collect();
                if rest.is_empty() {
                    if !argument.is_optional() {
                        return Err(ResolutionError::MissingRequiredArgument {
                            argument: argument.name().to_string(),
                            command: full_name,
                        });
                    }
                } else {
                    arguments.push((argument.name().to_string(), ArgumentValue::Many(rest)));
                }
                continue;
            }

            match tokens.next() {
                Some(token) => {
                    arguments.push((argument.name().to_string(), ArgumentValue::Single(token.clone())));
                }
                None if !argument.is_optional() => {
                    return Err(ResolutionError::MissingRequiredArgument {
                        argument: argument.name().to_string(),
                        command: full_name,
                    });
                }
                None => {
                    if let Some(default) = argument.default() {
                        arguments.push((
                            argument.name().to_string(),
                            ArgumentValue::Single(default.to_string()),
                        ));
                    }
                }
            }
        }

        if tokens.next().is_some() {
            return Err(ResolutionError::TooManyArguments { command: full_name });
        }

        let mut remaining: Vec<(String, RawValue)> = named.clone();
        let mut options = Vec::new();
        let mut flags = Vec::new();

        for parameter in command.options() {
            let position = remaining.iter().position(|(name, _)| name == parameter.name());
            match parameter {
                NamedParameter::Flag(flag) => {
                    let value = match position {
                        Some(i) => remaining.remove(i).1.as_flag(),
                        None => false,
                    };
                    flags.push((flag.name().to_string(), value));
                }
                NamedParameter::Option(option) => match position {
                    Some(i) => {
                        let (_, raw) = remaining.remove(i);
                        let value = match raw {
                            RawValue::Str(s) => OptionValue::Str(s),
                            RawValue::Bool(b) => OptionValue::Bool(b),
                        };
                        options.push((option.name().to_string(), value));
                    }
                    None if !option.is_optional() => {
                        return Err(ResolutionError::MissingRequiredOption {
                            option: option.name().to_string(),
                            command: full_name,
                        });
                    }
                    None => {
                        if let Some(default) = option.default() {
                            options.push((
                                option.name().to_string(),
                                OptionValue::Str(default.to_string()),
                            ));
                        }
                    }
                },
            }
        }

        if !remaining.is_empty() {
            if !command.accepts_arbitrary_options() {
                return Err(ResolutionError::TooManyOptions { command: full_name });
            }
            options.push((bucket_key.to_string(), OptionValue::Map(remaining)));
        }

        Ok(Self {
            arguments,
            options,
            flags,
            raw_positional: positional,
            raw_named: named,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn argument(&self, name: &str) -> Option<&ArgumentValue> {
        self.arguments
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn has_argument(&self, name: &str) -> bool {
        self.argument(name).is_some()
    }

    pub fn arguments(&self) -> &[(String, ArgumentValue)] {
        &self.arguments
    }

    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn has_option(&self, name: &str) -> bool {
        self.option(name).is_some()
    }

    pub fn options(&self) -> &[(String, OptionValue)] {
        &self.options
    }

    /// A declared flag's resolved value. `None` for undeclared names.
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.flags.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    pub fn flags(&self) -> &[(String, bool)] {
        &self.flags
    }

    /// Bucket-agnostic lookup, checked in argument, option, flag order.
    pub fn get(&self, name: &str) -> Option<Lookup<'_>> {
        if let Some(value) = self.argument(name) {
            return Some(Lookup::Argument(value));
        }
        if let Some(value) = self.option(name) {
            return Some(Lookup::Option(value));
        }
        self.flag(name).map(Lookup::Flag)
    }

    pub fn raw_positional(&self) -> &[String] {
        &self.raw_positional
    }

    pub fn raw_named(&self) -> &[(String, RawValue)] {
        &self.raw_named
    }

    /// Resolved arguments flattened back into a token stream, declared
    /// order preserved.
    pub fn positional_values(&self) -> Vec<String> {
        let mut values = Vec::new();
        for (_, value) in &self.arguments {
            match value {
                ArgumentValue::Single(v) => values.push(v.clone()),
                ArgumentValue::Many(vs) => values.extend(vs.iter().cloned()),
            }
        }
        values
    }

    /// Resolved options and set flags merged back into raw-shaped
    /// pairs. The arbitrary-options bucket is flattened in place.
    pub fn named_values(&self) -> Vec<(String, RawValue)> {
        let mut values = Vec::new();
        for (name, value) in &self.options {
            match value {
                OptionValue::Str(v) => values.push((name.clone(), RawValue::Str(v.clone()))),
                OptionValue::Bool(b) => values.push((name.clone(), RawValue::Bool(*b))),
                OptionValue::Map(pairs) => values.extend(pairs.iter().cloned()),
            }
        }
        for (name, set) in &self.flags {
            if *set {
                values.push((name.clone(), RawValue::Bool(true)));
            }
        }
        values
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param::{Argument, AssocOption, Flag};

    fn command() -> Command {
        let mut cmd = Command::new("command").unwrap();
        cmd.add_argument(Argument::new("arg").unwrap()).unwrap();
        cmd.add_argument(
            Argument::new("opt-arg")
                .unwrap()
                .with_optional(true)
                .with_repeating(true),
        )
        .unwrap();
        cmd.add_flag(Flag::new("flag").unwrap()).unwrap();
        cmd.add_option(AssocOption::new("opt").unwrap()).unwrap();
        cmd
    }

    fn named(pairs: &[(&str, RawValue)]) -> Vec<(String, RawValue)> {
        pairs.iter().map(|(n, v)| (n.to_string(), v.clone())).collect()
    }

    #[test]
    fn test_resolves_declared_parameters() {
        let input = Input::resolve(
            vec!["one".into(), "two".into(), "three".into()],
            named(&[("flag", true.into()), ("opt", "value".into())]),
            &command(),
        )
        .unwrap();

        assert_eq!(
            input.argument("arg"),
            Some(&ArgumentValue::Single("one".into()))
        );
        assert_eq!(
            input.argument("opt-arg"),
            Some(&ArgumentValue::Many(vec!["two".into(), "three".into()]))
        );
        assert_eq!(input.flag("flag"), Some(true));
        assert_eq!(input.option("opt"), Some(&OptionValue::Str("value".into())));
    }

    #[test]
    fn test_absent_flag_resolves_false() {
        let input = Input::resolve(vec!["one".into()], vec![], &command()).unwrap();
        assert_eq!(input.flag("flag"), Some(false));
        assert_eq!(input.flag("undeclared"), None);
    }

    #[test]
    fn test_absent_optional_parameters_are_omitted() {
        let input = Input::resolve(vec!["one".into()], vec![], &command()).unwrap();
        assert!(!input.has_argument("opt-arg"));
        assert!(!input.has_option("opt"));
    }

    #[test]
    fn test_missing_required_argument() {
        let err = Input::resolve(vec![], vec![], &command()).unwrap_err();
        assert_eq!(
            err,
            ResolutionError::MissingRequiredArgument {
                argument: "arg".into(),
                command: "command".into(),
            }
        );
    }

    #[test]
    fn test_too_many_arguments() {
        let mut cmd = Command::new("command").unwrap();
        cmd.add_argument(Argument::new("only").unwrap()).unwrap();

        let err = Input::resolve(vec!["one".into(), "two".into()], vec![], &cmd).unwrap_err();
        assert_eq!(err, ResolutionError::TooManyArguments { command: "command".into() });
    }

    #[test]
    fn test_missing_required_option() {
        let mut cmd = Command::new("command").unwrap();
        cmd.add_option(
            AssocOption::new("must").unwrap().with_optional(false).unwrap(),
        )
        .unwrap();

        let err = Input::resolve(vec![], vec![], &cmd).unwrap_err();
        assert_eq!(
            err,
            ResolutionError::MissingRequiredOption {
                option: "must".into(),
                command: "command".into(),
            }
        );
    }

    #[test]
    fn test_undeclared_option_rejected_without_arbitrary_options() {
        let err = Input::resolve(
            vec!["one".into()],
            named(&[("undeclared", "x".into())]),
            &command(),
        )
        .unwrap_err();
        assert_eq!(err, ResolutionError::TooManyOptions { command: "command".into() });
    }

    #[test]
    fn test_arbitrary_options_collect_into_bucket() {
        let mut cmd = command();
        cmd.set_accept_arbitrary_options(true).unwrap();

        let input = Input::resolve(
            vec!["one".into()],
            named(&[("extra", "x".into()), ("more", true.into())]),
            &cmd,
        )
        .unwrap();

        assert_eq!(
            input.option(ARBITRARY_OPTIONS_KEY),
            Some(&OptionValue::Map(vec![
                ("extra".into(), RawValue::Str("x".into())),
                ("more".into(), RawValue::Bool(true)),
            ]))
        );
    }

    #[test]
    fn test_custom_bucket_key() {
        let mut cmd = command();
        cmd.set_accept_arbitrary_options(true).unwrap();

        let input = Input::resolve_with_bucket(
            vec!["one".into()],
            named(&[("extra", "x".into())]),
            &cmd,
            "extras",
        )
        .unwrap();

        assert!(input.has_option("extras"));
        assert!(!input.has_option(ARBITRARY_OPTIONS_KEY));
    }

    #[test]
    fn test_defaults_fill_absent_optional_parameters() {
        let mut cmd = Command::new("command").unwrap();
        cmd.add_argument(
            Argument::new("arg")
                .unwrap()
                .with_optional(true)
                .with_default("apple"),
        )
        .unwrap();
        cmd.add_option(AssocOption::new("opt").unwrap().with_default("banana"))
            .unwrap();

        let input = Input::resolve(vec![], vec![], &cmd).unwrap();
        assert_eq!(
            input.argument("arg"),
            Some(&ArgumentValue::Single("apple".into()))
        );
        assert_eq!(
            input.option("opt"),
            Some(&OptionValue::Str("banana".into()))
        );
    }

    #[test]
    fn test_option_with_optional_value_passed_bare() {
        let mut cmd = Command::new("command").unwrap();
        cmd.add_option(
            AssocOption::new("opt").unwrap().with_value_optional(true).unwrap(),
        )
        .unwrap();

        let input = Input::resolve(vec![], named(&[("opt", true.into())]), &cmd).unwrap();
        assert_eq!(input.option("opt"), Some(&OptionValue::Bool(true)));
    }

    #[test]
    fn test_get_prefers_arguments_then_options_then_flags() {
        let input = Input::resolve(
            vec!["one".into()],
            named(&[("opt", "value".into()), ("flag", true.into())]),
            &command(),
        )
        .unwrap();

        assert!(matches!(input.get("arg"), Some(Lookup::Argument(_))));
        assert!(matches!(input.get("opt"), Some(Lookup::Option(_))));
        assert!(matches!(input.get("flag"), Some(Lookup::Flag(true))));
        assert!(input.get("nope").is_none());
    }

    #[test]
    fn test_resolution_is_idempotent_over_projections() {
        let input = Input::resolve(
            vec!["one".into(), "two".into()],
            named(&[("opt", "value".into()), ("flag", true.into())]),
            &command(),
        )
        .unwrap();

        let again = Input::resolve(
            input.positional_values(),
            input.named_values(),
            &command(),
        )
        .unwrap();

        assert_eq!(input.arguments(), again.arguments());
        assert_eq!(input.options(), again.options());
        assert_eq!(input.flags(), again.flags());
    }
}
