//! Typed error taxonomy.
//!
//! Three failure classes, all fail-fast and never silently swallowed:
//!
//! - [`DefinitionError`] - raised while building commands or a registry.
//! - [`ParseError`] - raised by the signature parser.
//! - [`ResolutionError`] - raised per-invocation by the input resolver.
//!
//! A failed operation leaves the command/registry exactly as it was before
//! the failing call; there is no partially-inserted parameter state.

use thiserror::Error;

/// Errors raised while declaring commands and parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("invalid argument name '{0}' - must only contain letters, numbers, -, and _")]
    InvalidArgumentName(String),

    #[error("invalid flag name '{0}' - must only contain lowercase letters, numbers, -, and _")]
    InvalidFlagName(String),

    #[error("invalid option name '{0}' - must only contain lowercase letters, numbers, -, and _")]
    InvalidOptionName(String),

    #[error("required argument '{0}' cannot have a default value")]
    RequiredArgumentWithDefault(String),

    #[error("required option '{0}' cannot have an optional value")]
    RequiredOptionWithOptionalValue(String),

    #[error("cannot register parameter '{0}' - a parameter with this name already exists")]
    DuplicateParameter(String),

    #[error("cannot register additional arguments after a repeating argument")]
    ArgumentAfterRepeating,

    #[error("cannot register required argument '{0}' after an optional argument")]
    RequiredAfterOptional(String),

    #[error("command name must be a non-empty string")]
    EmptyCommandName,

    #[error("cannot modify parameters or handler of a namespace command")]
    NamespaceCommand,

    #[error("handler not set for command '{0}'")]
    HandlerNotSet(String),

    #[error("cannot set default for flag '{0}' - flags always default to false")]
    FlagDefault(String),

    #[error("cannot set allowed values for flag '{0}' - flags can only be true or false")]
    FlagAllowedValues(String),

    #[error("cannot configure unregistered parameter '{0}'")]
    UnknownParameter(String),

    #[error("cannot register command '{0}' - a command with this name already exists")]
    DuplicateCommand(String),

    #[error("cannot remove command '{name}' - no command with this name has been registered{hint}")]
    UnknownCommand { name: String, hint: String },
}

/// Errors raised while parsing a one-line command signature.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("cannot parse empty command string")]
    EmptySignature,

    #[error("command string must start with the command name")]
    MissingName,

    #[error("unrecognized token '{0}'")]
    UnrecognizedToken(String),

    /// A token parsed cleanly but violated a command invariant, e.g. a
    /// repeating argument followed by another argument.
    #[error(transparent)]
    Definition(#[from] DefinitionError),
}

/// Errors raised while resolving raw CLI input against a command's
/// declared parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("too many args provided for command '{command}'")]
    TooManyArguments { command: String },

    #[error("missing required argument '{argument}' for command '{command}'")]
    MissingRequiredArgument { argument: String, command: String },

    #[error("missing required option '{option}' for command '{command}'")]
    MissingRequiredOption { option: String, command: String },

    #[error("too many options provided for command '{command}'")]
    TooManyOptions { command: String },
}

/// Umbrella error for callers that funnel all three classes into one spot.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}
