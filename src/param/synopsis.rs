//! Synopsis projection consumed by the host help/registration system.
//!
//! One entry per declared parameter, in registration order: arguments
//! first in declared order, then flags and options in declared order,
//! then a trailing nameless `generic` entry when the command accepts
//! arbitrary options. Serializes to the WP-CLI-shaped synopsis array;
//! absent fields are omitted from the output.

use serde::Serialize;

/// Ordered synopsis for a whole command.
pub type Synopsis = Vec<SynopsisEntry>;

/// Parameter category as seen by the host runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    Positional,
    Flag,
    Assoc,
    Generic,
}

/// Value descriptor for an option whose value may be omitted
/// (`--opt` vs `--opt=val`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueSynopsis {
    pub optional: bool,
    pub name: String,
}

/// One declared parameter, projected for the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynopsisEntry {
    #[serde(rename = "type")]
    pub kind: ParameterKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub optional: bool,

    pub repeating: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Enumerated allowed values, advisory only.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<ValueSynopsis>,
}

impl SynopsisEntry {
    pub(crate) fn new(kind: ParameterKind, name: &str, optional: bool, repeating: bool) -> Self {
        Self {
            kind,
            name: Some(name.to_string()),
            optional,
            repeating,
            description: None,
            default: None,
            options: Vec::new(),
            value: None,
        }
    }

    /// The trailing entry appended when a command accepts arbitrary
    /// options. Nameless by contract.
    pub(crate) fn generic() -> Self {
        Self {
            kind: ParameterKind::Generic,
            name: None,
            optional: true,
            repeating: false,
            description: None,
            default: None,
            options: Vec::new(),
            value: None,
        }
    }
}
