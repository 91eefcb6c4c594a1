//! Parameter descriptors and their synopsis projection.
//!
//! - [`Argument`] - positional parameter
//! - [`Flag`] - boolean switch
//! - [`AssocOption`] - named parameter taking a value
//! - [`NamedParameter`] - flags and options sharing one namespace
//! - [`SynopsisEntry`] - per-parameter projection for the host

mod argument;
mod flag;
mod option;
mod synopsis;

pub use argument::Argument;
pub use flag::Flag;
pub use option::AssocOption;
pub use synopsis::{ParameterKind, Synopsis, SynopsisEntry, ValueSynopsis};

/// A named (non-positional) parameter. Flags and options share one
/// name namespace on a command and keep one insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamedParameter {
    Flag(Flag),
    Option(AssocOption),
}

impl NamedParameter {
    pub fn name(&self) -> &str {
        match self {
            NamedParameter::Flag(flag) => flag.name(),
            NamedParameter::Option(option) => option.name(),
        }
    }

    /// True for a non-optional option; flags are never required.
    pub fn is_required_option(&self) -> bool {
        match self {
            NamedParameter::Flag(_) => false,
            NamedParameter::Option(option) => !option.is_optional(),
        }
    }

    pub fn synopsis(&self) -> SynopsisEntry {
        match self {
            NamedParameter::Flag(flag) => flag.synopsis(),
            NamedParameter::Option(option) => option.synopsis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_parameter_required_detection() {
        let flag = NamedParameter::Flag(Flag::new("f").unwrap());
        assert!(!flag.is_required_option());

        let optional = NamedParameter::Option(AssocOption::new("o").unwrap());
        assert!(!optional.is_required_option());

        let required = NamedParameter::Option(
            AssocOption::new("o").unwrap().with_optional(false).unwrap(),
        );
        assert!(required.is_required_option());
    }
}
