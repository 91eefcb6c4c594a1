//! Command definition: parameters, invariants, handler, and lifecycle hooks.
//!
//! A [`Command`] aggregates an ordered list of positional arguments and an
//! insertion-ordered list of flags/options sharing one name namespace. The
//! `add_*` methods re-validate the cross-parameter invariants on every call
//! and leave the command untouched when they reject.

use std::fmt;

use crate::error::DefinitionError;
use crate::input::RawValue;
use crate::invoker::BoundHandler;
use crate::param::{Argument, AssocOption, Flag, NamedParameter, Synopsis, SynopsisEntry};

/// What a handler invocation produces: an exit status, or an application
/// error that the dispatch boundary prints and maps to a failure status.
pub type HandlerResult = anyhow::Result<i32>;

/// Zero-argument lifecycle callback run by the host before/after invoke.
pub type HookCallback = Box<dyn Fn()>;

/// Legacy two-array handler convention: raw positional tokens plus raw
/// name/value pairs, exactly as the host runner delivered them.
pub type RawHandler = Box<dyn Fn(&[String], &[(String, RawValue)]) -> HandlerResult>;

/// How a command is invoked, resolved at construction time.
pub enum Handler {
    /// Name-binding invocation through the [`Invoker`](crate::Invoker).
    Bound(BoundHandler),
    /// Legacy `(args, assoc_args)` convention, bypassing binding.
    Raw(RawHandler),
    /// Namespace marker: the command exists only to group children.
    Namespace,
    /// No handler yet; surfaces as `HandlerNotSet` at registration time.
    Unset,
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Bound(handler) => f.debug_tuple("Bound").field(handler).finish(),
            Handler::Raw(_) => f.write_str("Raw(..)"),
            Handler::Namespace => f.write_str("Namespace"),
            Handler::Unset => f.write_str("Unset"),
        }
    }
}

/// One invocable unit: name, parameters, handler, and host metadata.
pub struct Command {
    name: String,
    prefix: Option<String>,
    description: Option<String>,
    usage: Option<String>,
    when: Option<String>,
    accept_arbitrary_options: bool,
    arguments: Vec<Argument>,
    options: Vec<NamedParameter>,
    handler: Handler,
    before_invoke: Option<HookCallback>,
    after_invoke: Option<HookCallback>,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.full_name())
            .field("arguments", &self.arguments)
            .field("options", &self.options)
            .field("accept_arbitrary_options", &self.accept_arbitrary_options)
            .field("handler", &self.handler)
            .finish_non_exhaustive()
    }
}

impl Command {
    /// Create an empty command. The name must be non-empty; it may
    /// contain spaces when it was produced from a multi-word signature.
    pub fn new(name: &str) -> Result<Self, DefinitionError> {
        if name.is_empty() {
            return Err(DefinitionError::EmptyCommandName);
        }
        Ok(Self {
            name: name.to_string(),
            prefix: None,
            description: None,
            usage: None,
            when: None,
            accept_arbitrary_options: false,
            arguments: Vec::new(),
            options: Vec::new(),
            handler: Handler::Unset,
            before_invoke: None,
            after_invoke: None,
        })
    }

    /// Create a namespace command: a grouping node that takes no
    /// parameters and no handler of its own.
    pub fn new_namespace(name: &str, description: &str) -> Result<Self, DefinitionError> {
        let mut command = Self::new(name)?;
        command.description = Some(description.to_string());
        command.handler = Handler::Namespace;
        Ok(command)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Space-joined full name, composed with the registration prefix.
    pub fn full_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix} {}", self.name),
            None => self.name.clone(),
        }
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub(crate) fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = Some(prefix.into());
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn usage(&self) -> Option<&str> {
        self.usage.as_deref()
    }

    pub fn when(&self) -> Option<&str> {
        self.when.as_deref()
    }

    pub fn accepts_arbitrary_options(&self) -> bool {
        self.accept_arbitrary_options
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn options(&self) -> &[NamedParameter] {
        &self.options
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    pub fn is_namespace(&self) -> bool {
        matches!(self.handler, Handler::Namespace)
    }

    pub fn before_invoke(&self) -> Option<&HookCallback> {
        self.before_invoke.as_ref()
    }

    pub fn after_invoke(&self) -> Option<&HookCallback> {
        self.after_invoke.as_ref()
    }

    pub(crate) fn take_hooks(&mut self) -> (Option<HookCallback>, Option<HookCallback>) {
        (self.before_invoke.take(), self.after_invoke.take())
    }

    /// Append a positional argument, re-validating the ordering
    /// invariants against the already-registered set.
    pub fn add_argument(&mut self, argument: Argument) -> Result<&mut Self, DefinitionError> {
        self.guard_namespace()?;

        let name = argument.name().to_string();
        if self.has_parameter(&name) {
            return Err(DefinitionError::DuplicateParameter(name));
        }

        if let Some(last) = self.arguments.last() {
            if last.is_repeating() {
                return Err(DefinitionError::ArgumentAfterRepeating);
            }
            if last.is_optional() && !argument.is_optional() {
                return Err(DefinitionError::RequiredAfterOptional(name));
            }
        }

        argument.validate()?;

        self.arguments.push(argument);
        Ok(self)
    }

    pub fn add_flag(&mut self, flag: Flag) -> Result<&mut Self, DefinitionError> {
        self.guard_namespace()?;

        let name = flag.name().to_string();
        if self.has_parameter(&name) {
            return Err(DefinitionError::DuplicateParameter(name));
        }

        self.options.push(NamedParameter::Flag(flag));
        Ok(self)
    }

    pub fn add_option(&mut self, option: AssocOption) -> Result<&mut Self, DefinitionError> {
        self.guard_namespace()?;

        let name = option.name().to_string();
        if self.has_parameter(&name) {
            return Err(DefinitionError::DuplicateParameter(name));
        }

        self.options.push(NamedParameter::Option(option));
        Ok(self)
    }

    /// Accept extra name/value pairs beyond the declared flags/options,
    /// bundled into the arbitrary-options bucket at resolution time.
    pub fn set_accept_arbitrary_options(&mut self, accept: bool) -> Result<&mut Self, DefinitionError> {
        self.guard_namespace()?;
        self.accept_arbitrary_options = accept;
        Ok(self)
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    pub fn set_usage(&mut self, usage: impl Into<String>) -> &mut Self {
        self.usage = Some(usage.into());
        self
    }

    /// Lifecycle-timing tag consumed by the host runner.
    pub fn set_when(&mut self, when: impl Into<String>) -> Result<&mut Self, DefinitionError> {
        self.guard_namespace()?;
        self.when = Some(when.into());
        Ok(self)
    }

    pub fn set_handler(&mut self, handler: Handler) -> Result<&mut Self, DefinitionError> {
        self.guard_namespace()?;
        self.handler = handler;
        Ok(self)
    }

    /// Attach a name-binding handler.
    pub fn handle_with(&mut self, handler: BoundHandler) -> Result<&mut Self, DefinitionError> {
        self.set_handler(Handler::Bound(handler))
    }

    /// Attach a legacy two-array handler.
    pub fn handle_raw(
        &mut self,
        handler: impl Fn(&[String], &[(String, RawValue)]) -> HandlerResult + 'static,
    ) -> Result<&mut Self, DefinitionError> {
        self.set_handler(Handler::Raw(Box::new(handler)))
    }

    pub fn set_before_invoke(&mut self, callback: impl Fn() + 'static) -> Result<&mut Self, DefinitionError> {
        self.guard_namespace()?;
        self.before_invoke = Some(Box::new(callback));
        Ok(self)
    }

    pub fn set_after_invoke(&mut self, callback: impl Fn() + 'static) -> Result<&mut Self, DefinitionError> {
        self.guard_namespace()?;
        self.after_invoke = Some(Box::new(callback));
        Ok(self)
    }

    /// Set the default of an already-registered argument or option.
    /// Flags reject defaults; required arguments reject defaults.
    pub fn set_parameter_default(&mut self, name: &str, default: &str) -> Result<(), DefinitionError> {
        if let Some(argument) = self.arguments.iter_mut().find(|a| a.name() == name) {
            return argument.set_default(default);
        }
        match self.options.iter_mut().find(|p| p.name() == name) {
            Some(NamedParameter::Option(option)) => {
                option.set_default(default);
                Ok(())
            }
            Some(NamedParameter::Flag(_)) => Err(DefinitionError::FlagDefault(name.to_string())),
            None => Err(DefinitionError::UnknownParameter(name.to_string())),
        }
    }

    /// Set the description of an already-registered parameter.
    pub fn set_parameter_description(&mut self, name: &str, description: &str) -> Result<(), DefinitionError> {
        if let Some(argument) = self.arguments.iter_mut().find(|a| a.name() == name) {
            argument.set_description(description);
            return Ok(());
        }
        match self.options.iter_mut().find(|p| p.name() == name) {
            Some(NamedParameter::Option(option)) => {
                option.set_description(description);
                Ok(())
            }
            Some(NamedParameter::Flag(flag)) => {
                flag.set_description(description);
                Ok(())
            }
            None => Err(DefinitionError::UnknownParameter(name.to_string())),
        }
    }

    /// Set the allowed-values list of an already-registered argument or
    /// option. Flags reject allowed values.
    pub fn set_parameter_options(&mut self, name: &str, values: Vec<String>) -> Result<(), DefinitionError> {
        if let Some(argument) = self.arguments.iter_mut().find(|a| a.name() == name) {
            argument.set_options(values);
            return Ok(());
        }
        match self.options.iter_mut().find(|p| p.name() == name) {
            Some(NamedParameter::Option(option)) => {
                option.set_options(values);
                Ok(())
            }
            Some(NamedParameter::Flag(_)) => {
                Err(DefinitionError::FlagAllowedValues(name.to_string()))
            }
            None => Err(DefinitionError::UnknownParameter(name.to_string())),
        }
    }

    /// Ordered synopsis: arguments, then flags/options, then the
    /// trailing generic entry when arbitrary options are accepted.
    pub fn synopsis(&self) -> Result<Synopsis, DefinitionError> {
        let mut synopsis = Vec::with_capacity(self.arguments.len() + self.options.len() + 1);

        for argument in &self.arguments {
            synopsis.push(argument.synopsis()?);
        }
        for parameter in &self.options {
            synopsis.push(parameter.synopsis());
        }
        if self.accept_arbitrary_options {
            synopsis.push(SynopsisEntry::generic());
        }

        Ok(synopsis)
    }

    fn has_parameter(&self, name: &str) -> bool {
        self.arguments.iter().any(|a| a.name() == name)
            || self.options.iter().any(|p| p.name() == name)
    }

    fn guard_namespace(&self) -> Result<(), DefinitionError> {
        if self.is_namespace() {
            return Err(DefinitionError::NamespaceCommand);
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
