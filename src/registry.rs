//! Command registry and host registration.
//!
//! A [`CommandRegistry`] collects commands (optionally under nested
//! group prefixes), then freezes into per-command
//! [`CommandRegistration`]s for a [`CliAdapter`]. Each registration
//! carries a dispatch closure that resolves raw input, invokes the
//! handler, and maps the outcome to a process exit status.

use std::fmt;

use strsim::levenshtein;

use crate::command::{Command, Handler, HookCallback};
use crate::error::DefinitionError;
use crate::input::{Input, RawValue};
use crate::invoker::{Invoker, TransformChain};
use crate::output::{ConsoleOutput, StandardOutput};
use crate::param::Synopsis;
use crate::status;

/// Dispatch entry point handed to the host: raw positional tokens and
/// raw name/value pairs in, process exit status out.
pub type DispatchFn = Box<dyn Fn(Vec<String>, Vec<(String, RawValue)>) -> i32>;

/// What the host should do when the command is invoked.
pub enum RegistrationKind {
    Handler(DispatchFn),
    /// Grouping node; the host renders its subcommand help instead.
    Namespace,
}

/// One frozen command, ready to hand to the host runner.
pub struct CommandRegistration {
    pub name: String,
    pub kind: RegistrationKind,
    pub synopsis: Synopsis,
    pub shortdesc: Option<String>,
    pub longdesc: Option<String>,
    pub when: Option<String>,
    pub before_invoke: Option<HookCallback>,
    pub after_invoke: Option<HookCallback>,
}

impl fmt::Debug for RegistrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationKind::Handler(_) => f.write_str("Handler(..)"),
            RegistrationKind::Namespace => f.write_str("Namespace"),
        }
    }
}

impl fmt::Debug for CommandRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistration")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("synopsis", &self.synopsis)
            .field("shortdesc", &self.shortdesc)
            .field("when", &self.when)
            .finish_non_exhaustive()
    }
}

/// Host-side registration seam.
pub trait CliAdapter {
    fn add_command(&mut self, registration: CommandRegistration);
}

/// Adapter that drops every registration. Useful when command
/// definitions must load in contexts where no runner is present.
#[derive(Debug, Default)]
pub struct NullCliAdapter;

impl CliAdapter for NullCliAdapter {
    fn add_command(&mut self, _registration: CommandRegistration) {}
}

/// Orders commands for registration and owns the registry-wide
/// dispatch configuration.
pub struct CommandRegistry {
    commands: Vec<(String, Command)>,
    allow_childless_groups: bool,
    chain: TransformChain,
    bucket_key: String,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            allow_childless_groups: false,
            chain: TransformChain::default(),
            bucket_key: crate::input::ARBITRARY_OPTIONS_KEY.to_string(),
        }
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep group namespaces registered even when the group closure
    /// added no commands.
    pub fn set_allow_childless_groups(&mut self, allow: bool) -> &mut Self {
        self.allow_childless_groups = allow;
        self
    }

    /// Bucket name for arbitrary extra options at dispatch time.
    pub fn set_bucket_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.bucket_key = key.into();
        self
    }

    pub fn set_transform_chain(&mut self, chain: TransformChain) -> &mut Self {
        self.chain = chain;
        self
    }

    /// Register a command at the top level.
    pub fn add(&mut self, command: Command) -> Result<(), DefinitionError> {
        self.add_with_prefix(command, None)
    }

    /// Register a namespace (a grouping node with no handler).
    pub fn namespace(&mut self, name: &str, description: &str) -> Result<(), DefinitionError> {
        self.add(Command::new_namespace(name, description)?)
    }

    /// Register a group: a namespace plus any commands the closure adds
    /// under its prefix. A group whose closure adds nothing is removed
    /// again unless childless groups are allowed.
    pub fn group(
        &mut self,
        name: &str,
        description: &str,
        f: impl FnOnce(&mut RegistrationContext<'_>) -> Result<(), DefinitionError>,
    ) -> Result<(), DefinitionError> {
        self.group_with_prefix(name, description, None, f)
    }

    /// Deregister a command by full name. Suggests the closest
    /// registered name when the lookup misses.
    pub fn remove(&mut self, name: &str) -> Result<Command, DefinitionError> {
        match self.commands.iter().position(|(n, _)| n == name) {
            Some(i) => Ok(self.commands.remove(i).1),
            None => Err(DefinitionError::UnknownCommand {
                name: name.to_string(),
                hint: self.suggestion_for(name),
            }),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.iter().any(|(n, _)| n == name)
    }

    pub fn command_names(&self) -> Vec<&str> {
        self.commands.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Freeze into registrations, in registration order. Fails when any
    /// non-namespace command still has no handler.
    pub fn into_registrations(self) -> Result<Vec<CommandRegistration>, DefinitionError> {
        let bucket_key = self.bucket_key;
        let invoker = Invoker::with_chain(self.chain);

        self.commands
            .into_iter()
            .map(|(name, mut command)| {
                let synopsis = command.synopsis()?;
                let shortdesc = command.description().map(str::to_string);
                let longdesc = command.usage().map(str::to_string);
                let when = command.when().map(str::to_string);
                let (before_invoke, after_invoke) = command.take_hooks();

                let kind = if command.is_namespace() {
                    RegistrationKind::Namespace
                } else {
                    if matches!(command.handler(), Handler::Unset) {
                        return Err(DefinitionError::HandlerNotSet(name));
                    }
                    let invoker = invoker.clone();
                    let bucket_key = bucket_key.clone();
                    RegistrationKind::Handler(Box::new(move |args, named| {
                        let output = StandardOutput::new();
                        dispatch(&command, &invoker, &bucket_key, args, named, &output)
                    }))
                };

                Ok(CommandRegistration {
                    name,
                    kind,
                    synopsis,
                    shortdesc,
                    longdesc,
                    when,
                    before_invoke,
                    after_invoke,
                })
            })
            .collect()
    }

    /// Freeze and hand every registration to the adapter.
    pub fn initialize(self, adapter: &mut dyn CliAdapter) -> Result<(), DefinitionError> {
        for registration in self.into_registrations()? {
            adapter.add_command(registration);
        }
        Ok(())
    }

    fn add_with_prefix(
        &mut self,
        mut command: Command,
        prefix: Option<&str>,
    ) -> Result<(), DefinitionError> {
        if let Some(prefix) = prefix {
            command.set_prefix(prefix);
        }
        let full_name = command.full_name();
        if self.contains(&full_name) {
            return Err(DefinitionError::DuplicateCommand(full_name));
        }
        self.commands.push((full_name, command));
        Ok(())
    }

    fn group_with_prefix(
        &mut self,
        name: &str,
        description: &str,
        prefix: Option<&str>,
        f: impl FnOnce(&mut RegistrationContext<'_>) -> Result<(), DefinitionError>,
    ) -> Result<(), DefinitionError> {
        self.add_with_prefix(Command::new_namespace(name, description)?, prefix)?;

        let group_name = match prefix {
            Some(prefix) => format!("{prefix} {name}"),
            None => name.to_string(),
        };

        let mut context = RegistrationContext {
            registry: self,
            prefix: group_name.clone(),
        };
        f(&mut context)?;

        let child_prefix = format!("{group_name} ");
        let has_children = self
            .commands
            .iter()
            .any(|(n, _)| n.starts_with(&child_prefix));
        if !has_children && !self.allow_childless_groups {
            self.commands.retain(|(n, _)| n != &group_name);
        }

        Ok(())
    }

    fn suggestion_for(&self, name: &str) -> String {
        self.commands
            .iter()
            .map(|(n, _)| (n, levenshtein(name, n)))
            .filter(|(_, d)| *d <= 2)
            .min_by_key(|(_, d)| *d)
            .map(|(n, _)| format!(" (did you mean '{n}'?)"))
            .unwrap_or_default()
    }
}

/// Registration scope inside a group closure, carrying the group's
/// prefix. Nested groups extend the prefix.
pub struct RegistrationContext<'r> {
    registry: &'r mut CommandRegistry,
    prefix: String,
}

impl RegistrationContext<'_> {
    pub fn add(&mut self, command: Command) -> Result<(), DefinitionError> {
        self.registry.add_with_prefix(command, Some(&self.prefix))
    }

    pub fn namespace(&mut self, name: &str, description: &str) -> Result<(), DefinitionError> {
        self.add(Command::new_namespace(name, description)?)
    }

    pub fn group(
        &mut self,
        name: &str,
        description: &str,
        f: impl FnOnce(&mut RegistrationContext<'_>) -> Result<(), DefinitionError>,
    ) -> Result<(), DefinitionError> {
        let prefix = self.prefix.clone();
        self.registry
            .group_with_prefix(name, description, Some(&prefix), f)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

/// Resolve raw input against a command and run its handler.
///
/// Resolution failures report to the error stream and exit with the
/// invalid-usage status. Handler errors report and exit with the
/// failure status. Successful exit statuses are clamped to 0..=255.
pub fn dispatch(
    command: &Command,
    invoker: &Invoker,
    bucket_key: &str,
    args: Vec<String>,
    named: Vec<(String, RawValue)>,
    output: &dyn ConsoleOutput,
) -> i32 {
    let input = match Input::resolve_with_bucket(args, named, command, bucket_key) {
        Ok(input) => input,
        Err(err) => {
            output.error(&err.to_string());
            return status::INVALID;
        }
    };

    let result = match command.handler() {
        Handler::Bound(handler) => invoker.invoke(handler, command, &input, output),
        Handler::Raw(handler) => handler(input.raw_positional(), input.raw_named()),
        Handler::Namespace | Handler::Unset => return status::INVALID,
    };

    match result {
        Ok(code) => status::clamp(code),
        Err(err) => {
            output.error(&format!("{err:#}"));
            status::FAILURE
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
