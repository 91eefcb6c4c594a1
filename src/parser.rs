//! One-line command signature parser.
//!
//! Turns a WP-CLI style signature like
//!
//! ```text
//! greet <name> [<greeting>...] [--shout] [--lang=<lang>] [--<field>=<value>]
//! ```
//!
//! into a fully validated [`Command`]. Leading plain-word tokens form
//! the (possibly multi-word) command name; every following token must
//! be a recognizable parameter form. Each token is tried as an
//! argument, then a flag, then an option, then the literal generic
//! marker, and rejected otherwise.

use std::sync::OnceLock;

use regex::Regex;

use crate::command::{Command, HandlerResult};
use crate::error::{DefinitionError, ParseError};
use crate::input::RawValue;
use crate::invoker::BoundHandler;
use crate::param::{Argument, AssocOption, Flag};

fn argument_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?:<(?P<req>[A-Za-z0-9_-]+)>(?P<req_rep>\.\.\.)?|\[<(?P<opt>[A-Za-z0-9_-]+)>(?P<opt_rep>\.\.\.)?\])$",
        )
        .unwrap()
    })
}

fn flag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\[--(?P<name>[a-z0-9_-]+)\]$").unwrap())
}

fn option_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?:--(?P<req>[a-z0-9_-]+)=<[A-Za-z0-9_-]+>|\[--(?P<opt>[a-z0-9_-]+)=<[A-Za-z0-9_-]+>\]|\[--(?P<optval>[a-z0-9_-]+)\[=<[A-Za-z0-9_-]+>\]\]|--(?P<reqval>[a-z0-9_-]+)\[=<[A-Za-z0-9_-]+>\])$",
        )
        .unwrap()
    })
}

/// Literal marker for commands that accept arbitrary extra options.
const GENERIC_TOKEN: &str = "[--<field>=<value>]";

/// Parses one-line signatures into commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureParser;

impl SignatureParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a signature into a validated command. All the command
    /// invariants apply, so e.g. `cmd [<a>] <b>` fails the same way the
    /// equivalent builder calls would.
    pub fn parse(&self, signature: &str) -> Result<Command, ParseError> {
        let mut tokens = signature.split_whitespace().peekable();
        if tokens.peek().is_none() {
            return Err(ParseError::EmptySignature);
        }

        let mut name_parts = Vec::new();
        while let Some(token) = tokens.peek() {
            if !is_name_token(token) {
                break;
            }
            name_parts.push(*token);
            tokens.next();
        }
        if name_parts.is_empty() {
            // A malformed token reports as unrecognized; a well-formed
            // parameter token means the name itself is missing.
            let first = *tokens.peek().unwrap_or(&"");
            if is_parameter_token(first) {
                return Err(ParseError::MissingName);
            }
            return Err(ParseError::UnrecognizedToken(first.to_string()));
        }

        let mut command = Command::new(&name_parts.join(" "))?;

        for token in tokens {
            self.apply_token(&mut command, token)?;
        }

        Ok(command)
    }

    fn apply_token(&self, command: &mut Command, token: &str) -> Result<(), ParseError> {
        if let Some(caps) = argument_re().captures(token) {
            let (name, repeating) = match caps.name("req") {
                Some(name) => (name.as_str(), caps.name("req_rep").is_some()),
                None => {
                    // The opt branch matched.
                    let name = caps.name("opt").map(|m| m.as_str()).unwrap_or_default();
                    (name, caps.name("opt_rep").is_some())
                }
            };
            let optional = caps.name("opt").is_some();
            command.add_argument(
                Argument::new(name)?
                    .with_optional(optional)
                    .with_repeating(repeating),
            )?;
            return Ok(());
        }

        if let Some(caps) = flag_re().captures(token) {
            command.add_flag(Flag::new(&caps["name"])?)?;
            return Ok(());
        }

        if let Some(caps) = option_re().captures(token) {
            let option = if let Some(name) = caps.name("req") {
                AssocOption::new(name.as_str())?.with_optional(false)?
            } else if let Some(name) = caps.name("opt") {
                AssocOption::new(name.as_str())?
            } else if let Some(name) = caps.name("optval") {
                AssocOption::new(name.as_str())?.with_value_optional(true)?
            } else {
                // --name[=<value>]: an option form, but required with an
                // optional value, which the option type itself rejects.
                let name = caps.name("reqval").map(|m| m.as_str()).unwrap_or_default();
                AssocOption::new(name)?
                    .with_optional(false)?
                    .with_value_optional(true)?
            };
            command.add_option(option)?;
            return Ok(());
        }

        if token == GENERIC_TOKEN {
            command.set_accept_arbitrary_options(true)?;
            return Ok(());
        }

        Err(ParseError::UnrecognizedToken(token.to_string()))
    }
}

/// Fluent configuration layer over a freshly parsed command.
///
/// The signature grammar cannot express descriptions, defaults, or
/// allowed values, so those are attached afterwards by parameter name.
/// Names may carry a leading `--`, matching how they read in the
/// signature itself.
#[derive(Debug)]
pub struct ParsedCommand {
    command: Command,
}

impl ParsedCommand {
    pub fn parse(signature: &str) -> Result<Self, ParseError> {
        Ok(Self {
            command: SignatureParser::new().parse(signature)?,
        })
    }

    pub fn new(command: Command) -> Self {
        Self { command }
    }

    /// Set the command description plus any per-parameter descriptions.
    pub fn descriptions(
        mut self,
        command_description: &str,
        parameters: impl IntoIterator<Item = (impl AsRef<str>, impl Into<String>)>,
    ) -> Result<Self, DefinitionError> {
        self.command.set_description(command_description);
        for (name, description) in parameters {
            self.command
                .set_parameter_description(strip_dashes(name.as_ref()), &description.into())?;
        }
        Ok(self)
    }

    /// Set defaults on already-declared parameters. Flags and required
    /// arguments reject defaults.
    pub fn defaults(
        mut self,
        parameters: impl IntoIterator<Item = (impl AsRef<str>, impl Into<String>)>,
    ) -> Result<Self, DefinitionError> {
        for (name, default) in parameters {
            self.command
                .set_parameter_default(strip_dashes(name.as_ref()), &default.into())?;
        }
        Ok(self)
    }

    /// Set allowed-value lists on already-declared parameters. Flags
    /// reject allowed values.
    pub fn options(
        mut self,
        parameters: impl IntoIterator<Item = (impl AsRef<str>, Vec<String>)>,
    ) -> Result<Self, DefinitionError> {
        for (name, values) in parameters {
            self.command
                .set_parameter_options(strip_dashes(name.as_ref()), values)?;
        }
        Ok(self)
    }

    pub fn usage(mut self, usage: &str) -> Self {
        self.command.set_usage(usage);
        self
    }

    pub fn when(mut self, when: &str) -> Result<Self, DefinitionError> {
        self.command.set_when(when)?;
        Ok(self)
    }

    pub fn before_invoke(mut self, callback: impl Fn() + 'static) -> Result<Self, DefinitionError> {
        self.command.set_before_invoke(callback)?;
        Ok(self)
    }

    pub fn after_invoke(mut self, callback: impl Fn() + 'static) -> Result<Self, DefinitionError> {
        self.command.set_after_invoke(callback)?;
        Ok(self)
    }

    pub fn handle_with(mut self, handler: BoundHandler) -> Result<Self, DefinitionError> {
        self.command.handle_with(handler)?;
        Ok(self)
    }

    pub fn handle_raw(
        mut self,
        handler: impl Fn(&[String], &[(String, RawValue)]) -> HandlerResult + 'static,
    ) -> Result<Self, DefinitionError> {
        self.command.handle_raw(handler)?;
        Ok(self)
    }

    pub fn into_command(self) -> Command {
        self.command
    }
}

/// Parameter keys may be written the way they appear in the signature.
fn strip_dashes(name: &str) -> &str {
    name.strip_prefix("--").unwrap_or(name)
}

/// A plain word that can open (or extend) the command name: no leading
/// `<`, `[`, or `-`, and no trailing `>`, `]`, `.`, or `}`. Both checks
/// apply to the same character for single-character tokens.
fn is_name_token(token: &str) -> bool {
    !token.starts_with(['<', '[', '-']) && !token.ends_with(['>', ']', '.', '}'])
}

/// Any of the recognized parameter token forms.
fn is_parameter_token(token: &str) -> bool {
    token == GENERIC_TOKEN
        || argument_re().is_match(token)
        || flag_re().is_match(token)
        || option_re().is_match(token)
}

// ============================================================================
// Tests
// ============================================================================
