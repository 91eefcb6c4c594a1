//! Name-based parameter binding.
//!
//! A [`BoundHandler`] declares the parameter names it wants; the
//! [`Invoker`] fills them from resolved [`Input`] by trying each name
//! through a chain of case transforms until one matches a resolved
//! bucket. Handlers written in camelCase bind against kebab-case CLI
//! parameters without either side knowing about the other.

use std::fmt;

use crate::command::{Command, HandlerResult};
use crate::input::{ArgumentValue, Input, Lookup, OptionValue, RawValue};
use crate::output::ConsoleOutput;
use crate::support;

/// A single name transform in the lookup chain.
pub type NameTransform = fn(&str) -> String;

/// Ordered list of case transforms tried when binding a parameter
/// name against resolved input.
#[derive(Clone)]
pub struct TransformChain {
    transforms: Vec<NameTransform>,
}

impl Default for TransformChain {
    /// Identity first, then kebab, snake, camel, and Pascal case.
    fn default() -> Self {
        Self {
            transforms: vec![
                support::identity,
                support::kebab_case,
                support::snake_case,
                support::camel_case,
                support::pascal_case,
            ],
        }
    }
}

impl TransformChain {
    pub fn new(transforms: Vec<NameTransform>) -> Self {
        Self { transforms }
    }

    /// Candidate spellings of `name`, in chain order, deduplicated.
    pub fn candidates(&self, name: &str) -> Vec<String> {
        let mut candidates: Vec<String> = Vec::with_capacity(self.transforms.len());
        for transform in &self.transforms {
            let candidate = transform(name);
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
        candidates
    }
}

impl fmt::Debug for TransformChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformChain")
            .field("len", &self.transforms.len())
            .finish()
    }
}

/// How a declared handler parameter is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Bound by name against resolved input.
    Value,
    /// Injected: the command being invoked.
    Command,
    /// Injected: the resolved input.
    Input,
    /// Injected: the console output sink.
    Output,
}

/// One declared handler parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerParam {
    pub name: String,
    pub kind: ParamKind,
}

/// A handler with an explicit parameter list, invoked through the
/// binding engine.
pub struct BoundHandler {
    params: Vec<HandlerParam>,
    callback: Box<dyn Fn(BoundArgs<'_>) -> HandlerResult>,
}

impl fmt::Debug for BoundHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundHandler")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl BoundHandler {
    pub fn new(callback: impl Fn(BoundArgs<'_>) -> HandlerResult + 'static) -> Self {
        Self {
            params: Vec::new(),
            callback: Box::new(callback),
        }
    }

    /// Declare a value parameter, bound by name.
    pub fn param(mut self, name: &str) -> Self {
        self.params.push(HandlerParam {
            name: name.to_string(),
            kind: ParamKind::Value,
        });
        self
    }

    pub fn inject_command(mut self, name: &str) -> Self {
        self.params.push(HandlerParam {
            name: name.to_string(),
            kind: ParamKind::Command,
        });
        self
    }

    pub fn inject_input(mut self, name: &str) -> Self {
        self.params.push(HandlerParam {
            name: name.to_string(),
            kind: ParamKind::Input,
        });
        self
    }

    pub fn inject_output(mut self, name: &str) -> Self {
        self.params.push(HandlerParam {
            name: name.to_string(),
            kind: ParamKind::Output,
        });
        self
    }

    pub fn params(&self) -> &[HandlerParam] {
        &self.params
    }
}

/// The value bound to one handler parameter.
pub enum BoundValue<'a> {
    Argument(&'a ArgumentValue),
    Option(&'a OptionValue),
    Flag(bool),
    /// Reserved name `args`: flattened positional tokens.
    Positional(Vec<String>),
    /// Reserved name `assocArgs`: merged raw-shaped name/value pairs.
    Named(Vec<(String, RawValue)>),
    /// Reserved name `arguments`: the resolved argument bucket.
    Arguments(&'a [(String, ArgumentValue)]),
    /// Reserved name `options`: the resolved option bucket.
    Options(&'a [(String, OptionValue)]),
    /// Reserved name `flags`: the resolved flag bucket.
    Flags(&'a [(String, bool)]),
    Command(&'a Command),
    Input(&'a Input),
    Output(&'a dyn ConsoleOutput),
    /// No bucket matched any candidate spelling.
    Unbound,
}

impl fmt::Debug for BoundValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundValue::Argument(v) => f.debug_tuple("Argument").field(v).finish(),
            BoundValue::Option(v) => f.debug_tuple("Option").field(v).finish(),
            BoundValue::Flag(v) => f.debug_tuple("Flag").field(v).finish(),
            BoundValue::Positional(v) => f.debug_tuple("Positional").field(v).finish(),
            BoundValue::Named(v) => f.debug_tuple("Named").field(v).finish(),
            BoundValue::Arguments(v) => f.debug_tuple("Arguments").field(v).finish(),
            BoundValue::Options(v) => f.debug_tuple("Options").field(v).finish(),
            BoundValue::Flags(v) => f.debug_tuple("Flags").field(v).finish(),
            BoundValue::Command(c) => f.debug_tuple("Command").field(&c.full_name()).finish(),
            BoundValue::Input(_) => f.write_str("Input(..)"),
            BoundValue::Output(_) => f.write_str("Output(..)"),
            BoundValue::Unbound => f.write_str("Unbound"),
        }
    }
}

/// The bound values for one invocation, keyed by the handler's own
/// parameter names (not the transformed spellings that matched).
pub struct BoundArgs<'a> {
    values: Vec<(String, BoundValue<'a>)>,
}

impl<'a> BoundArgs<'a> {
    pub fn get(&self, name: &str) -> Option<&BoundValue<'a>> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// String value of an argument or option parameter.
    pub fn str(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            BoundValue::Argument(ArgumentValue::Single(v)) => Some(v),
            BoundValue::Option(OptionValue::Str(v)) => Some(v),
            _ => None,
        }
    }

    /// Boolean value of a flag (or bare optional-value option).
    /// Unbound and non-boolean parameters read as false.
    pub fn flag(&self, name: &str) -> bool {
        match self.get(name) {
            Some(BoundValue::Flag(v)) => *v,
            Some(BoundValue::Option(OptionValue::Bool(v))) => *v,
            _ => false,
        }
    }

    /// Values of a repeating argument (a single argument yields one).
    pub fn list(&self, name: &str) -> Vec<&str> {
        match self.get(name) {
            Some(BoundValue::Argument(value)) => value.values(),
            Some(BoundValue::Positional(values)) => values.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Name/value pairs of a map-shaped parameter (the arbitrary-options
    /// bucket, or the reserved `assocArgs` projection).
    pub fn map(&self, name: &str) -> &[(String, RawValue)] {
        match self.get(name) {
            Some(BoundValue::Option(OptionValue::Map(pairs))) => pairs,
            Some(BoundValue::Named(pairs)) => pairs,
            _ => &[],
        }
    }

    pub fn command(&self) -> Option<&'a Command> {
        self.values.iter().find_map(|(_, v)| match v {
            BoundValue::Command(command) => Some(*command),
            _ => None,
        })
    }

    pub fn input(&self) -> Option<&'a Input> {
        self.values.iter().find_map(|(_, v)| match v {
            BoundValue::Input(input) => Some(*input),
            _ => None,
        })
    }

    pub fn output(&self) -> Option<&'a dyn ConsoleOutput> {
        self.values.iter().find_map(|(_, v)| match v {
            BoundValue::Output(output) => Some(*output),
            _ => None,
        })
    }
}

/// Binds declared handler parameters to resolved input and invokes.
#[derive(Debug, Clone, Default)]
pub struct Invoker {
    chain: TransformChain,
}

impl Invoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chain(chain: TransformChain) -> Self {
        Self { chain }
    }

    /// Bind every declared parameter. Binding order per parameter:
    ///
    /// 1. typed injections (command, input, output)
    /// 2. reserved names (`args`, `arguments`, `assocArgs`, `options`,
    ///    `flags`, `command`, `input`, `output`)
    /// 3. the transform chain against resolved buckets
    /// 4. [`BoundValue::Unbound`]
    pub fn bind<'a>(
        &self,
        params: &[HandlerParam],
        command: &'a Command,
        input: &'a Input,
        output: &'a dyn ConsoleOutput,
    ) -> BoundArgs<'a> {
        let values = params
            .iter()
            .map(|param| {
                let value = match param.kind {
                    ParamKind::Command => BoundValue::Command(command),
                    ParamKind::Input => BoundValue::Input(input),
                    ParamKind::Output => BoundValue::Output(output),
                    ParamKind::Value => self.bind_value(&param.name, command, input, output),
                };
                (param.name.clone(), value)
            })
            .collect();
        BoundArgs { values }
    }

    /// Bind and run a handler in one step.
    pub fn invoke(
        &self,
        handler: &BoundHandler,
        command: &Command,
        input: &Input,
        output: &dyn ConsoleOutput,
    ) -> HandlerResult {
        let args = self.bind(&handler.params, command, input, output);
        (handler.callback)(args)
    }

    fn bind_value<'a>(
        &self,
        name: &str,
        command: &'a Command,
        input: &'a Input,
        output: &'a dyn ConsoleOutput,
    ) -> BoundValue<'a> {
        match name {
            "args" => return BoundValue::Positional(input.positional_values()),
            "assocArgs" => return BoundValue::Named(input.named_values()),
            "arguments" => return BoundValue::Arguments(input.arguments()),
            "options" => return BoundValue::Options(input.options()),
            "flags" => return BoundValue::Flags(input.flags()),
            "command" => return BoundValue::Command(command),
            "input" => return BoundValue::Input(input),
            "output" => return BoundValue::Output(output),
            _ => {}
        }

        for candidate in self.chain.candidates(name) {
            match input.get(&candidate) {
                Some(Lookup::Argument(value)) => return BoundValue::Argument(value),
                Some(Lookup::Option(value)) => return BoundValue::Option(value),
                Some(Lookup::Flag(value)) => return BoundValue::Flag(value),
                None => {}
            }
        }

        BoundValue::Unbound
    }
}

// ============================================================================
// Tests
// ============================================================================
