//! Declarative CLI commands with name-based parameter binding.
//!
//! Commands are declared either with the builder API or with a one-line
//! signature:
//!
//! ```
//! use signpost::{BoundHandler, SignatureParser};
//!
//! let mut command = SignatureParser::new()
//!     .parse("greet <name> [--shout]")
//!     .unwrap();
//! command
//!     .handle_with(
//!         BoundHandler::new(|args| {
//!             let mut greeting = format!("hello {}", args.str("name").unwrap_or("world"));
//!             if args.flag("shout") {
//!                 greeting = greeting.to_uppercase();
//!             }
//!             args.output().unwrap().writeln(&greeting);
//!             Ok(0)
//!         })
//!         .param("name")
//!         .param("shout")
//!         .inject_output("out"),
//!     )
//!     .unwrap();
//! ```
//!
//! At invocation time the raw tokens are resolved against the declared
//! parameters ([`Input`]), bound by name to the handler's declared
//! parameter list ([`Invoker`]), and the handler's result is mapped to
//! a process exit status. A [`CommandRegistry`] collects commands and
//! freezes them into host registrations.

pub mod command;
pub mod error;
pub mod input;
pub mod invoker;
pub mod output;
pub mod param;
pub mod parser;
pub mod registry;
pub mod status;
pub mod support;

pub use command::{Command, Handler, HandlerResult, HookCallback, RawHandler};
pub use error::{DefinitionError, Error, ParseError, ResolutionError};
pub use input::{
    ArgumentValue, Input, Lookup, OptionValue, RawValue, ARBITRARY_OPTIONS_KEY,
};
pub use invoker::{
    BoundArgs, BoundHandler, BoundValue, HandlerParam, Invoker, NameTransform, ParamKind,
    TransformChain,
};
pub use output::{BufferedOutput, ConsoleOutput, Output, StandardOutput};
pub use param::{
    Argument, AssocOption, Flag, NamedParameter, ParameterKind, Synopsis, SynopsisEntry,
    ValueSynopsis,
};
pub use parser::{ParsedCommand, SignatureParser};
pub use registry::{
    dispatch, CliAdapter, CommandRegistration, CommandRegistry, DispatchFn, NullCliAdapter,
    RegistrationContext, RegistrationKind,
};
