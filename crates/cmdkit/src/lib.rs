//! Declare commands once, get argument parsing, help and dispatch.
//!
//! A command-bearing type implements [`Commands`] and lists its actions,
//! options and subcommands. [`CommandGroupDescriptor::of`] turns that
//! declaration into an immutable descriptor tree, and
//! [`CommandGroupDescriptor::resolve`] matches an argument vector against it.
//!
//! ```
//! use cmdkit::{Action, App, Commands, Group, Opt, Param, Value};
//!
//! struct Greeter;
//!
//! impl Commands for Greeter {
//!     fn declare() -> Group {
//!         Group::new()
//!             .option(Opt::flag("verbose").alias("v"))
//!             .action(
//!                 Action::new("hello")
//!                     .param(Param::new::<String>("name"))
//!                     .option(Opt::value::<String>("from").alias("f"))
//!                     .run(|cx| println!("Hello {}", cx.arg::<String>("name").unwrap_or_default())),
//!             )
//!     }
//! }
//!
//! let app = App::new::<Greeter>("greeter").unwrap();
//! let inv = app.root().resolve(&["hello", "--from=Thor", "Jonathan"]).unwrap();
//! assert_eq!(inv.positional, [Value::Str("Jonathan".into())]);
//! assert_eq!(inv.options["from"], Value::Str("Thor".into()));
//! assert_eq!(inv.options["verbose"], Value::Bool(false));
//! ```

mod action;
mod dispatch;
mod error;
mod group;
mod option;
mod param;
mod resolve;
mod rt;
mod ty;

pub mod help;

pub use crate::{
    action::{Action, ActionDescriptor},
    dispatch::{start, App, Context, Request},
    error::{BuildError, CoerceError, ResolutionError},
    group::{CommandGroupDescriptor, Commands, Group},
    option::{Opt, OptionDescriptor},
    param::{Param, ParameterDescriptor},
    resolve::{resolve, Invocation},
    ty::{FromValue, Kind, ReturnKind, TypeDescriptor, Value},
};

pub type Result<T, E = BuildError> = std::result::Result<T, E>;
