//! Invoking resolved actions and turning the outcome into an exit status.

use std::{collections::BTreeMap, env, path::Path};

use log::{debug, trace};

use crate::{
    action::Handler,
    error::{BuildError, ResolutionError},
    group::{CommandGroupDescriptor, Commands},
    help,
    option::fold,
    resolve::Invocation,
    rt::split_flag,
    ty::{FromValue, Value},
};

/// Values handed to an action's handler.
#[derive(Debug, Clone)]
pub struct Context {
    action: String,
    path: Vec<String>,
    args: Vec<(String, Value)>,
    options: BTreeMap<String, Value>,
}

impl Context {
    pub fn new(invocation: &Invocation<'_>) -> Context {
        let args = invocation
            .action
            .parameters()
            .iter()
            .zip(&invocation.positional)
            .map(|(param, value)| (param.name().to_string(), value.clone()))
            .collect();
        Context {
            action: invocation.action.name().to_string(),
            path: invocation.path.iter().map(|it| it.to_string()).collect(),
            args,
            options: invocation.options.clone(),
        }
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// The positional value bound to parameter `name`.
    pub fn arg<T: FromValue>(&self, name: &str) -> Option<T> {
        let key = fold(name);
        self.args.iter().find(|(it, _)| fold(it) == key).and_then(|(_, value)| T::from_value(value))
    }

    pub fn args(&self) -> impl Iterator<Item = &Value> + '_ {
        self.args.iter().map(|(_, value)| value)
    }

    /// Whether the flag `name` was given.
    pub fn flag(&self, name: &str) -> bool {
        self.option::<bool>(name).unwrap_or(false)
    }

    /// The value of option `name`, or its declared default. `None` when neither
    /// exists.
    pub fn option<T: FromValue>(&self, name: &str) -> Option<T> {
        self.value(name).and_then(T::from_value)
    }

    /// Like [`Context::option`], computing `default` only if the option is unset.
    pub fn option_or_else<T: FromValue>(&self, name: &str, default: impl FnOnce() -> T) -> T {
        self.option(name).unwrap_or_else(default)
    }

    fn value(&self, name: &str) -> Option<&Value> {
        let key = fold(name);
        self.options.iter().find(|(it, _)| fold(it) == key).map(|(_, value)| value)
    }
}

/// What a command line asks the dispatcher to do.
#[derive(Debug)]
pub enum Request<'a> {
    Help(String),
    Invoke(Invocation<'a>),
}

/// A built command tree plus the program name shown in help.
#[derive(Debug)]
pub struct App {
    name: String,
    root: CommandGroupDescriptor,
}

impl App {
    pub fn new<T: Commands>(name: impl Into<String>) -> Result<App, BuildError> {
        let root = CommandGroupDescriptor::of::<T>()?;
        Ok(App::from_descriptor(name, root))
    }

    pub fn from_descriptor(name: impl Into<String>, root: CommandGroupDescriptor) -> App {
        App { name: name.into(), root }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &CommandGroupDescriptor {
        &self.root
    }

    /// Resolves `args`, answering `help`, `--help` and `-h` with rendered help.
    pub fn request<S: AsRef<str>>(&self, args: &[S]) -> Result<Request<'_>, ResolutionError> {
        let args = args.iter().map(|it| it.as_ref()).collect::<Vec<_>>();
        if let Some(target) = help_target(&self.root, &args) {
            return Ok(Request::Help(help::render_path(&self.name, &self.root, &target)));
        }
        self.root.resolve(&args).map(Request::Invoke)
    }

    /// Calls the handler of `invocation`. `None` if the action has no handler.
    pub async fn invoke(&self, invocation: &Invocation<'_>) -> Option<i32> {
        let cx = Context::new(invocation);
        trace!("invoking `{}` ({:?})", cx.action(), invocation.action.return_kind());
        let code = match invocation.action.handler()? {
            Handler::Void(f) => {
                f(&cx);
                0
            }
            Handler::ExitCode(f) => f(&cx),
            Handler::Async(f) => {
                f(cx).await;
                0
            }
        };
        Some(code)
    }

    /// Runs the command line to completion and returns the exit status.
    ///
    /// Help goes to stdout and exits with 0. Resolution errors go to stderr and
    /// exit with 2.
    pub async fn run_async<S: AsRef<str>>(&self, args: &[S]) -> i32 {
        let invocation = match self.request(args) {
            Ok(Request::Help(text)) => {
                print!("{text}");
                return 0;
            }
            Ok(Request::Invoke(it)) => it,
            Err(err) => {
                eprintln!("{err}");
                if !err.available().is_empty() {
                    eprintln!("Available commands: {}", err.available().join(", "));
                }
                return 2;
            }
        };
        match self.invoke(&invocation).await {
            Some(code) => {
                debug!("`{}` exited with {code}", invocation.action.name());
                code
            }
            None => {
                eprintln!("No handler registered for `{}`", invocation.action.name());
                1
            }
        }
    }

    /// Blocking version of [`App::run_async`].
    pub fn run<S: AsRef<str>>(&self, args: &[S]) -> i32 {
        futures::executor::block_on(self.run_async(args))
    }

    /// Runs with the process arguments, program name stripped.
    pub fn run_from_env(&self) -> i32 {
        let mut args = Vec::new();
        for arg in env::args_os().skip(1) {
            match arg.into_string() {
                Ok(it) => args.push(it),
                Err(it) => {
                    eprintln!("Invalid utf8 argument: {it:?}");
                    return 2;
                }
            }
        }
        self.run(&args)
    }
}

/// Builds the command tree of `T` and runs it with the process arguments.
///
/// Declaration errors are reported on stderr with exit status 1.
pub fn start<T: Commands>() -> i32 {
    let name = env::args_os()
        .next()
        .as_deref()
        .and_then(|it| Path::new(it).file_stem())
        .map(|it| it.to_string_lossy().into_owned())
        .unwrap_or_default();
    match App::new::<T>(name) {
        Ok(app) => app.run_from_env(),
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

/// The tokens naming what help was asked for, if any.
///
/// `help` is accepted where a command name is expected. `--help` and `-h` are
/// accepted before `--`, except as the value of a value option.
fn help_target<'a>(root: &CommandGroupDescriptor, args: &[&'a str]) -> Option<Vec<&'a str>> {
    let mut group = root;
    let mut depth = 0;
    while let Some(token) = args.get(depth) {
        if group.action(token).is_some() {
            break;
        }
        let Some((_, sub)) = group.subgroup_entry(token) else { break };
        group = sub;
        depth += 1;
    }
    let (path, rest) = args.split_at(depth);

    if let Some((first, tail)) = rest.split_first() {
        if first.eq_ignore_ascii_case("help") {
            return Some(path.iter().chain(tail).copied().collect());
        }
        if let Some(action) = group.action(first) {
            let mut tokens = tail.iter();
            while let Some(&token) = tokens.next() {
                if token == "--" {
                    break;
                }
                if is_help_flag(token) {
                    return Some(path.iter().chain([first]).copied().collect());
                }
                if token.starts_with('-') {
                    let (key, attached) = split_flag(token);
                    if attached.is_none() && action.option(key).is_some_and(|it| !it.is_flag()) {
                        tokens.next();
                    }
                }
            }
            return None;
        }
    }

    rest.iter().take_while(|it| **it != "--").any(|it| is_help_flag(it)).then(|| path.to_vec())
}

fn is_help_flag(token: &str) -> bool {
    token == "--help" || token == "-h"
}
