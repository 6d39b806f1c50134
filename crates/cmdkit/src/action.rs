use std::{collections::HashMap, fmt, future::Future, sync::Arc};

use futures::{future::BoxFuture, FutureExt};
use log::{debug, warn};

use crate::{
    dispatch::Context,
    error::BuildError,
    option::{check_name, fold, Opt, OptionDescriptor},
    param::{Param, ParameterDescriptor},
    ty::ReturnKind,
};

pub(crate) enum Handler {
    Void(Box<dyn Fn(&Context) + Send + Sync>),
    ExitCode(Box<dyn Fn(&Context) -> i32 + Send + Sync>),
    Async(Box<dyn Fn(Context) -> BoxFuture<'static, ()> + Send + Sync>),
}

/// One invokable command.
pub struct ActionDescriptor {
    name: String,
    description: Option<String>,
    long_description: Option<String>,
    example: Option<String>,
    parameters: Vec<ParameterDescriptor>,
    options: Vec<Arc<OptionDescriptor>>,
    by_name: HashMap<String, Arc<OptionDescriptor>>,
    by_alias: HashMap<String, Arc<OptionDescriptor>>,
    return_kind: ReturnKind,
    handler: Option<Handler>,
}

impl ActionDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    pub fn long_description(&self) -> Option<&str> {
        self.long_description.as_deref()
    }
    pub fn example(&self) -> Option<&str> {
        self.example.as_deref()
    }
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }
    /// Merged options, group-level ones first.
    pub fn options(&self) -> impl Iterator<Item = &OptionDescriptor> + '_ {
        self.options.iter().map(|it| &**it)
    }
    pub fn return_kind(&self) -> ReturnKind {
        self.return_kind
    }

    /// Looks up an option by long name (case-insensitive) or by alias.
    pub fn option(&self, key: &str) -> Option<&OptionDescriptor> {
        self.by_name.get(&fold(key)).or_else(|| self.by_alias.get(key)).map(|it| &**it)
    }

    pub(crate) fn handler(&self) -> Option<&Handler> {
        self.handler.as_ref()
    }
}

impl fmt::Debug for ActionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("long_description", &self.long_description)
            .field("example", &self.example)
            .field("parameters", &self.parameters)
            .field("options", &self.options)
            .field("return_kind", &self.return_kind)
            .finish()
    }
}

/// Declaration of an action.
///
/// ```
/// use cmdkit::{Action, Opt, Param};
///
/// let hello = Action::new("hello")
///     .example("hello NAME")
///     .description("say hello to NAME")
///     .param(Param::new::<String>("name"))
///     .option(Opt::flag("yell").alias("y"))
///     .run(|cx| {
///         let name = cx.arg::<String>("name").unwrap_or_default();
///         println!("Hello {name}");
///     });
/// # let _ = hello;
/// ```
pub struct Action {
    name: String,
    description: Option<String>,
    long_description: Option<String>,
    example: Option<String>,
    params: Vec<Param>,
    options: Vec<Opt>,
    return_kind: ReturnKind,
    handler: Option<Handler>,
}

impl Action {
    pub fn new(name: impl Into<String>) -> Action {
        Action {
            name: name.into(),
            description: None,
            long_description: None,
            example: None,
            params: Vec::new(),
            options: Vec::new(),
            return_kind: ReturnKind::Void,
            handler: None,
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn long_description(mut self, text: impl Into<String>) -> Self {
        self.long_description = Some(text.into());
        self
    }

    /// Usage example, e.g. `hello NAME`.
    pub fn example(mut self, text: impl Into<String>) -> Self {
        self.example = Some(text.into());
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn option(mut self, option: Opt) -> Self {
        self.options.push(option);
        self
    }

    pub fn run<F>(mut self, f: F) -> Self
    where
        F: Fn(&Context) + Send + Sync + 'static,
    {
        self.return_kind = ReturnKind::Void;
        self.handler = Some(Handler::Void(Box::new(f)));
        self
    }

    /// The handler's result becomes the process exit status.
    pub fn run_exit_code<F>(mut self, f: F) -> Self
    where
        F: Fn(&Context) -> i32 + Send + Sync + 'static,
    {
        self.return_kind = ReturnKind::ExitCode;
        self.handler = Some(Handler::ExitCode(Box::new(f)));
        self
    }

    /// The returned future is awaited before the dispatcher reports an exit status.
    pub fn run_async<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.return_kind = ReturnKind::AsyncUnit;
        self.handler = Some(Handler::Async(Box::new(move |cx| f(cx).boxed())));
        self
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn build(
        self,
        class_options: &[Arc<OptionDescriptor>],
    ) -> Result<ActionDescriptor, BuildError> {
        check_name(&self.name)?;
        if fold(&self.name) == "help" {
            return Err(BuildError::ReservedName { name: self.name });
        }
        let action = self.name;

        let mut parameters: Vec<ParameterDescriptor> = Vec::with_capacity(self.params.len());
        for (position, param) in self.params.into_iter().enumerate() {
            let param = param.build(&action, position)?;
            if parameters.iter().any(|it| fold(it.name()) == fold(param.name())) {
                return Err(BuildError::DuplicateParameter {
                    action,
                    name: param.name().to_string(),
                });
            }
            parameters.push(param);
        }
        if let Some(pos) = parameters.iter().position(|it| it.has_default()) {
            if let Some(req) = parameters[pos..].iter().find(|it| !it.has_default()) {
                warn!(
                    "required parameter `{}` of `{action}` follows an optional one",
                    req.name()
                );
            }
        }

        let mut own: Vec<Arc<OptionDescriptor>> = Vec::with_capacity(self.options.len());
        for opt in self.options {
            if own.iter().any(|it| fold(it.name()) == fold(opt.name())) {
                return Err(BuildError::DuplicateOption { scope: action, name: opt.name().to_string() });
            }
            own.push(opt.build()?);
        }

        // Action-level options shadow group-level ones of the same name.
        let mut options: Vec<Arc<OptionDescriptor>> = class_options
            .iter()
            .filter(|class| !own.iter().any(|it| fold(it.name()) == fold(class.name())))
            .cloned()
            .collect();
        options.extend(own);

        let mut by_name = HashMap::new();
        for opt in &options {
            by_name.insert(fold(opt.name()), Arc::clone(opt));
        }
        let mut by_alias: HashMap<String, Arc<OptionDescriptor>> = HashMap::new();
        for opt in &options {
            let Some(alias) = opt.alias() else { continue };
            let clash = by_alias
                .get(alias)
                .or_else(|| by_name.get(&fold(alias)).filter(|it| !Arc::ptr_eq(it, opt)));
            if let Some(other) = clash {
                return Err(BuildError::AliasCollision {
                    action,
                    option: opt.name().to_string(),
                    alias: alias.to_string(),
                    other: other.name().to_string(),
                });
            }
            by_alias.insert(alias.to_string(), Arc::clone(opt));
        }
        for opt in &options {
            if parameters.iter().any(|it| fold(it.name()) == fold(opt.name())) {
                return Err(BuildError::ParameterCollision {
                    action,
                    option: opt.name().to_string(),
                });
            }
        }

        debug!(
            "built action `{action}`: {} parameters, {} options, {:?}",
            parameters.len(),
            options.len(),
            self.return_kind
        );
        Ok(ActionDescriptor {
            name: action,
            description: self.description,
            long_description: self.long_description,
            example: self.example,
            parameters,
            options,
            by_name,
            by_alias,
            return_kind: self.return_kind,
            handler: self.handler,
        })
    }
}
