use std::{fmt, sync::Arc};

use crate::{
    error::BuildError,
    ty::{TypeDescriptor, Value},
};

pub(crate) type DefaultFn = Arc<dyn Fn() -> Value + Send + Sync>;

/// One named option or flag of an action.
///
/// Shared between every lookup key (long name and alias) of the owning action.
pub struct OptionDescriptor {
    name: String,
    alias: Option<String>,
    description: Option<String>,
    ty: TypeDescriptor,
    default: Option<DefaultFn>,
}

impl OptionDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    pub fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }
    pub fn is_flag(&self) -> bool {
        self.ty.is_flag()
    }
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Runs the default supplier. Called only when the option is absent.
    pub(crate) fn default_value(&self) -> Option<Value> {
        self.default.as_ref().map(|f| f())
    }
}

impl fmt::Debug for OptionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionDescriptor")
            .field("name", &self.name)
            .field("alias", &self.alias)
            .field("description", &self.description)
            .field("kind", &self.ty.kind())
            .field("has_default", &self.has_default())
            .finish()
    }
}

/// Declaration of an option, turned into an [`OptionDescriptor`] when the
/// owning group is built.
pub struct Opt {
    name: String,
    alias: Option<String>,
    description: Option<String>,
    ty: Result<TypeDescriptor, BuildError>,
    default: Option<DefaultFn>,
    takes_value: bool,
}

impl Opt {
    /// A boolean option set by presence alone, `false` when absent.
    pub fn flag(name: impl Into<String>) -> Opt {
        Opt::new(name.into(), TypeDescriptor::of::<bool>(), false)
    }

    /// An option consuming one value token coerced into `T`.
    pub fn value<T: 'static>(name: impl Into<String>) -> Opt {
        Opt::new(name.into(), TypeDescriptor::of::<T>(), true)
    }

    /// Like [`Opt::value`], with `default` computed only when the option is absent.
    pub fn value_with_default<T, F>(name: impl Into<String>, default: F) -> Opt
    where
        T: Into<Value> + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let mut res = Opt::value::<T>(name);
        res.default = Some(Arc::new(move || default().into()));
        res
    }

    fn new(name: String, ty: Result<TypeDescriptor, BuildError>, takes_value: bool) -> Opt {
        Opt { name, alias: None, description: None, ty, default: None, takes_value }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn build(self) -> Result<Arc<OptionDescriptor>, BuildError> {
        check_name(&self.name)?;
        if fold(&self.name) == "help" {
            return Err(BuildError::ReservedName { name: "--help".to_string() });
        }
        if let Some(alias) = &self.alias {
            check_name(alias)?;
            if alias == "h" {
                return Err(BuildError::ReservedName { name: "-h".to_string() });
            }
        }
        let ty = self.ty?;
        if self.takes_value && ty.is_flag() {
            return Err(BuildError::ValueFlag { option: self.name });
        }
        Ok(Arc::new(OptionDescriptor {
            name: self.name,
            alias: self.alias,
            description: self.description,
            ty,
            default: self.default,
        }))
    }
}

/// Names must survive being typed as a single token.
pub(crate) fn check_name(name: &str) -> Result<(), BuildError> {
    let valid = !name.is_empty()
        && !name.starts_with('-')
        && !name.contains('=')
        && !name.chars().any(char::is_whitespace);
    if !valid {
        return Err(BuildError::InvalidName { name: name.to_string() });
    }
    Ok(())
}

/// Key for case-insensitive name lookups.
pub(crate) fn fold(name: &str) -> String {
    name.to_lowercase()
}
