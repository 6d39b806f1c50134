use std::{fmt, sync::Arc};

use crate::{
    error::BuildError,
    option::{check_name, DefaultFn},
    ty::{TypeDescriptor, Value},
};

/// One positional parameter, bound by its ordinal position.
pub struct ParameterDescriptor {
    name: String,
    ty: TypeDescriptor,
    default: Option<DefaultFn>,
    position: usize,
}

impl ParameterDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
    pub fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn default_value(&self) -> Option<Value> {
        self.default.as_ref().map(|f| f())
    }
}

impl fmt::Debug for ParameterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterDescriptor")
            .field("name", &self.name)
            .field("kind", &self.ty.kind())
            .field("has_default", &self.has_default())
            .field("position", &self.position)
            .finish()
    }
}

/// Declaration of a positional parameter.
pub struct Param {
    name: String,
    ty: Result<TypeDescriptor, BuildError>,
    default: Option<DefaultFn>,
}

impl Param {
    pub fn new<T: 'static>(name: impl Into<String>) -> Param {
        Param { name: name.into(), ty: TypeDescriptor::of::<T>(), default: None }
    }

    /// An optional parameter. `default` runs only when no token is left for it.
    pub fn with_default<T, F>(name: impl Into<String>, default: F) -> Param
    where
        T: Into<Value> + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let mut res = Param::new::<T>(name);
        res.default = Some(Arc::new(move || default().into()));
        res
    }

    pub(crate) fn build(self, action: &str, position: usize) -> Result<ParameterDescriptor, BuildError> {
        check_name(&self.name)?;
        let ty = self.ty?;
        if ty.is_flag() {
            return Err(BuildError::FlagParameter {
                action: action.to_string(),
                parameter: self.name,
            });
        }
        Ok(ParameterDescriptor { name: self.name, ty, default: self.default, position })
    }
}
