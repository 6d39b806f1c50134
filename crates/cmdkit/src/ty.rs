//! Declared types, coerced values and return-kind classification.

use std::{any::TypeId, fmt};

use crate::error::{BuildError, CoerceError};

/// A coerced argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Str(String),
    Bool(bool),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(it) => fmt::Display::fmt(it, f),
            Value::Str(it) => fmt::Display::fmt(it, f),
            Value::Bool(it) => fmt::Display::fmt(it, f),
        }
    }
}

impl From<i64> for Value {
    fn from(it: i64) -> Self {
        Value::Int(it)
    }
}

impl From<i32> for Value {
    fn from(it: i32) -> Self {
        Value::Int(it.into())
    }
}

impl From<String> for Value {
    fn from(it: String) -> Self {
        Value::Str(it)
    }
}

impl From<&str> for Value {
    fn from(it: &str) -> Self {
        Value::Str(it.to_string())
    }
}

impl From<bool> for Value {
    fn from(it: bool) -> Self {
        Value::Bool(it)
    }
}

/// Typed read access to a [`Value`], used by handler accessors.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(it) => Some(*it),
            _ => None,
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(it) => i32::try_from(*it).ok(),
            _ => None,
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Str(it) => Some(it.clone()),
            _ => None,
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(it) => Some(*it),
            _ => None,
        }
    }
}

/// The closed set of kinds a token can be coerced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Integer,
    String,
    Boolean,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Integer => "integer",
            Kind::String => "string",
            Kind::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repr {
    I64,
    I32,
    String,
    Bool,
}

/// Wraps exactly one declared parameter or option type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescriptor {
    repr: Repr,
    type_name: &'static str,
}

impl TypeDescriptor {
    /// Describes `T`, failing for anything outside `i64`, `i32`, `String` and
    /// `bool`.
    pub fn of<T: 'static>() -> Result<Self, BuildError> {
        let id = TypeId::of::<T>();
        let repr = if id == TypeId::of::<i64>() {
            Repr::I64
        } else if id == TypeId::of::<i32>() {
            Repr::I32
        } else if id == TypeId::of::<String>() {
            Repr::String
        } else if id == TypeId::of::<bool>() {
            Repr::Bool
        } else {
            return Err(BuildError::UnsupportedType { type_name: std::any::type_name::<T>() });
        };
        Ok(TypeDescriptor { repr, type_name: std::any::type_name::<T>() })
    }

    pub fn kind(&self) -> Kind {
        match self.repr {
            Repr::I64 | Repr::I32 => Kind::Integer,
            Repr::String => Kind::String,
            Repr::Bool => Kind::Boolean,
        }
    }

    /// Booleans are only ever flags: presence alone sets them.
    pub fn is_flag(&self) -> bool {
        self.kind() == Kind::Boolean
    }

    /// Name shown to users, e.g. in help and coercion errors.
    pub fn display_name(&self) -> String {
        self.kind().to_string()
    }

    /// The Rust type this descriptor was built from.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn coerce(&self, token: &str) -> Result<Value, CoerceError> {
        let fail = || CoerceError { token: token.to_string(), expected: self.kind() };
        let value = match self.repr {
            Repr::I64 => Value::Int(token.parse::<i64>().map_err(|_| fail())?),
            Repr::I32 => Value::Int(token.parse::<i32>().map_err(|_| fail())?.into()),
            Repr::String => Value::Str(token.to_string()),
            Repr::Bool => Value::Bool(token.parse::<bool>().map_err(|_| fail())?),
        };
        Ok(value)
    }
}

/// How the dispatcher treats what an action's handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnKind {
    /// No result, exit status is 0.
    #[default]
    Void,
    /// The returned integer is the exit status.
    ExitCode,
    /// The handler returns a future that must complete before exiting.
    AsyncUnit,
}
