use thiserror::Error;

use crate::ty::Kind;

/// A mistake in a command declaration, reported while building descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Duplicate command name: `{name}`")]
    DuplicateAction { name: String },
    #[error("Duplicate subcommand name: `{name}`")]
    DuplicateSubcommand { name: String },
    #[error("Duplicate option in `{scope}`: `{name}`")]
    DuplicateOption { scope: String, name: String },
    #[error("Duplicate parameter in `{action}`: `{name}`")]
    DuplicateParameter { action: String, name: String },
    #[error("Unsupported type: `{type_name}`")]
    UnsupportedType { type_name: &'static str },
    #[error("Boolean parameter `{parameter}` of `{action}` can't be positional, declare a flag")]
    FlagParameter { action: String, parameter: String },
    #[error("Boolean option `{option}` can't take a value, declare a flag")]
    ValueFlag { option: String },
    #[error("Alias `-{alias}` of `--{option}` collides with `--{other}` in `{action}`")]
    AliasCollision { action: String, option: String, alias: String, other: String },
    #[error("Option `--{option}` collides with parameter `{option}` in `{action}`")]
    ParameterCollision { action: String, option: String },
    #[error("Invalid name: `{name}`")]
    InvalidName { name: String },
    #[error("`{name}` is generated automatically")]
    ReservedName { name: String },
    #[error("Subcommand `{name}` ({type_name}) is already one of its own ancestors")]
    RecursiveSubcommand { name: String, type_name: &'static str },
}

/// Why an argument vector could not be matched against a command tree.
///
/// Resolution stops at the first error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("Unknown command: `{token}`. Use `help` for more information")]
    UnknownCommand { token: String, available: Vec<String> },
    #[error("A command is required. Use `help` for more information")]
    CommandRequired { available: Vec<String> },
    #[error("Unknown option: `{token}`. Use `help` for more information")]
    UnknownOption { token: String },
    #[error("Missing required parameter: `{parameter}`. Use `help` for more information")]
    MissingRequiredParameter { parameter: String },
    #[error("Expected a value for `{option}`")]
    MissingValue { option: String },
    #[error("Can't parse `{name}`, expected {expected}: `{token}`")]
    TypeCoercionFailure { token: String, name: String, expected: Kind },
    #[error("Option specified more than once: `{option}`")]
    AmbiguousMatch { option: String, tokens: Vec<String> },
    #[error("Unexpected argument: `{token}`. Use `help` for more information")]
    UnexpectedArgument { token: String },
}

impl ResolutionError {
    /// Command names valid at the point of failure, if the error has any.
    pub fn available(&self) -> &[String] {
        match self {
            ResolutionError::UnknownCommand { available, .. }
            | ResolutionError::CommandRequired { available } => available,
            _ => &[],
        }
    }
}

/// A token that does not read as the expected kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, got `{token}`")]
pub struct CoerceError {
    pub token: String,
    pub expected: Kind,
}

impl CoerceError {
    pub(crate) fn named(self, name: &str) -> ResolutionError {
        ResolutionError::TypeCoercionFailure {
            token: self.token,
            name: name.to_string(),
            expected: self.expected,
        }
    }
}
