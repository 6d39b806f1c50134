//! Matching an argument vector against a command tree.

use std::{
    collections::{BTreeMap, HashMap},
    fmt,
};

use log::trace;

use crate::{
    action::ActionDescriptor,
    error::ResolutionError,
    group::CommandGroupDescriptor,
    rt::{split_flag, Tokens},
    ty::Value,
};

/// A selected action with every parameter and option value bound.
pub struct Invocation<'a> {
    pub action: &'a ActionDescriptor,
    /// Subcommand names walked to reach the action, as declared.
    pub path: Vec<&'a str>,
    /// One value per parameter, in declaration order.
    pub positional: Vec<Value>,
    /// Keyed by declared option name. Options without a value or a default are
    /// absent.
    pub options: BTreeMap<String, Value>,
}

impl fmt::Debug for Invocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("action", &self.action.name())
            .field("path", &self.path)
            .field("positional", &self.positional)
            .field("options", &self.options)
            .finish()
    }
}

/// Resolves `args` (program name already stripped) against `root`.
pub fn resolve<'a, S: AsRef<str>>(
    root: &'a CommandGroupDescriptor,
    args: &[S],
) -> Result<Invocation<'a>, ResolutionError> {
    let p = &mut Tokens::new(args);

    let mut group = root;
    let mut path = Vec::new();
    while let Some(token) = p.peek() {
        if group.action(token).is_some() {
            break;
        }
        let Some((name, sub)) = group.subgroup_entry(token) else { break };
        trace!("descending into subcommand `{name}`");
        path.push(name);
        group = sub;
        p.next();
    }

    let action = match p.next() {
        Some(token) => match group.action(&token) {
            Some(it) => it,
            None => {
                return Err(ResolutionError::UnknownCommand { token, available: group.names() })
            }
        },
        None => return Err(ResolutionError::CommandRequired { available: group.names() }),
    };
    trace!("selected action `{}`", action.name());

    let mut options = BTreeMap::new();
    let mut seen: HashMap<String, String> = HashMap::new();
    let mut positional_tokens = Vec::new();
    while let Some(arg) = p.pop_flag() {
        let flag = match arg {
            Ok(it) => it,
            Err(it) => {
                positional_tokens.push(it);
                continue;
            }
        };
        let (key, attached) = split_flag(&flag);
        let Some(opt) = action.option(key) else {
            if is_negative_number(&flag) {
                positional_tokens.push(flag);
                continue;
            }
            return Err(ResolutionError::UnknownOption { token: flag });
        };
        if let Some(first) = seen.get(opt.name()) {
            return Err(ResolutionError::AmbiguousMatch {
                option: opt.name().to_string(),
                tokens: vec![first.clone(), flag],
            });
        }

        let value = match (opt.is_flag(), attached) {
            (true, None) => Value::Bool(true),
            (_, Some(raw)) => opt.ty().coerce(raw).map_err(|err| err.named(opt.name()))?,
            (false, None) => {
                let raw = p.next_value(&flag)?;
                opt.ty().coerce(&raw).map_err(|err| err.named(opt.name()))?
            }
        };
        trace!("option `{}` = {value:?}", opt.name());
        seen.insert(opt.name().to_string(), flag);
        options.insert(opt.name().to_string(), value);
    }

    let mut tokens = positional_tokens.into_iter();
    let mut positional = Vec::with_capacity(action.parameters().len());
    for param in action.parameters() {
        let value = match tokens.next() {
            Some(token) => param.ty().coerce(&token).map_err(|err| err.named(param.name()))?,
            None => match param.default_value() {
                Some(it) => it,
                None => {
                    return Err(ResolutionError::MissingRequiredParameter {
                        parameter: param.name().to_string(),
                    })
                }
            },
        };
        positional.push(value);
    }
    if let Some(token) = tokens.next() {
        return Err(ResolutionError::UnexpectedArgument { token });
    }

    for opt in action.options() {
        if options.contains_key(opt.name()) {
            continue;
        }
        let value = if opt.is_flag() { Some(Value::Bool(false)) } else { opt.default_value() };
        if let Some(value) = value {
            options.insert(opt.name().to_string(), value);
        }
    }

    Ok(Invocation { action, path, positional, options })
}

/// `-` followed by digits only. Range is checked later, by coercion.
fn is_negative_number(token: &str) -> bool {
    token
        .strip_prefix('-')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|it| it.is_ascii_digit()))
}
