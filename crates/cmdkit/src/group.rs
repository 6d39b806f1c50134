use std::{any::TypeId, collections::HashMap, fmt, sync::Arc};

use log::{debug, warn};

use crate::{
    action::{Action, ActionDescriptor},
    error::{BuildError, ResolutionError},
    option::{check_name, fold, Opt, OptionDescriptor},
    resolve::{self, Invocation},
};

/// A command-bearing type.
///
/// `declare` lists the type's actions, its group-level options and the other
/// command-bearing types bound to subcommand names.
pub trait Commands: 'static {
    fn declare() -> Group;
}

struct Subcommand {
    name: String,
    type_id: TypeId,
    type_name: &'static str,
    declare: fn() -> Group,
}

/// Declaration of a command group.
#[derive(Default)]
pub struct Group {
    options: Vec<Opt>,
    actions: Vec<Action>,
    subcommands: Vec<Subcommand>,
}

impl Group {
    pub fn new() -> Group {
        Group::default()
    }

    /// An option shared by every action declared directly in this group.
    pub fn option(mut self, option: Opt) -> Self {
        self.options.push(option);
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Binds `name` to the command group declared by `T`.
    pub fn subcommand<T: Commands>(mut self, name: impl Into<String>) -> Self {
        self.subcommands.push(Subcommand {
            name: name.into(),
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            declare: T::declare,
        });
        self
    }
}

/// The actions and nested subcommand groups of one command-bearing type.
pub struct CommandGroupDescriptor {
    class_options: Vec<Arc<OptionDescriptor>>,
    actions: Vec<ActionDescriptor>,
    action_index: HashMap<String, usize>,
    subgroups: Vec<(String, CommandGroupDescriptor)>,
    subgroup_index: HashMap<String, usize>,
}

impl CommandGroupDescriptor {
    pub fn of<T: Commands>() -> Result<Self, BuildError> {
        let mut ancestors = vec![TypeId::of::<T>()];
        build(T::declare(), &mut ancestors)
    }

    /// Builds a root group that is not bound to a command-bearing type.
    pub fn from_group(group: Group) -> Result<Self, BuildError> {
        build(group, &mut Vec::new())
    }

    pub fn class_options(&self) -> impl Iterator<Item = &OptionDescriptor> + '_ {
        self.class_options.iter().map(|it| &**it)
    }

    pub fn actions(&self) -> impl Iterator<Item = &ActionDescriptor> + '_ {
        self.actions.iter()
    }

    /// Case-insensitive lookup.
    pub fn action(&self, name: &str) -> Option<&ActionDescriptor> {
        self.action_index.get(&fold(name)).map(|&idx| &self.actions[idx])
    }

    pub fn subgroups(&self) -> impl Iterator<Item = (&str, &CommandGroupDescriptor)> + '_ {
        self.subgroups.iter().map(|(name, group)| (name.as_str(), group))
    }

    pub fn subgroup(&self, name: &str) -> Option<&CommandGroupDescriptor> {
        self.subgroup_entry(name).map(|(_, group)| group)
    }

    /// The declared name and the group bound to `name`.
    pub(crate) fn subgroup_entry(&self, name: &str) -> Option<(&str, &CommandGroupDescriptor)> {
        let &idx = self.subgroup_index.get(&fold(name))?;
        let (name, group) = &self.subgroups[idx];
        Some((name.as_str(), group))
    }

    /// Every token valid as the next command: actions first, then subcommands
    /// not shadowed by an action.
    pub fn names(&self) -> Vec<String> {
        let actions = self.actions.iter().map(|it| it.name().to_string());
        let subgroups = self
            .subgroups
            .iter()
            .filter(|(name, _)| !self.action_index.contains_key(&fold(name)))
            .map(|(name, _)| name.clone());
        actions.chain(subgroups).collect()
    }

    pub fn resolve<S: AsRef<str>>(&self, args: &[S]) -> Result<Invocation<'_>, ResolutionError> {
        resolve::resolve(self, args)
    }
}

impl fmt::Debug for CommandGroupDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandGroupDescriptor")
            .field("class_options", &self.class_options)
            .field("actions", &self.actions)
            .field("subgroups", &self.subgroups)
            .finish()
    }
}

fn build(group: Group, ancestors: &mut Vec<TypeId>) -> Result<CommandGroupDescriptor, BuildError> {
    let mut class_options: Vec<Arc<OptionDescriptor>> = Vec::with_capacity(group.options.len());
    for opt in group.options {
        if class_options.iter().any(|it| fold(it.name()) == fold(opt.name())) {
            return Err(BuildError::DuplicateOption {
                scope: "group".to_string(),
                name: opt.name().to_string(),
            });
        }
        class_options.push(opt.build()?);
    }

    let mut actions = Vec::with_capacity(group.actions.len());
    let mut action_index = HashMap::new();
    for action in group.actions {
        let key = fold(action.name());
        if action_index.contains_key(&key) {
            return Err(BuildError::DuplicateAction { name: action.name().to_string() });
        }
        let action = action.build(&class_options)?;
        action_index.insert(key, actions.len());
        actions.push(action);
    }

    let mut subgroups = Vec::with_capacity(group.subcommands.len());
    let mut subgroup_index = HashMap::new();
    for sub in group.subcommands {
        check_name(&sub.name)?;
        let key = fold(&sub.name);
        if key == "help" {
            return Err(BuildError::ReservedName { name: sub.name });
        }
        if subgroup_index.contains_key(&key) {
            return Err(BuildError::DuplicateSubcommand { name: sub.name });
        }
        if ancestors.contains(&sub.type_id) {
            return Err(BuildError::RecursiveSubcommand { name: sub.name, type_name: sub.type_name });
        }
        if action_index.contains_key(&key) {
            warn!("subcommand `{}` is shadowed by the action of the same name", sub.name);
        }

        debug!("building subcommand `{}` from {}", sub.name, sub.type_name);
        ancestors.push(sub.type_id);
        let res = build((sub.declare)(), ancestors);
        ancestors.pop();

        subgroup_index.insert(key, subgroups.len());
        subgroups.push((sub.name, res?));
    }

    Ok(CommandGroupDescriptor { class_options, actions, action_index, subgroups, subgroup_index })
}
