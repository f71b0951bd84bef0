//! Command and environment registry.
//!
//! Two name-to-definition tables owned by a single interpreter. They are
//! seeded with the built-in vocabulary (see [`builtins`]) and extended before
//! a run by style collaborators, or during a run by runtime definitions. The
//! last registration for a name wins; unknown names only fail when invoked.

mod builtins;

use rustc_hash::FxHashMap;
use std::rc::Rc;
use texpand_ir::{Block, Text};
use tracing::debug;

/// Behavior bound to a command name.
///
/// A closed set of kinds: hosts extend the vocabulary by registering new
/// names for these kinds, never by adding kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandDefinition {
    /// Parameterized replacement text.
    UserMacro(MacroDefinition),
    /// `\begin{name}`.
    BeginEnvironment,
    /// `\end{name}`.
    EndEnvironment,
    /// Recognized and ignored.
    NoOp,
    /// Stop emitting events until [`CommandDefinition::StopSuppress`].
    StartSuppress,
    /// Resume emitting events.
    StopSuppress,
    /// Read `name` and `{body}` off the stream and register a new macro.
    RuntimeDefine,
    /// Keep the single argument in the interpreter's value store under `key`.
    StoreValue { key: Text },
}

impl CommandDefinition {
    /// Number of mandatory `{...}` arguments read before dispatch.
    pub fn arity(&self) -> usize {
        match self {
            CommandDefinition::UserMacro(def) => def.arity,
            CommandDefinition::BeginEnvironment
            | CommandDefinition::EndEnvironment
            | CommandDefinition::StoreValue { .. } => 1,
            CommandDefinition::NoOp
            | CommandDefinition::StartSuppress
            | CommandDefinition::StopSuppress
            | CommandDefinition::RuntimeDefine => 0,
        }
    }
}

/// A user macro: fixed arity and a body template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MacroDefinition {
    pub arity: usize,
    pub body: Block,
}

/// A bracketing construct with separate begin and end templates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvironmentDefinition {
    pub name: Text,
    pub arity: usize,
    pub preamble: Block,
    pub postamble: Block,
}

/// Name-to-behavior tables.
#[derive(Clone, Debug)]
pub struct Registry {
    commands: FxHashMap<Text, CommandDefinition>,
    environments: FxHashMap<Text, EnvironmentDefinition>,
}

impl Registry {
    /// A registry with nothing in it.
    pub fn empty() -> Self {
        Registry {
            commands: FxHashMap::default(),
            environments: FxHashMap::default(),
        }
    }

    /// A registry seeded with the built-in vocabulary.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        builtins::seed(&mut registry);
        registry
    }

    /// Bind `name` to an arbitrary command kind.
    pub fn define_command(&mut self, name: &str, definition: CommandDefinition) {
        let replaced = self.commands.insert(Rc::from(name), definition).is_some();
        debug!(name, replaced, "registered command");
    }

    /// Register a user macro.
    pub fn register_command(&mut self, name: &str, arity: usize, body: Block) {
        self.define_command(
            name,
            CommandDefinition::UserMacro(MacroDefinition { arity, body }),
        );
    }

    /// Register an environment.
    pub fn register_environment(
        &mut self,
        name: &str,
        arity: usize,
        preamble: Block,
        postamble: Block,
    ) {
        let name: Text = Rc::from(name);
        let definition = EnvironmentDefinition {
            name: name.clone(),
            arity,
            preamble,
            postamble,
        };
        let replaced = self.environments.insert(name.clone(), definition).is_some();
        debug!(name = &*name, replaced, "registered environment");
    }

    /// Register a one-argument command that stores its argument under `key`.
    pub fn register_store(&mut self, name: &str, key: &str) {
        self.define_command(name, CommandDefinition::StoreValue { key: Rc::from(key) });
    }

    pub fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    pub fn environment(&self, name: &str) -> Option<&EnvironmentDefinition> {
        self.environments.get(name)
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    pub fn environment_count(&self) -> usize {
        self.environments.len()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
