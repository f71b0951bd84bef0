//! Command dispatch.
//!
//! Every command invocation is resolved through the registry, its arguments
//! are bound, then the definition kind decides what happens.

use std::rc::Rc;

use texpand_ir::{Block, Parameters, StatementNode, Text};
use tracing::debug;

use super::{Interpreter, OpenEnvironment};
use crate::frame::Scope;
use crate::errors::{
    arity_mismatch, malformed_environment_name, malformed_runtime_definition,
    unbalanced_environment, unknown_command, unknown_environment, ExpandResult,
};
use crate::registry::{CommandDefinition, EnvironmentDefinition};
use crate::sink::{Event, EventSink};

impl<S: EventSink> Interpreter<S> {
    pub(super) fn invoke(&mut self, name: &Text, attached: &[Block]) -> ExpandResult<()> {
        let definition = self
            .registry
            .command(name)
            .cloned()
            .ok_or_else(|| unknown_command(name))?;
        let caller = self.frames.active_scope();

        // Settle first so argument reads start right after the command.
        self.frames.advance();
        let optional = self.read_optional_groups(attached)?;
        let args = self.read_mandatory(name, definition.arity())?;

        match definition {
            CommandDefinition::UserMacro(def) => {
                let scope = Scope::bind(Parameters::clone(&args), &caller);
                self.frames.push(def.body.shared(), scope)?;
                self.emit(Event::Command {
                    name: name.clone(),
                    args,
                    optional,
                })
            }
            CommandDefinition::BeginEnvironment => self.begin_environment(name, &args, &caller),
            CommandDefinition::EndEnvironment => self.end_environment(name, &args, &caller),
            CommandDefinition::NoOp => Ok(()),
            CommandDefinition::StartSuppress => {
                self.set_processing(false);
                Ok(())
            }
            CommandDefinition::StopSuppress => {
                self.set_processing(true);
                Ok(())
            }
            CommandDefinition::RuntimeDefine => self.runtime_define(name, &optional),
            CommandDefinition::StoreValue { key } => {
                let value = args
                    .first()
                    .cloned()
                    .ok_or_else(|| arity_mismatch(name, 1, 0))?;
                debug!(key = &*key, "stored value");
                self.store.insert(key, value);
                Ok(())
            }
        }
    }

    fn begin_environment(
        &mut self,
        command: &Text,
        args: &Parameters,
        caller: &Rc<Scope>,
    ) -> ExpandResult<()> {
        let env = self.resolve_environment(command, args)?;
        let optional = self.read_optional_groups(&[])?;
        let env_args = self.read_mandatory(&env.name, env.arity)?;

        debug!(name = &*env.name, depth = self.open_environments.len() + 1, "begin environment");
        let scope = Scope::bind(Parameters::clone(&env_args), caller);
        self.open_environments.push(OpenEnvironment {
            name: env.name.clone(),
            args: Parameters::clone(&env_args),
            scope: Rc::clone(&scope),
        });
        self.frames.push(env.preamble.shared(), scope)?;
        self.emit(Event::EnvironmentBegin {
            name: env.name,
            args: env_args,
            optional,
        })
    }

    /// Close the nearest open environment named by `\end`.
    ///
    /// Environments opened above it are closed with it, and an `\end` with
    /// no matching `\begin` runs its postamble with no arguments. Only a
    /// strict interpreter insists on the innermost one.
    fn end_environment(
        &mut self,
        command: &Text,
        args: &Parameters,
        caller: &Rc<Scope>,
    ) -> ExpandResult<()> {
        let env = self.resolve_environment(command, args)?;

        if self.strict_environments {
            let innermost = self.open_environments.last().map(|open| open.name.clone());
            if innermost.as_deref() != Some(&*env.name) {
                return Err(unbalanced_environment(innermost, &env.name));
            }
        }

        let position = self
            .open_environments
            .iter()
            .rposition(|open| open.name == env.name);
        let matched = position.and_then(|index| {
            let closed = self.open_environments.split_off(index);
            if closed.len() > 1 {
                debug!(name = &*env.name, implicit = closed.len() - 1, "closing inner environments");
            }
            closed.into_iter().next()
        });
        let (env_args, scope) = match matched {
            Some(open) => (open.args, open.scope),
            None => {
                debug!(name = &*env.name, "end without matching begin");
                let none: Parameters = Rc::from(Vec::new());
                let scope = Scope::bind(Parameters::clone(&none), caller);
                (none, scope)
            }
        };

        debug!(name = &*env.name, depth = self.open_environments.len(), "end environment");
        self.frames.push(env.postamble.shared(), scope)?;
        self.emit(Event::EnvironmentEnd {
            name: env.name,
            args: env_args,
        })
    }

    /// Look up the environment named by the single word in `args[0]`.
    fn resolve_environment(
        &self,
        command: &Text,
        args: &Parameters,
    ) -> ExpandResult<EnvironmentDefinition> {
        let group = args.first().ok_or_else(|| arity_mismatch(command, 1, 0))?;
        let name = group
            .single_word()
            .ok_or_else(|| malformed_environment_name(command, group.as_text()))?;
        self.registry
            .environment(name)
            .cloned()
            .ok_or_else(|| unknown_environment(name))
    }

    /// `\newcommand[arity]{\name}{body}` and friends.
    ///
    /// The name and body are read raw, without interpretation. The name keeps
    /// whatever the tokenizer produced: a bare command, a group holding one,
    /// or a plain word. One leading backslash is stripped. The arity may come
    /// as an optional group either before or after the name.
    fn runtime_define(&mut self, command: &Text, optional: &Parameters) -> ExpandResult<()> {
        let name = match self.frames.read()? {
            None | Some(StatementNode::SentinelEnd) => {
                return Err(malformed_runtime_definition(command, "missing macro name"));
            }
            Some(node) => {
                let text = node.as_text();
                let name = text.strip_prefix('\\').unwrap_or(&text).trim().to_owned();
                if name.is_empty() {
                    return Err(malformed_runtime_definition(command, "empty macro name"));
                }
                name
            }
        };

        // `\newcommand{\name}[n]{body}` places the arity after the name.
        let arity_group = match optional.first() {
            Some(group) => Some(group.clone()),
            None => self.read_optional_groups(&[])?.first().cloned(),
        };
        let arity = match arity_group {
            None => 0,
            Some(group) => {
                let text = group.as_text();
                text.trim().parse::<usize>().map_err(|_| {
                    malformed_runtime_definition(command, format!("arity `{text}` is not a number"))
                })?
            }
        };

        let body = match self.frames.read()? {
            Some(StatementNode::Block(body)) => body,
            _ => {
                return Err(malformed_runtime_definition(
                    command,
                    format!("`{name}` needs a `{{...}}` body"),
                ));
            }
        };

        debug!(via = &**command, name = name.as_str(), arity, "runtime definition");
        self.registry.register_command(&name, arity, body);
        Ok(())
    }
}
