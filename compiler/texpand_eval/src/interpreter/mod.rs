//! Frame-stack interpreter.
//!
//! # Architecture
//!
//! `run()` repeats `step()` until the frame stack is empty. A step peeks the
//! next due node, consumes it, interprets it and settles the stack:
//!
//! - text-like nodes emit one event each;
//! - `{...}` groups and `#k` references push a frame over existing statements;
//! - command invocations go through the registry (see `dispatch`), reading
//!   their arguments with the binder (see `binder`) before pushing the
//!   replacement text.
//!
//! Expansion is lazy and in place: a macro body is never copied or
//! pre-expanded, it is read through a frame bound to the invocation's
//! arguments.
//!
//! Emission is gated by a single `processing` flag. While it is off the
//! traversal is unchanged (frames are pushed and retired, arguments bound,
//! definitions registered) but the sink sees nothing.

mod binder;
mod builder;
mod dispatch;

pub use builder::InterpreterBuilder;

use std::rc::Rc;

use rustc_hash::FxHashMap;
use texpand_ir::{Block, Parameters, StatementNode, Text};
use tracing::{debug, trace};

use crate::errors::{stack_underflow, ExpandResult};
use crate::frame::{FrameStack, Scope};
use crate::policy::CallbackPolicy;
use crate::registry::Registry;
use crate::sink::{Event, EventSink, Splice};

/// An environment entered with `\begin` and not yet closed.
#[derive(Clone, Debug)]
pub struct OpenEnvironment {
    pub name: Text,
    /// Arguments bound at `\begin`, re-bound to the postamble at `\end`.
    pub args: Parameters,
    scope: Rc<Scope>,
}

/// Expansion engine for one document.
///
/// Owns all run state: the frame stack, the vocabulary, the suppression flag
/// and the value store. Independent documents need independent instances.
pub struct Interpreter<S> {
    frames: FrameStack,
    registry: Registry,
    sink: S,
    processing: bool,
    callback_policy: CallbackPolicy,
    strict_environments: bool,
    open_environments: Vec<OpenEnvironment>,
    store: FxHashMap<Text, Block>,
}

impl<S: EventSink> Interpreter<S> {
    /// Interpreter over `document` with the built-in vocabulary and default policy.
    pub fn new(document: &Block, sink: S) -> Self {
        InterpreterBuilder::new(document).build(sink)
    }

    /// Register (or replace) a user macro.
    pub fn register_command(&mut self, name: &str, arity: usize, body: Block) {
        self.registry.register_command(name, arity, body);
    }

    /// Register (or replace) an environment.
    pub fn register_environment(
        &mut self,
        name: &str,
        arity: usize,
        preamble: Block,
        postamble: Block,
    ) {
        self.registry
            .register_environment(name, arity, preamble, postamble);
    }

    /// Register a command that stores its argument under `key`.
    pub fn register_store(&mut self, name: &str, key: &str) {
        self.registry.register_store(name, key);
    }

    /// Expand the whole document, stopping at the first error.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self) -> ExpandResult<()> {
        debug!("expansion started");
        let mut steps: u64 = 0;
        while !self.frames.end_of_input() {
            self.step()?;
            steps = steps.saturating_add(1);
        }
        debug!(steps, "expansion finished");
        Ok(())
    }

    /// Interpret exactly one node.
    pub fn step(&mut self) -> ExpandResult<()> {
        let node = self.frames.peek().ok_or_else(|| stack_underflow("step"))?;
        self.frames.consume()?;
        self.interpret(node)?;
        self.frames.advance();
        Ok(())
    }

    fn interpret(&mut self, node: StatementNode) -> ExpandResult<()> {
        match node {
            StatementNode::Word(text) => self.emit(Event::Word(text)),
            StatementNode::Number(text) => self.emit(Event::Number(text)),
            StatementNode::Punctuation(text) => self.emit(Event::Punctuation(text)),
            StatementNode::Whitespace => self.emit(Event::Whitespace),
            StatementNode::LineBreak => self.emit(Event::LineBreak),
            StatementNode::MathToggle => self.emit(Event::MathToggle),
            StatementNode::ParameterReference(index) => self.substitute_parameter(index),
            StatementNode::Block(block) => {
                let scope = self.frames.active_scope();
                self.frames.push(block.shared(), scope)?;
                self.emit(Event::BlockEntered)
            }
            StatementNode::CommandInvocation {
                name,
                optional_args,
            } => self.invoke(&name, &optional_args),
            StatementNode::Echo(text) => self.emit(Event::Echo(text)),
            StatementNode::Callback(callback) => {
                if self.callback_policy.invokes(self.processing) {
                    callback.invoke();
                }
                self.emit(Event::Callback)
            }
            StatementNode::SentinelEnd => Ok(()),
        }
    }

    /// Hand `event` to the sink unless suppressed, then push whatever it spliced.
    ///
    /// The splice frame runs in the scope of the frame active at emission, so
    /// `#k` inside a splice answering a `command` event refers to that
    /// command's arguments.
    fn emit(&mut self, event: Event) -> ExpandResult<()> {
        if !self.processing {
            return Ok(());
        }
        trace!(kind = event.kind().as_str(), "emit");
        let mut splice = Splice::default();
        self.sink.emit(&event, &mut splice);
        if !splice.is_empty() {
            let scope = self.frames.active_scope();
            self.frames.push(splice.into_nodes().into(), scope)?;
        }
        Ok(())
    }

    fn set_processing(&mut self, processing: bool) {
        if self.processing != processing {
            debug!(processing, "emission toggled");
        }
        self.processing = processing;
    }
}

impl<S> Interpreter<S> {
    /// Number of open frames.
    pub fn depth(&self) -> usize {
        self.frames.depth()
    }

    /// `true` once the document has been fully expanded.
    pub fn is_finished(&self) -> bool {
        self.frames.end_of_input()
    }

    /// Whether events currently reach the sink.
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Environments entered and not yet closed, innermost last.
    pub fn open_environments(&self) -> &[OpenEnvironment] {
        &self.open_environments
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Value stored by a store-value command under `key`.
    pub fn stored(&self, key: &str) -> Option<&Block> {
        self.store.get(key)
    }

    /// Every stored value, in no particular order.
    pub fn stored_values(&self) -> impl Iterator<Item = (&str, &Block)> {
        self.store.iter().map(|(key, value)| (&**key, value))
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
