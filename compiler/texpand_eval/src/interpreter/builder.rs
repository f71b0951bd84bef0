//! Builder for [`Interpreter`].

use rustc_hash::FxHashMap;
use texpand_ir::Block;

use super::Interpreter;
use crate::frame::FrameStack;
use crate::policy::CallbackPolicy;
use crate::registry::Registry;
use crate::sink::EventSink;

/// Configures an interpreter before the sink is attached.
///
/// ```
/// use texpand_eval::{CallbackPolicy, InterpreterBuilder, RecordingSink};
/// use texpand_ir::{Block, StatementNode};
///
/// let document = Block::new(vec![
///     StatementNode::command("emph"),
///     StatementNode::block(vec![StatementNode::word("lazy")]),
/// ]);
/// let mut interpreter = InterpreterBuilder::new(&document)
///     .callback_policy(CallbackPolicy::FollowSuppression)
///     .max_depth(256)
///     .build(RecordingSink::new());
/// interpreter.run()?;
/// assert_eq!(interpreter.sink().kinds(), ["command", "parameter-substituted", "word"]);
/// # Ok::<(), texpand_eval::ExpandError>(())
/// ```
#[derive(Debug)]
pub struct InterpreterBuilder {
    document: Block,
    registry: Option<Registry>,
    callback_policy: CallbackPolicy,
    max_depth: Option<usize>,
    strict_environments: bool,
}

impl InterpreterBuilder {
    pub fn new(document: &Block) -> Self {
        InterpreterBuilder {
            document: document.clone(),
            registry: None,
            callback_policy: CallbackPolicy::default(),
            max_depth: None,
            strict_environments: false,
        }
    }

    /// Start from this registry instead of the built-in vocabulary.
    #[must_use]
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    #[must_use]
    pub fn callback_policy(mut self, policy: CallbackPolicy) -> Self {
        self.callback_policy = policy;
        self
    }

    /// Fail with `FrameLimitExceeded` instead of opening more than `limit` frames.
    #[must_use]
    pub fn max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    /// Fail with `UnbalancedEnvironment` when `\end` does not name the
    /// innermost open environment.
    #[must_use]
    pub fn strict_environments(mut self, strict: bool) -> Self {
        self.strict_environments = strict;
        self
    }

    pub fn build<S: EventSink>(self, sink: S) -> Interpreter<S> {
        Interpreter {
            frames: FrameStack::new(self.document.shared(), self.max_depth),
            registry: self.registry.unwrap_or_default(),
            sink,
            processing: true,
            callback_policy: self.callback_policy,
            strict_environments: self.strict_environments,
            open_environments: Vec::new(),
            store: FxHashMap::default(),
        }
    }
}
