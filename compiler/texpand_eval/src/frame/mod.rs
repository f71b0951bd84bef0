//! Frame stack and cursor engine.
//!
//! Expansion never materializes an expanded tree. Macro bodies, environment
//! pre/postambles and substituted arguments are pushed as frames over the
//! original (shared) statement slices, and the interpreter always reads from
//! the innermost frame first.
//!
//! Each frame keeps two positions:
//!
//! - `cursor`: the committed position, i.e. the node currently executing;
//! - `consumed`: the next node to read.
//!
//! `consume()` only moves `consumed`; `advance()` commits it and retires every
//! frame whose cursor has run past its sentinel. Frames beneath the top keep
//! their cursor on the node that pushed the frames above them, which is what
//! lets [`FrameStack::peek`] look "just past" a command still in progress.
//!
//! Every frame runs in a [`Scope`]: the arguments its `#k` references resolve
//! to, chained to the scope those arguments were written in.

use std::rc::Rc;

use texpand_ir::{Parameters, StatementNode};
use tracing::trace;

use crate::errors::{frame_limit_exceeded, stack_underflow, ExpandResult};

/// Argument bindings of one invocation.
///
/// An argument is text written at the call site, so when `#k` is substituted
/// the argument runs in the caller's scope, not in the scope that bound it.
/// This is what lets `{#1}` be handed on to a nested macro and still mean
/// the outer macro's first argument.
#[derive(Debug)]
pub struct Scope {
    arguments: Parameters,
    caller: Option<Rc<Scope>>,
}

impl Scope {
    /// The document-level scope: nothing bound.
    pub fn root() -> Rc<Self> {
        Rc::new(Scope {
            arguments: Rc::from(Vec::new()),
            caller: None,
        })
    }

    /// Bind `arguments` for a body invoked from `caller`.
    pub fn bind(arguments: Parameters, caller: &Rc<Scope>) -> Rc<Self> {
        Rc::new(Scope {
            arguments,
            caller: Some(Rc::clone(caller)),
        })
    }

    pub fn arguments(&self) -> &Parameters {
        &self.arguments
    }

    /// Scope the arguments were written in.
    pub fn caller(&self) -> Rc<Scope> {
        self.caller.clone().unwrap_or_else(Scope::root)
    }
}

/// One activation record.
#[derive(Clone, Debug)]
pub struct Frame {
    /// The statements, without the trailing sentinel (it is implicit).
    statements: Rc<[StatementNode]>,
    /// Committed read position.
    cursor: usize,
    /// Next-to-read position.
    consumed: usize,
    /// Bindings visible to `#k` references interpreted in this frame.
    scope: Rc<Scope>,
}

impl Frame {
    fn new(statements: Rc<[StatementNode]>, scope: Rc<Scope>) -> Self {
        Frame {
            statements,
            cursor: 0,
            consumed: 0,
            scope,
        }
    }

    /// Length including the sentinel.
    #[inline]
    fn len(&self) -> usize {
        self.statements.len() + 1
    }

    /// Node at `index`, synthesizing the sentinel at the end.
    #[inline]
    fn node_at(&self, index: usize) -> Option<StatementNode> {
        match index.cmp(&self.statements.len()) {
            std::cmp::Ordering::Less => Some(self.statements[index].clone()),
            std::cmp::Ordering::Equal => Some(StatementNode::SentinelEnd),
            std::cmp::Ordering::Greater => None,
        }
    }

    #[inline]
    fn is_exhausted(&self) -> bool {
        self.cursor >= self.len()
    }
}

/// Stack of frames, innermost last.
#[derive(Debug, Default)]
pub struct FrameStack {
    frames: Vec<Frame>,
    /// Maximum number of simultaneously open frames, if bounded.
    limit: Option<usize>,
}

impl FrameStack {
    /// A stack with a single frame over `root` in the root scope.
    pub fn new(root: Rc<[StatementNode]>, limit: Option<usize>) -> Self {
        FrameStack {
            frames: vec![Frame::new(root, Scope::root())],
            limit,
        }
    }

    /// `true` once every frame has been retired.
    #[inline]
    pub fn end_of_input(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Scope of the innermost frame (the root scope if the stack is empty).
    pub fn active_scope(&self) -> Rc<Scope> {
        self.frames
            .last()
            .map_or_else(Scope::root, |frame| Rc::clone(&frame.scope))
    }

    /// The next due node, without consuming it.
    ///
    /// Walks from the innermost frame outwards. The innermost frame is read at
    /// its cursor; every outer frame is read one past its cursor, because its
    /// cursor still sits on the node whose expansion opened the frames above.
    /// Returns `None` once the whole stack is exhausted.
    pub fn peek(&self) -> Option<StatementNode> {
        let mut offset = 0;
        for frame in self.frames.iter().rev() {
            if let Some(node) = frame.node_at(frame.cursor + offset) {
                return Some(node);
            }
            offset = 1;
        }
        None
    }

    /// Move the innermost frame's read pointer forward by one.
    pub fn consume(&mut self) -> ExpandResult<()> {
        let frame = self
            .frames
            .last_mut()
            .ok_or_else(|| stack_underflow("consume"))?;
        frame.consumed += 1;
        Ok(())
    }

    /// Commit the innermost read pointer and retire finished frames.
    ///
    /// A single call may pop several frames; each newly exposed frame has its
    /// cursor re-committed from its own read pointer.
    pub fn advance(&mut self) {
        let Some(top) = self.frames.last_mut() else {
            return;
        };
        top.cursor = top.consumed;
        while self.frames.last().is_some_and(Frame::is_exhausted) {
            self.frames.pop();
            trace!(depth = self.frames.len(), "retired frame");
            if let Some(top) = self.frames.last_mut() {
                top.cursor = top.consumed;
            }
        }
    }

    /// `peek` + `consume` + `advance`: take one raw node and settle the stack.
    pub fn read(&mut self) -> ExpandResult<Option<StatementNode>> {
        let node = self.peek();
        if node.is_some() {
            self.consume()?;
            self.advance();
        }
        Ok(node)
    }

    /// Open a frame over `statements`; it runs before the rest of the frame beneath.
    pub fn push(&mut self, statements: Rc<[StatementNode]>, scope: Rc<Scope>) -> ExpandResult<()> {
        if let Some(limit) = self.limit {
            if self.frames.len() >= limit {
                return Err(frame_limit_exceeded(limit));
            }
        }
        trace!(
            depth = self.frames.len() + 1,
            len = statements.len(),
            params = scope.arguments.len(),
            "pushed frame"
        );
        self.frames.push(Frame::new(statements, scope));
        Ok(())
    }

    /// Statements of the innermost frame from its read pointer up to (not
    /// including) the sentinel.
    pub fn pending(&self) -> &[StatementNode] {
        match self.frames.last() {
            Some(frame) => frame.statements.get(frame.consumed..).unwrap_or(&[]),
            None => &[],
        }
    }

    /// Skip `count` nodes of the innermost frame and settle the stack.
    pub fn skip(&mut self, count: usize) -> ExpandResult<()> {
        let frame = self
            .frames
            .last_mut()
            .ok_or_else(|| stack_underflow("skip"))?;
        frame.consumed += count;
        self.advance();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
