//! Argument binding.
//!
//! Arguments are read off the stream right after the invoking command:
//! optional `[...]` groups first, then exactly `arity` consecutive `{...}`
//! groups. The bound blocks are shared with the document, never copied.

use smallvec::SmallVec;
use texpand_ir::{Block, Parameters, StatementNode, Text};

use super::Interpreter;
use crate::errors::{arity_mismatch, parameter_out_of_range, ExpandResult};
use crate::sink::{Event, EventSink};

impl<S: EventSink> Interpreter<S> {
    /// Optional groups: those attached to the invocation node, then any
    /// bracket groups that immediately follow it in the innermost frame.
    ///
    /// A `[` without a matching `]` in the same frame is left in the stream.
    pub(super) fn read_optional_groups(&mut self, attached: &[Block]) -> ExpandResult<Parameters> {
        let mut groups: SmallVec<[Block; 2]> = attached.iter().cloned().collect();
        while let Some((group, span)) = bracket_group(self.frames.pending()) {
            groups.push(group);
            self.frames.skip(span)?;
        }
        Ok(groups.into_iter().collect())
    }

    /// Exactly `arity` consecutive groups, or `ArityMismatch`.
    pub(super) fn read_mandatory(&mut self, name: &Text, arity: usize) -> ExpandResult<Parameters> {
        let mut args: SmallVec<[Block; 2]> = SmallVec::new();
        while args.len() < arity {
            let Some(StatementNode::Block(block)) = self.frames.peek() else {
                return Err(arity_mismatch(name, arity, args.len()));
            };
            self.frames.consume()?;
            self.frames.advance();
            args.push(block);
        }
        Ok(args.into_iter().collect())
    }

    /// Replace `#index` by the matching argument of the active frame.
    ///
    /// The argument runs in the scope it was written in, so `#k` inside it
    /// refers to the invoking body's arguments, however deep it is passed on.
    pub(super) fn substitute_parameter(&mut self, index: usize) -> ExpandResult<()> {
        let scope = self.frames.active_scope();
        let arguments = scope.arguments();
        let argument = index
            .checked_sub(1)
            .and_then(|slot| arguments.get(slot))
            .map(Block::shared)
            .ok_or_else(|| parameter_out_of_range(index, arguments.len()))?;
        self.frames.push(argument, scope.caller())?;
        self.emit(Event::ParameterSubstituted(index))
    }
}

/// A nesting-aware `[ ... ]` group at the head of `pending`.
///
/// Returns the group contents and the number of nodes it spans, brackets
/// included.
fn bracket_group(pending: &[StatementNode]) -> Option<(Block, usize)> {
    if !pending.first()?.is_open_bracket() {
        return None;
    }
    let mut depth = 0usize;
    for (index, node) in pending.iter().enumerate() {
        if node.is_open_bracket() {
            depth += 1;
        } else if node.is_close_bracket() {
            depth -= 1;
            if depth == 0 {
                return Some((Block::new(pending[1..index].to_vec()), index + 1));
            }
        }
    }
    None
}
