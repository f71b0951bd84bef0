//! Statement nodes and blocks.

use std::fmt;
use std::rc::Rc;

use crate::Callback;

/// Shared, immutable text payload (words, numbers, command names).
pub type Text = Rc<str>;

/// Arguments of one invocation, in `#1`, `#2`, ... order.
///
/// The same list is reported in the event and bound to the frames that read it.
pub type Parameters = Rc<[Block]>;

/// One statement of the input forest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatementNode {
    /// A run of letters.
    Word(Text),
    /// A numeric literal, kept verbatim.
    Number(Text),
    /// Any punctuation token, including `[`, `]` and escaped symbols.
    Punctuation(Text),
    /// Inter-word space.
    Whitespace,
    /// A source line break.
    LineBreak,
    /// `$`.
    MathToggle,
    /// `#k`, 1-indexed.
    ParameterReference(usize),
    /// A `{ ... }` group.
    Block(Block),
    /// `\name[opt]...`. The name is stored without the backslash.
    CommandInvocation {
        name: Text,
        optional_args: Rc<[Block]>,
    },
    /// Verbatim renderer output spliced into the stream.
    Echo(Text),
    /// Renderer callback spliced into the stream.
    Callback(Callback),
    /// End of a frame. Never produced by a tokenizer.
    SentinelEnd,
}

impl StatementNode {
    pub fn word(text: &str) -> Self {
        StatementNode::Word(Rc::from(text))
    }

    pub fn number(text: &str) -> Self {
        StatementNode::Number(Rc::from(text))
    }

    pub fn punctuation(text: &str) -> Self {
        StatementNode::Punctuation(Rc::from(text))
    }

    pub fn parameter(index: usize) -> Self {
        StatementNode::ParameterReference(index)
    }

    pub fn block(children: Vec<StatementNode>) -> Self {
        StatementNode::Block(Block::new(children))
    }

    /// A command invocation without attached optional arguments.
    pub fn command(name: &str) -> Self {
        Self::command_with_optional(name, Vec::new())
    }

    /// A command invocation whose optional arguments were attached by the grammar.
    pub fn command_with_optional(name: &str, optional_args: Vec<Block>) -> Self {
        StatementNode::CommandInvocation {
            name: Rc::from(name),
            optional_args: Rc::from(optional_args),
        }
    }

    pub fn echo(text: &str) -> Self {
        StatementNode::Echo(Rc::from(text))
    }

    pub fn callback(f: impl Fn() + 'static) -> Self {
        StatementNode::Callback(Callback::new(f))
    }

    /// The block payload, if this is a `Block`.
    #[inline]
    pub fn as_block(&self) -> Option<&Block> {
        match self {
            StatementNode::Block(block) => Some(block),
            _ => None,
        }
    }

    /// `true` for `[`.
    #[inline]
    pub fn is_open_bracket(&self) -> bool {
        matches!(self, StatementNode::Punctuation(p) if &**p == "[")
    }

    /// `true` for `]`.
    #[inline]
    pub fn is_close_bracket(&self) -> bool {
        matches!(self, StatementNode::Punctuation(p) if &**p == "]")
    }

    /// Flatten this node back into source-like text.
    ///
    /// Blocks contribute their children without braces; commands contribute
    /// `\name` without their optional arguments. Renderer-only nodes
    /// contribute nothing.
    pub fn as_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            StatementNode::Word(t) | StatementNode::Number(t) | StatementNode::Punctuation(t) => {
                out.push_str(t);
            }
            StatementNode::Whitespace => out.push(' '),
            StatementNode::LineBreak => out.push('\n'),
            StatementNode::MathToggle => out.push('$'),
            StatementNode::ParameterReference(k) => {
                out.push('#');
                out.push_str(&k.to_string());
            }
            StatementNode::Block(block) => block.collect_text(out),
            StatementNode::CommandInvocation { name, .. } => {
                out.push('\\');
                out.push_str(name);
            }
            StatementNode::Echo(_) | StatementNode::Callback(_) | StatementNode::SentinelEnd => {}
        }
    }
}

/// An immutable, cheaply clonable sequence of statements.
#[derive(Clone, PartialEq, Eq)]
pub struct Block {
    statements: Rc<[StatementNode]>,
}

impl Block {
    pub fn new(statements: Vec<StatementNode>) -> Self {
        Block {
            statements: Rc::from(statements),
        }
    }

    /// A block with no statements.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// A block holding a single `#k` reference, the body of identity wrappers.
    pub fn parameter(index: usize) -> Self {
        Self::new(vec![StatementNode::ParameterReference(index)])
    }

    #[inline]
    pub fn statements(&self) -> &[StatementNode] {
        &self.statements
    }

    /// The shared statement slice, for pushing as a frame.
    #[inline]
    pub fn shared(&self) -> Rc<[StatementNode]> {
        Rc::clone(&self.statements)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// The word of a block made of exactly one `Word`, e.g. `{itemize}`.
    pub fn single_word(&self) -> Option<&Text> {
        match &*self.statements {
            [StatementNode::Word(word)] => Some(word),
            _ => None,
        }
    }

    /// Concatenated text of all statements (see [`StatementNode::as_text`]).
    pub fn as_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for statement in self.statements.iter() {
            statement.collect_text(out);
        }
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<StatementNode>> for Block {
    fn from(statements: Vec<StatementNode>) -> Self {
        Block::new(statements)
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.statements.iter()).finish()
    }
}

#[cfg(test)]
mod tests;
