//! Event protocol between the engine and a renderer.
//!
//! The engine reports everything it interprets through a single
//! [`EventSink::emit`] call per construct, strictly in document order. A sink
//! answers by optionally filling a [`Splice`]: replacement statements (usually
//! [`StatementNode::Echo`] output and [`StatementNode::Callback`] markers)
//! that the engine pushes as a new frame right after the event, so the
//! renderer never has to call back into the interpreter.
//!
//! Two ready-made sinks are provided:
//! - [`RecordingSink`]: keeps every event (tests, debugging)
//! - [`NullSink`]: discards everything
//!
//! Any `FnMut(&Event, &mut Splice)` closure is a sink as well.

use texpand_ir::{Block, Callback, Parameters, StatementNode, Text};

/// One interpreted construct.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Word(Text),
    Number(Text),
    Punctuation(Text),
    Whitespace,
    LineBreak,
    MathToggle,
    /// A `{ ... }` group was opened.
    BlockEntered,
    /// `#index` was replaced by its argument.
    ParameterSubstituted(usize),
    /// A user macro was invoked.
    Command {
        name: Text,
        args: Parameters,
        optional: Parameters,
    },
    EnvironmentBegin {
        name: Text,
        args: Parameters,
        optional: Parameters,
    },
    EnvironmentEnd {
        name: Text,
        args: Parameters,
    },
    /// A spliced callback was reached.
    Callback,
    /// Spliced renderer output.
    Echo(Text),
}

/// Event discriminant, for filtering and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Word,
    Number,
    Punctuation,
    Whitespace,
    LineBreak,
    MathToggle,
    BlockEntered,
    ParameterSubstituted,
    Command,
    EnvironmentBegin,
    EnvironmentEnd,
    Callback,
    Echo,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Word => "word",
            EventKind::Number => "number",
            EventKind::Punctuation => "punctuation",
            EventKind::Whitespace => "whitespace",
            EventKind::LineBreak => "linebreak",
            EventKind::MathToggle => "math-toggle",
            EventKind::BlockEntered => "block-entered",
            EventKind::ParameterSubstituted => "parameter-substituted",
            EventKind::Command => "command",
            EventKind::EnvironmentBegin => "environment-begin",
            EventKind::EnvironmentEnd => "environment-end",
            EventKind::Callback => "callback",
            EventKind::Echo => "echo",
        }
    }
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Word(_) => EventKind::Word,
            Event::Number(_) => EventKind::Number,
            Event::Punctuation(_) => EventKind::Punctuation,
            Event::Whitespace => EventKind::Whitespace,
            Event::LineBreak => EventKind::LineBreak,
            Event::MathToggle => EventKind::MathToggle,
            Event::BlockEntered => EventKind::BlockEntered,
            Event::ParameterSubstituted(_) => EventKind::ParameterSubstituted,
            Event::Command { .. } => EventKind::Command,
            Event::EnvironmentBegin { .. } => EventKind::EnvironmentBegin,
            Event::EnvironmentEnd { .. } => EventKind::EnvironmentEnd,
            Event::Callback => EventKind::Callback,
            Event::Echo(_) => EventKind::Echo,
        }
    }
}

/// Replacement statements requested by a sink in answer to one event.
#[derive(Debug, Default)]
pub struct Splice {
    nodes: Vec<StatementNode>,
}

impl Splice {
    pub fn push(&mut self, node: StatementNode) -> &mut Self {
        self.nodes.push(node);
        self
    }

    /// Append verbatim output.
    pub fn echo(&mut self, text: &str) -> &mut Self {
        self.push(StatementNode::echo(text))
    }

    /// Append a callback marker.
    pub fn callback(&mut self, f: impl Fn() + 'static) -> &mut Self {
        self.push(StatementNode::Callback(Callback::new(f)))
    }

    /// Append the statements of a block (e.g. an argument to re-emit).
    pub fn extend_block(&mut self, block: &Block) -> &mut Self {
        self.nodes.extend(block.statements().iter().cloned());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn into_nodes(self) -> Vec<StatementNode> {
        self.nodes
    }
}

/// Receiver of interpreted content.
pub trait EventSink {
    /// Called once per interpreted construct while processing is enabled.
    fn emit(&mut self, event: &Event, splice: &mut Splice);
}

impl<F> EventSink for F
where
    F: FnMut(&Event, &mut Splice),
{
    fn emit(&mut self, event: &Event, splice: &mut Splice) {
        self(event, splice);
    }
}

/// Sink that keeps every event.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<Event>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// Kind names in emission order.
    pub fn kinds(&self) -> Vec<&'static str> {
        self.events.iter().map(|e| e.kind().as_str()).collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &Event, _splice: &mut Splice) {
        self.events.push(event.clone());
    }
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &Event, _splice: &mut Splice) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    #[test]
    fn recording_sink_keeps_order() {
        let mut sink = RecordingSink::new();
        let mut splice = Splice::default();
        sink.emit(&Event::Word(Rc::from("a")), &mut splice);
        sink.emit(&Event::Whitespace, &mut splice);
        sink.emit(&Event::Punctuation(Rc::from(".")), &mut splice);

        assert_eq!(sink.kinds(), vec!["word", "whitespace", "punctuation"]);
        assert!(splice.is_empty());

        sink.clear();
        assert!(sink.events().is_empty());
    }

    #[test]
    fn closure_sink_can_splice() {
        let mut sink = |event: &Event, splice: &mut Splice| {
            if let Event::Word(w) = event {
                splice.echo("<").extend_block(&Block::new(vec![StatementNode::Word(w.clone())]));
                splice.echo(">");
            }
        };
        let mut splice = Splice::default();
        sink.emit(&Event::Word(Rc::from("x")), &mut splice);

        assert_eq!(
            splice.into_nodes(),
            vec![
                StatementNode::echo("<"),
                StatementNode::word("x"),
                StatementNode::echo(">"),
            ]
        );
    }

    #[test]
    fn null_sink_ignores_events() {
        let mut splice = Splice::default();
        NullSink.emit(&Event::LineBreak, &mut splice);
        assert!(splice.is_empty());
    }

    #[test]
    fn kind_names() {
        assert_eq!(Event::MathToggle.kind().as_str(), "math-toggle");
        assert_eq!(
            Event::ParameterSubstituted(1).kind().as_str(),
            "parameter-substituted"
        );
        assert_eq!(
            Event::EnvironmentEnd {
                name: Rc::from("itemize"),
                args: Rc::from(Vec::new()),
            }
            .kind(),
            EventKind::EnvironmentEnd
        );
    }
}
