//! Texpand Eval - TeX-style macro expansion engine.
//!
//! Walks a pre-parsed [`texpand_ir::Block`] with an explicit frame stack,
//! expanding commands and environments lazily and in place, and reports the
//! result as an ordered stream of [`Event`]s to an [`EventSink`].
//!
//! ```
//! use texpand_eval::{Event, Interpreter, RecordingSink};
//! use texpand_ir::{Block, StatementNode};
//!
//! let document = Block::new(vec![
//!     StatementNode::command("textbf"),
//!     StatementNode::block(vec![StatementNode::word("hi")]),
//! ]);
//! let mut interpreter = Interpreter::new(&document, RecordingSink::new());
//! interpreter.run()?;
//!
//! let events = interpreter.sink().events();
//! assert_eq!(interpreter.sink().kinds(), ["command", "parameter-substituted", "word"]);
//! assert_eq!(events[2], Event::Word("hi".into()));
//! # Ok::<(), texpand_eval::ExpandError>(())
//! ```
//!
//! # Modules
//!
//! - [`frame`]: frame stack, cursor protocol and lookahead
//! - [`registry`]: command/environment tables and the built-in vocabulary
//! - [`interpreter`]: dispatch loop, argument binding, suppression
//! - [`sink`]: event protocol and splicing
//! - [`errors`]: fatal error taxonomy

pub mod errors;
pub mod frame;
pub mod interpreter;
pub mod policy;
pub mod registry;
pub mod sink;

pub use errors::{ErrorKind, ExpandError, ExpandResult, InternalError};
pub use interpreter::{Interpreter, InterpreterBuilder, OpenEnvironment};
pub use policy::CallbackPolicy;
pub use registry::{CommandDefinition, EnvironmentDefinition, MacroDefinition, Registry};
pub use sink::{Event, EventKind, EventSink, NullSink, RecordingSink, Splice};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=texpand_eval=debug` or `RUST_LOG=texpand_eval=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
