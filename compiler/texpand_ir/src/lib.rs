//! Texpand IR - statement nodes consumed by the expansion engine.
//!
//! An external tokenizer turns markup into a forest of [`StatementNode`]s.
//! The engine in `texpand_eval` walks that forest without ever mutating it.
//!
//! # Design Philosophy
//!
//! - **Share, don't copy**: node payloads are reference counted, so cloning a
//!   node (or a whole [`Block`]) is O(1). Frames, bound parameters and
//!   registered macro bodies all point into the same immutable tree.
//! - **Closed set of node kinds**: every construct the engine understands is a
//!   variant of [`StatementNode`]; there is no dynamic node type.

mod callback;
mod node;

pub use callback::Callback;
pub use node::{Block, Parameters, StatementNode, Text};
