//! Built-in vocabulary every interpreter starts with.
//!
//! Ideally this would come from interpreting a format file. It doesn't; the
//! seed is a fixed table of the structural commands real documents lean on.

use texpand_ir::Block;

use super::{CommandDefinition, Registry};

/// Environments that take no arguments.
const PLAIN_ENVIRONMENTS: &[&str] = &[
    "document",
    "itemize",
    "enumerate",
    "description",
    "figure",
    "figure*",
    "table",
    "table*",
    "center",
    "abstract",
];

/// Environments that take one argument (sectioning, column specs).
const TITLED_ENVIRONMENTS: &[&str] = &[
    "section",
    "section*",
    "subsection",
    "subsection*",
    "subsubsection",
    "subsubsection*",
    "subsubsubsection",
    "subsubsubsection*",
    "paragraph",
    "paragraph*",
    "tabular",
];

/// Macros with an empty body: `(name, arity)`.
const SILENT_MACROS: &[(&str, usize)] = &[
    ("documentclass", 1),
    ("usepackage", 1),
    ("PassOptionsToPackage", 2),
    ("relax", 0),
    ("maketitle", 0),
    ("item", 0),
];

/// One-argument macros whose body is `#1`.
const IDENTITY_WRAPPERS: &[&str] = &["textbf", "emph", "texttt", "textit"];

const RUNTIME_DEFINERS: &[&str] = &["newcommand", "newcommand*", "renewcommand", "renewcommand*"];

const NO_OPS: &[&str] = &[
    "else",
    "pdfoutput",
    "pdfcompresslevel",
    "pdfoptionpdfminorversion",
    "ExecuteOptions",
    "DeclareGraphicsExtensions",
];

pub(super) fn seed(registry: &mut Registry) {
    for name in PLAIN_ENVIRONMENTS {
        registry.register_environment(name, 0, Block::empty(), Block::empty());
    }
    for name in TITLED_ENVIRONMENTS {
        registry.register_environment(name, 1, Block::empty(), Block::empty());
    }
    for &(name, arity) in SILENT_MACROS {
        registry.register_command(name, arity, Block::empty());
    }
    for name in IDENTITY_WRAPPERS {
        registry.register_command(name, 1, Block::parameter(1));
    }
    for name in RUNTIME_DEFINERS {
        registry.define_command(name, CommandDefinition::RuntimeDefine);
    }
    for name in NO_OPS {
        registry.define_command(name, CommandDefinition::NoOp);
    }

    registry.define_command("begin", CommandDefinition::BeginEnvironment);
    registry.define_command("end", CommandDefinition::EndEnvironment);

    // Suppression is not conditional: both branches of `\ifpdf ... \else ... \fi`
    // are traversed silently.
    registry.define_command("ifpdf", CommandDefinition::StartSuppress);
    registry.define_command("fi", CommandDefinition::StopSuppress);
}
