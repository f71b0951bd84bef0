//! Centralized error type and constructors for the expansion engine.
//!
//! Every error is fatal: `run()` stops at the first one and hands it back to
//! the caller. Engine code never builds `ExpandError` variants directly; it
//! goes through the constructor functions below so that messages stay in one
//! place.

use texpand_ir::Text;
use thiserror::Error;

/// Result of an engine operation.
pub type ExpandResult<T> = Result<T, ExpandError>;

/// A fatal expansion error.
///
/// All variants except [`ExpandError::Internal`] point at the document or at
/// missing vocabulary; `Internal` means the engine itself is broken.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExpandError {
    #[error("undefined command `\\{name}`")]
    UnknownCommand { name: Text },

    #[error("undefined environment `{name}`")]
    UnknownEnvironment { name: Text },

    #[error("`{name}` expects {expected} argument(s), found {found}")]
    ArityMismatch {
        name: Text,
        expected: usize,
        found: usize,
    },

    #[error("`\\{command}` needs a single word naming the environment, got `{got}`")]
    MalformedEnvironmentName { command: Text, got: String },

    #[error("parameter #{index} used but only {bound} argument(s) are bound")]
    ParameterOutOfRange { index: usize, bound: usize },

    #[error("malformed definition via `\\{command}`: {reason}")]
    MalformedRuntimeDefinition { command: Text, reason: String },

    /// Only raised when strict environment matching is enabled.
    #[error("`\\end{{{found}}}` does not close {}", describe_open(.expected.as_deref()))]
    UnbalancedEnvironment {
        expected: Option<Text>,
        found: Text,
    },

    #[error("expansion exceeded the frame limit of {limit}")]
    FrameLimitExceeded { limit: usize },

    #[error("internal engine error: {0}")]
    Internal(#[from] InternalError),
}

/// Engine invariant violations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum InternalError {
    #[error("frame stack underflow during `{operation}`")]
    StackUnderflow { operation: &'static str },
}

/// Fieldless mirror of [`ExpandError`] for matching without destructuring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownCommand,
    UnknownEnvironment,
    ArityMismatch,
    MalformedEnvironmentName,
    ParameterOutOfRange,
    MalformedRuntimeDefinition,
    UnbalancedEnvironment,
    FrameLimitExceeded,
    Internal,
}

impl ExpandError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownCommand { .. } => ErrorKind::UnknownCommand,
            Self::UnknownEnvironment { .. } => ErrorKind::UnknownEnvironment,
            Self::ArityMismatch { .. } => ErrorKind::ArityMismatch,
            Self::MalformedEnvironmentName { .. } => ErrorKind::MalformedEnvironmentName,
            Self::ParameterOutOfRange { .. } => ErrorKind::ParameterOutOfRange,
            Self::MalformedRuntimeDefinition { .. } => ErrorKind::MalformedRuntimeDefinition,
            Self::UnbalancedEnvironment { .. } => ErrorKind::UnbalancedEnvironment,
            Self::FrameLimitExceeded { .. } => ErrorKind::FrameLimitExceeded,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// `true` for engine bugs as opposed to document errors.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }
}

fn describe_open(expected: Option<&str>) -> String {
    match expected {
        Some(name) => format!("the open environment `{name}`"),
        None => "any open environment".to_string(),
    }
}

// Document errors

pub fn unknown_command(name: &Text) -> ExpandError {
    ExpandError::UnknownCommand { name: name.clone() }
}

pub fn unknown_environment(name: &Text) -> ExpandError {
    ExpandError::UnknownEnvironment { name: name.clone() }
}

pub fn arity_mismatch(name: &Text, expected: usize, found: usize) -> ExpandError {
    ExpandError::ArityMismatch {
        name: name.clone(),
        expected,
        found,
    }
}

pub fn malformed_environment_name(command: &Text, got: String) -> ExpandError {
    ExpandError::MalformedEnvironmentName {
        command: command.clone(),
        got,
    }
}

pub fn parameter_out_of_range(index: usize, bound: usize) -> ExpandError {
    ExpandError::ParameterOutOfRange { index, bound }
}

pub fn malformed_runtime_definition(command: &Text, reason: impl Into<String>) -> ExpandError {
    ExpandError::MalformedRuntimeDefinition {
        command: command.clone(),
        reason: reason.into(),
    }
}

pub fn unbalanced_environment(expected: Option<Text>, found: &Text) -> ExpandError {
    ExpandError::UnbalancedEnvironment {
        expected,
        found: found.clone(),
    }
}

// Resource limits

pub fn frame_limit_exceeded(limit: usize) -> ExpandError {
    ExpandError::FrameLimitExceeded { limit }
}

// Engine bugs

pub fn stack_underflow(operation: &'static str) -> ExpandError {
    InternalError::StackUnderflow { operation }.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn display_names_the_offender() {
        let err = unknown_command(&Rc::from("frobnicate"));
        assert_eq!(err.to_string(), "undefined command `\\frobnicate`");

        let err = arity_mismatch(&Rc::from("textbf"), 1, 0);
        assert_eq!(err.to_string(), "`textbf` expects 1 argument(s), found 0");
    }

    #[test]
    fn unbalanced_environment_message() {
        let err = unbalanced_environment(Some(Rc::from("itemize")), &Rc::from("table"));
        assert_eq!(
            err.to_string(),
            "`\\end{table}` does not close the open environment `itemize`"
        );

        let err = unbalanced_environment(None, &Rc::from("table"));
        assert_eq!(
            err.to_string(),
            "`\\end{table}` does not close any open environment"
        );
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(
            parameter_out_of_range(3, 1).kind(),
            ErrorKind::ParameterOutOfRange
        );
        assert_eq!(frame_limit_exceeded(8).kind(), ErrorKind::FrameLimitExceeded);
        assert!(!unknown_environment(&Rc::from("x")).is_internal());
    }

    #[test]
    fn internal_errors_are_flagged() {
        let err = stack_underflow("consume");
        assert!(err.is_internal());
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(
            err.to_string(),
            "internal engine error: frame stack underflow during `consume`"
        );
    }
}
