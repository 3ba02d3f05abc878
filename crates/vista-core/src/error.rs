//! Error types shared by the runtime.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Shape mismatch | Destination has no field with the source field's name | `copy_into` returns `ShapeMismatch`, destination untouched |
//! | Type mismatch | Same name, different value type | `copy_into` returns `TypeMismatch`, destination untouched |
//! | Kind mismatch | Same name, container on one side only | `copy_into` returns `KindMismatch`, destination untouched |
//! | Unknown command | Name not in the command table | `execute` returns `Unknown` |
//! | Disabled command | Guard reports the command cannot run | `execute` returns `Disabled` |

use std::fmt;

/// Errors from copying between two state shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyError {
    /// The destination exposes no field with this name.
    ShapeMismatch { field: &'static str },
    /// Both sides have the field but hold different value types.
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    /// One side treats the field as an observable container, the other does
    /// not.
    KindMismatch { field: &'static str },
}

impl CopyError {
    /// Name of the field that failed to resolve.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::ShapeMismatch { field }
            | Self::TypeMismatch { field, .. }
            | Self::KindMismatch { field } => field,
        }
    }
}

impl fmt::Display for CopyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch { field } => {
                write!(f, "shape mismatch: destination has no field '{field}'")
            }
            Self::TypeMismatch {
                field,
                expected,
                found,
            } => write!(
                f,
                "type mismatch on field '{field}': destination holds {expected}, source holds {found}"
            ),
            Self::KindMismatch { field } => write!(
                f,
                "kind mismatch on field '{field}': container and plain value are not interchangeable"
            ),
        }
    }
}

impl std::error::Error for CopyError {}

/// Errors from invoking a bound command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// No command is registered under this name.
    Unknown(String),
    /// The command's guard reported it cannot execute right now.
    Disabled(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(name) => write!(f, "unknown command: {name}"),
            Self::Disabled(name) => write!(f, "command cannot execute: {name}"),
        }
    }
}

impl std::error::Error for CommandError {}

/// Result alias for command invocation.
pub type CommandResult = Result<(), CommandError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_error_display() {
        let err = CopyError::ShapeMismatch { field: "tags" };
        assert_eq!(
            err.to_string(),
            "shape mismatch: destination has no field 'tags'"
        );
        assert_eq!(err.field(), "tags");

        let err = CopyError::TypeMismatch {
            field: "count",
            expected: "u32",
            found: "i64",
        };
        assert!(err.to_string().contains("destination holds u32"));
        assert_eq!(err.field(), "count");
    }

    #[test]
    fn command_error_display() {
        assert_eq!(
            CommandError::Unknown("save".into()).to_string(),
            "unknown command: save"
        );
        assert_eq!(
            CommandError::Disabled("save".into()).to_string(),
            "command cannot execute: save"
        );
    }

    #[test]
    fn errors_are_std_errors() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&CopyError::KindMismatch { field: "x" });
        assert_error(&CommandError::Unknown("x".into()));
    }
}
