use std::path::PathBuf;

use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The variants fall into three groups. Lookup failures are reported by the query commands
/// when an identifier does not resolve; their `Display` text is exactly the message printed on
/// the error stream. Loading failures come from a [`crate::provider::MetadataProvider`] and
/// abort a command before any query runs. Usage failures cover missing required arguments and
/// unknown command names.
///
/// # Error Categories
///
/// ## Lookup Errors
/// - [`Error::TypeNotFound`] - A type identifier did not resolve in any resolution stage
/// - [`Error::ReferenceTypeNotFound`] - The reference type of `implements` did not resolve
/// - [`Error::MemberNotFound`] - No method, property, field or event carried the name
/// - [`Error::MethodNotFound`] - No method survived the name and parameter filters
///
/// ## Usage Errors
/// - [`Error::MissingArgument`] - A required option or positional value was not supplied
/// - [`Error::UnknownCommand`] - The command name is not one of the supported commands
///
/// ## Loading Errors
/// - [`Error::ModuleNotFound`] - The module path does not exist
/// - [`Error::Malformed`] - The metadata snapshot is structurally invalid
/// - [`Error::FileError`] - Filesystem I/O errors
/// - [`Error::Json`] - The metadata snapshot is not valid JSON
///
/// # Examples
///
/// ```rust
/// use dotinspect::Error;
///
/// let error = Error::MissingArgument("Pattern");
/// assert_eq!(error.to_string(), "Pattern required");
/// assert_eq!(Error::TypeNotFound.to_string(), "Type not found");
/// ```
#[derive(Error, Debug)]
pub enum Error {
    // Lookup errors
    /// The requested type could not be resolved.
    #[error("Type not found")]
    TypeNotFound,

    /// The reference type of an assignability query could not be resolved.
    #[error("Reference type not found")]
    ReferenceTypeNotFound,

    /// No member of the requested name exists on the resolved type.
    #[error("Member not found")]
    MemberNotFound,

    /// No method matched the requested name and parameter list.
    #[error("Method not found")]
    MethodNotFound,

    // Usage errors
    /// A required argument was not supplied.
    ///
    /// The payload names the missing argument, e.g. `"Method name"`.
    #[error("{0} required")]
    MissingArgument(&'static str),

    /// The command name is not supported.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    // Loading errors
    /// The module file does not exist.
    #[error("Module not found: {}", .0.display())]
    ModuleNotFound(PathBuf),

    /// The metadata snapshot is damaged and could not be interpreted.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// Wrapper around filesystem errors.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Wrapper around JSON (de)serialization errors.
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for miscellaneous failures.
    #[error("{0}")]
    Error(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_messages_are_user_facing() {
        assert_eq!(Error::TypeNotFound.to_string(), "Type not found");
        assert_eq!(
            Error::ReferenceTypeNotFound.to_string(),
            "Reference type not found"
        );
        assert_eq!(Error::MemberNotFound.to_string(), "Member not found");
        assert_eq!(Error::MethodNotFound.to_string(), "Method not found");
    }

    #[test]
    fn usage_messages() {
        assert_eq!(
            Error::MissingArgument("Method name").to_string(),
            "Method name required"
        );
        assert_eq!(
            Error::UnknownCommand("frobnicate".to_string()).to_string(),
            "Unknown command: frobnicate"
        );
    }

    #[test]
    fn malformed_macro_records_location() {
        let error = malformed_error!("bad entry {}", 3);
        match error {
            Error::Malformed { message, file, .. } => {
                assert_eq!(message, "bad entry 3");
                assert!(file.ends_with("error.rs"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
