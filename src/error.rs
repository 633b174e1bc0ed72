//! Error handling for preconfig.
//!
//! The core exposes exactly the four error kinds spec'd for the template
//! resolution engine: [`PreconfigError::Syntax`] for malformed templates,
//! [`PreconfigError::Reference`] for values that cannot be resolved,
//! [`PreconfigError::Implementation`] for states that should be
//! impossible, and [`PreconfigError::Validation`] for bad user input at
//! the CLI boundary. [`ErrorContext`] wraps any of these with an optional
//! suggestion and details for colored terminal display; the library core
//! never constructs one itself.

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The error type returned by every fallible operation in the core.
#[derive(Debug, Error)]
pub enum PreconfigError {
    /// The template text itself is malformed: an unmatched `${`, a
    /// control header with the wrong argument count, a forbidden path,
    /// or a missing required path.
    #[error("{message}")]
    Syntax {
        /// Human-readable description, including the offending offset
        /// where one is known.
        message: String,
    },

    /// A control expression could not be resolved: unknown source,
    /// missing parameter/env/self value, or missing file.
    #[error("{}", format_reference_message(.segments))]
    Reference {
        /// One message per unresolved node; usually length 1, but the
        /// fixpoint reducer's final report lists every node still
        /// standing when the template gives up.
        segments: Vec<String>,
    },

    /// An internal invariant was violated (e.g. asking for a path
    /// extraction against a document that is plain text). Callers
    /// should treat this as a bug report, not a user error.
    #[error("internal error: {message}")]
    Implementation {
        /// Description of the invariant that was violated.
        message: String,
    },

    /// User-supplied input was malformed. Raised by the CLI collaborator,
    /// never by the core.
    #[error("invalid input: {message}")]
    Validation {
        /// Description of what was wrong with the input.
        message: String,
    },

    /// Wraps a lower-level I/O failure (besides the `file not found`
    /// case, which is surfaced as [`PreconfigError::Reference`] per
    /// spec).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_reference_message(segments: &[String]) -> String {
    if segments.len() == 1 {
        format!("unresolvable reference: {}", segments[0])
    } else {
        let body =
            segments.iter().map(|s| format!("- {s}")).collect::<Vec<_>>().join("\n");
        format!("unresolvable references:\n{body}")
    }
}

impl PreconfigError {
    /// Construct a [`PreconfigError::Syntax`] error.
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax {
            message: message.into(),
        }
    }

    /// Construct a [`PreconfigError::Reference`] error for a single
    /// unresolvable segment.
    pub fn reference(message: impl Into<String>) -> Self {
        Self::Reference {
            segments: vec![message.into()],
        }
    }

    /// Construct a [`PreconfigError::Reference`] error listing every
    /// segment that failed to resolve.
    pub fn reference_many(segments: Vec<String>) -> Self {
        Self::Reference {
            segments,
        }
    }

    /// Construct a [`PreconfigError::Implementation`] error.
    pub fn implementation(message: impl Into<String>) -> Self {
        Self::Implementation {
            message: message.into(),
        }
    }

    /// Construct a [`PreconfigError::Validation`] error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// A convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PreconfigError>;

/// A user-facing wrapper around a [`PreconfigError`] adding an optional
/// suggestion and additional details, plus colored terminal display.
///
/// Only the CLI layer constructs these; the library core returns bare
/// [`PreconfigError`] values.
pub struct ErrorContext {
    /// The underlying error.
    pub error: PreconfigError,
    /// An actionable suggestion for resolving the error, if one exists.
    pub suggestion: Option<String>,
    /// Additional context about why the error occurred.
    pub details: Option<String>,
}

impl ErrorContext {
    /// Wrap an error with no suggestion or details yet.
    #[must_use]
    pub const fn new(error: PreconfigError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Attach a suggestion, displayed in green.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach additional details, displayed in yellow.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print this error to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{} {}", "error:".red().bold(), self.error.to_string().red());
        if let Some(details) = &self.details {
            eprintln!("{}", details.yellow());
        }
        if let Some(suggestion) = &self.suggestion {
            eprintln!("{} {}", "suggestion:".green().bold(), suggestion.green());
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(details) = &self.details {
            write!(f, "\n{details}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nsuggestion: {suggestion}")?;
        }
        Ok(())
    }
}

/// Convert any [`PreconfigError`] into a display-ready [`ErrorContext`],
/// attaching the suggestions that make sense for each kind.
pub fn user_friendly_error(error: PreconfigError) -> ErrorContext {
    match &error {
        PreconfigError::Syntax {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check that every `${` has a matching `}` and that control headers follow `${source(args):path}`"),
        PreconfigError::Reference {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Check that every `-p key=value`, environment variable, file path, or self-reference used in the template actually exists",
        ),
        PreconfigError::Implementation {
            ..
        } => ErrorContext::new(error)
            .with_details("This indicates a bug in preconfig itself, not in your template"),
        PreconfigError::Validation {
            ..
        } => ErrorContext::new(error).with_suggestion("Parameters must be passed as -p key=value"),
        PreconfigError::Io(_) => ErrorContext::new(error),
    }
}
