/// Errors surfaced by command dispatch.
use std::io;

use thiserror::Error;

/// Every fatal outcome of resolving, parsing or running a command.
///
/// `Display` renders the raw failure message; the `Error: ` prefix is added
/// only when the dispatcher reports it on the error stream.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A positional token matched no child, or was given to a command that
    /// accepts no arguments.
    #[error("unknown command {token:?} for {path:?}{suggestions}")]
    UnknownCommand {
        /// The offending token.
        token: String,
        /// Space-separated path of the command that rejected it.
        path: String,
        /// Rendered "Did you mean this?" block, or empty.
        suggestions: String,
    },

    /// `--name` is not declared on the resolved command.
    #[error("unknown flag: --{name}")]
    UnknownFlag {
        /// Flag name without dashes.
        name: String,
    },

    /// `-x` is not a declared shorthand.
    #[error("unknown shorthand flag: '{shorthand}' in {arg}")]
    UnknownShorthand {
        /// The unrecognised character.
        shorthand: char,
        /// The whole argument it appeared in.
        arg: String,
    },

    /// A value-taking flag was the last token.
    #[error("flag needs an argument: {flag}")]
    MissingFlagValue {
        /// `--name` of the flag.
        flag: String,
    },

    /// The value could not be coerced to the flag's type.
    #[error(transparent)]
    InvalidFlagValue(#[from] FlagValueError),

    /// An argument that is not valid UTF-8 reached a place that needs text.
    #[error("invalid UTF-8 was detected in one or more arguments")]
    InvalidUtf8,

    /// Any other argv rejection, with the parser's own message.
    #[error("{0}")]
    Parse(String),

    /// A completion command was invoked under a name no generator knows.
    #[error("unsupported shell {0:?}")]
    UnsupportedShell(String),

    /// Writing to one of the output streams failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A flag value that does not parse as the flag's type.
///
/// Raised from inside the argv parser, so it travels as the parser error's
/// source and is recovered by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid argument {value:?} for {flag:?} flag: {detail}")]
pub struct FlagValueError {
    /// Raw value as supplied.
    pub value: String,
    /// `--name`, or `-c, --name` when the flag has a shorthand.
    pub flag: String,
    /// Parser detail.
    pub detail: String,
}

impl CommandError {
    /// Short name of the error class, used in the process-level diagnostic.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownCommand { .. } => "UnknownCommand",
            Self::UnknownFlag { .. } => "UnknownFlag",
            Self::UnknownShorthand { .. } => "UnknownShorthand",
            Self::MissingFlagValue { .. } => "MissingFlagValue",
            Self::InvalidFlagValue(_) => "InvalidFlagValue",
            Self::InvalidUtf8 => "InvalidUtf8",
            Self::Parse(_) => "Parse",
            Self::UnsupportedShell(_) => "UnsupportedShell",
            Self::Io(_) => "Io",
        }
    }

    /// Build an unknown-command error with no suggestions attached.
    #[must_use]
    pub fn unknown_command(token: &str, path: &str) -> Self {
        Self::UnknownCommand {
            token: token.to_owned(),
            path: path.to_owned(),
            suggestions: String::new(),
        }
    }
}
