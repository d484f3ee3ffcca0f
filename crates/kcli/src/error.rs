use std::io;

/// Error returned by a command handler.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T, E = ParseError> = std::result::Result<T, E>;

/// Every way an `execute` call can stop.
///
/// Parse failures carry the token that caused them. None of them are
/// recoverable inside the engine: the first one aborts the whole call and
/// no handler runs.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unknown flag: {token}")]
    UnknownFlag { token: String },

    #[error("missing value for flag {token}")]
    MissingFlagValue { token: String },

    #[error("illegal argument: {token}")]
    UnknownArgument { token: String },

    #[error("unexpected argument: {token}")]
    UnexpectedArgument { token: String },

    #[error("no more arguments to read")]
    ExhaustedInput,

    #[error("declaration error: {0}")]
    Declaration(String),

    #[error("command `{command}` failed: {source}")]
    Handler {
        command: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to write help: {0}")]
    Io(#[from] io::Error),
}

impl ParseError {
    /// The argument token that triggered a parse failure, if any.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::UnknownFlag { token }
            | Self::MissingFlagValue { token }
            | Self::UnknownArgument { token }
            | Self::UnexpectedArgument { token } => Some(token.as_str()),
            Self::ExhaustedInput | Self::Declaration(_) | Self::Handler { .. } | Self::Io(_) => {
                None
            }
        }
    }

    /// Whether this error came from reading argv, as opposed to a handler,
    /// a bad declaration or the help sink.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::UnknownFlag { .. }
                | Self::MissingFlagValue { .. }
                | Self::UnknownArgument { .. }
                | Self::UnexpectedArgument { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::ParseError;

    #[test]
    fn token_is_exposed_for_parse_failures() {
        let err = ParseError::UnexpectedArgument {
            token: "extra".to_string(),
        };
        assert_eq!(err.token(), Some("extra"));
        assert!(err.is_usage());
        assert_eq!(err.to_string(), "unexpected argument: extra");
    }

    #[test]
    fn handler_errors_keep_their_source() {
        let err = ParseError::Handler {
            command: "first".to_string(),
            source: "boom".into(),
        };
        assert_eq!(err.token(), None);
        assert!(!err.is_usage());
        assert_eq!(err.to_string(), "command `first` failed: boom");
        assert!(std::error::Error::source(&err).is_some());
    }
}
