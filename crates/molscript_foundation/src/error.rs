//! Error types for script compilation.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Every compile error carries an untranslated [`MessageKey`] plus the
//! filled-in detail text, so a host can translate by key.

use std::fmt;

use thiserror::Error;

/// The main error type for script compilation.
#[derive(Clone, Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a lexical error (unterminated string or comment).
    #[must_use]
    pub fn lexical(key: MessageKey, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Lexical {
            key,
            detail: detail.into(),
        })
    }

    /// Creates a syntax error.
    #[must_use]
    pub fn syntax(key: MessageKey, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Syntax {
            key,
            detail: detail.into(),
        })
    }

    /// Creates a flow-control error.
    #[must_use]
    pub fn flow_control(key: MessageKey, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::FlowControl {
            key,
            detail: detail.into(),
        })
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns the message template key, if this is a compile error.
    #[must_use]
    pub fn key(&self) -> Option<MessageKey> {
        match &self.kind {
            ErrorKind::Lexical { key, .. }
            | ErrorKind::Syntax { key, .. }
            | ErrorKind::FlowControl { key, .. } => Some(*key),
            ErrorKind::Internal(_) => None,
        }
    }

    /// Returns the untranslated, filled-in message (no location info).
    #[must_use]
    pub fn untranslated(&self) -> String {
        self.kind.to_string()
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unterminated string or comment.
    #[error("{}", key.fill(detail))]
    Lexical {
        /// The untranslated message template.
        key: MessageKey,
        /// Text substituted into the template.
        detail: String,
    },

    /// Unexpected token, missing command, or wrong argument count.
    #[error("{}", key.fill(detail))]
    Syntax {
        /// The untranslated message template.
        key: MessageKey,
        /// Text substituted into the template.
        detail: String,
    },

    /// Unmatched opener or closer, or `break`/`continue` out of context.
    #[error("{}", key.fill(detail))]
    FlowControl {
        /// The untranslated message template.
        key: MessageKey,
        /// Text substituted into the template.
        detail: String,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Untranslated message templates. `{0}` marks the detail slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// A flow construct was never closed.
    MissingEnd,
    /// A keyword appeared where its context does not allow it.
    BadContext,
    /// A command keyword was expected.
    CommandExpected,
    /// The command ended while something was still open.
    EndOfCommandUnexpected,
    /// A closing token had no opener.
    TokenUnexpected,
    /// An unrecognized character or token.
    UnrecognizedToken,
    /// The command has the wrong number of arguments.
    BadArgumentCount,
    /// A specific token was required here.
    TokenExpected,
    /// A token that cannot appear in an expression.
    InvalidExpressionToken,
    /// An unknown parameter for a command.
    UnrecognizedParameter,
    /// A quoted string ran to the end of the script.
    UnterminatedString,
    /// A block comment ran to the end of the script.
    UnterminatedComment,
}

impl MessageKey {
    /// The English template text.
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::MissingEnd => "missing END for {0}",
            Self::BadContext => "invalid context for {0}",
            Self::CommandExpected => "command expected",
            Self::EndOfCommandUnexpected => "unexpected end of script command",
            Self::TokenUnexpected => "unexpected token: {0}",
            Self::UnrecognizedToken => "unrecognized token: {0}",
            Self::BadArgumentCount => "bad argument count",
            Self::TokenExpected => "{0} expected",
            Self::InvalidExpressionToken => "invalid expression token: {0}",
            Self::UnrecognizedParameter => "unrecognized {0} parameter",
            Self::UnterminatedString => "unterminated string",
            Self::UnterminatedComment => "unterminated comment",
        }
    }

    /// The stable identifier a host can use to look up a translation.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MissingEnd => "missingEnd",
            Self::BadContext => "badContext",
            Self::CommandExpected => "commandExpected",
            Self::EndOfCommandUnexpected => "endOfCommandUnexpected",
            Self::TokenUnexpected => "tokenUnexpected",
            Self::UnrecognizedToken => "unrecognizedToken",
            Self::BadArgumentCount => "badArgumentCount",
            Self::TokenExpected => "tokenExpected",
            Self::InvalidExpressionToken => "invalidExpressionToken",
            Self::UnrecognizedParameter => "unrecognizedParameter",
            Self::UnterminatedString => "unterminatedString",
            Self::UnterminatedComment => "unterminatedComment",
        }
    }

    /// Substitutes `detail` into the template.
    #[must_use]
    pub fn fill(self, detail: &str) -> String {
        let template = self.template();
        if template.contains("{0}") {
            template.replace("{0}", detail)
        } else if detail.is_empty() {
            template.to_string()
        } else {
            format!("{template}: {detail}")
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Context about where an error occurred.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Script name, if the host supplied one.
    pub source: Option<String>,
    /// Line number (1-indexed) of the failing command.
    pub line: Option<u32>,
    /// Index the failing command would have had in the program.
    pub command_index: Option<usize>,
    /// `[start, end)` character span of the failing command.
    pub span: Option<(usize, usize)>,
    /// The command text with ` >>>> ` at the failure point and ` <<<<` appended.
    pub excerpt: Option<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the script name.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line and command index.
    #[must_use]
    pub fn with_position(mut self, line: u32, command_index: usize) -> Self {
        self.line = Some(line);
        self.command_index = Some(command_index);
        self
    }

    /// Sets the command span.
    #[must_use]
    pub fn with_span(mut self, start: usize, end: usize) -> Self {
        self.span = Some((start, end));
        self
    }

    /// Sets the marked-up source excerpt.
    #[must_use]
    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, " file {source}")?;
        }
        if let Some(line) = self.line {
            write!(f, " line {line}")?;
        }
        if let Some(index) = self.command_index {
            write!(f, " command {}", index + 1)?;
        }
        if let Some(excerpt) = &self.excerpt {
            write!(f, ":\n{excerpt}")?;
        }
        Ok(())
    }
}

/// Result type alias for compile operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_fills_template() {
        let err = Error::flow_control(MessageKey::MissingEnd, "if");
        assert_eq!(err.to_string(), "missing END for if");
        assert_eq!(err.key(), Some(MessageKey::MissingEnd));
    }

    #[test]
    fn template_without_slot_appends_detail() {
        assert_eq!(MessageKey::BadArgumentCount.fill(""), "bad argument count");
        assert_eq!(
            MessageKey::CommandExpected.fill("x"),
            "command expected: x"
        );
    }

    #[test]
    fn error_with_context() {
        let err = Error::syntax(MessageKey::TokenUnexpected, ")").with_context(
            ErrorContext::new()
                .with_source("test.spt")
                .with_position(3, 1)
                .with_span(10, 14)
                .with_excerpt("x = ) >>>> <<<<"),
        );
        let ctx = err.context.clone().unwrap();
        assert_eq!(ctx.line, Some(3));
        assert_eq!(ctx.span, Some((10, 14)));
        let text = ctx.to_string();
        assert!(text.contains("file test.spt"));
        assert!(text.contains("line 3 command 2"));
    }

    #[test]
    fn key_names_are_stable() {
        assert_eq!(MessageKey::BadContext.name(), "badContext");
        assert_eq!(MessageKey::UnrecognizedToken.to_string(), "unrecognizedToken");
    }
}
