//! The compiled program: commands plus everything the evaluator needs
//! to run them.

use std::collections::BTreeMap;
use std::ops::Range;

use molscript_foundation::{Error, ErrorKind, ScriptValue};

use crate::span::Span;
use crate::token::{Tok, Token};

/// One assembled command.
#[derive(Clone, Debug, PartialEq)]
pub struct Command {
    /// Tokens, command token first.
    pub tokens: Vec<Token>,
    /// Source span and starting line.
    pub span: Span,
}

impl Command {
    /// Creates a command.
    #[must_use]
    pub fn new(tokens: Vec<Token>, span: Span) -> Self {
        Self { tokens, span }
    }

    /// Code of the first token, or [`Tok::NADA`] for an empty command.
    #[must_use]
    pub fn tok(&self) -> Tok {
        self.tokens.first().map_or(Tok::NADA, |t| t.tok)
    }

    /// Code of the token at `index`, or [`Tok::NADA`].
    #[must_use]
    pub fn tok_at(&self, index: usize) -> Tok {
        self.tokens.get(index).map_or(Tok::NADA, |t| t.tok)
    }

    /// Line the command starts on.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.span.line
    }

    /// The comment text of a comment-only command.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        match self.tokens.as_slice() {
            [only] if only.tok == Tok::NADA => only.text.as_deref(),
            _ => None,
        }
    }

    /// The backpatched jump target of a flow command.
    ///
    /// Positive values are program indexes; a negative value on an `end`
    /// is the negated index of the construct's last branch.
    #[must_use]
    pub fn jump(&self) -> Option<i32> {
        let first = self.tokens.first()?;
        first.tok.has(crate::token::attr::FLOW_COMMAND).then_some(first.aux)
    }

    /// Tokens joined by single spaces.
    #[must_use]
    pub fn render(&self) -> String {
        self.tokens
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// How a function body was declared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    /// `function name(...)`.
    Function,
    /// `parallel name(...)`.
    Parallel,
    /// An anonymous `try { ... }` body.
    Try,
}

/// A function collected during compilation.
///
/// The body stays in the main command list; [`FunctionDefinition::body`]
/// names its index range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionDefinition {
    /// Lowercased name; empty for `try` bodies.
    pub name: String,
    /// Declaration keyword.
    pub kind: FunctionKind,
    /// Parameter names in order.
    pub parameters: Vec<String>,
    /// Names declared with `var` inside the body.
    pub local_variables: Vec<String>,
    /// Index of the first body command.
    pub first_command: usize,
    /// Index of the closing `end` command.
    pub end_command: usize,
    /// Character offset of the body text.
    pub start_offset: usize,
    /// Character offset where the body text stops.
    pub end_offset: usize,
}

impl FunctionDefinition {
    /// Starts a definition whose body begins at `first_command`.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FunctionKind, first_command: usize) -> Self {
        Self {
            name: name.into(),
            kind,
            parameters: Vec::new(),
            local_variables: Vec::new(),
            first_command,
            end_command: first_command,
            start_offset: 0,
            end_offset: 0,
        }
    }

    /// Adds a parameter or a local. Repeats are ignored.
    pub fn add_variable(&mut self, name: &str, is_parameter: bool) {
        if self.is_variable(name) {
            return;
        }
        if is_parameter {
            self.parameters.push(name.to_string());
        } else {
            self.local_variables.push(name.to_string());
        }
    }

    /// True if `name` is a parameter or local.
    #[must_use]
    pub fn is_variable(&self, name: &str) -> bool {
        self.parameters.iter().chain(&self.local_variables).any(|v| v == name)
    }

    /// Program index range of the body.
    #[must_use]
    pub fn body(&self) -> Range<usize> {
        self.first_command..self.end_command
    }

    /// The body's source text.
    #[must_use]
    pub fn source(&self, script: &str) -> String {
        Span::new(self.start_offset, self.end_offset, 0).text(script)
    }
}

/// Result of one compilation.
///
/// A program with an error still carries the commands assembled before
/// the failure.
#[derive(Clone, Debug, Default)]
pub struct CompiledProgram {
    /// The cleaned script the spans index into.
    pub script: String,
    /// Assembled commands in order.
    pub commands: Vec<Command>,
    /// Top-level `var` declarations, each an empty named string.
    pub declared_variables: BTreeMap<String, ScriptValue>,
    /// Functions and `try` bodies.
    pub functions: Vec<FunctionDefinition>,
    /// Non-fatal diagnostics (`define` shadowing a keyword, ...).
    pub warnings: Vec<String>,
    /// False when an opener is still waiting for its closer or a bracket
    /// is unbalanced at the end of input.
    pub is_complete: bool,
    /// The first error, with location context.
    pub error: Option<Error>,
    /// The full report: `script compiler ERROR: ` plus message and location.
    pub error_message: Option<String>,
    /// Index the failing command has, or would have had.
    pub error_command_index: Option<usize>,
    /// Text after a `\u{1}##` marker, split off before compiling.
    pub trailing_extension: Option<String>,
    /// Version text following a state stamp comment.
    pub detected_state_version: Option<String>,
}

impl CompiledProgram {
    /// Number of commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True when nothing was assembled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// True when compilation finished without an error.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// The error category.
    #[must_use]
    pub fn error_kind(&self) -> Option<&ErrorKind> {
        self.error.as_ref().map(|e| &e.kind)
    }

    /// The error message without location or translation.
    #[must_use]
    pub fn error_message_untranslated(&self) -> Option<String> {
        self.error.as_ref().map(Error::untranslated)
    }

    /// Starting line of every command.
    #[must_use]
    pub fn line_numbers(&self) -> Vec<u32> {
        self.commands.iter().map(Command::line).collect()
    }

    /// `[start, end)` span of every command.
    #[must_use]
    pub fn spans(&self) -> Vec<(usize, usize)> {
        self.commands.iter().map(|c| (c.span.start, c.span.end)).collect()
    }

    /// Source text of the command at `index`.
    #[must_use]
    pub fn command_text(&self, index: usize) -> Option<String> {
        self.commands.get(index).map(|c| c.span.text(&self.script))
    }

    /// The function named `name`.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&FunctionDefinition> {
        let name = name.to_lowercase();
        self.functions
            .iter()
            .find(|f| f.kind != FunctionKind::Try && f.name == name)
    }
}
