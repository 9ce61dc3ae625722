//! Line editor abstraction for the console.
//!
//! The console talks to a [`LineEditor`]; [`RustylineEditor`] is the
//! terminal implementation, and tests supply their own.

use std::borrow::Cow;

use molscript_foundation::{Error, Result};
use molscript_language::TokenRegistry;
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Completer, Config, Context, Editor, Helper, Hinter, Validator as RLValidator};

use crate::highlight::ScriptHighlighter;
use crate::session::needs_more_input;

/// Result of reading a line from the editor.
#[derive(Debug)]
pub enum ReadResult {
    /// A line was read.
    Line(String),
    /// User pressed Ctrl+C.
    Interrupted,
    /// User pressed Ctrl+D.
    Eof,
}

/// Abstraction over line editing.
pub trait LineEditor {
    /// Reads a line with the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Reads a continuation line of a multi-line script.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    fn read_continuation(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Adds a line to history.
    fn add_history(&mut self, line: &str);

    /// Replaces the names offered for completion.
    fn set_keywords(&mut self, keywords: Vec<String>);
}

#[derive(Helper, Completer, Hinter, RLValidator)]
struct ConsoleHelper {
    #[rustyline(Completer)]
    completer: KeywordCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
    #[rustyline(Validator)]
    validator: BlockValidator,
    highlighter: ScriptHighlighter,
}

impl Highlighter for ConsoleHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Owned(format!("\x1b[1;32m{prompt}\x1b[0m"))
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[2m{hint}\x1b[0m"))
    }
}

/// Completes keywords, or file paths inside a quoted string.
struct KeywordCompleter {
    file_completer: FilenameCompleter,
    keywords: Vec<String>,
}

impl KeywordCompleter {
    fn new() -> Self {
        Self {
            file_completer: FilenameCompleter::new(),
            keywords: TokenRegistry::new().completions(""),
        }
    }

    fn candidates(&self, word: &str) -> Vec<Pair> {
        let lower = word.to_lowercase();
        self.keywords
            .iter()
            .filter(|kw| kw.starts_with(&lower))
            .map(|kw| Pair {
                display: kw.clone(),
                replacement: kw.clone(),
            })
            .collect()
    }
}

impl Completer for KeywordCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        if line[..pos].chars().filter(|&c| c == '"').count() % 2 == 1 {
            return self.file_completer.complete(line, pos, ctx);
        }
        let start = line[..pos]
            .rfind(|c: char| c.is_whitespace() || "()[]{};,".contains(c))
            .map_or(0, |i| i + 1);
        Ok((start, self.candidates(&line[start..pos])))
    }
}

/// Keeps reading while a block is still open.
struct BlockValidator;

impl Validator for BlockValidator {
    fn validate(&self, ctx: &mut ValidationContext<'_>) -> rustyline::Result<ValidationResult> {
        if needs_more_input(ctx.input()) {
            Ok(ValidationResult::Incomplete)
        } else {
            Ok(ValidationResult::Valid(None))
        }
    }
}

/// Line editor implementation using rustyline.
pub struct RustylineEditor {
    editor: Editor<ConsoleHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Creates a rustyline-backed editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized.
    pub fn new() -> Result<Self> {
        let config = Config::builder()
            .auto_add_history(false)
            .max_history_size(1000)
            .map_err(|e| Error::internal(e.to_string()))?
            .build();

        let helper = ConsoleHelper {
            completer: KeywordCompleter::new(),
            hinter: HistoryHinter::new(),
            validator: BlockValidator,
            highlighter: ScriptHighlighter::new(),
        };

        let mut editor =
            Editor::with_config(config).map_err(|e| Error::internal(e.to_string()))?;
        editor.set_helper(Some(helper));

        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(e) => Err(Error::internal(e.to_string())),
        }
    }

    fn read_continuation(&mut self, prompt: &str) -> Result<ReadResult> {
        self.read_line(prompt)
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }

    fn set_keywords(&mut self, keywords: Vec<String>) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.completer.keywords = keywords;
        }
    }
}
