//! Character-level recognizers for script text.
//!
//! The scanner never decides on its own what a character sequence means.
//! Each `looking_at_*` method tests one lexical form at the cursor and, on
//! success, records its length; the assembler picks which forms to try
//! based on the command being built, which it shares through [`ScanState`].
//!
//! [`Scanner::scan_next`] runs the recognizers in a fixed priority order
//! for tooling that wants a plain lexeme stream.

use molscript_foundation::SelectionSet;
use molscript_foundation::escape::{Unescaped, unescape_matrix, unescape_set, unescape_unicode};

use crate::span::Span;
use crate::token::{Tok, attr};

/// Marker the host writes into saved state scripts.
pub const STATE_VERSION_STAMP: &str = "# Jmol state version ";

/// Sequence number used by the `*^x` spelling.
pub const SEQUENCE_NUMBER_SENTINEL: i32 = 0x007F_FFFF;

/// Parse state the scanner consults to disambiguate.
///
/// Owned by one compilation; the assembler updates it as tokens are added.
#[derive(Clone, Debug)]
pub struct ScanState {
    /// Tokens in the command being built.
    pub n_tokens: usize,
    /// First token of the command being built, or `NADA`.
    pub tok_command: Tok,
    /// Code of the last non-`NADA` token added.
    pub last_tok: Tok,
    /// 1 after an operator, 2 after `@` or `{`, 0 otherwise; replaced by
    /// the operator's code once the token is known.
    pub tok_last_math: i32,
    /// Open `(` count.
    pub paren_count: i32,
    /// Open `[` count.
    pub bracket_count: i32,
    /// Open `{` count within the command.
    pub brace_count: i32,
    /// Depth of block braces spanning commands.
    pub i_brace: usize,
    /// Semicolons still to be read as separators inside `for (...)` or
    /// `select(...)`.
    pub n_semi_skip: i32,
    /// Token count at the last `;` seen, or -10.
    pub pt_semi: i32,
    /// The command is an implied `set` (`x = ...`).
    pub is_new_set: bool,
    /// Current 1-based line.
    pub line: u32,
    /// Offset where the command being built starts.
    pub ich_current_command: usize,
    /// Offset where the command being built ends, once known.
    pub ich_end: usize,
    pub(crate) ich_comment: usize,
    pub(crate) is_show_script_output: bool,
    pub(crate) is_show_command: bool,
    pub(crate) have_comments: bool,
}

impl Default for ScanState {
    fn default() -> Self {
        Self {
            n_tokens: 0,
            tok_command: Tok::NADA,
            last_tok: Tok::OFF,
            tok_last_math: 0,
            paren_count: 0,
            bracket_count: 0,
            brace_count: 0,
            i_brace: 0,
            n_semi_skip: 0,
            pt_semi: -10,
            is_new_set: false,
            line: 1,
            ich_current_command: 0,
            ich_end: 0,
            ich_comment: 0,
            is_show_script_output: false,
            is_show_command: false,
            have_comments: true,
        }
    }
}

impl ScanState {
    /// State for scanning `text`; comment scanning is skipped when the text
    /// has no `#`.
    #[must_use]
    pub fn for_text(text: &str) -> Self {
        Self {
            have_comments: text.contains('#'),
            ..Self::default()
        }
    }
}

/// Outcome of a comment probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommentScan {
    /// No comment at the cursor.
    None,
    /// Skip the recognized text entirely.
    Skip,
    /// Block comment with no closing `*/` or `**/`.
    Unterminated,
    /// Line comment at the start of a command, kept as a comment command.
    LineComment,
}

/// Outcome of a quoted-string probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuotedScan {
    /// A complete quoted string.
    Terminated,
    /// The closing quote is missing.
    Unterminated,
}

/// One classified lexeme from [`Scanner::scan_next`].
#[derive(Clone, Debug, PartialEq)]
pub enum Lexeme {
    /// Spaces, tabs, or a line continuation.
    Whitespace,
    /// Line break.
    EndOfLine,
    /// Comment text.
    Comment(String),
    /// Statement-ending `;`.
    Terminator,
    /// Quoted string, unescaped.
    Str(String),
    /// Quoted string with no closing quote.
    UnterminatedString,
    /// Block comment running to the end of the script.
    UnterminatedComment(String),
    /// Integer literal.
    Integer(i32),
    /// Decimal or exponential literal.
    Decimal(f64),
    /// Encoded residue sequence code.
    SeqCode(i32),
    /// `({...})` literal.
    Set(SelectionSet),
    /// `[{...}]` literal.
    BondSet(SelectionSet),
    /// `[[...]]` literal.
    Matrix(Unescaped),
    /// `$name` object id, without the `$`.
    ObjectId(String),
    /// Operator or name.
    Word(String),
    /// A character nothing recognizes.
    Unknown(char),
}

/// A lexeme with its location.
#[derive(Clone, Debug, PartialEq)]
pub struct Scanned {
    /// What was recognized.
    pub lexeme: Lexeme,
    /// Where it was recognized.
    pub span: Span,
}

/// Cursor over script characters.
#[derive(Clone, Debug)]
pub struct Scanner {
    chars: Vec<char>,
    pub(crate) ich: usize,
    pub(crate) cch: usize,
}

impl Scanner {
    /// Creates a scanner at the start of `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            ich: 0,
            cch: 0,
        }
    }

    /// Number of characters in the script.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// True for an empty script.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Cursor offset.
    #[must_use]
    pub fn position(&self) -> usize {
        self.ich
    }

    /// Length of the last recognized form.
    #[must_use]
    pub fn token_len(&self) -> usize {
        self.cch
    }

    /// True once the cursor is past the last character.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.ich >= self.chars.len()
    }

    /// Character at `i`, or `'\0'` past the end.
    #[must_use]
    pub fn char_at(&self, i: usize) -> char {
        self.chars.get(i).copied().unwrap_or('\0')
    }

    /// Text of `[start, end)`, clamped to the script.
    #[must_use]
    pub fn text(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        self.chars[start..end].iter().collect()
    }

    /// Text of the last recognized form.
    #[must_use]
    pub fn current_text(&self) -> String {
        self.text(self.ich, self.ich + self.cch)
    }

    /// Offset of the next occurrence of `pattern` at or after `from`.
    #[must_use]
    pub fn find(&self, pattern: &str, from: usize) -> Option<usize> {
        let pattern: Vec<char> = pattern.chars().collect();
        if pattern.is_empty() || from >= self.chars.len() {
            return None;
        }
        self.chars[from..]
            .windows(pattern.len())
            .position(|w| w == pattern.as_slice())
            .map(|p| p + from)
    }

    fn starts_with_at(&self, i: usize, pattern: &str) -> bool {
        pattern
            .chars()
            .enumerate()
            .all(|(k, c)| self.chars.get(i + k) == Some(&c))
    }

    /// Line-break width at `i`: 2 for `\r\n`, 1 for `\r` or `\n`, else 0.
    #[must_use]
    pub fn n_char_newline(&self, i: usize) -> usize {
        match self.char_at(i) {
            '\r' if self.char_at(i + 1) == '\n' => 2,
            '\r' | '\n' => 1,
            _ => 0,
        }
    }

    /// End of a statement: end of text, a line break, or `;` when no
    /// semicolons are being skipped.
    #[must_use]
    pub fn eol(ch: char, state: &ScanState) -> bool {
        matches!(ch, '\0' | '\r' | '\n') || ch == ';' && state.n_semi_skip <= 0
    }

    /// Counts line breaks in `text` into the current line.
    pub fn increment_line_count(text: &str, state: &mut ScanState) {
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    state.line += 1;
                }
                '\n' => state.line += 1,
                _ => {}
            }
        }
    }

    // =========================================================================
    // Whitespace and line structure
    // =========================================================================

    /// Spaces, tabs, and at most one line continuation.
    pub fn looking_at_leading_whitespace(&mut self, state: &mut ScanState) -> bool {
        let mut i = self.ich;
        while is_space_or_tab(self.char_at(i)) {
            i += 1;
        }
        if self.is_line_continuation(i, true, state) {
            i += 1 + self.n_char_newline(i + 1);
        }
        self.cch = i - self.ich;
        self.cch > 0
    }

    /// Backslash-newline, or (when `check_math`) a newline inside an open
    /// expression. Counts the line when true.
    pub fn is_line_continuation(&self, i: usize, check_math: bool, state: &mut ScanState) -> bool {
        let escaped = i + 2 < self.chars.len()
            && self.char_at(i) == '\\'
            && self.n_char_newline(i + 1) > 0
            || check_math && self.looking_at_math_continuation(i, state);
        if escaped {
            state.line += 1;
        }
        escaped
    }

    fn looking_at_math_continuation(&self, i: usize, state: &mut ScanState) -> bool {
        let n = self.n_char_newline(i);
        if n == 0 || state.last_tok == Tok::LEFTBRACE {
            return false;
        }
        if state.paren_count > 0 || state.bracket_count > 0 {
            return true;
        }
        let math_command = state.tok_command == Tok::SET && state.is_new_set
            || state.tok_command == Tok::PRINT
            || state.tok_command == Tok::LOG;
        if !math_command {
            return false;
        }
        if state.last_tok.0 == state.tok_last_math {
            return true;
        }
        let mut j = i + n;
        while is_space_or_tab(self.char_at(j)) {
            j += 1;
        }
        self.looking_at_lookup_token(j, state).is_some() && state.tok_last_math == 1
    }

    /// End of script or a line break; records the command end.
    pub fn looking_at_end_of_line(&mut self, state: &mut ScanState) -> bool {
        if self.at_end() {
            state.ich_end = self.chars.len();
            return true;
        }
        state.ich_end = self.ich;
        self.cch = self.n_char_newline(self.ich);
        self.cch > 0
    }

    /// A `;` that ends the statement.
    pub fn looking_at_terminator(&mut self, state: &mut ScanState) -> bool {
        let is_semi = self.char_at(self.ich) == ';';
        if is_semi && state.n_tokens > 0 {
            state.pt_semi = i32::try_from(state.n_tokens).unwrap_or(i32::MAX);
        }
        if !is_semi {
            return false;
        }
        let skipping = state.n_semi_skip > 0;
        state.n_semi_skip -= 1;
        if skipping {
            return false;
        }
        self.cch = 1;
        true
    }

    // =========================================================================
    // Comments
    // =========================================================================

    /// Block comments, `//` and `#` line comments, `#jc` and `#jx `, and
    /// the `$` prefix of show-script output lines.
    pub fn looking_at_comment(&mut self, state: &mut ScanState) -> CommentScan {
        let mut ch = self.char_at(self.ich);
        let mut i = self.ich;
        let mut first_sharp: Option<usize> = None;

        if self.ich == state.ich_current_command
            && ch == '$'
            && (state.is_show_script_output || self.ich == 0)
        {
            state.is_show_script_output = true;
            state.is_show_command = true;
            i += 1;
            if self.char_at(i) == '[' {
                while ch != ']' && !Self::eol(self.char_at(i), state) {
                    ch = self.char_at(i);
                    i += 1;
                }
            }
            self.cch = i - self.ich;
            return CommentScan::Skip;
        } else if state.is_show_script_output && !state.is_show_command {
            first_sharp = Some(i);
        }

        if ch == '/' && i + 1 < self.chars.len() {
            i += 1;
            match self.char_at(i) {
                '/' => {
                    first_sharp = Some(self.ich);
                    state.ich_end = i - 1;
                }
                '*' => {
                    state.ich_end = i - 1;
                    let doubled = self.char_at(i + 1) == '*';
                    let terminator = if doubled { "**/" } else { "*/" };
                    let Some(close) = self.find(terminator, self.ich + 2) else {
                        state.ich_end = self.chars.len();
                        self.cch = self.chars.len() - self.ich;
                        return CommentScan::Unterminated;
                    };
                    let body = self.text(self.ich, close);
                    Self::increment_line_count(&body, state);
                    self.cch = close + terminator.len() - self.ich;
                    return CommentScan::Skip;
                }
                _ => return CommentScan::None,
            }
        }

        let is_sharp = first_sharp.is_none();
        if is_sharp && !state.have_comments {
            return CommentScan::None;
        }

        if state.ich_comment > i {
            i = state.ich_comment;
        }
        while i < self.chars.len() {
            ch = self.chars[i];
            if Self::eol(ch, state) {
                state.ich_end = i;
                if i > 0 && self.is_line_continuation(i - 1, false, state) {
                    i += self.n_char_newline(i) + 1;
                    continue;
                }
                if !is_sharp && ch == ';' {
                    i += 1;
                    continue;
                }
                break;
            }
            if first_sharp.is_none() && ch == '#' {
                first_sharp = Some(i);
            }
            i += 1;
        }
        let Some(sharp) = first_sharp else {
            return CommentScan::None;
        };
        state.ich_comment = sharp;

        if is_sharp
            && state.n_tokens == 0
            && self.char_at(sharp + 1) == 'j'
            && self.char_at(sharp + 2) == 'c'
        {
            self.cch = i - self.ich;
            return CommentScan::Skip;
        }

        if sharp != self.ich {
            return CommentScan::None;
        }

        if is_sharp
            && self.chars.len() > self.ich + 3
            && self.char_at(self.ich + 1) == 'j'
            && self.char_at(self.ich + 2) == 'x'
            && is_space_or_tab(self.char_at(self.ich + 3))
        {
            self.cch = 4;
            return CommentScan::Skip;
        }

        if i == self.ich {
            return CommentScan::None;
        }

        self.cch = i - self.ich;
        if state.n_tokens == 0 {
            CommentScan::LineComment
        } else {
            CommentScan::Skip
        }
    }

    // =========================================================================
    // Strings
    // =========================================================================

    /// A `"`-quoted string, or `'`-quoted when `allow_prime`.
    pub fn looking_at_string(&mut self, allow_prime: bool) -> Option<QuotedScan> {
        if self.ich + 2 > self.chars.len() {
            return None;
        }
        let quote = self.chars[self.ich];
        if quote != '"' && (!allow_prime || quote != '\'') {
            return None;
        }
        let mut i = self.ich + 1;
        let mut escaped = false;
        while i < self.chars.len() {
            let ch = self.chars[i];
            if ch == quote && !escaped {
                break;
            }
            escaped = ch == '\\' && !escaped;
            i += 1;
        }
        if i >= self.chars.len() {
            self.cch = self.chars.len() - self.ich;
            return Some(QuotedScan::Unterminated);
        }
        self.cch = i + 1 - self.ich;
        Some(QuotedScan::Terminated)
    }

    /// The quote character of the last recognized string.
    #[must_use]
    pub fn quote_char(&self) -> char {
        self.char_at(self.ich)
    }

    /// Decodes the string just recognized.
    ///
    /// File names only get `\uXXXX` decoding so Windows paths survive.
    #[must_use]
    pub fn unescaped_string_literal(&self, is_file_name: bool) -> String {
        let inner = self.text(self.ich + 1, (self.ich + self.cch).saturating_sub(1));
        if is_file_name {
            return if inner.contains("\\u") {
                unescape_unicode(&inner)
            } else {
                inner
            };
        }
        let chars: Vec<char> = inner.chars().collect();
        let mut out = String::with_capacity(chars.len());
        let mut k = 0;
        while k < chars.len() {
            let mut ch = chars[k];
            k += 1;
            if ch == '\\' && k < chars.len() {
                ch = chars[k];
                k += 1;
                match ch {
                    'n' => ch = '\n',
                    't' => ch = '\t',
                    'r' => ch = '\r',
                    'x' | 'u' => {
                        let digits = if ch == 'x' { 2 } else { 4 };
                        let mut code = 0u32;
                        for _ in 0..digits {
                            let Some(hexit) = chars.get(k).and_then(|c| c.to_digit(16)) else {
                                break;
                            };
                            code = (code << 4) + hexit;
                            k += 1;
                        }
                        ch = char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER);
                    }
                    _ => {}
                }
            }
            out.push(ch);
        }
        out
    }

    /// An unquoted argument taken as a string because of where it appears.
    ///
    /// Stops at end of statement, at `=` unless `allow_equals`, at `(`
    /// after a `.spt`/`.png`/`.pngj` name unless `allow_spt_paren`, and at
    /// an unmatched `}` inside a block. With `allow_space` the string runs
    /// to the last non-blank character; otherwise to the first blank.
    /// `@name` is a variable reference, not an implied string.
    pub fn looking_at_implied_string(
        &mut self,
        allow_space: bool,
        allow_equals: bool,
        allow_spt_paren: bool,
        state: &ScanState,
    ) -> bool {
        let mut i = self.ich;
        let first = self.char_at(i);
        let is_id = state.last_tok == Tok::ID;
        let parse_variables = is_id
            || !state.tok_command.has(attr::IMPLICIT_STRING_COMMAND) && (state.tok_command.0 & 1) == 1;
        let is_variable = first == '@';
        let is_math = is_variable && i + 3 < self.chars.len() && self.char_at(i + 1) == '{';
        if is_math && parse_variables {
            let close = self.math_terminator(self.ich + 1);
            if is_id || close == self.chars.len() {
                return false;
            }
            self.cch = close + 1 - self.ich;
            return self.cch > 0;
        }

        let mut pt_space: Option<usize> = None;
        let mut pt_last: Option<usize> = None;
        let mut depth = 0i32;
        loop {
            let ch = self.char_at(i);
            if Self::eol(ch, state) {
                break;
            }
            match ch {
                '(' => {
                    let script_call = i >= 5
                        && (self.text(i - 4, i) == ".spt"
                            || self.text(i - 4, i) == ".png"
                            || self.text(i - 5, i) == ".pngj");
                    if !allow_spt_paren && script_call {
                        break;
                    }
                }
                '=' if !allow_equals => break,
                '=' => {}
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth < 0 && (state.brace_count > 0 || state.i_brace > 0) {
                        break;
                    }
                }
                c if c.is_whitespace() => {
                    if pt_space.is_none() {
                        pt_space = Some(i);
                    }
                }
                _ => pt_last = Some(i),
            }
            i += 1;
        }
        if allow_space {
            i = pt_last.map_or(self.ich, |p| p + 1);
        } else if let Some(space) = pt_space.filter(|&s| s > 0) {
            i = space;
        }
        if is_variable && (!allow_space || pt_space.is_none() && depth <= 0 && i - self.ich > 1) {
            return false;
        }
        self.cch = i.saturating_sub(self.ich);
        self.cch > 0
    }

    /// Offset of the `}` closing the `{` at `open`, skipping quoted text;
    /// the script length if unbalanced.
    #[must_use]
    pub fn math_terminator(&self, open: usize) -> usize {
        let mut depth = 1;
        let mut quote: Option<char> = None;
        let mut last = '\0';
        let mut i = open;
        while depth > 0 {
            i += 1;
            if i >= self.chars.len() {
                return self.chars.len();
            }
            let mut ch = self.chars[i];
            if let Some(q) = quote {
                if last == '\\' {
                    ch = '\0';
                } else if ch == q {
                    quote = None;
                }
                last = ch;
                continue;
            }
            match ch {
                '\'' | '"' => quote = Some(ch),
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
        }
        i
    }

    /// A bare word after `load`: a format name, or a `=`/`$`/`:`/`*`
    /// database reference, followed by a space or tab.
    pub fn looking_at_load_format(&mut self, state: &ScanState) -> bool {
        let mut i = self.ich;
        let database = matches!(self.char_at(i), '*' | '$' | '=' | ':');
        loop {
            let ch = self.char_at(i);
            let word = ch.is_alphanumeric() && (database || ch.is_alphabetic());
            let reference = database && !Self::eol(ch, state) && !ch.is_whitespace();
            if !(word || reference) {
                break;
            }
            i += 1;
        }
        if !database && i == self.ich || !is_space_or_tab(self.char_at(i)) {
            return false;
        }
        self.cch = i - self.ich;
        true
    }

    /// A sync target: anything up to a blank, `#`, `}`, or end of statement.
    pub fn look_for_sync_id(&mut self, state: &ScanState) -> bool {
        if matches!(self.char_at(self.ich), '"' | '@' | '\0') {
            return false;
        }
        let mut i = self.ich;
        loop {
            let ch = self.char_at(i);
            if is_space_or_tab(ch) || ch == '#' || ch == '}' || Self::eol(ch, state) {
                break;
            }
            i += 1;
        }
        self.cch = i - self.ich;
        true
    }

    /// An unquoted file name running to a blank, `#`, `;`, or `}`, with
    /// backslashes turned into slashes.
    pub fn unquoted_file_name(&mut self) -> String {
        let mut i = self.ich;
        loop {
            i += 1;
            let ch = self.char_at(i);
            if i >= self.chars.len() || ch.is_whitespace() || matches!(ch, '#' | ';' | '}') {
                break;
            }
        }
        self.cch = i - self.ich;
        self.current_text().replace('\\', "/")
    }

    // =========================================================================
    // Numbers
    // =========================================================================

    /// `mantissa[.digits]E[+-]digits`.
    pub fn looking_at_exponential(&mut self) -> Option<f64> {
        if self.at_end() {
            return None;
        }
        let mut i = self.ich;
        if self.char_at(i) == '-' {
            i += 1;
        }
        let mut digits = false;
        while self.char_at(i).is_ascii_digit() {
            i += 1;
            digits = true;
        }
        if i < self.chars.len() && self.char_at(i) == '.' {
            i += 1;
        }
        while self.char_at(i).is_ascii_digit() {
            i += 1;
            digits = true;
        }
        if i >= self.chars.len() || !digits || !matches!(self.char_at(i), 'E' | 'e') {
            return None;
        }
        i += 1;
        if i >= self.chars.len() {
            return None;
        }
        if matches!(self.char_at(i), '-' | '+') {
            i += 1;
        }
        let exponent_start = i;
        while self.char_at(i).is_ascii_digit() {
            i += 1;
        }
        if i == exponent_start {
            return None;
        }
        self.cch = i - self.ich;
        self.current_text().parse().ok()
    }

    /// `[-]digits.digits`, rejecting a dot followed by a letter (`1.ca`)
    /// or by one character and a letter (`86.1Na`).
    pub fn looking_at_decimal(&mut self, state: &ScanState) -> bool {
        if self.at_end() {
            return false;
        }
        let mut i = self.ich;
        if self.char_at(i) == '-' {
            i += 1;
        }
        let mut digits = false;
        while self.char_at(i).is_ascii_digit() {
            i += 1;
            digits = true;
        }
        if self.char_at(i) != '.' {
            return false;
        }
        i += 1;
        let next = self.char_at(i);
        if !Self::eol(next, state) {
            if next.is_alphabetic() || next == '?' || next == '*' {
                return false;
            }
            let after = self.char_at(i + 1);
            if after.is_alphabetic() || after == '?' {
                return false;
            }
        }
        while self.char_at(i).is_ascii_digit() {
            i += 1;
            digits = true;
        }
        self.cch = i - self.ich;
        digits
    }

    /// `[-]digits^x` or `*^x`, where `x` is a letter, `*`, `?`, or blank.
    pub fn looking_at_seqcode(&mut self) -> bool {
        let mut i = self.ich;
        let mut ch;
        if self.char_at(i + 1) == '^' && self.char_at(i) == '*' {
            ch = '^';
            i += 1;
        } else {
            if self.char_at(i) == '-' {
                i += 1;
            }
            loop {
                ch = self.char_at(i);
                if !ch.is_ascii_digit() {
                    break;
                }
                i += 1;
            }
        }
        if ch != '^' {
            return false;
        }
        i += 1;
        let code = if i >= self.chars.len() {
            ' '
        } else {
            i += 1;
            self.char_at(i - 1)
        };
        if code != ' ' && code != '*' && code != '?' && !code.is_alphabetic() {
            return false;
        }
        self.cch = i - self.ich;
        true
    }

    /// `[-]digits` that fit in an `i32`.
    pub fn looking_at_integer(&mut self) -> Option<i32> {
        if self.at_end() {
            return None;
        }
        let mut i = self.ich;
        if self.char_at(i) == '-' {
            i += 1;
        }
        let digits_start = i;
        while self.char_at(i).is_ascii_digit() {
            i += 1;
        }
        if i == digits_start {
            return None;
        }
        self.cch = i - self.ich;
        self.current_text().parse().ok()
    }

    // =========================================================================
    // Set and matrix literals
    // =========================================================================

    /// `({...})`, `({null})`, or `[{...}]`.
    pub fn looking_at_bitset(&mut self) -> Option<SelectionSet> {
        if self.starts_with_at(self.ich, "({null})") {
            self.cch = 8;
            return Some(SelectionSet::new());
        }
        if self.ich + 4 > self.chars.len() || self.char_at(self.ich + 1) != '{' {
            return None;
        }
        let close = self.find("}", self.ich)?;
        if close + 1 >= self.chars.len() {
            return None;
        }
        let set = unescape_set(&self.text(self.ich, close + 2))?;
        self.cch = close + 2 - self.ich;
        Some(set)
    }

    /// `[[...]]` holding a 3×3 or 4×4 matrix.
    pub fn looking_at_matrix(&mut self) -> Option<Unescaped> {
        if self.ich + 4 >= self.chars.len() || !self.starts_with_at(self.ich, "[[") {
            return None;
        }
        let close = self.find("]]", self.ich)?;
        let matrix = unescape_matrix(&self.text(self.ich, close + 2))?;
        self.cch = close + 2 - self.ich;
        Some(matrix)
    }

    /// `{...}` at command start followed by `.` or `[...]` then `.`, the
    /// start of `{atoms}.property = value`.
    #[must_use]
    pub fn looking_at_set_brace_syntax(&self) -> bool {
        let mut i = self.ich;
        let mut depth = 1;
        while depth > 0 {
            i += 1;
            if i >= self.chars.len() {
                break;
            }
            match self.chars[i] {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
        }
        if depth > 0 {
            i = self.chars.len();
        } else {
            i += 1;
        }
        if self.char_at(i) == '[' {
            depth = 1;
            while depth > 0 {
                i += 1;
                if i >= self.chars.len() {
                    break;
                }
                match self.chars[i] {
                    '[' => depth += 1,
                    ']' => depth -= 1,
                    _ => {}
                }
            }
            i += 1;
        }
        self.char_at(i) == '.' && depth == 0
    }

    // =========================================================================
    // Names and operators
    // =========================================================================

    /// `$name`; moves the cursor past the `$` so the recognized text is the
    /// name. `*` is allowed in the name only as a command's first argument.
    pub fn looking_at_object_id(&mut self, state: &ScanState) -> bool {
        let allow_wild = state.n_tokens == 1;
        if self.char_at(self.ich) != '$' || self.char_at(self.ich + 1) == '"' {
            return false;
        }
        let mut i = self.ich + 1;
        while i < self.chars.len() {
            let ch = self.chars[i];
            if ch.is_whitespace() {
                if i == self.ich + 1 {
                    return false;
                }
                break;
            }
            if !ch.is_alphanumeric() {
                match ch {
                    '*' if allow_wild => {}
                    '~' | '_' => {}
                    _ => return false,
                }
            }
            i += 1;
        }
        self.ich += 1;
        self.cch = i - self.ich;
        true
    }

    /// An operator or name starting at `i`; returns its length.
    ///
    /// Sets `tok_last_math` to 1 after an operator and 2 after `@` or `{`.
    pub fn looking_at_lookup_token(&self, i: usize, state: &mut ScanState) -> Option<usize> {
        if i >= self.chars.len() {
            return None;
        }
        let start = i;
        let mut j = i + 1;
        state.tok_last_math = 0;
        let ch = self.chars[i];
        match ch {
            '-' | '+' | '&' | '|' | '*' => {
                if j < self.chars.len() {
                    let next = self.chars[j];
                    if next == ch {
                        j += 1;
                        if ch == '-' || ch == '+' {
                            return Some(j - start);
                        }
                        if ch == '&' && self.char_at(j) == ch {
                            j += 1;
                        }
                    } else if next == '=' {
                        j += 1;
                    }
                }
                state.tok_last_math = 1;
            }
            '/' if self.char_at(j) == '/' => {}
            '/' | '\\' | '!' => {
                if self.char_at(j) == '=' {
                    j += 1;
                }
                state.tok_last_math = 1;
            }
            ')' | ']' | '}' | '.' => {}
            '@' | '{' => state.tok_last_math = 2,
            ':' | '(' | ',' | '$' | ';' | '[' | '%' => state.tok_last_math = 1,
            '<' | '=' | '>' => {
                if matches!(self.char_at(j), '<' | '=' | '>') {
                    j += 1;
                }
                state.tok_last_math = 1;
            }
            c if c.is_alphabetic() || matches!(c, '~' | '_' | '\'' | '?') => {
                if c == '?' {
                    state.tok_last_math = 1;
                }
                loop {
                    let next = self.char_at(j);
                    let continues = next.is_alphanumeric()
                        || matches!(next, '_' | '?' | '~' | '\'')
                        || next == '\\' && self.char_at(j + 1) == '?'
                        || next == '^' && j > start && self.char_at(j - 1).is_ascii_digit();
                    if !continues {
                        break;
                    }
                    j += 1;
                }
            }
            _ => return None,
        }
        Some(j - start)
    }

    // =========================================================================
    // Lexeme stream
    // =========================================================================

    /// Recognizes the next lexeme in priority order and moves past it.
    ///
    /// Returns `None` at the end of the script.
    pub fn scan_next(&mut self, state: &mut ScanState) -> Option<Scanned> {
        self.ich += self.cch;
        self.cch = 0;
        if self.at_end() {
            return None;
        }
        let start = self.ich;
        let line = state.line;
        let lexeme = self.classify(state);
        if self.cch == 0 && self.ich == start {
            self.cch = 1;
        }
        let end = self.ich + self.cch;
        Some(Scanned {
            lexeme,
            span: Span::new(start, end, line),
        })
    }

    fn classify(&mut self, state: &mut ScanState) -> Lexeme {
        if self.looking_at_leading_whitespace(state) {
            return Lexeme::Whitespace;
        }
        if self.looking_at_end_of_line(state) {
            state.line += 1;
            state.ich_current_command = self.ich + self.cch;
            return Lexeme::EndOfLine;
        }
        let start = self.ich;
        match self.looking_at_comment(state) {
            CommentScan::None => {}
            CommentScan::Unterminated => {
                return Lexeme::UnterminatedComment(self.text(start, self.chars.len()));
            }
            CommentScan::Skip | CommentScan::LineComment => {
                return Lexeme::Comment(self.current_text());
            }
        }
        if self.looking_at_terminator(state) {
            state.ich_current_command = self.ich + 1;
            return Lexeme::Terminator;
        }
        match self.looking_at_string(true) {
            Some(QuotedScan::Terminated) => return Lexeme::Str(self.unescaped_string_literal(false)),
            Some(QuotedScan::Unterminated) => return Lexeme::UnterminatedString,
            None => {}
        }
        if let Some(value) = self.looking_at_exponential() {
            return Lexeme::Decimal(value);
        }
        if self.looking_at_decimal(state) {
            return Lexeme::Decimal(self.current_text().parse().unwrap_or(f64::NAN));
        }
        if self.looking_at_seqcode() {
            return Lexeme::SeqCode(self.seqcode_value().unwrap_or(0));
        }
        if let Some(value) = self.looking_at_integer() {
            return Lexeme::Integer(value);
        }
        let bond = self.char_at(self.ich) == '[';
        if let Some(set) = self.looking_at_bitset() {
            return if bond { Lexeme::BondSet(set) } else { Lexeme::Set(set) };
        }
        if let Some(matrix) = self.looking_at_matrix() {
            return Lexeme::Matrix(matrix);
        }
        if self.looking_at_object_id(state) {
            return Lexeme::ObjectId(self.current_text());
        }
        if let Some(len) = self.looking_at_lookup_token(self.ich, state) {
            self.cch = len;
            return Lexeme::Word(self.current_text());
        }
        self.cch = 1;
        Lexeme::Unknown(self.char_at(self.ich))
    }

    /// Encodes the sequence code just recognized; negative numbers are
    /// returned negated so the caller can emit a minus sign.
    #[must_use]
    pub fn seqcode_value(&self) -> Option<i32> {
        let first = self.char_at(self.ich);
        let seq = if first == '*' || first == '^' {
            SEQUENCE_NUMBER_SENTINEL
        } else {
            self.text(self.ich, self.ich + self.cch - 2).parse().ok()?
        };
        let mut insertion = self.char_at(self.ich + self.cch - 1);
        if insertion == '^' {
            insertion = ' ';
        }
        Some(if seq < 0 {
            -seqcode(-seq, insertion)
        } else {
            seqcode(seq, insertion)
        })
    }

    /// Scans all of `text` into lexemes.
    #[must_use]
    pub fn scan_all(text: &str) -> Vec<Scanned> {
        let mut scanner = Self::new(text);
        let mut state = ScanState::for_text(text);
        std::iter::from_fn(|| scanner.scan_next(&mut state)).collect()
    }
}

/// Packs a residue number and insertion code as `(seq << 8) | code`.
///
/// Codes other than letters, digits, `?`, and `*` are stored as 0.
#[must_use]
pub fn seqcode(seq: i32, insertion: char) -> i32 {
    let code = if insertion.is_ascii_alphanumeric() || insertion == '?' || insertion == '*' {
        insertion as i32
    } else {
        0
    };
    (seq.wrapping_shl(8) & !0xFF) | code
}

/// Float-encoded form of a decimal literal, used for `model.submodel`
/// numbers: `integer * 1_000_000 + fraction digits`.
///
/// Returns `i32::MAX` for negative numbers, numbers with no integer part,
/// a trailing `.`, or a fraction starting with `0`.
#[must_use]
pub fn float_encoded_int(text: &str) -> i32 {
    let Some(dot) = text.find('.') else {
        return i32::MAX;
    };
    if dot < 1 || text.starts_with('-') || text.ends_with('.') || text.contains(".0") {
        return i32::MAX;
    }
    let whole: i64 = text[..dot].parse().unwrap_or(-1);
    let fraction: i64 = text[dot + 1..].parse().unwrap_or(0);
    whole
        .checked_mul(1_000_000)
        .and_then(|v| v.checked_add(fraction))
        .and_then(|v| i32::try_from(v).ok())
        .filter(|&v| v >= 0)
        .unwrap_or(i32::MAX)
}

const fn is_space_or_tab(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}
