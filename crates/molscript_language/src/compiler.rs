//! Command assembly: script text in, [`CompiledProgram`] out.
//!
//! A [`Compiler`] owns the token registry and the host hooks. Each call to
//! [`Compiler::compile`] cleans the script and runs one `Assembler` over
//! it. The scanner recognizes one form at a time; the assembler decides
//! what the form means from the command built so far, stores finished
//! commands with their line and span, and patches control-flow jump
//! targets when the program is finalized.
//!
//! Compilation never fails outright. Errors are reported on the returned
//! program together with every command assembled before the failure.

#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]

mod flow_control;
mod known;
mod special;
#[cfg(test)]
mod tests;

use std::collections::{BTreeMap, HashSet};

use molscript_foundation::{Error, ErrorContext, MessageKey, Result, ScriptValue};

use crate::config::CompileFlags;
use crate::flow::{BlockFrame, FlowStack};
use crate::host::{DefaultHost, ScriptHost};
use crate::lexer::{CommentScan, STATE_VERSION_STAMP, ScanState, Scanner};
use crate::program::{Command, CompiledProgram, FunctionDefinition};
use crate::registry::TokenRegistry;
use crate::span::Span;
use crate::token::{Tok, Token, attr, tokens};

/// Marker splitting trailing extension text off a script.
const EXTENSION_MARKER: &str = "\u{1}##";

/// Extension flag that tolerates unclosed blocks at the end of input.
const NO_END_CHECK: &str = "##noendcheck";

const ERROR_PREFIX: &str = "script compiler ERROR: ";

/// Compiles scripts against one token registry.
///
/// The registry persists across compilations, so names introduced by
/// `define` stay visible to later scripts.
pub struct Compiler {
    registry: TokenRegistry,
    host: Box<dyn ScriptHost>,
    script_name: Option<String>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    /// A compiler with the builtin registry and the default host.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: TokenRegistry::new(),
            host: Box::new(DefaultHost),
            script_name: None,
        }
    }

    /// Replaces the host hooks.
    #[must_use]
    pub fn with_host(mut self, host: impl ScriptHost + 'static) -> Self {
        self.host = Box::new(host);
        self
    }

    /// Names the script in error locations.
    #[must_use]
    pub fn with_script_name(mut self, name: impl Into<String>) -> Self {
        self.set_script_name(Some(name.into()));
        self
    }

    /// Sets or clears the name reported in error locations.
    pub fn set_script_name(&mut self, name: Option<String>) {
        self.script_name = name;
    }

    /// The token registry.
    #[must_use]
    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    /// The token registry, for runtime registrations.
    pub fn registry_mut(&mut self) -> &mut TokenRegistry {
        &mut self.registry
    }

    /// Compiles `script`.
    pub fn compile(&mut self, script: &str, flags: CompileFlags) -> CompiledProgram {
        let cleaned = clean_script(script, self.host.as_ref());
        let assembler = Assembler::new(
            &mut self.registry,
            self.host.as_ref(),
            flags,
            self.script_name.as_deref(),
            &cleaned.text,
            cleaned.allow_missing_end,
        );
        let mut program = assembler.assemble();
        program.detected_state_version = state_version(&cleaned.text);
        program.trailing_extension = cleaned.extension;
        program.script = cleaned.text;
        program
    }
}

/// Compiles `script` with a fresh [`Compiler`].
#[must_use]
pub fn compile(script: &str, flags: CompileFlags) -> CompiledProgram {
    Compiler::new().compile(script, flags)
}

struct CleanedScript {
    text: String,
    extension: Option<String>,
    allow_missing_end: bool,
}

/// Normalizes typographic quotes and byte-order marks, splits off the
/// extension text, and unwraps an embedded script.
fn clean_script(script: &str, host: &dyn ScriptHost) -> CleanedScript {
    let mut text = script
        .replace(['\u{201C}', '\u{201D}'], "\"")
        .replace('\u{FEFF}', " ");
    let mut extension = None;
    if let Some(pt) = text.find(EXTENSION_MARKER) {
        extension = Some(text[pt + 1..].to_string());
        text.truncate(pt);
    }
    let allow_missing_end = extension
        .as_deref()
        .is_some_and(|e| e.contains(NO_END_CHECK));
    CleanedScript {
        text: host.extract_embedded_script(&text),
        extension,
        allow_missing_end,
    }
}

fn state_version(text: &str) -> Option<String> {
    let start = text.find(STATE_VERSION_STAMP)? + STATE_VERSION_STAMP.len();
    let rest = &text[start..];
    let end = rest.find(';')?;
    Some(rest[..end].trim().to_string())
}

/// What the main loop does after a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    /// Keep handling the current form.
    Proceed,
    /// Advance past the recognized text and scan again.
    Continue,
}

/// One compilation's state.
struct Assembler<'a> {
    registry: &'a mut TokenRegistry,
    host: &'a dyn ScriptHost,
    flags: CompileFlags,
    script_name: Option<&'a str>,

    sc: Scanner,
    st: ScanState,

    commands: Vec<Command>,
    /// Jump targets keyed by command index, applied at the end.
    patches: BTreeMap<usize, i32>,
    declared: BTreeMap<String, ScriptValue>,
    functions: Vec<FunctionDefinition>,
    warnings: Vec<String>,

    flow: FlowStack,
    /// Block openers and pending `}` markers.
    braces: Vec<Token>,
    /// Variable scopes of open blocks and loops.
    frames: Vec<BlockFrame>,
    this_function: Option<FunctionDefinition>,
    function_stack: Vec<FunctionDefinition>,
    user_functions: HashSet<String>,

    ltoken: Vec<Token>,
    token_command: Token,
    the_token: Token,
    the_tok: Tok,
    last_token: Token,
    last_flow_command: Option<Token>,
    token_and_equals: Option<Token>,
    tok_initial_plus_plus: Tok,
    comment: Option<String>,
    ich_brace: usize,
    set_brace_count: i32,
    for_point3: i32,
    set_equal_pt: usize,
    pt_new_set_modifier: usize,
    is_set_brace: bool,
    i_have_quoted_string: bool,
    is_end_of_command: bool,
    need_right_paren: bool,
    end_of_line: bool,
    check_implied_script_cmd: bool,
    is_comment: bool,
    is_user_token: bool,
    implicit_string: bool,
    is_math_expression_command: bool,
    allow_missing_end: bool,
    i_line: u32,
}

impl<'a> Assembler<'a> {
    fn new(
        registry: &'a mut TokenRegistry,
        host: &'a dyn ScriptHost,
        flags: CompileFlags,
        script_name: Option<&'a str>,
        text: &str,
        allow_missing_end: bool,
    ) -> Self {
        Self {
            registry,
            host,
            flags,
            script_name,
            sc: Scanner::new(text),
            st: ScanState::for_text(text),
            commands: Vec::new(),
            patches: BTreeMap::new(),
            declared: BTreeMap::new(),
            functions: Vec::new(),
            warnings: Vec::new(),
            flow: FlowStack::new(),
            braces: Vec::new(),
            frames: Vec::new(),
            this_function: None,
            function_stack: Vec::new(),
            user_functions: HashSet::new(),
            ltoken: Vec::new(),
            token_command: Token::new(Tok::NADA),
            the_token: Token::new(Tok::NADA),
            the_tok: Tok::NADA,
            last_token: tokens::off(),
            last_flow_command: None,
            token_and_equals: None,
            tok_initial_plus_plus: Tok::NADA,
            comment: None,
            ich_brace: 0,
            set_brace_count: 0,
            for_point3: -1,
            set_equal_pt: usize::MAX,
            pt_new_set_modifier: 1,
            is_set_brace: false,
            i_have_quoted_string: false,
            is_end_of_command: false,
            need_right_paren: false,
            end_of_line: false,
            check_implied_script_cmd: false,
            is_comment: false,
            is_user_token: false,
            implicit_string: false,
            is_math_expression_command: false,
            allow_missing_end,
            i_line: 1,
        }
    }

    /// Runs to the end of input and builds the program.
    fn assemble(mut self) -> CompiledProgram {
        let outcome = self.run();
        self.finish(outcome)
    }

    // =========================================================================
    // Main loop
    // =========================================================================

    fn run(&mut self) -> Result<()> {
        loop {
            self.sc.ich += self.sc.cch;
            self.sc.cch = 0;
            self.st.n_tokens = self.ltoken.len();
            if self.ltoken.is_empty() {
                let ich = self.sc.ich;
                if let Some(f) = self.this_function.as_mut().filter(|f| f.start_offset == 0) {
                    f.start_offset = ich;
                }
                self.st.ich_current_command = ich;
                self.i_line = self.st.line;
            }
            if self.sc.looking_at_leading_whitespace(&mut self.st) {
                continue;
            }
            self.end_of_line = false;
            if !self.is_end_of_command {
                self.end_of_line = self.sc.looking_at_end_of_line(&mut self.st);
                let comment = if self.end_of_line {
                    CommentScan::None
                } else {
                    self.sc.looking_at_comment(&mut self.st)
                };
                match comment {
                    CommentScan::Skip => continue,
                    CommentScan::Unterminated => {
                        return Err(Error::lexical(MessageKey::UnterminatedComment, ""));
                    }
                    CommentScan::LineComment => {
                        self.is_end_of_command = true;
                        self.comment = Some(self.sc.current_text().trim().to_string());
                    }
                    CommentScan::None => {}
                }
                self.is_end_of_command = self.is_end_of_command
                    || self.end_of_line
                    || self.sc.looking_at_terminator(&mut self.st);
            }

            if self.is_end_of_command {
                self.is_end_of_command = false;
                if self.process_token_list()? == Step::Continue {
                    continue;
                }
                self.check_implied_script_cmd = false;
                if !self.sc.at_end() {
                    continue;
                }
                return Ok(());
            }

            if self.st.n_tokens > 0 && self.check_special_parameter_syntax()? == Step::Continue {
                continue;
            }
            if let Some(len) = self.sc.looking_at_lookup_token(self.sc.ich, &mut self.st) {
                self.sc.cch = len;
                let ident = self.get_prefix_token();
                if self.parse_known_token(&ident)? == Step::Continue {
                    continue;
                }
                if self.parse_command_parameter(&ident)? == Step::Continue {
                    continue;
                }
                let token = self.the_token.clone();
                self.add_token(token);
                continue;
            }
            if self.st.n_tokens == 0
                || (self.st.is_new_set || self.is_set_brace)
                    && self.st.n_tokens == self.pt_new_set_modifier
            {
                if self.st.n_tokens == 0 {
                    if self.sc.looking_at_string(true).is_some() {
                        let script = tokens::script();
                        self.set_command(script.clone());
                        self.add_token(script);
                        self.sc.cch = 0;
                        continue;
                    }
                    if self.sc.looking_at_implied_string(true, true, true, &self.st) {
                        self.st.ich_end = self.sc.ich + self.sc.cch;
                    }
                }
                return Err(self.command_expected());
            }
            return Err(Error::syntax(
                MessageKey::UnrecognizedToken,
                self.sc.char_at(self.sc.ich).to_string(),
            ));
        }
    }

    /// Finishes the command being built at a statement end, then handles
    /// single-line bodies and the end of input.
    fn process_token_list(&mut self) -> Result<Step> {
        let n = self.st.n_tokens;
        if n > 0 || self.comment.is_some() {
            if n == 0 {
                self.st.ich_current_command = self.sc.ich;
                self.st.ich_end = self.sc.ich + self.sc.cch;
                if let Some(comment) = self.comment.clone() {
                    self.is_comment = true;
                    self.add_token(Token::named(Tok::NADA, comment));
                }
            } else if self.set_brace_count > 0 && self.end_of_line && !self.sc.at_end() {
                self.st.line += 1;
                return Ok(Step::Continue);
            }

            if self.st.tok_command == Tok::SCRIPT
                && self.check_implied_script_cmd
                && self.misread_script_call(n)
            {
                self.sc.ich = self.st.ich_current_command;
                self.st.n_tokens = 0;
                self.ltoken.clear();
                self.sc.cch = 0;
                self.st.tok_command = Tok::NADA;
                return Ok(Step::Continue);
            }

            if self.st.is_new_set
                && n > 2
                && self.tok_at(2) == Tok::PER
                && matches!(self.tok_at(3), Tok::SORT | Tok::REVERSE | Tok::PUSH | Tok::POP)
            {
                self.ltoken[0] = tokens::set_assign();
                let target = if self.tok_at(3) == Tok::POP {
                    tokens::all()
                } else {
                    self.ltoken[1].clone()
                };
                self.ltoken.insert(1, target);
            } else if self.tok_initial_plus_plus != Tok::NADA {
                if !self.st.is_new_set {
                    self.check_new_set_command();
                }
                self.tokenize_plus_plus(self.tok_initial_plus_plus, true);
            }

            if n == 1 && self.st.brace_count == 1 {
                if let Some(flow) = self.last_flow_command.take() {
                    self.st.paren_count = 0;
                    self.set_brace_count = 0;
                    let is_process = flow.tok == Tok::PROCESS;
                    self.set_command(flow);
                    if !is_process && self.tok_at(0) == Tok::LEFTBRACE {
                        self.ltoken.remove(0);
                    }
                } else {
                    self.st.paren_count = 0;
                    self.set_brace_count = 0;
                    self.st.brace_count = 0;
                    self.ltoken.remove(0);
                    let open = tokens::block_open();
                    self.set_command(open.clone());
                    self.add_token(open.clone());
                    self.frames.push(BlockFrame::new(Tok::PUSH));
                    self.push_brace(open);
                }
            }

            if self.st.bracket_count > 0
                || self.set_brace_count > 0
                || self.st.paren_count > 0
                || self.st.brace_count == 1 && !self.check_flow_start_brace(true)
            {
                let key = if n == 1 {
                    MessageKey::CommandExpected
                } else {
                    MessageKey::EndOfCommandUnexpected
                };
                return Err(Error::syntax(key, ""));
            }
            if self.need_right_paren {
                self.add_token(tokens::right_paren());
                self.need_right_paren = false;
            }

            if !self.ltoken.is_empty() {
                self.compile_command();
                self.store_command();
                if self.st.tok_command == Tok::SET {
                    self.last_flow_command = None;
                }
            }
            self.reset_command();
        }

        if self.end_of_line {
            let i_command = self.commands.len();
            let line = self.st.line;
            let forced = self
                .flow
                .top_mut()
                .is_some_and(|f| f.check_force_end_if(i_command, line));
            if forced {
                if !self.is_comment {
                    if let Some(top) = self.flow.top() {
                        let opener = Token::named(top.tok, top.name.clone());
                        self.force_flow_end(&opener)?;
                    }
                }
                self.is_end_of_command = true;
                self.sc.cch = 0;
                self.st.ich_current_command = self.sc.ich;
                return Ok(Step::Continue);
            }
            self.is_comment = false;
            self.st.is_show_command = false;
            self.st.line += 1;
        }

        if self.sc.at_end() {
            self.set_command(tokens::all());
            self.the_tok = Tok::NADA;
            if self.check_flow_end_brace()? == Step::Continue {
                self.is_end_of_command = true;
                self.sc.cch = 0;
                return Ok(Step::Continue);
            }
            self.sc.ich = self.sc.len();
        }
        Ok(Step::Proceed)
    }

    /// True when `name.ext` at the start of a line was wrongly taken as
    /// a script file: a `.sort`/`.push(...)` style call, or extra tokens
    /// that are not `file.spt(args)`.
    fn misread_script_call(&self, n: usize) -> bool {
        if n > 2 && !(self.tok_at(2) == Tok::LEFTPAREN && self.ltoken[1].text().ends_with(".spt")) {
            return true;
        }
        if n != 2 {
            return false;
        }
        let s = self.last_token.text().to_uppercase();
        s.ends_with(".SORT")
            || s.ends_with(".REVERSE")
            || [".SORT(", ".REVERSE(", ".POP(", ".PUSH("]
                .iter()
                .any(|m| s.contains(m))
    }

    /// Final rewrites of a finished command.
    fn compile_command(&mut self) {
        if self.ltoken.len() == 4
            && self.st.is_new_set
            && self.ltoken[2].text() == "."
            && self.ltoken[3].text() == "spt"
        {
            let file = format!("{}.spt", self.ltoken[1].text());
            self.ltoken.clear();
            self.add_token(tokens::script());
            self.add_token(Token::string(file));
            self.st.is_new_set = false;
        }
        self.set_command(self.ltoken[0].clone());
        let size = self.ltoken.len();
        if size == 1 && self.st.tok_command.has(attr::DEFAULT_ON) {
            self.add_token(tokens::on());
        }
        if let Some(op) = self.token_and_equals.take() {
            self.expand_and_equals(op);
        }
    }

    /// `x += y` becomes `x = x + (y)`.
    fn expand_and_equals(&mut self, op: Token) {
        let size = (1..self.ltoken.len())
            .find(|&i| self.tok_at(i) == Tok::ANDEQUALS)
            .unwrap_or(self.ltoken.len());
        let mut i = size + 1;
        if self.ltoken.len() < i {
            tracing::error!("compound assignment without operator");
            return;
        }
        for j in 1..size {
            let target = self.ltoken[j].clone();
            self.ltoken.insert(i, target);
            i += 1;
        }
        self.ltoken[size] = tokens::equals();
        self.ltoken.insert(i, op);
        self.ltoken.insert(i + 1, tokens::left_paren());
        self.add_token(tokens::right_paren());
    }

    fn store_command(&mut self) {
        let start = self.st.ich_current_command;
        let stop = if self.st.ich_end == start {
            self.sc.ich
        } else {
            self.st.ich_end
        };
        let end = start.max(stop.min(self.sc.len()));
        let command = Command::new(
            std::mem::take(&mut self.ltoken),
            Span::new(start, end, self.i_line),
        );
        if self.flags.logs_commands() {
            tracing::debug!(
                index = self.commands.len(),
                line = self.i_line,
                braces = self.braces.len(),
                tokens = %command.render(),
                "command"
            );
        }
        self.commands.push(command);
    }

    fn reset_command(&mut self) {
        self.clear_command();
        self.comment = None;
        self.i_have_quoted_string = false;
        self.st.is_new_set = false;
        self.is_set_brace = false;
        self.need_right_paren = false;
        self.pt_new_set_modifier = 1;
        self.ltoken.clear();
        self.st.n_tokens = 0;
        self.st.n_semi_skip = 0;
        self.tok_initial_plus_plus = Tok::NADA;
        self.token_and_equals = None;
        self.st.pt_semi = -10;
        self.for_point3 = -1;
        self.set_equal_pt = usize::MAX;
    }

    // =========================================================================
    // Token bookkeeping
    // =========================================================================

    /// Looks up the name just scanned and sets the current token.
    ///
    /// Returns the name as the rest of assembly should see it: lowercased
    /// unless it is one character long or follows `:`.
    fn get_prefix_token(&mut self) -> String {
        let ident = self.sc.current_text();
        let lower = ident.to_lowercase();
        let is_user_var = self.is_context_variable(&lower);
        let n = self.st.n_tokens;
        if n == 0 {
            self.is_user_token = is_user_var;
        }
        let declaring = n == 1
            && matches!(self.st.tok_command, Tok::FUNCTION | Tok::PARALLEL | Tok::VAR);
        let calling = self.user_functions.contains(&lower)
            && self.this_function.as_ref().is_none_or(|f| f.name != lower);

        let (name, found) = if declaring || n != 0 && is_user_var || calling {
            (lower, None)
        } else if ident.chars().count() == 1 || self.last_token.tok == Tok::COLON {
            let found = match self.registry.lookup(&ident, true) {
                Some(token) => Some(token.clone()),
                None => self
                    .registry
                    .lookup(&lower, true)
                    .map(|t| Token::with_aux(t.tok, t.aux, ident.clone())),
            };
            (ident, found)
        } else {
            let found = self.registry.lookup(&lower, true).cloned();
            (lower, found)
        };

        let token = found.unwrap_or_else(|| {
            if name.starts_with("property_") {
                Token::named(Tok::PROPERTY, name.clone())
            } else {
                Token::identifier(name.clone())
            }
        });
        self.the_tok = token.tok;
        self.the_token = token;
        name
    }

    fn add_token(&mut self, token: Token) {
        if token.tok != Tok::NADA {
            self.set_last_token(token.clone());
        }
        self.ltoken.push(token);
    }

    fn set_last_token(&mut self, token: Token) {
        self.st.last_tok = token.tok;
        self.last_token = token;
    }

    fn tok_at(&self, i: usize) -> Tok {
        self.ltoken.get(i).map_or(Tok::NADA, |t| t.tok)
    }

    fn set_command(&mut self, token: Token) {
        let tok = token.tok;
        self.st.tok_command = tok;
        self.is_math_expression_command =
            tok == Tok::IDENTIFIER || tok.has(attr::MATH_EXPRESSION_COMMAND);
        self.implicit_string = tok.has(attr::IMPLICIT_STRING_COMMAND);
        self.token_command = token;
    }

    fn clear_command(&mut self) {
        self.token_command = Token::new(Tok::NADA);
        self.st.tok_command = Tok::NADA;
        self.implicit_string = false;
        self.is_math_expression_command = false;
    }

    fn replace_command(&mut self, token: Token) {
        self.set_command(token.clone());
        if self.ltoken.is_empty() {
            self.ltoken.push(token);
        } else {
            self.ltoken[0] = token;
        }
    }

    fn push_brace(&mut self, token: Token) {
        self.braces.push(token);
        self.st.i_brace = self.braces.len();
    }

    fn pop_brace(&mut self) -> Option<Token> {
        let token = self.braces.pop();
        self.st.i_brace = self.braces.len();
        token
    }

    fn i_command(&self) -> usize {
        self.commands.len()
    }

    /// Rewinds to the command start so the error marks the whole command.
    fn command_expected(&mut self) -> Error {
        self.sc.ich = self.st.ich_current_command;
        Error::syntax(MessageKey::CommandExpected, "")
    }

    // =========================================================================
    // Finalization
    // =========================================================================

    fn finish(mut self, outcome: Result<()>) -> CompiledProgram {
        let mut error = None;
        let mut error_command_index = None;
        let mut unclosed = false;

        match outcome {
            Err(err) => {
                let index = self.i_command();
                error = Some(self.locate_error(err, index));
                error_command_index = Some(index);
            }
            Ok(()) => {
                if let Some(open) = self.flow.top() {
                    unclosed = true;
                    let name = self.registry.name_of(open.tok);
                    let index = self.i_command().saturating_sub(1);
                    if !self.allow_missing_end {
                        let err = Error::flow_control(MessageKey::MissingEnd, name);
                        error = Some(self.locate_error(err, index));
                        error_command_index = Some(index);
                    }
                    self.close_open_contexts();
                }
            }
        }

        let is_complete = !unclosed
            && self.flow.is_empty()
            && self.braces.is_empty()
            && self.st.paren_count == 0
            && self.st.brace_count == 0
            && self.st.bracket_count == 0;

        for (&index, &target) in &self.patches {
            if let Some(first) = self.commands.get_mut(index).and_then(|c| c.tokens.first_mut()) {
                first.aux = target;
            }
        }

        let error_message = error
            .as_ref()
            .map(|e| format!("{ERROR_PREFIX}{e}{}", e.context.clone().unwrap_or_default()));
        if let Some(message) = &error_message {
            if !self.flags.silent {
                tracing::error!("{message}");
            }
        }

        CompiledProgram {
            script: String::new(),
            commands: self.commands,
            declared_variables: self.declared,
            functions: self.functions,
            warnings: self.warnings,
            is_complete,
            error,
            error_message,
            error_command_index,
            trailing_extension: None,
            detected_state_version: None,
        }
    }

    /// Attaches the failing command's location and marked-up text.
    fn locate_error(&self, err: Error, index: usize) -> Error {
        let start = self.st.ich_current_command;
        let ich = self.sc.ich.min(self.sc.len());
        let stop = if self.st.ich_end <= start {
            ich
        } else {
            self.st.ich_end
        };
        let line_text = self.sc.text(start, stop);
        let excerpt = if ich >= start && ich < self.st.ich_end {
            format!(
                "{} >>>> {}",
                self.sc.text(start, ich),
                self.sc.text(ich, stop)
            )
        } else {
            line_text
        };
        let mut context = ErrorContext::new()
            .with_position(self.st.line, index)
            .with_span(start, stop.max(start))
            .with_excerpt(format!("{excerpt} <<<<"));
        if let Some(name) = self.script_name {
            context = context.with_source(name);
        }
        err.with_context(context)
    }

    /// Stores `end` commands for every context still open at end of input.
    fn close_open_contexts(&mut self) {
        self.reset_command();
        let len = self.sc.len();
        while let Some(top) = self.flow.top() {
            let opener = Token::named(top.tok, top.name.clone());
            self.st.ich_current_command = len;
            self.st.ich_end = len;
            self.ich_brace = len;
            if self.force_flow_end(&opener).is_err() {
                break;
            }
            self.store_command();
            self.reset_command();
        }
    }
}
