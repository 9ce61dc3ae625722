//! Handling of recognized names and operators: first by what the token
//! is, then by which command it appears in.

use molscript_foundation::{Error, MessageKey, Result};

use super::{Assembler, Step};
use crate::program::{FunctionDefinition, FunctionKind};
use crate::token::{Tok, Token, attr, tokens};

/// Characters that start an unquoted surface file name.
const FILE_NAME_STARTS: &str = ".:/\\+-!?";

impl Assembler<'_> {
    /// Checks that depend on the token itself.
    pub(super) fn parse_known_token(&mut self, ident: &str) -> Result<Step> {
        let n = self.st.n_tokens;
        if self.st.tok_last_math != 0 {
            self.st.tok_last_math = self.the_tok.0;
        }
        if let Some(top) = self.flow.top() {
            if top.tok == Tok::SWITCH
                && top.awaiting_case
                && !matches!(self.the_tok, Tok::CASE | Tok::DEFAULT | Tok::RIGHTBRACE)
                && self.last_token.tok != Tok::SWITCH
            {
                return Err(Error::flow_control(MessageKey::BadContext, ident));
            }
        }
        if self.last_token.tok == Tok::DEFINE && self.the_tok != Tok::LEFTBRACE && n != 1 {
            self.add_token(Token::string(ident));
            return Ok(Step::Continue);
        }

        match self.the_tok {
            Tok::IDENTIFIER if n == 0 && !self.check_implied_script_cmd => {
                if ident.starts_with('\'') {
                    self.start_implied_script();
                    return Ok(Step::Continue);
                }
                if self.sc.char_at(self.sc.ich + self.sc.cch) == '.' {
                    self.start_implied_script();
                    self.st.n_tokens = 1;
                    self.check_implied_script_cmd = true;
                    return Ok(Step::Continue);
                }
            }
            Tok::ANDEQUALS => return Ok(self.compound_assignment(ident)),
            Tok::END | Tok::ENDIF | Tok::ELSE => {
                if self.the_tok != Tok::ELSE {
                    if let Some(top) = self.flow.top_mut() {
                        top.set_force_end_if(false);
                    }
                }
                if n > 0 {
                    self.end_command_here();
                    return Ok(Step::Continue);
                }
            }
            Tok::FOR if self.st.bracket_count > 0 => {}
            Tok::FOR
            | Tok::CASE
            | Tok::DEFAULT
            | Tok::ELSEIF
            | Tok::IF
            | Tok::SWITCH
            | Tok::WHILE
            | Tok::CATCH => {
                if n > 1 && self.st.tok_command != Tok::SET {
                    self.end_command_here();
                    if let Some(top) = self.flow.top_mut() {
                        top.set_force_end_if(true);
                    }
                    return Ok(Step::Continue);
                }
            }
            Tok::PLUS_PLUS | Tok::MINUS_MINUS => {
                if !self.st.is_new_set && n == 1 {
                    self.check_new_set_command();
                }
                if self.st.is_new_set
                    && self.st.paren_count == 0
                    && self.st.bracket_count == 0
                    && self.sc.ich <= self.set_equal_pt
                {
                    self.tokenize_plus_plus(self.the_tok, false);
                    return Ok(Step::Continue);
                }
                if self.in_for_increment(n) {
                    let target = self.last_token.clone();
                    self.add_token(tokens::equals());
                    self.add_token(target);
                    self.add_token(if self.the_tok == Tok::MINUS_MINUS {
                        tokens::minus()
                    } else {
                        tokens::plus()
                    });
                    self.add_token(Token::int(1));
                    return Ok(Step::Continue);
                }
            }
            Tok::OP_EQ => {
                if self.st.paren_count == 0 && self.st.bracket_count == 0 {
                    self.set_equal_pt = self.sc.ich;
                }
            }
            Tok::PER => {
                if self.st.tok_command == Tok::SET
                    && self.st.paren_count == 0
                    && self.st.bracket_count == 0
                    && self.sc.ich < self.set_equal_pt
                    && !self.ltoken.is_empty()
                {
                    self.ltoken.insert(1, tokens::expression_begin());
                    self.add_token(tokens::expression_end());
                    self.ltoken[0] = tokens::set_property();
                    self.set_equal_pt = 0;
                }
            }
            Tok::LEFTBRACE => {
                self.st.brace_count += 1;
                if self.st.brace_count == 1
                    && self.st.paren_count == 0
                    && self.check_flow_start_brace(false)
                {
                    self.is_end_of_command = true;
                    if let Some(top) = self.flow.top_mut() {
                        top.set_force_end_if(false);
                    }
                    return Ok(Step::Continue);
                }
                self.open_paren(n);
            }
            Tok::LEFTPAREN => self.open_paren(n),
            Tok::RIGHTBRACE => {
                if self.st.i_brace > 0 && self.st.paren_count == 0 && self.st.brace_count == 0 {
                    self.ich_brace = self.sc.ich;
                    if n == 0 {
                        self.st.brace_count = 1;
                        self.st.paren_count = 1;
                    } else {
                        self.st.brace_count = 0;
                        self.st.paren_count = 0;
                        self.st.n_semi_skip = 0;
                        self.push_brace(self.the_token.clone());
                        self.is_end_of_command = true;
                        self.st.ich_end = self.sc.ich;
                        return Ok(Step::Continue);
                    }
                }
                self.st.brace_count -= 1;
                self.close_paren(ident)?;
            }
            Tok::RIGHTPAREN => self.close_paren(ident)?,
            Tok::LEFTSQUARE => {
                if self.sc.ich > 0 && self.sc.char_at(self.sc.ich - 1).is_whitespace() {
                    self.add_token(tokens::space_before_square());
                }
                self.st.bracket_count += 1;
            }
            Tok::RIGHTSQUARE => {
                self.st.bracket_count -= 1;
                if self.st.bracket_count < 0 {
                    return Err(Error::syntax(MessageKey::TokenUnexpected, "]"));
                }
            }
            _ => {}
        }
        Ok(Step::Proceed)
    }

    fn start_implied_script(&mut self) {
        let script = tokens::script();
        self.set_command(script.clone());
        self.add_token(script);
        self.sc.cch = 0;
    }

    /// Ends the command before the current token, which is read again.
    fn end_command_here(&mut self) {
        self.is_end_of_command = true;
        self.sc.cch = 0;
    }

    /// The third clause of `for (init; test; step)`.
    fn in_for_increment(&self, n: usize) -> bool {
        self.st.n_semi_skip == self.for_point3
            && i32::try_from(n).is_ok_and(|n| n == self.st.pt_semi + 2)
    }

    /// `x += y` and friends.
    fn compound_assignment(&mut self, ident: &str) -> Step {
        let op = ident
            .get(..1)
            .and_then(|first| self.registry.lookup(first, true))
            .cloned();
        if self.in_for_increment(self.st.n_tokens) {
            let target = self.last_token.clone();
            self.add_token(tokens::equals());
            self.add_token(target);
            if let Some(op) = op {
                self.add_token(op);
            }
            self.add_token(tokens::left_paren());
            self.need_right_paren = true;
            return Step::Continue;
        }
        self.check_new_set_command();
        match self.st.tok_command {
            Tok::SET => {
                self.token_and_equals = op;
                self.set_equal_pt = self.sc.ich;
                Step::Proceed
            }
            Tok::SLAB | Tok::DEPTH => {
                self.add_token(self.token_command.clone());
                self.replace_command(tokens::set_assign());
                self.token_and_equals = op;
                self.set_equal_pt = self.sc.ich;
                Step::Proceed
            }
            _ => Step::Continue,
        }
    }

    fn open_paren(&mut self, n: usize) {
        self.st.paren_count += 1;
        if n > 1 && matches!(self.last_token.tok, Tok::SELECT | Tok::FOR | Tok::IF) {
            self.st.n_semi_skip += 2;
        }
    }

    fn close_paren(&mut self, ident: &str) -> Result<()> {
        self.st.paren_count -= 1;
        if self.st.paren_count < 0 {
            return Err(Error::syntax(MessageKey::TokenUnexpected, ident));
        }
        if self.st.paren_count == 0 {
            self.st.n_semi_skip = 0;
        }
        if self.need_right_paren {
            self.add_token(tokens::right_paren());
            self.need_right_paren = false;
        }
        Ok(())
    }

    /// Checks that depend on the command being assembled.
    pub(super) fn parse_command_parameter(&mut self, ident: &str) -> Result<Step> {
        let n = self.ltoken.len();
        self.st.n_tokens = n;
        match self.st.tok_command {
            Tok::NADA => return self.start_command(ident),
            Tok::CATCH => match n {
                1 if self.the_tok != Tok::LEFTPAREN => {
                    return Err(Error::syntax(MessageKey::TokenExpected, "("));
                }
                1 => {}
                2 if self.the_tok == Tok::RIGHTPAREN => self.end_flow_header(),
                2 => self.add_context_variable(ident),
                3 if self.the_tok != Tok::RIGHTPAREN => {
                    return Err(Error::syntax(MessageKey::TokenExpected, ")"));
                }
                3 => self.end_flow_header(),
                _ => return Err(Error::syntax(MessageKey::BadArgumentCount, "")),
            },
            Tok::FUNCTION | Tok::PARALLEL => self.function_header(ident, n)?,
            Tok::CASE => {
                if n > 1
                    && self.st.paren_count == 0
                    && self.st.brace_count == 0
                    && self.the_tok == Tok::COLON
                {
                    self.add_token(tokens::right_paren());
                    self.st.brace_count = 1;
                    self.is_end_of_command = true;
                    return Ok(Step::Continue);
                }
            }
            Tok::DEFAULT => {
                if n > 1 {
                    self.st.brace_count = 1;
                    self.end_command_here();
                    return Ok(Step::Continue);
                }
            }
            Tok::ELSE => {
                if n == 1 && self.the_tok != Tok::IF {
                    self.end_command_here();
                    return Ok(Step::Continue);
                }
                if n != 1 {
                    return Err(Error::syntax(MessageKey::BadArgumentCount, ""));
                }
                let elseif = Token::named(Tok::ELSEIF, "elseif");
                if let Some(top) = self.flow.top_mut() {
                    top.tok = Tok::ELSEIF;
                    top.name = "elseif".to_string();
                }
                self.replace_command(elseif);
                return Ok(Step::Continue);
            }
            Tok::VAR => {
                if n == 1 {
                    self.add_context_variable(ident);
                    self.replace_command(tokens::set_var());
                    self.st.tok_command = Tok::SET;
                }
            }
            Tok::END => {
                if n != 1 {
                    return Err(Error::syntax(MessageKey::BadArgumentCount, ""));
                }
                let pt1 = self.st.ich_current_command;
                self.check_flow_end(self.the_tok, ident, pt1)?;
                if matches!(self.the_tok, Tok::FUNCTION | Tok::PARALLEL | Tok::TRY) {
                    return Ok(Step::Continue);
                }
            }
            Tok::SWITCH | Tok::WHILE | Tok::IF | Tok::ELSEIF => {
                if n > 2 && self.st.brace_count == 0 && self.st.paren_count == 0 {
                    self.end_flow_header();
                }
            }
            Tok::PROCESS => self.end_flow_header(),
            Tok::FOR => self.for_header(ident, n)?,
            Tok::SET => return self.set_parameter(ident, n),
            Tok::LOAD => {
                if self.the_tok == Tok::DEFINE
                    && (n == 1 || matches!(self.last_token.tok, Tok::FILTER | Tok::SPACEGROUP))
                {
                    self.add_token(Token::with_aux(Tok::DEFINE, Tok::STRING.0, "@"));
                    return Ok(Step::Continue);
                }
                if self.the_tok == Tok::AS {
                    self.i_have_quoted_string = false;
                }
            }
            Tok::DISPLAY | Tok::HIDE | Tok::RESTRICT | Tok::SELECT | Tok::DELETE | Tok::DEFINE => {
                if self.st.tok_command == Tok::DEFINE {
                    if n == 1 {
                        self.define_name(ident)?;
                        let token = self.the_token.clone();
                        self.add_token(token);
                        self.set_last_token(tokens::comma());
                        return Ok(Step::Continue);
                    }
                    if n == 2 && self.the_tok == Tok::OP_EQ {
                        self.ltoken.insert(0, tokens::set_assign());
                        return Ok(Step::Continue);
                    }
                }
                let tok = self.the_tok;
                if self.st.bracket_count == 0
                    && tok != Tok::IDENTIFIER
                    && !tok.has(attr::EXPRESSION)
                    && !tok.has(attr::MISC)
                    && (tok.0 & attr::MINMAX_MASK) != tok.0
                {
                    return Err(Error::syntax(MessageKey::InvalidExpressionToken, ident));
                }
            }
            Tok::CENTER => {
                let tok = self.the_tok;
                if tok != Tok::IDENTIFIER && tok != Tok::DOLLARSIGN && !tok.has(attr::EXPRESSION) {
                    return Err(Error::syntax(MessageKey::InvalidExpressionToken, ident));
                }
            }
            Tok::ISOSURFACE | Tok::PMESH | Tok::PLOT3D => {
                let ch = self.sc.char_at(self.sc.ich + self.sc.cch);
                if self.st.paren_count == 0
                    && self.st.bracket_count == 0
                    && FILE_NAME_STARTS.contains(ch)
                    && !(ch == '-' && ident == "=")
                {
                    let name = self.sc.unquoted_file_name();
                    self.the_token = Token::string(name);
                }
            }
            Tok::SHOW => {
                if n == 2 && self.tok_at(1) == Tok::STATE && self.the_tok == Tok::DIVIDE {
                    self.implicit_string = true;
                }
            }
            _ => {}
        }
        Ok(Step::Proceed)
    }

    /// The first token of a command.
    fn start_command(&mut self, ident: &str) -> Result<Step> {
        self.set_last_token(tokens::off());
        self.st.ich_current_command = self.sc.ich;
        self.st.ich_end = self.sc.ich;
        self.set_command(self.the_token.clone());
        let cmd = self.st.tok_command;
        let is_flow = cmd.has(attr::FLOW_COMMAND);
        if is_flow {
            self.last_flow_command = Some(self.token_command.clone());
        }
        if self.check_flow_end_brace()? == Step::Continue {
            self.is_end_of_command = true;
            self.sc.cch = 0;
            return Ok(Step::Continue);
        }

        if is_flow {
            let name = self.token_command.text().to_string();
            self.check_flow_command(&name)?;
            self.the_token = self.token_command.clone();
            if self.the_tok == Tok::CASE {
                self.add_token(self.token_command.clone());
                self.the_token = tokens::left_paren();
            }
            return Ok(Step::Proceed);
        }
        match self.the_tok {
            Tok::COLON => {
                self.st.brace_count += 1;
                self.is_end_of_command = true;
                return Ok(Step::Proceed);
            }
            Tok::RIGHTBRACE => {
                self.push_brace(self.token_command.clone());
                self.clear_command();
                return Ok(Step::Continue);
            }
            Tok::LEFTBRACE => {}
            _ => self.last_flow_command = None,
        }
        if cmd.has(attr::SCRIPT_COMMAND) {
            return Ok(Step::Proceed);
        }

        self.is_set_brace = self.the_tok == Tok::LEFTBRACE;
        if self.is_set_brace {
            if !self.sc.looking_at_set_brace_syntax() {
                self.is_end_of_command = true;
                if let Some(top) = self.flow.top_mut() {
                    top.set_force_end_if(false);
                }
            }
        } else {
            match self.the_tok {
                Tok::PLUS_PLUS | Tok::MINUS_MINUS => {
                    self.tok_initial_plus_plus = self.the_tok;
                    self.clear_command();
                    return Ok(Step::Continue);
                }
                Tok::IDENTIFIER | Tok::VAR | Tok::DEFINE | Tok::LEFTPAREN => {}
                tok => {
                    if !tok.has(attr::MISC)
                        && !tok.has(attr::SETPARAM)
                        && !self.is_context_variable(ident)
                    {
                        return Err(self.command_expected());
                    }
                }
            }
        }
        self.the_token = self.set_new_set_command(self.is_set_brace, ident);
        Ok(Step::Proceed)
    }

    /// Ends a flow command after its header; the body starts a new command.
    fn end_flow_header(&mut self) {
        self.is_end_of_command = true;
        self.st.ich_end = self.sc.ich + 1;
        let (line, i_command) = (self.st.line, self.i_command());
        if let Some(top) = self.flow.top_mut() {
            top.set_line(line, i_command);
        }
    }

    /// `function name(a, b)`.
    fn function_header(&mut self, ident: &str, n: usize) -> Result<()> {
        match n {
            1 => {
                let kind = if self.st.tok_command == Tok::PARALLEL {
                    FunctionKind::Parallel
                } else {
                    FunctionKind::Function
                };
                if let Some(previous) = self.this_function.take() {
                    self.function_stack.push(previous);
                }
                self.this_function = Some(FunctionDefinition::new(
                    ident,
                    kind,
                    self.i_command() + 1,
                ));
                self.user_functions.insert(ident.to_lowercase());
                if let Some(top) = self.flow.top_mut() {
                    top.has_function = true;
                }
            }
            2 => {
                if self.the_tok != Tok::LEFTPAREN {
                    return Err(Error::syntax(MessageKey::TokenExpected, "("));
                }
            }
            3 if self.the_tok == Tok::RIGHTPAREN => {}
            _ if n % 2 == 0 => {
                if self.the_tok != Tok::COMMA && self.the_tok != Tok::RIGHTPAREN {
                    return Err(Error::syntax(MessageKey::TokenExpected, ")"));
                }
            }
            _ => {
                if let Some(f) = self.this_function.as_mut() {
                    f.add_variable(ident, true);
                }
            }
        }
        Ok(())
    }

    /// `for (init; test; step)` and `for (x in list)`.
    fn for_header(&mut self, ident: &str, n: usize) -> Result<()> {
        if n == 1 {
            if self.the_tok != Tok::LEFTPAREN {
                return Err(Error::syntax(MessageKey::UnrecognizedToken, ident));
            }
            self.for_point3 = 0;
            self.st.n_semi_skip = 2;
        } else if n == 3 && self.tok_at(2) == Tok::VAR {
            self.add_context_variable(ident);
        } else if (n == 3 || n == 4) && self.the_tok == Tok::IN {
            self.st.n_semi_skip -= 2;
            self.for_point3 = 2;
            self.add_token(self.the_token.clone());
            self.the_token = tokens::left_paren();
        } else if self.st.brace_count == 0 && self.st.paren_count == 0 {
            if self.for_point3 != 2 && self.header_semicolons() != 2 {
                return Err(Error::flow_control(MessageKey::BadArgumentCount, "for"));
            }
            self.end_flow_header();
        }
        Ok(())
    }

    /// `;` separators directly inside the outer parentheses of a header.
    fn header_semicolons(&self) -> usize {
        let mut depth = 0;
        let mut count = 0;
        for token in &self.ltoken {
            match token.tok {
                Tok::LEFTPAREN => depth += 1,
                Tok::RIGHTPAREN => depth -= 1,
                Tok::SEMICOLON if depth == 1 => count += 1,
                _ => {}
            }
        }
        count
    }

    /// Tokens of an assignment after its target.
    fn set_parameter(&mut self, ident: &str, n: usize) -> Result<Step> {
        if self.the_tok == Tok::LEFTBRACE {
            self.set_brace_count += 1;
        } else if self.the_tok == Tok::RIGHTBRACE {
            self.set_brace_count -= 1;
            if self.is_set_brace
                && self.set_brace_count == 0
                && self.pt_new_set_modifier == usize::MAX
            {
                self.pt_new_set_modifier = n + 1;
            }
        }
        if n != self.pt_new_set_modifier {
            return Ok(Step::Proceed);
        }
        let target = self.ltoken[0].text().to_string();
        if self.the_tok == Tok::LEFTPAREN || self.is_user_function(&target) {
            let call = Token::with_aux(Tok::IDENTIFIER, 0, target);
            self.set_command(call.clone());
            self.ltoken[0] = call;
            self.set_brace_count = 0;
            return Ok(Step::Proceed);
        }
        let tok = self.the_tok;
        if tok != Tok::IDENTIFIER
            && tok != Tok::ANDEQUALS
            && tok != Tok::DEFINE
            && !tok.has(attr::SETPARAM)
        {
            if self.st.is_new_set {
                return Err(self.command_expected());
            }
            return Err(Error::syntax(
                MessageKey::UnrecognizedParameter,
                format!("SET: {ident}"),
            ));
        }
        if n == 1 && matches!(self.last_token.tok, Tok::PLUS_PLUS | Tok::MINUS_MINUS) {
            let last = self.last_token.clone();
            self.replace_command(tokens::set_assign());
            self.add_token(last);
        }
        Ok(Step::Proceed)
    }

    /// `define name ...`: registers a new name, warning when it shadows a
    /// keyword.
    fn define_name(&mut self, ident: &str) -> Result<()> {
        let tok = self.the_tok;
        if tok == Tok::IDENTIFIER {
            return Ok(());
        }
        if self.flags.predefining {
            if !tok.has(attr::PREDEFINED_SET) && !self.host.is_known_builtin_name(ident) {
                return Err(Error::internal(format!(
                    "predefined term '{ident}' is not a predefined set"
                )));
            }
            return Ok(());
        }
        if tok.has(attr::PREDEFINED_SET) {
            self.warn(format!(
                "predefined term '{ident}' has been redefined by the user until the next file load"
            ));
        } else if !self.flags.check_only && ident.chars().count() > 1 {
            self.warn(format!(
                "redefining {ident}; was {}; not all commands may continue to work",
                self.the_token
            ));
            self.the_tok = Tok::IDENTIFIER;
            self.the_token.tok = Tok::IDENTIFIER;
            self.registry.register(ident, self.the_token.clone());
        }
        Ok(())
    }

    fn warn(&mut self, message: String) {
        if !self.flags.silent {
            tracing::warn!("{message}");
        }
        self.warnings.push(message);
    }
}
