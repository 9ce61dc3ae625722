//! Opening and closing control-flow constructs, block scopes, and the
//! rewrites that turn bare assignments into `set` commands.

use molscript_foundation::{Error, MessageKey, Result, ScriptValue};

use super::{Assembler, Step};
use crate::flow::{BlockFrame, FlowContext};
use crate::program::{FunctionDefinition, FunctionKind};
use crate::token::{Tok, Token, attr, tokens};

impl Assembler<'_> {
    /// Validates a flow command against the open contexts and opens,
    /// retargets or closes one. Records jump patches along the way.
    pub(super) fn check_flow_command(&mut self, ident: &str) -> Result<()> {
        let pt = self.i_command();
        let line = self.st.line;
        let cmd = self.st.tok_command;
        let bad_context = || Error::flow_control(MessageKey::BadContext, ident);
        let top_tok = self.flow.top().map(|f| f.tok);

        match cmd {
            Tok::FUNCTION | Tok::PARALLEL => {
                if !self.flow.is_empty() {
                    return Err(Error::flow_control(
                        MessageKey::BadContext,
                        self.registry.name_of(cmd),
                    ));
                }
            }
            Tok::END | Tok::ENDIF => {
                let Some(top) = self.flow.top() else {
                    return Err(bad_context());
                };
                if cmd == Tok::ENDIF
                    && !matches!(top.tok, Tok::IF | Tok::PROCESS | Tok::ELSE | Tok::ELSEIF)
                {
                    return Err(bad_context());
                }
                let pt0 = top.pt0;
                if !matches!(top.tok, Tok::FUNCTION | Tok::PARALLEL | Tok::TRY) {
                    let aux = top
                        .pt_default
                        .map_or(-(pt0 as i32), |default| default as i32);
                    self.set_command(Token::with_aux(cmd, aux, ident));
                }
                self.patches.insert(pt0, pt as i32);
                if cmd == Tok::ENDIF {
                    self.flow.pop();
                }
                return Ok(());
            }
            Tok::BREAK | Tok::CONTINUE => {
                let target = if cmd == Tok::CONTINUE {
                    self.flow.continuable()
                } else {
                    self.flow.breakable(0)
                };
                let Some(target) = target else {
                    return Err(bad_context());
                };
                let pt0 = target.pt0 as i32;
                self.set_command(Token::with_aux(cmd, pt0, ident));
                return Ok(());
            }
            Tok::ELSE => {
                if !matches!(top_tok, Some(Tok::IF | Tok::ELSEIF)) {
                    return Err(bad_context());
                }
                self.next_branch(pt, false, line);
            }
            Tok::ELSEIF => {
                if !matches!(top_tok, Some(Tok::IF | Tok::ELSEIF | Tok::ELSE)) {
                    return Err(Error::flow_control(MessageKey::BadContext, "elseif"));
                }
                self.next_branch(pt, false, line);
            }
            Tok::CASE => {
                if !matches!(top_tok, Some(Tok::SWITCH | Tok::CASE | Tok::DEFAULT)) {
                    return Err(bad_context());
                }
                self.next_branch(pt, false, line);
            }
            Tok::DEFAULT => {
                let has_default = self.flow.top().is_some_and(|f| f.pt_default.is_some());
                if !matches!(top_tok, Some(Tok::SWITCH | Tok::CASE)) || has_default {
                    return Err(bad_context());
                }
                self.next_branch(pt, true, line);
            }
            _ => {}
        }

        let name = self.token_command.text().to_string();
        self.set_command(Token::named(cmd, name.clone()));
        match cmd {
            Tok::TRY => {
                self.flow.push(FlowContext::new(cmd, name, pt, line, pt));
                if let Some(previous) = self.this_function.take() {
                    self.function_stack.push(previous);
                }
                self.this_function = Some(FunctionDefinition::new("", FunctionKind::Try, pt + 1));
                if let Some(top) = self.flow.top_mut() {
                    top.has_function = true;
                }
                self.frames.push(BlockFrame::new(Tok::TRY));
            }
            Tok::ELSE | Tok::ELSEIF => {
                if let Some(top) = self.flow.top_mut() {
                    top.tok = cmd;
                    top.name = name;
                }
            }
            Tok::CASE | Tok::DEFAULT => {
                if let Some(top) = self.flow.top_mut() {
                    top.tok = cmd;
                    top.name = name;
                    top.awaiting_case = false;
                }
            }
            Tok::PROCESS | Tok::FOR | Tok::WHILE | Tok::CATCH => {
                self.frames.push(BlockFrame::new(cmd));
                self.flow.push(FlowContext::new(cmd, name, pt, line, pt));
            }
            _ => self.flow.push(FlowContext::new(cmd, name, pt, line, pt)),
        }
        Ok(())
    }

    /// Moves the open construct to a new branch at `pt`; the previous
    /// branch jumps here when its test fails.
    fn next_branch(&mut self, pt: usize, is_default: bool, line: u32) {
        if let Some(top) = self.flow.top_mut() {
            let previous = top.set_pt0(pt, is_default, line, pt);
            self.patches.insert(previous, pt as i32);
        }
    }

    /// Closes the innermost construct with `end <tok>`.
    ///
    /// `pt1` is the source offset where a function body ends.
    pub(super) fn check_flow_end(&mut self, tok: Tok, ident: &str, pt1: usize) -> Result<()> {
        let mismatch = || Error::flow_control(MessageKey::BadContext, format!("end {ident}"));
        let Some(top) = self.flow.top() else {
            return Err(mismatch());
        };
        if top.tok != tok {
            let compatible = match tok {
                Tok::IF => matches!(top.tok, Tok::ELSE | Tok::ELSEIF),
                Tok::SWITCH => matches!(top.tok, Tok::CASE | Tok::DEFAULT),
                _ => false,
            };
            if !compatible {
                return Err(mismatch());
            }
        }
        match tok {
            Tok::IF | Tok::SWITCH => {}
            Tok::CATCH | Tok::FOR | Tok::PROCESS | Tok::WHILE => {
                self.frames.pop();
            }
            Tok::FUNCTION | Tok::PARALLEL | Tok::TRY => {
                let finished = self.this_function.take();
                if !self.flags.check_only {
                    self.add_token(Token::named(tok, ident));
                    if let Some(mut function) = finished {
                        function.end_offset = pt1.max(function.start_offset);
                        function.end_command = self.i_command();
                        tracing::debug!(
                            name = %function.name,
                            commands = ?function.body(),
                            "function collected"
                        );
                        self.functions.push(function);
                    }
                }
                self.this_function = self.function_stack.pop();
                if tok == Tok::TRY {
                    self.frames.pop();
                }
            }
            _ => {
                return Err(Error::syntax(
                    MessageKey::UnrecognizedToken,
                    format!("end {ident}"),
                ));
            }
        }
        self.flow.pop();
        Ok(())
    }

    /// True if the current command is a flow command that can own a
    /// `{ }` body. At the end of its header, records the opener.
    pub(super) fn check_flow_start_brace(&mut self, at_end: bool) -> bool {
        let cmd = self.st.tok_command;
        if !cmd.has(attr::FLOW_COMMAND) || cmd == Tok::BREAK || cmd == Tok::CONTINUE {
            return false;
        }
        if at_end {
            if !matches!(self.token_command.tok, Tok::CASE | Tok::DEFAULT) {
                self.push_brace(self.token_command.clone());
                self.last_flow_command = None;
            }
            if cmd == Tok::SWITCH {
                if let Some(top) = self.flow.top_mut() {
                    top.awaiting_case = true;
                }
            }
            self.st.paren_count = 0;
            self.st.brace_count = 0;
        }
        true
    }

    /// Acts on a pending `}`: closes an anonymous block, lets `else` or
    /// `case` continue their construct, or synthesizes the `end`.
    pub(super) fn check_flow_end_brace(&mut self) -> Result<Step> {
        if self.braces.last().map(|t| t.tok) != Some(Tok::RIGHTBRACE) {
            return Ok(Step::Proceed);
        }
        self.pop_brace();
        let Some(opener) = self.pop_brace() else {
            return Ok(Step::Proceed);
        };
        if self.the_tok == Tok::LEFTBRACE {
            self.st.brace_count -= 1;
            self.st.paren_count -= 1;
        }
        if opener.tok == Tok::PUSH {
            self.frames.pop();
            let close = tokens::block_close();
            self.set_command(close.clone());
            self.add_token(close);
            self.is_end_of_command = true;
            return Ok(Step::Continue);
        }
        let cmd = self.st.tok_command;
        match self.flow.top().map(|f| f.tok) {
            Some(Tok::IF | Tok::ELSEIF | Tok::ELSE) if matches!(cmd, Tok::ELSE | Tok::ELSEIF) => {
                Ok(Step::Proceed)
            }
            Some(Tok::SWITCH | Tok::CASE | Tok::DEFAULT)
                if matches!(cmd, Tok::CASE | Tok::DEFAULT) =>
            {
                Ok(Step::Proceed)
            }
            _ => self.force_flow_end(&opener),
        }
    }

    /// Adds `end <construct>` for the construct `opener` began.
    pub(super) fn force_flow_end(&mut self, opener: &Token) -> Result<Step> {
        let saved = self.token_command.clone();
        self.set_command(Token::named(Tok::END, "end"));
        self.check_flow_command("end")?;
        self.add_token(self.token_command.clone());
        let (tok, name) = match opener.tok {
            Tok::IF | Tok::ELSE | Tok::ELSEIF => (Tok::IF, "if".to_string()),
            Tok::CASE | Tok::DEFAULT => (Tok::SWITCH, "switch".to_string()),
            tok => (tok, self.registry.name_of(tok)),
        };
        self.check_flow_end(tok, &name, self.ich_brace)?;
        if !matches!(tok, Tok::FUNCTION | Tok::PARALLEL | Tok::TRY) {
            self.add_token(Token::named(tok, name));
        }
        self.set_command(saved);
        Ok(Step::Continue)
    }

    /// Declares a variable in the innermost scope.
    pub(super) fn add_context_variable(&mut self, ident: &str) {
        let name = ident.to_lowercase();
        if let Some(frame) = self.frames.last_mut().filter(|f| f.tok != Tok::TRY) {
            if !frame.names.contains(&name) {
                frame.names.push(name);
            }
            return;
        }
        match self.this_function.as_mut() {
            Some(function) => function.add_variable(&name, false),
            None => {
                let value = ScriptValue::string("").set_name(name.clone());
                self.declared.insert(name, value);
            }
        }
    }

    /// True if `name` was declared in an open scope, the current function,
    /// or at top level.
    pub(super) fn is_context_variable(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        if self.frames.iter().any(|f| f.names.contains(&name)) {
            return true;
        }
        match &self.this_function {
            Some(function) => function.is_variable(&name),
            None => self.declared.contains_key(&name),
        }
    }

    pub(super) fn is_user_function(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        !self.flags.predefining
            && (self.this_function.as_ref().is_some_and(|f| f.name == name)
                || self.user_functions.contains(&name))
    }

    /// Turns the current command into an assignment to `ident`.
    pub(super) fn set_new_set_command(&mut self, is_set_brace: bool, ident: &str) -> Token {
        self.st.tok_command = Tok::SET;
        self.st.is_new_set = !is_set_brace && !self.is_user_function(ident);
        self.set_brace_count = i32::from(is_set_brace);
        self.st.bracket_count = 0;
        self.set_equal_pt = usize::MAX;
        self.pt_new_set_modifier = match (self.st.is_new_set, ident) {
            (true, "(") => 2,
            (true, _) => 1,
            (false, _) => usize::MAX,
        };
        if is_set_brace || matches!(self.the_token.tok, Tok::PLUS_PLUS | Tok::MINUS_MINUS) {
            self.the_token.clone()
        } else {
            Token::identifier(ident)
        }
    }

    /// Rewrites `name ...` as `set name ...` when `name` is a declared
    /// variable that is also a command name.
    pub(super) fn check_new_set_command(&mut self) -> bool {
        let Some(first) = self.ltoken.first() else {
            return false;
        };
        let name = first.text().to_string();
        if !self.is_context_variable(&name) {
            return false;
        }
        self.set_new_set_command(false, &name);
        let set = tokens::set_assign();
        self.set_command(set.clone());
        self.ltoken.insert(0, set);
        self.ltoken[1] = Token::identifier(name.to_lowercase());
        true
    }

    /// `x++` and `++x` become `set x = x + 1`.
    pub(super) fn tokenize_plus_plus(&mut self, tok: Tok, is_prefix: bool) {
        if is_prefix {
            let set = tokens::set_assign();
            self.set_command(set.clone());
            self.ltoken.insert(0, set);
        }
        let n = self.ltoken.len();
        self.add_token(tokens::equals());
        self.set_equal_pt = 0;
        for i in 1..n {
            let target = self.ltoken[i].clone();
            self.add_token(target);
        }
        self.add_token(if tok == Tok::MINUS_MINUS {
            tokens::minus()
        } else {
            tokens::plus()
        });
        self.add_token(Token::int(1));
    }
}
