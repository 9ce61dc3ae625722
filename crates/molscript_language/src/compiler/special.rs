//! Command-dependent lexing: literals and implied strings whose meaning
//! depends on the command being assembled.

use molscript_foundation::escape::Unescaped;
use molscript_foundation::{Error, MessageKey, Result, ScriptValue};

use super::{Assembler, Step};
use crate::lexer::{QuotedScan, float_encoded_int};
use crate::token::{Tok, Token, attr, tokens};

/// Atom property names accepted as a `load` format word.
const LOAD_ATOM_DATA_TYPES: [&str; 6] = [
    "xyz",
    "vxyz",
    "vibration",
    "temperature",
    "occupancy",
    "partialcharge",
];

/// Label arguments that are keywords rather than label text.
const LABEL_KEYWORDS: [&str; 4] = ["on", "off", "hide", "display"];

impl Assembler<'_> {
    /// Tries the forms whose meaning depends on the command so far.
    ///
    /// Returns [`Step::Continue`] when a token was added.
    pub(super) fn check_special_parameter_syntax(&mut self) -> Result<Step> {
        if let Some(scan) = self.sc.looking_at_string(!self.implicit_string) {
            if scan == QuotedScan::Unterminated {
                return Err(Error::lexical(
                    MessageKey::UnterminatedString,
                    self.sc.quote_char().to_string(),
                ));
            }
            return self.quoted_string();
        }
        if self.last_token.tok == Tok::ID
            && self.sc.looking_at_implied_string(false, false, false, &self.st)
        {
            let text = self.sc.current_text();
            self.add_token(Token::string(text));
            return Ok(Step::Continue);
        }

        if self.st.n_tokens == self.pt_new_set_modifier {
            if let Some(step) = self.set_modifier()? {
                return Ok(step);
            }
        }

        match self.st.tok_command {
            Tok::LOAD | Tok::SCRIPT | Tok::GETPROPERTY => {
                if let Some(step) = self.file_argument()? {
                    return Ok(step);
                }
            }
            Tok::SYNC => {
                if self.st.n_tokens == 1 && self.sc.look_for_sync_id(&self.st) {
                    let ident = self.sc.current_text();
                    let token = match ident.parse::<i32>() {
                        Ok(id) if id.unsigned_abs() >= 1000 => Token::int(id),
                        _ => Token::identifier(ident),
                    };
                    self.add_token(token);
                    return Ok(Step::Continue);
                }
            }
            Tok::WRITE => {
                if self.st.n_tokens == 2 && self.last_token.tok == Tok::FRAME {
                    self.i_have_quoted_string = true;
                }
                if !self.i_have_quoted_string {
                    if self.sc.char_at(self.sc.ich) == '@' {
                        self.i_have_quoted_string = true;
                        return Ok(Step::Proceed);
                    }
                    if self.sc.looking_at_implied_string(true, true, true, &self.st) {
                        let text = self.sc.current_text();
                        if !text.contains(' ') {
                            self.add_token(Token::string(text));
                            self.i_have_quoted_string = true;
                            return Ok(Step::Continue);
                        }
                    }
                }
            }
            _ => {}
        }

        if self.implicit_string
            && !(self.st.tok_command == Tok::SCRIPT && self.i_have_quoted_string)
            && self.sc.looking_at_implied_string(true, true, true, &self.st)
        {
            let text = self.sc.current_text();
            let lower = text.to_lowercase();
            let keyword = (self.st.tok_command == Tok::LABEL
                && LABEL_KEYWORDS.contains(&lower.as_str()))
            .then(|| self.registry.lookup(&lower, true).cloned())
            .flatten();
            self.add_token(keyword.unwrap_or_else(|| Token::string(text)));
            return Ok(Step::Continue);
        }

        if self.sc.looking_at_object_id(&self.st) {
            let dollar = self
                .registry
                .lookup("$", true)
                .cloned()
                .unwrap_or_else(tokens::dollar_sign);
            self.add_token(dollar);
            let name = self.sc.current_text();
            self.add_token(Token::identifier(name));
            return Ok(Step::Continue);
        }
        self.number_or_set_literal()
    }

    /// A quoted string; file names keep their backslashes, and `data`
    /// strings open an inline data block.
    fn quoted_string(&mut self) -> Result<Step> {
        let cmd = self.st.tok_command;
        let last = self.last_token.tok;
        let is_file_name = !self.i_have_quoted_string
            && last != Tok::INLINE
            && (cmd == Tok::SET && self.st.n_tokens == 2 && last == Tok::DEFAULTDIRECTORY
                || matches!(cmd, Tok::LOAD | Tok::BACKGROUND | Tok::SCRIPT));
        let text = self.sc.unescaped_string_literal(is_file_name);
        self.i_have_quoted_string = true;
        if cmd == Tok::LOAD && last == Tok::DATA || cmd == Tok::DATA && !text.contains('@') {
            if !self.get_data(&text) {
                return Err(Error::flow_control(MessageKey::MissingEnd, "data"));
            }
        } else {
            self.add_token(Token::string(text));
            if self.implicit_string {
                self.st.ich_end = self.sc.ich + self.sc.cch;
                self.is_end_of_command = true;
            }
        }
        Ok(Step::Continue)
    }

    /// The operator right after an assignment target: `=`, `+=`, `.`, `[`.
    ///
    /// Returns `None` to keep scanning.
    fn set_modifier(&mut self) -> Result<Option<Step>> {
        let ch = self.sc.char_at(self.sc.ich);
        let ch2 = self.sc.char_at(self.sc.ich + 1);
        let is_and_equals = "+-\\*/&|=".contains(ch);
        let is_operation = is_and_equals || ch == '.' || ch == '[';
        if !self.st.is_new_set
            && self.is_user_token
            && is_operation
            && (ch == '=' || ch2 == ch || ch2 == '=')
        {
            self.st.is_new_set = true;
        }
        let cmd = self.st.tok_command;
        if !(self.st.is_new_set || cmd == Tok::SET || cmd.has(attr::SETPARAM)) {
            return Ok(None);
        }
        if ch == '=' {
            self.set_equal_pt = self.sc.ich;
        }
        if !(cmd.has(attr::SETPARAM) && ch == '='
            || (self.st.is_new_set || self.is_set_brace) && is_operation)
        {
            return Ok(None);
        }
        let command = if is_and_equals {
            tokens::set_assign()
        } else if ch == '[' && !self.is_set_brace {
            tokens::set_array()
        } else {
            tokens::set_property()
        };
        self.set_command(command.clone());
        self.ltoken.insert(0, command);
        self.sc.cch = 1;
        match ch {
            '[' => {
                self.add_token(Token::named(Tok::LEFTSQUARE, "["));
                self.st.bracket_count += 1;
                Ok(Some(Step::Continue))
            }
            '.' => {
                self.add_token(Token::named(Tok::PER, "."));
                Ok(Some(Step::Continue))
            }
            '-' | '+' | '*' | '/' | '\\' | '&' | '|' => {
                if ch2 == '\0' {
                    return Err(Error::syntax(MessageKey::EndOfCommandUnexpected, ""));
                }
                if ch2 != ch && ch2 != '=' {
                    return Err(Error::syntax(MessageKey::BadContext, format!("\"{ch}\"")));
                }
                Ok(None)
            }
            _ => {
                self.set_last_token(tokens::minus());
                Ok(Some(Step::Continue))
            }
        }
    }

    /// File names, load formats and selection sets after `load`,
    /// `script` and `getproperty`.
    fn file_argument(&mut self) -> Result<Option<Step>> {
        let cmd = self.st.tok_command;
        let n = self.st.n_tokens;
        if self.sc.char_at(self.sc.ich) == '@' {
            self.i_have_quoted_string = true;
            return Ok(Some(Step::Proceed));
        }
        if cmd == Tok::LOAD {
            if (n == 1 || n == 2 && self.tok_at(1) == Tok::APPEND)
                && self.sc.looking_at_load_format(&self.st)
            {
                self.load_format(n)?;
                return Ok(Some(Step::Continue));
            }
            if self.sc.char_at(self.sc.ich) == '{' || self.st.paren_count > 0 {
                return Ok(None);
            }
            if let Some(set) = self.sc.looking_at_bitset() {
                self.add_token(Token::literal(Tok::BITSET, ScriptValue::atoms(set)));
                return Ok(Some(Step::Continue));
            }
        }
        if !self.i_have_quoted_string
            && self
                .sc
                .looking_at_implied_string(false, cmd == Tok::LOAD, n > 1 || cmd != Tok::SCRIPT, &self.st)
        {
            let mut text = self.sc.current_text();
            if cmd == Tok::SCRIPT {
                if text.starts_with("javascript:") {
                    self.sc.looking_at_implied_string(true, true, true, &self.st);
                    text = self.sc.current_text();
                } else if text.to_uppercase().contains(".PUSH(") {
                    self.sc.cch = 0;
                    self.i_have_quoted_string = true;
                    return Ok(Some(Step::Continue));
                }
            }
            self.i_have_quoted_string = true;
            self.add_token(Token::string(text));
            return Ok(Some(Step::Continue));
        }
        Ok(None)
    }

    fn load_format(&mut self, n: usize) -> Result<()> {
        let format = self.sc.current_text();
        let lower = format.to_lowercase();
        let known = self.registry.lookup(&lower, true).cloned();
        match known.as_ref().map_or(Tok::NADA, |t| t.tok) {
            Tok::MENU | Tok::APPEND if n != 1 => {
                Err(Error::syntax(MessageKey::TokenUnexpected, format))
            }
            Tok::MENU
            | Tok::APPEND
            | Tok::DATA
            | Tok::FILE
            | Tok::INLINE
            | Tok::MODEL
            | Tok::SMILES
            | Tok::TRAJECTORY
            | Tok::SYNC => {
                if let Some(token) = known {
                    self.add_token(token);
                }
                Ok(())
            }
            _ => {
                if format.starts_with('=') || format.starts_with('$') {
                    self.add_token(Token::string(format));
                    self.i_have_quoted_string = true;
                } else if LOAD_ATOM_DATA_TYPES.contains(&lower.as_str()) {
                    self.add_token(Token::identifier(lower));
                }
                Ok(())
            }
        }
    }

    /// Numbers, sequence codes, selection sets and matrices.
    fn number_or_set_literal(&mut self) -> Result<Step> {
        if let Some(value) = self.sc.looking_at_exponential() {
            self.add_token(Token::decimal(value, i32::MAX));
            return Ok(Step::Continue);
        }
        if self.sc.looking_at_decimal(&self.st) {
            let text = self.sc.current_text();
            let value = text.parse::<f64>().unwrap_or(f64::NAN);
            self.add_token(Token::decimal(value, float_encoded_int(&text)));
            return Ok(Step::Continue);
        }
        if self.sc.looking_at_seqcode() {
            let Some(code) = self.sc.seqcode_value() else {
                let ch = self.sc.char_at(self.sc.ich);
                return Err(Error::syntax(MessageKey::InvalidExpressionToken, ch.to_string()));
            };
            if code < 0 {
                self.add_token(tokens::minus());
            }
            self.add_token(Token::with_aux(Tok::SEQCODE, code.abs(), "seqcode"));
            return Ok(Step::Continue);
        }
        if let Some(mut value) = self.sc.looking_at_integer() {
            let spelled = self.sc.current_text();
            if matches!(self.st.tok_command, Tok::BREAK | Tok::CONTINUE) {
                if self.st.n_tokens != 1 {
                    return Err(Error::syntax(MessageKey::BadArgumentCount, ""));
                }
                value = value.abs();
                let target = usize::try_from(value)
                    .ok()
                    .and_then(|levels| self.flow.breakable(levels))
                    .map(|f| f.pt0);
                let Some(pt0) = target else {
                    return Err(Error::flow_control(
                        MessageKey::BadContext,
                        self.token_command.text().to_string(),
                    ));
                };
                self.ltoken[0].aux = pt0 as i32;
            }
            if value == 0 && spelled == "-0" {
                self.add_token(tokens::minus());
            }
            self.add_token(Token::integer(value, spelled));
            return Ok(Step::Continue);
        }
        if !self.is_math_expression_command && self.st.paren_count == 0
            || self.last_token.tok != Tok::IDENTIFIER && !self.last_token.has(attr::MATH_FUNC)
        {
            let is_bond_or_matrix = self.sc.char_at(self.sc.ich) == '[';
            if let Some(set) = self.sc.looking_at_bitset() {
                let value = if is_bond_or_matrix {
                    ScriptValue::bonds(set, None)
                } else {
                    ScriptValue::atoms(set)
                };
                self.add_token(Token::literal(Tok::BITSET, value));
                return Ok(Step::Continue);
            }
            if is_bond_or_matrix {
                match self.sc.looking_at_matrix() {
                    Some(Unescaped::Matrix3(m)) => {
                        self.add_token(Token::literal(Tok::MATRIX3F, ScriptValue::matrix3(m)));
                        return Ok(Step::Continue);
                    }
                    Some(Unescaped::Matrix4(m)) => {
                        self.add_token(Token::literal(Tok::MATRIX4F, ScriptValue::matrix4(m)));
                        return Ok(Step::Continue);
                    }
                    _ => {}
                }
            }
        }
        Ok(Step::Proceed)
    }

    /// Reads an inline data block `"key" ... END "key"` and adds its tokens.
    ///
    /// Returns false if the closing `END "key"` is missing.
    pub(super) fn get_data(&mut self, key: &str) -> bool {
        self.add_token(Token::string(key));
        let key_len = key.chars().count();
        let mut i = self.sc.ich + key_len + 2;
        let len = self.sc.len();
        if i < len && self.sc.char_at(i) == '\r' {
            self.st.line += 1;
            i += 1;
        }
        if i < len && self.sc.char_at(i) == '\n' {
            if self.sc.char_at(i - 1) != '\r' {
                self.st.line += 1;
            }
            i += 1;
        }
        let marker = format!("\"{key}\"");
        let Some(found) = self.sc.find(&marker, i) else {
            return false;
        };
        let Some(end) = found.checked_sub(4).filter(|&e| e >= i) else {
            return false;
        };
        if !self.sc.text(end, end + 4).eq_ignore_ascii_case("END ") {
            return false;
        }
        let data = self.sc.text(i, end);
        crate::lexer::Scanner::increment_line_count(&data, &mut self.st);
        self.add_token(Token::named(Tok::DATA, data));
        self.add_token(Token::identifier("end"));
        self.add_token(Token::string(key));
        self.sc.ich = i;
        self.sc.cch = end - i + key_len + 6;
        true
    }
}
