//! Open control-flow constructs during assembly.
//!
//! Each open `if`, `for`, `while`, `switch`, `try`, `catch`, `process`,
//! `function` or `parallel` has one [`FlowContext`] on a [`FlowStack`].
//! `else`, `elseif`, `case` and `default` retarget the top context instead
//! of pushing a new one.

use crate::token::Tok;

/// One open control construct.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowContext {
    /// Code of the current branch keyword (`if`, then `elseif`, ...).
    pub tok: Tok,
    /// Spelling of the current branch keyword.
    pub name: String,
    /// Program index of the current branch command.
    pub pt0: usize,
    /// Program index of the `default` branch, once seen.
    pub pt_default: Option<usize>,
    /// Line the construct opened on.
    pub line_start: u32,
    /// Inside `switch { ... }` before its first `case`.
    pub awaiting_case: bool,
    /// A function body is being collected under this context.
    pub has_function: bool,
    force_end_if: bool,
    pt_line: u32,
    pt_command: usize,
}

impl FlowContext {
    /// Opens a context for the command about to be stored at `pt0`.
    #[must_use]
    pub fn new(tok: Tok, name: impl Into<String>, pt0: usize, line: u32, i_command: usize) -> Self {
        Self {
            tok,
            name: name.into(),
            pt0,
            pt_default: None,
            line_start: line,
            awaiting_case: false,
            has_function: false,
            force_end_if: true,
            pt_line: line,
            pt_command: i_command,
        }
    }

    /// Marks the header as finished at `line`; a body that follows on the
    /// same line is a single-line body.
    pub fn set_line(&mut self, line: u32, i_command: usize) {
        self.pt_line = line;
        self.pt_command = i_command + 1;
    }

    /// Moves the branch pointer to `pt` and returns the previous one.
    pub fn set_pt0(&mut self, pt: usize, is_default: bool, line: u32, i_command: usize) -> usize {
        let previous = self.pt0;
        self.pt0 = pt;
        if is_default {
            self.pt_default = Some(pt);
        }
        self.set_line(line, i_command);
        previous
    }

    /// Enables or disables the synthesized single-line `end`.
    pub fn set_force_end_if(&mut self, force: bool) {
        self.force_end_if = force;
    }

    /// True once, when a single-line body has just been completed on the
    /// header's line.
    pub fn check_force_end_if(&mut self, i_command: usize, line: u32) -> bool {
        let due = self.force_end_if && self.pt_command < i_command && self.pt_line == line;
        if due {
            self.force_end_if = false;
        }
        due
    }

    /// True for constructs `break` can leave.
    #[must_use]
    pub const fn is_breakable(&self) -> bool {
        self.tok.is_breakable()
    }
}

/// A pushed variable scope: an anonymous `{ }` block or a loop body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockFrame {
    /// Code of the construct that pushed the scope.
    pub tok: Tok,
    /// Variables declared in the scope.
    pub names: Vec<String>,
}

impl BlockFrame {
    /// An empty scope.
    #[must_use]
    pub const fn new(tok: Tok) -> Self {
        Self {
            tok,
            names: Vec::new(),
        }
    }
}

/// The stack of open contexts, innermost last.
#[derive(Clone, Debug, Default)]
pub struct FlowStack {
    frames: Vec<FlowContext>,
}

impl FlowStack {
    /// An empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Opens a context.
    pub fn push(&mut self, context: FlowContext) {
        self.frames.push(context);
    }

    /// Closes the innermost context.
    pub fn pop(&mut self) -> Option<FlowContext> {
        self.frames.pop()
    }

    /// The innermost context.
    #[must_use]
    pub fn top(&self) -> Option<&FlowContext> {
        self.frames.last()
    }

    /// The innermost context, mutably.
    pub fn top_mut(&mut self) -> Option<&mut FlowContext> {
        self.frames.last_mut()
    }

    /// Number of open contexts.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// True when nothing is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The breakable context `levels` above the innermost breakable one.
    #[must_use]
    pub fn breakable(&self, levels: usize) -> Option<&FlowContext> {
        self.frames
            .iter()
            .rev()
            .filter(|f| f.is_breakable())
            .nth(levels)
    }

    /// The innermost `for` or `while` at or above the innermost breakable
    /// context.
    #[must_use]
    pub fn continuable(&self) -> Option<&FlowContext> {
        let start = self.frames.iter().rposition(FlowContext::is_breakable)?;
        self.frames[..=start]
            .iter()
            .rev()
            .find(|f| f.tok == Tok::FOR || f.tok == Tok::WHILE)
    }

    /// Open contexts, innermost first.
    pub fn iter(&self) -> impl Iterator<Item = &FlowContext> {
        self.frames.iter().rev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(tok: Tok, pt0: usize) -> FlowContext {
        FlowContext::new(tok, "", pt0, 1, pt0)
    }

    #[test]
    fn breakable_levels_skip_non_loops() {
        let mut stack = FlowStack::new();
        stack.push(context(Tok::FOR, 0));
        stack.push(context(Tok::IF, 1));
        stack.push(context(Tok::WHILE, 2));
        stack.push(context(Tok::IF, 3));
        assert_eq!(stack.breakable(0).map(|f| f.pt0), Some(2));
        assert_eq!(stack.breakable(1).map(|f| f.pt0), Some(0));
        assert!(stack.breakable(2).is_none());
    }

    #[test]
    fn continue_passes_over_case() {
        let mut stack = FlowStack::new();
        stack.push(context(Tok::WHILE, 0));
        stack.push(context(Tok::SWITCH, 1));
        stack.top_mut().unwrap().tok = Tok::CASE;
        assert_eq!(stack.breakable(0).map(|f| f.tok), Some(Tok::CASE));
        assert_eq!(stack.continuable().map(|f| f.pt0), Some(0));
    }

    #[test]
    fn continue_needs_a_loop() {
        let mut stack = FlowStack::new();
        stack.push(context(Tok::IF, 0));
        assert!(stack.continuable().is_none());
    }

    #[test]
    fn set_pt0_returns_previous_branch() {
        let mut ctx = context(Tok::IF, 4);
        assert_eq!(ctx.set_pt0(7, false, 3, 7), 4);
        assert_eq!(ctx.pt0, 7);
        assert_eq!(ctx.pt_default, None);
        ctx.set_pt0(9, true, 4, 9);
        assert_eq!(ctx.pt_default, Some(9));
    }

    #[test]
    fn single_line_body_forces_end_once() {
        let mut ctx = FlowContext::new(Tok::IF, "if", 0, 1, 0);
        ctx.set_line(1, 0);
        assert!(!ctx.check_force_end_if(1, 1));
        assert!(ctx.check_force_end_if(2, 1));
        assert!(!ctx.check_force_end_if(2, 1));
    }

    #[test]
    fn body_on_next_line_is_not_forced() {
        let mut ctx = FlowContext::new(Tok::IF, "if", 0, 1, 0);
        ctx.set_line(1, 0);
        assert!(!ctx.check_force_end_if(2, 2));
    }
}
