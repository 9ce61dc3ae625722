//! Command listings for compiled programs.
//!
//! A listing shows one assembled command per row with its index, starting
//! line, and jump target, indented by block depth, followed by the
//! functions, warnings, and error the compiler reported.
//!
//! # Example
//!
//! ```
//! use molscript_language::{CompileFlags, compile};
//! use molscript_runtime::listing::render_listing;
//!
//! let program = compile("if (total > 1) print total", CompileFlags::quiet());
//! let listing = render_listing(&program);
//! assert!(listing.lines().next().unwrap().contains("if ( total > 1 )"));
//! ```

use std::fmt::Write;

use molscript_language::{Command, CompiledProgram, FunctionKind, Tok};

/// Configuration for listings.
#[derive(Debug, Clone)]
pub struct ListingConfig {
    /// Number of spaces for each block level.
    pub indent_width: usize,
    /// Append each command's `[start,end)` source span.
    pub show_spans: bool,
    /// Append backpatched jump targets of flow commands.
    pub show_jumps: bool,
    /// Print the function table after the commands.
    pub show_functions: bool,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            show_spans: false,
            show_jumps: true,
            show_functions: true,
        }
    }
}

/// Renders a program with the default configuration.
#[must_use]
pub fn render_listing(program: &CompiledProgram) -> String {
    render_listing_with_config(program, &ListingConfig::default())
}

/// Renders a program with a custom configuration.
#[must_use]
pub fn render_listing_with_config(program: &CompiledProgram, config: &ListingConfig) -> String {
    let mut printer = ListingPrinter::new(config);
    printer.print(program);
    printer.output
}

/// Renders one command's tokens, or its comment text.
#[must_use]
pub fn render_command(command: &Command) -> String {
    command
        .comment()
        .map_or_else(|| command.render(), ToString::to_string)
}

struct ListingPrinter<'a> {
    config: &'a ListingConfig,
    output: String,
    depth: usize,
}

impl<'a> ListingPrinter<'a> {
    fn new(config: &'a ListingConfig) -> Self {
        Self {
            config,
            output: String::new(),
            depth: 0,
        }
    }

    fn print(&mut self, program: &CompiledProgram) {
        for (index, command) in program.commands.iter().enumerate() {
            self.print_command(index, command);
        }
        if self.config.show_functions {
            for function in &program.functions {
                let name = match function.kind {
                    FunctionKind::Try => "try".to_string(),
                    FunctionKind::Function => format!("function {}", function.name),
                    FunctionKind::Parallel => format!("parallel {}", function.name),
                };
                let _ = writeln!(
                    self.output,
                    "{name}({}) commands {}..{}",
                    function.parameters.join(", "),
                    function.first_command,
                    function.end_command
                );
            }
        }
        for warning in &program.warnings {
            let _ = writeln!(self.output, "warning: {warning}");
        }
        if let Some(message) = &program.error_message {
            let _ = writeln!(self.output, "{message}");
        } else if !program.is_complete {
            let _ = writeln!(self.output, "(incomplete)");
        }
    }

    fn print_command(&mut self, index: usize, command: &Command) {
        let tok = command.tok();
        let closes = matches!(tok, Tok::END | Tok::ENDIF);
        let branches = matches!(tok, Tok::ELSE | Tok::ELSEIF | Tok::CASE | Tok::DEFAULT);
        if closes {
            self.depth = self.depth.saturating_sub(1);
        }
        let level = if branches {
            self.depth.saturating_sub(1)
        } else {
            self.depth
        };

        let _ = write!(
            self.output,
            "{index:>4} {:>4}  {:indent$}{}",
            command.line(),
            "",
            render_command(command),
            indent = level * self.config.indent_width
        );
        if self.config.show_jumps {
            match command.jump() {
                Some(target) if target > 0 => {
                    let _ = write!(self.output, "  -> {target}");
                }
                Some(target) if target < 0 => {
                    let _ = write!(self.output, "  <- {}", -target);
                }
                _ => {}
            }
        }
        if self.config.show_spans {
            let _ = write!(self.output, "  [{},{})", command.span.start, command.span.end);
        }
        self.output.push('\n');

        if is_block_opener(tok) {
            self.depth += 1;
        }
    }
}

fn is_block_opener(tok: Tok) -> bool {
    matches!(
        tok,
        Tok::IF
            | Tok::FOR
            | Tok::WHILE
            | Tok::SWITCH
            | Tok::FUNCTION
            | Tok::PARALLEL
            | Tok::TRY
            | Tok::CATCH
            | Tok::PROCESS
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use molscript_language::{CompileFlags, compile};

    fn listing(script: &str) -> Vec<String> {
        let program = compile(script, CompileFlags::quiet());
        render_listing(&program).lines().map(String::from).collect()
    }

    #[test]
    fn rows_carry_index_and_line() {
        let rows = listing("print 1\nprint 2");
        assert_eq!(rows, ["   0    1  print 1", "   1    2  print 2"]);
    }

    #[test]
    fn blocks_are_indented_and_jumps_shown() {
        let rows = listing("if (total > 1) {\n  print 1\n} else {\n  print 2\n}\n");
        assert_eq!(rows[0], "   0    1  if ( total > 1 )  -> 2");
        assert_eq!(rows[1], "   1    2    print 1");
        assert_eq!(rows[2], "   2    3  else  -> 4");
        assert_eq!(rows[3], "   3    4    print 2");
        assert!(rows[4].ends_with("end if  <- 2"), "{}", rows[4]);
    }

    #[test]
    fn comments_render_as_text() {
        let rows = listing("# note\nprint 1");
        assert_eq!(rows[0], "   0    1  # note");
    }

    #[test]
    fn errors_follow_the_commands() {
        let rows = listing("if (total > 1) {\n  print 1\n");
        assert!(
            rows.iter()
                .any(|r| r.starts_with("script compiler ERROR: missing END for if")),
            "{rows:?}"
        );
        assert!(rows.iter().any(|r| r.contains("end if")));
    }

    #[test]
    fn spans_are_optional() {
        let program = compile("print 1", CompileFlags::quiet());
        let config = ListingConfig {
            show_spans: true,
            ..ListingConfig::default()
        };
        let text = render_listing_with_config(&program, &config);
        assert_eq!(text, "   0    1  print 1  [0,7)\n");
    }
}
