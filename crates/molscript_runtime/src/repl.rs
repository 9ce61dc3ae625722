//! The interactive console.
//!
//! Each complete input is compiled and its command listing printed. Lines
//! starting with `:` are console commands.

use std::io::{self, Write};
use std::path::Path;

use molscript_foundation::{Error, Result};

use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::listing::{ListingConfig, render_listing_with_config};
use crate::session::{Session, needs_more_input};

const CONSOLE_HELP: &str = "\
:help               Show this help
:flags              Show compile flags
:debug on|off       Log each assembled command
:spans on|off       Show source spans in listings
:jumps on|off       Show jump targets in listings
:functions          List functions of the last program
:load PATH          Compile a script file
:quit               Exit";

/// The interactive console.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Session state (compiler, flags, load path).
    session: Session,

    /// How listings are printed.
    listing: ListingConfig,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,

    /// Continuation prompt for open blocks.
    continuation_prompt: String,

    /// Set by `:quit`.
    quit: bool,
}

impl Repl<RustylineEditor> {
    /// Creates a console with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new() -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a console with the given editor.
    pub fn with_editor(editor: E) -> Self {
        Self {
            editor,
            session: Session::new(),
            listing: ListingConfig::default(),
            show_banner: true,
            prompt: "$ ".to_string(),
            continuation_prompt: "> ".to_string(),
            quit: false,
        }
    }

    /// Sets the session for this console.
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    /// Sets the listing configuration.
    #[must_use]
    pub fn with_listing(mut self, listing: ListingConfig) -> Self {
        self.listing = listing;
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Runs the console loop until end of input or `:quit`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        while !self.quit {
            match self.read_eval_print() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => self.print_error(&e),
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// One read-eval-print iteration. Returns `Ok(false)` at end of input.
    fn read_eval_print(&mut self) -> Result<bool> {
        let Some(input) = self.read_input()? else {
            return Ok(false);
        };
        if input.trim().is_empty() {
            return Ok(true);
        }
        self.editor.add_history(&input);

        match self.eval(&input) {
            Ok(output) => {
                if !output.is_empty() {
                    print!("{output}");
                    let _ = io::stdout().flush();
                }
            }
            Err(e) => self.print_error(&e),
        }
        Ok(true)
    }

    /// Reads until the input no longer has open blocks.
    fn read_input(&mut self) -> Result<Option<String>> {
        let mut input = String::new();
        let mut first_line = true;

        loop {
            let result = if first_line {
                self.editor.read_line(&self.prompt)?
            } else {
                self.editor.read_continuation(&self.continuation_prompt)?
            };
            match result {
                ReadResult::Line(line) => {
                    if !first_line {
                        input.push('\n');
                    }
                    input.push_str(&line);
                    if input.trim_start().starts_with(':') || !needs_more_input(&input) {
                        return Ok(Some(input));
                    }
                    first_line = false;
                }
                ReadResult::Interrupted => {
                    if !first_line {
                        println!("\nInput cancelled.");
                    }
                    return Ok(Some(String::new()));
                }
                ReadResult::Eof => {
                    // Compile what was typed; the listing reports the open block.
                    return Ok((!first_line).then_some(input));
                }
            }
        }
    }

    /// Compiles input, or runs a console command, and returns the text to
    /// print.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown console command or an unreadable
    /// file. Compile errors are part of the listing.
    pub fn eval(&mut self, input: &str) -> Result<String> {
        if let Some(command) = input.trim_start().strip_prefix(':') {
            return self.console_command(command.trim());
        }
        let program = self.session.compile(input);
        let output = render_listing_with_config(program, &self.listing);
        let keywords = self.session.keywords();
        self.editor.set_keywords(keywords);
        Ok(output)
    }

    /// Compiles a file and returns its listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn eval_file(&mut self, path: &Path) -> Result<String> {
        if let Some(parent) = path.parent() {
            self.session.set_load_path(parent.to_path_buf());
        }
        let program = self.session.compile_file(path)?;
        Ok(render_listing_with_config(program, &self.listing))
    }

    fn console_command(&mut self, command: &str) -> Result<String> {
        let (name, arg) = command
            .split_once(char::is_whitespace)
            .map_or((command, ""), |(n, a)| (n, a.trim()));
        match name {
            "help" => Ok(format!("{CONSOLE_HELP}\n")),
            "quit" | "exit" => {
                self.quit = true;
                Ok(String::new())
            }
            "flags" => {
                let flags = self.session.flags();
                Ok(format!(
                    "silent={} debug={} check_only={} predefining={}\n",
                    flags.silent, flags.debug, flags.check_only, flags.predefining
                ))
            }
            "debug" => {
                let on = parse_switch(name, arg)?;
                let flags = self.session.flags().with_debug(on);
                self.session.set_flags(flags);
                Ok(String::new())
            }
            "spans" => {
                self.listing.show_spans = parse_switch(name, arg)?;
                Ok(String::new())
            }
            "jumps" => {
                self.listing.show_jumps = parse_switch(name, arg)?;
                Ok(String::new())
            }
            "functions" => {
                let Some(program) = self.session.last_program() else {
                    return Ok(String::new());
                };
                Ok(program
                    .functions
                    .iter()
                    .filter(|f| !f.name.is_empty())
                    .map(|f| format!("{}({})\n", f.name, f.parameters.join(", ")))
                    .collect())
            }
            "load" => {
                if arg.is_empty() {
                    return Err(Error::internal(":load requires a path"));
                }
                let path = self.session.resolve_path(arg);
                let program = self.session.compile_file(&path)?;
                Ok(render_listing_with_config(program, &self.listing))
            }
            _ => Err(Error::internal(format!("unknown console command: :{name}"))),
        }
    }

    /// Prints an error to stderr.
    #[allow(clippy::unused_self)]
    fn print_error(&self, error: &Error) {
        eprintln!("\x1b[31mError: {error}\x1b[0m");
    }

    /// Prints the welcome banner.
    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;36mmolscript console v{}\x1b[0m", env!("CARGO_PKG_VERSION"));
        println!("Type script commands to see their listing. :help for console commands, Ctrl+D to exit.\n");
        let _ = io::stdout().flush();
    }
}

fn parse_switch(name: &str, arg: &str) -> Result<bool> {
    match arg {
        "on" | "true" => Ok(true),
        "off" | "false" => Ok(false),
        _ => Err(Error::internal(format!(":{name} expects on or off"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use molscript_language::CompileFlags;

    /// A scripted editor for tests.
    struct MockEditor {
        inputs: Vec<String>,
        index: usize,
        keywords: Vec<String>,
    }

    impl MockEditor {
        fn new(inputs: Vec<&str>) -> Self {
            Self {
                inputs: inputs.into_iter().map(String::from).collect(),
                index: 0,
                keywords: Vec::new(),
            }
        }
    }

    impl LineEditor for MockEditor {
        fn read_line(&mut self, _prompt: &str) -> Result<ReadResult> {
            if self.index < self.inputs.len() {
                let line = self.inputs[self.index].clone();
                self.index += 1;
                Ok(ReadResult::Line(line))
            } else {
                Ok(ReadResult::Eof)
            }
        }

        fn read_continuation(&mut self, prompt: &str) -> Result<ReadResult> {
            self.read_line(prompt)
        }

        fn add_history(&mut self, _line: &str) {}

        fn set_keywords(&mut self, keywords: Vec<String>) {
            self.keywords = keywords;
        }
    }

    fn repl(inputs: Vec<&str>) -> Repl<MockEditor> {
        Repl::with_editor(MockEditor::new(inputs))
            .with_session(Session::with_flags(CompileFlags::quiet()))
            .without_banner()
    }

    #[test]
    fn eval_prints_listing() {
        let mut repl = repl(vec![]);
        let output = repl.eval("print 1").expect("eval");
        assert_eq!(output, "   0    1  print 1\n");
    }

    #[test]
    fn eval_reports_compile_errors_in_listing() {
        let mut repl = repl(vec![]);
        let output = repl.eval("continue").expect("eval");
        assert!(output.contains("invalid context for continue"), "{output}");
    }

    #[test]
    fn open_block_reads_continuation_lines() {
        let mut repl = repl(vec!["if (total > 1) {", "  print 1", "}"]);
        let input = repl.read_input().expect("read").expect("input");
        assert_eq!(input, "if (total > 1) {\n  print 1\n}");
    }

    #[test]
    fn eof_inside_block_returns_partial_input() {
        let mut repl = repl(vec!["while (total < 3) {"]);
        let input = repl.read_input().expect("read");
        assert_eq!(input.as_deref(), Some("while (total < 3) {"));
        assert!(repl.read_input().expect("read").is_none());
    }

    #[test]
    fn console_switches() {
        let mut repl = repl(vec![]);
        repl.eval(":spans on").expect("spans");
        let output = repl.eval("print 1").expect("eval");
        assert_eq!(output, "   0    1  print 1  [0,7)\n");
        repl.eval(":debug on").expect("debug");
        assert!(repl.session().flags().debug);
        assert!(repl.eval(":spans maybe").is_err());
    }

    #[test]
    fn unknown_console_command_is_an_error() {
        let mut repl = repl(vec![]);
        assert!(repl.eval(":frobnicate").is_err());
        assert!(repl.eval(":load").is_err());
    }

    #[test]
    fn functions_command_lists_definitions() {
        let mut repl = repl(vec![]);
        repl.eval("function square(side) {\n  return side * side\n}")
            .expect("eval");
        assert_eq!(repl.eval(":functions").expect("functions"), "square(side)\n");
    }

    #[test]
    fn define_updates_completion_keywords() {
        let mut repl = repl(vec![]);
        repl.eval("define cartoon protein").expect("eval");
        assert!(repl.editor.keywords.iter().any(|k| k == "cartoon"));
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut repl = repl(vec![":quit", "print 1"]);
        repl.run().expect("run");
        assert_eq!(repl.session().compiled_count(), 0);
    }
}
