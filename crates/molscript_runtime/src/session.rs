//! Session state for the console.
//!
//! The session owns the compiler, so names registered by `define` persist
//! from one input to the next, along with the flags, the load path for
//! relative file names, and the last compiled program.

use std::fs;
use std::path::{Path, PathBuf};

use molscript_foundation::{Error, MessageKey, Result};
use molscript_language::{CompileFlags, CompiledProgram, Compiler, TokenRegistry, compile};

/// Session state for an interactive console or a batch run.
pub struct Session {
    /// The compiler, with its registry.
    compiler: Compiler,

    /// Flags applied to every compilation.
    flags: CompileFlags,

    /// Current load path for relative file resolution.
    load_path: PathBuf,

    /// The most recent result.
    last_program: Option<CompiledProgram>,

    /// Number of compilations run.
    compiled: usize,
}

impl Session {
    /// Creates a session with default flags.
    #[must_use]
    pub fn new() -> Self {
        Self::with_flags(CompileFlags::default())
    }

    /// Creates a session with the given flags.
    #[must_use]
    pub fn with_flags(flags: CompileFlags) -> Self {
        Self {
            compiler: Compiler::new(),
            flags,
            load_path: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            last_program: None,
            compiled: 0,
        }
    }

    /// Returns the current flags.
    #[must_use]
    pub const fn flags(&self) -> CompileFlags {
        self.flags
    }

    /// Replaces the flags.
    pub fn set_flags(&mut self, flags: CompileFlags) {
        self.flags = flags;
    }

    /// Returns the token registry, including runtime registrations.
    #[must_use]
    pub fn registry(&self) -> &TokenRegistry {
        self.compiler.registry()
    }

    /// Returns the current load path.
    #[must_use]
    pub fn load_path(&self) -> &PathBuf {
        &self.load_path
    }

    /// Sets the load path.
    pub fn set_load_path(&mut self, path: PathBuf) {
        self.load_path = path;
    }

    /// Resolves a path relative to the current load path.
    #[must_use]
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let p = PathBuf::from(path);
        if p.is_absolute() {
            p
        } else {
            self.load_path.join(p)
        }
    }

    /// Compiles console input.
    pub fn compile(&mut self, source: &str) -> &CompiledProgram {
        self.compiler.set_script_name(None);
        self.run(source)
    }

    /// Reads and compiles a script file, naming it in error locations.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read. Compile errors are
    /// reported on the returned program.
    pub fn compile_file(&mut self, path: &Path) -> Result<&CompiledProgram> {
        let source = fs::read_to_string(path)
            .map_err(|e| Error::internal(format!("failed to read {}: {e}", path.display())))?;
        self.compiler
            .set_script_name(Some(path.display().to_string()));
        Ok(self.run(&source))
    }

    fn run(&mut self, source: &str) -> &CompiledProgram {
        let program = self.compiler.compile(source, self.flags);
        self.compiled += 1;
        tracing::debug!(
            commands = program.len(),
            complete = program.is_complete,
            ok = program.is_ok(),
            "compiled"
        );
        self.last_program.insert(program)
    }

    /// Returns the most recent result.
    #[must_use]
    pub fn last_program(&self) -> Option<&CompiledProgram> {
        self.last_program.as_ref()
    }

    /// Returns the number of compilations run.
    #[must_use]
    pub const fn compiled_count(&self) -> usize {
        self.compiled
    }

    /// Names offered for completion, including names added by `define`.
    #[must_use]
    pub fn keywords(&self) -> Vec<String> {
        self.compiler.registry().completions("")
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// True when `input` only lacks the closers of blocks it opened.
///
/// Input with any other error is complete: the error is reported rather
/// than waiting for more lines.
#[must_use]
pub fn needs_more_input(input: &str) -> bool {
    let program = compile(input, CompileFlags::quiet().with_check_only(true));
    if program.is_complete {
        return false;
    }
    program
        .error
        .as_ref()
        .is_none_or(|e| e.key() == Some(MessageKey::MissingEnd))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_block_needs_more_input() {
        assert!(needs_more_input("if (total > 1) {"));
        assert!(needs_more_input("function square(side) {\n  return side * side"));
        assert!(!needs_more_input("if (total > 1) {\n  print 1\n}"));
        assert!(!needs_more_input("print 1"));
        assert!(!needs_more_input(""));
    }

    #[test]
    fn other_errors_do_not_wait() {
        assert!(!needs_more_input("continue"));
    }

    #[test]
    fn define_persists_between_inputs() {
        let mut session = Session::with_flags(CompileFlags::quiet());
        assert!(session.compile("define cartoon protein").is_ok());
        assert!(session.keywords().iter().any(|k| k == "cartoon"));
        let token = session.registry().lookup("cartoon", false).map(|t| t.tok);
        assert_eq!(token, Some(molscript_language::Tok::IDENTIFIER));
        assert_eq!(session.compiled_count(), 1);
    }

    #[test]
    fn last_program_is_kept() {
        let mut session = Session::with_flags(CompileFlags::quiet());
        session.compile("print 1\nprint 2");
        assert_eq!(session.last_program().map(CompiledProgram::len), Some(2));
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut session = Session::with_flags(CompileFlags::quiet());
        let result = session.compile_file(Path::new("/nonexistent/dir/script.spt"));
        assert!(result.is_err());
    }

    #[test]
    fn resolve_relative_paths() {
        let mut session = Session::new();
        session.set_load_path(PathBuf::from("/scripts"));
        assert_eq!(session.resolve_path("a.spt"), PathBuf::from("/scripts/a.spt"));
        assert_eq!(session.resolve_path("/abs/b.spt"), PathBuf::from("/abs/b.spt"));
    }
}
