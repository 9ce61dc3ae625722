//! Compile-time flags.

/// Flags for one compilation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompileFlags {
    /// Suppress error logging.
    pub silent: bool,

    /// Compiling the host's predefined-set definitions; `define` only
    /// accepts predefined-set names or host builtins.
    pub predefining: bool,

    /// Log each assembled command at debug level.
    pub debug: bool,

    /// Syntax check only; `define` does not touch the registry.
    pub check_only: bool,
}

impl CompileFlags {
    /// Flags for compiling without any logging.
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            silent: true,
            ..Self::default()
        }
    }

    /// Flags for compiling with per-command dumps.
    #[must_use]
    pub fn debugging() -> Self {
        Self {
            debug: true,
            ..Self::default()
        }
    }

    /// Builder method to set silent mode.
    #[must_use]
    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Builder method to set predefining mode.
    #[must_use]
    pub fn with_predefining(mut self, predefining: bool) -> Self {
        self.predefining = predefining;
        self
    }

    /// Builder method to enable/disable per-command dumps.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Builder method to set check-only mode.
    #[must_use]
    pub fn with_check_only(mut self, check_only: bool) -> Self {
        self.check_only = check_only;
        self
    }

    /// True when per-command dumps should be logged.
    #[must_use]
    pub fn logs_commands(&self) -> bool {
        self.debug && !self.silent && !self.predefining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flags() {
        let flags = CompileFlags::default();
        assert!(!flags.silent);
        assert!(!flags.predefining);
        assert!(!flags.debug);
        assert!(!flags.check_only);
    }

    #[test]
    fn presets() {
        assert!(CompileFlags::quiet().silent);
        assert!(CompileFlags::debugging().logs_commands());
        assert!(!CompileFlags::debugging().with_silent(true).logs_commands());
        assert!(!CompileFlags::debugging().with_predefining(true).logs_commands());
    }

    #[test]
    fn builder_chain() {
        let flags = CompileFlags::default()
            .with_check_only(true)
            .with_predefining(true);
        assert!(flags.check_only);
        assert!(flags.predefining);
        assert!(!flags.silent);
    }
}
