use console::style;

/// Console status messages. Quiet mode keeps only errors, so report data
/// printed to stdout stays machine-readable.
pub struct Output {
    quiet: bool,
}

impl Output {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("✓").green(), message);
        }
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("⚠").yellow(), message);
        }
    }

    pub fn header(&self, message: &str) {
        if !self.quiet {
            eprintln!("\n{}", style(message).bold().underlined());
        }
    }

    /// Aligned `label: value` line
    pub fn detail(&self, label: &str, value: impl std::fmt::Display) {
        if !self.quiet {
            eprintln!("  {:<14} {}", style(format!("{}:", label)).dim(), value);
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new(false)
    }
}
