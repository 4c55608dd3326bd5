//! Colored terminal output utilities.
//!
//! Status messages go to stderr; command results (navigation listings,
//! snippet code, the current theme) go to stdout so they can be piped.

use console::{Style, Term};

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    out: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
    dim: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            out: Term::stdout(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
            dim: Style::new().dim(),
        }
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print a result line to stdout.
    pub(crate) fn data(&self, msg: &str) {
        let _ = self.out.write_line(msg);
    }

    /// Print a heading to stdout (cyan bold).
    pub(crate) fn heading(&self, msg: &str) {
        let _ = self.out.write_line(&self.cyan_bold.apply_to(msg).to_string());
    }

    /// Print an emphasized result line to stdout (green).
    pub(crate) fn data_active(&self, msg: &str) {
        let _ = self.out.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print a secondary result line to stdout (dim).
    pub(crate) fn data_dim(&self, msg: &str) {
        let _ = self.out.write_line(&self.dim.apply_to(msg).to_string());
    }
}
