//! Status lines for the terminal.

use console::{Style, Term};

/// How a status line is marked and colored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tone {
    Plain,
    Ok,
    Warn,
    Fail,
    Detail,
}

impl Tone {
    fn style(self) -> Style {
        match self {
            Self::Plain => Style::new(),
            Self::Ok => Style::new().green(),
            Self::Warn => Style::new().yellow(),
            Self::Fail => Style::new().red(),
            Self::Detail => Style::new().dim(),
        }
    }

    fn mark(self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Ok => "✓ ",
            Self::Warn => "! ",
            Self::Fail => "✗ ",
            Self::Detail => "  ",
        }
    }

    /// Render `msg` as one status line.
    fn line(self, msg: &str) -> String {
        let text = format!("{}{msg}", self.mark());
        self.style().apply_to(text).to_string()
    }
}

/// Writes status lines to stderr, leaving stdout free.
pub(crate) struct Output {
    term: Term,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    fn write(&self, tone: Tone, msg: &str) {
        let _ = self.term.write_line(&tone.line(msg));
    }

    pub(crate) fn info(&self, msg: &str) {
        self.write(Tone::Plain, msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.write(Tone::Ok, msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.write(Tone::Warn, msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.write(Tone::Fail, msg);
    }

    /// Indented secondary line under the previous status.
    pub(crate) fn detail(&self, msg: &str) {
        self.write(Tone::Detail, msg);
    }
}
