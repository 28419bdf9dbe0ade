//! Ordered, append-only sink for the non-fatal messages produced while compiling.
//!
//! Every stage after reading the source pushes into the same [Diagnostics] value,
//! so one run can surface many independent problems. [Display](fmt::Display) on
//! [Diagnostics] renders the summary table printed by the driver.

use std::fmt;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DiagnosticKind {
    Syntax,
    Semantic,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "Syntax"),
            Self::Semantic => write!(f, "Semantic"),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Diagnostic {
    pub line: u64,
    pub message: String,
    pub kind: DiagnosticKind,
    pub fix: String,
}

impl Diagnostic {
    pub fn syntax(line: u64, message: impl Into<String>, fix: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
            kind: DiagnosticKind::Syntax,
            fix: fix.into(),
        }
    }

    pub fn semantic(line: u64, message: impl Into<String>, fix: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
            kind: DiagnosticKind::Semantic,
            fix: fix.into(),
        }
    }
}

#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Diagnostics {
    inner: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, diagnostic: Diagnostic) {
        log::debug!(
            "line {}: {} diagnostic: {}",
            diagnostic.line,
            diagnostic.kind,
            diagnostic.message
        );
        self.inner.push(diagnostic);
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.inner.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.inner
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.inner.iter().filter(move |d| d.kind == kind)
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.inner.is_empty() {
            return writeln!(f, "No errors detected.");
        }

        let widest = |header: &str, cell: &dyn Fn(&Diagnostic) -> usize| {
            self.inner.iter().map(cell).max().unwrap_or(0).max(header.len())
        };
        let line_w = widest("Line", &|d| d.line.to_string().len());
        let msg_w = widest("Error", &|d| d.message.chars().count());
        let kind_w = widest("Type", &|d| d.kind.to_string().len());
        let fix_w = widest("Fix", &|d| d.fix.chars().count());

        let header = format!(
            "{:<line_w$}  {:<msg_w$}  {:<kind_w$}  {:<fix_w$}",
            "Line", "Error", "Type", "Fix"
        );
        writeln!(f, "Summary Table")?;
        writeln!(f, "{header}")?;
        writeln!(f, "{}", "-".repeat(header.len()))?;
        for d in &self.inner {
            let kind = d.kind.to_string();
            writeln!(
                f,
                "{:<line_w$}  {:<msg_w$}  {:<kind_w$}  {:<fix_w$}",
                d.line, d.message, kind, d.fix
            )?;
        }
        Ok(())
    }
}
