use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::scanner::token::Span;

/// A non-fatal lexical error. The scanner reports these and keeps going;
/// nothing here ever aborts a scan.
#[derive(Error, Debug, Diagnostic)]
#[error("scan error: line {line}: {message}")]
#[diagnostic(code(pascal_lex::scan))]
pub struct ScanError {
    message: String,
    line: usize,
    #[label("here")]
    span: SourceSpan,
    #[source_code]
    src: miette::NamedSource<String>,
}

impl ScanError {
    pub fn new(message: impl Into<String>, span: Span, line: usize) -> Self {
        Self {
            message: message.into(),
            line,
            span: span.into(),
            src: miette::NamedSource::new("input", String::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn line(&self) -> usize {
        self.line
    }

    /// Attach source code for fancy miette diagnostics
    pub fn with_source_code(self, name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            src: miette::NamedSource::new(name.into(), source.into()),
            ..self
        }
    }
}

/// Collects the diagnostics of one scan. Each scan owns its collector, so
/// parallel scans never share state.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<ScanError>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, error: ScanError) {
        self.errors.push(error);
    }

    /// True once any error has been reported; never resets.
    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScanError> {
        self.errors.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = ScanError;
    type IntoIter = std::vec::IntoIter<ScanError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_error_implements_diagnostic() {
        let err = ScanError::new("test", Span::new(0, 1), 1);
        let diag: &dyn Diagnostic = &err;
        assert!(diag.code().is_some());
    }

    #[test]
    fn scan_error_display_includes_line() {
        let err = ScanError::new("unknown character '@'", Span::new(8, 1), 2);
        assert_eq!(
            err.to_string(),
            "scan error: line 2: unknown character '@'"
        );
    }

    #[test]
    fn scan_error_with_source() {
        let err = ScanError::new("unterminated string", Span::new(0, 4), 1)
            .with_source_code("test.pas", "'abc");
        assert_eq!(err.message(), "unterminated string");
        assert_eq!(err.line(), 1);
    }

    #[test]
    fn diagnostics_flag_starts_false() {
        let diagnostics = Diagnostics::new();
        assert!(!diagnostics.had_error());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn diagnostics_flag_set_by_report() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report(ScanError::new("first", Span::new(0, 1), 1));
        assert!(diagnostics.had_error());
        diagnostics.report(ScanError::new("second", Span::new(2, 1), 1));
        assert!(diagnostics.had_error());
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn diagnostics_iterate_in_report_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report(ScanError::new("first", Span::new(0, 1), 1));
        diagnostics.report(ScanError::new("second", Span::new(5, 1), 2));
        let messages: Vec<&str> = diagnostics.iter().map(|e| e.message()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }
}
