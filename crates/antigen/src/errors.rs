use std::iter;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode, SourceSpan};
use thiserror::Error;

pub type Result<T, E = Box<AntigenError>> = std::result::Result<T, E>;

/// A parse failure for one record, carrying the record's text block so that
/// reports can point at the offending fragment or line
#[derive(Debug, Error)]
#[error("could not parse the antigen record {name}")]
pub struct AntigenError {
    name: String,
    src: NamedSource<String>,
    span: Option<SourceSpan>,
    #[source]
    kind: ErrorKind,
}

impl AntigenError {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub(crate) fn boxed(name: String, block: String, error: SpannedError) -> Box<Self> {
        let src = NamedSource::new(&name, block);
        Box::new(Self {
            name,
            src,
            span: error.span,
            kind: error.kind,
        })
    }
}

impl Diagnostic for AntigenError {
    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.src)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span?;
        let label = LabeledSpan::new_with_span(Some(self.kind.to_string()), span);
        Some(Box::new(iter::once(label)))
    }

    fn diagnostic_source(&self) -> Option<&dyn Diagnostic> {
        Some(&self.kind)
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Error, Diagnostic)]
pub enum ErrorKind {
    #[diagnostic(help(
        "exactly one line of a record must open (after any leading spaces) with the ring-closure \
        arrow '->'"
    ))]
    #[error("no backbone line found")]
    NoBackboneFound,

    #[error("more than one backbone line found")]
    MultipleBackbonesFound,

    #[diagnostic(help(
        "supported layouts are 1 line (backbone only), 3 lines (one branch row and its connector \
        line), and 5 lines (a backbone between two branch rows)"
    ))]
    #[error("{lines} line(s) do not form a supported record layout")]
    UnsupportedRecordShape { lines: usize },

    #[diagnostic(help(
        "every unit is written as Name(S->D) with single-digit ring atoms, and the backbone line \
        ends with a short Name(S token that closes the ring back on its first unit"
    ))]
    #[error("malformed sugar unit {fragment:?}")]
    MalformedUnit { fragment: String },

    #[diagnostic(help(
        "each branch unit claims the next '|' mark on the connector line, and that mark must sit \
        within the columns of a backbone unit"
    ))]
    #[error("branch unit could not be attached to a backbone position")]
    UnresolvedAttachment { column: Option<usize> },
}

/// A parser-internal error: an [`ErrorKind`] plus the span (absolute within
/// the record's joined text block) it should be reported at
#[derive(Debug)]
pub(crate) struct SpannedError {
    pub(crate) span: Option<SourceSpan>,
    pub(crate) kind: ErrorKind,
}

impl SpannedError {
    pub(crate) fn new(kind: ErrorKind, span: Option<(usize, usize)>) -> Self {
        Self {
            span: span.map(SourceSpan::from),
            kind,
        }
    }
}

// Module Tests ========================================================================================================

#[cfg(test)]
mod tests {
    use miette::{GraphicalReportHandler, GraphicalTheme};

    use crate::AntigenRecord;

    use super::*;

    fn render(error: &AntigenError) -> String {
        let mut out = String::new();
        GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
            .with_width(80)
            .render_report(&mut out, error)
            .unwrap();
        out
    }

    #[test]
    fn reports_name_the_record_and_the_fragment() {
        let error = AntigenRecord::new("O9", &["->4)aLRha(x->6)bDGlc(1"]).unwrap_err();
        assert_eq!(error.name(), "O9");
        assert_eq!(
            *error.kind(),
            ErrorKind::MalformedUnit {
                fragment: "aLRha(x->6)".to_owned()
            }
        );

        let report = render(&error);
        assert!(report.contains("could not parse the antigen record O9"));
        assert!(report.contains("malformed sugar unit"));
        assert!(report.contains("aLRha(x->6)"));
    }

    #[test]
    fn shape_errors_render_without_a_span() {
        let error = AntigenRecord::new("O2", &["->4)aLRha(1", "   |"]).unwrap_err();
        assert_eq!(*error.kind(), ErrorKind::UnsupportedRecordShape { lines: 2 });
        assert_eq!(
            error.kind().to_string(),
            "2 line(s) do not form a supported record layout"
        );
        assert!(error.labels().is_none());

        let report = render(&error);
        assert!(report.contains("could not parse the antigen record O2"));
    }

    #[test]
    fn spans_point_into_the_joined_record_block() {
        // The branch token on line 0 is fine; its '|' mark on line 1 points
        // left of every backbone unit
        let lines = ["aDGal(1->3)", "  |", "->4)aLRha(1->6)bDGlc(1->3)bDGlcNAc(1"];
        let error = AntigenRecord::new("O11", &lines).unwrap_err();
        assert_eq!(
            *error.kind(),
            ErrorKind::UnresolvedAttachment { column: Some(2) }
        );

        let labels: Vec<_> = error.labels().unwrap().collect();
        let [label] = &labels[..] else {
            panic!("expected exactly one label");
        };
        // Line 0 is 11 characters + the newline; the mark sits 2 further in
        assert_eq!(label.offset(), 14);
    }
}
