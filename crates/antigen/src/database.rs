//! Cutting the raw database text into named records and parsing them
//!
//! The database file interleaves identifier lines (serogroup names like
//! `O112_ac`, always opening with `O`) with the notation lines of the record
//! they introduce. Nothing here interprets the notation (that is the
//! parser's job), so this module stays a thin, line-oriented supplier of
//! `(name, lines)` groups.

use crate::{AntigenRecord, Result, overrides};

/// One named group of notation lines, as cut from the database file
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct RawRecord {
    name: String,
    lines: Vec<String>,
}

impl RawRecord {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Builds the record's graph, letting a hand-built fixture take priority
    /// over the general parser.
    pub fn into_record(self) -> Result<AntigenRecord> {
        match overrides::build(&self.name, &self.lines) {
            Some(fixture) => fixture,
            None => AntigenRecord::new(self.name, &self.lines),
        }
    }
}

/// Cuts the database text into named records.
///
/// A record runs from its identifier line to the next one; the final record
/// is flushed at end of input. Zero-length lines and any preamble before the
/// first identifier are skipped.
#[must_use]
pub fn raw_records(text: &str) -> Vec<RawRecord> {
    let mut records = Vec::new();
    let mut current: Option<RawRecord> = None;
    for line in text.lines().filter(|line| !line.is_empty()) {
        if line.starts_with('O') {
            records.extend(current.take());
            current = Some(RawRecord {
                name: line.to_owned(),
                lines: Vec::new(),
            });
        } else if let Some(RawRecord { lines, .. }) = &mut current {
            lines.push(line.to_owned());
        }
    }
    records.extend(current);
    records
}

/// Parses every record in the database text, one `Result` per record, so
/// callers decide whether a bad record skips or aborts the batch.
#[must_use]
pub fn parse(text: &str) -> Vec<Result<AntigenRecord>> {
    raw_records(text)
        .into_iter()
        .map(RawRecord::into_record)
        .collect()
}

// Module Tests ========================================================================================================

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use crate::{BondKind, ErrorKind};

    use super::*;

    const DATABASE: &str = indoc! {"
        O1
        ->4)aLRha(1->6)bDGlc(1->3)bDGlcNAc(1
        O5
              aDGal(1->3)
                       |
        ->4)aLRha(1->6)bDGlc(1->3)bDGlcNAc(1
    "};

    #[test]
    fn records_are_cut_at_identifier_lines() {
        let raw = raw_records(DATABASE);
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].name(), "O1");
        assert_eq!(raw[0].lines().len(), 1);
        // The record at end of input still gets flushed
        assert_eq!(raw[1].name(), "O5");
        assert_eq!(raw[1].lines().len(), 3);
    }

    #[test]
    fn blank_lines_and_preamble_are_skipped() {
        let text = "preamble line\n\nO1\n->4)aLRha(1->6)bDGlc(1->3)bDGlcNAc(1\n\n";
        let raw = raw_records(text);
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0].lines().len(), 1);
    }

    #[test]
    fn parse_runs_every_record_through_the_pipeline() {
        let records = parse(DATABASE);
        assert_eq!(records.len(), 2);
        let o5 = records[1].as_ref().unwrap();
        assert_eq!(o5.name(), "O5");
        assert_eq!(o5.branches().len(), 1);
    }

    #[test]
    fn bad_records_fail_without_poisoning_the_batch() {
        let text = indoc! {"
            O1
            ->4)aLRha(1->6)bDGlc(1->3)bDGlcNAc(1
            O2
            ->4)aLRha(x->6)bDGlc(1
        "};
        let records = parse(text);
        assert!(records[0].is_ok());

        let error = records[1].as_ref().unwrap_err();
        assert_eq!(error.name(), "O2");
        assert!(matches!(error.kind(), ErrorKind::MalformedUnit { .. }));
    }

    #[test]
    fn fixtures_intercept_their_records_before_the_parser() {
        // O118's notation defies the general grammar; whatever lines the
        // database carries for it, the hand-built record wins
        let text = indoc! {"
            O118
            some lines the parser
            would never accept
        "};
        let records = parse(text);
        let [record] = &records[..] else {
            panic!("expected exactly one record");
        };
        let record = record.as_ref().unwrap();
        assert_eq!(record.name(), "O118");
        assert_eq!(record.backbone().units()[0].sugar.bond, BondKind::Phosphodiester);
    }
}
