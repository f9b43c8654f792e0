//! Assembling whole records out of their classified lines
//!
//! One record is 1, 3, or 5 lines: a single backbone line, flanked (in the
//! 3- and 5-line layouts) by branch lines that pair with a connector line of
//! `|` marks sitting between them and the backbone.

pub(crate) mod backbone;
pub(crate) mod branch;
mod primitives;

use itertools::Itertools;

use crate::{
    AntigenRecord, Backbone, BranchUnit, Result,
    errors::{AntigenError, ErrorKind, SpannedError},
};

pub(crate) fn parse_record(name: String, lines: &[&str]) -> Result<AntigenRecord> {
    match assemble(lines) {
        Ok((backbone, branches)) => Ok(AntigenRecord {
            name,
            backbone,
            branches,
        }),
        Err(error) => Err(AntigenError::boxed(name, lines.join("\n"), error)),
    }
}

type Assembled = (Backbone, Vec<Vec<BranchUnit>>);

fn assemble(lines: &[&str]) -> std::result::Result<Assembled, SpannedError> {
    if !matches!(lines.len(), 1 | 3 | 5) {
        let kind = ErrorKind::UnsupportedRecordShape { lines: lines.len() };
        return Err(SpannedError::new(kind, None));
    }

    let bases = line_offsets(lines);
    let backbone_at = locate_backbone(lines, &bases)?;
    let backbone = backbone::parse(lines[backbone_at], bases[backbone_at])?;

    // The connector line always sits between its branch line and the backbone
    let rows: &[(usize, usize)] = match (lines.len(), backbone_at) {
        (1, 0) => &[],
        (3, 0) => &[(2, 1)],
        (3, 2) => &[(0, 1)],
        (5, 2) => &[(0, 1), (4, 3)],
        (_, at) => {
            let kind = ErrorKind::UnsupportedRecordShape { lines: lines.len() };
            return Err(SpannedError::new(kind, Some((bases[at], lines[at].len()))));
        }
    };

    let branches = rows
        .iter()
        .map(|&(branch_at, connectors_at)| {
            branch::parse(
                lines[branch_at],
                bases[branch_at],
                lines[connectors_at],
                bases[connectors_at],
                &backbone,
            )
        })
        .collect::<std::result::Result<_, _>>()?;

    Ok((backbone, branches))
}

/// The backbone line is the unique line whose first non-space character is `-`.
fn locate_backbone(lines: &[&str], bases: &[usize]) -> std::result::Result<usize, SpannedError> {
    let mut candidates = lines
        .iter()
        .positions(|line| line.trim_start().starts_with('-'));

    let Some(first) = candidates.next() else {
        return Err(SpannedError::new(ErrorKind::NoBackboneFound, None));
    };
    if let Some(second) = candidates.next() {
        let span = (bases[second], lines[second].len());
        return Err(SpannedError::new(
            ErrorKind::MultipleBackbonesFound,
            Some(span),
        ));
    }
    Ok(first)
}

/// Byte offset of each line within the record's `\n`-joined text block
fn line_offsets(lines: &[&str]) -> Vec<usize> {
    lines
        .iter()
        .scan(0, |offset, line| {
            let at = *offset;
            *offset += line.len() + 1;
            Some(at)
        })
        .collect()
}

/// A `MalformedUnit` covering the text from `column` up to the end of the
/// offending token (its closing parenthesis, or the end of the line)
fn malformed(line: &str, base: usize, column: usize) -> SpannedError {
    let tail = &line[column..];
    let fragment = tail.split_inclusive(')').next().unwrap_or(tail);
    SpannedError::new(
        ErrorKind::MalformedUnit {
            fragment: fragment.to_owned(),
        },
        Some((base + column, fragment.len().max(1))),
    )
}

// Module Tests ========================================================================================================

#[cfg(test)]
mod tests {
    use crate::{AntigenRecord, ErrorKind};

    const BACKBONE: &str = "->4)aLRha(1->6)bDGlc(1->3)bDGlcNAc(1";

    fn kind_of(record: crate::Result<AntigenRecord>) -> ErrorKind {
        record.unwrap_err().kind().clone()
    }

    #[test]
    fn one_line_record_is_backbone_only() {
        let record = AntigenRecord::new("O1", &[BACKBONE]).unwrap();
        assert_eq!(record.backbone().len(), 3);
        assert!(record.branches().is_empty());
    }

    #[test]
    fn three_line_record_with_backbone_below() {
        let lines = ["      aDGal(1->3)", "               |", BACKBONE];
        let record = AntigenRecord::new("O5", &lines).unwrap();
        assert_eq!(record.backbone().len(), 3);

        let [row] = record.branches() else {
            panic!("expected exactly one branch row");
        };
        assert_eq!(row.len(), 1);
        assert_eq!(row[0].sugar.name, "aDGal");
        assert_eq!(row[0].attachment, 1);
    }

    #[test]
    fn three_line_record_with_backbone_above() {
        let lines = [BACKBONE, "     |", "     aDGlcNAc(1->2)"];
        let record = AntigenRecord::new("O6", &lines).unwrap();

        let [row] = record.branches() else {
            panic!("expected exactly one branch row");
        };
        assert_eq!(row[0].sugar.name, "aDGlcNAc");
        assert_eq!(row[0].attachment, 0);
    }

    #[test]
    fn five_line_record_keeps_the_top_row_first() {
        let lines = [
            "aDGlcNAc(1->6)",
            "    |",
            BACKBONE,
            "                          |",
            "bDGal(1->4)",
        ];
        let record = AntigenRecord::new("O7", &lines).unwrap();

        let [above, below] = record.branches() else {
            panic!("expected two branch rows");
        };
        assert_eq!(above[0].sugar.name, "aDGlcNAc");
        assert_eq!(above[0].attachment, 0);
        assert_eq!(below[0].sugar.name, "bDGal");
        assert_eq!(below[0].attachment, 2);
    }

    #[test]
    fn even_line_counts_are_rejected() {
        let two = AntigenRecord::new("O2", &[BACKBONE, "   |"]);
        assert_eq!(kind_of(two), ErrorKind::UnsupportedRecordShape { lines: 2 });

        let four = AntigenRecord::new("O4", &["aDGal(1->3)", "   |", BACKBONE, "   |"]);
        assert_eq!(kind_of(four), ErrorKind::UnsupportedRecordShape { lines: 4 });
    }

    #[test]
    fn backbone_between_connectors_is_rejected() {
        let lines = ["aDGal(1->3)", BACKBONE, "aDGal(1->3)"];
        let record = AntigenRecord::new("O8", &lines);
        assert_eq!(kind_of(record), ErrorKind::UnsupportedRecordShape { lines: 3 });
    }

    #[test]
    fn records_without_a_backbone_are_rejected() {
        let record = AntigenRecord::new("O9", &["aDGal(1->3)"]);
        assert_eq!(kind_of(record), ErrorKind::NoBackboneFound);

        let lines = ["aDGal(1->3)", "   |", "aDGal(1->3)"];
        let record = AntigenRecord::new("O9", &lines);
        assert_eq!(kind_of(record), ErrorKind::NoBackboneFound);
    }

    #[test]
    fn records_with_two_backbones_are_rejected() {
        let lines = [BACKBONE, "   |", "  ->3)aDGal(1"];
        let record = AntigenRecord::new("O10", &lines);
        assert_eq!(kind_of(record), ErrorKind::MultipleBackbonesFound);
    }
}
