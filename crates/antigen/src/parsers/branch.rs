//! Branch lines and the connector lines that pin them to the backbone
//!
//! A branch line is a left-to-right run of complete `Name(S->D)` tokens with
//! optional space padding between them. The paired connector line carries one
//! `|` mark per unit; the k-th token claims the k-th mark, and the mark's
//! column decides which backbone unit the side chain hangs off of.

use nom::{
    IResult,
    bytes::complete::tag,
    character::complete::char,
    sequence::{delimited, terminated, tuple},
};

use super::{
    malformed,
    primitives::{atom, unit_name},
};
use crate::{
    Atom, Backbone, BondKind, BranchUnit, SugarUnit,
    errors::{ErrorKind, SpannedError},
};

/// Branch Unit = Unit Name , "(" , atom , "->" , atom , ")" ;
fn branch_unit(i: &str) -> IResult<&str, (&str, Atom, Atom)> {
    tuple((
        terminated(unit_name, char('(')),
        atom,
        delimited(tag("->"), atom, char(')')),
    ))(i)
}

/// Parses one branch line against its paired connector line.
///
/// The mark cursor belongs to this invocation alone: the two branch rows of
/// a 5-line record never share connector state. A line of pure space
/// decoration yields no units; surplus `|` marks after the last token are
/// ignored, but a token without a mark, or a mark left of the first
/// backbone unit, is an attachment error, never a silent default.
pub(crate) fn parse(
    line: &str,
    base: usize,
    connectors: &str,
    connectors_base: usize,
    backbone: &Backbone,
) -> Result<Vec<BranchUnit>, SpannedError> {
    let mut marks = connectors
        .char_indices()
        .filter_map(|(column, c)| (c == '|').then_some(column));

    let mut units = Vec::new();
    let mut rest = line.trim_start();
    while !rest.is_empty() {
        let column = line.len() - rest.len();
        let (after, (name, source_atom, dest_atom)) =
            branch_unit(rest).map_err(|_| malformed(line, base, column))?;
        let token_span = (base + column, rest.len() - after.len());

        let Some(mark) = marks.next() else {
            return Err(SpannedError::new(
                ErrorKind::UnresolvedAttachment { column: None },
                Some(token_span),
            ));
        };
        let Some(attachment) = backbone.unit_below(mark) else {
            return Err(SpannedError::new(
                ErrorKind::UnresolvedAttachment { column: Some(mark) },
                Some((connectors_base + mark, 1)),
            ));
        };

        let sugar = SugarUnit::new(name, source_atom, dest_atom, BondKind::Glycosidic);
        units.push(BranchUnit { sugar, attachment });
        rest = after.trim_start();
    }

    Ok(units)
}

// Module Tests ========================================================================================================
