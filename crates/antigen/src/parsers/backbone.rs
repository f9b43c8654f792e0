//! The backbone line: a closed ring written with a wraparound convention
//!
//! The line opens with `->D)`, the destination atom that the ring's *last*
//! unit closes back through, followed by one `Name(S->D)` token per unit.
//! The final token is the short form `Name(S`: its destination is the
//! opening digit and its successor wraps to index 0.

use nom::{
    IResult,
    bytes::complete::tag,
    character::complete::{char, space0},
    sequence::{delimited, pair, terminated},
};

use super::{
    malformed,
    primitives::{atom, unit_name},
};
use crate::{
    Atom, Backbone, BackboneUnit, BondKind, SugarUnit,
    errors::SpannedError,
};

/// Ring Closure = { " " } , "->" , atom , ")" ;
fn ring_closure(i: &str) -> IResult<&str, Atom> {
    delimited(pair(space0, tag("->")), atom, char(')'))(i)
}

/// Unit Start = Unit Name , "(" , atom ;
fn unit_start(i: &str) -> IResult<&str, (&str, Atom)> {
    pair(terminated(unit_name, char('(')), atom)(i)
}

/// Interior Linkage = "->" , atom , ")" ;
fn interior_linkage(i: &str) -> IResult<&str, Atom> {
    delimited(tag("->"), atom, char(')'))(i)
}

/// Parses a backbone line into its ring of units.
///
/// `base` is the line's byte offset within the record's joined text block,
/// used to report error spans; unit columns stay line-relative since the
/// connector marks they align against live on lines of the same record.
pub(crate) fn parse(line: &str, base: usize) -> Result<Backbone, SpannedError> {
    let (mut rest, closure) = ring_closure(line).map_err(|_| malformed(line, base, 0))?;
    if rest.is_empty() {
        // A ring closure with no ring
        return Err(malformed(line, base, 0));
    }

    let mut units = Vec::new();
    loop {
        let column = line.len() - rest.len();
        let (after_source, (name, source_atom)) =
            unit_start(rest).map_err(|_| malformed(line, base, column))?;

        if after_source.is_empty() {
            // The short closing token wraps the ring back onto its first unit
            let sugar = SugarUnit::new(name, source_atom, closure, BondKind::Glycosidic);
            units.push(BackboneUnit::new(sugar, 0, column));
            return Ok(Backbone::from_units(units));
        }

        let (after_linkage, dest_atom) =
            interior_linkage(after_source).map_err(|_| malformed(line, base, column))?;
        let sugar = SugarUnit::new(name, source_atom, dest_atom, BondKind::Glycosidic);
        units.push(BackboneUnit::new(sugar, units.len() + 1, column));
        rest = after_linkage;

        if rest.is_empty() {
            // The line ended on a complete token, so nothing closes the ring
            return Err(malformed(line, base, column));
        }
    }
}

// Module Tests ========================================================================================================
