use nom::{IResult, bytes::complete::take_till1, character::complete::satisfy, combinator::map};

use crate::Atom;

/// atom = "0" | "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" | "9" ;
pub(super) fn atom(i: &str) -> IResult<&str, Atom> {
    map(satisfy(|c| c.is_ascii_digit()), |c| {
        Atom::new(c as u8 - b'0')
    })(i)
}

/// Unit Name = { character - "(" }- ;
pub(super) fn unit_name(i: &str) -> IResult<&str, &str> {
    take_till1(|c| c == '(')(i)
}

// Module Tests ========================================================================================================
