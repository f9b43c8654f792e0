//! Responsible for parsing the hand-drawn O-antigen structure notation into
//! ring-and-branch glycan graphs
//!
//! A record in the database is a small ASCII diagram: one backbone line
//! writing a closed ring of sugar units with `(1->6)`-style linkage
//! annotations, optionally flanked by branch lines whose `|` connector marks
//! point at the backbone position each side chain hangs off of.
//!
//! ```text
//!       aDGal(1->3)
//!                 |
//! ->4)aLRha(1->6)bDGlc(1->3)bDGlcNAc(1
//! ```
//!
//! Parsing is pure: every record's lines are consumed exactly once into one
//! immutable [`AntigenRecord`], with no state shared between records.

pub mod database;
mod errors;
pub mod overrides;
mod parsers;

use std::fmt::{self, Display, Formatter};

use serde::Serialize;

pub use errors::{AntigenError, ErrorKind, Result};

/// A single-digit ring-carbon position (0-9) involved in a glycosidic bond
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
pub struct Atom(u8);

/// How a sugar unit bonds to its neighbour
///
/// The notation grammar only ever writes plain glycosidic `->` bonds; the
/// bridged kinds exist for the hand-built records in [`overrides`].
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Debug, Serialize)]
pub enum BondKind {
    /// Rendered as `->`
    #[default]
    Glycosidic,
    /// Phosphodiester bridge, rendered as `-P-`
    Phosphodiester,
    /// Nitrogen bridge, rendered as `-N-`
    Nitrogen,
}

/// One monosaccharide occurrence, with the atoms of its outgoing bond
///
/// Names are opaque: nothing here validates them against a chemical
/// vocabulary, and strings like `bDGlcNAc4,6(S)Pyr` pass through untouched.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub struct SugarUnit {
    pub name: String,
    pub source_atom: Atom,
    pub dest_atom: Atom,
    pub bond: BondKind,
}

/// A ring member: a sugar unit plus the index of the next unit around the ring
#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
pub struct BackboneUnit {
    pub sugar: SugarUnit,
    pub successor: usize,
    column: usize,
}

/// The closed ring of sugar units forming an antigen's core cycle
///
/// Successors form a single full cycle by construction (1, 2, ..., n-1, 0),
/// and unit columns strictly increase along the sequence; branch attachment
/// depends on both.
#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
pub struct Backbone(Vec<BackboneUnit>);

/// A side-chain unit hanging off `backbone[attachment]`
#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
pub struct BranchUnit {
    pub sugar: SugarUnit,
    pub attachment: usize,
}

/// One fully parsed record: a named backbone ring and its branch rows
#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
pub struct AntigenRecord {
    name: String,
    backbone: Backbone,
    branches: Vec<Vec<BranchUnit>>,
}

// Public API ==========================================================================================================

impl AntigenRecord {
    /// Parses one record's lines into its structure graph.
    ///
    /// The supported layouts are 1 line (backbone only), 3 lines (backbone
    /// above or below a connector/branch pair), and 5 lines (backbone
    /// between two connector/branch pairs). Hand-built records bypass this
    /// entirely; see [`overrides`].
    pub fn new(name: impl Into<String>, lines: &[impl AsRef<str>]) -> Result<Self> {
        let lines: Vec<_> = lines.iter().map(AsRef::as_ref).collect();
        parsers::parse_record(name.into(), &lines)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn backbone(&self) -> &Backbone {
        &self.backbone
    }

    #[must_use]
    pub fn branches(&self) -> &[Vec<BranchUnit>] {
        &self.branches
    }
}

impl Backbone {
    #[must_use]
    pub fn units(&self) -> &[BackboneUnit] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Index of the unit whose column interval contains `column`.
    ///
    /// A unit's interval is `[column, next_column)`; the last unit's runs to
    /// the end of the line. Columns left of the first unit resolve to `None`.
    #[must_use]
    pub fn unit_below(&self, column: usize) -> Option<usize> {
        let after = self.0.partition_point(|unit| unit.column <= column);
        after.checked_sub(1)
    }

    /// Walks successor pointers from element 0 and checks that `len` steps
    /// visit every element exactly once before landing back on 0.
    #[must_use]
    pub fn is_single_cycle(&self) -> bool {
        let mut visited = vec![false; self.0.len()];
        let mut at = 0;
        for _ in 0..self.0.len() {
            match visited.get_mut(at) {
                Some(seen @ false) => *seen = true,
                _ => return false,
            }
            at = self.0[at].successor;
        }
        at == 0
    }

    pub(crate) fn from_units(units: Vec<BackboneUnit>) -> Self {
        Self(units)
    }
}

impl BackboneUnit {
    /// The character offset of this unit's name in its source line; an
    /// internal alignment key, not chemically meaningful
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    pub(crate) fn new(sugar: SugarUnit, successor: usize, column: usize) -> Self {
        Self {
            sugar,
            successor,
            column,
        }
    }
}

impl Atom {
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    pub(crate) const fn new(digit: u8) -> Self {
        assert!(digit <= 9, "ring atoms are single decimal digits");
        Self(digit)
    }
}

impl SugarUnit {
    pub(crate) fn new(name: impl Into<String>, source_atom: Atom, dest_atom: Atom, bond: BondKind) -> Self {
        Self {
            name: name.into(),
            source_atom,
            dest_atom,
            bond,
        }
    }
}

impl BondKind {
    const fn tag(self) -> Option<char> {
        match self {
            Self::Glycosidic => None,
            Self::Phosphodiester => Some('P'),
            Self::Nitrogen => Some('N'),
        }
    }
}

// Display Trait Implementations =======================================================================================

impl Display for Atom {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for SugarUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.bond.tag() {
            None => write!(f, "{}({}->{})", self.name, self.source_atom, self.dest_atom),
            Some(tag) => write!(
                f,
                "{}({}-{}-{})",
                self.name, self.source_atom, tag, self.dest_atom
            ),
        }
    }
}

impl Display for BackboneUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} to the {}", self.sugar, self.successor)
    }
}

impl Display for BranchUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} to the {}", self.sugar, self.attachment)
    }
}

impl Display for AntigenRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for unit in self.backbone.units() {
            write!(f, "\n{unit}")?;
        }
        for row in &self.branches {
            for unit in row {
                write!(f, "\n{unit}")?;
            }
        }
        Ok(())
    }
}

// Module Tests ========================================================================================================
