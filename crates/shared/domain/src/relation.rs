use crate::flag::FlagId;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

/// Kind of a directed relationship between two flags.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum RelationKind {
    /// `REQUIRES(A, B)`: A set implies B must also be set.
    Requires,
    /// `CONFLICTS(A, B)`: A and B must never both be set. Symmetric.
    Conflicts,
    /// `PROVIDES(A, B)`: A set satisfies any requirement targeting B.
    Provides,
}

bitflags! {
    /// A set of relationship kinds, used to filter edge traversals.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RelationKinds: u8 {
        const REQUIRES = 1 << 0;
        const CONFLICTS = 1 << 1;
        const PROVIDES = 1 << 2;

        /// Edges along which enabling one flag leads to another.
        const IMPLICATION = Self::REQUIRES.bits() | Self::PROVIDES.bits();
    }
}

impl From<RelationKind> for RelationKinds {
    fn from(kind: RelationKind) -> Self {
        match kind {
            RelationKind::Requires => Self::REQUIRES,
            RelationKind::Conflicts => Self::CONFLICTS,
            RelationKind::Provides => Self::PROVIDES,
        }
    }
}

impl RelationKinds {
    #[must_use]
    pub fn includes(self, kind: RelationKind) -> bool {
        self.contains(kind.into())
    }
}

/// A `(kind, from, to)` triple.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Relationship {
    pub kind: RelationKind,
    pub from: FlagId,
    pub to: FlagId,
}

impl Relationship {
    #[must_use]
    pub fn new(kind: RelationKind, from: impl Into<FlagId>, to: impl Into<FlagId>) -> Self {
        Self { kind, from: from.into(), to: to.into() }
    }

    #[must_use]
    pub fn requires(from: impl Into<FlagId>, to: impl Into<FlagId>) -> Self {
        Self::new(RelationKind::Requires, from, to)
    }

    #[must_use]
    pub fn conflicts(from: impl Into<FlagId>, to: impl Into<FlagId>) -> Self {
        Self::new(RelationKind::Conflicts, from, to)
    }

    #[must_use]
    pub fn provides(from: impl Into<FlagId>, to: impl Into<FlagId>) -> Self {
        Self::new(RelationKind::Provides, from, to)
    }

    /// The same relationship with its endpoints swapped.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self { kind: self.kind, from: self.to.clone(), to: self.from.clone() }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {})", self.kind, self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn implication_covers_requires_and_provides() {
        assert!(RelationKinds::IMPLICATION.includes(RelationKind::Requires));
        assert!(RelationKinds::IMPLICATION.includes(RelationKind::Provides));
        assert!(!RelationKinds::IMPLICATION.includes(RelationKind::Conflicts));
        assert_eq!(RelationKind::iter().count(), 3);
    }

    #[test]
    fn relationship_displays_as_triple() {
        let rel = Relationship::requires("usb_gadget", "usb");
        assert_eq!(rel.to_string(), "REQUIRES(usb_gadget, usb)");
        assert_eq!(rel.reversed().to_string(), "REQUIRES(usb, usb_gadget)");
        assert_eq!(RelationKind::from_str("provides"), Ok(RelationKind::Provides));
    }
}
