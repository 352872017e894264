use bootcfg_kernel::domain::{CandidateSet, FlagId, FlagValue};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Why a flag is part of a resolved profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "origin", rename_all = "lowercase")]
pub enum Provenance {
    /// Requested by the candidate set.
    Explicit,
    /// Added to satisfy the REQUIRES edges of the listed profile flags.
    Implied { required_by: BTreeSet<FlagId> },
}

impl Provenance {
    #[must_use]
    pub const fn is_explicit(&self) -> bool {
        matches!(self, Self::Explicit)
    }

    #[must_use]
    pub const fn is_implied(&self) -> bool {
        matches!(self, Self::Implied { .. })
    }
}

/// A flag of a resolved profile with its carried value (if any) and provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFlag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<FlagValue>,
    pub provenance: Provenance,
}

/// A candidate set closed under REQUIRES/PROVIDES and free of CONFLICTS.
///
/// Only [`crate::Resolver`] produces one, so holding a profile means it passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedProfile {
    flags: BTreeMap<FlagId, ResolvedFlag>,
}

impl ResolvedProfile {
    pub(crate) const fn from_flags(flags: BTreeMap<FlagId, ResolvedFlag>) -> Self {
        Self { flags }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ResolvedFlag> {
        self.flags.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.flags.contains_key(id)
    }

    /// Value carried by `id`; `None` if absent or valueless.
    #[must_use]
    pub fn value(&self, id: &str) -> Option<&FlagValue> {
        self.flags.get(id).and_then(|f| f.value.as_ref())
    }

    /// Flags in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&FlagId, &ResolvedFlag)> {
        self.flags.iter()
    }

    pub fn explicit(&self) -> impl Iterator<Item = &FlagId> {
        self.flags.iter().filter(|(_, f)| f.provenance.is_explicit()).map(|(id, _)| id)
    }

    pub fn implied(&self) -> impl Iterator<Item = &FlagId> {
        self.flags.iter().filter(|(_, f)| f.provenance.is_implied()).map(|(id, _)| id)
    }

    /// The explicitly requested flags that caused `id` to be pulled in, following `required_by`
    /// links back to their roots. Empty for explicit or absent flags.
    #[must_use]
    pub fn origins(&self, id: &str) -> BTreeSet<FlagId> {
        let mut roots = BTreeSet::new();
        let mut seen = BTreeSet::new();
        let mut stack: Vec<&FlagId> = match self.flags.get(id).map(|f| &f.provenance) {
            Some(Provenance::Implied { required_by }) => required_by.iter().collect(),
            _ => return roots,
        };

        while let Some(flag) = stack.pop() {
            if !seen.insert(flag) {
                continue;
            }
            match self.flags.get(flag).map(|f| &f.provenance) {
                Some(Provenance::Explicit) => {
                    roots.insert(flag.clone());
                },
                Some(Provenance::Implied { required_by }) => stack.extend(required_by),
                None => {},
            }
        }
        roots
    }

    /// The profile as a plain candidate set, values preserved.
    #[must_use]
    pub fn to_candidate_set(&self) -> CandidateSet {
        self.flags.iter().map(|(id, f)| (id.clone(), f.value.clone())).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl IntoIterator for ResolvedProfile {
    type Item = (FlagId, ResolvedFlag);
    type IntoIter = std::collections::btree_map::IntoIter<FlagId, ResolvedFlag>;

    fn into_iter(self) -> Self::IntoIter {
        self.flags.into_iter()
    }
}
