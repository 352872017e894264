use crate::profile::Provenance;
use bootcfg_kernel::domain::{FlagId, FlagKind, FlagValue};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Resolution errors. Each affects only the failing call; fix the candidate set and retry.
#[bootcfg_derive::bootcfg_error]
pub enum ResolveError {
    /// Two flags joined by a CONFLICTS edge ended up in the same profile.
    #[error("Flag conflict: {first} conflicts with {second}")]
    FlagConflict { first: ConflictParty, second: ConflictParty },

    #[error("Unknown flag in candidate set: {flag}")]
    UnknownFlag { flag: FlagId },

    #[error("Value {found} of flag {flag} does not fit kind {expected}")]
    ValueMismatch { flag: FlagId, expected: FlagKind, found: FlagValue },
}

/// One side of a [`ResolveError::FlagConflict`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictParty {
    pub flag: FlagId,
    pub provenance: Provenance,
    /// Explicitly requested flags that pulled this one in. Empty for explicit flags.
    pub induced_by: BTreeSet<FlagId>,
}

impl ConflictParty {
    #[must_use]
    pub const fn is_explicit(&self) -> bool {
        self.provenance.is_explicit()
    }
}

impl fmt::Display for ConflictParty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_explicit() {
            return write!(f, "{} (explicit)", self.flag);
        }
        let roots: Vec<&str> = self.induced_by.iter().map(FlagId::as_str).collect();
        write!(f, "{} (implied by {})", self.flag, roots.join(", "))
    }
}
