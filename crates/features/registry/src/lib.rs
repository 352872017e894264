//! # Flag Registry
//!
//! The authoritative catalog of every flag the system understands: its identifier, its value
//! kind, and optional metadata (default value, help text).
//!
//! The registry is populated once during initialization and then handed to the graph builder,
//! which owns it from there on. Nothing here resolves anything.
//!
//! ```rust
//! use bootcfg_registry::{FlagRegistry, RegistryError};
//! use bootcfg_kernel::domain::FlagKind;
//!
//! let mut registry = FlagRegistry::new();
//! registry.register("usb", FlagKind::Presence)?;
//! registry.register("usb_gadget_vbus_draw", FlagKind::Integer)?;
//!
//! assert_eq!(registry.lookup("usb")?.kind, FlagKind::Presence);
//! assert!(matches!(registry.lookup("usb3"), Err(RegistryError::UnknownFlag { .. })));
//! # Ok::<(), RegistryError>(())
//! ```

mod error;

pub use crate::error::{RegistryError, RegistryErrorExt};

use bootcfg_kernel::domain::{FlagDescriptor, FlagId, FlagKind};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tracing::debug;

/// In-memory catalog of flag descriptors, keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct FlagRegistry {
    flags: BTreeMap<FlagId, FlagDescriptor>,
}

impl FlagRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from a list of descriptors, failing on the first invalid one.
    ///
    /// # Errors
    /// See [`FlagRegistry::register_descriptor`].
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = FlagDescriptor>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for descriptor in descriptors {
            registry.register_descriptor(descriptor)?;
        }
        Ok(registry)
    }

    /// Registers a flag with no default and no help text.
    ///
    /// # Errors
    /// * [`RegistryError::DuplicateFlag`] if `id` is already registered.
    /// * [`RegistryError::InvalidIdentifier`] if `id` is not a valid flag identifier.
    pub fn register(
        &mut self,
        id: impl Into<FlagId>,
        kind: FlagKind,
    ) -> Result<&FlagDescriptor, RegistryError> {
        self.register_descriptor(FlagDescriptor::new(id, kind))
    }

    /// Registers a fully described flag.
    ///
    /// # Errors
    /// * [`RegistryError::DuplicateFlag`] if the identifier is already registered.
    /// * [`RegistryError::InvalidIdentifier`] if the identifier is malformed.
    /// * [`RegistryError::InvalidDefault`] if the default value does not match the flag kind.
    pub fn register_descriptor(
        &mut self,
        descriptor: FlagDescriptor,
    ) -> Result<&FlagDescriptor, RegistryError> {
        descriptor.id.check().map_err(|reason| RegistryError::InvalidIdentifier {
            identifier: descriptor.id.clone(),
            reason,
        })?;

        if let Some(value) = &descriptor.default
            && !descriptor.kind.accepts(Some(value))
        {
            return Err(RegistryError::InvalidDefault {
                flag: descriptor.id.clone(),
                kind: descriptor.kind,
                value: value.clone(),
            });
        }

        match self.flags.entry(descriptor.id.clone()) {
            Entry::Occupied(entry) => Err(RegistryError::DuplicateFlag { flag: entry.key().clone() }),
            Entry::Vacant(slot) => {
                debug!(flag = %descriptor.id, kind = %descriptor.kind, "Registered flag");
                Ok(slot.insert(descriptor))
            },
        }
    }

    /// Returns the descriptor for `id`.
    ///
    /// # Errors
    /// [`RegistryError::UnknownFlag`] if nothing is registered under `id`.
    pub fn lookup(&self, id: &str) -> Result<&FlagDescriptor, RegistryError> {
        self.flags.get(id).ok_or_else(|| RegistryError::UnknownFlag { flag: FlagId::new(id) })
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.flags.contains_key(id)
    }

    /// Descriptors in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &FlagDescriptor> {
        self.flags.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &FlagId> {
        self.flags.keys()
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
