//! Candidate sets: the unordered, caller-supplied flag selection of a configuration profile.

use crate::flag::{FlagId, FlagValue};
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::collections::btree_map;

/// Mapping from flag identifier to its optional value.
///
/// Presence-only flags map to `None`. Keyed, so order of insertion is irrelevant.
///
/// In serialized form a presence flag is written as `true`; `false` entries are accepted on input
/// and treated as "not set":
///
/// ```toml
/// usb = true
/// usb_storage = false
/// usb_gadget_manufacturer = "U-Boot"
/// usb_gadget_vbus_draw = 2
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    flags: BTreeMap<FlagId, Option<FlagValue>>,
}

impl CandidateSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set of presence-only flags.
    pub fn presence<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FlagId>,
    {
        ids.into_iter().map(|id| (Into::<FlagId>::into(id), None)).collect()
    }

    /// Marks a presence-only flag as set.
    #[must_use]
    pub fn with(mut self, id: impl Into<FlagId>) -> Self {
        self.flags.insert(id.into(), None);
        self
    }

    /// Sets a valued flag.
    #[must_use]
    pub fn with_value(mut self, id: impl Into<FlagId>, value: impl Into<FlagValue>) -> Self {
        self.flags.insert(id.into(), Some(value.into()));
        self
    }

    /// Inserts or replaces an entry, returning the previous one.
    pub fn insert(
        &mut self,
        id: impl Into<FlagId>,
        value: Option<FlagValue>,
    ) -> Option<Option<FlagValue>> {
        self.flags.insert(id.into(), value)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.flags.contains_key(id)
    }

    /// Value of a set flag; `None` when the flag is absent, `Some(None)` for presence flags.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Option<&FlagValue>> {
        self.flags.get(id).map(Option::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FlagId, Option<&FlagValue>)> {
        self.flags.iter().map(|(id, value)| (id, value.as_ref()))
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

impl FromIterator<(FlagId, Option<FlagValue>)> for CandidateSet {
    fn from_iter<T: IntoIterator<Item = (FlagId, Option<FlagValue>)>>(iter: T) -> Self {
        Self { flags: iter.into_iter().collect() }
    }
}

impl IntoIterator for CandidateSet {
    type Item = (FlagId, Option<FlagValue>);
    type IntoIter = btree_map::IntoIter<FlagId, Option<FlagValue>>;

    fn into_iter(self) -> Self::IntoIter {
        self.flags.into_iter()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Set(bool),
    Integer(i64),
    Text(String),
}

impl Serialize for CandidateSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.flags.len()))?;
        for (id, value) in &self.flags {
            match value {
                None => map.serialize_entry(id, &true)?,
                Some(v) => map.serialize_entry(id, v)?,
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CandidateSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<FlagId, RawEntry>::deserialize(deserializer)?;
        let mut flags = BTreeMap::new();
        for (id, entry) in raw {
            if id.as_str().is_empty() {
                return Err(D::Error::custom("empty flag identifier in candidate set"));
            }
            match entry {
                RawEntry::Set(true) => {
                    flags.insert(id, None);
                },
                RawEntry::Set(false) => {},
                RawEntry::Integer(v) => {
                    flags.insert(id, Some(FlagValue::Integer(v)));
                },
                RawEntry::Text(v) => {
                    flags.insert(id, Some(FlagValue::Text(v)));
                },
            }
        }
        Ok(Self { flags })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_helpers_overwrite_by_key() {
        let set = CandidateSet::new().with("usb").with_value("usb_gadget_vbus_draw", 2).with("usb");
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("usb"), Some(None));
        assert_eq!(set.get("usb_gadget_vbus_draw"), Some(Some(&FlagValue::Integer(2))));
        assert_eq!(set.get("usb_storage"), None);
    }

    #[test]
    fn false_entries_are_dropped_on_input() {
        let set: CandidateSet =
            serde_json::from_str(r#"{"usb": true, "usb_storage": false, "name": "U-Boot"}"#)
                .expect("candidate set should deserialize");
        assert!(set.contains("usb"));
        assert!(!set.contains("usb_storage"));
        assert_eq!(set.get("name"), Some(Some(&FlagValue::from("U-Boot"))));
    }

    #[test]
    fn empty_identifier_is_rejected_on_input() {
        let err = serde_json::from_str::<CandidateSet>(r#"{"usb": true, "": true}"#).unwrap_err();
        assert!(err.to_string().contains("empty flag identifier"), "{err}");
    }

    #[test]
    fn presence_flags_serialize_as_true() {
        let set = CandidateSet::presence(["usb"]).with_value("usb_gadget_product_num", 0);
        let json = serde_json::to_value(&set).expect("serialize");
        assert_eq!(json, serde_json::json!({ "usb": true, "usb_gadget_product_num": 0 }));
    }
}
