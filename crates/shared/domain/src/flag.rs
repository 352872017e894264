use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;
use strum_macros::{AsRefStr, Display, EnumString};

/// Unique identifier of a build-time flag (e.g. `usb_gadget`).
///
/// Cheap to clone. Ordering is plain string ordering, which keeps every keyed container in the
/// workspace iteration-stable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagId(Arc<str>);

impl FlagId {
    #[must_use]
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks the identifier shape: non-empty ASCII `[A-Za-z0-9_]`, not starting with a digit.
    ///
    /// # Errors
    /// Returns a static reason describing the first violated rule.
    pub fn check(&self) -> Result<(), &'static str> {
        let mut chars = self.0.chars();
        let Some(first) = chars.next() else {
            return Err("identifier is empty");
        };
        if first.is_ascii_digit() {
            return Err("identifier starts with a digit");
        }
        if !self.0.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err("identifier contains characters outside [A-Za-z0-9_]");
        }
        Ok(())
    }
}

impl fmt::Display for FlagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for FlagId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for FlagId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FlagId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FlagId {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl From<&FlagId> for FlagId {
    fn from(id: &FlagId) -> Self {
        id.clone()
    }
}

/// The value type a flag carries.
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
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FlagKind {
    /// Set or not set, no value (`#define CONFIG_USB`).
    Presence,
    /// Integer-valued (`#define CONFIG_USB_GADGET_VBUS_DRAW 2`).
    Integer,
    /// String-valued (`#define CONFIG_USB_GADGET_MANUFACTURER "U-Boot"`).
    String,
}

impl FlagKind {
    /// Whether `value` is acceptable for a flag of this kind.
    ///
    /// Presence flags never carry a value; valued flags may omit theirs.
    #[must_use]
    pub const fn accepts(self, value: Option<&FlagValue>) -> bool {
        match (self, value) {
            (_, None) => true,
            (Self::Integer, Some(FlagValue::Integer(_))) | (Self::String, Some(FlagValue::Text(_))) => {
                true
            },
            _ => false,
        }
    }
}

/// Value carried by an integer- or string-valued flag. Opaque to the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Integer(i64),
    Text(String),
}

impl FlagValue {
    #[must_use]
    pub const fn kind(&self) -> FlagKind {
        match self {
            Self::Integer(_) => FlagKind::Integer,
            Self::Text(_) => FlagKind::String,
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<i64> for FlagValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for FlagValue {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<u32> for FlagValue {
    fn from(v: u32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<&str> for FlagValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for FlagValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Registry entry describing a known flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlagDescriptor {
    pub id: FlagId,
    pub kind: FlagKind,
    /// Value used when the flag is implied rather than requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<FlagValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl FlagDescriptor {
    #[must_use]
    pub fn new(id: impl Into<FlagId>, kind: FlagKind) -> Self {
        Self { id: id.into(), kind, default: None, help: None }
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<FlagValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}
