use bootcfg_kernel::domain::{FlagId, FlagKind, FlagValue};

/// Registry authoring errors. All of them are fatal to startup.
#[bootcfg_derive::bootcfg_error]
pub enum RegistryError {
    #[error("Unknown flag: {flag}")]
    UnknownFlag { flag: FlagId },

    #[error("Flag already registered: {flag}")]
    DuplicateFlag { flag: FlagId },

    #[error("Invalid flag identifier `{identifier}`: {reason}")]
    InvalidIdentifier { identifier: FlagId, reason: &'static str },

    #[error("Default {value} of flag {flag} does not fit kind {kind}")]
    InvalidDefault { flag: FlagId, kind: FlagKind, value: FlagValue },
}
