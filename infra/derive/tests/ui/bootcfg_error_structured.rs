use bootcfg_derive::bootcfg_error;

#[bootcfg_error]
pub enum LookupError {
    #[error("Unknown flag: {flag}")]
    UnknownFlag { flag: String },

    #[error("Duplicate flag: {flag}")]
    DuplicateFlag { flag: String },
}

fn main() {
    let err = LookupError::UnknownFlag { flag: "usb".to_owned() };
    assert_eq!(err.to_string(), "Unknown flag: usb");

    let res: Result<(), LookupError> = Err(LookupError::DuplicateFlag { flag: "usb".to_owned() });
    let res = res.context("ignored without a context field");
    assert!(matches!(res, Err(LookupError::DuplicateFlag { .. })));
}
