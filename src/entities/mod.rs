// Entity Models
// SWIFT code and ISO2 code are the identities; everything else is a value.
//
// - Bank: keyed by SWIFT code, HQ link stored as a code (not a pointer)
// - Country: keyed by ISO2, owns its banks

pub mod bank;
pub mod country;

pub use bank::{
    code_prefix, headquarter_code_for, is_headquarter_code, Bank, HEADQUARTER_SUFFIX,
    SWIFT_CODE_LEN, SWIFT_PREFIX_LEN,
};
pub use country::{Country, ISO2_CODE_LEN};
