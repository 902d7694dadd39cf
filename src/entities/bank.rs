// 🏦 Bank Entity - identity is the SWIFT/BIC code
//
// "SWIFT code is IDENTITY, the rest are VALUES"
//
// The code itself carries the hierarchy:
// - First 8 chars  → institution + location (shared by HQ and branches)
// - Last 3 chars   → "XXX" for the headquarters, anything else for a branch

// ============================================================================
// CODE STRUCTURE
// ============================================================================

/// Length of a full SWIFT/BIC code
pub const SWIFT_CODE_LEN: usize = 11;

/// Length of the institution + location part shared by HQ and its branches
pub const SWIFT_PREFIX_LEN: usize = 8;

/// Branch suffix reserved for the headquarters / primary office
pub const HEADQUARTER_SUFFIX: &str = "XXX";

/// First 8 characters of a SWIFT code.
///
/// Codes shorter than 8 characters are returned unchanged; callers validate
/// before reaching here.
pub fn code_prefix(swift_code: &str) -> &str {
    match swift_code.char_indices().nth(SWIFT_PREFIX_LEN) {
        Some((idx, _)) => &swift_code[..idx],
        None => swift_code,
    }
}

/// Candidate headquarters code for any code: prefix + "XXX"
///
/// For a headquarters this is its own code. For a branch it is only the
/// code to look up, not a guaranteed match.
pub fn headquarter_code_for(swift_code: &str) -> String {
    format!("{}{}", code_prefix(swift_code), HEADQUARTER_SUFFIX)
}

/// Does the code end with the headquarters suffix?
pub fn is_headquarter_code(swift_code: &str) -> bool {
    swift_code.ends_with(HEADQUARTER_SUFFIX)
}

// ============================================================================
// BANK ENTITY
// ============================================================================

/// A bank office as stored in the directory.
///
/// The headquarters link is key-based: `headquarter_code` holds the code of
/// the owning headquarters row, never an embedded object. It is `None` for
/// headquarters and for orphan branches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bank {
    pub swift_code: String,
    pub bank_name: String,
    pub address: String,
    pub country_iso2: String,
    pub is_headquarter: bool,
    pub headquarter_code: Option<String>,
}

impl Bank {
    /// Create an unlinked bank row
    pub fn new(
        swift_code: String,
        bank_name: String,
        address: String,
        country_iso2: String,
        is_headquarter: bool,
    ) -> Self {
        Bank {
            swift_code,
            bank_name,
            address,
            country_iso2,
            is_headquarter,
            headquarter_code: None,
        }
    }

    /// Link this bank to its headquarters
    pub fn with_headquarter(mut self, headquarter_code: Option<String>) -> Self {
        self.headquarter_code = headquarter_code;
        self
    }

    /// Shared 8-character prefix
    pub fn prefix(&self) -> &str {
        code_prefix(&self.swift_code)
    }

    /// Code this bank's headquarters has (or would have)
    pub fn candidate_headquarter(&self) -> String {
        headquarter_code_for(&self.swift_code)
    }

    /// Branch with no headquarters row linked
    pub fn is_orphan(&self) -> bool {
        !self.is_headquarter && self.headquarter_code.is_none()
    }
}

// ============================================================================
// TESTS
// ============================================================================
