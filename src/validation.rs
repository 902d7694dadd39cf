// 📐 Domain Validator - SWIFT / ISO2 / country name rules
// Stateless checks run before anything touches the store.
//
// Per code the checks run length → charset → case, and the first failing one
// is reported. Each category has its own message.

use crate::entities::{is_headquarter_code, ISO2_CODE_LEN, SWIFT_CODE_LEN};
use std::fmt;
use thiserror::Error;

// ============================================================================
// CODE KINDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    Swift,
    Iso2,
}

impl CodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            CodeKind::Swift => "SWIFT",
            CodeKind::Iso2 => "ISO2",
        }
    }

    pub fn expected_len(&self) -> usize {
        match self {
            CodeKind::Swift => SWIFT_CODE_LEN,
            CodeKind::Iso2 => ISO2_CODE_LEN,
        }
    }

    /// Human wording of the allowed character class
    fn charset_rule(&self) -> &'static str {
        match self {
            CodeKind::Swift => "alphanumeric",
            CodeKind::Iso2 => "letters",
        }
    }

    fn allows(&self, c: char) -> bool {
        match self {
            CodeKind::Swift => c.is_ascii_alphanumeric(),
            CodeKind::Iso2 => c.is_ascii_alphabetic(),
        }
    }

    fn field(&self) -> TextField {
        match self {
            CodeKind::Swift => TextField::SwiftCode,
            CodeKind::Iso2 => TextField::Iso2Code,
        }
    }
}

impl fmt::Display for CodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Text fields that must be uppercase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    SwiftCode,
    Iso2Code,
    CountryName,
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TextField::SwiftCode => "SWIFT code",
            TextField::Iso2Code => "ISO2 code",
            TextField::CountryName => "country name",
        })
    }
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// Malformed client input. Display strings are the client-facing messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{kind} code should consist of {expected} characters.")]
    CodeLength { kind: CodeKind, expected: usize },

    #[error("All characters in {kind} code should be {}.", .kind.charset_rule())]
    CodeCharset { kind: CodeKind },

    #[error("All characters in {field} should be uppercase.")]
    Case { field: TextField },

    #[error("Headquarter's SWIFT codes must end with XXX and branches' cannot end with XXX.")]
    HeadquarterMismatch,
}

// ============================================================================
// CHECKS
// ============================================================================

pub fn validate_swift_code(code: &str) -> Result<(), ValidationError> {
    validate_code(code, CodeKind::Swift)
}

pub fn validate_iso2_code(code: &str) -> Result<(), ValidationError> {
    validate_code(code, CodeKind::Iso2)
}

pub fn validate_country_name(name: &str) -> Result<(), ValidationError> {
    if !is_uppercase(name) {
        return Err(ValidationError::Case {
            field: TextField::CountryName,
        });
    }
    Ok(())
}

/// "XXX" suffix ⇔ headquarters. Both mismatch directions are the same error.
pub fn validate_headquarter_consistency(
    swift_code: &str,
    is_headquarter: bool,
) -> Result<(), ValidationError> {
    if is_headquarter_code(swift_code) != is_headquarter {
        return Err(ValidationError::HeadquarterMismatch);
    }
    Ok(())
}

fn validate_code(code: &str, kind: CodeKind) -> Result<(), ValidationError> {
    // chars, not bytes: a non-ASCII char must fail charset, not length
    if code.chars().count() != kind.expected_len() {
        return Err(ValidationError::CodeLength {
            kind,
            expected: kind.expected_len(),
        });
    }

    if !code.chars().all(|c| kind.allows(c)) {
        return Err(ValidationError::CodeCharset { kind });
    }

    if !is_uppercase(code) {
        return Err(ValidationError::Case { field: kind.field() });
    }

    Ok(())
}

/// At least one uppercase letter and no lowercase ones. Blank text and
/// digits-only text fail.
fn is_uppercase(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}

// ============================================================================
// TESTS
// ============================================================================
