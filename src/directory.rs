// 🏛️ Directory Service - create / read / delete over the store
//
// Every check runs before the first write. Once a write is attempted its
// failure is reported, but an already-created country is not rolled back.

use crate::entities::{Bank, Country};
use crate::store::{DirectoryStore, StoreError};
use crate::validation::{
    validate_country_name, validate_headquarter_consistency, validate_iso2_code,
    validate_swift_code, ValidationError,
};
use crate::views::{BankDetails, Confirmation, CountryDetails, NewBank};
use thiserror::Error;
use tracing::{debug, error, info};

// ============================================================================
// ERRORS
// ============================================================================

/// Error taxonomy callers map onto their transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Internal,
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("SWIFT code {0} does not exist.")]
    BankNotFound(String),

    #[error("Country ISO2 code {0} does not exist.")]
    CountryNotFound(String),

    #[error("In the database the correct countryName for countryISO2 = {iso2} is {stored}.")]
    CountryNameConflict {
        iso2: String,
        stored: String,
        submitted: String,
    },

    #[error("SWIFT code {0} already exists.")]
    DuplicateSwiftCode(String),

    #[error("Internal storage error.")]
    Internal(#[source] StoreError),
}

impl DirectoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DirectoryError::Validation(_) => ErrorKind::Validation,
            DirectoryError::BankNotFound(_) | DirectoryError::CountryNotFound(_) => {
                ErrorKind::NotFound
            }
            DirectoryError::CountryNameConflict { .. } | DirectoryError::DuplicateSwiftCode(_) => {
                ErrorKind::Conflict
            }
            DirectoryError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<StoreError> for DirectoryError {
    fn from(err: StoreError) -> Self {
        error!(error = %err, "storage operation failed");
        DirectoryError::Internal(err)
    }
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

// ============================================================================
// SERVICE
// ============================================================================

/// Directory operations over an injected store
pub struct DirectoryService<S> {
    store: S,
}

impl<S: DirectoryStore> DirectoryService<S> {
    pub fn new(store: S) -> Self {
        DirectoryService { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Bank by SWIFT code; headquarters come with their branches.
    ///
    /// The code is expected to be validated by the caller.
    pub fn read_bank(&self, swift_code: &str) -> DirectoryResult<BankDetails> {
        let bank = self
            .store
            .find_bank_by_code(swift_code)?
            .ok_or_else(|| DirectoryError::BankNotFound(swift_code.to_string()))?;
        let country_name = self.country_of(&bank)?.name;

        if bank.is_headquarter {
            let branches = self.store.list_branches(&bank.swift_code)?;
            debug!(swift_code, branches = branches.len(), "read headquarters");
            Ok(BankDetails::headquarter(bank, country_name, branches))
        } else {
            debug!(swift_code, "read branch");
            Ok(BankDetails::branch(bank, country_name))
        }
    }

    /// Country by ISO2 with every bank it owns
    pub fn read_country(&self, iso2: &str) -> DirectoryResult<CountryDetails> {
        let country = self
            .store
            .find_country_by_iso2(iso2)?
            .ok_or_else(|| DirectoryError::CountryNotFound(iso2.to_string()))?;
        let banks = self.store.list_banks_by_country(iso2)?;

        debug!(iso2, banks = banks.len(), "read country");
        Ok(CountryDetails::new(country, banks))
    }

    /// Get-or-create a country. An existing ISO2 with another name is a conflict.
    pub fn create_country(&self, iso2: &str, name: &str) -> DirectoryResult<Country> {
        validate_iso2_code(iso2)?;
        validate_country_name(name)?;

        self.resolve_country(iso2, name)
    }

    /// Create a bank and link it into the HQ/branch hierarchy.
    ///
    /// A headquarters adopts every existing branch sharing its 8-char prefix;
    /// a branch is linked to its headquarters if one is already stored.
    pub fn create_bank(&self, request: &NewBank) -> DirectoryResult<Confirmation> {
        validate_new_bank(request)?;

        let country = self.resolve_country(&request.country_iso2, &request.country_name)?;

        let bank = Bank::new(
            request.swift_code.clone(),
            request.bank_name.clone(),
            request.address.clone(),
            country.iso2,
            request.is_headquarter,
        );

        let (bank, adopted) = if bank.is_headquarter {
            let adopted: Vec<String> = self
                .store
                .find_banks_by_code_prefix(bank.prefix())?
                .into_iter()
                .map(|branch| branch.swift_code)
                .filter(|code| code != &bank.swift_code)
                .collect();
            (bank, adopted)
        } else {
            let headquarter = self
                .store
                .find_bank_by_code(&bank.candidate_headquarter())?
                .map(|hq| hq.swift_code);
            (bank.with_headquarter(headquarter), Vec::new())
        };

        match self.store.insert_bank(&bank, &adopted) {
            Ok(()) => {}
            Err(StoreError::UniqueViolation(detail)) => {
                debug!(swift_code = %bank.swift_code, %detail, "duplicate SWIFT code");
                return Err(DirectoryError::DuplicateSwiftCode(bank.swift_code));
            }
            Err(err) => return Err(err.into()),
        }

        info!(
            swift_code = %bank.swift_code,
            country = %bank.country_iso2,
            headquarter = ?bank.headquarter_code,
            adopted = adopted.len(),
            "bank created"
        );
        Ok(Confirmation::created(&bank.swift_code))
    }

    /// Delete a bank. Its branches stay, unlinked.
    pub fn delete_bank(&self, swift_code: &str) -> DirectoryResult<Confirmation> {
        validate_swift_code(swift_code)?;

        let bank = self
            .store
            .find_bank_by_code(swift_code)?
            .ok_or_else(|| DirectoryError::BankNotFound(swift_code.to_string()))?;

        self.store.delete_bank(&bank.swift_code)?;

        info!(swift_code, headquarter = bank.is_headquarter, "bank deleted");
        Ok(Confirmation::deleted(swift_code))
    }

    fn resolve_country(&self, iso2: &str, name: &str) -> DirectoryResult<Country> {
        match self.store.find_country_by_iso2(iso2)? {
            Some(country) if country.has_name(name) => Ok(country),
            Some(country) => Err(DirectoryError::CountryNameConflict {
                iso2: country.iso2,
                stored: country.name,
                submitted: name.to_string(),
            }),
            None => {
                let country = Country::new(iso2.to_string(), name.to_string());
                self.store.insert_country(&country)?;
                info!(iso2, name, "country created");
                Ok(country)
            }
        }
    }

    fn country_of(&self, bank: &Bank) -> DirectoryResult<Country> {
        self.store
            .find_country_by_iso2(&bank.country_iso2)?
            .ok_or_else(|| {
                StoreError::Other(format!(
                    "bank {} references missing country {}",
                    bank.swift_code, bank.country_iso2
                ))
                .into()
            })
    }
}

/// ISO2 → country name → SWIFT code → HQ consistency; first failure wins
fn validate_new_bank(request: &NewBank) -> Result<(), ValidationError> {
    validate_iso2_code(&request.country_iso2)?;
    validate_country_name(&request.country_name)?;
    validate_swift_code(&request.swift_code)?;
    validate_headquarter_consistency(&request.swift_code, request.is_headquarter)
}

// ============================================================================
// TESTS
// ============================================================================
