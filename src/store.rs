// 🗄️ Store contract - what the directory needs from persistence
//
// Lookup by key, insert, delete and relationship traversal. Transaction
// mechanics stay behind this trait.

use crate::entities::{Bank, Country};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write
    #[error("{0}")]
    UniqueViolation(String),

    /// Anything else the storage engine reports
    #[error("storage failure: {0}")]
    Other(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

pub trait DirectoryStore {
    fn find_bank_by_code(&self, swift_code: &str) -> StoreResult<Option<Bank>>;

    /// Banks whose code is `prefix` (8 chars) followed by any 3 characters
    fn find_banks_by_code_prefix(&self, prefix: &str) -> StoreResult<Vec<Bank>>;

    fn find_country_by_iso2(&self, iso2: &str) -> StoreResult<Option<Country>>;

    /// Persist `bank` and point every code in `adopted_branches` at it.
    /// Both happen together or not at all.
    fn insert_bank(&self, bank: &Bank, adopted_branches: &[String]) -> StoreResult<()>;

    fn insert_country(&self, country: &Country) -> StoreResult<()>;

    /// Remove the row. Branches pointing at it lose their headquarters link.
    fn delete_bank(&self, swift_code: &str) -> StoreResult<()>;

    /// Banks owned by the country, in insertion order
    fn list_banks_by_country(&self, iso2: &str) -> StoreResult<Vec<Bank>>;

    /// Branches linked to the headquarters, in insertion order
    fn list_branches(&self, headquarter_code: &str) -> StoreResult<Vec<Bank>>;

    fn count_banks(&self) -> StoreResult<i64>;
}
