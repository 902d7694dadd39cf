// SWIFT Code Directory - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod config;
pub mod db;
pub mod directory;
pub mod entities;
pub mod import;
pub mod store;
pub mod validation;
pub mod views;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use db::{setup_database, SqliteStore};
pub use directory::{DirectoryError, DirectoryResult, DirectoryService, ErrorKind};
pub use entities::{
    code_prefix, headquarter_code_for, is_headquarter_code, Bank, Country,
};
pub use import::{
    bootstrap, import_csv, load_csv, read_sheet, replay, BankRecord, ImportSummary, SwiftSheet,
};
pub use store::{DirectoryStore, StoreError, StoreResult};
pub use validation::{
    validate_country_name, validate_headquarter_consistency, validate_iso2_code,
    validate_swift_code, CodeKind, TextField, ValidationError,
};
pub use views::{BankDetails, BankSummary, Confirmation, CountryDetails, NewBank};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
