use crate::entities::{Bank, Country};
use crate::store::{DirectoryStore, StoreError, StoreResult};
use anyhow::{Context, Result};
use rusqlite::{ffi, params, Connection, OptionalExtension, Params, Row};
use std::path::Path;

const BANK_COLUMNS: &str =
    "swift_code, name, address, country_iso2, is_headquarter, headquarter_code";

/// SQLite-backed directory store
///
/// Banks reference their country and headquarters by code, so the
/// self-reference is a plain foreign key with `ON DELETE SET NULL`.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file and make sure the schema exists
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database {}", path.display()))?;
        setup_database(&conn)?;

        Ok(SqliteStore { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        setup_database(&conn)?;

        Ok(SqliteStore { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn query_banks<P: Params>(&self, filter: &str, params: P) -> StoreResult<Vec<Bank>> {
        let sql = format!(
            "SELECT {} FROM bank WHERE {} ORDER BY id",
            BANK_COLUMNS, filter
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let banks = stmt
            .query_map(params, bank_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(banks)
    }
}

pub fn setup_database(conn: &Connection) -> Result<()> {
    // Enable WAL mode for crash recovery ("memory" for in-memory databases)
    let _journal_mode: String =
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

    // Needed for the headquarters link to be cleared on delete
    conn.pragma_update(None, "foreign_keys", "ON")?;

    // ==========================================================================
    // Countries
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS country (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            iso2 TEXT UNIQUE NOT NULL,
            name TEXT NOT NULL
        )",
        [],
    )?;

    // ==========================================================================
    // Banks (HQ link is a self-reference by SWIFT code)
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS bank (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            swift_code TEXT UNIQUE NOT NULL,
            name TEXT NOT NULL,
            address TEXT NOT NULL,
            is_headquarter INTEGER NOT NULL,
            country_iso2 TEXT NOT NULL REFERENCES country(iso2),
            headquarter_code TEXT REFERENCES bank(swift_code) ON DELETE SET NULL
        )",
        [],
    )?;

    // ==========================================================================
    // Indexes
    // ==========================================================================
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_bank_country ON bank(country_iso2)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_bank_headquarter ON bank(headquarter_code)",
        [],
    )?;

    Ok(())
}

fn bank_from_row(row: &Row) -> rusqlite::Result<Bank> {
    Ok(Bank {
        swift_code: row.get(0)?,
        bank_name: row.get(1)?,
        address: row.get(2)?,
        country_iso2: row.get(3)?,
        is_headquarter: row.get(4)?,
        headquarter_code: row.get(5)?,
    })
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Other(err.to_string())
    }
}

/// Split uniqueness failures from every other write failure
fn map_write_error(err: rusqlite::Error) -> StoreError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, message)
            if failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
                || failure.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            StoreError::UniqueViolation(message.clone().unwrap_or_else(|| err.to_string()))
        }
        _ => StoreError::Other(err.to_string()),
    }
}

impl DirectoryStore for SqliteStore {
    fn find_bank_by_code(&self, swift_code: &str) -> StoreResult<Option<Bank>> {
        let sql = format!("SELECT {} FROM bank WHERE swift_code = ?1", BANK_COLUMNS);
        let bank = self
            .conn
            .query_row(&sql, [swift_code], bank_from_row)
            .optional()?;

        Ok(bank)
    }

    fn find_banks_by_code_prefix(&self, prefix: &str) -> StoreResult<Vec<Bank>> {
        // GLOB is case-sensitive, LIKE is not
        let pattern = format!("{}???", prefix);
        self.query_banks("swift_code GLOB ?1", [pattern])
    }

    fn find_country_by_iso2(&self, iso2: &str) -> StoreResult<Option<Country>> {
        let country = self
            .conn
            .query_row(
                "SELECT iso2, name FROM country WHERE iso2 = ?1",
                [iso2],
                |row| {
                    Ok(Country {
                        iso2: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;

        Ok(country)
    }

    fn insert_bank(&self, bank: &Bank, adopted_branches: &[String]) -> StoreResult<()> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO bank (
                swift_code, name, address, country_iso2, is_headquarter, headquarter_code
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                bank.swift_code,
                bank.bank_name,
                bank.address,
                bank.country_iso2,
                bank.is_headquarter,
                bank.headquarter_code,
            ],
        )
        .map_err(map_write_error)?;

        for branch_code in adopted_branches {
            tx.execute(
                "UPDATE bank SET headquarter_code = ?1 WHERE swift_code = ?2",
                params![bank.swift_code, branch_code],
            )
            .map_err(map_write_error)?;
        }

        tx.commit()?;
        Ok(())
    }

    fn insert_country(&self, country: &Country) -> StoreResult<()> {
        self.conn
            .execute(
                "INSERT INTO country (iso2, name) VALUES (?1, ?2)",
                params![country.iso2, country.name],
            )
            .map_err(map_write_error)?;

        Ok(())
    }

    fn delete_bank(&self, swift_code: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM bank WHERE swift_code = ?1", [swift_code])?;

        Ok(())
    }

    fn list_banks_by_country(&self, iso2: &str) -> StoreResult<Vec<Bank>> {
        self.query_banks("country_iso2 = ?1", [iso2])
    }

    fn list_branches(&self, headquarter_code: &str) -> StoreResult<Vec<Bank>> {
        self.query_banks("headquarter_code = ?1", [headquarter_code])
    }

    fn count_banks(&self) -> StoreResult<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM bank", [], |row| row.get(0))?;

        Ok(count)
    }
}
