// 📥 Import - SWIFT sheet (CSV) → normalized records → directory
//
// Replay is plain create_country / create_bank calls, headquarters first,
// so every branch finds its headquarters already stored.

use crate::directory::DirectoryService;
use crate::entities::{is_headquarter_code, Country};
use crate::store::DirectoryStore;
use crate::views::NewBank;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use tracing::{info, warn};

// ============================================================================
// RECORDS
// ============================================================================

/// One row of the source sheet. Extra columns (CODE TYPE, TOWN NAME,
/// TIME ZONE, ...) are ignored.
#[derive(Debug, Deserialize)]
struct SheetRow {
    #[serde(rename = "COUNTRY ISO2 CODE")]
    country_iso2: String,

    #[serde(rename = "SWIFT CODE")]
    swift_code: String,

    #[serde(rename = "NAME")]
    name: String,

    #[serde(rename = "ADDRESS", default)]
    address: String,

    #[serde(rename = "COUNTRY NAME")]
    country_name: String,
}

/// Normalized bank record, one per sheet row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankRecord {
    pub swift_code: String,
    pub bank_name: String,
    pub address: String,
    pub country_iso2: String,
    pub is_headquarter: bool,
}

/// Everything extracted from one sheet
#[derive(Debug, Clone, Default)]
pub struct SwiftSheet {
    /// De-duplicated by ISO2, sorted by ISO2
    pub countries: Vec<Country>,

    /// Headquarters first, then by SWIFT code
    pub banks: Vec<BankRecord>,
}

impl SwiftSheet {
    pub fn country_name(&self, iso2: &str) -> Option<&str> {
        self.countries
            .iter()
            .find(|c| c.iso2 == iso2)
            .map(|c| c.name.as_str())
    }
}

// ============================================================================
// LOADING
// ============================================================================

pub fn load_csv(csv_path: &Path) -> Result<SwiftSheet> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open CSV file {}", csv_path.display()))?;

    read_sheet(file)
}

pub fn read_sheet<R: io::Read>(reader: R) -> Result<SwiftSheet> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut countries: BTreeMap<String, String> = BTreeMap::new();
    let mut banks = Vec::new();

    for (index, result) in rdr.deserialize().enumerate() {
        let row: SheetRow =
            result.with_context(|| format!("Failed to deserialize row {}", index + 1))?;

        let iso2 = row.country_iso2.to_uppercase();
        let country_name = row.country_name.to_uppercase();
        let swift_code = row.swift_code.to_uppercase();

        match countries.get(&iso2) {
            Some(known) if known != &country_name => {
                warn!(%iso2, %known, other = %country_name, "conflicting country names in sheet, keeping first");
            }
            Some(_) => {}
            None => {
                countries.insert(iso2.clone(), country_name);
            }
        }

        banks.push(BankRecord {
            is_headquarter: is_headquarter_code(&swift_code),
            swift_code,
            bank_name: row.name,
            address: row.address,
            country_iso2: iso2,
        });
    }

    // Headquarters must be stored before any branch that may reference them
    banks.sort_by(|a, b| {
        b.is_headquarter
            .cmp(&a.is_headquarter)
            .then_with(|| a.swift_code.cmp(&b.swift_code))
    });

    Ok(SwiftSheet {
        countries: countries
            .into_iter()
            .map(|(iso2, name)| Country::new(iso2, name))
            .collect(),
        banks,
    })
}

// ============================================================================
// REPLAY
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub countries: usize,
    pub banks_created: usize,
    pub skipped: usize,
}

/// Feed a sheet through the directory. Rejected records are logged and
/// counted, never fatal.
pub fn replay<S: DirectoryStore>(
    service: &DirectoryService<S>,
    sheet: &SwiftSheet,
) -> ImportSummary {
    let mut summary = ImportSummary::default();

    for country in &sheet.countries {
        match service.create_country(&country.iso2, &country.name) {
            Ok(_) => summary.countries += 1,
            Err(e) => warn!(iso2 = %country.iso2, error = %e, "country skipped"),
        }
    }

    for record in &sheet.banks {
        let Some(country_name) = sheet.country_name(&record.country_iso2) else {
            warn!(swift_code = %record.swift_code, "bank skipped: unknown country");
            summary.skipped += 1;
            continue;
        };

        let request = NewBank {
            swift_code: record.swift_code.clone(),
            bank_name: record.bank_name.clone(),
            address: record.address.clone(),
            country_iso2: record.country_iso2.clone(),
            country_name: country_name.to_string(),
            is_headquarter: record.is_headquarter,
        };

        match service.create_bank(&request) {
            Ok(_) => summary.banks_created += 1,
            Err(e) => {
                warn!(swift_code = %record.swift_code, error = %e, "bank skipped");
                summary.skipped += 1;
            }
        }
    }

    info!(
        countries = summary.countries,
        banks = summary.banks_created,
        skipped = summary.skipped,
        "import finished"
    );
    summary
}

/// Load a CSV file and replay it
pub fn import_csv<S: DirectoryStore>(
    service: &DirectoryService<S>,
    csv_path: &Path,
) -> Result<ImportSummary> {
    let sheet = load_csv(csv_path)?;
    info!(
        path = %csv_path.display(),
        rows = sheet.banks.len(),
        countries = sheet.countries.len(),
        "sheet loaded"
    );

    Ok(replay(service, &sheet))
}

/// Startup bootstrap: import only into an empty directory, and only if the
/// sheet exists. Returns `None` when nothing was imported.
pub fn bootstrap<S: DirectoryStore>(
    service: &DirectoryService<S>,
    csv_path: &Path,
) -> Result<Option<ImportSummary>> {
    let existing = service
        .store()
        .count_banks()
        .context("Failed to count stored banks")?;
    if existing > 0 {
        info!(banks = existing, "directory already populated, skipping import");
        return Ok(None);
    }

    if !csv_path.exists() {
        warn!(path = %csv_path.display(), "no SWIFT sheet found, starting empty");
        return Ok(None);
    }

    import_csv(service, csv_path).map(Some)
}
