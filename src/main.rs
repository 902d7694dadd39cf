use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use swift_directory::config::{init_tracing, StorageArgs};
use swift_directory::{import_csv, DirectoryService, DirectoryStore, SqliteStore};

#[derive(Parser)]
#[command(name = "swift-directory", version, about = "SWIFT code directory tools")]
struct Cli {
    #[command(flatten)]
    storage: StorageArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import the SWIFT sheet (CSV) into the database
    Import,

    /// Print one bank as JSON (headquarters include their branches)
    Show { swift_code: String },

    /// Print a country and all its banks as JSON
    Country { iso2: String },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let store = SqliteStore::open(&cli.storage.database)?;
    let service = DirectoryService::new(store);

    match cli.command {
        Command::Import => run_import(&service, &cli.storage),
        Command::Show { swift_code } => {
            swift_directory::validate_swift_code(&swift_code)?;
            let bank = service.read_bank(&swift_code)?;
            println!("{}", serde_json::to_string_pretty(&bank)?);
            Ok(())
        }
        Command::Country { iso2 } => {
            swift_directory::validate_iso2_code(&iso2)?;
            let country = service.read_country(&iso2)?;
            println!("{}", serde_json::to_string_pretty(&country)?);
            Ok(())
        }
    }
}

fn run_import(service: &DirectoryService<SqliteStore>, storage: &StorageArgs) -> Result<()> {
    println!("🗄️  SWIFT Directory Import - CSV → SQLite");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("\n📂 Sheet:    {}", storage.csv.display());
    println!("💾 Database: {}", storage.database.display());

    let summary = import_csv(service, &storage.csv)?;

    let total = service
        .store()
        .count_banks()
        .context("Failed to count stored banks")?;

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("✓ Countries:      {}", summary.countries);
    println!("✓ Banks created:  {}", summary.banks_created);
    println!("✓ Skipped:        {}", summary.skipped);
    println!("✓ Banks in store: {}", total);

    Ok(())
}
