use clap::Parser;
use kiroku::config::{BookCommand, Cli, Command, OnsenCommand};
use kiroku::core::library::{BookUpdate, LibraryService};
use kiroku::core::onsen::{OnsenService, VisitInput};
use kiroku::core::stats;
use kiroku::domain::ports::{ConfigProvider, MetadataSource};
use kiroku::utils::error::{ErrorSeverity, Result};
use kiroku::utils::{logger, validation::Validate};
use kiroku::{GoogleBooksClient, LocalStore, NominatimClient, OpenBdClient, TomlConfig};
use std::path::Path;

const DEFAULT_CONFIG_FILE: &str = "kiroku.toml";

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::debug!("CLI args: {:?}", cli);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(3);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(3);
    }

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!("❌ Command failed: {} (Severity: {:?})", e, e.severity());
        eprintln!("❌ {}", e.user_friendly_message());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 2,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

/// An explicit --config path must exist; the default file is optional and
/// falls back to built-in defaults when absent.
fn load_config(path: Option<&str>) -> Result<TomlConfig> {
    match path {
        Some(path) => TomlConfig::from_file(path),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            TomlConfig::from_file(DEFAULT_CONFIG_FILE)
        }
        None => Ok(TomlConfig::default()),
    }
}

fn build_library(config: &TomlConfig) -> LibraryService<LocalStore> {
    let store = LocalStore::new(config.data_path().to_string());
    let sources: Vec<Box<dyn MetadataSource>> = vec![
        Box::new(OpenBdClient::new(config.metadata_endpoint())),
        Box::new(GoogleBooksClient::new(config.fallback_endpoint())),
    ];
    LibraryService::new(store, sources, config.cover_endpoint())
}

fn build_onsen(config: &TomlConfig) -> OnsenService<LocalStore, NominatimClient> {
    let store = LocalStore::new(config.data_path().to_string());
    let geocoder = NominatimClient::new(
        config.geocode_endpoint(),
        config.user_agent(),
        config.region_hint().map(str::to_string),
    );
    OnsenService::new(store, geocoder, config.home())
}

async fn run(command: Command, config: &TomlConfig) -> Result<()> {
    match command {
        Command::Book(command) => run_book(command, config).await,
        Command::Onsen(command) => run_onsen(command, config).await,
    }
}

async fn run_book(command: BookCommand, config: &TomlConfig) -> Result<()> {
    let library = build_library(config);

    match command {
        BookCommand::Add { isbn } => {
            let meta = library.lookup(&isbn).await?;
            if meta.title.is_empty() {
                println!(
                    "⚠️  No metadata found for ISBN {}. Saving the record anyway;",
                    meta.isbn
                );
                println!("    fill in the details with `kiroku book update`.");
            }
            let record = library.add(meta).await?;
            println!("✅ Added \"{}\" (id {})", record.title, record.id);
        }
        BookCommand::List { status } => {
            let books = library.list(status).await?;
            if books.is_empty() {
                println!("No books on the shelf yet.");
                return Ok(());
            }
            for book in &books {
                println!(
                    "{}  [{}]  {} ({})",
                    book.id,
                    book.status.as_str(),
                    book.title,
                    book.author
                );
            }
            println!("{} book(s)", books.len());
        }
        BookCommand::Update {
            id,
            status,
            rating,
            review,
            start_date,
            end_date,
        } => {
            let update = BookUpdate {
                status,
                rating,
                review,
                start_date,
                end_date,
            };
            let record = library.update(&id, update).await?;
            println!(
                "✅ Updated \"{}\": status={}, rating={}",
                record.title,
                record.status.as_str(),
                record.rating
            );
        }
        BookCommand::Remove { id } => {
            library.remove(&id).await?;
            println!("✅ Removed record {}", id);
        }
        BookCommand::Stats { year } => {
            let year = year.unwrap_or_else(|| {
                use chrono::Datelike;
                chrono::Local::now().year()
            });
            let counts = library.monthly_stats(year).await?;
            println!("Books finished in {}:", year);
            for (month, count) in counts.iter().enumerate() {
                println!("  {}  {}", MONTH_NAMES[month], count);
            }
            println!("Total: {}", stats::yearly_total(&counts));
        }
        BookCommand::Export { output } => {
            let csv = library.export_csv().await?;
            std::fs::write(&output, csv)?;
            println!("✅ Exported to {}", output);
        }
    }

    Ok(())
}

async fn run_onsen(command: OnsenCommand, config: &TomlConfig) -> Result<()> {
    let onsen = build_onsen(config);

    match command {
        OnsenCommand::Add {
            name,
            address,
            date,
            notes,
        } => {
            let input = VisitInput {
                name,
                address,
                visited_on: date.unwrap_or_else(|| chrono::Local::now().date_naive()),
                notes,
            };
            let record = onsen.record_visit(input).await?;
            match (record.coords, record.distance_km) {
                (Some(point), Some(distance)) => println!(
                    "✅ Recorded \"{}\" at ({}, {}), {} km from home",
                    record.name, point.lat, point.lon, distance
                ),
                (Some(point), None) => println!(
                    "✅ Recorded \"{}\" at ({}, {}); set [home] in the config to see distances",
                    record.name, point.lat, point.lon
                ),
                _ => println!(
                    "✅ Recorded \"{}\" (address could not be geocoded)",
                    record.name
                ),
            }
        }
        OnsenCommand::List => {
            let visits = onsen.list().await?;
            if visits.is_empty() {
                println!("No visits recorded yet.");
                return Ok(());
            }
            for visit in &visits {
                let distance = visit
                    .distance_km
                    .map(|d| format!("{} km", d))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{}  {}  {}  ({})",
                    visit.id, visit.visited_on, visit.name, distance
                );
            }
            println!("{} visit(s)", visits.len());
        }
    }

    Ok(())
}
