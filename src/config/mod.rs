pub mod cli;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::ReadingStatus;
#[cfg(feature = "cli")]
use chrono::NaiveDate;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Parser)]
#[command(name = "kiroku")]
#[command(about = "Personal reading and hot-spring visit logger")]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage the bookshelf
    #[command(subcommand)]
    Book(BookCommand),
    /// Manage hot-spring visits
    #[command(subcommand)]
    Onsen(OnsenCommand),
}

#[cfg(feature = "cli")]
#[derive(Debug, Subcommand)]
pub enum BookCommand {
    /// Look up an ISBN and add the book to the shelf
    Add {
        /// 10- or 13-digit ISBN, hyphens and spaces allowed
        isbn: String,
    },
    /// List books, newest first
    List {
        #[arg(long, value_enum)]
        status: Option<ReadingStatus>,
    },
    /// Update a book record
    Update {
        id: String,
        #[arg(long, value_enum)]
        status: Option<ReadingStatus>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=5))]
        rating: Option<u8>,
        #[arg(long)]
        review: Option<String>,
        #[arg(long, help = "Reading start date, YYYY-MM-DD")]
        start_date: Option<NaiveDate>,
        #[arg(long, help = "Reading end date, YYYY-MM-DD")]
        end_date: Option<NaiveDate>,
    },
    /// Delete a book record
    Remove { id: String },
    /// Monthly completed-book counts for a year
    Stats {
        #[arg(long)]
        year: Option<i32>,
    },
    /// Export all book records as CSV
    Export {
        #[arg(long, default_value = "books.csv")]
        output: String,
    },
}

#[cfg(feature = "cli")]
#[derive(Debug, Subcommand)]
pub enum OnsenCommand {
    /// Record a hot-spring visit
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: String,
        #[arg(long, help = "Visit date, YYYY-MM-DD; defaults to today")]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// List visits, newest first
    List,
}
