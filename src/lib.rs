pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{BookCommand, Cli, Command, OnsenCommand};

#[cfg(feature = "lambda")]
pub use crate::config::lambda::LambdaConfig;

pub use crate::adapters::{GoogleBooksClient, NominatimClient, OpenBdClient};
pub use crate::config::{cli::LocalStore, toml_config::TomlConfig};
pub use crate::core::isbn::{normalize, InvalidLength, Isbn13};
pub use crate::core::library::{BookUpdate, LibraryService};
pub use crate::core::onsen::{OnsenService, VisitInput};
pub use crate::utils::error::{AppError, Result};
