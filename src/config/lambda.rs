#[cfg(feature = "lambda")]
use crate::adapters::nominatim;
#[cfg(feature = "lambda")]
use crate::utils::error::Result;
#[cfg(feature = "lambda")]
use std::env;

/// Environment-variable configuration for the geocoding proxy function.
#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub geocode_endpoint: String,
    pub user_agent: String,
    pub region_hint: Option<String>,
}

#[cfg(feature = "lambda")]
impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            geocode_endpoint: env::var("GEOCODE_ENDPOINT")
                .unwrap_or_else(|_| nominatim::DEFAULT_ENDPOINT.to_string()),
            user_agent: env::var("GEOCODE_USER_AGENT").map_err(|_| {
                crate::utils::error::AppError::ConfigError {
                    message:
                        "GEOCODE_USER_AGENT environment variable is required (Nominatim usage policy)"
                            .to_string(),
                }
            })?,
            region_hint: env::var("REGION_HINT").ok(),
        })
    }
}
