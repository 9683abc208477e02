use crate::adapters::{google_books, nominatim, openbd};
use crate::domain::model::GeoPoint;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_COVER_ENDPOINT: &str = "https://ndlsearch.ndl.go.jp/thumbnail";
pub const DEFAULT_USER_AGENT: &str = "kiroku/0.1 (personal logging CLI)";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub endpoints: EndpointsConfig,
    pub geocoding: GeocodingConfig,
    pub storage: StorageConfig,
    pub home: Option<HomeConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    pub metadata: String,
    pub fallback: String,
    pub cover: String,
    pub geocode: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            metadata: openbd::DEFAULT_ENDPOINT.to_string(),
            fallback: google_books::DEFAULT_ENDPOINT.to_string(),
            cover: DEFAULT_COVER_ENDPOINT.to_string(),
            geocode: nominatim::DEFAULT_ENDPOINT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    pub user_agent: String,
    pub region_hint: Option<String>,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            region_hint: Some("Japan".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_path: "./data".to_string(),
        }
    }
}

/// The point distances are measured from. Set it once after geocoding your
/// own address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeConfig {
    pub lat: f64,
    pub lon: f64,
}

impl TomlConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR_NAME}` placeholders with environment variable values.
    /// Unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").expect("static regex");

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("endpoints.metadata", &self.endpoints.metadata)?;
        validation::validate_url("endpoints.fallback", &self.endpoints.fallback)?;
        validation::validate_url("endpoints.cover", &self.endpoints.cover)?;
        validation::validate_url("endpoints.geocode", &self.endpoints.geocode)?;
        validation::validate_non_empty_string("geocoding.user_agent", &self.geocoding.user_agent)?;
        validation::validate_path("storage.data_path", &self.storage.data_path)?;

        if let Some(home) = &self.home {
            validation::validate_range("home.lat", home.lat, -90.0, 90.0)?;
            validation::validate_range("home.lon", home.lon, -180.0, 180.0)?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn metadata_endpoint(&self) -> &str {
        &self.endpoints.metadata
    }

    fn fallback_endpoint(&self) -> &str {
        &self.endpoints.fallback
    }

    fn cover_endpoint(&self) -> &str {
        &self.endpoints.cover
    }

    fn geocode_endpoint(&self) -> &str {
        &self.endpoints.geocode
    }

    fn user_agent(&self) -> &str {
        &self.geocoding.user_agent
    }

    fn region_hint(&self) -> Option<&str> {
        self.geocoding.region_hint.as_deref()
    }

    fn data_path(&self) -> &str {
        &self.storage.data_path
    }

    fn home(&self) -> Option<GeoPoint> {
        self.home.as_ref().map(|h| GeoPoint {
            lat: h.lat,
            lon: h.lon,
        })
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_point_at_public_services() {
        let config = TomlConfig::default();

        assert_eq!(config.endpoints.metadata, "https://api.openbd.jp/v1");
        assert_eq!(config.endpoints.geocode, "https://nominatim.openstreetmap.org");
        assert_eq!(config.geocoding.region_hint.as_deref(), Some("Japan"));
        assert!(config.home.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml_config() {
        let toml_content = r#"
[storage]
data_path = "/tmp/kiroku"

[home]
lat = 35.78
lon = 139.9
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.storage.data_path, "/tmp/kiroku");
        let home = config.home().unwrap();
        assert_eq!(home.lat, 35.78);
        assert_eq!(home.lon, 139.9);
        // Unspecified sections fall back to defaults.
        assert_eq!(config.endpoints.fallback, "https://www.googleapis.com/books/v1");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_GEOCODE_ENDPOINT", "https://geo.test.example");

        let toml_content = r#"
[endpoints]
geocode = "${TEST_GEOCODE_ENDPOINT}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.endpoints.geocode, "https://geo.test.example");

        std::env::remove_var("TEST_GEOCODE_ENDPOINT");
    }

    #[test]
    fn test_config_validation_rejects_bad_endpoint() {
        let toml_content = r#"
[endpoints]
metadata = "not-a-url"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rejects_out_of_range_home() {
        let toml_content = r#"
[home]
lat = 95.0
lon = 139.9
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[geocoding]
user_agent = "kiroku-file-test/0.1"
region_hint = "Japan"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.geocoding.user_agent, "kiroku-file-test/0.1");
    }
}
