//! Server configuration, read from the client's `initializationOptions`.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use tidal_intel::scope::DEFAULT_SCAN_LIMIT;

pub const API_DUMP_URL: &str =
    "https://raw.githubusercontent.com/MaximumADHD/Roblox-Client-Tracker/roblox/API-Dump.json";
pub const METADATA_URL: &str =
    "https://raw.githubusercontent.com/MaximumADHD/Roblox-Client-Tracker/roblox/AutocompleteMetadata.xml";
pub const API_DOCS_URL: &str =
    "https://raw.githubusercontent.com/MaximumADHD/Roblox-Client-Tracker/roblox/api-docs/mini/en-us.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    pub api_dump_url: String,
    pub metadata_url: String,
    pub api_docs_url: String,
    /// Where fetched documents are cached between sessions.
    pub cache_dir: Option<PathBuf>,
    /// Bundled copies used when neither the network nor the cache has a
    /// usable document.
    pub backup_dir: Option<PathBuf>,
    /// Skip the network entirely.
    pub offline: bool,
    pub scan_limit_bytes: usize,
    pub fetch_timeout_secs: u64,
    /// `env_logger` filter; overrides `RUST_LOG`.
    pub log_filter: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_dump_url: API_DUMP_URL.to_string(),
            metadata_url: METADATA_URL.to_string(),
            api_docs_url: API_DOCS_URL.to_string(),
            cache_dir: dirs::cache_dir().map(|d| d.join("tidal")),
            backup_dir: None,
            offline: false,
            scan_limit_bytes: DEFAULT_SCAN_LIMIT,
            fetch_timeout_secs: 15,
            log_filter: None,
        }
    }
}

impl ServerConfig {
    /// Absent or `null` options give the defaults.  The caller reports a
    /// malformed object once logging is up.
    pub fn from_init_options(options: Option<&serde_json::Value>) -> serde_json::Result<Self> {
        match options.filter(|v| !v.is_null()) {
            Some(value) => Self::deserialize(value),
            None => Ok(Self::default()),
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_options_use_defaults() {
        let config = ServerConfig::from_init_options(None).unwrap();
        assert_eq!(config.api_dump_url, API_DUMP_URL);
        assert_eq!(config.scan_limit_bytes, 64 * 1024);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(15));
        assert!(!config.offline);
        assert_eq!(ServerConfig::from_init_options(Some(&serde_json::Value::Null)).unwrap(), config);
    }

    #[test]
    fn camel_case_fields_override_defaults() {
        let options = json!({
            "offline": true,
            "backupDir": "/opt/tidal/backup",
            "scanLimitBytes": 4096,
            "logFilter": "tidal_intel=debug"
        });
        let config = ServerConfig::from_init_options(Some(&options)).unwrap();
        assert!(config.offline);
        assert_eq!(config.backup_dir, Some(PathBuf::from("/opt/tidal/backup")));
        assert_eq!(config.scan_limit_bytes, 4096);
        assert_eq!(config.log_filter.as_deref(), Some("tidal_intel=debug"));
        assert_eq!(config.metadata_url, METADATA_URL);
    }

    #[test]
    fn malformed_options_are_rejected() {
        let options = json!({ "offline": "yes please" });
        let err = ServerConfig::from_init_options(Some(&options)).unwrap_err();
        assert!(err.to_string().contains("invalid type"), "{err}");
    }
}
