use std::env;
use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};

use crate::error::ConfigurationError;
use crate::models::RescaleRequest;

// Default configuration constants
pub const DEFAULT_CONFIG_PATH: &str = "config.ini";
pub const DEFAULT_SECTION: &str = "default";
pub const DEFAULT_API_BASE_URL: &str = "https://api.hetzner.cloud/v1";
pub const API_TOKEN_ENV: &str = "HCLOUD_TOKEN";
pub const API_ENDPOINT_ENV: &str = "HCLOUD_ENDPOINT";

/// Values supplied on the command line. `None`/`false` means "not given".
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub server_id: Option<u64>,
    pub server_type: Option<String>,
    pub upgrade_disk: bool,
    /// `HCLOUD_TOKEN`; only used when neither the flag nor the file has a key
    pub env_api_key: Option<String>,
}

/// Where to read the INI file from
#[derive(Debug, Clone)]
pub struct ConfigSource {
    pub path: PathBuf,
    pub section: String,
    /// An explicitly passed `--config` must exist; the default path may be absent.
    pub required: bool,
}

impl ConfigSource {
    pub fn new(explicit: Option<PathBuf>, section: Option<String>) -> Self {
        let section = section
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SECTION.to_string());
        match explicit {
            Some(path) => Self { path, section, required: true },
            None => Self {
                path: PathBuf::from(DEFAULT_CONFIG_PATH),
                section,
                required: false,
            },
        }
    }
}

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

/// `HCLOUD_TOKEN`, used when neither `--api_key` nor the config file has a key
pub fn get_api_token() -> Option<String> {
    env::var(API_TOKEN_ENV).ok().filter(|v| !v.trim().is_empty())
}

pub fn get_api_base_url() -> String {
    sanitize_base_url(&env::var(API_ENDPOINT_ENV).unwrap_or_default())
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Resolve a [`RescaleRequest`] from the INI file and command-line overrides.
///
/// Command-line values win when present. The API key falls back to
/// `HCLOUD_TOKEN` only after the file. This never touches the network, so a
/// missing credential is reported before any request is attempted.
pub fn resolve_request(
    source: &ConfigSource,
    overrides: &Overrides,
) -> Result<RescaleRequest, ConfigurationError> {
    let file = FileValues::read(source)?;

    let api_key = non_blank(overrides.api_key.clone())
        .or(file.api_key)
        .or_else(|| non_blank(overrides.env_api_key.clone()))
        .ok_or_else(|| missing("api_key", source))?;

    let server_id = match overrides.server_id {
        Some(id) => id,
        None => match file.server_id {
            Some(raw) => parse_server_id(&raw)?,
            None => return Err(missing("server_id", source)),
        },
    };

    let server_type = non_blank(overrides.server_type.clone())
        .or(file.server_type)
        .ok_or_else(|| missing("server_type", source))?;

    let upgrade_disk = overrides.upgrade_disk || file.upgrade_disk.unwrap_or(false);

    tracing::debug!(
        path = %source.path.display(),
        section = %source.section,
        server_id,
        server_type = %server_type,
        upgrade_disk,
        "Resolved rescale request"
    );

    Ok(RescaleRequest {
        api_key,
        server_id,
        server_type,
        upgrade_disk,
    })
}

/// Raw values found in the config file section
#[derive(Debug, Default)]
struct FileValues {
    api_key: Option<String>,
    server_id: Option<String>,
    server_type: Option<String>,
    upgrade_disk: Option<bool>,
}

impl FileValues {
    fn read(source: &ConfigSource) -> Result<Self, ConfigurationError> {
        if !source.path.exists() {
            if source.required {
                return Err(ConfigurationError::FileNotFound(source.path.display().to_string()));
            }
            tracing::debug!(path = %source.path.display(), "Config file not present; using command-line values only");
            return Ok(Self::default());
        }

        let name = source.path.to_string_lossy();
        let settings = Config::builder()
            .add_source(File::new(&name, FileFormat::Ini).required(source.required))
            .build()?;

        let section = &source.section;
        Ok(Self {
            api_key: lookup_string(&settings, section, "api_key")?,
            server_id: lookup_string(&settings, section, "server_id")?,
            server_type: lookup_string(&settings, section, "server_type")?,
            upgrade_disk: lookup_bool(&settings, section, "upgrade_disk")?,
        })
    }
}

fn lookup_string(
    settings: &Config,
    section: &str,
    key: &'static str,
) -> Result<Option<String>, ConfigurationError> {
    match settings.get_string(&format!("{}.{}", section, key)) {
        Ok(v) => Ok(non_blank(Some(v))),
        Err(config::ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ConfigurationError::Source(e)),
    }
}

fn lookup_bool(
    settings: &Config,
    section: &str,
    key: &'static str,
) -> Result<Option<bool>, ConfigurationError> {
    match lookup_string(settings, section, key)? {
        Some(raw) => parse_bool(&raw)
            .map(Some)
            .ok_or_else(|| ConfigurationError::Invalid {
                key,
                value: raw,
                reason: "expected true/false, yes/no, on/off or 1/0".to_string(),
            }),
        None => Ok(None),
    }
}

pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_server_id(raw: &str) -> Result<u64, ConfigurationError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| ConfigurationError::Invalid {
            key: "server_id",
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn missing(key: &'static str, source: &ConfigSource) -> ConfigurationError {
    ConfigurationError::Missing {
        key,
        section: source.section.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_accepts_ini_spellings() {
        for t in ["1", "true", "TRUE", "yes", "On", " true "] {
            assert_eq!(parse_bool(t), Some(true), "{t}");
        }
        for f in ["0", "false", "No", "off"] {
            assert_eq!(parse_bool(f), Some(false), "{f}");
        }
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_parse_server_id_rejects_non_numeric() {
        assert_eq!(parse_server_id(" 12345 ").unwrap(), 12345);
        assert!(matches!(
            parse_server_id("abc"),
            Err(ConfigurationError::Invalid { key: "server_id", .. })
        ));
        assert!(parse_server_id("-1").is_err());
    }

    #[test]
    fn test_config_source_defaults() {
        let src = ConfigSource::new(None, None);
        assert_eq!(src.path, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert_eq!(src.section, DEFAULT_SECTION);
        assert!(!src.required);

        let src = ConfigSource::new(Some(PathBuf::from("prod.ini")), Some("Hetzner".into()));
        assert_eq!(src.section, "hetzner");
        assert!(src.required);
    }

    #[test]
    fn test_blank_override_does_not_mask_file_value() {
        assert_eq!(non_blank(Some("   ".into())), None);
        assert_eq!(non_blank(Some(" abc ".into())), Some("abc".into()));
    }
}
