//! Configuration management for the documentation shell.
//!
//! Parses `fakerdocs.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `site.repository_url`
//! - `theme.store_path`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override the theme preference file.
    pub theme_store_path: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "fakerdocs.toml";

/// Theme values accepted by `theme.default`.
const THEME_VALUES: [&str; 3] = ["light", "dark", "system"];

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Site identity shown in the header.
    pub site: SiteSettings,
    /// Theme preference configuration (path is a relative string from TOML).
    theme: ThemeConfigRaw,
    /// Code snippet behaviour.
    pub snippets: SnippetConfig,
    /// Layout frame behaviour.
    pub layout: LayoutConfig,

    /// Resolved theme configuration (set after loading).
    #[serde(skip)]
    pub theme_resolved: ThemeConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
        }
    }
}

/// Site identity.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Brand shown in the header.
    pub title: String,
    /// Repository link shown in the header.
    pub repository_url: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            title: "faker-api".to_owned(),
            repository_url: "https://github.com/amandollar/faker-api".to_owned(),
        }
    }
}

/// Raw theme configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ThemeConfigRaw {
    storage_key: Option<String>,
    default: Option<String>,
    store_path: Option<String>,
}

/// Resolved theme preference configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeConfig {
    /// Key the preference is persisted under.
    pub storage_key: String,
    /// Theme used until the user picks one.
    pub default: String,
    /// JSON file backing the preference store.
    pub store_path: PathBuf,
}

impl ThemeConfig {
    fn with_base(base: &Path) -> Self {
        Self {
            storage_key: "faker-api-theme".to_owned(),
            default: "system".to_owned(),
            store_path: base.join(".fakerdocs").join("preferences.json"),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self::with_base(Path::new("."))
    }
}

/// Code snippet configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SnippetConfig {
    /// Milliseconds a snippet shows its "copied" state.
    pub reset_ms: u64,
}

impl Default for SnippetConfig {
    fn default() -> Self {
        Self { reset_ms: 2000 }
    }
}

/// Layout frame configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Close the sidebar whenever the current path changes.
    pub close_sidebar_on_navigate: bool,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`server.host`").
        field: String,
        /// Error message (e.g., "${`HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `fakerdocs.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(path) = &settings.theme_store_path {
            self.theme_resolved.store_path.clone_from(path);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(current)
    }

    fn discover_from(mut current: PathBuf) -> Option<PathBuf> {
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            site: SiteSettings::default(),
            theme: ThemeConfigRaw::default(),
            snippets: SnippetConfig::default(),
            layout: LayoutConfig::default(),
            theme_resolved: ThemeConfig::with_base(base),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_site()?;
        self.validate_theme()?;

        if self.snippets.reset_ms == 0 {
            return Err(ConfigError::Validation(
                "snippets.reset_ms must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 is technically valid (OS assigns a random port), but it's
        // unlikely to be intentional in a config file
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;
        require_http_url(&self.site.repository_url, "site.repository_url")
    }

    fn validate_theme(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.theme_resolved.storage_key, "theme.storage_key")?;
        if !THEME_VALUES.contains(&self.theme_resolved.default.as_str()) {
            return Err(ConfigError::Validation(format!(
                "theme.default must be one of {}, got '{}'",
                THEME_VALUES.join(", "),
                self.theme_resolved.default
            )));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        self.site.repository_url =
            expand::expand_env(&self.site.repository_url, "site.repository_url")?;

        if let Some(ref path) = self.theme.store_path {
            self.theme.store_path = Some(expand::expand_env(path, "theme.store_path")?);
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory and fill in theme defaults.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let defaults = ThemeConfig::with_base(config_dir);

        self.theme_resolved = ThemeConfig {
            storage_key: self.theme.storage_key.clone().unwrap_or(defaults.storage_key),
            default: self.theme.default.clone().unwrap_or(defaults.default),
            store_path: self
                .theme
                .store_path
                .as_deref()
                .map_or(defaults.store_path, |p| config_dir.join(p)),
        };
    }
}
