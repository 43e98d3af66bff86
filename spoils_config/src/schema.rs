use serde::{Deserialize, Serialize};
use spoils_core::Item;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// Items known without asking the server.
    #[serde(default)]
    pub catalog: Vec<Item>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_base_url")]
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            session_cookie: None,
        }
    }
}

impl ServerConfig {
    fn default_base_url() -> String {
        "https://www.kingdomofloathing.com".to_string()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ResolverConfig {
    /// Upper bound on one whole extraction, item lookups included.
    #[serde(default = "ResolverConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "ResolverConfig::default_retry_delays")]
    pub retry_delays: Vec<u64>,
    #[serde(default = "ResolverConfig::default_final_retries")]
    pub final_retries: usize,
    #[serde(default = "ResolverConfig::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout_secs: Self::default_timeout_secs(),
            retry_delays: Self::default_retry_delays(),
            final_retries: Self::default_final_retries(),
            request_timeout_secs: Self::default_request_timeout_secs(),
        }
    }
}

impl ResolverConfig {
    const fn default_timeout_secs() -> u64 {
        30
    }

    fn default_retry_delays() -> Vec<u64> {
        vec![1, 2, 4]
    }

    const fn default_final_retries() -> usize {
        2
    }

    const fn default_request_timeout_secs() -> u64 {
        10
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Config {
    fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("spoils"))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'spoils init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config at {}: {e}", path.display()))?;

        debug!(
            "Loaded config from {} with {} catalog item(s)",
            path.display(),
            config.catalog.len()
        );
        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    /// Writes the config template, refusing to replace an existing file
    /// unless `overwrite` is set.
    pub fn create_config(overwrite: bool) -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() && !overwrite {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly, or run 'spoils init --force'.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, CONFIG_TEMPLATE)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Paste your session cookie into server.session_cookie");
        println!("   2. Add items you already know to the catalog");
        println!("   3. Run 'spoils parse <FILE>' on a saved response page");
        println!();
        println!("🔧 Configuration options:");
        println!("   - resolver.timeout_secs: Upper bound on one extraction");
        println!("   - resolver.retry_delays: Backoff between description page fetches");
        println!("   - catalog: Items used by 'spoils parse --offline'");
        println!();
        Ok(())
    }
}

const CONFIG_TEMPLATE: &str = r#"{
  "server": {
    "base_url": "https://www.kingdomofloathing.com",
    "session_cookie": "PHPSESSID=your-session-id-here"
  },
  "resolver": {
    "timeout_secs": 30,
    "retry_delays": [1, 2, 4],
    "final_retries": 2,
    "request_timeout_secs": 10
  },
  "catalog": [
    { "id": 2, "description_key": 310264817, "name": "seal tooth" },
    { "id": 1215, "description_key": 120448019, "name": "hot wing" }
  ]
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_json::from_str("{}").expect("empty config should parse");

        assert_eq!(config.server.base_url, "https://www.kingdomofloathing.com");
        assert_eq!(config.server.session_cookie, None);
        assert_eq!(config.resolver.timeout(), Duration::from_secs(30));
        assert_eq!(config.resolver.retry_delays, vec![1, 2, 4]);
        assert_eq!(config.resolver.final_retries, 2);
        assert_eq!(config.resolver.request_timeout(), Duration::from_secs(10));
        assert!(config.catalog.is_empty());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_partial_sections_keep_other_defaults() {
        let config: Config = serde_json::from_str(
            r#"{ "server": { "session_cookie": "PHPSESSID=abc" }, "resolver": { "timeout_secs": 5 } }"#,
        )
        .expect("partial config should parse");

        assert_eq!(config.server.base_url, "https://www.kingdomofloathing.com");
        assert_eq!(config.server.session_cookie.as_deref(), Some("PHPSESSID=abc"));
        assert_eq!(config.resolver.timeout_secs, 5);
        assert_eq!(config.resolver.retry_delays, vec![1, 2, 4]);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_template_parses() {
        let config: Config = serde_json::from_str(CONFIG_TEMPLATE).expect("template should parse");

        assert_eq!(config.catalog.len(), 2);
        assert_eq!(config.catalog[0], Item::new(2, 310_264_817, "seal tooth"));
        assert_eq!(config.catalog[0].name, "seal tooth");
        assert!(config.server.session_cookie.is_some());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_load_from_reports_path_on_bad_json() {
        let path = std::env::temp_dir().join(format!("spoils-config-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").expect("temp file should be writable");

        let err = Config::load_from(&path).expect_err("bad json should fail");
        assert!(err.to_string().contains(&path.display().to_string()));

        std::fs::remove_file(&path).expect("temp file should be removable");
    }
}
