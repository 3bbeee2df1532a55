//! Layered application configuration.
//!
//! Sources are merged in this order, later ones winning:
//! 1. built-in defaults
//! 2. YAML file (`--config`)
//! 3. environment variables prefixed with `APP__` (`__` separates nesting
//!    levels, e.g. `APP__SERVER__BIND_ADDR=127.0.0.1:9000`)
//! 4. CLI overrides (`--port`, `-v`)
//!
//! Module sections live under `modules.<name>.config` and are parsed by the
//! module itself through [`module_config_or_default`].

use std::collections::BTreeMap;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::Path;

use anyhow::Context;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "APP__";

const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 8080));

/// Root configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    /// Raw per-module sections, keyed by module name.
    pub modules: BTreeMap<String, serde_json::Value>,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
    /// Listen address. Defaults to `0.0.0.0:8080`.
    pub bind_addr: SocketAddr,
    /// Requests running longer than this are answered with 504. `0` disables the timeout.
    pub request_timeout_secs: u64,
    /// Maximum accepted request body size.
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR,
            request_timeout_secs: 30,
            body_limit_bytes: 1024 * 1024,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// Default filter directive, e.g. `info` or `calculator=debug,info`.
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Command-line values that override the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub port: Option<u16>,
    /// Verbosity count (-v info, -vv debug, -vvv trace).
    pub verbose: u8,
}

impl AppConfig {
    /// Loads defaults, then the optional YAML file, then `APP__*` env vars.
    ///
    /// # Errors
    /// Returns an error if the file does not exist or any source fails to
    /// parse into the configuration schema.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            if !path.is_file() {
                anyhow::bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("failed to load configuration")
    }

    /// Applies CLI overrides on top of the loaded configuration.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(port) = args.port {
            self.server.bind_addr.set_port(port);
        }

        let level = match args.verbose {
            0 => None,
            1 => Some("info"),
            2 => Some("debug"),
            _ => Some("trace"),
        };
        if let Some(level) = level {
            level.clone_into(&mut self.logging.level);
        }
    }

    /// Renders the effective configuration as YAML.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> anyhow::Result<String> {
        serde_saphyr::to_string(self).context("failed to render configuration as YAML")
    }
}

/// Configuration error for typed module config access.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid config for module '{module}': {source}")]
    InvalidConfig {
        module: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Provider of module-specific configuration (raw JSON sections only).
pub trait ConfigProvider: Send + Sync {
    /// Returns raw JSON section for the module, if any.
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value>;
}

impl ConfigProvider for AppConfig {
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
        self.modules.get(module_name)
    }
}

/// Lenient loader: falls back to `T::default()` when the module, or its
/// `config` section, is absent.
///
/// # Errors
/// Returns `ConfigError::InvalidConfig` if the section exists but cannot be deserialized.
pub fn module_config_or_default<T: DeserializeOwned + Default>(
    provider: &dyn ConfigProvider,
    module_name: &str,
) -> Result<T, ConfigError> {
    let Some(section) = provider
        .get_module_config(module_name)
        .and_then(serde_json::Value::as_object)
        .and_then(|obj| obj.get("config"))
    else {
        return Ok(T::default());
    };

    serde_json::from_value(section.clone()).map_err(|source| ConfigError::InvalidConfig {
        module: module_name.to_owned(),
        source,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write as _;

    #[derive(Debug, PartialEq, Deserialize, Default)]
    #[serde(deny_unknown_fields, default)]
    struct TestConfig {
        enabled: bool,
        limit: Option<usize>,
    }

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .expect("create temp config");
        file.write_all(content.as_bytes()).expect("write temp config");
        file
    }

    fn load(path: Option<&Path>) -> anyhow::Result<AppConfig> {
        temp_env::with_vars_unset(
            [
                "APP__SERVER__BIND_ADDR",
                "APP__SERVER__REQUEST_TIMEOUT_SECS",
                "APP__LOGGING__LEVEL",
                "APP__LOGGING__FORMAT",
            ],
            || AppConfig::load_or_default(path),
        )
    }

    #[test]
    fn test_defaults() {
        let cfg = load(None).unwrap();
        assert_eq!(cfg.server.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(cfg.server.request_timeout_secs, 30);
        assert_eq!(cfg.server.body_limit_bytes, 1024 * 1024);
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.logging.format, LogFormat::Text);
        assert!(cfg.modules.is_empty());
    }

    #[test]
    fn test_yaml_file_overrides_defaults() {
        let file = write_config(
            r#"
server:
  bind_addr: "127.0.0.1:9090"
logging:
  level: debug
  format: json
modules:
  calculator:
    config:
      expose_error_details: true
"#,
        );

        let cfg = load(Some(file.path())).unwrap();
        assert_eq!(cfg.server.bind_addr, "127.0.0.1:9090".parse().unwrap());
        assert_eq!(cfg.server.request_timeout_secs, 30);
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.logging.format, LogFormat::Json);
        assert_eq!(
            cfg.modules["calculator"],
            json!({ "config": { "expose_error_details": true } })
        );
    }

    #[test]
    fn test_env_overrides_file() {
        let file = write_config("server:\n  request_timeout_secs: 5\n");

        let cfg = temp_env::with_vars(
            [
                ("APP__SERVER__REQUEST_TIMEOUT_SECS", Some("7")),
                ("APP__LOGGING__LEVEL", Some("warn")),
            ],
            || AppConfig::load_or_default(Some(file.path())),
        )
        .unwrap();

        assert_eq!(cfg.server.request_timeout_secs, 7);
        assert_eq!(cfg.logging.level, "warn");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load(Some(Path::new("/definitely/not/here.yaml"))).unwrap_err();
        assert!(err.to_string().contains("config file does not exist"));
    }

    #[test]
    fn test_unknown_field_is_an_error() {
        let file = write_config("server:\n  port: 80\n");
        assert!(load(Some(file.path())).is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut cfg = AppConfig::default();
        cfg.apply_cli_overrides(&CliArgs {
            port: Some(3000),
            verbose: 2,
        });
        assert_eq!(cfg.server.bind_addr.port(), 3000);
        assert_eq!(cfg.logging.level, "debug");

        cfg.apply_cli_overrides(&CliArgs {
            port: None,
            verbose: 5,
        });
        assert_eq!(cfg.server.bind_addr.port(), 3000);
        assert_eq!(cfg.logging.level, "trace");
    }

    #[test]
    fn test_no_verbose_keeps_configured_level() {
        let mut cfg = AppConfig::default();
        cfg.logging.level = "warn".to_owned();
        cfg.apply_cli_overrides(&CliArgs::default());
        assert_eq!(cfg.logging.level, "warn");
    }

    #[test]
    fn test_to_yaml_contains_sections() {
        let yaml = AppConfig::default().to_yaml().unwrap();
        assert!(yaml.contains("server:"));
        assert!(yaml.contains("bind_addr:"));
        assert!(yaml.contains("logging:"));
    }

    #[test]
    fn test_module_config_present() {
        let mut cfg = AppConfig::default();
        cfg.modules.insert(
            "test_module".to_owned(),
            json!({ "config": { "enabled": true, "limit": 10 } }),
        );

        let parsed: TestConfig = module_config_or_default(&cfg, "test_module").unwrap();
        assert_eq!(
            parsed,
            TestConfig {
                enabled: true,
                limit: Some(10)
            }
        );
    }

    #[test]
    fn test_module_config_missing_uses_default() {
        let mut cfg = AppConfig::default();
        cfg.modules
            .insert("no_config_module".to_owned(), json!({ "other": 1 }));
        cfg.modules
            .insert("invalid_module".to_owned(), json!("not an object"));

        for name in ["absent", "no_config_module", "invalid_module"] {
            let parsed: TestConfig = module_config_or_default(&cfg, name).unwrap();
            assert_eq!(parsed, TestConfig::default(), "{name}");
        }
    }

    #[test]
    fn test_module_config_invalid_is_an_error() {
        let mut cfg = AppConfig::default();
        cfg.modules.insert(
            "test_module".to_owned(),
            json!({ "config": { "enabled": "yes" } }),
        );

        let err = module_config_or_default::<TestConfig>(&cfg, "test_module").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig { ref module, .. } if module == "test_module"));
    }
}
