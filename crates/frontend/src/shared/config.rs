//! Console configuration.
//!
//! The defaults are embedded TOML. The API base URL can be fixed at build
//! time through the `INVENTARIO_API_URL` environment variable; when it stays
//! empty the URL is derived from the page location (see `api_utils::api_base`).

use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub inventory: InventoryConfig,
    pub toast: ToastConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Empty means "same host as the page, port `fallback_port`"
    #[serde(default)]
    pub base_url: String,
    pub fallback_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InventoryConfig {
    /// Purchases shown side by side in the matrix
    pub column_limit: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ToastConfig {
    pub dismiss_ms: u32,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = ""
fallback_port = 8000

[inventory]
column_limit = 3

[toast]
dismiss_ms = 1000
"#;

static CONFIG: Lazy<Config> = Lazy::new(load_config);

/// Parse the embedded defaults and apply the build-time URL override
fn load_config() -> Config {
    let mut config = parse_config(DEFAULT_CONFIG).unwrap_or_else(|e| {
        log::error!("embedded config is invalid: {}", e);
        Config {
            api: ApiConfig {
                base_url: String::new(),
                fallback_port: 8000,
            },
            inventory: InventoryConfig { column_limit: 3 },
            toast: ToastConfig { dismiss_ms: 1000 },
        }
    });

    if let Some(url) = option_env!("INVENTARIO_API_URL") {
        config.api.base_url = url.trim_end_matches('/').to_string();
    }
    config
}

fn parse_config(contents: &str) -> Result<Config, toml::de::Error> {
    let mut config: Config = toml::from_str(contents)?;
    config.inventory.column_limit = config.inventory.column_limit.max(1);
    Ok(config)
}

pub fn config() -> &'static Config {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.api.base_url, "");
        assert_eq!(config.api.fallback_port, 8000);
        assert_eq!(config.inventory.column_limit, 3);
        assert_eq!(config.toast.dismiss_ms, 1000);
    }

    #[test]
    fn test_zero_column_limit_is_clamped() {
        let config = parse_config(
            r#"
            [api]
            fallback_port = 9000
            [inventory]
            column_limit = 0
            [toast]
            dismiss_ms = 500
            "#,
        )
        .unwrap();
        assert_eq!(config.inventory.column_limit, 1);
        assert_eq!(config.api.base_url, "");
    }
}
