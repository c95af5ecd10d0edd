// Configuration module entry point
// Loads the server configuration and builds the shared application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, DeliveryMode, RemoteStoreConfig};

/// Legacy deployment flag: `DEV=true` serves assets from local disk
const DEV_ENV: &str = "DEV";

impl Config {
    /// Load configuration from the default location ("config.toml")
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let dev_override = std::env::var(DEV_ENV).ok().and_then(|v| parse_dev_flag(&v));
        Self::build(config_path, dev_override)
    }

    fn build(
        config_path: &str,
        dev_override: Option<DeliveryMode>,
    ) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("CDN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8090)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "cdn-server")?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .set_default("delivery.mode", "local")?
            .set_default("delivery.root_dir", ".")?
            .set_default("reports.data_dir", "data")?
            .set_override_option("delivery.mode", dev_override.map(|m| m.to_string()))?
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.delivery.mode == DeliveryMode::Remote
            && (self.remote.endpoint.is_none() || self.remote.bucket.is_none())
        {
            return Err(config::ConfigError::Message(
                "remote delivery requires remote.endpoint and remote.bucket".to_string(),
            ));
        }
        Ok(())
    }

    /// Built-in defaults with no file and no DEV override
    #[cfg(test)]
    pub fn defaults() -> Self {
        Self::build("does-not-exist", None).expect("built-in defaults are valid")
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// Interpret the legacy `DEV` variable
fn parse_dev_flag(value: &str) -> Option<DeliveryMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(DeliveryMode::Local),
        "false" | "0" | "no" => Some(DeliveryMode::Remote),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::build("does-not-exist", None).unwrap();
        assert_eq!(cfg.server.port, 8090);
        assert_eq!(cfg.delivery.mode, DeliveryMode::Local);
        assert_eq!(cfg.delivery.root_dir, ".");
        assert_eq!(cfg.http.max_body_size, 10_485_760);
        assert!(cfg.detect.service_url.is_none());
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 8090);
    }

    #[test]
    fn test_parse_dev_flag() {
        assert_eq!(parse_dev_flag("true"), Some(DeliveryMode::Local));
        assert_eq!(parse_dev_flag(" 1 "), Some(DeliveryMode::Local));
        assert_eq!(parse_dev_flag("FALSE"), Some(DeliveryMode::Remote));
        assert_eq!(parse_dev_flag("maybe"), None);
    }

    #[test]
    fn test_remote_mode_requires_endpoint() {
        let err = Config::build("does-not-exist", Some(DeliveryMode::Remote)).unwrap_err();
        assert!(err.to_string().contains("remote.endpoint"));
    }

    #[test]
    fn test_file_values_and_dev_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cdn.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9100

[delivery]
mode = "remote"
root_dir = "/srv/cdn"

[remote]
endpoint = "http://127.0.0.1:9000"
bucket = "assets"
"#
        )
        .unwrap();

        let base = path.with_extension("");
        let base = base.to_str().unwrap();

        let cfg = Config::build(base, None).unwrap();
        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.delivery.mode, DeliveryMode::Remote);
        assert_eq!(cfg.remote.bucket.as_deref(), Some("assets"));

        let cfg = Config::build(base, Some(DeliveryMode::Local)).unwrap();
        assert_eq!(cfg.delivery.mode, DeliveryMode::Local);
        assert_eq!(cfg.delivery.root_dir, "/srv/cdn");
    }
}
