use crate::error::{config_error, env_error, AppResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

/// Optional configuration file, read before the environment
pub const CONFIG_FILE: &str = "config/server.toml";

/// Default location of the SQLite database file
pub const DEFAULT_DATABASE_PATH: &str = "data/schedule.sqlite3";

/// Default directory for the static calendar page
pub const DEFAULT_STATIC_DIR: &str = "docs";

/// Main configuration structure for the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Port the HTTP server listens on
    pub port: u16,
    /// Address the HTTP server binds to
    pub bind_address: IpAddr,
    /// SQLite database file, created on first run
    pub database_path: PathBuf,
    /// Directory served for everything outside the API
    pub static_dir: PathBuf,
}

/// Values accepted in `config/server.toml`; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub port: Option<u16>,
    pub bind_address: Option<IpAddr>,
    pub database_path: Option<PathBuf>,
    pub static_dir: Option<PathBuf>,
}

impl FileConfig {
    /// Read the file if it exists; a missing file is not an error
    pub fn read(path: &Path) -> AppResult<Option<Self>> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(toml::from_str(&content)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl Config {
    /// Load configuration from `.env`, the optional config file and the environment
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let file = FileConfig::read(Path::new(CONFIG_FILE))?.unwrap_or_default();
        Self::from_sources(file, |key| env::var(key).ok())
    }

    /// Merge file values with environment lookups; the environment wins
    pub fn from_sources<F>(file: FileConfig, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| config_error(&format!("Invalid PORT value: {}", raw)))?,
            None => file.port.ok_or_else(|| env_error("PORT"))?,
        };

        let bind_address = match lookup("BIND_ADDRESS") {
            Some(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| config_error(&format!("Invalid BIND_ADDRESS value: {}", raw)))?,
            None => file
                .bind_address
                .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST)),
        };

        let database_path = lookup("DATABASE_PATH")
            .map(PathBuf::from)
            .or(file.database_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH));

        let static_dir = lookup("STATIC_DIR")
            .map(PathBuf::from)
            .or(file.static_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        Ok(Config {
            port,
            bind_address,
            database_path,
            static_dir,
        })
    }

    /// Socket address to bind the listener to
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_port_only() {
        let config = Config::from_sources(FileConfig::default(), lookup_from(&[("PORT", "3000")]))
            .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.bind_address, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.database_path, PathBuf::from(DEFAULT_DATABASE_PATH));
        assert_eq!(config.static_dir, PathBuf::from(DEFAULT_STATIC_DIR));
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn test_missing_port_is_an_error() {
        let result = Config::from_sources(FileConfig::default(), lookup_from(&[]));
        assert!(matches!(result, Err(crate::error::Error::Environment(_))));
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let result = Config::from_sources(FileConfig::default(), lookup_from(&[("PORT", "http")]));
        assert!(matches!(result, Err(crate::error::Error::Config(_))));
    }

    #[test]
    fn test_environment_overrides_file() {
        let file: FileConfig = toml::from_str(
            r#"
            port = 8080
            bind_address = "0.0.0.0"
            database_path = "/var/lib/calendar/events.sqlite3"
            static_dir = "/srv/calendar"
            "#,
        )
        .unwrap();

        let config = Config::from_sources(
            file,
            lookup_from(&[("PORT", "9090"), ("STATIC_DIR", "public")]),
        )
        .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.bind_address.to_string(), "0.0.0.0");
        assert_eq!(
            config.database_path,
            PathBuf::from("/var/lib/calendar/events.sqlite3")
        );
        assert_eq!(config.static_dir, PathBuf::from("public"));
    }

    #[test]
    fn test_missing_config_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = FileConfig::read(&dir.path().join("server.toml")).unwrap();
        assert!(result.is_none());
    }
}
