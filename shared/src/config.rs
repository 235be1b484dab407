use crate::env::{which, Environment};
use anyhow::{Context, Result};
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::Path,
    str::FromStr,
};

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub pagination: PaginationConfig,
}

impl AppConfig {
    /// Loads the dotenv file of the current environment, then reads the
    /// process environment. Variables that are already set win over the file.
    pub fn new() -> Result<Self> {
        load_dotenv(Path::new("."), &which())?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // 環境変数の読み出し元を差し替えられるようにしておく（テスト用）
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database = DatabaseConfig {
            url: lookup("DATABASE_URL").context("DATABASE_URL must be set")?,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
        };
        let server = ServerConfig {
            host: parse_or(&lookup, "SERVER_HOST", IpAddr::V4(Ipv4Addr::LOCALHOST))?,
            port: parse_or(&lookup, "SERVER_PORT", 8080)?,
        };
        let defaults = PaginationConfig::default();
        let pagination = PaginationConfig::new(
            parse_or(&lookup, "PAGE_SIZE", defaults.default_page_size)?,
            parse_or(&lookup, "MAX_PAGE_SIZE", defaults.max_page_size)?,
        );
        Ok(Self {
            database,
            server,
            pagination,
        })
    }
}

/// Loads `dir/.env.<environment>` into the process environment.
/// A missing file is not an error.
pub fn load_dotenv(dir: &Path, environment: &Environment) -> Result<bool> {
    let path = dir.join(environment.dotenv_file());
    match dotenvy::from_path(&path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "loaded dotenv file");
            Ok(true)
        }
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(e).with_context(|| format!("failed to load {}", path.display())),
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => value
            .parse()
            .with_context(|| format!("{key} has an invalid value: {value}")),
        None => Ok(default),
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Page sizes used by paginated list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl PaginationConfig {
    /// Zero sizes fall back to the built-in defaults and the default page
    /// size never exceeds the maximum.
    pub fn new(default_page_size: u64, max_page_size: u64) -> Self {
        let fallback = Self::default();
        let max_page_size = if max_page_size == 0 {
            fallback.max_page_size
        } else {
            max_page_size
        };
        let default_page_size = match default_page_size {
            0 => fallback.default_page_size,
            n => n,
        }
        .min(max_page_size);
        Self {
            default_page_size,
            max_page_size,
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 5,
            max_page_size: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() -> Result<()> {
        let config = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "sqlite::memory:")]))?;
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.server.addr(), "127.0.0.1:8080".parse::<SocketAddr>()?);
        assert_eq!(config.pagination, PaginationConfig::default());
        Ok(())
    }

    #[test]
    fn missing_database_url_is_an_error() {
        assert!(AppConfig::from_lookup(lookup_from(&[])).is_err());
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let res = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("SERVER_PORT", "eighty"),
        ]));
        assert!(res.is_err());
    }

    #[test]
    fn missing_dotenv_file_is_skipped() -> Result<()> {
        let dir = std::env::temp_dir().join("rental-booking-no-dotenv");
        std::fs::create_dir_all(&dir)?;
        assert!(!load_dotenv(&dir, &Environment::Production)?);
        Ok(())
    }

    #[test]
    fn dotenv_file_of_the_environment_is_loaded() -> Result<()> {
        let dir = std::env::temp_dir().join(format!("rental-booking-dotenv-{}", std::process::id()));
        std::fs::create_dir_all(&dir)?;
        std::fs::write(
            dir.join(".env.development"),
            "RENTAL_BOOKING_DOTENV_CHECK=development\n",
        )?;
        std::fs::write(
            dir.join(".env.production"),
            "RENTAL_BOOKING_DOTENV_CHECK=production\n",
        )?;

        assert!(load_dotenv(&dir, &Environment::Development)?);
        assert_eq!(std::env::var("RENTAL_BOOKING_DOTENV_CHECK")?, "development");

        // 既に設定済みの値は上書きしない
        assert!(load_dotenv(&dir, &Environment::Production)?);
        assert_eq!(std::env::var("RENTAL_BOOKING_DOTENV_CHECK")?, "development");

        std::fs::remove_dir_all(&dir)?;
        Ok(())
    }

    #[test]
    fn default_page_size_is_capped_by_max() {
        assert_eq!(PaginationConfig::new(10, 3), PaginationConfig::new(3, 3));
        assert_eq!(PaginationConfig::new(0, 0), PaginationConfig::default());
        assert_eq!(PaginationConfig::new(2, 20).default_page_size, 2);
    }
}
