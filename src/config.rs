use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct MemoriaConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret used to verify (and, for the `token` command, sign) bearer tokens.
    /// Empty means "not configured": `serve` generates a random one at startup.
    pub jwt_secret: String,
    pub token_ttl_hours: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3333,
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_memoria_dir()
            .join("memories.db")
            .to_string_lossy()
            .into_owned();
        Self { db_path }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_hours: 24 * 30,
        }
    }
}

/// Returns `~/.memoria/`, or `./.memoria/` when no home directory is known.
pub fn default_memoria_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".memoria")
}

/// Returns the default config file path: `~/.memoria/config.toml`
pub fn default_config_path() -> PathBuf {
    default_memoria_dir().join("config.toml")
}

impl MemoriaConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            MemoriaConfig::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides (MEMORIA_DB, MEMORIA_HOST, MEMORIA_PORT,
    /// MEMORIA_LOG_LEVEL, MEMORIA_JWT_SECRET).
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("MEMORIA_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("MEMORIA_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("MEMORIA_PORT") {
            self.server.port = val
                .parse()
                .with_context(|| format!("MEMORIA_PORT is not a valid port: {val}"))?;
        }
        if let Ok(val) = std::env::var("MEMORIA_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("MEMORIA_JWT_SECRET") {
            self.auth.jwt_secret = val;
        }
        Ok(())
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }

    /// Fill in a random JWT secret if none was configured. Returns `true` when
    /// one was generated; tokens signed with it stop verifying after a restart.
    pub fn ensure_jwt_secret(&mut self) -> bool {
        if !self.auth.jwt_secret.is_empty() {
            return false;
        }
        self.auth.jwt_secret = generate_jwt_secret();
        true
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// 64 random alphanumeric characters.
pub fn generate_jwt_secret() -> String {
    use rand::distr::Alphanumeric;
    use rand::Rng;
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
