use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use strum::{Display, EnumString};

pub struct AppConfig {
    pub store: StoreConfig,
    pub admission: AdmissionConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // 環境変数の読み出し方を差し替えられるようにしておく（テスト用）
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend: StoreBackend = parse_or_default(&lookup, "STORE_BACKEND")?;
        let store = match backend {
            StoreBackend::Memory => StoreConfig::InMemory,
            StoreBackend::Postgres => StoreConfig::Postgres(DatabaseConfig {
                host: required(&lookup, "DATABASE_HOST")?,
                port: required(&lookup, "DATABASE_PORT")?
                    .parse()
                    .context("DATABASE_PORT must be a port number")?,
                username: required(&lookup, "DATABASE_USERNAME")?,
                password: required(&lookup, "DATABASE_PASSWORD")?,
                database: required(&lookup, "DATABASE_NAME")?,
            }),
        };

        let admission = AdmissionConfig {
            mode: parse_or_default(&lookup, "ADMISSION_MODE")?,
        };

        let server = ServerConfig {
            host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".into()),
            port: match lookup("SERVER_PORT") {
                Some(port) => port.parse().context("SERVER_PORT must be a port number")?,
                None => 8080,
            },
        };

        Ok(Self {
            store,
            admission,
            server,
        })
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).ok_or_else(|| anyhow!("environment variable {key} is not set"))
}

fn parse_or_default<F, T>(lookup: &F, key: &str) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Default,
{
    match lookup(key) {
        None => Ok(T::default()),
        Some(v) => T::from_str(&v).map_err(|_| anyhow!("unsupported value for {key}: {v}")),
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Postgres(DatabaseConfig),
    InMemory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

// 同一スペース・同一日付への同時予約をどう扱うか
// - Unguarded: 確認と登録の間で排他しない。同時に容量チェックを通過した予約は両方登録される
// - Serialized: 同一スペース・同一日付の予約をプロセス内で 1 件ずつ処理する
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum AdmissionMode {
    #[default]
    Unguarded,
    Serialized,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AdmissionConfig {
    pub mode: AdmissionMode,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn memory_backend_needs_no_database_settings() -> Result<()> {
        let config = AppConfig::from_lookup(lookup_from(&[("STORE_BACKEND", "memory")]))?;

        assert_eq!(config.store, StoreConfig::InMemory);
        assert_eq!(config.admission.mode, AdmissionMode::Unguarded);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        Ok(())
    }

    #[test]
    fn postgres_backend_is_the_default() -> Result<()> {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_HOST", "localhost"),
            ("DATABASE_PORT", "5432"),
            ("DATABASE_USERNAME", "app"),
            ("DATABASE_PASSWORD", "passwd"),
            ("DATABASE_NAME", "app"),
            ("ADMISSION_MODE", "serialized"),
            ("SERVER_PORT", "9090"),
        ]))?;

        assert_eq!(
            config.store,
            StoreConfig::Postgres(DatabaseConfig {
                host: "localhost".into(),
                port: 5432,
                username: "app".into(),
                password: "passwd".into(),
                database: "app".into(),
            })
        );
        assert_eq!(config.admission.mode, AdmissionMode::Serialized);
        assert_eq!(config.server.port, 9090);
        Ok(())
    }

    #[test]
    fn postgres_backend_without_host_fails() {
        let res = AppConfig::from_lookup(lookup_from(&[("STORE_BACKEND", "postgres")]));
        assert!(res.is_err());
    }

    #[test]
    fn unknown_admission_mode_fails() {
        let res = AppConfig::from_lookup(lookup_from(&[
            ("STORE_BACKEND", "memory"),
            ("ADMISSION_MODE", "optimistic"),
        ]));
        assert!(res.is_err());
    }
}
