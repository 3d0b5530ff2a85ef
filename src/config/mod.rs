//! Gateway Configuration
//!
//! All settings come from the process environment and are read once at startup.
//! `Config::from_lookup` takes any key lookup so the parsing rules can be exercised
//! without touching the real environment.
//!
//! ## Recognized Variables
//! - **`ES_CLUSTER`** / **`ES_CLUSTER_2`**: primary and optional replica engine URLs.
//! - **`INDEX_NAME`**: the index holding word documents.
//! - **`REQUEST_TIMEOUT_MS`**: timeout applied to every outbound engine call.
//! - **`KEEP_ALIVE`**: whether idle connections are pooled and reused.
//! - **`REFRESH`**: refresh policy attached to writes.
//! - **`ENSURE_INDEX`**: create the index with the nested mapping on startup.
//! - **`HOST`** / **`PORT`**: listen address of the HTTP server.

use anyhow::{Context, Result, bail};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_CLUSTER_URL: &str = "http://es-cluster:9200";
pub const DEFAULT_INDEX_NAME: &str = "wordsearch";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

/// How soon a write becomes visible to searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPolicy {
    /// Leave visibility to the engine's periodic refresh.
    None,
    /// Force an immediate refresh of the touched shards.
    Immediate,
    /// Block the write until the next refresh makes it visible.
    WaitFor,
}

impl RefreshPolicy {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "false" | "none" => Ok(Self::None),
            "true" => Ok(Self::Immediate),
            "wait_for" => Ok(Self::WaitFor),
            other => bail!("unknown refresh policy '{}'", other),
        }
    }

    /// Value for the `refresh` parameter of single-document writes.
    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Immediate => Some("true"),
            Self::WaitFor => Some("wait_for"),
        }
    }

    /// Delete-by-query only understands a boolean refresh.
    pub fn as_bulk_param(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Immediate | Self::WaitFor => Some("true"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub primary_url: String,
    pub replica_url: Option<String>,
    pub index_name: String,
    pub request_timeout: Duration,
    pub keep_alive: bool,
    pub refresh: RefreshPolicy,
    pub ensure_index: bool,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let primary_url = match get("ES_CLUSTER") {
            Some(url) => clean_url(&url)?,
            None => DEFAULT_CLUSTER_URL.to_string(),
        };
        let replica_url = get("ES_CLUSTER_2").map(|url| clean_url(&url)).transpose()?;

        let index_name = get("INDEX_NAME").unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string());

        let timeout_ms = match get("REQUEST_TIMEOUT_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("REQUEST_TIMEOUT_MS is not a number: '{}'", raw))?,
            None => DEFAULT_TIMEOUT_MS,
        };
        if timeout_ms == 0 {
            bail!("REQUEST_TIMEOUT_MS must be greater than zero");
        }

        let keep_alive = get("KEEP_ALIVE")
            .map(|raw| parse_bool("KEEP_ALIVE", &raw))
            .transpose()?
            .unwrap_or(true);
        let ensure_index = get("ENSURE_INDEX")
            .map(|raw| parse_bool("ENSURE_INDEX", &raw))
            .transpose()?
            .unwrap_or(true);

        let refresh = match get("REFRESH") {
            Some(raw) => RefreshPolicy::parse(&raw).context("invalid REFRESH")?,
            None => RefreshPolicy::WaitFor,
        };

        let host = get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host: IpAddr = host
            .trim()
            .parse()
            .with_context(|| format!("HOST is not an IP address: '{}'", host))?;
        let port = match get("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT is not a valid port: '{}'", raw))?,
            None => DEFAULT_PORT,
        };
        let bind_addr = SocketAddr::new(host, port);

        Ok(Self {
            primary_url,
            replica_url,
            index_name,
            request_timeout: Duration::from_millis(timeout_ms),
            keep_alive,
            refresh,
            ensure_index,
            bind_addr,
        })
    }

    pub fn is_dual_cluster(&self) -> bool {
        self.replica_url.is_some()
    }
}

fn clean_url(raw: &str) -> Result<String> {
    let cleaned = raw.trim_end_matches('/');
    if !cleaned.starts_with("http://") && !cleaned.starts_with("https://") {
        bail!("engine URL must start with http:// or https://, got '{}'", raw);
    }
    Ok(cleaned.to_string())
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => bail!("{} must be a boolean, got '{}'", key, raw),
    }
}
