use crate::metadata::FetcherSettings;
use capture_types::Folder;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable names - single source of truth
pub mod env_vars {
    /// Root directory of the vault
    pub const VAULT_PATH: &str = "VAULT_PATH";
    /// Where empty captures go: "inbox" or "notes"
    pub const EMPTY_FOLDER: &str = "CAPTURE_EMPTY_FOLDER";
    pub const TITLE_FETCH_TIMEOUT_SECS: &str = "TITLE_FETCH_TIMEOUT_SECS";
    pub const TITLE_FETCH_USER_AGENT: &str = "TITLE_FETCH_USER_AGENT";
    pub const TITLE_FETCH_MAX_BYTES: &str = "TITLE_FETCH_MAX_BYTES";
}

/// Default values
pub mod defaults {
    pub const VAULT_PATH: &str = "./vault";
    pub const TITLE_FETCH_TIMEOUT_SECS: u64 = 5;
    pub const USER_AGENT: &str = "VaultCapture/1.0";
    pub const TITLE_FETCH_MAX_BYTES: usize = 20 * 1024;
}

#[derive(Clone, Debug)]
pub struct Config {
    pub vault_path: PathBuf,
    pub empty_folder: Folder,
    pub fetcher: FetcherSettings,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup (env in production, a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let vault_path = lookup(env_vars::VAULT_PATH)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| defaults::VAULT_PATH.to_string());

        let timeout_secs = parse_or_default(
            &lookup,
            env_vars::TITLE_FETCH_TIMEOUT_SECS,
            defaults::TITLE_FETCH_TIMEOUT_SECS,
        );
        let max_bytes = parse_or_default(
            &lookup,
            env_vars::TITLE_FETCH_MAX_BYTES,
            defaults::TITLE_FETCH_MAX_BYTES,
        );

        Self {
            vault_path: PathBuf::from(vault_path),
            empty_folder: parse_empty_folder(lookup(env_vars::EMPTY_FOLDER)),
            fetcher: FetcherSettings {
                user_agent: lookup(env_vars::TITLE_FETCH_USER_AGENT)
                    .unwrap_or_else(|| defaults::USER_AGENT.to_string()),
                timeout: Duration::from_secs(timeout_secs),
                max_bytes,
            },
        }
    }
}

/// Parse a positive number; missing, malformed and zero values use `default`
fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + std::fmt::Display + Copy + Default + PartialEq,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) if value != T::default() => value,
        _ => {
            log::warn!("{} must be a positive number, got '{}'; using {}", key, raw, default);
            default
        }
    }
}

/// Only inbox and notes are sensible homes for empty captures
fn parse_empty_folder(raw: Option<String>) -> Folder {
    match raw.as_deref().map(|s| s.trim().to_lowercase()) {
        None => Folder::Inbox,
        Some(value) => match value.parse::<Folder>() {
            Ok(folder @ (Folder::Inbox | Folder::Notes)) => folder,
            _ => {
                log::warn!(
                    "{} must be 'inbox' or 'notes', got '{}'; using inbox",
                    env_vars::EMPTY_FOLDER,
                    value
                );
                Folder::Inbox
            }
        },
    }
}
