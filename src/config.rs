// src/config.rs
use crate::application::workflow::UnknownTagPolicy;
use crate::infrastructure::media::DEFAULT_MAX_UPLOAD_BYTES;
use std::{env, path::PathBuf};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: String,
    listen_addr: String,
    upload_dir: PathBuf,
    upload_public_prefix: String,
    upload_max_bytes: usize,
    unknown_tag_policy: UnknownTagPolicy,
    allowed_origins: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".into()
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_upload_public_prefix() -> String {
    "/uploads".into()
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".into()]
}

impl AppConfig {
    /// Build configuration from environment variables, after letting a
    /// `.env` file populate them when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Optional values fall
    /// back to defaults; `DATABASE_URL` is required.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let listen_addr = get("LISTEN_ADDR").unwrap_or_else(default_listen_addr);
        let upload_dir = get("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_upload_dir);

        let upload_public_prefix = get("UPLOAD_PUBLIC_PREFIX")
            .map(|p| p.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(default_upload_public_prefix);
        if !upload_public_prefix.starts_with('/') || upload_public_prefix.len() < 2 {
            return Err(ConfigError::Invalid(
                "UPLOAD_PUBLIC_PREFIX must be an absolute path such as /uploads".into(),
            ));
        }

        let upload_max_bytes = match get("UPLOAD_MAX_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    ConfigError::Invalid(format!("UPLOAD_MAX_BYTES must be a positive integer, got {raw}"))
                })?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let unknown_tag_policy = match get("UNKNOWN_TAG_POLICY") {
            Some(raw) => raw
                .parse::<UnknownTagPolicy>()
                .map_err(|e| ConfigError::Invalid(e.to_string()))?,
            None => UnknownTagPolicy::default(),
        };

        let allowed_origins = get("ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect()
            })
            .unwrap_or_else(default_allowed_origins);

        Ok(Self {
            database_url,
            listen_addr,
            upload_dir,
            upload_public_prefix,
            upload_max_bytes,
            unknown_tag_policy,
            allowed_origins,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    /// Directory uploaded images are written to and served from.
    pub fn upload_dir(&self) -> &PathBuf {
        &self.upload_dir
    }

    /// URL path prefix for stored media, without trailing slash.
    pub fn upload_public_prefix(&self) -> &str {
        &self.upload_public_prefix
    }

    pub fn upload_max_bytes(&self) -> usize {
        self.upload_max_bytes
    }

    pub fn unknown_tag_policy(&self) -> UnknownTagPolicy {
        self.unknown_tag_policy
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }
}
