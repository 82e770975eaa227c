//! elearn configuration: document locations and admin credentials.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use elearn_core::accounts::AdminCredentials;

/// Admin login section of the config file.
///
/// Note: Custom Debug impl masks the password to keep it out of logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_username")]
    pub username: String,
    #[serde(default = "default_admin_password")]
    pub password: String,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            password: default_admin_password(),
        }
    }
}

impl AdminConfig {
    pub fn credentials(&self) -> AdminCredentials {
        AdminCredentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

fn default_admin_username() -> String {
    "admin".to_string()
}
fn default_admin_password() -> String {
    "admin1".to_string()
}

/// Top-level elearn configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElearnConfig {
    /// JSON document holding courses and students.
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,
    /// TOML document holding the question pools.
    #[serde(default = "default_question_bank_path")]
    pub question_bank_path: PathBuf,
    #[serde(default)]
    pub admin: AdminConfig,
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("./data/dataset.json")
}
fn default_question_bank_path() -> PathBuf {
    PathBuf::from("./data/question-bank.toml")
}

impl Default for ElearnConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            question_bank_path: default_question_bank_path(),
            admin: AdminConfig::default(),
        }
    }
}

/// Expand `${VAR}` references from the environment. Unset variables expand
/// to nothing; an unterminated `${` is kept as written.
fn resolve_env_vars(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let name = &rest[start + 2..start + 2 + len];
        out.push_str(&std::env::var(name).unwrap_or_default());
        rest = &rest[start + 2 + len + 1..];
    }
    out.push_str(rest);
    out
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `elearn.toml` in the current directory
/// 2. `~/.config/elearn/config.toml`
///
/// Environment variable overrides: `ELEARN_DATASET`, `ELEARN_QUESTION_BANK`,
/// `ELEARN_ADMIN_PASSWORD`.
pub fn load_config() -> Result<ElearnConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ElearnConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("elearn.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<ElearnConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ElearnConfig::default(),
    };

    if let Ok(dataset) = std::env::var("ELEARN_DATASET") {
        config.dataset_path = PathBuf::from(dataset);
    }
    if let Ok(bank) = std::env::var("ELEARN_QUESTION_BANK") {
        config.question_bank_path = PathBuf::from(bank);
    }
    if let Ok(password) = std::env::var("ELEARN_ADMIN_PASSWORD") {
        config.admin.password = password;
    }

    config.dataset_path = resolve_path(&config.dataset_path);
    config.question_bank_path = resolve_path(&config.question_bank_path);
    config.admin.username = resolve_env_vars(&config.admin.username);
    config.admin.password = resolve_env_vars(&config.admin.password);

    tracing::debug!(
        "config loaded from {}",
        config_path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "defaults".to_string())
    );
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("elearn"))
}
