pub mod admin;
pub mod courses;
pub mod dashboard;
pub mod enroll;
pub mod init;
pub mod login;
pub mod register;
pub mod tests;
pub mod validate_bank;

use std::path::Path;

use anyhow::{bail, Result};
use chrono::NaiveDate;

use elearn_core::accounts::{authenticate, Principal};
use elearn_core::Dataset;
use elearn_store::{load_config_from, ElearnConfig, JsonFileStore};

/// Loaded configuration plus the store it points at.
pub struct Workspace {
    pub config: ElearnConfig,
    pub store: JsonFileStore,
}

pub fn open_workspace(config_path: Option<&Path>) -> Result<Workspace> {
    let config = load_config_from(config_path)?;
    tracing::debug!(
        "using dataset {} and question bank {}",
        config.dataset_path.display(),
        config.question_bank_path.display()
    );
    let store = JsonFileStore::new(&config.dataset_path);
    Ok(Workspace { config, store })
}

/// Log in and require a student account. Returns the student id.
pub fn login_student(
    dataset: &Dataset,
    config: &ElearnConfig,
    user: &str,
    password: &str,
) -> Result<String> {
    match authenticate(dataset, &config.admin.credentials(), user, password)? {
        Principal::Student(id) => Ok(id),
        Principal::Admin => bail!("'{user}' is the administrator; use `elearn admin`"),
    }
}

/// Log in as the configured administrator.
pub fn login_admin(dataset: &Dataset, config: &ElearnConfig, password: &str) -> Result<()> {
    let admin = config.admin.credentials();
    match authenticate(dataset, &admin, &admin.username, password)? {
        Principal::Admin => Ok(()),
        Principal::Student(_) => bail!("administrator login required"),
    }
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
