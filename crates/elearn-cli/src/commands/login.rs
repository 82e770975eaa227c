//! The `elearn login` command.

use std::path::Path;

use anyhow::Result;

use elearn_core::accounts::{authenticate, Principal};
use elearn_core::DomainStore;

use super::open_workspace;

pub fn execute(user: &str, password: &str, config_path: Option<&Path>) -> Result<()> {
    let ws = open_workspace(config_path)?;
    let dataset = ws.store.load()?;

    match authenticate(&dataset, &ws.config.admin.credentials(), user, password)? {
        Principal::Admin => println!("Logged in as administrator"),
        Principal::Student(id) => println!("Logged in as {user} ({id})"),
    }
    Ok(())
}
