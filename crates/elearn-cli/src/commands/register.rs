//! The `elearn register` command.

use std::path::Path;

use anyhow::Result;

use elearn_core::accounts::register_student;
use elearn_core::UnitOfWork;

use super::open_workspace;

pub fn execute(username: &str, password: &str, config_path: Option<&Path>) -> Result<()> {
    let ws = open_workspace(config_path)?;
    let mut uow = UnitOfWork::begin(&ws.store)?;

    let id = register_student(
        uow.dataset_mut(),
        &ws.config.admin.credentials(),
        username,
        password,
    )?
    .id()
    .to_string();
    uow.commit()?;

    println!("Registered {username} as {id}");
    Ok(())
}
