//! The `elearn tests` command.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Table};

use elearn_core::dashboard::pending_tests;
use elearn_core::DomainStore;

use super::{login_student, open_workspace};

pub fn execute(user: &str, password: &str, config_path: Option<&Path>) -> Result<()> {
    let ws = open_workspace(config_path)?;
    let dataset = ws.store.load()?;
    let student_id = login_student(&dataset, &ws.config, user, password)?;

    let pending = pending_tests(&dataset, &student_id)?;
    if pending.is_empty() {
        println!("No tests available.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Course", "Test", "Attempt", "Description"]);
    for test in &pending {
        table.add_row(vec![
            Cell::new(&test.course_id),
            Cell::new(&test.test_id),
            Cell::new(test.attempt),
            Cell::new(test.label()),
        ]);
    }
    println!("{table}");
    Ok(())
}
