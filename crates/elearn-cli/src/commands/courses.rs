//! The `elearn courses` command.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Table};

use elearn_core::enrollment::available_courses;
use elearn_core::DomainStore;

use super::{login_student, open_workspace};

pub fn execute(user: &str, password: &str, config_path: Option<&Path>) -> Result<()> {
    let ws = open_workspace(config_path)?;
    let dataset = ws.store.load()?;
    let student_id = login_student(&dataset, &ws.config, user, password)?;

    let courses = available_courses(&dataset, &student_id)?;
    if courses.is_empty() {
        println!("No courses available. You are enrolled in every course.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Course", "Name", "Tests"]);
    for course in courses {
        let tests: Vec<&str> = course.tests.iter().map(|t| t.kind.as_str()).collect();
        table.add_row(vec![
            Cell::new(&course.id),
            Cell::new(&course.name),
            Cell::new(tests.join(", ")),
        ]);
    }
    println!("{table}");
    Ok(())
}
