//! The `elearn dashboard` command.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Table};

use elearn_core::dashboard::{pending_tests, student_dashboard};
use elearn_core::DomainStore;

use super::{login_student, open_workspace};

pub fn execute(user: &str, password: &str, json: bool, config_path: Option<&Path>) -> Result<()> {
    let ws = open_workspace(config_path)?;
    let dataset = ws.store.load()?;
    let student_id = login_student(&dataset, &ws.config, user, password)?;

    let dashboard = student_dashboard(&dataset, &student_id)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    println!("{} ({})", dashboard.username, dashboard.student_id);
    if dashboard.courses.is_empty() {
        println!("Not enrolled in any course. Run `elearn courses` to see what is available.");
        return Ok(());
    }

    let mut courses = Table::new();
    courses.set_header(vec!["Course", "Name", "Registered", "Certificate"]);
    for course in &dashboard.courses {
        courses.add_row(vec![
            Cell::new(&course.course_id),
            Cell::new(&course.course_name),
            Cell::new(course.registered_on),
            Cell::new(course.certificate),
        ]);
    }
    println!("\n{courses}");

    let mut attempts = Table::new();
    attempts.set_header(vec!["Test", "Latest Score", "Latest Grade"]);
    let mut any_attempts = false;
    for course in &dashboard.courses {
        for test in &course.tests {
            any_attempts = true;
            attempts.add_row(vec![
                Cell::new(test.label(&course.course_name)),
                Cell::new(format!("{}%", test.latest_score)),
                Cell::new(test.latest_grade),
            ]);
        }
    }
    if any_attempts {
        println!("\n{attempts}");
    }

    let pending = pending_tests(&dataset, &student_id)?;
    if !pending.is_empty() {
        println!("\nTests you can take:");
        for test in &pending {
            println!("  {} {}: {}", test.course_id, test.test_id, test.label());
        }
    }

    Ok(())
}
