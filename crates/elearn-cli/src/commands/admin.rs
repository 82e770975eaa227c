//! The `elearn admin` commands.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Table};

use elearn_core::admin::{
    admin_rows, delete_attempt, delete_student, edit_action, grant_additional_attempt,
    update_student, AdminRow, EditAction, StudentUpdate,
};
use elearn_core::UnitOfWork;

use super::{login_admin, open_workspace};
use crate::AdminAction;

pub fn execute(password: &str, action: AdminAction, config_path: Option<&Path>) -> Result<()> {
    let ws = open_workspace(config_path)?;
    let mut uow = UnitOfWork::begin(&ws.store)?;
    login_admin(uow.dataset(), &ws.config, password)?;
    let dataset = uow.dataset_mut();

    let message = match action {
        AdminAction::List { json } => return list(admin_rows(dataset), json),
        AdminAction::EditStudent {
            student,
            email,
            phone,
            address,
        } => {
            let current = dataset.require_student(&student)?;
            let update = StudentUpdate {
                email: email.unwrap_or_else(|| current.email.clone()),
                phone: phone.unwrap_or_else(|| current.phone.clone()),
                address: address.unwrap_or_else(|| current.address.clone()),
            };
            let updated = update_student(dataset, &student, update)?;
            format!("Updated {} ({})", updated.username(), student)
        }
        AdminAction::DeleteStudent { student } => {
            let removed = delete_student(dataset, &student)?;
            format!("Deleted {} ({})", removed.username(), student)
        }
        AdminAction::DeleteAttempt {
            student,
            course,
            test,
            attempt,
        } => {
            delete_attempt(dataset, &student, &course, &test, attempt)?;
            format!("Deleted attempt {attempt} of {course}/{test} for {student}")
        }
        AdminAction::GrantAttempt {
            student,
            course,
            test,
        } => {
            grant_additional_attempt(dataset, &student, &course, &test)?;
            format!("Granted an additional attempt at {course}/{test} to {student}")
        }
    };

    uow.commit()?;
    println!("{message}");
    Ok(())
}

fn list(rows: Vec<AdminRow>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    if rows.is_empty() {
        println!("No students registered.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Student", "Username", "Email", "Phone", "Address", "Course", "Test", "Attempt",
        "Score", "Grade", "Action",
    ]);

    for row in &rows {
        let cells = match row {
            AdminRow::Student(s) => vec![
                Cell::new(&s.student_id),
                Cell::new(&s.username),
                Cell::new(&s.email),
                Cell::new(&s.phone),
                Cell::new(&s.address),
                Cell::new(""),
                Cell::new(""),
                Cell::new(""),
                Cell::new(""),
                Cell::new(""),
                Cell::new(""),
            ],
            AdminRow::Attempt(a) => {
                let action = match edit_action(a) {
                    EditAction::OfferAdditionalAttempt => "grant-attempt",
                    EditAction::Locked => "",
                };
                vec![
                    Cell::new(&a.student_id),
                    Cell::new(""),
                    Cell::new(""),
                    Cell::new(""),
                    Cell::new(""),
                    Cell::new(&a.course_name),
                    Cell::new(format!("{} ({})", a.test_type, a.test_id)),
                    Cell::new(a.attempt),
                    Cell::new(format!("{}%", a.score)),
                    Cell::new(a.grade),
                    Cell::new(action),
                ]
            }
        };
        table.add_row(cells);
    }

    println!("{table}");
    Ok(())
}
