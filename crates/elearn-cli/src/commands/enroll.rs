//! The `elearn enroll` command.

use std::path::Path;

use anyhow::Result;

use elearn_core::catalog::course_name;
use elearn_core::enrollment::{available_courses, enroll};
use elearn_core::{ElearnError, UnitOfWork};

use super::{login_student, open_workspace, today};

pub fn execute(
    user: &str,
    password: &str,
    course_id: &str,
    config_path: Option<&Path>,
) -> Result<()> {
    let ws = open_workspace(config_path)?;
    let mut uow = UnitOfWork::begin(&ws.store)?;
    let student_id = login_student(uow.dataset(), &ws.config, user, password)?;

    if available_courses(uow.dataset(), &student_id)?.is_empty() {
        return Err(ElearnError::NoAvailableCourses.into());
    }

    let registered_on =
        enroll(uow.dataset_mut(), &student_id, course_id, today())?.registration_date;
    let name = course_name(uow.dataset(), course_id);
    uow.commit()?;

    println!("Enrolled in {name} ({course_id}) on {registered_on}");
    Ok(())
}
