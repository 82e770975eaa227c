//! Administrator operations over students and their attempt records.

use serde::{Deserialize, Serialize};

use crate::catalog::{course_name, test_type};
use crate::error::{ElearnError, Result};
use crate::ledger::remove_attempt;
use crate::model::{Dataset, Grade, Student, TestAttempt};

/// Student-level line of the admin listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRow {
    pub student_id: String,
    pub username: String,
    pub password: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// One recorded attempt, listed under its student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRow {
    pub student_id: String,
    pub course_id: String,
    pub course_name: String,
    pub test_id: String,
    pub test_type: String,
    pub attempt: u8,
    pub score: u32,
    pub grade: Grade,
}

/// A line of the admin listing: either a student or one of their attempts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AdminRow {
    Student(StudentRow),
    Attempt(AttemptRow),
}

/// What editing an attempt row leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    /// Failed second attempt: the admin may clear it to allow a retake.
    OfferAdditionalAttempt,
    /// Attempt records are otherwise read-only.
    Locked,
}

/// Editable profile fields. Id and username are identity keys and are not
/// part of an update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentUpdate {
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Every student followed by their attempts, in document order.
pub fn admin_rows(dataset: &Dataset) -> Vec<AdminRow> {
    let mut rows = Vec::new();
    for student in dataset.students() {
        rows.push(AdminRow::Student(student_row(student)));
        for reg in &student.registrations {
            let name = course_name(dataset, &reg.course_id);
            for attempt in &reg.attempts {
                rows.push(AdminRow::Attempt(attempt_row(
                    dataset,
                    student.id(),
                    &reg.course_id,
                    &name,
                    attempt,
                )));
            }
        }
    }
    rows
}

fn student_row(student: &Student) -> StudentRow {
    StudentRow {
        student_id: student.id().to_string(),
        username: student.username().to_string(),
        password: student.password.clone(),
        email: student.email.clone(),
        phone: student.phone.clone(),
        address: student.address.clone(),
    }
}

fn attempt_row(
    dataset: &Dataset,
    student_id: &str,
    course_id: &str,
    course_name: &str,
    attempt: &TestAttempt,
) -> AttemptRow {
    AttemptRow {
        student_id: student_id.to_string(),
        course_id: course_id.to_string(),
        course_name: course_name.to_string(),
        test_id: attempt.test_id.clone(),
        test_type: test_type(dataset, course_id, &attempt.test_id),
        attempt: attempt.attempt,
        score: attempt.score,
        grade: attempt.grade,
    }
}

/// Decide what an edit on an attempt row does.
pub fn edit_action(row: &AttemptRow) -> EditAction {
    if row.attempt == 2 && row.grade == Grade::F {
        EditAction::OfferAdditionalAttempt
    } else {
        EditAction::Locked
    }
}

/// Overwrite a student's contact details.
pub fn update_student<'a>(
    dataset: &'a mut Dataset,
    student_id: &str,
    update: StudentUpdate,
) -> Result<&'a Student> {
    let student = dataset.require_student_mut(student_id)?;
    student.email = update.email;
    student.phone = update.phone;
    student.address = update.address;
    tracing::info!("updated student {}", student_id);
    Ok(student)
}

/// Remove a student with all registrations, attempts, and certificates.
pub fn delete_student(dataset: &mut Dataset, student_id: &str) -> Result<Student> {
    let removed = dataset
        .remove_student(student_id)
        .ok_or_else(|| ElearnError::StudentNotFound(student_id.to_string()))?;
    tracing::info!(
        "deleted student {} ({}) with {} registration(s)",
        student_id,
        removed.username(),
        removed.registrations.len()
    );
    Ok(removed)
}

/// Remove a single attempt record. The registration itself stays.
pub fn delete_attempt(
    dataset: &mut Dataset,
    student_id: &str,
    course_id: &str,
    test_id: &str,
    attempt: u8,
) -> Result<TestAttempt> {
    remove_attempt(dataset, student_id, course_id, test_id, attempt)
}

/// Clear a failed second attempt so the student can sit the test again.
pub fn grant_additional_attempt(
    dataset: &mut Dataset,
    student_id: &str,
    course_id: &str,
    test_id: &str,
) -> Result<TestAttempt> {
    let failed_second = dataset
        .require_student(student_id)?
        .registration(course_id)
        .and_then(|reg| {
            reg.attempts_for(test_id)
                .find(|a| a.attempt == 2)
                .map(|a| a.grade == Grade::F)
        });

    match failed_second {
        Some(true) => remove_attempt(dataset, student_id, course_id, test_id, 2),
        Some(false) => Err(ElearnError::AdditionalAttemptNotOffered),
        None => Err(ElearnError::AttemptNotFound {
            course_id: course_id.to_string(),
            test_id: test_id.to_string(),
            attempt: 2,
        }),
    }
}
