//! Read-only progress projections for a single student.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{course_name, test_type};
use crate::error::Result;
use crate::ledger::{eligibility, Eligibility};
use crate::model::{CertificateStatus, Dataset, Grade};

/// A student's progress across all registered courses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentDashboard {
    pub student_id: String,
    pub username: String,
    pub courses: Vec<CourseProgress>,
}

/// Progress in one registered course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseProgress {
    pub course_id: String,
    pub course_name: String,
    pub registered_on: NaiveDate,
    /// Tests with at least one attempt, in order of first attempt.
    pub tests: Vec<TestProgress>,
    pub certificate: CertificateStatus,
}

/// Attempts made at one test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestProgress {
    pub test_id: String,
    pub test_type: String,
    pub attempts: usize,
    pub latest_grade: Grade,
    pub latest_score: u32,
}

impl TestProgress {
    /// Display label, e.g. "Quiz (Rust Fundamentals) (2)".
    pub fn label(&self, course_name: &str) -> String {
        format!("{} ({}) ({})", self.test_type, course_name, self.attempts)
    }
}

/// A test the student may sit right now.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingTest {
    pub course_id: String,
    pub course_name: String,
    pub test_id: String,
    pub test_type: String,
    /// Number the next attempt will be recorded under.
    pub attempt: u8,
}

impl PendingTest {
    pub fn label(&self) -> String {
        let base = format!("{} ({})", self.test_type, self.course_name);
        if self.attempt > 1 {
            format!("{base} - Second Attempt")
        } else {
            base
        }
    }
}

/// Build the dashboard for a student.
pub fn student_dashboard(dataset: &Dataset, student_id: &str) -> Result<StudentDashboard> {
    let student = dataset.require_student(student_id)?;

    let courses = student
        .registrations
        .iter()
        .map(|reg| {
            let mut tests: Vec<TestProgress> = Vec::new();
            for attempt in &reg.attempts {
                match tests.iter_mut().find(|t| t.test_id == attempt.test_id) {
                    Some(progress) => {
                        progress.attempts += 1;
                        progress.latest_grade = attempt.grade;
                        progress.latest_score = attempt.score;
                    }
                    None => tests.push(TestProgress {
                        test_id: attempt.test_id.clone(),
                        test_type: test_type(dataset, &reg.course_id, &attempt.test_id),
                        attempts: 1,
                        latest_grade: attempt.grade,
                        latest_score: attempt.score,
                    }),
                }
            }

            CourseProgress {
                course_id: reg.course_id.clone(),
                course_name: course_name(dataset, &reg.course_id),
                registered_on: reg.registration_date,
                tests,
                certificate: reg.certificate,
            }
        })
        .collect();

    Ok(StudentDashboard {
        student_id: student.id().to_string(),
        username: student.username().to_string(),
        courses,
    })
}

/// Every test across the student's registered courses that currently
/// accepts an attempt. Registrations for courses missing from the catalog
/// contribute nothing.
pub fn pending_tests(dataset: &Dataset, student_id: &str) -> Result<Vec<PendingTest>> {
    let student = dataset.require_student(student_id)?;
    let mut pending = Vec::new();

    for reg in &student.registrations {
        let Some(course) = dataset.course(&reg.course_id) else {
            tracing::warn!(
                "student {} registered for unknown course '{}'",
                student_id,
                reg.course_id
            );
            continue;
        };
        for test in &course.tests {
            let attempt = match eligibility(reg, &test.id) {
                Eligibility::FirstAttempt => 1,
                Eligibility::Retake => 2,
                Eligibility::RetakeBlocked(_) | Eligibility::LimitReached => continue,
            };
            pending.push(PendingTest {
                course_id: course.id.clone(),
                course_name: course.name.clone(),
                test_id: test.id.clone(),
                test_type: test.kind.clone(),
                attempt,
            });
        }
    }

    Ok(pending)
}
