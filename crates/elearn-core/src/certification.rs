//! Course certificate issuance.
//!
//! A registration's certificate is issued once every test of its course has
//! at least one passing attempt. An issued certificate is never revisited.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ElearnError, Result};
use crate::model::{CertificateStatus, Course, Dataset, TestAttempt};

/// What a certificate evaluation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CertificateOutcome {
    /// Still pending.
    Unchanged,
    /// Issued by this evaluation.
    Issued(NaiveDate),
    /// Issued earlier; left as it was.
    AlreadyIssued(NaiveDate),
}

/// `true` when every test of `course` has a passing attempt. A course with
/// no tests is trivially complete.
pub fn all_tests_passed(course: &Course, attempts: &[TestAttempt]) -> bool {
    course.tests.iter().all(|test| {
        attempts
            .iter()
            .any(|a| a.test_id == test.id && a.grade.is_pass())
    })
}

/// Next certificate state for a registration. Only Pending moves, and only
/// to Issued dated `today`.
pub fn evaluate_certificate(
    current: CertificateStatus,
    course: &Course,
    attempts: &[TestAttempt],
    today: NaiveDate,
) -> CertificateStatus {
    match current {
        CertificateStatus::Issued { .. } => current,
        CertificateStatus::Pending if all_tests_passed(course, attempts) => {
            CertificateStatus::Issued { issue_date: today }
        }
        CertificateStatus::Pending => CertificateStatus::Pending,
    }
}

/// Re-evaluate and store the certificate of one registration.
pub fn refresh_certificate(
    dataset: &mut Dataset,
    student_id: &str,
    course_id: &str,
    today: NaiveDate,
) -> Result<CertificateOutcome> {
    let course = dataset.require_course(course_id)?.clone();
    let student = dataset.require_student_mut(student_id)?;
    let registration =
        student
            .registration_mut(course_id)
            .ok_or_else(|| ElearnError::RegistrationNotFound {
                student_id: student_id.to_string(),
                course_id: course_id.to_string(),
            })?;

    if let CertificateStatus::Issued { issue_date } = registration.certificate {
        return Ok(CertificateOutcome::AlreadyIssued(issue_date));
    }

    registration.certificate = evaluate_certificate(
        registration.certificate,
        &course,
        &registration.attempts,
        today,
    );

    match registration.certificate.issue_date() {
        Some(date) => {
            tracing::info!(
                "certificate issued to {} for {} on {}",
                student_id,
                course_id,
                date
            );
            Ok(CertificateOutcome::Issued(date))
        }
        None => Ok(CertificateOutcome::Unchanged),
    }
}
