//! Attempt ledger: counting, recording, and removing test attempts.
//!
//! Each (student, course, test) allows at most [`MAX_ATTEMPTS`] attempts,
//! and the second only after the first was graded F. Counts are always
//! derived from the recorded attempts; nothing is stored as a counter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::assessment::Submission;
use crate::certification::{refresh_certificate, CertificateOutcome};
use crate::error::{ElearnError, Result};
use crate::model::{CourseRegistration, Dataset, Grade, TestAttempt, MAX_ATTEMPTS};

/// Whether another attempt may be recorded for a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// No attempts yet.
    FirstAttempt,
    /// One attempt, graded F.
    Retake,
    /// One attempt with a passing grade.
    RetakeBlocked(Grade),
    /// The cap has been reached.
    LimitReached,
}

impl Eligibility {
    pub fn allows_attempt(self) -> bool {
        matches!(self, Eligibility::FirstAttempt | Eligibility::Retake)
    }
}

/// Eligibility for one test of a registration.
pub fn eligibility(registration: &CourseRegistration, test_id: &str) -> Eligibility {
    let mut attempts = registration.attempts_for(test_id);
    match (attempts.next(), attempts.next()) {
        (None, _) => Eligibility::FirstAttempt,
        (Some(first), None) if first.grade == Grade::F => Eligibility::Retake,
        (Some(first), None) => Eligibility::RetakeBlocked(first.grade),
        (Some(_), Some(_)) => Eligibility::LimitReached,
    }
}

fn registration<'a>(
    dataset: &'a Dataset,
    student_id: &str,
    course_id: &str,
) -> Result<&'a CourseRegistration> {
    dataset
        .require_student(student_id)?
        .registration(course_id)
        .ok_or_else(|| ElearnError::RegistrationNotFound {
            student_id: student_id.to_string(),
            course_id: course_id.to_string(),
        })
}

fn registration_mut<'a>(
    dataset: &'a mut Dataset,
    student_id: &str,
    course_id: &str,
) -> Result<&'a mut CourseRegistration> {
    dataset
        .require_student_mut(student_id)?
        .registration_mut(course_id)
        .ok_or_else(|| ElearnError::RegistrationNotFound {
            student_id: student_id.to_string(),
            course_id: course_id.to_string(),
        })
}

/// Number of attempts recorded for a test.
pub fn attempt_count(
    dataset: &Dataset,
    student_id: &str,
    course_id: &str,
    test_id: &str,
) -> Result<usize> {
    Ok(registration(dataset, student_id, course_id)?.attempt_count(test_id))
}

/// `true` when no attempt exists yet, or exactly one exists and it is an F.
pub fn can_attempt(
    dataset: &Dataset,
    student_id: &str,
    course_id: &str,
    test_id: &str,
) -> Result<bool> {
    let registration = registration(dataset, student_id, course_id)?;
    Ok(eligibility(registration, test_id).allows_attempt())
}

/// Number the next attempt at a test would be recorded under, or the
/// rule that forbids it.
pub fn next_attempt(
    dataset: &Dataset,
    student_id: &str,
    course_id: &str,
    test_id: &str,
) -> Result<u8> {
    let course = dataset.require_course(course_id)?;
    if course.test(test_id).is_none() {
        return Err(ElearnError::TestNotFound {
            course_id: course_id.to_string(),
            test_id: test_id.to_string(),
        });
    }

    let registration = registration(dataset, student_id, course_id)?;
    match eligibility(registration, test_id) {
        Eligibility::LimitReached => Err(ElearnError::AttemptLimitExceeded {
            test_id: test_id.to_string(),
            max: MAX_ATTEMPTS,
        }),
        Eligibility::RetakeBlocked(grade) => Err(ElearnError::RetakeNotAllowed { grade }),
        Eligibility::FirstAttempt | Eligibility::Retake => {
            Ok(registration.attempt_count(test_id) as u8 + 1)
        }
    }
}

/// Append an attempt numbered one past the current count.
pub fn record_attempt<'a>(
    dataset: &'a mut Dataset,
    student_id: &str,
    course_id: &str,
    test_id: &str,
    score: u32,
    grade: Grade,
) -> Result<&'a TestAttempt> {
    let number = next_attempt(dataset, student_id, course_id, test_id)?;

    let registration = registration_mut(dataset, student_id, course_id)?;
    registration
        .attempts
        .push(TestAttempt::new(test_id, number, score, grade));
    tracing::info!(
        "recorded attempt {} for {}/{}/{}: {} ({})",
        number,
        student_id,
        course_id,
        test_id,
        score,
        grade
    );

    let pos = registration.attempts.len() - 1;
    Ok(&registration.attempts[pos])
}

/// Delete one attempt and return it.
///
/// Unlike a plain record delete, this also renumbers: later attempts of the
/// same test move down one number so numbering stays dense from 1 and a
/// fresh attempt never collides with a surviving one.
pub fn remove_attempt(
    dataset: &mut Dataset,
    student_id: &str,
    course_id: &str,
    test_id: &str,
    attempt: u8,
) -> Result<TestAttempt> {
    let registration = registration_mut(dataset, student_id, course_id)?;
    let pos = registration
        .attempts
        .iter()
        .position(|a| a.test_id == test_id && a.attempt == attempt)
        .ok_or_else(|| ElearnError::AttemptNotFound {
            course_id: course_id.to_string(),
            test_id: test_id.to_string(),
            attempt,
        })?;

    let removed = registration.attempts.remove(pos);
    for later in registration
        .attempts
        .iter_mut()
        .filter(|a| a.test_id == test_id && a.attempt > attempt)
    {
        later.attempt -= 1;
    }

    tracing::info!(
        "removed attempt {} for {}/{}/{}",
        attempt,
        student_id,
        course_id,
        test_id
    );
    Ok(removed)
}

/// Result of submitting a marked test paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestOutcome {
    pub attempt: TestAttempt,
    pub certificate: CertificateOutcome,
}

/// Record a marked submission and re-evaluate the registration's
/// certificate.
pub fn take_test(
    dataset: &mut Dataset,
    student_id: &str,
    course_id: &str,
    test_id: &str,
    submission: &Submission,
    today: NaiveDate,
) -> Result<TestOutcome> {
    let attempt = record_attempt(
        dataset,
        student_id,
        course_id,
        test_id,
        submission.score,
        submission.grade,
    )?
    .clone();
    let certificate = refresh_certificate(dataset, student_id, course_id, today)?;
    Ok(TestOutcome {
        attempt,
        certificate,
    })
}
