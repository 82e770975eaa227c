//! Error types for the elearn domain.
//!
//! `StorageError` covers failures of the persisted document itself and is
//! defined here so that `DomainStore` implementations in other crates can
//! share it. `ElearnError` is the full domain taxonomy returned by every
//! service operation.

use thiserror::Error;

use crate::model::Grade;

/// Failures loading or saving the persisted dataset.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The document does not exist.
    #[error("document not found: {0}")]
    NotFound(String),

    /// The document exists but could not be read.
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    /// The document was read but its structure is invalid.
    #[error("malformed document {path}: {message}")]
    Malformed { path: String, message: String },

    /// The document could not be written back.
    #[error("failed to write {path}: {message}")]
    Write { path: String, message: String },
}

/// Errors returned by domain operations.
#[derive(Debug, Error)]
pub enum ElearnError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("course not found: {0}")]
    CourseNotFound(String),

    #[error("test {test_id} not found in course {course_id}")]
    TestNotFound { course_id: String, test_id: String },

    #[error("student not found: {0}")]
    StudentNotFound(String),

    #[error("student {student_id} is not registered for course {course_id}")]
    RegistrationNotFound {
        student_id: String,
        course_id: String,
    },

    #[error("no attempt {attempt} for test {test_id} in course {course_id}")]
    AttemptNotFound {
        course_id: String,
        test_id: String,
        attempt: u8,
    },

    /// The course's question pool is smaller than one test paper.
    #[error("course '{course}' has only {available} question(s), need {required}")]
    InsufficientQuestions {
        course: String,
        available: usize,
        required: usize,
    },

    #[error("already enrolled in course {0}")]
    AlreadyEnrolled(String),

    #[error("no courses left to enroll in")]
    NoAvailableCourses,

    #[error("maximum {max} attempts reached for test {test_id}")]
    AttemptLimitExceeded { test_id: String, max: u8 },

    /// A second attempt is only allowed after a first attempt graded F.
    #[error("second attempt allowed only when first attempt is F (was {grade})")]
    RetakeNotAllowed { grade: Grade },

    /// The admin override only applies to a failed second attempt.
    #[error("additional attempt is only offered for a failed second attempt")]
    AdditionalAttemptNotOffered,

    #[error("username already exists: {0}")]
    DuplicateUsername(String),

    #[error("username and password must not be empty")]
    EmptyCredentials,

    #[error("username is reserved: {0}")]
    ReservedUsername(String),

    #[error("invalid username or password")]
    InvalidCredentials,
}

impl ElearnError {
    /// Returns `true` for violations of enrollment, attempt, or account
    /// rules, as opposed to lookup and storage failures.
    pub fn is_rule_violation(&self) -> bool {
        matches!(
            self,
            ElearnError::AlreadyEnrolled(_)
                | ElearnError::NoAvailableCourses
                | ElearnError::AttemptLimitExceeded { .. }
                | ElearnError::RetakeNotAllowed { .. }
                | ElearnError::AdditionalAttemptNotOffered
                | ElearnError::DuplicateUsername(_)
                | ElearnError::EmptyCredentials
                | ElearnError::ReservedUsername(_)
        )
    }
}

pub type Result<T, E = ElearnError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_violations_are_classified() {
        assert!(ElearnError::AlreadyEnrolled("C1".into()).is_rule_violation());
        assert!(ElearnError::RetakeNotAllowed { grade: Grade::B }.is_rule_violation());
        assert!(!ElearnError::CourseNotFound("C9".into()).is_rule_violation());
        assert!(!ElearnError::Storage(StorageError::NotFound("x.json".into())).is_rule_violation());
    }

    #[test]
    fn storage_error_converts() {
        let err: ElearnError = StorageError::Malformed {
            path: "d.json".into(),
            message: "eof".into(),
        }
        .into();
        assert!(err.to_string().contains("malformed document d.json"));
    }
}
