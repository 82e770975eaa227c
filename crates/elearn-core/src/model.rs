//! Core data model types for elearn.
//!
//! The whole persisted state is one [`Dataset`]: the course catalog plus
//! every student with their registrations, attempts, and certificates.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ElearnError, Result};

/// Maximum number of attempts per (student, course, test).
pub const MAX_ATTEMPTS: u8 = 2;

/// A course in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier (e.g. "C1").
    pub id: String,
    /// Display name; also the key of the course's question pool.
    pub name: String,
    /// Tests belonging to this course, in catalog order.
    #[serde(default)]
    pub tests: Vec<Test>,
}

impl Course {
    /// Look up one of this course's tests by id.
    pub fn test(&self, test_id: &str) -> Option<&Test> {
        self.tests.iter().find(|t| t.id == test_id)
    }
}

/// A test belonging to a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Test {
    /// Identifier, unique within the course.
    pub id: String,
    /// Type label (e.g. "Quiz", "Final").
    #[serde(rename = "type")]
    pub kind: String,
}

/// Letter grade for a test attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    F,
}

impl Grade {
    /// A, B and C pass; F fails.
    pub fn is_pass(self) -> bool {
        !matches!(self, Grade::F)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::F => write!(f, "F"),
        }
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Grade::A),
            "B" => Ok(Grade::B),
            "C" => Ok(Grade::C),
            "F" => Ok(Grade::F),
            other => Err(format!("unknown grade: {other}")),
        }
    }
}

/// Pass/fail outcome recorded alongside the grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptResult {
    Pass,
    Fail,
}

impl AttemptResult {
    pub fn from_grade(grade: Grade) -> Self {
        if grade == Grade::F {
            AttemptResult::Fail
        } else {
            AttemptResult::Pass
        }
    }
}

impl fmt::Display for AttemptResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptResult::Pass => write!(f, "Pass"),
            AttemptResult::Fail => write!(f, "Fail"),
        }
    }
}

/// One scored submission of a test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestAttempt {
    /// Test id within the registration's course.
    pub test_id: String,
    /// Attempt number, 1 or 2.
    pub attempt: u8,
    /// Percentage score, 0–100.
    pub score: u32,
    pub grade: Grade,
    pub result: AttemptResult,
}

impl TestAttempt {
    /// Build an attempt; the result is derived from the grade.
    pub fn new(test_id: impl Into<String>, attempt: u8, score: u32, grade: Grade) -> Self {
        Self {
            test_id: test_id.into(),
            attempt,
            score,
            grade,
            result: AttemptResult::from_grade(grade),
        }
    }
}

/// Certificate state of a registration. The issue date exists only once
/// the certificate is issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum CertificateStatus {
    #[default]
    Pending,
    Issued { issue_date: NaiveDate },
}

impl CertificateStatus {
    pub fn is_issued(&self) -> bool {
        matches!(self, CertificateStatus::Issued { .. })
    }

    pub fn issue_date(&self) -> Option<NaiveDate> {
        match self {
            CertificateStatus::Issued { issue_date } => Some(*issue_date),
            CertificateStatus::Pending => None,
        }
    }
}

impl fmt::Display for CertificateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CertificateStatus::Pending => write!(f, "Pending"),
            CertificateStatus::Issued { issue_date } => {
                write!(f, "Issued {}", issue_date.format("%Y-%m-%d"))
            }
        }
    }
}

/// A student's enrollment in one course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRegistration {
    pub course_id: String,
    pub registration_date: NaiveDate,
    #[serde(default)]
    pub attempts: Vec<TestAttempt>,
    #[serde(default)]
    pub certificate: CertificateStatus,
}

impl CourseRegistration {
    /// A fresh registration: no attempts, certificate pending.
    pub fn new(course_id: impl Into<String>, registration_date: NaiveDate) -> Self {
        Self {
            course_id: course_id.into(),
            registration_date,
            attempts: Vec::new(),
            certificate: CertificateStatus::Pending,
        }
    }

    /// Attempts recorded for one test, in insertion order.
    pub fn attempts_for<'a>(&'a self, test_id: &'a str) -> impl Iterator<Item = &'a TestAttempt> {
        self.attempts.iter().filter(move |a| a.test_id == test_id)
    }

    pub fn attempt_count(&self, test_id: &str) -> usize {
        self.attempts_for(test_id).count()
    }
}

/// A registered student.
///
/// `id` and `username` are identity keys and cannot be changed after
/// construction; the remaining profile fields are editable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    id: String,
    username: String,
    /// Stored as entered.
    pub password: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub registrations: Vec<CourseRegistration>,
}

impl Student {
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            password: password.into(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            registrations: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn registration(&self, course_id: &str) -> Option<&CourseRegistration> {
        self.registrations.iter().find(|r| r.course_id == course_id)
    }

    pub fn registration_mut(&mut self, course_id: &str) -> Option<&mut CourseRegistration> {
        self.registrations
            .iter_mut()
            .find(|r| r.course_id == course_id)
    }

    pub fn is_enrolled(&self, course_id: &str) -> bool {
        self.registration(course_id).is_some()
    }
}

/// The complete persisted state.
///
/// Lookups by student id, username, and course id go through an index that
/// is rebuilt whenever a dataset is constructed or deserialized and after
/// every student insert or removal. Duplicate keys resolve to the first
/// entry in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "DatasetDocument", into = "DatasetDocument")]
pub struct Dataset {
    courses: Vec<Course>,
    students: Vec<Student>,
    index: DatasetIndex,
}

/// On-disk shape of a [`Dataset`].
#[derive(Debug, Serialize, Deserialize)]
struct DatasetDocument {
    #[serde(default)]
    courses: Vec<Course>,
    #[serde(default)]
    students: Vec<Student>,
}

impl From<DatasetDocument> for Dataset {
    fn from(doc: DatasetDocument) -> Self {
        Dataset::new(doc.courses, doc.students)
    }
}

impl From<Dataset> for DatasetDocument {
    fn from(dataset: Dataset) -> Self {
        DatasetDocument {
            courses: dataset.courses,
            students: dataset.students,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct DatasetIndex {
    students_by_id: HashMap<String, usize>,
    students_by_username: HashMap<String, usize>,
    courses_by_id: HashMap<String, usize>,
}

impl DatasetIndex {
    fn build(courses: &[Course], students: &[Student]) -> Self {
        let mut index = DatasetIndex::default();
        for (pos, student) in students.iter().enumerate() {
            index
                .students_by_id
                .entry(student.id.clone())
                .or_insert(pos);
            index
                .students_by_username
                .entry(student.username.clone())
                .or_insert(pos);
        }
        for (pos, course) in courses.iter().enumerate() {
            index.courses_by_id.entry(course.id.clone()).or_insert(pos);
        }
        index
    }
}

impl Dataset {
    pub fn new(courses: Vec<Course>, students: Vec<Student>) -> Self {
        let index = DatasetIndex::build(&courses, &students);
        Self {
            courses,
            students,
            index,
        }
    }

    fn reindex(&mut self) {
        self.index = DatasetIndex::build(&self.courses, &self.students);
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn course(&self, course_id: &str) -> Option<&Course> {
        self.index
            .courses_by_id
            .get(course_id)
            .map(|&pos| &self.courses[pos])
    }

    pub fn student(&self, student_id: &str) -> Option<&Student> {
        self.index
            .students_by_id
            .get(student_id)
            .map(|&pos| &self.students[pos])
    }

    pub fn student_mut(&mut self, student_id: &str) -> Option<&mut Student> {
        let pos = *self.index.students_by_id.get(student_id)?;
        self.students.get_mut(pos)
    }

    pub fn student_by_username(&self, username: &str) -> Option<&Student> {
        self.index
            .students_by_username
            .get(username)
            .map(|&pos| &self.students[pos])
    }

    pub fn require_course(&self, course_id: &str) -> Result<&Course> {
        self.course(course_id)
            .ok_or_else(|| ElearnError::CourseNotFound(course_id.to_string()))
    }

    pub fn require_student(&self, student_id: &str) -> Result<&Student> {
        self.student(student_id)
            .ok_or_else(|| ElearnError::StudentNotFound(student_id.to_string()))
    }

    pub fn require_student_mut(&mut self, student_id: &str) -> Result<&mut Student> {
        self.student_mut(student_id)
            .ok_or_else(|| ElearnError::StudentNotFound(student_id.to_string()))
    }

    /// Append a course to the catalog.
    pub fn add_course(&mut self, course: Course) {
        self.courses.push(course);
        self.reindex();
    }

    /// Append a student and return a reference to the stored record.
    pub fn insert_student(&mut self, student: Student) -> &Student {
        self.students.push(student);
        self.reindex();
        let pos = self.students.len() - 1;
        &self.students[pos]
    }

    /// Remove a student together with everything they own.
    pub fn remove_student(&mut self, student_id: &str) -> Option<Student> {
        let pos = *self.index.students_by_id.get(student_id)?;
        let removed = self.students.remove(pos);
        self.reindex();
        Some(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample() -> Dataset {
        let course = Course {
            id: "C1".into(),
            name: "Rust Fundamentals".into(),
            tests: vec![
                Test {
                    id: "T1".into(),
                    kind: "Quiz".into(),
                },
                Test {
                    id: "T2".into(),
                    kind: "Final".into(),
                },
            ],
        };
        let mut alice = Student::new("S001", "alice", "pw");
        let mut reg = CourseRegistration::new("C1", date("2026-01-05"));
        reg.attempts.push(TestAttempt::new("T1", 1, 100, Grade::A));
        reg.certificate = CertificateStatus::Issued {
            issue_date: date("2026-02-01"),
        };
        alice.registrations.push(reg);
        Dataset::new(vec![course], vec![alice, Student::new("S002", "bob", "pw2")])
    }

    #[test]
    fn grade_display_and_parse() {
        assert_eq!(Grade::A.to_string(), "A");
        assert_eq!("f".parse::<Grade>().unwrap(), Grade::F);
        assert_eq!(" B ".parse::<Grade>().unwrap(), Grade::B);
        assert!("A+".parse::<Grade>().is_err());
        assert!(Grade::C.is_pass());
        assert!(!Grade::F.is_pass());
    }

    #[test]
    fn attempt_result_derived_from_grade() {
        assert_eq!(TestAttempt::new("T1", 1, 25, Grade::F).result, AttemptResult::Fail);
        assert_eq!(TestAttempt::new("T1", 1, 50, Grade::C).result, AttemptResult::Pass);
    }

    #[test]
    fn indexed_lookups() {
        let ds = sample();
        assert_eq!(ds.student("S002").unwrap().username(), "bob");
        assert_eq!(ds.student_by_username("alice").unwrap().id(), "S001");
        assert_eq!(ds.course("C1").unwrap().name, "Rust Fundamentals");
        assert!(ds.course("C9").is_none());
        assert!(matches!(
            ds.require_student("S404"),
            Err(ElearnError::StudentNotFound(_))
        ));
    }

    #[test]
    fn index_follows_insert_and_remove() {
        let mut ds = sample();
        ds.insert_student(Student::new("S003", "carol", "pw3"));
        assert_eq!(ds.student_by_username("carol").unwrap().id(), "S003");

        let removed = ds.remove_student("S001").unwrap();
        assert_eq!(removed.username(), "alice");
        assert!(ds.student("S001").is_none());
        assert!(ds.student_by_username("alice").is_none());
        assert_eq!(ds.student("S003").unwrap().username(), "carol");
    }

    #[test]
    fn certificate_serde_shape() {
        let issued = CertificateStatus::Issued {
            issue_date: date("2026-03-04"),
        };
        let json = serde_json::to_value(issued).unwrap();
        assert_eq!(json["status"], "Issued");
        assert_eq!(json["issue_date"], "2026-03-04");

        let pending: CertificateStatus =
            serde_json::from_str(r#"{"status":"Pending"}"#).unwrap();
        assert_eq!(pending, CertificateStatus::Pending);
        assert!(pending.issue_date().is_none());
    }

    #[test]
    fn dataset_serde_roundtrip_rebuilds_index() {
        let ds = sample();
        let json = serde_json::to_string(&ds).unwrap();
        let loaded: Dataset = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, ds);
        assert_eq!(loaded.student_by_username("bob").unwrap().id(), "S002");
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{
            "courses": [{"id": "C1", "name": "Rust"}],
            "students": [{
                "id": "S001",
                "username": "alice",
                "password": "pw",
                "registrations": [{"course_id": "C1", "registration_date": "2026-01-01"}]
            }]
        }"#;
        let ds: Dataset = serde_json::from_str(json).unwrap();
        let alice = ds.student("S001").unwrap();
        assert!(alice.email.is_empty());
        let reg = alice.registration("C1").unwrap();
        assert!(reg.attempts.is_empty());
        assert_eq!(reg.certificate, CertificateStatus::Pending);
        assert!(ds.course("C1").unwrap().tests.is_empty());
    }
}
