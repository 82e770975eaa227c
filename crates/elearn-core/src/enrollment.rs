//! Course enrollment.

use chrono::NaiveDate;

use crate::error::{ElearnError, Result};
use crate::model::{Course, CourseRegistration, Dataset};

/// Catalog courses the student is not yet registered for, in catalog order.
pub fn available_courses<'a>(dataset: &'a Dataset, student_id: &str) -> Result<Vec<&'a Course>> {
    let student = dataset.require_student(student_id)?;
    Ok(dataset
        .courses()
        .iter()
        .filter(|c| !student.is_enrolled(&c.id))
        .collect())
}

/// Register a student in a course, dated `today`, with no attempts and a
/// pending certificate.
pub fn enroll<'a>(
    dataset: &'a mut Dataset,
    student_id: &str,
    course_id: &str,
    today: NaiveDate,
) -> Result<&'a CourseRegistration> {
    dataset.require_course(course_id)?;
    let student = dataset.require_student_mut(student_id)?;
    if student.is_enrolled(course_id) {
        return Err(ElearnError::AlreadyEnrolled(course_id.to_string()));
    }

    student
        .registrations
        .push(CourseRegistration::new(course_id, today));
    tracing::info!("student {} enrolled in {}", student_id, course_id);

    let pos = student.registrations.len() - 1;
    Ok(&student.registrations[pos])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CertificateStatus, Student};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn dataset() -> Dataset {
        let courses = ["C1", "C2", "C3"]
            .into_iter()
            .map(|id| Course {
                id: id.into(),
                name: format!("Course {id}"),
                tests: vec![],
            })
            .collect();
        let mut alice = Student::new("S001", "alice", "pw");
        alice
            .registrations
            .push(CourseRegistration::new("C2", today()));
        Dataset::new(courses, vec![alice])
    }

    #[test]
    fn available_excludes_registered() {
        let ds = dataset();
        let ids: Vec<&str> = available_courses(&ds, "S001")
            .unwrap()
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["C1", "C3"]);
    }

    #[test]
    fn enroll_creates_pending_registration() {
        let mut ds = dataset();
        let reg = enroll(&mut ds, "S001", "C1", today()).unwrap();
        assert_eq!(reg.course_id, "C1");
        assert_eq!(reg.registration_date, today());
        assert!(reg.attempts.is_empty());
        assert_eq!(reg.certificate, CertificateStatus::Pending);
        assert_eq!(available_courses(&ds, "S001").unwrap().len(), 1);
    }

    #[test]
    fn enroll_twice_fails_without_changes() {
        let mut ds = dataset();
        let before = ds.clone();
        let err = enroll(&mut ds, "S001", "C2", today()).unwrap_err();
        assert!(matches!(err, ElearnError::AlreadyEnrolled(ref id) if id == "C2"));
        assert_eq!(ds, before);
    }

    #[test]
    fn enroll_unknown_course_or_student() {
        let mut ds = dataset();
        assert!(matches!(
            enroll(&mut ds, "S001", "C9", today()),
            Err(ElearnError::CourseNotFound(_))
        ));
        assert!(matches!(
            enroll(&mut ds, "S404", "C1", today()),
            Err(ElearnError::StudentNotFound(_))
        ));
    }
}
