//! Student registration and login.

use crate::error::{ElearnError, Result};
use crate::model::{Dataset, Student};

/// Administrator credentials. These never live in the dataset.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Who a successful login resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    Admin,
    /// Carries the student id.
    Student(String),
}

/// Next free student id: "S" followed by the highest existing numeric
/// suffix plus one, zero-padded to three digits.
pub fn next_student_id(dataset: &Dataset) -> String {
    let max = dataset
        .students()
        .iter()
        .filter_map(|s| s.id().strip_prefix('S'))
        .filter_map(|digits| digits.parse::<u64>().ok())
        .map(u128::from)
        .max()
        .unwrap_or(0);
    format!("S{:03}", max + 1)
}

/// Create a new student account with no registrations.
pub fn register_student<'a>(
    dataset: &'a mut Dataset,
    admin: &AdminCredentials,
    username: &str,
    password: &str,
) -> Result<&'a Student> {
    if username.is_empty() || password.is_empty() {
        return Err(ElearnError::EmptyCredentials);
    }
    if username == admin.username {
        return Err(ElearnError::ReservedUsername(username.to_string()));
    }
    if dataset.student_by_username(username).is_some() {
        return Err(ElearnError::DuplicateUsername(username.to_string()));
    }

    let id = next_student_id(dataset);
    tracing::info!("registered student {} ({})", username, id);
    Ok(dataset.insert_student(Student::new(id, username, password)))
}

/// Resolve a username/password pair to the admin or a student.
pub fn authenticate(
    dataset: &Dataset,
    admin: &AdminCredentials,
    username: &str,
    password: &str,
) -> Result<Principal> {
    if username == admin.username && password == admin.password {
        return Ok(Principal::Admin);
    }
    match dataset.student_by_username(username) {
        Some(student) if student.password == password => {
            Ok(Principal::Student(student.id().to_string()))
        }
        _ => Err(ElearnError::InvalidCredentials),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> AdminCredentials {
        AdminCredentials {
            username: "admin".into(),
            password: "admin1".into(),
        }
    }

    #[test]
    fn ids_are_sequential_and_padded() {
        let mut ds = Dataset::default();
        assert_eq!(next_student_id(&ds), "S001");
        ds.insert_student(Student::new("S009", "a", "p"));
        ds.insert_student(Student::new("X100", "b", "p"));
        ds.insert_student(Student::new("S004", "c", "p"));
        assert_eq!(next_student_id(&ds), "S010");
    }

    #[test]
    fn ids_continue_past_large_suffixes() {
        let mut ds = Dataset::default();
        ds.insert_student(Student::new("S4294967295", "a", "p"));
        assert_eq!(next_student_id(&ds), "S4294967296");

        ds.insert_student(Student::new("S18446744073709551615", "b", "p"));
        assert_eq!(next_student_id(&ds), "S18446744073709551616");

        let registered = register_student(&mut ds, &admin(), "carol", "pw").unwrap();
        assert_eq!(registered.id(), "S18446744073709551616");
    }

    #[test]
    fn register_creates_student() {
        let mut ds = Dataset::default();
        let student = register_student(&mut ds, &admin(), "alice", "pw").unwrap();
        assert_eq!(student.id(), "S001");
        assert!(student.registrations.is_empty());
        let second = register_student(&mut ds, &admin(), "bob", "pw").unwrap();
        assert_eq!(second.id(), "S002");
    }

    #[test]
    fn register_rejects_bad_input() {
        let mut ds = Dataset::default();
        register_student(&mut ds, &admin(), "alice", "pw").unwrap();

        assert!(matches!(
            register_student(&mut ds, &admin(), "", "pw"),
            Err(ElearnError::EmptyCredentials)
        ));
        assert!(matches!(
            register_student(&mut ds, &admin(), "admin", "x"),
            Err(ElearnError::ReservedUsername(_))
        ));
        assert!(matches!(
            register_student(&mut ds, &admin(), "alice", "other"),
            Err(ElearnError::DuplicateUsername(_))
        ));
        assert_eq!(ds.students().len(), 1);
    }

    #[test]
    fn authenticate_resolves_principals() {
        let mut ds = Dataset::default();
        register_student(&mut ds, &admin(), "alice", "pw").unwrap();

        assert_eq!(
            authenticate(&ds, &admin(), "admin", "admin1").unwrap(),
            Principal::Admin
        );
        assert_eq!(
            authenticate(&ds, &admin(), "alice", "pw").unwrap(),
            Principal::Student("S001".into())
        );
        assert!(matches!(
            authenticate(&ds, &admin(), "alice", "wrong"),
            Err(ElearnError::InvalidCredentials)
        ));
        assert!(matches!(
            authenticate(&ds, &admin(), "nobody", "pw"),
            Err(ElearnError::InvalidCredentials)
        ));
    }

    #[test]
    fn debug_masks_admin_password() {
        let rendered = format!("{:?}", admin());
        assert!(!rendered.contains("admin1"));
        assert!(rendered.contains("***"));
    }
}
