//! Display-name resolution for courses and tests.
//!
//! Lookups never fail: an unknown id is echoed back so that projections can
//! still render something for dangling references.

use crate::model::Dataset;

/// Display name for a course, or the raw id when it is not in the catalog.
pub fn course_name(dataset: &Dataset, course_id: &str) -> String {
    match dataset.course(course_id) {
        Some(course) => course.name.clone(),
        None => {
            tracing::warn!("course '{}' not in catalog, showing raw id", course_id);
            course_id.to_string()
        }
    }
}

/// Type label for a test, or the raw test id when either the course or the
/// test is unknown.
pub fn test_type(dataset: &Dataset, course_id: &str, test_id: &str) -> String {
    dataset
        .course(course_id)
        .and_then(|c| c.test(test_id))
        .map(|t| t.kind.clone())
        .unwrap_or_else(|| {
            tracing::warn!(
                "test '{}' of course '{}' not in catalog, showing raw id",
                test_id,
                course_id
            );
            test_id.to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Course, Test};

    fn dataset() -> Dataset {
        Dataset::new(
            vec![Course {
                id: "C1".into(),
                name: "Rust Fundamentals".into(),
                tests: vec![Test {
                    id: "T1".into(),
                    kind: "Quiz".into(),
                }],
            }],
            vec![],
        )
    }

    #[test]
    fn resolves_known_ids() {
        let ds = dataset();
        assert_eq!(course_name(&ds, "C1"), "Rust Fundamentals");
        assert_eq!(test_type(&ds, "C1", "T1"), "Quiz");
    }

    #[test]
    fn echoes_unknown_ids() {
        let ds = dataset();
        assert_eq!(course_name(&ds, "C9"), "C9");
        assert_eq!(test_type(&ds, "C1", "T7"), "T7");
        assert_eq!(test_type(&ds, "C9", "T1"), "T1");
    }
}
