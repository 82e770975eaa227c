//! TOML question bank parser.
//!
//! The question bank is a separate document from the dataset. It holds one
//! question pool per course, keyed by the course's display name:
//!
//! ```toml
//! [[courses]]
//! name = "Rust Fundamentals"
//!
//! [[courses.questions]]
//! text = "Which keyword declares an immutable binding?"
//! a = "let"
//! b = "mut"
//! c = "const fn"
//! d = "static mut"
//! answer = "A"
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::assessment::QUESTIONS_PER_TEST;

/// Label of one of the four answer options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; 4] = [OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D];
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionLabel::A => write!(f, "A"),
            OptionLabel::B => write!(f, "B"),
            OptionLabel::C => write!(f, "C"),
            OptionLabel::D => write!(f, "D"),
        }
    }
}

impl FromStr for OptionLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(OptionLabel::A),
            "B" => Ok(OptionLabel::B),
            "C" => Ok(OptionLabel::C),
            "D" => Ok(OptionLabel::D),
            other => Err(format!("unknown option label: {other}")),
        }
    }
}

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Prompt text.
    pub text: String,
    pub a: String,
    pub b: String,
    pub c: String,
    pub d: String,
    /// The correct option.
    pub answer: OptionLabel,
}

impl Question {
    /// Text of the option with the given label.
    pub fn option(&self, label: OptionLabel) -> &str {
        match label {
            OptionLabel::A => &self.a,
            OptionLabel::B => &self.b,
            OptionLabel::C => &self.c,
            OptionLabel::D => &self.d,
        }
    }
}

/// Questions belonging to one course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionPool {
    /// Course display name.
    pub name: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// All question pools.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionBank {
    #[serde(default)]
    pub courses: Vec<QuestionPool>,
}

impl QuestionBank {
    /// The pool for a course display name. The first match wins.
    pub fn pool(&self, course_name: &str) -> Option<&QuestionPool> {
        self.courses.iter().find(|p| p.name == course_name)
    }
}

/// Intermediate TOML structure; answers are validated after parsing so
/// that the error names the offending question.
#[derive(Debug, Deserialize)]
struct TomlQuestionBank {
    #[serde(default)]
    courses: Vec<TomlPool>,
}

#[derive(Debug, Deserialize)]
struct TomlPool {
    name: String,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    text: String,
    #[serde(default)]
    a: String,
    #[serde(default)]
    b: String,
    #[serde(default)]
    c: String,
    #[serde(default)]
    d: String,
    answer: String,
}

/// Parse a question bank file.
pub fn parse_question_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_question_bank_str(&content, path)
}

/// Parse a question bank from a TOML string.
pub fn parse_question_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlQuestionBank = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let courses = parsed
        .courses
        .into_iter()
        .map(|pool| {
            let questions = pool
                .questions
                .into_iter()
                .enumerate()
                .map(|(i, q)| {
                    let answer: OptionLabel = q.answer.parse().map_err(|e: String| {
                        anyhow::anyhow!("course '{}', question {}: {}", pool.name, i + 1, e)
                    })?;
                    Ok(Question {
                        text: q.text,
                        a: q.a,
                        b: q.b,
                        c: q.c,
                        d: q.d,
                        answer,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(QuestionPool {
                name: pool.name,
                questions,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(QuestionBank { courses })
}

/// A warning from question bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The course the warning refers to.
    pub course: String,
    pub message: String,
}

/// Check a question bank for problems that would break test papers.
pub fn validate_question_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen = std::collections::HashSet::new();
    for pool in &bank.courses {
        if !seen.insert(&pool.name) {
            warnings.push(ValidationWarning {
                course: pool.name.clone(),
                message: format!("duplicate course name: {}", pool.name),
            });
        }
    }

    for pool in &bank.courses {
        if pool.questions.len() < QUESTIONS_PER_TEST {
            warnings.push(ValidationWarning {
                course: pool.name.clone(),
                message: format!(
                    "only {} question(s), a test needs {}",
                    pool.questions.len(),
                    QUESTIONS_PER_TEST
                ),
            });
        }

        for (i, q) in pool.questions.iter().enumerate() {
            if q.text.trim().is_empty() {
                warnings.push(ValidationWarning {
                    course: pool.name.clone(),
                    message: format!("question {} has an empty prompt", i + 1),
                });
            }
            let blank: Vec<String> = OptionLabel::ALL
                .iter()
                .filter(|l| q.option(**l).trim().is_empty())
                .map(|l| l.to_string())
                .collect();
            if !blank.is_empty() {
                warnings.push(ValidationWarning {
                    course: pool.name.clone(),
                    message: format!("question {} has empty option(s): {}", i + 1, blank.join(", ")),
                });
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[[courses]]
name = "Rust Fundamentals"

[[courses.questions]]
text = "Which keyword declares an immutable binding?"
a = "let"
b = "mut"
c = "var"
d = "static mut"
answer = "A"

[[courses.questions]]
text = "What does `?` do on an Err value?"
a = "Panics"
b = "Returns it early from the function"
c = "Ignores it"
d = "Converts it to None"
answer = "b"
"#;

    #[test]
    fn parse_valid_toml() {
        let bank = parse_question_bank_str(VALID_TOML, &PathBuf::from("bank.toml")).unwrap();
        assert_eq!(bank.courses.len(), 1);
        let pool = bank.pool("Rust Fundamentals").unwrap();
        assert_eq!(pool.questions.len(), 2);
        assert_eq!(pool.questions[0].answer, OptionLabel::A);
        assert_eq!(pool.questions[1].answer, OptionLabel::B);
        assert_eq!(pool.questions[1].option(OptionLabel::B), "Returns it early from the function");
        assert!(bank.pool("Unknown").is_none());
    }

    #[test]
    fn parse_rejects_bad_answer() {
        let toml = r#"
[[courses]]
name = "X"

[[courses.questions]]
text = "Q"
a = "1"
b = "2"
c = "3"
d = "4"
answer = "E"
"#;
        let err = parse_question_bank_str(toml, &PathBuf::from("bank.toml")).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("question 1"), "got: {msg}");
    }

    #[test]
    fn parse_malformed_toml() {
        let result = parse_question_bank_str("[[courses]\nname=", &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn validate_reports_small_pools_and_duplicates() {
        let mut bank = parse_question_bank_str(VALID_TOML, &PathBuf::from("bank.toml")).unwrap();
        bank.courses.push(bank.courses[0].clone());
        let warnings = validate_question_bank(&bank);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate course name")));
        assert!(warnings.iter().any(|w| w.message.contains("only 2 question(s)")));
    }

    #[test]
    fn validate_reports_empty_text() {
        let bank = QuestionBank {
            courses: vec![QuestionPool {
                name: "X".into(),
                questions: vec![Question {
                    text: " ".into(),
                    a: "1".into(),
                    b: String::new(),
                    c: "3".into(),
                    d: "4".into(),
                    answer: OptionLabel::A,
                }],
            }],
        };
        let warnings = validate_question_bank(&bank);
        assert!(warnings.iter().any(|w| w.message.contains("empty prompt")));
        assert!(warnings.iter().any(|w| w.message.contains("empty option(s): B")));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.toml");
        std::fs::write(&path, VALID_TOML).unwrap();
        let bank = parse_question_bank(&path).unwrap();
        assert_eq!(bank.courses[0].name, "Rust Fundamentals");

        assert!(parse_question_bank(&dir.path().join("missing.toml")).is_err());
    }
}
