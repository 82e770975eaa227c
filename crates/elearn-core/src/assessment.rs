//! Test paper assembly, scoring, and grading.
//!
//! A test paper is always four questions drawn from the course's pool.
//! Selection shuffles the full pool and takes the first four, so two papers
//! for the same course are not expected to match.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ElearnError, Result};
use crate::model::Grade;
use crate::question_bank::{OptionLabel, Question, QuestionBank};

/// Number of questions on every test paper.
pub const QUESTIONS_PER_TEST: usize = 4;

/// Counts from marking one submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSheet {
    /// Questions with an answer selected.
    pub attempted: u32,
    pub correct: u32,
    pub wrong: u32,
}

/// A marked submission ready to be recorded as an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub sheet: ScoreSheet,
    /// Percentage, 0–100.
    pub score: u32,
    pub grade: Grade,
}

/// The questions handed to a student for one sitting.
#[derive(Debug, Clone)]
pub struct TestPaper {
    pub course_name: String,
    pub questions: [Question; QUESTIONS_PER_TEST],
}

impl TestPaper {
    /// Correct labels in question order.
    pub fn answer_key(&self) -> [OptionLabel; QUESTIONS_PER_TEST] {
        [
            self.questions[0].answer,
            self.questions[1].answer,
            self.questions[2].answer,
            self.questions[3].answer,
        ]
    }

    /// Mark the given answers against this paper.
    pub fn submit(&self, answers: &[Option<OptionLabel>; QUESTIONS_PER_TEST]) -> Submission {
        let sheet = score(answers, &self.answer_key());
        Submission {
            sheet,
            score: percentage(sheet.correct),
            grade: grade(sheet.correct),
        }
    }
}

/// Draw a test paper for a course using the thread-local RNG.
pub fn select_questions(bank: &QuestionBank, course_name: &str) -> Result<TestPaper> {
    select_questions_with(bank, course_name, &mut rand::thread_rng())
}

/// Draw a test paper for a course: shuffle the whole pool, keep the first
/// four.
pub fn select_questions_with<R: Rng + ?Sized>(
    bank: &QuestionBank,
    course_name: &str,
    rng: &mut R,
) -> Result<TestPaper> {
    let pool = bank
        .pool(course_name)
        .ok_or_else(|| ElearnError::CourseNotFound(course_name.to_string()))?;

    if pool.questions.len() < QUESTIONS_PER_TEST {
        return Err(ElearnError::InsufficientQuestions {
            course: course_name.to_string(),
            available: pool.questions.len(),
            required: QUESTIONS_PER_TEST,
        });
    }

    let mut questions = pool.questions.clone();
    questions.shuffle(rng);
    questions.truncate(QUESTIONS_PER_TEST);

    let questions: [Question; QUESTIONS_PER_TEST] = questions
        .try_into()
        .map_err(|_| ElearnError::InsufficientQuestions {
            course: course_name.to_string(),
            available: pool.questions.len(),
            required: QUESTIONS_PER_TEST,
        })?;

    tracing::debug!("selected {} questions for '{}'", QUESTIONS_PER_TEST, course_name);
    Ok(TestPaper {
        course_name: course_name.to_string(),
        questions,
    })
}

/// Mark answers against a key. Unanswered slots count as neither correct
/// nor wrong.
pub fn score(
    answers: &[Option<OptionLabel>; QUESTIONS_PER_TEST],
    key: &[OptionLabel; QUESTIONS_PER_TEST],
) -> ScoreSheet {
    let mut sheet = ScoreSheet::default();
    for (answer, expected) in answers.iter().zip(key.iter()) {
        let Some(answer) = answer else {
            continue;
        };
        sheet.attempted += 1;
        if answer == expected {
            sheet.correct += 1;
        } else {
            sheet.wrong += 1;
        }
    }
    sheet
}

fn exact_percentage(correct: u32) -> f64 {
    f64::from(correct) / QUESTIONS_PER_TEST as f64 * 100.0
}

/// Percentage of correct answers, rounded half up.
pub fn percentage(correct: u32) -> u32 {
    (exact_percentage(correct) + 0.5) as u32
}

/// Letter grade for a number of correct answers. Every threshold is strict:
/// above 75 is A, above 50 is B, above 25 is C, anything else F.
pub fn grade(correct: u32) -> Grade {
    let pct = exact_percentage(correct);
    if pct > 75.0 {
        Grade::A
    } else if pct > 50.0 {
        Grade::B
    } else if pct > 25.0 {
        Grade::C
    } else {
        Grade::F
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question_bank::QuestionPool;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question(n: usize) -> Question {
        Question {
            text: format!("Question {n}"),
            a: "a".into(),
            b: "b".into(),
            c: "c".into(),
            d: "d".into(),
            answer: OptionLabel::ALL[n % 4],
        }
    }

    fn bank(course: &str, size: usize) -> QuestionBank {
        QuestionBank {
            courses: vec![QuestionPool {
                name: course.into(),
                questions: (0..size).map(question).collect(),
            }],
        }
    }

    #[test]
    fn grade_boundaries() {
        assert_eq!(grade(4), Grade::A);
        assert_eq!(grade(3), Grade::B);
        assert_eq!(grade(2), Grade::C);
        assert_eq!(grade(1), Grade::F);
        assert_eq!(grade(0), Grade::F);
    }

    #[test]
    fn percentages() {
        assert_eq!(percentage(0), 0);
        assert_eq!(percentage(1), 25);
        assert_eq!(percentage(2), 50);
        assert_eq!(percentage(3), 75);
        assert_eq!(percentage(4), 100);
    }

    #[test]
    fn score_counts_attempted_correct_wrong() {
        use OptionLabel::*;
        let key = [A, B, C, D];
        let sheet = score(&[Some(A), None, Some(D), Some(D)], &key);
        assert_eq!(
            sheet,
            ScoreSheet {
                attempted: 3,
                correct: 2,
                wrong: 1
            }
        );

        let blank = score(&[None, None, None, None], &key);
        assert_eq!(blank, ScoreSheet::default());
    }

    #[test]
    fn select_takes_four_distinct_questions() {
        let bank = bank("Rust", 10);
        let mut rng = StdRng::seed_from_u64(7);
        let paper = select_questions_with(&bank, "Rust", &mut rng).unwrap();
        let mut texts: Vec<&str> = paper.questions.iter().map(|q| q.text.as_str()).collect();
        texts.sort();
        texts.dedup();
        assert_eq!(texts.len(), QUESTIONS_PER_TEST);
    }

    #[test]
    fn select_with_exact_pool_size() {
        let bank = bank("Rust", 4);
        let paper = select_questions(&bank, "Rust").unwrap();
        assert_eq!(paper.course_name, "Rust");
        assert_eq!(paper.questions.len(), 4);
    }

    #[test]
    fn select_fails_on_small_pool() {
        let bank = bank("X", 3);
        let err = select_questions(&bank, "X").unwrap_err();
        assert!(matches!(
            err,
            ElearnError::InsufficientQuestions { available: 3, required: 4, .. }
        ));
    }

    #[test]
    fn select_fails_on_unknown_course() {
        let bank = bank("Rust", 5);
        assert!(matches!(
            select_questions(&bank, "Go"),
            Err(ElearnError::CourseNotFound(_))
        ));
    }

    #[test]
    fn submit_marks_against_paper_key() {
        let bank = bank("Rust", 4);
        let paper = select_questions(&bank, "Rust").unwrap();
        let key = paper.answer_key();

        let perfect = paper.submit(&key.map(Some));
        assert_eq!(perfect.score, 100);
        assert_eq!(perfect.grade, Grade::A);

        let one_right = paper.submit(&[Some(key[0]), None, None, None]);
        assert_eq!(one_right.sheet.attempted, 1);
        assert_eq!(one_right.score, 25);
        assert_eq!(one_right.grade, Grade::F);
    }
}
