//! Timed quiz: problem loading, the collector-vs-timer race, and grading.

pub mod loader;
pub mod problem;
pub mod report;
pub mod runner;
pub mod session;

pub use loader::{load_problems, parse_problems, shuffle_problems};
pub use problem::{AnswerRecord, AnswerSheet, Problem, Verdict, NO_ANSWER_GIVEN};
pub use report::write_report;
pub use runner::{run_quiz, AnswerSource, Completion, LineAnswers, QuizOutcome};
pub use session::{run_timed_quiz, time_limit, SharedWriter};
