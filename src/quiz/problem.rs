//! Quiz domain models: problems, verdicts, and the index-aligned answer sheet.

use std::fmt;

use tracing::warn;

/// Text recorded for a problem the user never got to.
pub const NO_ANSWER_GIVEN: &str = "**NO ANSWER GIVEN**";

/// One `question,answer` row.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Problem {
  pub question: String,
  pub answer: String,
}

impl Problem {
  pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
    Self { question: question.into(), answer: answer.into() }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
  Correct,
  Wrong,
}

impl Verdict {
  /// Whitespace-trimmed, case-insensitive comparison.
  pub fn judge(given: &str, expected: &str) -> Self {
    if given.trim().to_lowercase() == expected.trim().to_lowercase() {
      Verdict::Correct
    } else {
      Verdict::Wrong
    }
  }
}

impl fmt::Display for Verdict {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Verdict::Correct => f.write_str("CORRECT"),
      Verdict::Wrong => f.write_str("WRONG"),
    }
  }
}

/// What the user typed for one problem, and how it was graded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerRecord {
  pub verdict: Verdict,
  pub given: String,
}

impl AnswerRecord {
  /// Grade `given` against the problem's expected answer.
  pub fn grade(problem: &Problem, given: impl Into<String>) -> Self {
    let given = given.into();
    Self { verdict: Verdict::judge(&given, &problem.answer), given }
  }

  /// Sentinel for a problem left unanswered.
  pub fn unanswered() -> Self {
    Self { verdict: Verdict::Wrong, given: NO_ANSWER_GIVEN.to_string() }
  }
}

/// Answer records aligned one-to-one with the problems of a quiz run.
///
/// Starts fully populated with sentinels; `fill_next` overwrites slots in
/// order. The length never changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerSheet {
  records: Vec<AnswerRecord>,
  filled: usize,
}

impl AnswerSheet {
  pub fn unanswered(len: usize) -> Self {
    Self { records: vec![AnswerRecord::unanswered(); len], filled: 0 }
  }

  /// Write `record` into the next unfilled slot. Returns false when the sheet
  /// is already complete.
  pub fn fill_next(&mut self, record: AnswerRecord) -> bool {
    match self.records.get_mut(self.filled) {
      Some(slot) => {
        *slot = record;
        self.filled += 1;
        true
      }
      None => {
        warn!(target: "quiz", len = self.records.len(), "Answer sheet already full; dropping record");
        false
      }
    }
  }

  pub fn len(&self) -> usize { self.records.len() }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }

  /// Number of slots overwritten by real answers.
  pub fn answered(&self) -> usize { self.filled }

  pub fn correct_count(&self) -> usize {
    self.records.iter().filter(|r| r.verdict == Verdict::Correct).count()
  }

  pub fn records(&self) -> &[AnswerRecord] { &self.records }
}
