//! Grading printout.

use std::io::{self, Write};

use crate::quiz::problem::{AnswerSheet, Problem};

/// Print every problem with its expected answer, the given answer and the
/// verdict, then the aggregate score.
pub fn write_report<W: Write>(problems: &[Problem], sheet: &AnswerSheet, out: &mut W) -> io::Result<()> {
  writeln!(out, "\n******** Quiz Results ********")?;
  let width = problems.len().to_string().len();

  for (i, (problem, record)) in problems.iter().zip(sheet.records()).enumerate() {
    writeln!(out, "Problem #{:<width$}: {} =", i + 1, problem.question)?;
    writeln!(out, "Correct Answer: {}", problem.answer)?;
    writeln!(out, "  Given Answer: {}", record.given)?;
    writeln!(out, "Your Answer is: {}\n", record.verdict)?;
  }

  writeln!(out, "\nYou scored {} out of {}.\n", sheet.correct_count(), problems.len())?;
  out.flush()
}
