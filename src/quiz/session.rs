//! The interactive quiz flow around one run: banner, start prompt, the timed
//! run itself, the timeout notice, the report and the closing line.

use std::{
  io::{self, BufRead, Write},
  sync::{Arc, Mutex, MutexGuard, PoisonError},
  time::Duration,
};

use tracing::debug;

use crate::error::QuizError;
use crate::quiz::problem::Problem;
use crate::quiz::report::write_report;
use crate::quiz::runner::{run_quiz, Completion, LineAnswers};

/// Console output shared by the collector's prompts and the session text.
#[derive(Debug, Default)]
pub struct SharedWriter<W>(Arc<Mutex<W>>);

impl<W> SharedWriter<W> {
  pub fn new(inner: W) -> Self { Self(Arc::new(Mutex::new(inner))) }

  /// Access the wrapped writer, e.g. to inspect a buffer after a run.
  pub fn lock(&self) -> MutexGuard<'_, W> {
    self.0.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl<W> Clone for SharedWriter<W> {
  fn clone(&self) -> Self { Self(Arc::clone(&self.0)) }
}

impl<W: Write> Write for SharedWriter<W> {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> { self.lock().write(buf) }

  fn flush(&mut self) -> io::Result<()> { self.lock().flush() }
}

/// Timer length for a `--seconds` value; zero or less means no time at all.
pub fn time_limit(seconds: i64) -> Duration {
  Duration::from_secs(u64::try_from(seconds).unwrap_or(0))
}

/// Run the whole console session: announce the timer as given by the user,
/// wait for Enter on `input`, race the quiz, then print the results.
pub async fn run_timed_quiz<R, W>(
  problems: &[Problem],
  seconds: i64,
  mut input: R,
  out: SharedWriter<W>,
) -> Result<Completion, QuizError>
where
  R: BufRead + Send + 'static,
  W: Write + Send + 'static,
{
  let mut console = out.clone();
  writeln!(console, "\n*** Timed Pop Quiz! ***")?;
  writeln!(console, "{seconds} seconds set for timer")?;
  writeln!(console, "Press 'Enter' to start quiz...\n")?;
  console.flush()?;
  let mut ready = Vec::new();
  input.read_until(b'\n', &mut ready)?;

  let outcome = run_quiz(problems, time_limit(seconds), LineAnswers::new(input), out).await?;

  if outcome.status == Completion::TimedOut {
    writeln!(console, "\n *** Timer has elapsed! Pencils DOWN!! ***")?;
  }
  debug!(target: "quiz", answers = ?outcome.sheet.records(), "Final answer sheet");

  write_report(problems, &outcome.sheet, &mut console)?;
  writeln!(console, "Quiz is done!")?;
  console.flush()?;
  Ok(outcome.status)
}
