//! One quiz run: the answer collector racing the countdown timer.
//!
//! Three threads of control take part:
//!   - the collector, on its own OS thread, prompts and blocks on input
//!   - the timer, a tokio task, sleeps then signals expiry
//!   - the coordination loop in `run_quiz`, the only writer of the sheet
//!
//! Whichever signal arrives first wins. When the timer wins, the collector is
//! abandoned where it stands; its blocked read is not interrupted and the
//! thread lives until the process exits.

use std::{
  io::{self, BufRead, Write},
  thread,
  time::Duration,
};

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, instrument, warn};

use crate::error::QuizError;
use crate::quiz::problem::{AnswerRecord, AnswerSheet, Problem};

/// Somewhere answers come from, one per call. `Ok(None)` means no more input.
pub trait AnswerSource {
  fn next_answer(&mut self) -> io::Result<Option<String>>;
}

/// Line-oriented answers from any buffered reader (stdin in the binary).
/// Bytes that are not valid UTF-8 are decoded lossily and graded as typed.
pub struct LineAnswers<R> {
  reader: R,
}

impl<R: BufRead> LineAnswers<R> {
  pub fn new(reader: R) -> Self { Self { reader } }
}

impl<R: BufRead> AnswerSource for LineAnswers<R> {
  fn next_answer(&mut self) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if self.reader.read_until(b'\n', &mut buf)? == 0 {
      return Ok(None);
    }
    let line = String::from_utf8_lossy(&buf);
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
  }
}

/// How the run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
  /// The collector ran out of problems (or input) before the timer.
  Finished,
  /// The timer fired first.
  TimedOut,
}

impl Completion {
  pub fn exit_code(self) -> i32 {
    match self {
      Completion::Finished => 0,
      Completion::TimedOut => 1,
    }
  }
}

#[derive(Clone, Debug)]
pub struct QuizOutcome {
  pub sheet: AnswerSheet,
  pub status: Completion,
}

/// Run one quiz against `source`, writing prompts to `prompt_out`.
///
/// The returned sheet always has `problems.len()` records. An empty problem
/// list finishes at once; a zero `limit` times out at once without prompting.
/// A failing read on `source` aborts the run with `QuizError::Io`.
#[instrument(level = "info", skip_all, fields(problems = problems.len(), limit_secs = limit.as_secs()))]
pub async fn run_quiz<S, W>(
  problems: &[Problem],
  limit: Duration,
  source: S,
  prompt_out: W,
) -> Result<QuizOutcome, QuizError>
where
  S: AnswerSource + Send + 'static,
  W: Write + Send + 'static,
{
  let mut sheet = AnswerSheet::unanswered(problems.len());

  if problems.is_empty() {
    info!(target: "quiz", "No problems loaded; nothing to ask");
    return Ok(QuizOutcome { sheet, status: Completion::Finished });
  }
  if limit.is_zero() {
    info!(target: "quiz", "Zero time limit; quiz over before it starts");
    return Ok(QuizOutcome { sheet, status: Completion::TimedOut });
  }

  let (answer_tx, mut answer_rx) = mpsc::channel::<io::Result<AnswerRecord>>(1);
  let (expired_tx, mut expired_rx) = oneshot::channel::<()>();

  tokio::spawn(countdown(limit, expired_tx));

  let owned = problems.to_vec();
  thread::Builder::new()
    .name("quiz-collector".into())
    .spawn(move || collect_answers(&owned, source, prompt_out, answer_tx))
    .map_err(QuizError::Collector)?;

  let status = loop {
    tokio::select! {
      received = answer_rx.recv() => match received {
        Some(Ok(record)) => {
          debug!(target: "quiz", index = sheet.answered(), verdict = %record.verdict, given = %record.given, "Answer received");
          sheet.fill_next(record);
        }
        Some(Err(e)) => {
          error!(target: "quiz", index = sheet.answered(), error = %e, "Reading an answer failed");
          return Err(QuizError::Io(e));
        }
        None => break Completion::Finished,
      },
      _ = &mut expired_rx => break Completion::TimedOut,
    }
  };

  info!(target: "quiz", ?status, answered = sheet.answered(), correct = sheet.correct_count(), total = sheet.len(), "Quiz run ended");
  Ok(QuizOutcome { sheet, status })
}

async fn countdown(limit: Duration, expired: oneshot::Sender<()>) {
  tokio::time::sleep(limit).await;
  debug!(target: "quiz", "Timer elapsed");
  // The run may already be over; nobody is listening then.
  let _ = expired.send(());
}

/// Collector body. Dropping `answers` on return is the completion signal; a
/// read error is forwarded and ends collection.
fn collect_answers<S, W>(problems: &[Problem], mut source: S, mut out: W, answers: mpsc::Sender<io::Result<AnswerRecord>>)
where
  S: AnswerSource,
  W: Write,
{
  let width = problems.len().to_string().len();

  for (i, problem) in problems.iter().enumerate() {
    if let Err(e) = writeln!(out, "Problem #{:<width$}: {} = ", i + 1, problem.question).and_then(|_| out.flush()) {
      warn!(target: "quiz", error = %e, "Writing prompt failed");
    }

    let given = match source.next_answer() {
      Ok(Some(given)) => given,
      Ok(None) => {
        info!(target: "quiz", asked = i, "Input closed before the last problem");
        return;
      }
      Err(e) => {
        let _ = answers.blocking_send(Err(e));
        return;
      }
    };

    if answers.blocking_send(Ok(AnswerRecord::grade(problem, given))).is_err() {
      // Coordination loop is gone: the timer won.
      return;
    }
  }
}
