//! Timed pop quiz
//!
//! Exit codes:
//!   0  : every problem was answered before the timer
//!   1  : the timer elapsed first
//!   10 : the CSV file could not be opened
//!   11 : the CSV file could not be parsed
//!   12 : terminal I/O failed

use std::io::{self, BufReader};

use clap::Parser;
use tracing::{debug, error};

use gopher_drills::config::QuizArgs;
use gopher_drills::error::QuizError;
use gopher_drills::quiz::{load_problems, run_timed_quiz, shuffle_problems, SharedWriter};
use gopher_drills::telemetry;

#[tokio::main]
async fn main() {
  let args = QuizArgs::parse();
  telemetry::init_tracing(if args.debug { "debug" } else { "warn" });
  debug!(target: "quiz", csv = %args.csv.display(), seconds = args.seconds, randomize = args.randomize, "Parsed flags");

  let code = match run(&args).await {
    Ok(code) => code,
    Err(e) => {
      error!(target: "quiz", error = %e, "Quiz aborted");
      eprintln!("{e}");
      e.exit_code()
    }
  };
  // The collector may still be blocked on stdin; don't wait for it.
  std::process::exit(code);
}

async fn run(args: &QuizArgs) -> Result<i32, QuizError> {
  let mut problems = load_problems(&args.csv)?;
  if args.randomize {
    shuffle_problems(&mut problems, &mut rand::thread_rng());
  }
  debug!(target: "quiz", ?problems, "Problems ready");

  let input = BufReader::new(io::stdin());
  let status = run_timed_quiz(&problems, args.seconds, input, SharedWriter::new(io::stdout())).await?;
  Ok(status.exit_code())
}
