//! Loading problems from CSV and optional shuffling.

use std::{fs::File, io::Read, path::Path};

use rand::{seq::SliceRandom, Rng};
use tracing::{debug, info, instrument};

use crate::error::QuizError;
use crate::quiz::problem::Problem;

/// Open and parse a `question,answer` CSV file (no header row).
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn load_problems(path: &Path) -> Result<Vec<Problem>, QuizError> {
  let file = File::open(path).map_err(|source| QuizError::Open {
    path: path.to_path_buf(),
    source,
  })?;
  let problems = parse_problems(file)?;
  info!(target: "quiz", path = %path.display(), count = problems.len(), "Loaded quiz problems");
  Ok(problems)
}

/// Parse CSV rows into problems. Every row must have exactly two fields;
/// text is kept verbatim.
pub fn parse_problems<R: Read>(input: R) -> Result<Vec<Problem>, QuizError> {
  let mut reader = csv::ReaderBuilder::new()
    .has_headers(false)
    .from_reader(input);

  let mut problems = Vec::new();
  for (idx, row) in reader.records().enumerate() {
    let row = row?;
    if row.len() != 2 {
      return Err(QuizError::BadRow { row: idx + 1, fields: row.len() });
    }
    problems.push(Problem::new(&row[0], &row[1]));
  }
  Ok(problems)
}

/// Uniform in-place shuffle.
pub fn shuffle_problems<R: Rng + ?Sized>(problems: &mut [Problem], rng: &mut R) {
  problems.shuffle(rng);
  debug!(target: "quiz", count = problems.len(), "Shuffled quiz problems");
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::{rngs::StdRng, SeedableRng};
  use std::io::Write;

  #[test]
  fn parses_rows_in_order() {
    let problems = parse_problems("5+5,10\n1+1,2\n\"what, exactly\",yes\n".as_bytes()).unwrap();
    assert_eq!(
      problems,
      vec![
        Problem::new("5+5", "10"),
        Problem::new("1+1", "2"),
        Problem::new("what, exactly", "yes"),
      ]
    );
  }

  #[test]
  fn empty_input_yields_no_problems() {
    assert!(parse_problems("".as_bytes()).unwrap().is_empty());
  }

  #[test]
  fn single_field_rows_are_rejected() {
    let err = parse_problems("just a question\n".as_bytes()).unwrap_err();
    assert!(matches!(err, QuizError::BadRow { row: 1, fields: 1 }));
    assert_eq!(err.exit_code(), crate::error::EXIT_PARSE_FAILED);
  }

  #[test]
  fn ragged_rows_are_a_parse_failure() {
    let err = parse_problems("1+1,2\n2+2,4,extra\n".as_bytes()).unwrap_err();
    assert_eq!(err.exit_code(), crate::error::EXIT_PARSE_FAILED);
  }

  #[test]
  fn missing_file_is_an_open_failure() {
    let err = load_problems(Path::new("/no/such/problems.csv")).unwrap_err();
    assert!(matches!(err, QuizError::Open { .. }));
    assert_eq!(err.exit_code(), crate::error::EXIT_OPEN_FAILED);
  }

  #[test]
  fn loads_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "2+2,4\n3+3,6\n").unwrap();
    let problems = load_problems(file.path()).unwrap();
    assert_eq!(problems.len(), 2);
    assert_eq!(problems[1], Problem::new("3+3", "6"));
  }

  #[test]
  fn shuffle_keeps_every_problem_exactly_once() {
    let original: Vec<Problem> = (0..12)
      .map(|i| Problem::new(format!("{i}+1"), (i + 1).to_string()))
      .collect();
    let mut shuffled = original.clone();
    let mut rng = StdRng::seed_from_u64(7);
    shuffle_problems(&mut shuffled, &mut rng);

    assert_eq!(shuffled.len(), original.len());
    assert_ne!(shuffled, original);
    let mut a = original.clone();
    let mut b = shuffled.clone();
    a.sort_by(|x, y| x.question.cmp(&y.question));
    b.sort_by(|x, y| x.question.cmp(&y.question));
    assert_eq!(a, b);
  }

  #[test]
  fn shuffle_of_empty_slice_is_a_no_op() {
    let mut empty: Vec<Problem> = Vec::new();
    shuffle_problems(&mut empty, &mut StdRng::seed_from_u64(1));
    assert!(empty.is_empty());
  }
}
