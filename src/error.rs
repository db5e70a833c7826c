//! Error types for both programs.
//!
//! Library code returns these; only the binaries turn them into exit codes.

use std::path::PathBuf;

use thiserror::Error;

/// Exit code when the quiz CSV cannot be opened.
pub const EXIT_OPEN_FAILED: i32 = 10;
/// Exit code when the quiz CSV cannot be parsed.
pub const EXIT_PARSE_FAILED: i32 = 11;
/// Exit code when the terminal itself fails under the quiz.
pub const EXIT_IO_FAILED: i32 = 12;

/// Errors that can stop a quiz before grading.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The CSV file could not be opened.
    #[error("Failed to open the CSV file: {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the input.
    #[error("Failed to parse the provided CSV file: {0}")]
    Parse(#[from] csv::Error),

    /// A row did not have the `question,answer` shape.
    #[error("Failed to parse the provided CSV file: row {row} has {fields} field(s), expected 2")]
    BadRow { row: usize, fields: usize },

    /// The answer collector thread could not be started.
    #[error("Failed to start the answer collector: {0}")]
    Collector(#[source] std::io::Error),

    /// Reading or writing the terminal failed.
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl QuizError {
    /// Process exit code for this failure kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            QuizError::Open { .. } => EXIT_OPEN_FAILED,
            QuizError::Parse(_) | QuizError::BadRow { .. } => EXIT_PARSE_FAILED,
            QuizError::Collector(_) | QuizError::Io(_) => EXIT_IO_FAILED,
        }
    }
}

/// Errors that stop the redirect service from starting.
#[derive(Debug, Error)]
pub enum RedirectError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML redirect data: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid JSON redirect data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid service config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_kind() {
        let open = QuizError::Open {
            path: "missing.csv".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let row = QuizError::BadRow { row: 3, fields: 1 };
        let io = QuizError::Io(std::io::Error::from(std::io::ErrorKind::BrokenPipe));

        assert_eq!(open.exit_code(), EXIT_OPEN_FAILED);
        assert_eq!(row.exit_code(), EXIT_PARSE_FAILED);
        assert_eq!(io.exit_code(), EXIT_IO_FAILED);
        assert_ne!(open.exit_code(), row.exit_code());
    }

    #[test]
    fn open_error_names_the_file() {
        let err = QuizError::Open {
            path: "quiz/problems.csv".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(err.to_string(), "Failed to open the CSV file: quiz/problems.csv");
    }
}
