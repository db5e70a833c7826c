//! Command-line flags for both binaries and the optional TOML config of the
//! redirect service.
//!
//! See `QuizArgs`, `ShortenerArgs` and `ServiceConfig` for the accepted schema.

use std::{
  collections::HashMap,
  net::SocketAddr,
  path::{Path, PathBuf},
  time::Duration,
};

use clap::{ArgAction, Parser};
use serde::Deserialize;
use tracing::info;

use crate::error::RedirectError;
use crate::quiz::session::time_limit;
use crate::redirect::source::builtin_redirects;

/// Port used by the redirect service when PORT is unset or invalid.
pub const DEFAULT_PORT: u16 = 8080;

/// Timed pop quiz over a CSV of `question,answer` rows.
#[derive(Parser, Debug, Clone)]
#[command(name = "quiz")]
#[command(about = "Timed pop quiz over a CSV of question,answer rows")]
pub struct QuizArgs {
  /// A CSV file in the format of 'question,answer'
  #[arg(long, default_value = "problems.csv")]
  pub csv: PathBuf,

  /// Quiz timer duration in seconds (zero or less ends the quiz at once)
  #[arg(long, default_value_t = 30, allow_negative_numbers = true)]
  pub seconds: i64,

  /// Randomize the order of the quiz questions
  #[arg(long, default_value_t = false, num_args = 0..=1, default_missing_value = "true", action = ArgAction::Set)]
  pub randomize: bool,

  /// Emit debug events describing the quiz state (on stderr)
  #[arg(long, default_value_t = false, num_args = 0..=1, default_missing_value = "true", action = ArgAction::Set)]
  pub debug: bool,
}

impl QuizArgs {
  /// Timer length; negative seconds clamp to zero.
  pub fn time_limit(&self) -> Duration {
    time_limit(self.seconds)
  }
}

/// HTTP redirect service.
#[derive(Parser, Debug, Clone)]
#[command(name = "urlshort")]
#[command(about = "Redirect URL paths using YAML, JSON and built-in mappings")]
pub struct ShortenerArgs {
  /// A YAML file with 'path' and 'url' keys in an item list
  #[arg(long)]
  pub yaml: Option<PathBuf>,

  /// A JSON file with 'path' and 'url' keys in an item list
  #[arg(long)]
  pub json: Option<PathBuf>,
}

/// Redirect service settings accepted in TOML.
#[derive(Clone, Debug, Deserialize)]
pub struct ServiceConfig {
  /// Literal path -> URL map consulted last in the chain.
  #[serde(default = "builtin_redirects")]
  pub builtin: HashMap<String, String>,
}

impl Default for ServiceConfig {
  fn default() -> Self {
    Self { builtin: builtin_redirects() }
  }
}

/// Load `ServiceConfig` from a TOML file.
pub fn load_service_config(path: &Path) -> Result<ServiceConfig, RedirectError> {
  let raw = std::fs::read_to_string(path).map_err(|source| RedirectError::Read {
    path: path.to_path_buf(),
    source,
  })?;
  let cfg = toml::from_str::<ServiceConfig>(&raw).map_err(|source| RedirectError::Config {
    path: path.to_path_buf(),
    source,
  })?;
  info!(target: "urlshort", path = %path.display(), redirects = cfg.builtin.len(), "Loaded service config (TOML)");
  Ok(cfg)
}

/// Load from URLSHORT_CONFIG_PATH when set, defaults otherwise.
/// A path that was set but cannot be loaded is an error, never a silent default.
pub fn load_service_config_from_env() -> Result<ServiceConfig, RedirectError> {
  match std::env::var_os("URLSHORT_CONFIG_PATH") {
    Some(path) => load_service_config(Path::new(&path)),
    None => Ok(ServiceConfig::default()),
  }
}

/// Bind address for the given PORT value.
pub fn listen_addr(port: Option<&str>) -> SocketAddr {
  let port = port
    .and_then(|p| p.parse::<u16>().ok())
    .unwrap_or(DEFAULT_PORT);
  SocketAddr::from(([0, 0, 0, 0], port))
}
