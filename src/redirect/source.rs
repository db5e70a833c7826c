//! Redirect data sources: literal maps and YAML/JSON lists of `{path, url}`.
//!
//! Expected YAML:
//!
//! ```yaml
//! - path: /some-path
//!   url: https://www.some-url.com/demo
//! ```
//!
//! JSON is the same list: `[{"path": "/some-path", "url": "https://..."}]`.

use std::{collections::HashMap, fmt, path::Path};

use serde::Deserialize;
use tracing::debug;

use crate::error::RedirectError;

/// YAML served when no `--yaml` file is given.
pub const DEFAULT_YAML: &str = "
- path: /urlshort
  url: https://github.com/gophercises/urlshort
- path: /urlshort-final
  url: https://github.com/gophercises/urlshort/tree/solution
";

/// Built-in documentation redirects, consulted last.
pub fn builtin_redirects() -> HashMap<String, String> {
  HashMap::from([
    ("/urlshort-godoc".to_string(), "https://godoc.org/github.com/gophercises/urlshort".to_string()),
    ("/yaml-godoc".to_string(), "https://godoc.org/gopkg.in/yaml.v2".to_string()),
  ])
}

/// One redirect entry as it appears in YAML/JSON.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PathUrl {
  pub path: String,
  pub url: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceFormat {
  Yaml,
  Json,
}

impl fmt::Display for SourceFormat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SourceFormat::Yaml => f.write_str("yaml"),
      SourceFormat::Json => f.write_str("json"),
    }
  }
}

/// Decode `bytes` into the ordered list of entries.
pub fn parse_path_urls(format: SourceFormat, bytes: &[u8]) -> Result<Vec<PathUrl>, RedirectError> {
  let entries: Vec<PathUrl> = match format {
    SourceFormat::Yaml => serde_yaml::from_slice(bytes)?,
    SourceFormat::Json => serde_json::from_slice(bytes)?,
  };
  debug!(target: "urlshort", %format, entries = entries.len(), "Parsed redirect entries");
  Ok(entries)
}

/// Index entries by path; a later entry for the same path wins.
pub fn build_map<I>(entries: I) -> HashMap<String, String>
where
  I: IntoIterator<Item = PathUrl>,
{
  entries.into_iter().map(|e| (e.path, e.url)).collect()
}

/// Where one handler's mapping comes from.
#[derive(Clone, Debug)]
pub enum MappingSource {
  Literal(HashMap<String, String>),
  Yaml(Vec<u8>),
  Json(Vec<u8>),
}

impl MappingSource {
  /// Build the final path -> URL map; fails on malformed YAML/JSON.
  pub fn into_map(self) -> Result<HashMap<String, String>, RedirectError> {
    match self {
      MappingSource::Literal(map) => Ok(map),
      MappingSource::Yaml(bytes) => Ok(build_map(parse_path_urls(SourceFormat::Yaml, &bytes)?)),
      MappingSource::Json(bytes) => Ok(build_map(parse_path_urls(SourceFormat::Json, &bytes)?)),
    }
  }
}

/// Read an explicitly requested source file.
pub fn read_source_file(path: &Path) -> Result<Vec<u8>, RedirectError> {
  std::fs::read(path).map_err(|source| RedirectError::Read {
    path: path.to_path_buf(),
    source,
  })
}
