//! Ordered chain of redirect handlers.
//!
//! Each handler either knows the exact request path or passes; the chain
//! tries them in order and the first hit wins. A miss everywhere is a normal
//! fallthrough to the default response, not an error.

use std::collections::HashMap;

use tracing::{info, instrument};

use crate::error::RedirectError;
use crate::redirect::source::MappingSource;

/// Attempt a lookup; `None` delegates to the next handler.
pub trait RedirectHandler: Send + Sync {
  fn name(&self) -> &str;
  fn lookup(&self, path: &str) -> Option<&str>;
}

/// Exact-path lookup over a map built once at startup.
#[derive(Clone, Debug)]
pub struct MapHandler {
  name: String,
  mapping: HashMap<String, String>,
}

impl MapHandler {
  pub fn new(name: impl Into<String>, mapping: HashMap<String, String>) -> Self {
    Self { name: name.into(), mapping }
  }

  pub fn from_source(name: impl Into<String>, source: MappingSource) -> Result<Self, RedirectError> {
    Ok(Self::new(name, source.into_map()?))
  }

  pub fn len(&self) -> usize { self.mapping.len() }

  pub fn is_empty(&self) -> bool { self.mapping.is_empty() }
}

impl RedirectHandler for MapHandler {
  fn name(&self) -> &str { &self.name }

  fn lookup(&self, path: &str) -> Option<&str> {
    self.mapping.get(path).map(String::as_str)
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution<'a> {
  Redirect { handler: &'a str, url: &'a str },
  Fallthrough,
}

#[derive(Default)]
pub struct RedirectChain {
  handlers: Vec<Box<dyn RedirectHandler>>,
}

impl RedirectChain {
  pub fn new() -> Self { Self::default() }

  /// Append a handler; it is consulted after every handler already present.
  pub fn with<H: RedirectHandler + 'static>(mut self, handler: H) -> Self {
    self.handlers.push(Box::new(handler));
    self
  }

  /// JSON, then YAML, then the literal map. Any decode failure aborts the
  /// whole build.
  #[instrument(level = "info", skip_all)]
  pub fn standard(json: MappingSource, yaml: MappingSource, literal: MappingSource) -> Result<Self, RedirectError> {
    let json = MapHandler::from_source("json", json)?;
    info!(target: "urlshort", redirects = json.len(), "JSON handler initialized");
    let yaml = MapHandler::from_source("yaml", yaml)?;
    info!(target: "urlshort", redirects = yaml.len(), "YAML handler initialized");
    let literal = MapHandler::from_source("builtin", literal)?;
    info!(target: "urlshort", redirects = literal.len(), "Built-in map handler initialized");

    Ok(Self::new().with(json).with(yaml).with(literal))
  }

  pub fn len(&self) -> usize { self.handlers.len() }

  pub fn is_empty(&self) -> bool { self.handlers.is_empty() }

  pub fn resolve(&self, path: &str) -> Resolution<'_> {
    self.handlers
      .iter()
      .find_map(|h| h.lookup(path).map(|url| Resolution::Redirect { handler: h.name(), url }))
      .unwrap_or(Resolution::Fallthrough)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::redirect::source::{builtin_redirects, DEFAULT_YAML};

  fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(p, u)| (p.to_string(), u.to_string())).collect()
  }

  #[test]
  fn earlier_handler_wins() {
    let chain = RedirectChain::new()
      .with(MapHandler::new("first", map(&[("/x", "https://first.example")])))
      .with(MapHandler::new("second", map(&[("/x", "https://second.example"), ("/y", "https://y.example")])));

    assert_eq!(chain.resolve("/x"), Resolution::Redirect { handler: "first", url: "https://first.example" });
    assert_eq!(chain.resolve("/y"), Resolution::Redirect { handler: "second", url: "https://y.example" });
    assert_eq!(chain.resolve("/z"), Resolution::Fallthrough);
  }

  #[test]
  fn lookup_is_exact_path_only() {
    let chain = RedirectChain::new().with(MapHandler::new("m", map(&[("/docs", "https://docs.example")])));
    assert_eq!(chain.resolve("/docs/"), Resolution::Fallthrough);
    assert_eq!(chain.resolve("/docs/more"), Resolution::Fallthrough);
    assert_eq!(chain.resolve("/Docs"), Resolution::Fallthrough);
  }

  #[test]
  fn empty_chain_always_falls_through() {
    let chain = RedirectChain::new();
    assert!(chain.is_empty());
    assert_eq!(chain.resolve("/"), Resolution::Fallthrough);
  }

  #[test]
  fn standard_chain_orders_json_yaml_builtin() {
    let json = MappingSource::Json(br#"[{"path": "/urlshort", "url": "https://json.example"}, {"path": "/only-json", "url": "https://j.example"}]"#.to_vec());
    let yaml = MappingSource::Yaml(DEFAULT_YAML.as_bytes().to_vec());
    let chain = RedirectChain::standard(json, yaml, MappingSource::Literal(builtin_redirects())).unwrap();

    assert_eq!(chain.len(), 3);
    assert_eq!(chain.resolve("/urlshort"), Resolution::Redirect { handler: "json", url: "https://json.example" });
    assert_eq!(chain.resolve("/only-json"), Resolution::Redirect { handler: "json", url: "https://j.example" });
    assert!(matches!(chain.resolve("/urlshort-final"), Resolution::Redirect { handler: "yaml", .. }));
    assert!(matches!(chain.resolve("/yaml-godoc"), Resolution::Redirect { handler: "builtin", .. }));
  }

  #[test]
  fn standard_chain_refuses_bad_sources() {
    let built = RedirectChain::standard(
      MappingSource::Literal(HashMap::new()),
      MappingSource::Yaml(b"::: not yaml [".to_vec()),
      MappingSource::Literal(builtin_redirects()),
    );
    assert!(built.is_err());
  }
}
