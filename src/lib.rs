//! Gopher drills · two small programs sharing one crate
//!
//! - `quiz`: timed terminal quiz over a CSV of question/answer pairs
//! - `urlshort`: HTTP redirect service backed by JSON, YAML and built-in maps
//!
//! Important env variables:
//!   LOG_LEVEL            : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT           : "pretty" (default) or "json"
//!   PORT                 : u16 for `urlshort` (default 8080)
//!   URLSHORT_CONFIG_PATH : TOML file replacing the built-in redirect map

pub mod config;
pub mod error;
pub mod quiz;
pub mod redirect;
pub mod telemetry;
