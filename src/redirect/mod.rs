//! Redirect service: path -> URL sources, the handler chain, and the HTTP router.

pub mod chain;
pub mod routes;
pub mod source;

pub use chain::{MapHandler, RedirectChain, RedirectHandler, Resolution};
pub use routes::{build_router, DEFAULT_BODY};
pub use source::{build_map, parse_path_urls, read_source_file, MappingSource, PathUrl, SourceFormat};
