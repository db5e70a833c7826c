//! Redirect service
//!
//! Chain: `--json` file -> `--yaml` file (or the built-in YAML) -> built-in
//! map (or `[builtin]` from URLSHORT_CONFIG_PATH) -> "Hello, world!".
//! Listens on 0.0.0.0:$PORT (default 8080).

use std::{collections::HashMap, sync::Arc};

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use gopher_drills::config::{listen_addr, load_service_config_from_env, ShortenerArgs};
use gopher_drills::redirect::source::DEFAULT_YAML;
use gopher_drills::redirect::{build_router, read_source_file, MappingSource, RedirectChain};
use gopher_drills::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing("info,urlshort=debug,tower_http=info");
  let args = ShortenerArgs::parse();
  let cfg = load_service_config_from_env()?;

  let json = match &args.json {
    Some(path) => {
      let bytes = read_source_file(path)?;
      info!(target: "urlshort", path = %path.display(), "Loaded JSON file");
      MappingSource::Json(bytes)
    }
    None => MappingSource::Literal(HashMap::new()),
  };

  let yaml = match &args.yaml {
    Some(path) => {
      let bytes = read_source_file(path)?;
      info!(target: "urlshort", path = %path.display(), "Loaded YAML file");
      MappingSource::Yaml(bytes)
    }
    None => {
      info!(target: "urlshort", "Loaded built-in YAML");
      MappingSource::Yaml(DEFAULT_YAML.as_bytes().to_vec())
    }
  };

  // Built once; never rebuilt per request.
  let chain = RedirectChain::standard(json, yaml, MappingSource::Literal(cfg.builtin))?;
  let app = build_router(Arc::new(chain));

  let addr = listen_addr(std::env::var("PORT").ok().as_deref());
  let listener = TcpListener::bind(addr).await?;
  info!(target: "urlshort", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "urlshort", "HTTP server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "urlshort", error = %e, "Failed to listen for Ctrl+C");
    std::future::pending::<()>().await;
  }
}
