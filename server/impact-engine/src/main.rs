//! Binary entrypoint: read JSON lines from stdin, write JSON lines to stdout.
//!
//! Each input line is a Request (`{"op": "trends" | "daily" | "heatmap" | "impact" |
//! "health_improvement", ...}`) and produces exactly one output line: the Response, or an
//! ErrorOutput when parsing or validation fails. `--config <file>` loads engine tunables
//! from JSON; an invalid config exits before any input is read.

use impact_engine::types::ErrorOutput;
use impact_engine::{Config, Engine, EngineError, Request};
use std::io::{self, BufRead, Write};

fn load_engine() -> Result<Engine, EngineError> {
  let mut args = std::env::args().skip(1);
  match (args.next().as_deref(), args.next()) {
    (None, _) => Ok(Engine::with_defaults()),
    (Some("--config"), Some(path)) => {
      let raw = std::fs::read_to_string(&path)
        .map_err(|e| EngineError::config(format!("{}: {}", path, e)))?;
      let config: Config = serde_json::from_str(&raw)?;
      Engine::new(config)
    }
    _ => Err(EngineError::config("usage: impact-engine [--config <file>]")),
  }
}

/// One output line for one input line.
fn respond(engine: &Engine, line: &str) -> Result<String, serde_json::Error> {
  let request: Request = match serde_json::from_str(line) {
    Ok(v) => v,
    Err(e) => return serde_json::to_string(&ErrorOutput::new(format!("json parse: {}", e))),
  };
  match engine.handle(&request) {
    Ok(response) => serde_json::to_string(&response),
    Err(EngineError::Validation { field, reason }) => {
      serde_json::to_string(&ErrorOutput::new(reason).with_field(field))
    }
    Err(e) => serde_json::to_string(&ErrorOutput::new(e.to_string())),
  }
}

fn main() {
  let engine = match load_engine() {
    Ok(e) => e,
    Err(e) => {
      let _ = writeln!(io::stderr(), "impact-engine: {}", e);
      std::process::exit(2);
    }
  };

  let stdin = io::stdin();
  let mut out = io::BufWriter::new(io::stdout().lock());
  for line in stdin.lock().lines() {
    let line = match line {
      Ok(l) => l,
      Err(e) => {
        let _ = writeln!(io::stderr(), "impact-engine: read error: {}", e);
        std::process::exit(1);
      }
    };
    let trimmed = line.trim();
    if trimmed.is_empty() {
      continue;
    }
    match respond(&engine, trimmed) {
      Ok(json) => {
        let _ = writeln!(out, "{}", json);
      }
      Err(e) => {
        let _ = writeln!(io::stderr(), "impact-engine: encode error: {}", e);
      }
    }
  }
  let _ = out.flush();
}
