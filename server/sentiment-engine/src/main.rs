//! Binary entrypoint: score stdin, write one JSON object to stdout.
//!
//! By default stdin holds an `Input` (`{"texts": [...], "strategy": "keyword" | "lexicon"}`)
//! and stdout gets an `Output`. With `--raw`, all of stdin is one document and stdout gets
//! its `Analysis`; `--strategy lexicon` picks the scorer in that mode.

use sentiment_engine::{analyze, run, Input, Strategy};
use std::io::{self, Read, Write};

struct Args {
  raw: bool,
  strategy: Strategy,
}

fn parse_args() -> Result<Args, String> {
  let mut args = Args {
    raw: false,
    strategy: Strategy::default(),
  };
  let mut iter = std::env::args().skip(1);
  while let Some(arg) = iter.next() {
    match arg.as_str() {
      "--raw" => args.raw = true,
      "--strategy" => {
        args.strategy = match iter.next().as_deref() {
          Some("keyword") => Strategy::Keyword,
          Some("lexicon") => Strategy::Lexicon,
          other => return Err(format!("--strategy expects keyword|lexicon, got {:?}", other)),
        }
      }
      other => return Err(format!("unknown argument {}", other)),
    }
  }
  Ok(args)
}

fn main() {
  if let Err(e) = run_binary() {
    let _ = writeln!(io::stderr(), "sentiment-engine error: {}", e);
    std::process::exit(1);
  }
}

fn run_binary() -> Result<(), Box<dyn std::error::Error>> {
  let args = parse_args()?;
  let mut raw = String::new();
  io::stdin().lock().read_to_string(&mut raw)?;

  let json = if args.raw {
    serde_json::to_vec(&analyze(args.strategy, &raw))?
  } else {
    let input: Input = serde_json::from_str(&raw)?;
    serde_json::to_vec(&run(&input))?
  };
  io::stdout().write_all(&json)?;
  Ok(())
}
