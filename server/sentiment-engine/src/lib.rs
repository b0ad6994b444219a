//! Maintainer Insights Sentiment Engine: keyword and lexicon scoring; no AI, no DB, no network.
//! Used by dashboard-api as a library and by the binary for stdin/stdout.

mod analyzer;
mod emotion;
mod keyword;
mod lexicon;
mod personality;
mod types;

pub use analyzer::{analyze, cache_key, Analyzer, CacheStats};
pub use keyword::{count_words, score, tokenize};
pub use lexicon::{is_emoji, score as score_lexicon, tier_for};
pub use personality::{extract as extract_personality, maintainer_personality};
pub use types::{
  Analysis, Input, LexiconResult, Output, PersonalityTraits, Sentiment, SentimentResult, Strategy,
  Tier, WordCounts,
};

/// Run the engine on parsed input and return the output (no I/O).
pub fn run(input: &Input) -> Output {
  let results: Vec<Analysis> = input
    .texts
    .iter()
    .map(|text| analyze(input.strategy, text))
    .collect();
  let traits: Vec<PersonalityTraits> = input
    .texts
    .iter()
    .map(|text| extract_personality(text))
    .collect();

  Output {
    results,
    maintainer_personality: maintainer_personality(&traits),
  }
}
