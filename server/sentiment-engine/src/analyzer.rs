//! Strategy dispatch plus a bounded memoization cache.

use std::collections::HashMap;

use crate::keyword;
use crate::lexicon;
use crate::types::{Analysis, LexiconResult, SentimentResult, Strategy};

/// Run one strategy on one text (no caching).
pub fn analyze(strategy: Strategy, text: &str) -> Analysis {
  match strategy {
    Strategy::Keyword => Analysis::Keyword(keyword::score(text)),
    Strategy::Lexicon => Analysis::Lexicon(lexicon::score(text)),
  }
}

/// Cache key: blake3 over strategy + text.
pub fn cache_key(strategy: Strategy, text: &str) -> String {
  let mut hasher = blake3::Hasher::new();
  hasher.update(strategy.as_str().as_bytes());
  hasher.update(b"|");
  hasher.update(text.as_bytes());
  hasher.finalize().to_hex()[..32].to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
  pub hits: u64,
  pub misses: u64,
  pub entries: usize,
}

/// Memoizing analyzer with one map per strategy. The cache is best effort: when
/// the maps together reach capacity both are cleared, and results never depend on it.
#[derive(Debug)]
pub struct Analyzer {
  capacity: usize,
  keyword: HashMap<String, SentimentResult>,
  lexicon: HashMap<String, LexiconResult>,
  hits: u64,
  misses: u64,
}

impl Analyzer {
  pub fn new(capacity: usize) -> Self {
    Self {
      capacity,
      keyword: HashMap::new(),
      lexicon: HashMap::new(),
      hits: 0,
      misses: 0,
    }
  }

  fn len(&self) -> usize {
    self.keyword.len() + self.lexicon.len()
  }

  /// Whether a new entry may be stored, clearing both maps first when full.
  fn make_room(&mut self) -> bool {
    if self.capacity == 0 {
      return false;
    }
    if self.len() >= self.capacity {
      self.keyword.clear();
      self.lexicon.clear();
    }
    true
  }

  pub fn analyze(&mut self, strategy: Strategy, text: &str) -> Analysis {
    match strategy {
      Strategy::Keyword => Analysis::Keyword(self.score(text)),
      Strategy::Lexicon => Analysis::Lexicon(self.score_lexicon(text)),
    }
  }

  /// Keyword strategy.
  pub fn score(&mut self, text: &str) -> SentimentResult {
    let key = cache_key(Strategy::Keyword, text);
    if let Some(hit) = self.keyword.get(&key) {
      self.hits += 1;
      return hit.clone();
    }
    self.misses += 1;
    let result = keyword::score(text);
    if self.make_room() {
      self.keyword.insert(key, result.clone());
    }
    result
  }

  /// Lexicon strategy.
  pub fn score_lexicon(&mut self, text: &str) -> LexiconResult {
    let key = cache_key(Strategy::Lexicon, text);
    if let Some(hit) = self.lexicon.get(&key) {
      self.hits += 1;
      return hit.clone();
    }
    self.misses += 1;
    let result = lexicon::score(text);
    if self.make_room() {
      self.lexicon.insert(key, result.clone());
    }
    result
  }

  pub fn stats(&self) -> CacheStats {
    CacheStats {
      hits: self.hits,
      misses: self.misses,
      entries: self.len(),
    }
  }
}

impl Default for Analyzer {
  fn default() -> Self {
    Self::new(1024)
  }
}
