//! Input/output types for the sentiment engine (JSON contract with dashboard-api).

use serde::{Deserialize, Serialize};

/// Categorical polarity of a text sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
  Positive,
  Neutral,
  Negative,
}

impl Sentiment {
  /// +1 / 0 / -1, as used by heatmaps.
  pub fn polarity(self) -> i8 {
    match self {
      Self::Positive => 1,
      Self::Neutral => 0,
      Self::Negative => -1,
    }
  }
}

/// Six communication-style scores, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PersonalityTraits {
  pub helpfulness: f64,
  pub constructiveness: f64,
  pub professionalism: f64,
  pub empathy: f64,
  pub clarity: f64,
  pub encouragement: f64,
}

impl PersonalityTraits {
  pub fn values(&self) -> [f64; 6] {
    [
      self.helpfulness,
      self.constructiveness,
      self.professionalism,
      self.empathy,
      self.clarity,
      self.encouragement,
    ]
  }
}

/// Word-list membership counts for one text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WordCounts {
  pub positive: usize,
  pub negative: usize,
  pub neutral: usize,
  pub total: usize,
}

/// Output of the keyword strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
  pub sentiment: Sentiment,
  pub score: f64,
  pub confidence: f64,
  pub emotions: Vec<String>,
  pub personality: PersonalityTraits,
}

impl SentimentResult {
  pub fn neutral() -> Self {
    Self {
      sentiment: Sentiment::Neutral,
      score: 0.0,
      confidence: 0.0,
      emotions: Vec::new(),
      personality: PersonalityTraits::default(),
    }
  }
}

/// Five-tier bucket used by the lexicon strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
  VeryPositive,
  Positive,
  Neutral,
  Negative,
  VeryNegative,
}

/// Output of the lexicon strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconResult {
  pub tier: Tier,
  pub score: i32,
  pub comparative: f64,
  pub positive_words: Vec<String>,
  pub negative_words: Vec<String>,
  pub emoji_count: usize,
  pub token_count: usize,
}

/// Which scorer to run. The two produce different shapes and are never merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
  #[default]
  Keyword,
  Lexicon,
}

impl Strategy {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Keyword => "keyword",
      Self::Lexicon => "lexicon",
    }
  }
}

/// A scored text, tagged by the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum Analysis {
  Keyword(SentimentResult),
  Lexicon(LexiconResult),
}

/// Input: one JSON object on stdin.
#[derive(Debug, Deserialize)]
pub struct Input {
  pub texts: Vec<String>,
  #[serde(default)]
  pub strategy: Strategy,
}

/// Output: one JSON object on stdout.
#[derive(Debug, Serialize)]
pub struct Output {
  pub results: Vec<Analysis>,
  pub maintainer_personality: PersonalityTraits,
}
