//! Lexicon strategy: AFINN-style word valences, comparative score, five tiers, emoji counts.

use crate::keyword::tokenize;
use crate::types::{LexiconResult, Tier};

/// Word valences in -5..=5.
const LEXICON: &[(&str, i32)] = &[
  ("amazing", 4),
  ("awesome", 4),
  ("brilliant", 4),
  ("fantastic", 4),
  ("outstanding", 5),
  ("superb", 5),
  ("excellent", 3),
  ("great", 3),
  ("good", 3),
  ("happy", 3),
  ("love", 3),
  ("nice", 3),
  ("perfect", 3),
  ("glad", 3),
  ("wonderful", 4),
  ("impressive", 3),
  ("thanks", 2),
  ("thank", 2),
  ("appreciate", 2),
  ("helpful", 2),
  ("clean", 2),
  ("elegant", 2),
  ("solid", 2),
  ("fine", 2),
  ("cool", 1),
  ("like", 2),
  ("interesting", 2),
  ("fix", 1),
  ("fixed", 2),
  ("works", 1),
  ("bad", -3),
  ("terrible", -3),
  ("awful", -3),
  ("horrible", -3),
  ("hate", -3),
  ("ugly", -3),
  ("worst", -3),
  ("worse", -3),
  ("stupid", -2),
  ("useless", -2),
  ("annoying", -2),
  ("confusing", -2),
  ("disappointed", -2),
  ("frustrating", -2),
  ("sad", -2),
  ("wrong", -2),
  ("problem", -2),
  ("error", -2),
  ("fail", -2),
  ("failed", -2),
  ("fails", -2),
  ("crash", -2),
  ("bug", -2),
  ("slow", -2),
  ("broken", -1),
  ("issue", -1),
  ("messy", -2),
  ("reject", -1),
  ("disaster", -4),
  ("catastrophic", -4),
];

fn valence(word: &str) -> Option<i32> {
  LEXICON.iter().find(|(w, _)| *w == word).map(|(_, v)| *v)
}

/// True for code points in the common emoji blocks.
pub fn is_emoji(c: char) -> bool {
  matches!(
    c as u32,
    0x1F300..=0x1FAFF | 0x2600..=0x27BF | 0x1F1E6..=0x1F1FF
  )
}

pub fn tier_for(comparative: f64) -> Tier {
  if comparative > 0.5 {
    Tier::VeryPositive
  } else if comparative > 0.1 {
    Tier::Positive
  } else if comparative >= -0.1 {
    Tier::Neutral
  } else if comparative >= -0.5 {
    Tier::Negative
  } else {
    Tier::VeryNegative
  }
}

/// Score one text with the lexicon strategy.
pub fn score(text: &str) -> LexiconResult {
  let tokens = tokenize(text);
  let mut total = 0;
  let mut positive_words = Vec::new();
  let mut negative_words = Vec::new();

  for token in &tokens {
    if let Some(v) = valence(token) {
      total += v;
      if v > 0 {
        positive_words.push(token.clone());
      } else if v < 0 {
        negative_words.push(token.clone());
      }
    }
  }

  let comparative = if tokens.is_empty() {
    0.0
  } else {
    total as f64 / tokens.len() as f64
  };

  LexiconResult {
    tier: tier_for(comparative),
    score: total,
    comparative,
    positive_words,
    negative_words,
    emoji_count: text.chars().filter(|c| is_emoji(*c)).count(),
    token_count: tokens.len(),
  }
}
