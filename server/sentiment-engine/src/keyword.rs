//! Keyword strategy: fixed word-list membership counts.

use crate::emotion;
use crate::personality;
use crate::types::{Sentiment, SentimentResult, WordCounts};

const POSITIVE_WORDS: &[&str] = &[
  "great", "good", "excellent", "awesome", "amazing", "nice", "thanks", "thank", "appreciate",
  "love", "perfect", "helpful", "clean", "brilliant", "fantastic", "wonderful", "impressive",
  "solid", "happy", "glad", "lgtm", "approve", "approved", "elegant", "neat", "cool",
];

const NEGATIVE_WORDS: &[&str] = &[
  "bad", "wrong", "broken", "bug", "buggy", "error", "fail", "failed", "fails", "failing",
  "problem", "terrible", "awful", "poor", "ugly", "hate", "confusing", "messy", "slow", "crash",
  "crashes", "worse", "worst", "reject", "annoying", "useless", "regression",
];

const NEUTRAL_WORDS: &[&str] = &[
  "ok", "okay", "fine", "maybe", "change", "changes", "update", "consider", "suggest", "question",
  "note", "review", "check", "perhaps", "think", "could", "should", "might", "possibly", "wonder",
];

/// Lowercased word tokens; punctuation and whitespace separate words.
pub fn tokenize(text: &str) -> Vec<String> {
  text
    .split(|c: char| !(c.is_alphanumeric() || c == '\''))
    .map(|t| t.trim_matches('\'').to_lowercase())
    .filter(|t| !t.is_empty())
    .collect()
}

pub fn count_words(tokens: &[String]) -> WordCounts {
  let mut counts = WordCounts {
    total: tokens.len(),
    ..WordCounts::default()
  };
  for token in tokens {
    let t = token.as_str();
    if POSITIVE_WORDS.contains(&t) {
      counts.positive += 1;
    } else if NEGATIVE_WORDS.contains(&t) {
      counts.negative += 1;
    } else if NEUTRAL_WORDS.contains(&t) {
      counts.neutral += 1;
    }
  }
  counts
}

/// Score one text with the keyword strategy.
pub fn score(text: &str) -> SentimentResult {
  let tokens = tokenize(text);
  let counts = count_words(&tokens);
  if counts.total == 0 {
    return SentimentResult::neutral();
  }

  let total = counts.total as f64;
  let positive = counts.positive as f64 / total;
  let negative = counts.negative as f64 / total;
  let neutral = counts.neutral as f64 / total;

  let (sentiment, score, winning) = if positive > negative && positive > neutral {
    (Sentiment::Positive, positive, positive)
  } else if negative > positive && negative > neutral {
    (Sentiment::Negative, -negative, negative)
  } else {
    (Sentiment::Neutral, 0.0, neutral)
  };

  let confidence = if counts.total > 10 {
    (winning * 1.2).min(1.0)
  } else {
    winning
  };

  SentimentResult {
    sentiment,
    score,
    confidence,
    emotions: emotion::detect(text),
    personality: personality::extract(text),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn word_lists_are_disjoint() {
    for w in POSITIVE_WORDS {
      assert!(!NEGATIVE_WORDS.contains(w), "{} in positive and negative", w);
      assert!(!NEUTRAL_WORDS.contains(w), "{} in positive and neutral", w);
    }
    for w in NEGATIVE_WORDS {
      assert!(!NEUTRAL_WORDS.contains(w), "{} in negative and neutral", w);
    }
  }

  #[test]
  fn tokenize_splits_on_punctuation_and_lowercases() {
    assert_eq!(
      tokenize("LGTM! Nice,clean   fix."),
      vec!["lgtm", "nice", "clean", "fix"]
    );
    assert_eq!(tokenize("don't 'quote'"), vec!["don't", "quote"]);
    assert!(tokenize("  \n\t ").is_empty());
  }

  #[test]
  fn counts_never_exceed_total() {
    let samples = [
      "This is great work, thanks!",
      "broken broken broken",
      "maybe consider a different approach here, it could be slow",
      "🎉🎉",
      "",
    ];
    for s in samples {
      let c = count_words(&tokenize(s));
      assert!(c.positive + c.negative + c.neutral <= c.total, "{:?}", s);
    }
  }

  #[test]
  fn positive_comment() {
    let r = score("This is great work, thanks!");
    assert_eq!(r.sentiment, Sentiment::Positive);
    assert!(r.score > 0.0);
    assert!((r.score - 0.4).abs() < 1e-9);
    assert!((r.confidence - 0.4).abs() < 1e-9);
    assert!(r.personality.encouragement > 0.0);
    assert!(r.emotions.contains(&"gratitude".to_string()));
  }

  #[test]
  fn negative_comment_has_negative_score() {
    let r = score("This is broken and the tests fail");
    assert_eq!(r.sentiment, Sentiment::Negative);
    assert!(r.score < 0.0);
  }

  #[test]
  fn tie_is_neutral() {
    let r = score("good bad");
    assert_eq!(r.sentiment, Sentiment::Neutral);
    assert_eq!(r.score, 0.0);
  }

  #[test]
  fn empty_and_whitespace_are_neutral_zero() {
    for text in ["", "   ", "\n\t"] {
      let r = score(text);
      assert_eq!(r.sentiment, Sentiment::Neutral);
      assert_eq!(r.score, 0.0);
      assert_eq!(r.confidence, 0.0);
    }
  }

  #[test]
  fn long_text_confidence_is_boosted_and_capped() {
    // 12 tokens, all positive: 1.0 * 1.2 caps at 1.0.
    let r = score("great good nice awesome amazing perfect love clean solid neat cool glad");
    assert_eq!(r.sentiment, Sentiment::Positive);
    assert_eq!(r.confidence, 1.0);

    // 11 tokens, 4 positive: 4/11 * 1.2.
    let r = score("great good nice awesome and then we merge it into main");
    let expected = (4.0 / 11.0) * 1.2;
    assert!((r.confidence - expected).abs() < 1e-9);
  }

  #[test]
  fn confidence_always_in_unit_range() {
    let samples = [
      "great",
      "bad bad bad bad bad bad bad bad bad bad bad bad",
      "ok fine maybe",
      "the quick brown fox",
    ];
    for s in samples {
      let r = score(s);
      assert!((0.0..=1.0).contains(&r.confidence), "{:?}", s);
    }
  }
}
