//! Personality trait extraction: keyword presence density per trait.

use crate::types::PersonalityTraits;

const HELPFULNESS: &[&str] = &[
  "help", "suggest", "try", "consider", "recommend", "example", "here's", "you can", "let me",
  "happy to",
];
const CONSTRUCTIVENESS: &[&str] = &[
  "instead", "improve", "alternative", "better", "refactor", "simplify", "what if", "option",
  "approach", "could we",
];
const PROFESSIONALISM: &[&str] = &[
  "please", "thank", "review", "documentation", "test", "standard", "convention", "guideline",
  "consistent", "changelog",
];
const EMPATHY: &[&str] = &[
  "understand", "sorry", "appreciate", "no worries", "feel", "totally", "happens", "don't worry",
  "hope", "glad",
];
const CLARITY: &[&str] = &[
  "specifically", "for example", "e.g.", "because", "step", "first", "then", "clarify", "exactly",
  "means",
];
const ENCOURAGEMENT: &[&str] = &[
  "great", "awesome", "nice", "well done", "keep", "thanks", "good job", "excellent", "love",
  "amazing",
];

/// Fraction of `keywords` present in `text` (already lowercased), clamped to [0, 1].
/// A keyword counts once no matter how often it appears.
fn density(text: &str, keywords: &[&str]) -> f64 {
  if keywords.is_empty() {
    return 0.0;
  }
  let matches = keywords.iter().filter(|k| text.contains(*k)).count();
  (matches as f64 / keywords.len() as f64).clamp(0.0, 1.0)
}

/// Extract the six traits from one text.
pub fn extract(text: &str) -> PersonalityTraits {
  let t = text.to_lowercase();
  PersonalityTraits {
    helpfulness: density(&t, HELPFULNESS),
    constructiveness: density(&t, CONSTRUCTIVENESS),
    professionalism: density(&t, PROFESSIONALISM),
    empathy: density(&t, EMPATHY),
    clarity: density(&t, CLARITY),
    encouragement: density(&t, ENCOURAGEMENT),
  }
}

/// Per-trait mean across many samples (all zeros for no samples).
pub fn maintainer_personality(samples: &[PersonalityTraits]) -> PersonalityTraits {
  if samples.is_empty() {
    return PersonalityTraits::default();
  }
  let n = samples.len() as f64;
  let mut sum = PersonalityTraits::default();
  for s in samples {
    sum.helpfulness += s.helpfulness;
    sum.constructiveness += s.constructiveness;
    sum.professionalism += s.professionalism;
    sum.empathy += s.empathy;
    sum.clarity += s.clarity;
    sum.encouragement += s.encouragement;
  }
  PersonalityTraits {
    helpfulness: sum.helpfulness / n,
    constructiveness: sum.constructiveness / n,
    professionalism: sum.professionalism / n,
    empathy: sum.empathy / n,
    clarity: sum.clarity / n,
    encouragement: sum.encouragement / n,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn encouragement_counts_presence_not_frequency() {
    let once = extract("great");
    let many = extract("great great great great");
    assert_eq!(once.encouragement, many.encouragement);
    assert!((once.encouragement - 0.1).abs() < 1e-9);
  }

  #[test]
  fn matching_is_case_insensitive_substring() {
    let t = extract("PLEASE add a Test and update the Documentation");
    assert!((t.professionalism - 0.3).abs() < 1e-9);
  }

  #[test]
  fn traits_stay_in_unit_range() {
    let everything = [
      HELPFULNESS,
      CONSTRUCTIVENESS,
      PROFESSIONALISM,
      EMPATHY,
      CLARITY,
      ENCOURAGEMENT,
    ]
    .concat()
    .join(" ");
    let t = extract(&everything);
    for v in t.values() {
      assert!((0.0..=1.0).contains(&v));
    }
    assert_eq!(t.encouragement, 1.0);
  }

  #[test]
  fn maintainer_personality_is_mean() {
    let a = PersonalityTraits {
      helpfulness: 0.2,
      empathy: 1.0,
      ..Default::default()
    };
    let b = PersonalityTraits {
      helpfulness: 0.4,
      ..Default::default()
    };
    let m = maintainer_personality(&[a, b]);
    assert!((m.helpfulness - 0.3).abs() < 1e-9);
    assert!((m.empathy - 0.5).abs() < 1e-9);
    assert_eq!(m.clarity, 0.0);
  }

  #[test]
  fn maintainer_personality_of_nothing_is_zero() {
    assert_eq!(maintainer_personality(&[]), PersonalityTraits::default());
  }
}
