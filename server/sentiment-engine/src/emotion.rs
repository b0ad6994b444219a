//! Emotion tags derived from cue phrases in the text.

use std::collections::HashSet;

/// Emotion tags (lowercase, sorted, no duplicates).
pub fn detect(text: &str) -> Vec<String> {
  let t = text.to_lowercase();
  let mut tags = HashSet::new();

  if t.contains("thank") || t.contains("appreciate") || t.contains("grateful") {
    tags.insert("gratitude".to_string());
  }
  if t.contains("awesome")
    || t.contains("amazing")
    || t.contains("excited")
    || t.contains("love")
    || t.contains("!!")
    || t.contains("🎉")
  {
    tags.insert("excitement".to_string());
  }
  if t.contains("frustrat")
    || t.contains("annoying")
    || t.contains("again?")
    || t.contains("still broken")
  {
    tags.insert("frustration".to_string());
  }
  if t.contains("confus")
    || t.contains("unclear")
    || t.contains("not sure")
    || t.contains("don't understand")
    || t.contains("??")
  {
    tags.insert("confusion".to_string());
  }
  if t.contains("worried")
    || t.contains("concern")
    || t.contains("risk")
    || t.contains("careful")
    || t.contains("security")
  {
    tags.insert("concern".to_string());
  }

  let mut v: Vec<String> = tags.into_iter().collect();
  v.sort();
  v
}
