//! String similarity measures on a 0 to 100 scale.
//!
//! [`ratio`] is the normalized indel similarity: twice the length of the
//! longest common subsequence over the combined length. The other measures
//! are built on top of it.

use serde::{Deserialize, Serialize};

use super::tokenizer::token_set;

/// The measure a ranker scores candidates with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scorer {
  /// The better of [`token_set_ratio`] and [`partial_ratio`].
  #[default]
  Hybrid,
  /// Jaro-Winkler similarity of the whole strings. Forgiving of typos near
  /// the end of a word, unforgiving of reordered words.
  JaroWinkler,
}

impl Scorer {
  /// Scores `choice` against `query`. Both are expected to be normalized.
  pub fn score(self, query: &str, choice: &str) -> f64 {
    match self {
      Scorer::Hybrid => hybrid_ratio(query, choice),
      Scorer::JaroWinkler => strsim::jaro_winkler(query, choice) * 100.0,
    }
  }
}

/// Normalized indel similarity of two strings.
pub fn ratio(a: &str, b: &str) -> f64 {
  let a: Vec<char> = a.chars().collect();
  let b: Vec<char> = b.chars().collect();
  char_ratio(&a, &b)
}

fn char_ratio(a: &[char], b: &[char]) -> f64 {
  let total = a.len() + b.len();
  if total == 0 {
    return 100.0;
  }
  200.0 * lcs_len(a, b) as f64 / total as f64
}

/// Length of the longest common subsequence.
fn lcs_len(a: &[char], b: &[char]) -> usize {
  if a.is_empty() || b.is_empty() {
    return 0;
  }

  let mut prev = vec![0usize; b.len() + 1];
  let mut curr = vec![0usize; b.len() + 1];
  for &ca in a {
    for (j, &cb) in b.iter().enumerate() {
      curr[j + 1] = if ca == cb {
        prev[j] + 1
      } else {
        prev[j + 1].max(curr[j])
      };
    }
    std::mem::swap(&mut prev, &mut curr);
  }
  prev[b.len()]
}

/// Best [`ratio`] of the shorter string against any equally long window of
/// the longer one.
///
/// Windows hanging over either end of the longer string are tried as well,
/// so a query matching the start or end of a title is not penalised for the
/// missing overlap.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
  let a: Vec<char> = a.chars().collect();
  let b: Vec<char> = b.chars().collect();

  if a.is_empty() && b.is_empty() {
    return 100.0;
  }
  if a.is_empty() || b.is_empty() {
    return 0.0;
  }

  if a.len() == b.len() {
    return best_window(&a, &b).max(best_window(&b, &a));
  }
  if a.len() < b.len() {
    best_window(&a, &b)
  } else {
    best_window(&b, &a)
  }
}

fn best_window(short: &[char], long: &[char]) -> f64 {
  let m = short.len();
  let n = long.len();
  let mut best: f64 = 0.0;

  // Partial windows at the start, full windows, partial windows at the end.
  let windows = (1..m)
    .map(|k| &long[..k])
    .chain((0..=n - m).map(|i| &long[i..i + m]))
    .chain((n - m + 1..n).map(|i| &long[i..]));

  for window in windows {
    best = best.max(char_ratio(short, window));
    if best >= 100.0 {
      break;
    }
  }
  best
}

/// Similarity of the token sets of two strings.
///
/// Word order and repeated words do not matter. When one string's tokens are
/// all contained in the other's the score is 100; otherwise the shared tokens
/// are compared with each side's shared-plus-remaining tokens and the best
/// pairing wins.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
  let tokens_a = token_set(a);
  let tokens_b = token_set(b);
  if tokens_a.is_empty() || tokens_b.is_empty() {
    return 0.0;
  }

  let shared: Vec<&str> = tokens_a.intersection(&tokens_b).map(String::as_str).collect();
  let only_a: Vec<&str> = tokens_a.difference(&tokens_b).map(String::as_str).collect();
  let only_b: Vec<&str> = tokens_b.difference(&tokens_a).map(String::as_str).collect();

  if !shared.is_empty() && (only_a.is_empty() || only_b.is_empty()) {
    return 100.0;
  }

  let shared = shared.join(" ");
  let combined_a = join_nonempty(&shared, &only_a.join(" "));
  let combined_b = join_nonempty(&shared, &only_b.join(" "));

  let mut best = ratio(&combined_a, &combined_b);
  if !shared.is_empty() {
    best = best
      .max(ratio(&shared, &combined_a))
      .max(ratio(&shared, &combined_b));
  }
  best
}

fn join_nonempty(head: &str, tail: &str) -> String {
  match (head.is_empty(), tail.is_empty()) {
    (true, _) => tail.to_string(),
    (_, true) => head.to_string(),
    _ => format!("{head} {tail}"),
  }
}

/// The better of [`token_set_ratio`] and [`partial_ratio`].
pub fn hybrid_ratio(query: &str, choice: &str) -> f64 {
  token_set_ratio(query, choice).max(partial_ratio(query, choice))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
  }

  #[test]
  fn ratio_counts_common_subsequence() {
    assert!(approx(ratio("cool guy", "cool guy"), 100.0));
    assert!(approx(ratio("cool guy", "cxol guy"), 87.5));
    assert!(approx(ratio("", ""), 100.0));
    assert!(approx(ratio("abc", ""), 0.0));
  }

  #[test]
  fn partial_ratio_finds_best_window() {
    assert!(approx(partial_ratio("7700x", "amd ryzen 7 7700x"), 100.0));
    assert!(approx(partial_ratio("amd ryzen 7 7700x", "7700x"), 100.0));
    assert!(partial_ratio("rtx 4090", "geforce rtx 4080") >= 87.5);
    assert!(approx(partial_ratio("", "abc"), 0.0));
  }

  #[test]
  fn token_set_ignores_order_and_duplicates() {
    assert!(approx(token_set_ratio("guy cool", "cool guy cool"), 100.0));
    assert!(approx(token_set_ratio("really awesome cool guy", "cool guy"), 100.0));
    assert!(token_set_ratio("cool guy", "bad girl") < 50.0);
    assert!(approx(token_set_ratio("", "cool"), 0.0));
  }

  #[test]
  fn hybrid_takes_the_better_measure() {
    let query = "cool guy";
    assert!(approx(hybrid_ratio(query, "cool guy"), 100.0));
    let typo = hybrid_ratio(query, "cxol guy");
    assert!(typo >= 60.0 && typo < 100.0);
  }

  #[test]
  fn jaro_winkler_is_scaled() {
    assert!(approx(Scorer::JaroWinkler.score("ryzen", "ryzen"), 100.0));
    assert!(Scorer::JaroWinkler.score("ryzen", "ryzn") > 90.0);
  }
}
