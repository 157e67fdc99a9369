//! Text tokenization utilities.

use std::collections::BTreeSet;

use unicode_segmentation::UnicodeSegmentation;

/// Tokenize text into lowercase words.
pub fn tokenize(text: &str) -> Vec<String> {
  text
    .unicode_words()
    .map(|word| word.to_lowercase())
    .collect()
}

/// The distinct tokens of a text, sorted.
pub fn token_set(text: &str) -> BTreeSet<String> {
  tokenize(text).into_iter().collect()
}

/// Lowercases and trims text before it is compared.
pub fn normalize(text: &str) -> String {
  text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_tokenize() {
    let text = "Ryzen 7 7700X, 8-Core Processor";
    let tokens = tokenize(text);
    assert_eq!(tokens, vec!["ryzen", "7", "7700x", "8", "core", "processor"]);
  }

  #[test]
  fn test_token_set() {
    let tokens = token_set("guy cool COOL guy");
    assert_eq!(tokens.into_iter().collect::<Vec<_>>(), vec!["cool", "guy"]);
  }
}
