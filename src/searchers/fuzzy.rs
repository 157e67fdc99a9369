//! Fuzzy ranking of records by one text field.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use super::similarity::Scorer;
use super::tokenizer::normalize;
use crate::types::FieldAccess;

/// Number of results a ranker returns unless told otherwise.
pub const DEFAULT_LIMIT: usize = 30;

/// Longest query, in characters, a ranker scores with unless told otherwise.
/// Longer queries are cut to this length after normalization.
pub const DEFAULT_MAX_QUERY_CHARS: usize = 64;

/// A candidate that scored at or above the cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedMatch {
  /// Position of the candidate in the input.
  pub index: usize,
  /// Similarity to the query, 0 to 100.
  pub score: f64,
}

/// Reorders records by how closely a text field matches a query.
///
/// An absent or blank query leaves the input untouched. Otherwise every
/// candidate is scored with the configured [`Scorer`], candidates below the
/// cutoff are dropped and the best [`limit`](Self::with_limit) are returned in
/// descending score order. Equal scores keep their input order.
///
/// Normalized queries longer than
/// [`max_query_chars`](Self::with_max_query_chars) are cut to that length
/// before scoring.
///
/// # Example
///
/// ```rust
/// use partsbin::searchers::FuzzyRanker;
///
/// let titles = vec!["COOL GUY".to_string(), "bad girl".to_string()];
/// let matches = FuzzyRanker::new(60.0).matches("cxol guy", &titles);
/// assert_eq!(matches.len(), 1);
/// assert_eq!(matches[0].index, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyRanker {
  limit: usize,
  cutoff: f64,
  scorer: Scorer,
  max_query_chars: usize,
}

impl Default for FuzzyRanker {
  fn default() -> Self {
    Self::new(0.0)
  }
}

impl FuzzyRanker {
  /// Creates a ranker keeping candidates that score at least `cutoff`.
  pub fn new(cutoff: f64) -> Self {
    Self {
      limit: DEFAULT_LIMIT,
      cutoff,
      scorer: Scorer::default(),
      max_query_chars: DEFAULT_MAX_QUERY_CHARS,
    }
  }

  pub fn with_limit(mut self, limit: usize) -> Self {
    self.limit = limit;
    self
  }

  pub fn with_scorer(mut self, scorer: Scorer) -> Self {
    self.scorer = scorer;
    self
  }

  pub fn with_max_query_chars(mut self, max: usize) -> Self {
    self.max_query_chars = max;
    self
  }

  pub fn cutoff(&self) -> f64 {
    self.cutoff
  }

  pub fn limit(&self) -> usize {
    self.limit
  }

  pub fn max_query_chars(&self) -> usize {
    self.max_query_chars
  }

  /// Scores `choices` against `query` and returns the best matches.
  pub fn matches(&self, query: &str, choices: &[String]) -> Vec<RankedMatch> {
    if choices.is_empty() {
      return Vec::new();
    }
    let query = self.prepare_query(query);

    #[cfg(feature = "parallel")]
    let mut results: Vec<RankedMatch> = choices
      .par_iter()
      .enumerate()
      .filter_map(|(index, choice)| self.score(&query, index, choice))
      .collect();

    #[cfg(not(feature = "parallel"))]
    let mut results: Vec<RankedMatch> = choices
      .iter()
      .enumerate()
      .filter_map(|(index, choice)| self.score(&query, index, choice))
      .collect();

    self.sort_results(&mut results);
    results.truncate(self.limit);
    results
  }

  /// Reorders `items` by how well their `field` matches `query`.
  ///
  /// Records without a text value for `field` are scored against the empty
  /// string.
  pub fn rank<T: FieldAccess>(&self, items: Vec<T>, query: Option<&str>, field: &str) -> Vec<T> {
    let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) else {
      return items;
    };
    if items.is_empty() {
      return items;
    }

    let texts: Vec<String> = items
      .iter()
      .map(|item| {
        item
          .field(field)
          .and_then(|value| value.as_text())
          .unwrap_or_default()
          .to_string()
      })
      .collect();
    let matches = self.matches(query, &texts);
    debug!(query, field, candidates = items.len(), matched = matches.len(), "ranked");

    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    matches
      .iter()
      .filter_map(|m| slots.get_mut(m.index).and_then(Option::take))
      .collect()
  }

  /// Normalizes `query` and cuts it to `max_query_chars` characters.
  fn prepare_query(&self, query: &str) -> String {
    let query = normalize(query);
    match query.char_indices().nth(self.max_query_chars) {
      Some((end, _)) => {
        warn!(
          chars = query.chars().count(),
          max = self.max_query_chars,
          "query truncated before scoring"
        );
        query[..end].to_string()
      }
      None => query,
    }
  }

  fn score(&self, query: &str, index: usize, choice: &str) -> Option<RankedMatch> {
    let score = self.scorer.score(query, &normalize(choice));
    (score >= self.cutoff).then_some(RankedMatch { index, score })
  }

  #[cfg(feature = "parallel")]
  fn sort_results(&self, results: &mut [RankedMatch]) {
    results.par_sort_by(|a, b| {
      b.score
        .partial_cmp(&a.score)
        .unwrap_or(std::cmp::Ordering::Equal)
    });
  }

  #[cfg(not(feature = "parallel"))]
  fn sort_results(&self, results: &mut [RankedMatch]) {
    results.sort_by(|a, b| {
      b.score
        .partial_cmp(&a.score)
        .unwrap_or(std::cmp::Ordering::Equal)
    });
  }
}
