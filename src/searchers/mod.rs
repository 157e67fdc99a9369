//! Text relevance for marketplace search.
//!
//! # Available pieces
//!
//! - [`FuzzyRanker`](crate::searchers::FuzzyRanker): Reorders records by one text field, keeping the best matches.
//! - [`Scorer`](crate::searchers::Scorer): The similarity measure a ranker uses.
//! - [`similarity`]: The individual measures (`ratio`, `partial_ratio`, `token_set_ratio`).
//!
//! # Example
//!
//! ```rust
//! use partsbin::searchers::{FuzzyRanker, Scorer};
//!
//! let names = vec![
//!     "AMD Ryzen 7 7700X".to_string(),
//!     "Intel Core i7-14700K".to_string(),
//! ];
//! let ranker = FuzzyRanker::new(60.0).with_scorer(Scorer::Hybrid);
//! let best = ranker.matches("ryzen 7700x", &names);
//! assert_eq!(best[0].index, 0);
//! ```

/// Ranks records by fuzzy similarity to a query.
pub mod fuzzy;
/// String similarity measures.
pub mod similarity;
/// Provides text tokenization utilities for the similarity measures.
pub mod tokenizer;

pub use fuzzy::{FuzzyRanker, RankedMatch, DEFAULT_LIMIT, DEFAULT_MAX_QUERY_CHARS};
pub use similarity::Scorer;
