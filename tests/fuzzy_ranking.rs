use partsbin::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Item {
  id: usize,
  title: String,
}

impl FieldAccess for Item {
  fn field(&self, name: &str) -> Option<FieldValue<'_>> {
    match name {
      "title" => Some(FieldValue::Text(&self.title)),
      _ => None,
    }
  }
}

fn items(titles: &[&str]) -> Vec<Item> {
  titles
    .iter()
    .enumerate()
    .map(|(id, title)| Item { id, title: title.to_string() })
    .collect()
}

const CHOICES: [&str; 6] = [
  "Cool guy",
  "cool girl",
  "Really awesome COOL GUY",
  "Bad girl",
  "cool awesome really ugly guy is not awesome",
  "cxol guy",
];

#[test]
fn test_typo_still_matches() {
  let ranker = FuzzyRanker::new(60.0);
  let choices: Vec<String> = CHOICES.iter().map(|c| c.to_string()).collect();
  let matches = ranker.matches("COOL GUY", &choices);

  let exact = matches.iter().find(|m| m.index == 0).expect("exact title matched");
  let typo = matches.iter().find(|m| m.index == 5).expect("typo title matched");
  assert!(exact.score > 60.0);
  assert!(typo.score > 60.0);
  assert!(exact.score >= typo.score);
  assert!(matches.iter().all(|m| m.index != 3));
}

#[test]
fn test_rank_order_and_ties() {
  let ranker = FuzzyRanker::new(60.0);
  let ranked = ranker.rank(items(&CHOICES), Some("COOL GUY"), "title");
  let order: Vec<usize> = ranked.iter().map(|item| item.id).collect();
  // Three full token matches keep their input order, then the typo, then the
  // partial match.
  assert_eq!(order, vec![0, 2, 4, 5, 1]);
}

#[test]
fn test_empty_query_returns_input_unchanged() {
  let ranker = FuzzyRanker::new(60.0);
  let titles: Vec<String> = (0..40).map(|i| format!("listing {i}")).collect();
  let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
  let input = items(&refs);

  assert_eq!(ranker.rank(input.clone(), None, "title"), input);
  assert_eq!(ranker.rank(input.clone(), Some(""), "title"), input);
  assert_eq!(ranker.rank(input.clone(), Some("  \t"), "title"), input);
}

#[test]
fn test_results_are_capped_and_sorted() {
  let ranker = FuzzyRanker::new(0.0);
  let choices: Vec<String> = (0..100)
    .map(|i| format!("geforce rtx {} ti", 3000 + i * 10))
    .collect();
  let matches = ranker.matches("rtx 3080 ti", &choices);

  assert_eq!(matches.len(), DEFAULT_LIMIT);
  assert!(matches.windows(2).all(|pair| pair[0].score >= pair[1].score));
  assert!(matches.iter().all(|m| m.index < choices.len()));
  assert_eq!(matches[0].index, 8);

  let titles: Vec<&str> = choices.iter().map(String::as_str).collect();
  let ranked = ranker.rank(items(&titles), Some("rtx 3080 ti"), "title");
  assert_eq!(ranked.len(), DEFAULT_LIMIT);
  assert_eq!(ranked[0].title, "geforce rtx 3080 ti");
}

#[test]
fn test_empty_collection() {
  let ranker = FuzzyRanker::new(60.0);
  assert!(ranker.rank(Vec::<Item>::new(), Some("anything"), "title").is_empty());
  assert!(ranker.matches("anything", &[]).is_empty());
}

#[test]
fn test_jaro_winkler_scorer() {
  let ranker = FuzzyRanker::new(80.0).with_scorer(Scorer::JaroWinkler);
  let ranked = ranker.rank(items(&["corsair", "noctua", "corsiar"]), Some("Corsair"), "title");
  let order: Vec<usize> = ranked.iter().map(|item| item.id).collect();
  assert_eq!(order, vec![0, 2]);
}
