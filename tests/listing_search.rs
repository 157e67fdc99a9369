use std::sync::Arc;

use partsbin::catalog::{CpuSpecs, GpuSpecs};
use partsbin::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

fn cpu(name: &str, cores: Option<i64>, socket: &str, ecc: bool) -> Product {
  let mut product = Product::new(ProductKind::Cpu, name, Uuid::new_v4());
  product.info.manufacturer = name.split_whitespace().next().map(str::to_string);
  product.specs = Specs::Cpu(CpuSpecs {
    cores_tot: cores,
    socket: Some(socket.to_string()),
    ecc_support: Some(ecc),
    ..Default::default()
  });
  product
}

fn add(store: &MemoryStore, product: Product) -> ProductId {
  store.upsert_product(product).unwrap().id()
}

fn list(store: &MemoryStore, seller: UserId, product: ProductId, title: &str, condition: Condition, price: i64) {
  store
    .create_listing(seller, product, ListingDraft::new(title, condition, Decimal::from(price)).stock(1))
    .unwrap();
}

/// Five CPU listings (ids 1-5) and one GPU listing (id 6).
fn market() -> MarketSearch<MemoryStore> {
  let store = MemoryStore::new();
  let r7 = add(&store, cpu("AMD Ryzen 7 7700X", Some(8), "AM5", false));
  let r5 = add(&store, cpu("AMD Ryzen 5 7600", Some(6), "AM5", false));
  let i9 = add(&store, cpu("Intel Core i9-14900K", Some(24), "LGA1700", false));
  let r9 = add(&store, cpu("AMD Ryzen 9 7950X", Some(16), "AM5", true));
  let odd = add(&store, cpu("Mystery Chip", None, "AM4", false));

  let mut gpu = Product::new(ProductKind::Gpu, "GeForce RTX 4090", Uuid::new_v4());
  gpu.specs = Specs::Gpu(GpuSpecs::default());
  let gpu = add(&store, gpu);

  list(&store, 1, r7, "Ryzen 7 7700X boxed", Condition::Used, 250);
  list(&store, 1, r5, "Ryzen 5 7600 tray", Condition::LikeNew, 150);
  list(&store, 2, i9, "i9-14900K delidded", Condition::Used, 450);
  list(&store, 2, r9, "Ryzen 9 7950X workstation pull", Condition::Refurbished, 500);
  list(&store, 3, odd, "mystery cpu", Condition::ForParts, 5);
  list(&store, 3, gpu, "RTX 4090 FE", Condition::New, 1600);

  MarketSearch::builder(Arc::new(store)).build()
}

fn ids(results: &ListingResults) -> Vec<ListingId> {
  results.listings.iter().map(|hit| hit.listing.id).collect()
}

fn option<'a>(options: &'a [FieldOptions], field: &str) -> &'a FilterOption {
  &options
    .iter()
    .find(|o| o.field == field)
    .unwrap_or_else(|| panic!("no option for {field}"))
    .option
}

#[test]
fn test_cpu_core_count_filter() {
  let search = market();
  let params = QueryParams::from_query_string("cores_tot_min=8");
  let results = search.search_listings("CPU", &params).unwrap();

  assert_eq!(results.kind, ProductKind::Cpu);
  assert_eq!(ids(&results), vec![1, 3, 4]);
  for hit in &results.listings {
    match hit.product.field("cores_tot") {
      Some(FieldValue::Integer(cores)) => assert!(cores >= 8),
      other => panic!("unexpected core count {other:?}"),
    }
  }
}

#[test]
fn test_unknown_product_type() {
  let search = market();
  for kind in ["Keyboard", "Product", ""] {
    let err = search.search_listings(kind, &QueryParams::new()).unwrap_err();
    assert!(matches!(err, MarketError::UnknownProductType(_)), "{kind}: {err}");
    assert!(search.search_products(kind, &QueryParams::new()).is_err());
  }
}

#[test]
fn test_kind_name_is_case_insensitive() {
  let search = market();
  let results = search.search_listings("gpu", &QueryParams::new()).unwrap();
  assert_eq!(ids(&results), vec![6]);
}

#[test]
fn test_malformed_bounds_apply_no_constraint() {
  let search = market();
  let params = QueryParams::from_query_string("cores_tot_min=abc&cores_tot_max=&price_min=cheap");
  let results = search.search_listings("CPU", &params).unwrap();
  assert_eq!(ids(&results), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_listing_and_product_filters_combine() {
  let search = market();

  let params = QueryParams::from_query_string("socket=AM5&socket=LGA1700&price_max=300");
  assert_eq!(ids(&search.search_listings("CPU", &params).unwrap()), vec![1, 2]);

  let params = QueryParams::from_query_string("socket=AM5&ecc_support=True");
  assert_eq!(ids(&search.search_listings("CPU", &params).unwrap()), vec![4]);

  let params = QueryParams::from_query_string("condition=used&condition=for_parts");
  assert_eq!(ids(&search.search_listings("CPU", &params).unwrap()), vec![1, 3, 5]);

  // Anything other than the two literals leaves the field unconstrained.
  let params = QueryParams::from_query_string("ecc_support=yes");
  assert_eq!(search.search_listings("CPU", &params).unwrap().listings.len(), 5);
}

#[test]
fn test_title_ranking() {
  let search = market();
  let params = QueryParams::from_query_string("q=7700x");
  let results = search.search_listings("CPU", &params).unwrap();
  let found = ids(&results);

  assert_eq!(results.query.as_deref(), Some("7700x"));
  assert_eq!(found.first(), Some(&1));
  assert!(!found.contains(&3));
  assert!(!found.contains(&5));
  assert!(!found.contains(&6));
}

#[test]
fn test_filter_options() {
  let search = market();
  let params = QueryParams::from_query_string("cores_tot_min=8&socket=AM5");
  let results = search.search_listings("CPU", &params).unwrap();

  assert_eq!(
    option(&results.product_filters, "cores_tot"),
    &FilterOption::Range {
      label: "Total Cores",
      min_val: Some(Number::Integer(6)),
      max_val: Some(Number::Integer(24)),
      selected_min: Some(Number::Integer(8)),
      selected_max: None,
    }
  );
  match option(&results.product_filters, "socket") {
    FilterOption::Choice { choices, selected, .. } => {
      assert_eq!(choices, &["AM4", "AM5", "LGA1700"]);
      assert_eq!(selected, &["AM5"]);
    }
    other => panic!("unexpected option {other:?}"),
  }
  match option(&results.listing_filters, "price") {
    FilterOption::Range { min_val, max_val, .. } => {
      assert_eq!(*min_val, Some(Number::Decimal(Decimal::from(5))));
      assert_eq!(*max_val, Some(Number::Decimal(Decimal::from(500))));
    }
    other => panic!("unexpected option {other:?}"),
  }
  assert!(results.product_filters.iter().all(|o| o.field != "packaging"));
}

#[test]
fn test_product_search() {
  let search = market();

  let results = search
    .search_products("CPU", &QueryParams::from_query_string("q=ryzen+7700x"))
    .unwrap();
  assert_eq!(results.products.len(), 5);
  assert_eq!(results.products[0].name, "AMD Ryzen 7 7700X");

  let results = search
    .search_products("cpu", &QueryParams::from_query_string("socket=LGA1700"))
    .unwrap();
  let names: Vec<_> = results.products.iter().map(|p| p.name.as_str()).collect();
  assert_eq!(names, vec!["Intel Core i9-14900K"]);
}

#[test]
fn test_empty_catalog() {
  let search = MarketSearch::builder(Arc::new(MemoryStore::new())).build();
  let results = search
    .search_listings("PSU", &QueryParams::from_query_string("q=850w&wattage_min=750"))
    .unwrap();
  assert!(results.listings.is_empty());
  match option(&results.product_filters, "wattage") {
    FilterOption::Range { min_val, max_val, .. } => {
      assert_eq!(*min_val, None);
      assert_eq!(*max_val, None);
    }
    other => panic!("unexpected option {other:?}"),
  }
}
