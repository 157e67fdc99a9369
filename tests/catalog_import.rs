use std::fs;
use std::path::Path;

use partsbin::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

const R7_ID: &str = "0b6f8d5e-8c3a-4a51-9d7e-0f9a5c2b7e11";
const R5_ID: &str = "5d2c7a10-1f4b-4e3c-8a62-7b9d0e4f3a22";

fn cpu_doc(opendb_id: &str, name: &str, cores: i64) -> Value {
  json!({
    "opendb_id": opendb_id,
    "metadata": {
      "name": name,
      "manufacturer": "AMD",
      "part_numbers": ["100-100000591WOF"],
      "releaseYear": 2022
    },
    "socket": "AM5",
    "cores": { "total": cores, "threads": cores * 2 },
    "clocks": { "performance": { "base": 4500, "boost": 5400 } },
    "specifications": {
      "tdp": 105,
      "eccSupport": false,
      "memory": { "types": ["DDR5"] }
    }
  })
}

fn write(root: &Path, dir: &str, file: &str, doc: &Value) {
  let dir = root.join("open-db").join(dir);
  fs::create_dir_all(&dir).unwrap();
  fs::write(dir.join(file), serde_json::to_string_pretty(doc).unwrap()).unwrap();
}

fn catalog() -> TempDir {
  let root = TempDir::new().unwrap();
  write(root.path(), "CPU", "a.json", &cpu_doc(R7_ID, "Ryzen 7 7700X", 8));
  write(root.path(), "CPU", "b.json", &cpu_doc(R5_ID, "Ryzen 5 7600", 6));
  fs::write(root.path().join("open-db/CPU/README.md"), "not a document").unwrap();
  root
}

#[test]
fn test_import_maps_documents() {
  let root = catalog();
  let store = MemoryStore::new();
  let report = CatalogImporter::new(&store, root.path())
    .import_kind(ProductKind::Cpu)
    .unwrap();
  assert_eq!(report, ImportReport { created: 2, updated: 0 });

  let product = store.product_by_name(ProductKind::Cpu, "Ryzen 7 7700X").unwrap();
  assert_eq!(product.opendb_id.to_string(), R7_ID);
  assert_eq!(product.info.part_numbers, vec!["100-100000591WOF".to_string()]);
  assert_eq!(product.info.release_year, Some(2022));
  assert_eq!(product.field("cores_tot"), Some(FieldValue::Integer(8)));
  assert_eq!(product.field("threads"), Some(FieldValue::Integer(16)));
  assert_eq!(product.field("clocks_perf_boost"), Some(FieldValue::Integer(5400)));
  assert_eq!(product.field("ecc_support"), Some(FieldValue::Boolean(false)));
  assert_eq!(product.field("cores_eff"), None);
}

#[test]
fn test_reimport_updates_in_place() {
  let root = catalog();
  let store = MemoryStore::new();
  let importer = CatalogImporter::new(&store, root.path());
  importer.import_kind(ProductKind::Cpu).unwrap();
  let before = store.product_by_name(ProductKind::Cpu, "Ryzen 5 7600").unwrap();

  write(root.path(), "CPU", "b.json", &cpu_doc(R5_ID, "Ryzen 5 7600", 12));
  let report = importer.import_kind(ProductKind::Cpu).unwrap();
  assert_eq!(report, ImportReport { created: 0, updated: 2 });

  let after = store.product_by_name(ProductKind::Cpu, "Ryzen 5 7600").unwrap();
  assert_eq!(after.id, before.id);
  assert_eq!(after.field("cores_tot"), Some(FieldValue::Integer(12)));
  assert!(after.last_synced >= before.last_synced);
  assert_eq!(store.products_of_kind(ProductKind::Cpu).len(), 2);
}

#[test]
fn test_duplicate_catalog_id_stops_import() {
  let root = catalog();
  write(root.path(), "CPU", "c.json", &cpu_doc(R7_ID, "Ryzen 7 7700X3D", 8));
  write(root.path(), "CPU", "d.json", &cpu_doc("9a1e4c3b-2d5f-4a6e-8b7c-1d0e2f3a4b55", "Ryzen 9 7950X", 16));

  let store = MemoryStore::new();
  let err = CatalogImporter::new(&store, root.path())
    .import_kind(ProductKind::Cpu)
    .unwrap_err();
  match err {
    MarketError::DuplicateCatalogId { name, existing, .. } => {
      assert_eq!(name, "Ryzen 7 7700X3D");
      assert_eq!(existing, "Ryzen 7 7700X");
    }
    other => panic!("unexpected error {other}"),
  }
  // Documents before the failing one stay imported, later ones are not read.
  assert_eq!(store.products_of_kind(ProductKind::Cpu).len(), 2);
  assert!(store.product_by_name(ProductKind::Cpu, "Ryzen 9 7950X").is_none());
}

#[test]
fn test_invalid_documents() {
  let root = TempDir::new().unwrap();
  let mut doc = cpu_doc(R7_ID, "Ryzen 7 7700X", 8);
  doc["metadata"].as_object_mut().unwrap().remove("name");
  write(root.path(), "GPU", "nameless.json", &doc);

  let store = MemoryStore::new();
  let importer = CatalogImporter::new(&store, root.path());
  match importer.import_kind(ProductKind::Gpu).unwrap_err() {
    MarketError::InvalidRecord { path, reason } => {
      assert!(path.ends_with("nameless.json"));
      assert_eq!(reason, "missing metadata.name");
    }
    other => panic!("unexpected error {other}"),
  }

  let dir = root.path().join("open-db/RAM");
  fs::create_dir_all(&dir).unwrap();
  fs::write(dir.join("broken.json"), "{ not json").unwrap();
  let err = importer.import_kind(ProductKind::Ram).unwrap_err();
  assert_eq!(err.code(), "invalid_json");

  // No PSU directory at all.
  assert!(matches!(importer.import_kind(ProductKind::Psu), Err(MarketError::Io(_))));
}

#[test]
fn test_case_documents_live_in_pccase() {
  let root = TempDir::new().unwrap();
  let doc = json!({
    "opendb_id": "3c9b2a71-6e5d-4f80-9a1b-2c3d4e5f6a77",
    "metadata": { "name": "Fractal North", "manufacturer": "Fractal Design" }
  });
  write(root.path(), "PCCase", "north.json", &doc);

  let store = MemoryStore::new();
  let importer = CatalogImporter::new(&store, root.path());
  assert!(importer.kind_dir(ProductKind::Case).ends_with("open-db/PCCase"));
  importer.import_kind(ProductKind::Case).unwrap();

  let case = store.product_by_name(ProductKind::Case, "Fractal North").unwrap();
  assert_eq!(case.kind(), ProductKind::Case);
  assert_eq!(case.field("manufacturer"), Some(FieldValue::Text("Fractal Design")));
}
