//! The product catalog: a taxonomy of hardware variants sharing base metadata.
//!
//! A catalog entry is a [`Product`]: the shared fields plus a [`Specs`]
//! payload holding the attributes of exactly one concrete [`ProductKind`].
//! Each kind has a static [`EntitySchema`] that lists its fields (shared ones
//! first) and the allowlist of fields offered as filters.

pub mod fields;
pub mod specs;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::MarketError;
use crate::types::{EntitySchema, FieldAccess, FieldDescriptor, FieldKind, FieldValue, ProductId};

pub use specs::{
  CaseSpecs, CpuSpecs, GpuSpecs, MotherboardSpecs, ProductInfo, PsuSpecs, RamSpecs, StorageSpecs,
};

/// A concrete catalog variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
  Cpu,
  Gpu,
  Motherboard,
  Psu,
  Ram,
  Storage,
  Case,
}

impl ProductKind {
  /// Every concrete variant.
  pub const ALL: [ProductKind; 7] = [
    ProductKind::Cpu,
    ProductKind::Gpu,
    ProductKind::Motherboard,
    ProductKind::Psu,
    ProductKind::Ram,
    ProductKind::Storage,
    ProductKind::Case,
  ];

  /// Display name, as used in URLs (`/listings/CPU/search`).
  pub fn name(self) -> &'static str {
    self.schema().name
  }

  /// Name of the per-variant directory in the catalog source tree.
  pub fn dir_name(self) -> &'static str {
    match self {
      ProductKind::Cpu => "CPU",
      ProductKind::Gpu => "GPU",
      ProductKind::Motherboard => "Motherboard",
      ProductKind::Psu => "PSU",
      ProductKind::Ram => "RAM",
      ProductKind::Storage => "Storage",
      ProductKind::Case => "PCCase",
    }
  }

  /// The declared fields and filter allowlist of this variant.
  pub fn schema(self) -> &'static EntitySchema {
    match self {
      ProductKind::Cpu => &CPU_SCHEMA,
      ProductKind::Gpu => &GPU_SCHEMA,
      ProductKind::Motherboard => &MOTHERBOARD_SCHEMA,
      ProductKind::Psu => &PSU_SCHEMA,
      ProductKind::Ram => &RAM_SCHEMA,
      ProductKind::Storage => &STORAGE_SCHEMA,
      ProductKind::Case => &CASE_SCHEMA,
    }
  }
}

impl fmt::Display for ProductKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for ProductKind {
  type Err = MarketError;

  /// Resolves a variant name case-insensitively. Accepts both the display
  /// name and the source directory name (`Case` / `PCCase`). The abstract
  /// `Product` base is not a variant and is rejected like any unknown name.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let wanted = s.trim();
    ProductKind::ALL
      .into_iter()
      .find(|kind| {
        kind.name().eq_ignore_ascii_case(wanted) || kind.dir_name().eq_ignore_ascii_case(wanted)
      })
      .ok_or_else(|| MarketError::UnknownProductType(s.to_string()))
  }
}

const NAME_FIELD: &[FieldDescriptor] = &[FieldDescriptor {
  name: "name",
  kind: FieldKind::String,
  label: "Name",
  path: "metadata.name",
}];

macro_rules! schema {
  ($name:literal, $specs:ty) => {
    EntitySchema {
      name: $name,
      groups: &[NAME_FIELD, ProductInfo::FIELDS, <$specs>::FIELDS],
      filter_fields: <$specs>::FILTER_FIELDS,
    }
  };
}

static CPU_SCHEMA: EntitySchema = schema!("CPU", CpuSpecs);
static GPU_SCHEMA: EntitySchema = schema!("GPU", GpuSpecs);
static MOTHERBOARD_SCHEMA: EntitySchema = schema!("Motherboard", MotherboardSpecs);
static PSU_SCHEMA: EntitySchema = schema!("PSU", PsuSpecs);
static RAM_SCHEMA: EntitySchema = schema!("RAM", RamSpecs);
static STORAGE_SCHEMA: EntitySchema = schema!("Storage", StorageSpecs);
static CASE_SCHEMA: EntitySchema = schema!("Case", CaseSpecs);

/// Variant-specific attributes of a catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "attributes", rename_all = "lowercase")]
pub enum Specs {
  Cpu(CpuSpecs),
  Gpu(GpuSpecs),
  Motherboard(MotherboardSpecs),
  Psu(PsuSpecs),
  Ram(RamSpecs),
  Storage(StorageSpecs),
  Case(CaseSpecs),
}

impl Specs {
  /// An attribute payload of `kind` with every attribute unset.
  pub fn empty(kind: ProductKind) -> Self {
    match kind {
      ProductKind::Cpu => Specs::Cpu(CpuSpecs::default()),
      ProductKind::Gpu => Specs::Gpu(GpuSpecs::default()),
      ProductKind::Motherboard => Specs::Motherboard(MotherboardSpecs::default()),
      ProductKind::Psu => Specs::Psu(PsuSpecs::default()),
      ProductKind::Ram => Specs::Ram(RamSpecs::default()),
      ProductKind::Storage => Specs::Storage(StorageSpecs::default()),
      ProductKind::Case => Specs::Case(CaseSpecs::default()),
    }
  }

  /// Maps an imported catalog document onto the attributes of `kind`.
  pub fn from_document(kind: ProductKind, document: &serde_json::Value) -> Self {
    match kind {
      ProductKind::Cpu => Specs::Cpu(CpuSpecs::from_document(document)),
      ProductKind::Gpu => Specs::Gpu(GpuSpecs::from_document(document)),
      ProductKind::Motherboard => Specs::Motherboard(MotherboardSpecs::from_document(document)),
      ProductKind::Psu => Specs::Psu(PsuSpecs::from_document(document)),
      ProductKind::Ram => Specs::Ram(RamSpecs::from_document(document)),
      ProductKind::Storage => Specs::Storage(StorageSpecs::from_document(document)),
      ProductKind::Case => Specs::Case(CaseSpecs::from_document(document)),
    }
  }

  pub fn kind(&self) -> ProductKind {
    match self {
      Specs::Cpu(_) => ProductKind::Cpu,
      Specs::Gpu(_) => ProductKind::Gpu,
      Specs::Motherboard(_) => ProductKind::Motherboard,
      Specs::Psu(_) => ProductKind::Psu,
      Specs::Ram(_) => ProductKind::Ram,
      Specs::Storage(_) => ProductKind::Storage,
      Specs::Case(_) => ProductKind::Case,
    }
  }

  fn as_fields(&self) -> &dyn FieldAccess {
    match self {
      Specs::Cpu(s) => s,
      Specs::Gpu(s) => s,
      Specs::Motherboard(s) => s,
      Specs::Psu(s) => s,
      Specs::Ram(s) => s,
      Specs::Storage(s) => s,
      Specs::Case(s) => s,
    }
  }
}

impl FieldAccess for Specs {
  fn field(&self, name: &str) -> Option<FieldValue<'_>> {
    self.as_fields().field(name)
  }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id: ProductId,
  /// Identifier of the entry in the external catalog source. Unique.
  pub opendb_id: Uuid,
  pub name: String,
  #[serde(flatten)]
  pub info: ProductInfo,
  pub specs: Specs,
  pub last_synced: DateTime<Utc>,
}

impl Product {
  /// Creates an unsaved entry of `kind` with no attributes set. The store
  /// assigns the id on insert.
  pub fn new(kind: ProductKind, name: impl Into<String>, opendb_id: Uuid) -> Self {
    Self {
      id: 0,
      opendb_id,
      name: name.into(),
      info: ProductInfo::default(),
      specs: Specs::empty(kind),
      last_synced: Utc::now(),
    }
  }

  pub fn kind(&self) -> ProductKind {
    self.specs.kind()
  }

  pub fn schema(&self) -> &'static EntitySchema {
    self.kind().schema()
  }
}

impl FieldAccess for Product {
  fn field(&self, name: &str) -> Option<FieldValue<'_>> {
    if name == "name" {
      return Some(FieldValue::Text(&self.name));
    }
    self.info.field(name).or_else(|| self.specs.field(name))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn kind_names_resolve_case_insensitively() {
    assert_eq!("cpu".parse::<ProductKind>().unwrap(), ProductKind::Cpu);
    assert_eq!("PCCase".parse::<ProductKind>().unwrap(), ProductKind::Case);
    assert_eq!("case".parse::<ProductKind>().unwrap(), ProductKind::Case);
    assert!(matches!(
      "Product".parse::<ProductKind>(),
      Err(MarketError::UnknownProductType(_))
    ));
    assert!("Keyboard".parse::<ProductKind>().is_err());
  }

  #[test]
  fn filter_allowlist_is_declared_for_every_kind() {
    for kind in ProductKind::ALL {
      let schema = kind.schema();
      for name in schema.filter_fields {
        let field = schema
          .field(name)
          .unwrap_or_else(|| panic!("{kind}: `{name}` is not declared"));
        assert_ne!(field.kind, FieldKind::List, "{kind}: `{name}` cannot be filtered");
      }
    }
  }

  #[test]
  fn field_names_are_unique_per_kind() {
    for kind in ProductKind::ALL {
      let mut names: Vec<_> = kind.schema().fields().map(|f| f.name).collect();
      let total = names.len();
      names.sort_unstable();
      names.dedup();
      assert_eq!(names.len(), total, "{kind} declares a field twice");
    }
  }

  #[test]
  fn product_fields_cover_base_and_specs() {
    let doc = json!({
      "metadata": { "name": "Ryzen 7 7700X", "manufacturer": "AMD" },
      "socket": "AM5",
      "cores": { "total": 8, "threads": 16 },
      "specifications": { "eccSupport": true }
    });
    let mut product = Product::new(ProductKind::Cpu, "Ryzen 7 7700X", Uuid::nil());
    product.info = ProductInfo::from_document(&doc);
    product.specs = Specs::from_document(ProductKind::Cpu, &doc);

    assert_eq!(product.field("name"), Some(FieldValue::Text("Ryzen 7 7700X")));
    assert_eq!(product.field("manufacturer"), Some(FieldValue::Text("AMD")));
    assert_eq!(product.field("cores_tot"), Some(FieldValue::Integer(8)));
    assert_eq!(product.field("ecc_support"), Some(FieldValue::Boolean(true)));
    assert_eq!(product.field("cores_eff"), None);
    assert_eq!(product.field("wattage"), None);
  }

  #[test]
  fn specs_serialize_with_kind_tag() {
    let product = Product::new(ProductKind::Psu, "RM850x", Uuid::nil());
    let value = serde_json::to_value(&product).unwrap();
    assert_eq!(value["specs"]["kind"], "psu");
    let back: Product = serde_json::from_value(value).unwrap();
    assert_eq!(back.kind(), ProductKind::Psu);
  }
}
