//! Core data types shared by the catalog, the listing aggregate and the search
//! machinery.
//!
//! Every searchable entity describes its fields with a static table of
//! [`FieldDescriptor`]s and exposes their current values through
//! [`FieldAccess`]. The filter builder, the option renderer and the fuzzy
//! ranker are written against these two pieces only, so they work the same way
//! for a CPU, a power supply or a seller listing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier of a catalog entry.
pub type ProductId = u64;
/// Identifier of a seller listing.
pub type ListingId = u64;
/// Identifier of a listing image.
pub type ImageId = u64;
/// Identifier of a marketplace user.
pub type UserId = u64;

/// The semantic type of a declared field.
///
/// The filter builder derives the kind of constraint it can build from this:
/// ranges for the numeric kinds, equality for booleans and set membership for
/// strings. `List` fields are stored and imported but never filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
  /// Whole numbers (core counts, clocks in MHz, wattages).
  Integer,
  /// Fixed-point numbers (prices, volumes).
  Decimal,
  /// Yes/no flags.
  Boolean,
  /// Free or enumerated text.
  String,
  /// A list of strings, such as part numbers.
  List,
}

/// Describes a single declared field of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
  /// The field name, also used as the request parameter stem.
  pub name: &'static str,
  /// The semantic type of the field.
  pub kind: FieldKind,
  /// Human readable label shown next to the filter control.
  pub label: &'static str,
  /// Dot-separated path of the field inside an imported catalog document.
  /// Empty for fields that are not imported.
  #[serde(skip)]
  pub path: &'static str,
}

/// A borrowed view of a field's current value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
  Integer(i64),
  Decimal(Decimal),
  Boolean(bool),
  Text(&'a str),
  List(&'a [String]),
}

impl<'a> FieldValue<'a> {
  /// Returns the text payload, if this is a text value.
  pub fn as_text(&self) -> Option<&'a str> {
    match self {
      FieldValue::Text(s) => Some(s),
      _ => None,
    }
  }
}

/// Conversion of a stored attribute into a [`FieldValue`].
///
/// Implemented for the handful of storage types catalog and listing fields
/// use; `None` means the attribute is unset.
pub trait AsFieldValue {
  /// The semantic kind a field of this storage type has.
  const KIND: FieldKind;

  fn as_field_value(&self) -> Option<FieldValue<'_>>;
}

impl AsFieldValue for Option<i64> {
  const KIND: FieldKind = FieldKind::Integer;

  fn as_field_value(&self) -> Option<FieldValue<'_>> {
    self.map(FieldValue::Integer)
  }
}

impl AsFieldValue for Option<Decimal> {
  const KIND: FieldKind = FieldKind::Decimal;

  fn as_field_value(&self) -> Option<FieldValue<'_>> {
    self.map(FieldValue::Decimal)
  }
}

impl AsFieldValue for Option<bool> {
  const KIND: FieldKind = FieldKind::Boolean;

  fn as_field_value(&self) -> Option<FieldValue<'_>> {
    self.map(FieldValue::Boolean)
  }
}

impl AsFieldValue for Option<String> {
  const KIND: FieldKind = FieldKind::String;

  fn as_field_value(&self) -> Option<FieldValue<'_>> {
    self.as_deref().map(FieldValue::Text)
  }
}

impl AsFieldValue for Vec<String> {
  const KIND: FieldKind = FieldKind::List;

  fn as_field_value(&self) -> Option<FieldValue<'_>> {
    Some(FieldValue::List(self))
  }
}

/// Read access to an entity's fields by name.
///
/// Names may be dotted (`product.cores_tot`) when the entity joins a related
/// record; implementations resolve the prefix themselves.
pub trait FieldAccess {
  /// Returns the current value of `name`, or `None` if the field is unset or
  /// not declared.
  fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

impl<T: FieldAccess + ?Sized> FieldAccess for &T {
  fn field(&self, name: &str) -> Option<FieldValue<'_>> {
    (**self).field(name)
  }
}

/// The declared fields and filter allowlist of one entity type.
#[derive(Debug, Clone, Copy)]
pub struct EntitySchema {
  /// Display name of the entity type.
  pub name: &'static str,
  /// Field tables, in declaration order. Catalog variants list the shared base
  /// fields first and their own attributes second.
  pub groups: &'static [&'static [FieldDescriptor]],
  /// Names of the fields exposed to the filter UI.
  pub filter_fields: &'static [&'static str],
}

impl EntitySchema {
  /// Iterates over every declared field.
  pub fn fields(&self) -> impl Iterator<Item = &'static FieldDescriptor> {
    let groups = self.groups;
    groups.iter().flat_map(|group| group.iter())
  }

  /// Looks up a declared field by name.
  pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
    self.fields().find(|f| f.name == name)
  }

  /// Resolves the filter allowlist to descriptors, in allowlist order.
  ///
  /// Names that are not declared are skipped.
  pub fn filter_descriptors(&self) -> impl Iterator<Item = &'static FieldDescriptor> + '_ {
    self.filter_fields.iter().filter_map(|name| self.field(name))
  }
}
