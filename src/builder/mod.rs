//! The attribute filter builder.
//!
//! [`FilterGroups::gather`] walks an entity's declared fields and picks up the
//! request parameters that target them:
//!
//! | kind              | parameters                  | constraint          |
//! |-------------------|-----------------------------|---------------------|
//! | integer, decimal  | `<field>_min`, `<field>_max`| inclusive range     |
//! | boolean           | `<field>` = `True`/`False`  | equality            |
//! | string            | `<field>` (repeatable)      | set membership      |
//!
//! Malformed input never fails a request. A bound that is empty or does not
//! parse is dropped, a boolean other than the two literals is ignored, and a
//! field with nothing usable gets no constraint at all.
//!
//! Gathering considers every filterable field of the schema. The allowlist in
//! [`EntitySchema::filter_fields`] only decides which fields get UI options
//! (see [`options`]).

pub mod options;

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::trace;

use crate::filter::{CompareOp, FilterExpr, FilterValue};
use crate::params::QueryParams;
use crate::types::{EntitySchema, FieldKind};

pub use options::{build_options, FieldOptions, FilterOption, Number};

/// Inclusive bounds of a numeric constraint. At least one bound is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range<T> {
  pub min: Option<T>,
  pub max: Option<T>,
}

/// Type-aware constraints gathered from request parameters for one entity.
///
/// Groups are keyed by plain field name; [`prefix`](Self::prefix) is prepended
/// when the groups are turned into filter expressions, so that a listing
/// search can constrain fields of the listed catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterGroups {
  pub prefix: Option<String>,
  pub integer_ranges: BTreeMap<String, Range<i64>>,
  pub decimal_ranges: BTreeMap<String, Range<Decimal>>,
  pub booleans: BTreeMap<String, bool>,
  pub strings: BTreeMap<String, Vec<String>>,
}

impl FilterGroups {
  /// Gathers the constraints `params` places on the fields of `schema`.
  pub fn gather(schema: &EntitySchema, prefix: Option<&str>, params: &QueryParams) -> Self {
    let mut groups = FilterGroups {
      prefix: prefix.map(str::to_string),
      ..Default::default()
    };

    for field in schema.fields() {
      let name = field.name;
      match field.kind {
        FieldKind::Integer => {
          if let Some(range) = parse_range(params, name) {
            groups.integer_ranges.insert(name.to_string(), range);
          }
        }
        FieldKind::Decimal => {
          if let Some(range) = parse_range(params, name) {
            groups.decimal_ranges.insert(name.to_string(), range);
          }
        }
        FieldKind::Boolean => match params.get(name) {
          Some("True") => {
            groups.booleans.insert(name.to_string(), true);
          }
          Some("False") => {
            groups.booleans.insert(name.to_string(), false);
          }
          _ => {}
        },
        FieldKind::String => {
          let values: Vec<String> = params
            .get_all(name)
            .iter()
            .filter(|v| !v.is_empty())
            .cloned()
            .collect();
          if !values.is_empty() {
            groups.strings.insert(name.to_string(), values);
          }
        }
        FieldKind::List => {}
      }
    }

    trace!(entity = schema.name, ?prefix, constraints = groups.len(), "gathered filters");
    groups
  }

  /// Number of constrained fields.
  pub fn len(&self) -> usize {
    self.integer_ranges.len() + self.decimal_ranges.len() + self.booleans.len() + self.strings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// The lookup path of `field`, with the relation prefix applied.
  pub fn path(&self, field: &str) -> String {
    match &self.prefix {
      Some(prefix) => format!("{prefix}.{field}"),
      None => field.to_string(),
    }
  }

  /// One comparison per bound, equality or membership constraint.
  pub fn constraints(&self) -> Vec<FilterExpr> {
    let mut exprs = Vec::with_capacity(self.len() * 2);

    for (name, range) in &self.integer_ranges {
      self.push_range(&mut exprs, name, range.min.map(FilterValue::Integer), range.max.map(FilterValue::Integer));
    }
    for (name, range) in &self.decimal_ranges {
      self.push_range(&mut exprs, name, range.min.map(FilterValue::Decimal), range.max.map(FilterValue::Decimal));
    }
    for (name, value) in &self.booleans {
      exprs.push(FilterExpr::compare(self.path(name), CompareOp::Eq, FilterValue::Bool(*value)));
    }
    for (name, values) in &self.strings {
      exprs.push(FilterExpr::compare(self.path(name), CompareOp::In, FilterValue::Set(values.clone())));
    }

    exprs
  }

  /// The conjunction of every constraint.
  pub fn to_expr(&self) -> FilterExpr {
    FilterExpr::And(self.constraints())
  }

  fn push_range(&self, exprs: &mut Vec<FilterExpr>, name: &str, min: Option<FilterValue>, max: Option<FilterValue>) {
    if let Some(min) = min {
      exprs.push(FilterExpr::compare(self.path(name), CompareOp::Ge, min));
    }
    if let Some(max) = max {
      exprs.push(FilterExpr::compare(self.path(name), CompareOp::Le, max));
    }
  }
}

/// Parses a single bound. Empty or unparsable input is no bound.
fn parse_bound<T: FromStr>(raw: Option<&str>) -> Option<T> {
  let raw = raw?.trim();
  if raw.is_empty() {
    return None;
  }
  raw.parse().ok()
}

fn parse_range<T: FromStr>(params: &QueryParams, name: &str) -> Option<Range<T>> {
  let min = parse_bound(params.get(&format!("{name}_min")));
  let max = parse_bound(params.get(&format!("{name}_max")));
  if min.is_none() && max.is_none() {
    None
  } else {
    Some(Range { min, max })
  }
}
