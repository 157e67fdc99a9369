//! Filter options for the search UI.
//!
//! Only allowlisted fields get options. Each option scans every record once,
//! so an empty table simply yields no bounds and no choices.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::Serialize;

use super::FilterGroups;
use crate::types::{EntitySchema, FieldAccess, FieldKind, FieldValue};

/// A numeric bound, rendered as a plain number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum Number {
  Integer(i64),
  Decimal(Decimal),
}

/// What the UI needs to render one filter control.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterOption {
  /// A min/max pair for integer and decimal fields.
  Range {
    label: &'static str,
    min_val: Option<Number>,
    max_val: Option<Number>,
    selected_min: Option<Number>,
    selected_max: Option<Number>,
  },
  /// A multi-select for string fields.
  Choice {
    label: &'static str,
    choices: Vec<String>,
    selected: Vec<String>,
  },
  /// A yes/no/any toggle for boolean fields.
  Toggle {
    label: &'static str,
    selected: Option<bool>,
  },
}

/// The option of a single field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldOptions {
  pub field: &'static str,
  #[serde(flatten)]
  pub option: FilterOption,
}

/// Builds UI options for the allowlisted fields of `schema`.
///
/// `records` is every record of the entity type, not just the filtered ones,
/// so the bounds and choices stay stable while the user narrows a search.
/// Current selections come from `groups`.
pub fn build_options<R: FieldAccess>(
  schema: &EntitySchema,
  records: &[R],
  groups: &FilterGroups,
) -> Vec<FieldOptions> {
  schema
    .filter_descriptors()
    .filter_map(|field| {
      let name = field.name;
      let label = field.label;
      let option = match field.kind {
        FieldKind::Integer => {
          let (min_val, max_val) = numeric_bounds(records, name);
          let selected = groups.integer_ranges.get(name);
          FilterOption::Range {
            label,
            min_val,
            max_val,
            selected_min: selected.and_then(|r| r.min).map(Number::Integer),
            selected_max: selected.and_then(|r| r.max).map(Number::Integer),
          }
        }
        FieldKind::Decimal => {
          let (min_val, max_val) = numeric_bounds(records, name);
          let selected = groups.decimal_ranges.get(name);
          FilterOption::Range {
            label,
            min_val,
            max_val,
            selected_min: selected.and_then(|r| r.min).map(Number::Decimal),
            selected_max: selected.and_then(|r| r.max).map(Number::Decimal),
          }
        }
        FieldKind::String => {
          let choices: BTreeSet<&str> = records
            .iter()
            .filter_map(|r| r.field(name).and_then(|v| v.as_text()))
            .collect();
          FilterOption::Choice {
            label,
            choices: choices.into_iter().map(str::to_string).collect(),
            selected: groups.strings.get(name).cloned().unwrap_or_default(),
          }
        }
        FieldKind::Boolean => FilterOption::Toggle {
          label,
          selected: groups.booleans.get(name).copied(),
        },
        FieldKind::List => return None,
      };
      Some(FieldOptions { field: name, option })
    })
    .collect()
}

fn numeric_bounds<R: FieldAccess>(records: &[R], name: &str) -> (Option<Number>, Option<Number>) {
  let values = records.iter().filter_map(|r| match r.field(name)? {
    FieldValue::Integer(i) => Some(Number::Integer(i)),
    FieldValue::Decimal(d) => Some(Number::Decimal(d)),
    _ => None,
  });

  values.fold((None, None), |(lo, hi), v| {
    (
      Some(lo.map_or(v, |lo: Number| lo.min(v))),
      Some(hi.map_or(v, |hi: Number| hi.max(v))),
    )
  })
}
