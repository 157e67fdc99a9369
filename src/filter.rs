//! Defines the structures for building filter expressions over catalog and
//! listing records.
//!
//! This module provides an Abstract Syntax Tree (AST) for boolean filters. The
//! filter builder produces these trees from request parameters; they are then
//! evaluated against any record implementing [`FieldAccess`].

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{FieldAccess, FieldValue};

/// An enum representing the nodes of a filter expression AST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterExpr {
  /// A comparison between a field and a value.
  ///
  /// This is the leaf node of the expression tree, representing a condition
  /// like "price <= 300" or "socket in [AM5, LGA1700]".
  Compare {
    /// The name of the field to compare, which can be nested
    /// (e.g., "product.cores_tot").
    field: String,
    /// The comparison operator to use.
    op: CompareOp,
    /// The value to compare against.
    value: FilterValue,
  },
  /// A logical AND operation. An empty conjunction matches everything.
  And(Vec<FilterExpr>),
  /// A logical OR operation. An empty disjunction matches nothing.
  Or(Vec<FilterExpr>),
  /// A logical NOT operation.
  Not(Box<FilterExpr>),
}

/// The set of comparison operators available for filter expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
  /// Equal to (`==`)
  Eq,
  /// Not equal to (`!=`)
  Ne,
  /// Less than (`<`)
  Lt,
  /// Less than or equal to (`<=`)
  Le,
  /// Greater than (`>`)
  Gt,
  /// Greater than or equal to (`>=`)
  Ge,
  /// Member of a set of strings
  In,
  /// Substring (for text) or element (for lists), case-insensitive
  Contains,
}

/// Represents the possible types of values used in filter expressions.
///
/// The `#[serde(untagged)]` attribute allows for flexible deserialization from
/// JSON: a whole number becomes `Integer`, a numeric string becomes `Decimal`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
  Integer(i64),
  Decimal(Decimal),
  Bool(bool),
  String(String),
  Set(Vec<String>),
}

impl FilterExpr {
  /// Creates a comparison leaf.
  pub fn compare(field: impl Into<String>, op: CompareOp, value: FilterValue) -> Self {
    FilterExpr::Compare {
      field: field.into(),
      op,
      value,
    }
  }

  /// Evaluates the expression against a record.
  ///
  /// A comparison against an unset field is false whatever the operator, so
  /// `Ne` does not match records where the field is missing.
  pub fn evaluate<R: FieldAccess + ?Sized>(&self, record: &R) -> bool {
    match self {
      FilterExpr::Compare { field, op, value } => match record.field(field) {
        Some(actual) => compare(actual, *op, value),
        None => false,
      },
      FilterExpr::And(exprs) => exprs.iter().all(|e| e.evaluate(record)),
      FilterExpr::Or(exprs) => exprs.iter().any(|e| e.evaluate(record)),
      FilterExpr::Not(expr) => !expr.evaluate(record),
    }
  }
}

fn compare(actual: FieldValue<'_>, op: CompareOp, expected: &FilterValue) -> bool {
  match (op, actual, expected) {
    (CompareOp::In, FieldValue::Text(text), FilterValue::Set(set)) => {
      return set.iter().any(|s| s == text);
    }
    (CompareOp::Contains, FieldValue::Text(text), FilterValue::String(needle)) => {
      return text.to_lowercase().contains(&needle.to_lowercase());
    }
    (CompareOp::Contains, FieldValue::List(items), FilterValue::String(needle)) => {
      return items.iter().any(|item| item.eq_ignore_ascii_case(needle));
    }
    _ => {}
  }

  let Some(ordering) = order(actual, expected) else {
    return false;
  };
  match op {
    CompareOp::Eq => ordering == Ordering::Equal,
    CompareOp::Ne => ordering != Ordering::Equal,
    CompareOp::Lt => ordering == Ordering::Less,
    CompareOp::Le => ordering != Ordering::Greater,
    CompareOp::Gt => ordering == Ordering::Greater,
    CompareOp::Ge => ordering != Ordering::Less,
    CompareOp::In | CompareOp::Contains => false,
  }
}

/// Orders a field value against a filter value of a compatible type.
fn order(actual: FieldValue<'_>, expected: &FilterValue) -> Option<Ordering> {
  match (actual, expected) {
    (FieldValue::Integer(a), FilterValue::Integer(b)) => Some(a.cmp(b)),
    (FieldValue::Integer(a), FilterValue::Decimal(b)) => Some(Decimal::from(a).cmp(b)),
    (FieldValue::Decimal(a), FilterValue::Decimal(b)) => Some(a.cmp(b)),
    (FieldValue::Decimal(a), FilterValue::Integer(b)) => Some(a.cmp(&Decimal::from(*b))),
    (FieldValue::Boolean(a), FilterValue::Bool(b)) => Some(a.cmp(b)),
    (FieldValue::Text(a), FilterValue::String(b)) => Some(a.cmp(b.as_str())),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  struct Row(HashMap<&'static str, FieldValue<'static>>);

  impl FieldAccess for Row {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
      self.0.get(name).copied()
    }
  }

  fn row() -> Row {
    Row(HashMap::from([
      ("cores", FieldValue::Integer(8)),
      ("price", FieldValue::Decimal(Decimal::new(19999, 2))),
      ("ecc", FieldValue::Boolean(false)),
      ("socket", FieldValue::Text("AM5")),
    ]))
  }

  #[test]
  fn numeric_comparisons_mix_integer_and_decimal() {
    let r = row();
    assert!(FilterExpr::compare("cores", CompareOp::Ge, FilterValue::Integer(8)).evaluate(&r));
    assert!(!FilterExpr::compare("cores", CompareOp::Gt, FilterValue::Integer(8)).evaluate(&r));
    assert!(FilterExpr::compare("price", CompareOp::Le, FilterValue::Integer(200)).evaluate(&r));
    assert!(FilterExpr::compare("cores", CompareOp::Lt, FilterValue::Decimal(Decimal::new(85, 1))).evaluate(&r));
  }

  #[test]
  fn missing_fields_never_match() {
    let r = row();
    let ne = FilterExpr::compare("tdp", CompareOp::Ne, FilterValue::Integer(65));
    assert!(!ne.evaluate(&r));
    assert!(FilterExpr::Not(Box::new(ne)).evaluate(&r));
  }

  #[test]
  fn set_membership_and_logic() {
    let r = row();
    let socket = FilterExpr::compare(
      "socket",
      CompareOp::In,
      FilterValue::Set(vec!["LGA1700".into(), "AM5".into()]),
    );
    let ecc = FilterExpr::compare("ecc", CompareOp::Eq, FilterValue::Bool(true));
    assert!(socket.evaluate(&r));
    assert!(!FilterExpr::And(vec![socket.clone(), ecc.clone()]).evaluate(&r));
    assert!(FilterExpr::Or(vec![socket, ecc]).evaluate(&r));
    assert!(FilterExpr::And(vec![]).evaluate(&r));
    assert!(!FilterExpr::Or(vec![]).evaluate(&r));
  }

  #[test]
  fn contains_is_case_insensitive() {
    let r = row();
    assert!(FilterExpr::compare("socket", CompareOp::Contains, FilterValue::String("am".into())).evaluate(&r));
  }
}
