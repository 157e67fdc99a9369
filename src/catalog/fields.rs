//! Declarative attribute tables.
//!
//! [`attributes!`] declares a plain attribute struct together with its field
//! descriptor table, its filter allowlist, name-based field access and the
//! mapping from an imported JSON document. Keeping all four in one
//! declaration means a field cannot be added to the struct and forgotten in
//! the descriptor table.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

/// Follows a dot-separated `path` through nested JSON objects.
///
/// Returns `None` when a segment is missing, when an intermediate value is not
/// an object, when the final value is `null`, or when `path` is empty.
pub fn lookup_path<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
  if path.is_empty() {
    return None;
  }

  let mut current = document;
  for key in path.split('.') {
    current = current.as_object()?.get(key)?;
  }

  if current.is_null() {
    None
  } else {
    Some(current)
  }
}

/// Conversion of an imported JSON value into attribute storage.
///
/// Values of an unexpected shape are coerced where a lossless or conventional
/// reading exists and dropped otherwise.
pub trait ImportValue: Sized {
  fn import(value: Option<&Value>) -> Self;
}

impl ImportValue for Option<i64> {
  fn import(value: Option<&Value>) -> Self {
    match value? {
      Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
      Value::String(s) => s.trim().parse().ok(),
      _ => None,
    }
  }
}

impl ImportValue for Option<Decimal> {
  fn import(value: Option<&Value>) -> Self {
    match value? {
      Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
      Value::String(s) => Decimal::from_str(s.trim()).ok(),
      _ => None,
    }
  }
}

impl ImportValue for Option<bool> {
  fn import(value: Option<&Value>) -> Self {
    value?.as_bool()
  }
}

impl ImportValue for Option<String> {
  fn import(value: Option<&Value>) -> Self {
    match value? {
      Value::String(s) => Some(s.clone()),
      other => Some(other.to_string()),
    }
  }
}

impl ImportValue for Vec<String> {
  fn import(value: Option<&Value>) -> Self {
    match value {
      Some(Value::Array(items)) => items
        .iter()
        .map(|item| match item {
          Value::String(s) => s.clone(),
          other => other.to_string(),
        })
        .collect(),
      _ => Vec::new(),
    }
  }
}

/// Declares an attribute struct and its descriptor table.
///
/// ```ignore
/// attributes! {
///   /// Power supply attributes.
///   pub struct PsuSpecs {
///     wattage: Option<i64> => "wattage", "Wattage";
///   }
///   filter: ["wattage"]
/// }
/// ```
macro_rules! attributes {
  (
    $(#[$meta:meta])*
    pub struct $name:ident {
      $( $field:ident : $ty:ty => $path:literal, $label:literal; )*
    }
    filter: [ $( $filter:literal ),* $(,)? ]
  ) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
    pub struct $name {
      $( pub $field: $ty, )*
    }

    impl $name {
      /// Declared fields, in declaration order.
      pub const FIELDS: &'static [$crate::types::FieldDescriptor] = &[
        $(
          $crate::types::FieldDescriptor {
            name: stringify!($field),
            kind: <$ty as $crate::types::AsFieldValue>::KIND,
            label: $label,
            path: $path,
          },
        )*
      ];

      /// Fields exposed to the filter UI.
      pub const FILTER_FIELDS: &'static [&'static str] = &[ $( $filter ),* ];

      /// Builds the attributes from an imported catalog document.
      pub fn from_document(document: &serde_json::Value) -> Self {
        Self {
          $(
            $field: <$ty as $crate::catalog::fields::ImportValue>::import(
              $crate::catalog::fields::lookup_path(document, $path),
            ),
          )*
        }
      }
    }

    impl $crate::types::FieldAccess for $name {
      fn field(&self, name: &str) -> Option<$crate::types::FieldValue<'_>> {
        use $crate::types::AsFieldValue;
        match name {
          $( stringify!($field) => self.$field.as_field_value(), )*
          _ => None,
        }
      }
    }
  };
}

pub(crate) use attributes;

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn lookup_follows_nested_objects() {
    let doc = json!({ "cores": { "total": 8, "performance": null }, "socket": "AM5" });
    assert_eq!(lookup_path(&doc, "cores.total"), Some(&json!(8)));
    assert_eq!(lookup_path(&doc, "cores.performance"), None);
    assert_eq!(lookup_path(&doc, "socket.name"), None);
    assert_eq!(lookup_path(&doc, "missing.path"), None);
    assert_eq!(lookup_path(&doc, ""), None);
  }

  #[test]
  fn import_coerces_scalars() {
    assert_eq!(<Option<i64>>::import(Some(&json!(4.0))), Some(4));
    assert_eq!(<Option<i64>>::import(Some(&json!("12"))), Some(12));
    assert_eq!(<Option<bool>>::import(Some(&json!("yes"))), None);
    assert_eq!(<Option<String>>::import(Some(&json!(65))), Some("65".to_string()));
    assert_eq!(
      <Option<Decimal>>::import(Some(&json!("1.35"))),
      Some(Decimal::new(135, 2))
    );
    assert_eq!(
      <Vec<String>>::import(Some(&json!(["DDR5", 5]))),
      vec!["DDR5".to_string(), "5".to_string()]
    );
  }
}
