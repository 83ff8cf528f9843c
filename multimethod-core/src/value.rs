//! Dynamic values used as dispatch keys, arguments and results.
//!
//! [`Value`] models the data of a dynamically typed host: scalars, ordered
//! lists and keyed maps, nested arbitrarily. Its [`PartialEq`] implementation
//! is the structural comparator every dispatch decision reduces to.
//!
//! # Equality
//!
//! - Scalars compare by value. `NaN` equals `NaN`, while `0.0` and `-0.0`
//!   are distinct keys.
//! - Lists are equal when they have the same length and pairwise equal
//!   elements, in order.
//! - Maps are equal when they have the same key set and pairwise equal
//!   values. Key order never matters.
//!
//! Two independently built values with the same shape are always equal;
//! there is no notion of reference identity.

use std::{
    collections::{BTreeMap, HashMap},
    fmt,
};

/// Keyed mapping stored inside [`Value::Map`].
pub type Map = BTreeMap<String, Value>;

/// A structured dynamic value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// An absent value: a missing property or a call that produced nothing.
    #[default]
    Undefined,
    /// An explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number. Integers are stored as `f64`, like in the host language.
    Number(f64),
    /// A string.
    String(String),
    /// An ordered sequence.
    List(Vec<Value>),
    /// A keyed mapping.
    Map(Map),
}

impl Value {
    /// Name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Returns true for [`Value::Undefined`].
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Reads a named property of a map.
    ///
    /// Returns `None` when `self` is not a map or has no such property.
    pub fn get(&self, field: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(field),
            _ => None,
        }
    }

    /// Returns the boolean, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number, if this is one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the number as an integer if it has no fractional part.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n)
                if n.fract() == 0.0 && *n >= i64::MIN as f64 && *n < i64::MAX as f64 =>
            {
                Some(*n as i64)
            }
            _ => None,
        }
    }

    /// Returns the string slice, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements, if this is a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries, if this is a map.
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }
}

fn numbers_equal(a: f64, b: f64) -> bool {
    if a.is_nan() {
        return b.is_nan();
    }
    if a == 0.0 && b == 0.0 {
        return a.is_sign_negative() == b.is_sign_negative();
    }
    a == b
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => numbers_equal(*a, *b),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            // BTreeMap keeps keys sorted, so insertion order never leaks into
            // the comparison.
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

// NaN is equal to itself under the comparator above, so equality is reflexive.
impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Value::String(s) => write!(f, "{s:?}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key:?}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Undefined
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<&Value> for Value {
    fn from(v: &Value) -> Self {
        v.clone()
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Value>> From<&[T]> for Value {
    fn from(items: &[T]) -> Self {
        Value::List(items.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<Value>> From<BTreeMap<String, V>> for Value {
    fn from(map: BTreeMap<String, V>) -> Self {
        Value::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<V: Into<Value>> From<HashMap<String, V>> for Value {
    fn from(map: HashMap<String, V>) -> Self {
        Value::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::List(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Map(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, Value)]) -> Value {
        entries
            .iter()
            .map(|(k, v)| (*k, v.clone()))
            .collect::<Value>()
    }

    #[test]
    fn test_scalar_equality() {
        assert_eq!(Value::from(1), Value::from(1.0));
        assert_eq!(Value::from("a"), Value::from(String::from("a")));
        assert_ne!(Value::from(1), Value::from("1"));
        assert_ne!(Value::from(true), Value::from(1));
        assert_ne!(Value::Null, Value::Undefined);
    }

    #[test]
    fn test_nan_and_signed_zero() {
        assert_eq!(Value::from(f64::NAN), Value::from(f64::NAN));
        assert_ne!(Value::from(0.0), Value::from(-0.0));
        assert_eq!(Value::from(-0.0), Value::from(-0.0));
    }

    #[test]
    fn test_list_equality_is_ordered() {
        let a = Value::from(vec!["Salt", "Pepper"]);
        let b = Value::from(vec!["Salt", "Pepper"]);
        let reversed = Value::from(vec!["Pepper", "Salt"]);
        let shorter = Value::from(vec!["Salt"]);

        assert_eq!(a, b);
        assert_ne!(a, reversed);
        assert_ne!(a, shorter);
    }

    #[test]
    fn test_map_equality_ignores_insertion_order() {
        let a = map(&[("name", "Bonnie".into()), ("age", 23.into())]);
        let b = map(&[("age", 23.into()), ("name", "Bonnie".into())]);
        let extra = map(&[
            ("age", 23.into()),
            ("name", "Bonnie".into()),
            ("alias", Value::Undefined),
        ]);

        assert_eq!(a, b);
        assert_ne!(a, extra);
    }

    #[test]
    fn test_nested_equality() {
        let build = || {
            Value::from(vec![
                map(&[("name", "Bonnie".into())]),
                map(&[("name", "Clyde".into())]),
            ])
        };
        assert_eq!(build(), build());
        assert_ne!(build(), Value::from(vec![map(&[("name", "Bonnie".into())])]));
    }

    #[test]
    fn test_get_reads_map_fields_only() {
        let person = map(&[("type", "person".into())]);
        assert_eq!(person.get("type"), Some(&Value::from("person")));
        assert_eq!(person.get("missing"), None);
        assert_eq!(Value::from("type").get("type"), None);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::from(3).as_i64(), Some(3));
        assert_eq!(Value::from(3.5).as_i64(), None);
        assert_eq!(Value::from(-3).as_i64(), Some(-3));
        assert_eq!(Value::from(i64::MIN).as_i64(), Some(i64::MIN));
        assert_eq!(Value::from(1e20).as_i64(), None);
        assert_eq!(Value::from(-1e300).as_i64(), None);
        assert_eq!(Value::from(f64::INFINITY).as_i64(), None);
        assert_eq!(Value::from(f64::NAN).as_i64(), None);
        assert_eq!(Value::from(3.5).as_f64(), Some(3.5));
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert_eq!(Value::from(false).as_bool(), Some(false));
        assert_eq!(Value::from(vec![1, 2]).as_list().map(<[Value]>::len), Some(2));
        assert!(Value::default().is_undefined());
        assert!(Value::from(None::<i32>).is_null());
    }

    #[test]
    fn test_display() {
        let value = Value::from(vec![
            Value::from(1985),
            Value::from(0.5),
            Value::from("car"),
            map(&[("ok", true.into())]),
            Value::Undefined,
        ]);
        assert_eq!(
            value.to_string(),
            r#"[1985, 0.5, "car", {"ok": true}, undefined]"#
        );
    }
}
