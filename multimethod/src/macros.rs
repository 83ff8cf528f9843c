//! Literal construction macros.
//!
//! - [`value!`](crate::value) builds a [`Value`](crate::Value) from JSON-like syntax
//! - [`args!`](crate::args) builds an argument array for [`MultiMethod::invoke`](crate::MultiMethod::invoke)

/// Build a [`Value`](crate::Value) from JSON-like syntax.
///
/// Lists use `[...]`, maps use `{ "key": value, ... }`, and `undefined` /
/// `null` name the two empty values. Anything else is converted with
/// `Value::from`; wrap compound expressions (including negative numbers) in
/// parentheses.
///
/// # Example
///
/// ```rust
/// use multimethod::{Value, value};
///
/// let robbers = value!([{ "name": "Bonnie" }, { "name": "Clyde" }]);
/// assert_eq!(robbers.as_list().map(<[Value]>::len), Some(2));
/// assert_eq!(value!((-1)), Value::from(-1));
/// ```
#[macro_export]
macro_rules! value {
    (undefined) => {
        $crate::Value::Undefined
    };
    (null) => {
        $crate::Value::Null
    };
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::List(::std::vec![ $( $crate::value!($elem) ),* ])
    };
    ({ $($key:literal : $val:tt),* $(,)? }) => {{
        #[allow(unused_mut)]
        let mut map = $crate::Map::new();
        $(
            map.insert(::std::string::String::from($key), $crate::value!($val));
        )*
        $crate::Value::Map(map)
    }};
    ($other:expr) => {
        $crate::Value::from($other)
    };
}

/// Build an argument array, converting each element with [`value!`](crate::value).
///
/// ```rust
/// use multimethod::{MultiMethod, Value, args};
///
/// let mm = MultiMethod::with_projection(|args: &[Value]| args.len()).unwrap();
/// assert!(mm.invoke(&args![1, "two", [3]]).unwrap().is_undefined());
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:tt),* $(,)?) => {
        [ $( $crate::value!($arg) ),* ]
    };
}
