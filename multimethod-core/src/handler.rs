//! # Handlers
//!
//! A [`Handler`] is what a dispatch table selects for a call. It is either a
//! literal [`Value`] handed back verbatim, or a procedure invoked with the
//! original call arguments.
//!
//! Resolution happens in exactly one place, [`Handler::resolve`], so callers
//! never have to ask whether something is callable.
//!
//! # Usage Patterns
//!
//! 1. **Literal**: `table.register(1, "one")`
//! 2. **Closure**: `table.register(1, |args: &[Value]| args.len())`
//! 3. **Function item**: `fn plus1(args: &[Value]) -> Value { ... }`
//! 4. **Fallible**: any closure returning `Result<Value, E>` with `E: Into<BoxError>`

use crate::{error::BoxError, value::Value};
use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    sync::Arc,
};

/// An invocable handler body.
pub type Procedure = Arc<dyn Fn(&[Value]) -> Result<Value, BoxError> + Send + Sync>;

/// A registered literal value or invocable procedure.
#[derive(Clone)]
pub enum Handler {
    /// Returned as-is; never invoked.
    Literal(Value),
    /// Invoked with the call arguments.
    Procedure(Procedure),
}

impl Handler {
    /// Wrap a literal value.
    pub fn literal(value: impl Into<Value>) -> Self {
        Handler::Literal(value.into())
    }

    /// Wrap a procedure.
    pub fn procedure<F, R>(f: F) -> Self
    where
        F: Fn(&[Value]) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        Handler::Procedure(Arc::new(move |args: &[Value]| f(args).into_outcome()))
    }

    /// The handler a fresh table falls back to: ignores its arguments and
    /// yields [`Value::Undefined`].
    pub fn noop() -> Self {
        Handler::procedure(|_: &[Value]| ())
    }

    /// Returns true if resolving this handler runs code.
    pub fn is_procedure(&self) -> bool {
        matches!(self, Handler::Procedure(_))
    }

    /// Resolve the handler against a call's arguments.
    ///
    /// Procedures run and their result (or error) is returned unchanged;
    /// literals are cloned.
    pub fn resolve(&self, args: &[Value]) -> Result<Value, BoxError> {
        match self {
            Handler::Literal(value) => Ok(value.clone()),
            Handler::Procedure(f) => f(args),
        }
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Handler::Procedure(_) => f.write_str("Procedure(..)"),
        }
    }
}

// ============================================================================
// Outcome conversion
// ============================================================================

/// Conversion of a procedure's return type into a dispatch result.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be returned from a handler",
    label = "not convertible into a dispatch result",
    note = "Return a `Value`, a scalar, `()`, or `Result<Value, E>` where `E: Into<BoxError>`."
)]
pub trait IntoOutcome {
    /// Convert into the value (or error) produced by an invocation.
    fn into_outcome(self) -> Result<Value, BoxError>;
}

impl<E: Into<BoxError>> IntoOutcome for Result<Value, E> {
    fn into_outcome(self) -> Result<Value, BoxError> {
        self.map_err(Into::into)
    }
}

// ============================================================================
// Handler conversion
// ============================================================================

/// Anything that can be registered as a [`Handler`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a multimethod handler",
    label = "not a literal value or a procedure",
    note = "Handlers are literal values or closures of the form `|args: &[Value]| ...`."
)]
pub trait IntoHandler {
    /// Convert into a handler.
    fn into_handler(self) -> Handler;
}

impl IntoHandler for Handler {
    fn into_handler(self) -> Handler {
        self
    }
}

impl<F, R> IntoHandler for F
where
    F: Fn(&[Value]) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    fn into_handler(self) -> Handler {
        Handler::procedure(self)
    }
}

/// Literal types are both valid handlers and valid procedure results.
macro_rules! impl_literal {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoHandler for $ty {
                fn into_handler(self) -> Handler {
                    Handler::Literal(Value::from(self))
                }
            }

            impl IntoOutcome for $ty {
                fn into_outcome(self) -> Result<Value, BoxError> {
                    Ok(Value::from(self))
                }
            }
        )*
    };
}

impl_literal!(
    Value,
    (),
    bool,
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    &str,
    String,
);

/// Collections of literals are literals too.
macro_rules! impl_literal_collection {
    ($([$($generics:tt)*] $ty:ty),* $(,)?) => {
        $(
            impl<$($generics)*> IntoHandler for $ty {
                fn into_handler(self) -> Handler {
                    Handler::Literal(Value::from(self))
                }
            }

            impl<$($generics)*> IntoOutcome for $ty {
                fn into_outcome(self) -> Result<Value, BoxError> {
                    Ok(Value::from(self))
                }
            }
        )*
    };
}

impl_literal_collection!(
    [T: Into<Value>] Option<T>,
    [T: Into<Value>] Vec<T>,
    [T: Into<Value>, const N: usize] [T; N],
    [V: Into<Value>] BTreeMap<String, V>,
    [V: Into<Value>] HashMap<String, V>,
);
