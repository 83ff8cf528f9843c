//! # Key derivation (Projection)
//!
//! A [`Projection`] turns a call's argument list into the single [`Value`]
//! the dispatch table looks up. There are three strategies:
//!
//! - [`Projection::Identity`]: the first argument is the key.
//! - [`Projection::Field`]: the named property of the first argument is the
//!   key. A missing property yields [`Value::Undefined`], which can still be
//!   matched.
//! - [`Projection::Function`]: an arbitrary procedure over all arguments.
//!
//! [`IntoProjection`] is the validating conversion used by every setter.
//! Field names and procedures are accepted; a dynamic [`Value`] is accepted
//! only when it is a string.

use crate::{error::MultiMethodError, value::Value};
use std::{fmt, sync::Arc};

/// A key-derivation procedure.
pub type KeyFn = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// Strategy for deriving a dispatch key from call arguments.
#[derive(Clone, Default)]
pub enum Projection {
    /// Use the first argument.
    #[default]
    Identity,
    /// Pluck the named property off the first argument.
    Field(String),
    /// Call a procedure with every argument.
    Function(KeyFn),
}

impl Projection {
    /// Field-name shorthand.
    pub fn field(name: impl Into<String>) -> Self {
        Projection::Field(name.into())
    }

    /// Wrap a key-derivation procedure.
    pub fn function<F, K>(f: F) -> Self
    where
        F: Fn(&[Value]) -> K + Send + Sync + 'static,
        K: Into<Value>,
    {
        Projection::Function(Arc::new(move |args: &[Value]| f(args).into()))
    }

    /// Derive the dispatch key for `args`.
    pub fn derive_key(&self, args: &[Value]) -> Value {
        match self {
            Projection::Identity => args.first().cloned().unwrap_or_default(),
            Projection::Field(name) => args
                .first()
                .and_then(|subject| subject.get(name))
                .cloned()
                .unwrap_or_default(),
            Projection::Function(f) => f(args),
        }
    }
}

impl fmt::Debug for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Projection::Identity => f.write_str("Identity"),
            Projection::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Projection::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// Anything that can configure how a dispatch key is derived.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a dispatch projection",
    label = "not a procedure or a field name",
    note = "Pass a field name or a closure of the form `|args: &[Value]| ...`."
)]
pub trait IntoProjection {
    /// Validate and convert into a projection.
    fn into_projection(self) -> Result<Projection, MultiMethodError>;
}

impl IntoProjection for Projection {
    fn into_projection(self) -> Result<Projection, MultiMethodError> {
        Ok(self)
    }
}

impl IntoProjection for &str {
    fn into_projection(self) -> Result<Projection, MultiMethodError> {
        Ok(Projection::field(self))
    }
}

impl IntoProjection for String {
    fn into_projection(self) -> Result<Projection, MultiMethodError> {
        Ok(Projection::Field(self))
    }
}

/// Dynamic configuration path: only strings name a field.
impl IntoProjection for Value {
    fn into_projection(self) -> Result<Projection, MultiMethodError> {
        match self {
            Value::String(name) => Ok(Projection::Field(name)),
            other => Err(MultiMethodError::InvalidProjection {
                found: other.kind(),
            }),
        }
    }
}

impl<F, K> IntoProjection for F
where
    F: Fn(&[Value]) -> K + Send + Sync + 'static,
    K: Into<Value>,
{
    fn into_projection(self) -> Result<Projection, MultiMethodError> {
        Ok(Projection::function(self))
    }
}
