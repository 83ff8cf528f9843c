//! # Dispatch table
//!
//! [`MultiMethod`] ties the three parts of a multimethod together:
//!
//! 1. **Projection**: derives a dispatch key from the call arguments.
//! 2. **Registry**: finds the handler whose key deep-equals the derived key.
//! 3. **Invoker**: falls back to the default handler when nothing matches,
//!    then resolves the handler (procedures run, literals pass through).
//!
//! Every part can be reconfigured at any time through `&mut self` setters,
//! each of which returns the table again for chaining.
//!
//! # Example
//!
//! ```rust
//! use multimethod::{MultiMethod, Value, value};
//!
//! let mut born_on = MultiMethod::with_projection("type").unwrap();
//! born_on
//!     .register("person", |args: &[Value]| args[0].get("yearBorn").cloned().unwrap_or_default())
//!     .register("car", |args: &[Value]| args[0].get("yearBuilt").cloned().unwrap_or_default())
//!     .set_default(1);
//!
//! let person = value!({ "type": "person", "yearBorn": 1985 });
//! assert_eq!(born_on.call(person).unwrap(), Value::from(1985));
//! assert_eq!(born_on.call(value!({})).unwrap(), Value::from(1));
//! ```

use crate::{builder::MultiMethodBuilder, registry::MethodRegistry};
use multimethod_core::{
    BoxError, Handler, IntoHandler, IntoProjection, MultiMethodError, Projection, Value,
};

/// Outcome of a lookup: which handler a call would run.
#[derive(Debug, Clone, Copy)]
pub enum Selection<'a> {
    /// A registered entry matched the dispatch key.
    Matched(&'a Handler),
    /// Nothing matched; the default handler applies.
    Fallback(&'a Handler),
}

impl<'a> Selection<'a> {
    /// Returns true if a registered entry matched.
    pub fn is_matched(&self) -> bool {
        matches!(self, Selection::Matched(_))
    }

    /// The selected handler, matched or not.
    pub fn handler(self) -> &'a Handler {
        match self {
            Selection::Matched(handler) | Selection::Fallback(handler) => handler,
        }
    }
}

/// A runtime-configurable multiple-dispatch table.
#[derive(Debug, Clone, Default)]
pub struct MultiMethod {
    projection: Projection,
    registry: MethodRegistry,
    default: Handler,
}

impl MultiMethod {
    /// Create a table that dispatches on its first argument.
    pub fn new() -> Self {
        Self {
            projection: Projection::Identity,
            registry: MethodRegistry::new(),
            default: Handler::noop(),
        }
    }

    /// Create a table with an initial projection.
    ///
    /// Fails with [`MultiMethodError::InvalidProjection`] when `projection`
    /// is neither a procedure nor a field name.
    pub fn with_projection<P: IntoProjection>(projection: P) -> Result<Self, MultiMethodError> {
        Ok(Self {
            projection: projection.into_projection()?,
            ..Self::new()
        })
    }

    /// Start a by-value builder.
    pub fn builder() -> MultiMethodBuilder {
        MultiMethodBuilder::new()
    }

    pub(crate) fn from_parts(
        projection: Projection,
        registry: MethodRegistry,
        default: Handler,
    ) -> Self {
        Self {
            projection,
            registry,
            default,
        }
    }

    // ========================================================================
    // Invocation
    // ========================================================================

    /// Dispatch a call.
    ///
    /// Errors returned by a procedure handler are passed through untouched.
    /// A call that matches nothing resolves the default handler, which for a
    /// fresh table yields [`Value::Undefined`].
    pub fn invoke(&self, args: &[Value]) -> Result<Value, BoxError> {
        self.select(args).handler().resolve(args)
    }

    /// Dispatch a single-argument call.
    pub fn call(&self, arg: impl Into<Value>) -> Result<Value, BoxError> {
        self.invoke(&[arg.into()])
    }

    /// Derive the dispatch key for `args` with the active projection.
    pub fn dispatch_key(&self, args: &[Value]) -> Value {
        self.projection.derive_key(args)
    }

    /// Pick the handler for `args` without running it.
    pub fn select(&self, args: &[Value]) -> Selection<'_> {
        self.select_key(&self.dispatch_key(args))
    }

    /// Pick the handler for an already derived dispatch key.
    pub fn select_key(&self, key: &Value) -> Selection<'_> {
        let selection = match self.registry.lookup(key) {
            Some(handler) => Selection::Matched(handler),
            None => Selection::Fallback(&self.default),
        };

        #[cfg(feature = "tracing")]
        {
            tracing::trace!(key = %key, matched = selection.is_matched(), "dispatch");
        }

        selection
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Replace the key-derivation strategy.
    ///
    /// On error the current projection is kept.
    pub fn set_projection<P: IntoProjection>(
        &mut self,
        projection: P,
    ) -> Result<&mut Self, MultiMethodError> {
        let projection = projection.into_projection()?;

        #[cfg(feature = "tracing")]
        {
            tracing::debug!(projection = ?projection, "projection changed");
        }

        self.projection = projection;
        Ok(self)
    }

    /// Register `handler` for calls whose dispatch key deep-equals `key`.
    ///
    /// Registering an existing key replaces its handler without moving it.
    pub fn register<K, H>(&mut self, key: K, handler: H) -> &mut Self
    where
        K: Into<Value>,
        H: IntoHandler,
    {
        let key = key.into();

        #[cfg(feature = "tracing")]
        let shown = tracing::enabled!(tracing::Level::TRACE).then(|| key.to_string());

        let _replaced = self.registry.register(key, handler.into_handler());

        #[cfg(feature = "tracing")]
        if let Some(shown) = shown {
            tracing::trace!(key = %shown, replaced = _replaced.is_some(), "method registered");
        }

        self
    }

    /// Remove the entry for `key`. Unknown keys are ignored.
    pub fn remove<K: Into<Value>>(&mut self, key: K) -> &mut Self {
        let key = key.into();
        let _removed = self.registry.remove(&key);

        #[cfg(feature = "tracing")]
        {
            tracing::trace!(key = %key, removed = _removed.is_some(), "method removed");
        }

        self
    }

    /// Replace the fallback used when no entry matches.
    pub fn set_default<H: IntoHandler>(&mut self, handler: H) -> &mut Self {
        self.default = handler.into_handler();

        #[cfg(feature = "tracing")]
        {
            tracing::trace!(handler = ?self.default, "default handler set");
        }

        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// The registered entries.
    pub fn registry(&self) -> &MethodRegistry {
        &self.registry
    }

    /// The active projection.
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// The fallback handler.
    pub fn default_handler(&self) -> &Handler {
        &self.default
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Check if no entries are registered.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value;

    fn plus1(args: &[Value]) -> Value {
        Value::from(args[0].as_f64().unwrap_or_default() + 1.0)
    }

    #[test]
    fn test_identity_default_is_undefined() {
        let mm = MultiMethod::new();
        assert!(mm.call(1).unwrap().is_undefined());
    }

    #[test]
    fn test_identity_dispatch() {
        let mut mm = MultiMethod::new();
        mm.register(1, plus1);
        assert_eq!(mm.call(1).unwrap(), Value::from(2));
    }

    #[test]
    fn test_default_procedure() {
        let mut mm = MultiMethod::new();
        mm.set_default(plus1);
        assert_eq!(mm.call(1).unwrap(), Value::from(2));
    }

    #[test]
    fn test_select_reports_fallback() {
        let mut mm = MultiMethod::new();
        mm.register("hit", true);

        assert!(mm.select(&[Value::from("hit")]).is_matched());
        assert!(!mm.select(&[Value::from("miss")]).is_matched());
        assert!(
            mm.select(&[Value::from("miss")])
                .handler()
                .is_procedure()
        );
    }

    #[test]
    fn test_set_projection_rejects_non_string_value() {
        let mut mm = MultiMethod::with_projection("type").unwrap();

        let err = mm.set_projection(Value::from(true)).unwrap_err();

        assert_eq!(err, MultiMethodError::InvalidProjection { found: "boolean" });
        assert!(matches!(mm.projection(), Projection::Field(name) if name == "type"));
    }

    #[test]
    fn test_with_projection_rejects_list() {
        let result = MultiMethod::with_projection(value!([1, 2]));
        assert!(matches!(
            result,
            Err(MultiMethodError::InvalidProjection { found: "list" })
        ));
    }

    #[test]
    fn test_dispatch_key_follows_projection() {
        let mut mm = MultiMethod::new();
        mm.set_projection(plus1).unwrap();
        assert_eq!(mm.dispatch_key(&[Value::from(1)]), Value::from(2));

        mm.set_projection("id").unwrap();
        let key = mm.dispatch_key(&[value!({ "id": 7 })]);
        assert_eq!(key, Value::from(7));
    }

    #[test]
    fn test_introspection() {
        let mut mm = MultiMethod::new();
        assert!(mm.is_empty());
        mm.register(1, 1).register(2, 2).set_default("none");

        assert_eq!(mm.len(), 2);
        assert!(mm.registry().contains(&Value::from(2)));
        assert!(matches!(mm.default_handler(), Handler::Literal(v) if *v == Value::from("none")));
    }

    #[test]
    fn test_select_key_skips_projection() {
        let mut mm = MultiMethod::with_projection("type").unwrap();
        mm.register("car", 1);

        assert!(mm.select_key(&Value::from("car")).is_matched());
        assert!(!mm.select(&[Value::from("car")]).is_matched());
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn test_register_with_trace_filtered_out() {
        let mut mm = MultiMethod::new();
        mm.register(value!({ "id": 1 }), "first")
            .register(value!({ "id": 1 }), "second");

        assert!(!tracing::enabled!(tracing::Level::TRACE));
        assert_eq!(mm.len(), 1);
        assert_eq!(mm.call(value!({ "id": 1 })).unwrap(), Value::from("second"));
    }
}
