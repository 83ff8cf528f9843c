//! By-value builder for [`MultiMethod`].
//!
//! Mirrors the fluent construction style of a dynamic multimethod:
//!
//! ```rust
//! use multimethod::{MultiMethod, Value};
//!
//! let great_pairs = MultiMethod::builder()
//!     .when(vec!["Salt", "Pepper"], "Shakers")
//!     .otherwise("?")
//!     .build();
//!
//! assert_eq!(
//!     great_pairs.call(vec!["Salt", "Pepper"]).unwrap(),
//!     Value::from("Shakers")
//! );
//! ```

use crate::{dispatch::MultiMethod, registry::MethodRegistry};
use multimethod_core::{Handler, IntoHandler, IntoProjection, MultiMethodError, Projection, Value};

/// Builder for constructing a [`MultiMethod`].
#[derive(Debug, Clone, Default)]
pub struct MultiMethodBuilder {
    projection: Projection,
    registry: MethodRegistry,
    default: Handler,
}

impl MultiMethodBuilder {
    /// Create a builder with the identity projection and a no-op default.
    pub fn new() -> Self {
        Self {
            projection: Projection::Identity,
            registry: MethodRegistry::new(),
            default: Handler::noop(),
        }
    }

    /// Set the key-derivation strategy.
    pub fn dispatch<P: IntoProjection>(mut self, projection: P) -> Result<Self, MultiMethodError> {
        self.projection = projection.into_projection()?;
        Ok(self)
    }

    /// Register a handler. A repeated key replaces the earlier handler.
    pub fn when<K, H>(mut self, key: K, handler: H) -> Self
    where
        K: Into<Value>,
        H: IntoHandler,
    {
        self.registry.register(key.into(), handler.into_handler());
        self
    }

    /// Set the fallback handler.
    pub fn otherwise<H: IntoHandler>(mut self, handler: H) -> Self {
        self.default = handler.into_handler();
        self
    }

    /// Build the table.
    pub fn build(self) -> MultiMethod {
        MultiMethod::from_parts(self.projection, self.registry, self.default)
    }
}

#[cfg(test)]
mod tests {
    use super::MultiMethodBuilder;
    use multimethod_core::{MultiMethodError, Value};

    #[test]
    fn test_builder_chain() {
        let mm = MultiMethodBuilder::new()
            .when(1, "one")
            .when(2, "two")
            .when(3, "three")
            .build();

        assert_eq!(mm.call(1).unwrap(), Value::from("one"));
        assert_eq!(mm.call(2).unwrap(), Value::from("two"));
        assert_eq!(mm.call(3).unwrap(), Value::from("three"));
        assert!(mm.call(4).unwrap().is_undefined());
    }

    #[test]
    fn test_builder_override() {
        let mm = MultiMethodBuilder::new().when(1, 1).when(1, 2).build();
        assert_eq!(mm.len(), 1);
        assert_eq!(mm.call(1).unwrap(), Value::from(2));
    }

    #[test]
    fn test_builder_rejects_invalid_projection() {
        let result = MultiMethodBuilder::new().dispatch(Value::Null);
        assert!(matches!(
            result,
            Err(MultiMethodError::InvalidProjection { found: "null" })
        ));
    }

    #[test]
    fn test_builder_field_projection() -> Result<(), MultiMethodError> {
        let mm = MultiMethodBuilder::new()
            .dispatch("kind")?
            .when("a", 1)
            .otherwise(0)
            .build();

        let args = [[("kind", Value::from("a"))].into_iter().collect::<Value>()];
        assert_eq!(mm.invoke(&args).unwrap(), Value::from(1));
        assert_eq!(mm.invoke(&[Value::Null]).unwrap(), Value::from(0));
        Ok(())
    }
}
