//! # multimethod - Value-Based Multiple Dispatch
//!
//! `multimethod` routes calls to one of several registered handlers by the
//! value of a key derived from the call's arguments. Keys are compared
//! structurally, so `["Salt", "Pepper"]` built twice selects the same handler.
//!
//! ## Quick Start
//!
//! ```rust
//! use multimethod::{MultiMethod, Value, value};
//!
//! let mut area = MultiMethod::with_projection("shape").unwrap();
//! area.register("square", |args: &[Value]| {
//!     let side = args[0].get("side").and_then(Value::as_f64).unwrap_or_default();
//!     side * side
//! })
//! .register("unit", 1.0)
//! .set_default(0);
//!
//! assert_eq!(area.call(value!({ "shape": "square", "side": 3 })).unwrap(), Value::from(9));
//! assert_eq!(area.call(value!({ "shape": "unit" })).unwrap(), Value::from(1));
//! assert_eq!(area.call(value!({ "shape": "blob" })).unwrap(), Value::from(0));
//! ```
//!
//! ## Building Blocks
//!
//! - [`Value`]: dynamic data with structural equality
//! - [`Projection`]: derives the dispatch key (identity, field, procedure)
//! - [`Handler`]: a literal returned verbatim or a procedure invoked with the arguments
//! - [`MethodRegistry`]: ordered entries with unique keys
//! - [`MultiMethod`]: the dispatch table; [`SharedMultiMethod`] for cross-thread use
//!
//! ## Features
//!
//! - `macros`: `#[derive(IntoValue)]` for turning structs into values
//! - `tracing`: trace-level events for registration and dispatch

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use multimethod_core::{
    BoxError, Handler, IntoHandler, IntoOutcome, IntoProjection, KeyFn, Map, MultiMethodError,
    Procedure, Projection, Value,
};

#[cfg(feature = "macros")]
pub use multimethod_macros::IntoValue;

mod builder;
mod dispatch;
mod macros;
mod registry;
mod shared;
pub mod testing;

pub use builder::MultiMethodBuilder;
pub use dispatch::{MultiMethod, Selection};
pub use registry::{MatchEntry, MethodRegistry};
pub use shared::SharedMultiMethod;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
