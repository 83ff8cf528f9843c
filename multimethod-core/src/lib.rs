//! # multimethod-core
//!
//! Core value and handler types for the multimethod dispatch table.
//!
//! This crate has minimal dependencies and is designed to be imported by code
//! that only produces dispatch keys or handlers and does not need the table
//! itself.
//!
//! # Building Blocks
//!
//! ## [`Value`]
//!
//! The dynamic data model: scalars, lists and maps. Its equality is
//! structural and is the only comparison the dispatch table ever performs.
//!
//! ## [`Projection`]
//!
//! Derives a dispatch key from the call arguments: identity, a named field
//! of the first argument, or a user procedure.
//!
//! ## [`Handler`]
//!
//! What a dispatch selects: a literal value returned verbatim or a procedure
//! invoked with the call arguments.
//!
//! # Error Types
//!
//! - [`MultiMethodError`] - Configuration errors
//! - [`BoxError`] - Handler failures

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod handler;
mod projection;
mod value;

// Re-exports
pub use error::{BoxError, MultiMethodError};
pub use handler::{Handler, IntoHandler, IntoOutcome, Procedure};
pub use projection::{IntoProjection, KeyFn, Projection};
pub use value::{Map, Value};
