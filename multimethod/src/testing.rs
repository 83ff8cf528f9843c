//! Testing utilities for multimethod.
//!
//! - [`CallRecorder`]: a procedure handler that records every argument list
//!   it receives and returns a programmed value or error.

use crate::{BoxError, Handler, Value};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

// A panicking handler under test must not hide the calls recorded before it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A handler spy.
///
/// # Example
///
/// ```rust
/// use multimethod::{MultiMethod, Value, testing::CallRecorder};
///
/// let recorder = CallRecorder::returning("hit");
/// let mut mm = MultiMethod::new();
/// mm.register(1, recorder.handler());
///
/// assert_eq!(mm.call(1).unwrap(), Value::from("hit"));
/// assert_eq!(recorder.calls(), vec![vec![Value::from(1)]]);
/// ```
#[derive(Clone, Default)]
pub struct CallRecorder {
    calls: Arc<Mutex<Vec<Vec<Value>>>>,
    output: Arc<Mutex<Value>>,
    error: Arc<Mutex<Option<String>>>,
}

impl CallRecorder {
    /// Create a recorder whose handler yields [`Value::Undefined`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder whose handler yields `output`.
    pub fn returning(output: impl Into<Value>) -> Self {
        let recorder = Self::new();
        recorder.set_output(output);
        recorder
    }

    /// Set the value the handler returns.
    pub fn set_output(&self, output: impl Into<Value>) {
        *lock(&self.output) = output.into();
    }

    /// Make the handler fail with `message`.
    pub fn set_error(&self, message: impl Into<String>) {
        *lock(&self.error) = Some(message.into());
    }

    /// Clear error state.
    pub fn clear_error(&self) {
        *lock(&self.error) = None;
    }

    /// A procedure handler bound to this recorder.
    pub fn handler(&self) -> Handler {
        let recorder = self.clone();
        Handler::procedure(move |args: &[Value]| recorder.record(args))
    }

    fn record(&self, args: &[Value]) -> Result<Value, BoxError> {
        lock(&self.calls).push(args.to_vec());

        if let Some(ref message) = *lock(&self.error) {
            return Err(message.clone().into());
        }

        Ok(lock(&self.output).clone())
    }

    /// Argument lists received so far.
    pub fn calls(&self) -> Vec<Vec<Value>> {
        lock(&self.calls).clone()
    }

    /// Number of invocations.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Forget recorded calls.
    pub fn reset(&self) {
        lock(&self.calls).clear();
    }
}
