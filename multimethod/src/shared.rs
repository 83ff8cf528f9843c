//! Thread-safe handle over a [`MultiMethod`].
//!
//! [`MultiMethod`] itself relies on the borrow checker: configuration needs
//! `&mut self`, so it cannot race with a lookup. [`SharedMultiMethod`] is for
//! tables that are reconfigured while other threads dispatch through them.
//! Each mutation is atomic with respect to a lookup.
//!
//! The projection and the selected handler are cloned out of the lock before
//! they run, so either may reconfigure the table that dispatched it.

use crate::dispatch::MultiMethod;
use multimethod_core::{
    BoxError, Handler, IntoHandler, IntoProjection, MultiMethodError, Projection, Value,
};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A cloneable, lock-guarded dispatch table.
#[derive(Debug, Clone, Default)]
pub struct SharedMultiMethod {
    inner: Arc<RwLock<MultiMethod>>,
}

impl SharedMultiMethod {
    /// Wrap an existing table.
    pub fn new(table: MultiMethod) -> Self {
        Self {
            inner: Arc::new(RwLock::new(table)),
        }
    }

    // The table has no intermediate states a panicking handler could leave
    // behind, so a poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, MultiMethod> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, MultiMethod> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Dispatch a call.
    pub fn invoke(&self, args: &[Value]) -> Result<Value, BoxError> {
        let projection: Projection = self.read().projection().clone();
        let key = projection.derive_key(args);
        let handler: Handler = self.read().select_key(&key).handler().clone();
        handler.resolve(args)
    }

    /// Dispatch a single-argument call.
    pub fn call(&self, arg: impl Into<Value>) -> Result<Value, BoxError> {
        self.invoke(&[arg.into()])
    }

    /// See [`MultiMethod::set_projection`].
    pub fn set_projection<P: IntoProjection>(
        &self,
        projection: P,
    ) -> Result<&Self, MultiMethodError> {
        self.write().set_projection(projection)?;
        Ok(self)
    }

    /// See [`MultiMethod::register`].
    pub fn register<K, H>(&self, key: K, handler: H) -> &Self
    where
        K: Into<Value>,
        H: IntoHandler,
    {
        self.write().register(key, handler);
        self
    }

    /// See [`MultiMethod::remove`].
    pub fn remove<K: Into<Value>>(&self, key: K) -> &Self {
        self.write().remove(key);
        self
    }

    /// See [`MultiMethod::set_default`].
    pub fn set_default<H: IntoHandler>(&self, handler: H) -> &Self {
        self.write().set_default(handler);
        self
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if no entries are registered.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Clone the current table out of the lock.
    pub fn snapshot(&self) -> MultiMethod {
        self.read().clone()
    }
}

impl From<MultiMethod> for SharedMultiMethod {
    fn from(table: MultiMethod) -> Self {
        Self::new(table)
    }
}

#[cfg(test)]
mod tests {
    use super::SharedMultiMethod;
    use crate::dispatch::MultiMethod;
    use multimethod_core::Value;
    use std::{sync::mpsc, thread, time::Duration};

    #[test]
    fn test_handler_can_reconfigure_its_table() {
        let shared = SharedMultiMethod::default();
        let handle = shared.clone();
        shared.register("learn", move |_: &[Value]| {
            handle.register("learned", true);
            "ok"
        });

        assert!(shared.call("learned").unwrap().is_undefined());
        assert_eq!(shared.call("learn").unwrap(), Value::from("ok"));
        assert_eq!(shared.call("learned").unwrap(), Value::from(true));
    }

    #[test]
    fn test_projection_can_reconfigure_its_table() {
        let shared = SharedMultiMethod::default();
        let handle = shared.clone();
        shared
            .set_projection(move |args: &[Value]| {
                handle.register("seen", true);
                args.first().cloned().unwrap_or_default()
            })
            .unwrap();

        let (tx, rx) = mpsc::channel();
        let table = shared.clone();
        thread::spawn(move || {
            let _ = tx.send(table.call("seen").map_err(|err| err.to_string()));
        });

        let result = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("projection ran under the table lock");
        assert_eq!(result.unwrap(), Value::from(true));
        assert_eq!(shared.len(), 1);
    }

    #[test]
    fn test_dispatch_across_threads() {
        let shared = SharedMultiMethod::from(
            MultiMethod::builder()
                .when(0, "even")
                .when(1, "odd")
                .build(),
        );
        let parity = {
            let table = shared.clone();
            move |n: i64| table.call(n % 2)
        };

        let workers: Vec<_> = (0..4_i64)
            .map(|n| {
                let parity = parity.clone();
                thread::spawn(move || parity(n))
            })
            .collect();

        let results: Vec<Value> = workers
            .into_iter()
            .map(|worker| worker.join().unwrap().unwrap())
            .collect();

        assert_eq!(
            results,
            vec![
                Value::from("even"),
                Value::from("odd"),
                Value::from("even"),
                Value::from("odd"),
            ]
        );
    }

    #[test]
    fn test_snapshot_is_independent() {
        let shared = SharedMultiMethod::default();
        shared.register(1, 1);
        let snapshot = shared.snapshot();
        shared.remove(1);

        assert_eq!(snapshot.len(), 1);
        assert!(shared.is_empty());
    }
}
