//! Load-once classifier cache.
//!
//! The classifier is deserialized once per process and the same instance is
//! handed to every caller afterwards.
//!
//! # Lifecycle
//!
//! - Empty until the first successful [`ModelCache::get_or_load`].
//! - Concurrent first calls are serialized on an init lock; exactly one of
//!   them runs the loader, the rest observe its result.
//! - A failed load stores nothing, so a later call may try again.
//! - Once filled, the slot is never replaced or cleared.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use log::{debug, info};

use crate::inference::InferenceError;
use crate::model::ChurnClassifier;
use crate::persist::ReadError;

/// Well-known location of the classifier artifact, relative to the working
/// directory.
pub const DEFAULT_MODEL_PATH: &str = "models/churn_model.json";

/// Write-once holder for a loaded model.
#[derive(Debug)]
pub struct ModelCache<M> {
    slot: OnceLock<Arc<M>>,
    init: Mutex<()>,
    loads: AtomicUsize,
}

impl<M> Default for ModelCache<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> ModelCache<M> {
    /// Create an empty cache.
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
            init: Mutex::new(()),
            loads: AtomicUsize::new(0),
        }
    }

    /// The loaded model, if any.
    pub fn get(&self) -> Option<Arc<M>> {
        self.slot.get().cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Number of loader invocations that succeeded. At most 1.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Acquire)
    }

    /// Return the cached model, running `load` first if the cache is empty.
    pub fn get_or_load<F>(&self, load: F) -> Result<Arc<M>, ReadError>
    where
        F: FnOnce() -> Result<M, ReadError>,
    {
        if let Some(model) = self.slot.get() {
            return Ok(Arc::clone(model));
        }

        // The guard protects no data, so a poisoned lock is still usable.
        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(model) = self.slot.get() {
            return Ok(Arc::clone(model));
        }

        let model = Arc::new(load()?);
        self.loads.fetch_add(1, Ordering::AcqRel);
        Ok(Arc::clone(self.slot.get_or_init(|| model)))
    }
}

static SHARED: ModelCache<ChurnClassifier> = ModelCache::new();

/// Process-wide classifier, loaded from `path` on first use.
///
/// Only the first successful call reads `path`; every later call returns the
/// same instance whatever path it passes.
pub fn shared_model(path: impl AsRef<Path>) -> Result<Arc<ChurnClassifier>, InferenceError> {
    let path = path.as_ref();
    if let Some(model) = SHARED.get() {
        debug!("using cached classifier");
        return Ok(model);
    }

    let model = SHARED.get_or_load(|| {
        let model = ChurnClassifier::load_json(path)?;
        info!(
            "loaded classifier from {} ({} trees)",
            path.display(),
            model.forest().n_trees()
        );
        Ok(model)
    })?;
    Ok(model)
}

/// The process-wide cache backing [`shared_model`].
pub fn shared_cache() -> &'static ModelCache<ChurnClassifier> {
    &SHARED
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;
    use std::thread;

    #[test]
    fn loads_once_sequentially() {
        let cache = ModelCache::new();
        let calls = AtomicUsize::new(0);

        let first = cache
            .get_or_load(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(String::from("model"))
            })
            .unwrap();
        for _ in 0..5 {
            let again = cache
                .get_or_load(|| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(String::from("other"))
                })
                .unwrap();
            assert!(Arc::ptr_eq(&first, &again));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.load_count(), 1);
        assert_eq!(first.as_str(), "model");
    }

    #[test]
    fn loads_once_concurrently() {
        const THREADS: usize = 16;
        let cache: ModelCache<Vec<u8>> = ModelCache::new();
        let calls = AtomicUsize::new(0);
        let barrier = Barrier::new(THREADS);

        let models: Vec<Arc<Vec<u8>>> = thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        cache
                            .get_or_load(|| {
                                calls.fetch_add(1, Ordering::SeqCst);
                                thread::sleep(std::time::Duration::from_millis(20));
                                Ok(vec![1, 2, 3])
                            })
                            .unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.load_count(), 1);
        assert!(models.iter().all(|m| Arc::ptr_eq(m, &models[0])));
    }

    #[test]
    fn failed_load_is_not_cached() {
        let cache = ModelCache::new();

        let err = cache
            .get_or_load(|| Err(ReadError::Validation("broken".into())))
            .unwrap_err();
        assert!(matches!(err, ReadError::Validation(_)));
        assert!(!cache.is_loaded());
        assert_eq!(cache.load_count(), 0);

        let model = cache.get_or_load(|| Ok(7u32)).unwrap();
        assert_eq!(*model, 7);
        assert_eq!(cache.get().as_deref(), Some(&7));
    }
}
