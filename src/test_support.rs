//! Shared test support utilities
//!
//! Provides a configurable `MockFeedSizeOracle` for use in unit and
//! integration tests.

use crate::port::{FeedSizeOracle, OracleError};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy)]
enum Behaviour {
    Size(u64),
    Fail,
    Hang,
}

/// Mock oracle that records lookups for testing.
pub struct MockFeedSizeOracle {
    behaviour: Behaviour,
    ready: AtomicBool,
    ready_hangs: AtomicBool,
    calls: AtomicUsize,
    last_user_id: Mutex<Option<Option<String>>>,
}

impl MockFeedSizeOracle {
    fn with_behaviour(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            ready: AtomicBool::new(true),
            ready_hangs: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
            last_user_id: Mutex::new(None),
        }
    }

    /// Every lookup answers `size`.
    pub fn with_size(size: u64) -> Self {
        Self::with_behaviour(Behaviour::Size(size))
    }

    /// Every lookup fails with a store error.
    pub fn failing() -> Self {
        Self::with_behaviour(Behaviour::Fail)
    }

    /// Every lookup never completes.
    pub fn hanging() -> Self {
        Self::with_behaviour(Behaviour::Hang)
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Readiness probes never complete while set.
    pub fn set_ready_hangs(&self, hangs: bool) {
        self.ready_hangs.store(hangs, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `None` until the first lookup, then the user id it was given.
    pub fn last_user_id(&self) -> Option<Option<String>> {
        self.last_user_id.lock().unwrap().clone()
    }
}

impl FeedSizeOracle for MockFeedSizeOracle {
    fn feed_size<'a>(
        &'a self,
        user_id: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Result<u64, OracleError>> + Send + 'a>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_user_id.lock().unwrap() = Some(user_id.map(str::to_string));
        let behaviour = self.behaviour;
        Box::pin(async move {
            match behaviour {
                Behaviour::Size(size) => Ok(size),
                Behaviour::Fail => Err(OracleError::Store("Mock lookup failure".to_string())),
                Behaviour::Hang => std::future::pending().await,
            }
        })
    }

    fn ready(&self) -> Pin<Box<dyn Future<Output = Result<(), OracleError>> + Send + '_>> {
        Box::pin(async move {
            if self.ready_hangs.load(Ordering::SeqCst) {
                return std::future::pending().await;
            }
            if self.ready.load(Ordering::SeqCst) {
                Ok(())
            } else {
                Err(OracleError::NotReady("Mock store offline".to_string()))
            }
        })
    }
}
