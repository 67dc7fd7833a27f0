//! Mock implementations for testing
//!
//! [`MockDaiOps`] implements [`DaiOps`] without any hardware. It counts every
//! call, records each blob handed to `set_config`, can be told to fail any of
//! the three operations, and flags overlapping probes so concurrency tests can
//! assert exactly-once activation.

#![cfg(any(test, feature = "std"))]

use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::boxed::Box;
use std::sync::Mutex;
use std::vec::Vec;

use crate::dai::{DaiId, DaiOps, DriverError};

/// Mock DAI driver - records all calls for test assertions.
pub struct MockDaiOps {
    probe_count: AtomicUsize,
    remove_count: AtomicUsize,
    set_config_count: AtomicUsize,
    active: AtomicUsize,
    overlap: AtomicBool,
    fail_probe: AtomicBool,
    fail_remove: AtomicBool,
    fail_set_config: AtomicBool,
    applied: Mutex<Vec<(DaiId, Vec<u8>)>>,
}

impl MockDaiOps {
    /// Create a new mock. Every operation succeeds until told otherwise.
    ///
    /// `const` so a mock can back a `static` device table.
    pub const fn new() -> Self {
        Self {
            probe_count: AtomicUsize::new(0),
            remove_count: AtomicUsize::new(0),
            set_config_count: AtomicUsize::new(0),
            active: AtomicUsize::new(0),
            overlap: AtomicBool::new(false),
            fail_probe: AtomicBool::new(false),
            fail_remove: AtomicBool::new(false),
            fail_set_config: AtomicBool::new(false),
            applied: Mutex::new(Vec::new()),
        }
    }

    /// Allocate a mock with `'static` lifetime, as device tables require.
    ///
    /// Leaks one allocation per call; intended for tests only.
    pub fn leaked() -> &'static Self {
        Box::leak(Box::new(Self::new()))
    }

    /// Make subsequent `probe` calls fail with [`DriverError::Timeout`].
    pub fn set_fail_probe(&self, fail: bool) {
        self.fail_probe.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `remove` calls fail with [`DriverError::Bus`].
    pub fn set_fail_remove(&self, fail: bool) {
        self.fail_remove.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `set_config` calls fail with [`DriverError::InvalidConfig`].
    pub fn set_fail_set_config(&self, fail: bool) {
        self.fail_set_config.store(fail, Ordering::SeqCst);
    }

    /// Number of `probe` calls so far (including failed ones).
    pub fn probe_count(&self) -> usize {
        self.probe_count.load(Ordering::SeqCst)
    }

    /// Number of `remove` calls so far (including failed ones).
    pub fn remove_count(&self) -> usize {
        self.remove_count.load(Ordering::SeqCst)
    }

    /// Number of `set_config` calls so far (including failed ones).
    pub fn set_config_count(&self) -> usize {
        self.set_config_count.load(Ordering::SeqCst)
    }

    /// Number of instances currently probed and not yet removed.
    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// `true` if `probe` was ever entered while another probe/remove cycle on
    /// the same mock was still open.
    pub fn overlap_detected(&self) -> bool {
        self.overlap.load(Ordering::SeqCst)
    }

    /// Every blob delivered to `set_config`, in call order.
    pub fn applied(&self) -> Vec<(DaiId, Vec<u8>)> {
        self.applied
            .lock()
            .map(|applied| applied.clone())
            .unwrap_or_default()
    }

    /// The most recent blob delivered to `set_config`.
    pub fn last_applied(&self) -> Option<Vec<u8>> {
        self.applied().pop().map(|(_, blob)| blob)
    }
}

impl Default for MockDaiOps {
    fn default() -> Self {
        Self::new()
    }
}

impl DaiOps for MockDaiOps {
    fn probe(&self, _dai: DaiId) -> Result<(), DriverError> {
        self.probe_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_probe.load(Ordering::SeqCst) {
            return Err(DriverError::Timeout);
        }
        if self.active.fetch_add(1, Ordering::SeqCst) != 0 {
            self.overlap.store(true, Ordering::SeqCst);
        }
        Ok(())
    }

    fn remove(&self, _dai: DaiId) -> Result<(), DriverError> {
        self.remove_count.fetch_add(1, Ordering::SeqCst);
        // The hardware is considered gone even when teardown reports failure.
        self.active.fetch_sub(1, Ordering::SeqCst);
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(DriverError::Bus);
        }
        Ok(())
    }

    fn set_config(&self, dai: DaiId, blob: &[u8]) -> Result<(), DriverError> {
        self.set_config_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_set_config.load(Ordering::SeqCst) {
            return Err(DriverError::InvalidConfig);
        }
        if let Ok(mut applied) = self.applied.lock() {
            applied.push((dai, blob.to_vec()));
        }
        Ok(())
    }
}
