//! Reference-counted acquire/release.
//!
//! Hardware activation is tied to the edges of the reference count:
//!
//! ```text
//!            acquire(CREATE)             acquire            acquire
//! ┌────────┐   probe() ok   ┌─────────┐ ───────▶ ┌─────────┐ ───────▶ …
//! │ rc = 0 │ ─────────────▶ │ rc = 1  │          │ rc = 2  │
//! │inactive│ ◀───────────── │ active  │ ◀─────── │ active  │ ◀─────── …
//! └────────┘    remove()    └─────────┘ release  └─────────┘ release
//!             configs dropped
//! ```
//!
//! Both edges run under the device lock, so concurrent users of the same
//! device observe exactly one probe per activation and one remove per
//! deactivation. Users of other devices are never held up by either edge.

use core::fmt;
use core::ops::Deref;

use platform::DaiId;

use crate::device::Dai;
use crate::error::DaiError;
use crate::flags::DaiFlags;

impl Dai {
    /// Take one reference, probing the hardware on the 0→1 edge.
    ///
    /// On any error the reference count and configuration store are untouched.
    pub(crate) fn get(&self, flags: DaiFlags) -> Result<(), DaiError> {
        let id = self.id();
        self.with_state(|state| {
            let next = state
                .ref_count
                .checked_add(1)
                .ok_or(DaiError::RefCountOverflow(id))?;

            if state.ref_count == 0 {
                if !flags.contains(DaiFlags::CREATE) {
                    dai_trace!("dai_get(): {} inactive and CREATE not requested", id);
                    return Err(DaiError::NotReady(id));
                }
                if let Err(cause) = self.ops().probe(id) {
                    dai_error!("dai_get() error: probe of {} failed: {}", id, cause);
                    return Err(DaiError::ProbeFailed { dai: id, cause });
                }
                // Fresh activation never inherits blobs from an earlier one.
                state.reset_configs();
            }

            state.ref_count = next;
            dai_trace!("dai_get(): {}, ref_count = {}", id, next);
            Ok(())
        })
    }

    /// Drop one reference, removing the hardware on the 1→0 edge.
    ///
    /// A failing `remove` is logged and otherwise ignored: the count, the
    /// stored blobs and the selection are always reset.
    ///
    /// # Panics
    ///
    /// If the reference count is already zero (more releases than acquires).
    pub(crate) fn put(&self) {
        let id = self.id();
        self.with_state(|state| {
            assert!(
                state.ref_count > 0,
                "DAI released more times than it was acquired"
            );
            state.ref_count = state.ref_count.saturating_sub(1);

            if state.ref_count == 0 {
                if let Err(cause) = self.ops().remove(id) {
                    dai_error!("dai_put() error: remove of {} failed: {}", id, cause);
                }
                state.reset_configs();
            }

            dai_trace!("dai_put(): {}, ref_count = {}", id, state.ref_count);
        });
    }
}

/// One user's hold on a DAI.
///
/// Obtained from [`DaiRegistry::acquire`](crate::DaiRegistry::acquire) and
/// given back with [`release`](Self::release). The handle borrows the
/// installed device table, so it can never outlive the device it names.
/// Dereferences to the [`Dai`] for read-only inspection.
#[must_use = "an acquired DAI stays active until the handle is released"]
pub struct DaiHandle<'a> {
    dai: &'a Dai,
}

impl<'a> DaiHandle<'a> {
    pub(crate) fn new(dai: &'a Dai) -> Self {
        Self { dai }
    }

    /// The device this handle holds.
    pub fn dai(&self) -> &'a Dai {
        self.dai
    }

    /// Type and index of the held device.
    pub fn id(&self) -> DaiId {
        self.dai.id()
    }

    /// Give this reference back.
    ///
    /// Releasing the last reference removes the hardware and discards every
    /// stored configuration blob.
    pub fn release(self) {
        self.dai.put();
    }
}

impl Deref for DaiHandle<'_> {
    type Target = Dai;

    fn deref(&self) -> &Self::Target {
        self.dai
    }
}

impl fmt::Debug for DaiHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DaiHandle").field(&self.dai.id()).finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use platform::mocks::MockDaiOps;
    use platform::{DaiType, DriverError};

    fn device(ops: &'static MockDaiOps) -> Dai {
        Dai::new(DaiType::SSP, 0, ops)
    }

    #[test]
    fn test_get_without_create_on_inactive_is_not_ready() {
        let ops = MockDaiOps::leaked();
        let dai = device(ops);
        assert_eq!(
            dai.get(DaiFlags::empty()),
            Err(DaiError::NotReady(dai.id()))
        );
        assert_eq!(ops.probe_count(), 0);
        assert_eq!(dai.ref_count(), 0);
    }

    #[test]
    fn test_get_with_create_probes_once() {
        let ops = MockDaiOps::leaked();
        let dai = device(ops);
        dai.get(DaiFlags::CREATE).unwrap();
        dai.get(DaiFlags::CREATE).unwrap();
        dai.get(DaiFlags::empty()).unwrap();
        assert_eq!(ops.probe_count(), 1);
        assert_eq!(dai.ref_count(), 3);
    }

    #[test]
    fn test_probe_failure_leaves_count_at_zero() {
        let ops = MockDaiOps::leaked();
        ops.set_fail_probe(true);
        let dai = device(ops);
        assert_eq!(
            dai.get(DaiFlags::CREATE),
            Err(DaiError::ProbeFailed {
                dai: dai.id(),
                cause: DriverError::Timeout,
            })
        );
        assert_eq!(dai.ref_count(), 0);
    }

    #[test]
    fn test_put_removes_on_last_reference_only() {
        let ops = MockDaiOps::leaked();
        let dai = device(ops);
        dai.get(DaiFlags::CREATE).unwrap();
        dai.get(DaiFlags::CREATE).unwrap();
        dai.put();
        assert_eq!(ops.remove_count(), 0);
        assert!(dai.is_active());
        dai.put();
        assert_eq!(ops.remove_count(), 1);
        assert!(!dai.is_active());
    }

    #[test]
    fn test_remove_failure_still_resets() {
        let ops = MockDaiOps::leaked();
        let dai = device(ops);
        dai.get(DaiFlags::CREATE).unwrap();
        ops.set_fail_remove(true);
        dai.put();
        assert_eq!(dai.ref_count(), 0);
        assert_eq!(ops.remove_count(), 1);
        // The device can be brought up again afterwards.
        ops.set_fail_remove(false);
        dai.get(DaiFlags::CREATE).unwrap();
        assert_eq!(ops.probe_count(), 2);
    }

    #[test]
    #[should_panic(expected = "released more times")]
    fn test_put_on_inactive_device_traps() {
        let dai = device(MockDaiOps::leaked());
        dai.put();
    }

    #[test]
    fn test_overflow_is_reported_not_wrapped() {
        let dai = device(MockDaiOps::leaked());
        dai.with_state(|state| state.ref_count = u32::MAX);
        assert_eq!(
            dai.get(DaiFlags::empty()),
            Err(DaiError::RefCountOverflow(dai.id()))
        );
        assert_eq!(dai.ref_count(), u32::MAX);
    }

    #[test]
    fn test_handle_debug_and_deref() {
        let dai = device(MockDaiOps::leaked());
        dai.get(DaiFlags::CREATE).unwrap();
        let handle = DaiHandle::new(&dai);
        assert_eq!(
            std::format!("{handle:?}"),
            "DaiHandle(DaiId { dai_type: DaiType(0), index: 0 })"
        );
        assert_eq!(handle.ref_count(), 1);
        handle.release();
        assert_eq!(dai.ref_count(), 0);
    }
}
