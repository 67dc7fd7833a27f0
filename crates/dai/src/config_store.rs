//! Per-device configuration store.
//!
//! The host sends every hardware variant it may need as an opaque blob
//! (`add_config`) and later picks one (`select_config`), which is pushed to the
//! driver. Blobs live until the last user releases the device.

use alloc::collections::TryReserveError;

use crate::blob::ConfigBlob;
use crate::config::MAX_CONFIGS;
use crate::device::Dai;
use crate::error::DaiError;
use crate::lifecycle::DaiHandle;

impl Dai {
    pub(crate) fn add_config(&self, blob: &[u8]) -> Result<usize, DaiError> {
        self.insert_config(blob.len(), || ConfigBlob::try_copy_from(blob))
    }

    /// Store the blob produced by `copy`, which runs under the device lock
    /// only once a free slot is known to exist.
    fn insert_config(
        &self,
        size: usize,
        copy: impl FnOnce() -> Result<ConfigBlob, TryReserveError>,
    ) -> Result<usize, DaiError> {
        let id = self.id();
        self.with_state(|state| {
            if state.configs.is_full() {
                dai_error!(
                    "dai_add_config() error: {} max configs allowed: {}",
                    id,
                    MAX_CONFIGS
                );
                return Err(DaiError::CapacityExceeded {
                    dai: id,
                    max: MAX_CONFIGS,
                });
            }

            let copy = copy().map_err(|_| {
                dai_error!(
                    "dai_add_config() error: {} no memory for {} bytes",
                    id,
                    size
                );
                DaiError::OutOfMemory { dai: id, size }
            })?;

            let slot = state.configs.len();
            state
                .configs
                .push(copy)
                .map_err(|_| DaiError::CapacityExceeded {
                    dai: id,
                    max: MAX_CONFIGS,
                })?;

            dai_trace!(
                "dai_add_config(): {} num configs {}",
                id,
                state.configs.len()
            );
            Ok(slot)
        })
    }

    pub(crate) fn select_config(&self, index: usize) -> Result<(), DaiError> {
        let id = self.id();
        self.with_state(|state| {
            let count = state.configs.len();
            let Some(blob) = state.configs.get(index) else {
                dai_error!(
                    "dai_set_config() error: {} invalid config index {} of {}",
                    id,
                    index,
                    count
                );
                return Err(DaiError::InvalidArgument {
                    dai: id,
                    index,
                    count,
                });
            };

            dai_trace!("dai_set_config(): {} current config -> {}", id, index);
            state.current = Some(index);

            // Applied with the lock held so a concurrent release cannot drop
            // the blob, and a concurrent select cannot interleave, mid-call.
            self.ops()
                .set_config(id, blob.as_bytes())
                .map_err(|cause| {
                    dai_error!("dai_set_config() error: {} apply failed: {}", id, cause);
                    DaiError::ApplyFailed { dai: id, cause }
                })
        })
    }
}

impl DaiHandle<'_> {
    /// Store a private copy of `blob` in the next free slot.
    ///
    /// Returns the slot index, which is the value to pass to
    /// [`select_config`](Self::select_config) later. Slots are filled in call
    /// order starting at 0.
    ///
    /// # Errors
    ///
    /// - [`DaiError::CapacityExceeded`] if all [`MAX_CONFIGS`] slots are used.
    /// - [`DaiError::OutOfMemory`] if the copy cannot be allocated.
    ///
    /// The store is unchanged on error.
    pub fn add_config(&self, blob: &[u8]) -> Result<usize, DaiError> {
        self.dai().add_config(blob)
    }

    /// Make slot `index` the current configuration and push it to the driver.
    ///
    /// The driver receives the stored bytes verbatim and its result is
    /// returned as-is. The selection is committed before the driver is called,
    /// so it stays in place even if the driver rejects the blob.
    ///
    /// # Errors
    ///
    /// - [`DaiError::InvalidArgument`] if no blob is stored at `index`; the
    ///   current selection is unchanged.
    /// - [`DaiError::ApplyFailed`] if the driver rejects the blob.
    pub fn select_config(&self, index: usize) -> Result<(), DaiError> {
        self.dai().select_config(index)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use crate::flags::DaiFlags;
    use platform::mocks::MockDaiOps;
    use platform::{DaiType, DriverError};

    fn active_device(ops: &'static MockDaiOps) -> Dai {
        let dai = Dai::new(DaiType::SSP, 0, ops);
        dai.get(DaiFlags::CREATE).unwrap();
        dai
    }

    #[test]
    fn test_add_returns_slot_in_call_order() {
        let dai = active_device(MockDaiOps::leaked());
        let handle = DaiHandle::new(&dai);
        assert_eq!(handle.add_config(&[0xA0]).unwrap(), 0);
        assert_eq!(handle.add_config(&[0xA1]).unwrap(), 1);
        assert_eq!(handle.config_count(), 2);
        assert_eq!(handle.with_config(1, <[u8]>::to_vec), Some(std::vec![0xA1]));
    }

    #[test]
    fn test_add_beyond_capacity_fails_and_keeps_store() {
        let dai = active_device(MockDaiOps::leaked());
        let handle = DaiHandle::new(&dai);
        for i in 0..MAX_CONFIGS {
            handle.add_config(&[i as u8]).unwrap();
        }
        assert_eq!(
            handle.add_config(&[0xFF]),
            Err(DaiError::CapacityExceeded {
                dai: handle.id(),
                max: MAX_CONFIGS,
            })
        );
        assert_eq!(handle.config_count(), MAX_CONFIGS);
        assert_eq!(
            handle.with_config(MAX_CONFIGS - 1, <[u8]>::to_vec),
            Some(std::vec![(MAX_CONFIGS - 1) as u8])
        );
    }

    #[test]
    fn test_allocation_failure_reports_out_of_memory() {
        let dai = active_device(MockDaiOps::leaked());
        let handle = DaiHandle::new(&dai);
        handle.add_config(&[1, 2]).unwrap();
        handle.select_config(0).unwrap();

        let size = 4096;
        let refused = dai.insert_config(size, || {
            Err(crate::blob::reserve_exact(usize::MAX).unwrap_err())
        });
        assert_eq!(
            refused,
            Err(DaiError::OutOfMemory {
                dai: handle.id(),
                size,
            })
        );
        assert_eq!(handle.config_count(), 1);
        assert_eq!(handle.current_config(), Some(0));
        assert_eq!(handle.add_config(&[3]).unwrap(), 1);
    }

    #[test]
    fn test_select_pushes_stored_bytes() {
        let ops = MockDaiOps::leaked();
        let dai = active_device(ops);
        let handle = DaiHandle::new(&dai);
        handle.add_config(&[1, 2, 3]).unwrap();
        handle.add_config(&[4, 5]).unwrap();
        handle.select_config(1).unwrap();
        assert_eq!(handle.current_config(), Some(1));
        assert_eq!(ops.last_applied(), Some(std::vec![4, 5]));
    }

    #[test]
    fn test_select_out_of_range_keeps_selection() {
        let ops = MockDaiOps::leaked();
        let dai = active_device(ops);
        let handle = DaiHandle::new(&dai);
        handle.add_config(&[7]).unwrap();
        handle.select_config(0).unwrap();
        assert_eq!(
            handle.select_config(1),
            Err(DaiError::InvalidArgument {
                dai: handle.id(),
                index: 1,
                count: 1,
            })
        );
        assert_eq!(handle.current_config(), Some(0));
        assert_eq!(ops.set_config_count(), 1);
    }

    #[test]
    fn test_select_on_empty_store_is_invalid() {
        let dai = active_device(MockDaiOps::leaked());
        let handle = DaiHandle::new(&dai);
        assert!(matches!(
            handle.select_config(0),
            Err(DaiError::InvalidArgument { count: 0, .. })
        ));
        assert_eq!(handle.current_config(), None);
    }

    #[test]
    fn test_apply_failure_is_returned_and_selection_kept() {
        let ops = MockDaiOps::leaked();
        let dai = active_device(ops);
        let handle = DaiHandle::new(&dai);
        handle.add_config(&[9, 9]).unwrap();
        ops.set_fail_set_config(true);
        assert_eq!(
            handle.select_config(0),
            Err(DaiError::ApplyFailed {
                dai: handle.id(),
                cause: DriverError::InvalidConfig,
            })
        );
        assert_eq!(handle.current_config(), Some(0));
    }

    #[test]
    fn test_last_release_discards_blobs() {
        let ops = MockDaiOps::leaked();
        let dai = active_device(ops);
        let handle = DaiHandle::new(&dai);
        handle.add_config(&[1]).unwrap();
        handle.select_config(0).unwrap();
        handle.release();
        assert_eq!(dai.config_count(), 0);
        assert_eq!(dai.current_config(), None);
    }
}
