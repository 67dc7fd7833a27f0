//! Error type for DAI lifecycle and configuration operations.
//!
//! Every recoverable failure leaves device state exactly as it was before the
//! call. Programming errors (releasing more often than acquiring) are not
//! represented here; they trap.

use platform::{DaiId, DaiType, DriverError};
use thiserror_no_std::Error;

/// Failure of a DAI core operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DaiError {
    /// No installed type matches, or the type has no device with this index.
    #[error("no DAI of type {dai_type} with index {index}")]
    NotFound {
        /// Requested interface type.
        dai_type: DaiType,
        /// Requested index within the type.
        index: u32,
    },

    /// The device is inactive and activation was not requested.
    #[error("DAI {0} is not active")]
    NotReady(DaiId),

    /// The driver failed to activate the hardware.
    #[error("probe of DAI {dai} failed: {cause}")]
    ProbeFailed {
        /// Device being activated.
        dai: DaiId,
        /// Driver-reported failure, verbatim.
        cause: DriverError,
    },

    /// All configuration slots are in use.
    #[error("DAI {dai} already holds the maximum of {max} configurations")]
    CapacityExceeded {
        /// Device whose store is full.
        dai: DaiId,
        /// Slot capacity.
        max: usize,
    },

    /// The private copy of a configuration blob could not be allocated.
    #[error("out of memory copying a {size}-byte configuration for DAI {dai}")]
    OutOfMemory {
        /// Device the blob was destined for.
        dai: DaiId,
        /// Requested allocation size in bytes.
        size: usize,
    },

    /// The requested configuration index is not stored on the device.
    #[error("DAI {dai} has {count} configurations; index {index} is invalid")]
    InvalidArgument {
        /// Device addressed.
        dai: DaiId,
        /// Requested index.
        index: usize,
        /// Number of stored configurations.
        count: usize,
    },

    /// The driver rejected the selected configuration.
    #[error("applying configuration to DAI {dai} failed: {cause}")]
    ApplyFailed {
        /// Device being configured.
        dai: DaiId,
        /// Driver-reported failure, verbatim.
        cause: DriverError,
    },

    /// The reference count cannot grow any further.
    #[error("DAI {0} reference count overflow")]
    RefCountOverflow(DaiId),
}

impl DaiError {
    /// The driver failure behind a [`ProbeFailed`](Self::ProbeFailed) or
    /// [`ApplyFailed`](Self::ApplyFailed) error.
    pub fn driver_error(&self) -> Option<DriverError> {
        match self {
            Self::ProbeFailed { cause, .. } | Self::ApplyFailed { cause, .. } => Some(*cause),
            _ => None,
        }
    }
}
