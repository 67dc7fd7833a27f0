//! Digital Audio Interface (DAI) driver contract
//!
//! A DAI is one physical serial audio port (SSP, SAI, DMIC, HDA link). The
//! lifecycle core in the `dai` crate decides *when* a port is brought up or torn
//! down; the driver behind [`DaiOps`] decides *how*.
//!
//! # Call Contract
//!
//! ```text
//! ref_count 0 → 1   ──▶  DaiOps::probe
//! ref_count 1 → 0   ──▶  DaiOps::remove        (failure logged, never propagated)
//! select_config(i)  ──▶  DaiOps::set_config    (blob i, verbatim)
//! ```
//!
//! All three calls are synchronous and may block on hardware I/O. They run with
//! the device lock held, so an implementation must not call back into the same
//! device.

use core::fmt;

/// Interface-type identifier.
///
/// The numbering follows the IPC ABI used by the host audio stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct DaiType(pub u32);

impl DaiType {
    /// Synchronous Serial Port.
    pub const SSP: Self = Self(0);
    /// Digital microphone (PDM) interface.
    pub const DMIC: Self = Self(1);
    /// High-Definition Audio link.
    pub const HDA: Self = Self(2);
    /// Serial Audio Interface (STM32 SAI block).
    pub const SAI: Self = Self(3);

    /// Short human-readable name for log output.
    pub const fn name(self) -> &'static str {
        match self.0 {
            0 => "ssp",
            1 => "dmic",
            2 => "hda",
            3 => "sai",
            _ => "dai",
        }
    }
}

impl fmt::Display for DaiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.0)
    }
}

/// Identity of a single DAI instance: its type plus its index within that type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DaiId {
    /// Interface type.
    pub dai_type: DaiType,
    /// Stable index within the type.
    pub index: u32,
}

impl DaiId {
    /// Build an identifier.
    pub const fn new(dai_type: DaiType, index: u32) -> Self {
        Self { dai_type, index }
    }
}

impl fmt::Display for DaiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.dai_type.name(), self.index)
    }
}

/// Hardware-layer failure reported by a [`DaiOps`] implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// The driver does not serve this type/index.
    NoDevice,
    /// Register or GPIO access failed.
    Bus,
    /// Hardware did not become ready in time.
    Timeout,
    /// Hardware is owned by another user.
    Busy,
    /// Operation is not valid in the port's current state.
    InvalidState,
    /// The configuration blob could not be decoded or was rejected.
    InvalidConfig,
    /// The requested feature is not supported by this port.
    Unsupported,
}

#[cfg(feature = "std")]
impl std::error::Error for DriverError {}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDevice => write!(f, "no such DAI"),
            Self::Bus => write!(f, "DAI bus access failed"),
            Self::Timeout => write!(f, "DAI hardware timeout"),
            Self::Busy => write!(f, "DAI hardware busy"),
            Self::InvalidState => write!(f, "DAI in invalid state"),
            Self::InvalidConfig => write!(f, "invalid DAI configuration"),
            Self::Unsupported => write!(f, "unsupported DAI operation"),
        }
    }
}

/// Driver operations for one family of DAI instances.
///
/// One implementation usually serves every index of a type and dispatches on
/// [`DaiId::index`]. Implementations are shared between execution contexts and
/// therefore take `&self`; per-port state belongs behind the driver's own lock.
pub trait DaiOps: Sync {
    /// Activate the hardware behind `dai`.
    ///
    /// Called exactly once per 0→1 transition of the device reference count.
    fn probe(&self, dai: DaiId) -> Result<(), DriverError>;

    /// Deactivate the hardware behind `dai`.
    ///
    /// Called exactly once per 1→0 transition. A failure is logged by the
    /// caller; software-side teardown proceeds regardless.
    fn remove(&self, dai: DaiId) -> Result<(), DriverError>;

    /// Push an opaque configuration blob to the hardware.
    fn set_config(&self, dai: DaiId, blob: &[u8]) -> Result<(), DriverError>;
}
