//! SAI (Serial Audio Interface) DAI driver
//!
//! Serves every port of one SAI block as a DAI of a single [`DaiType`]. Each
//! port sits behind its own enable GPIO (level shifter / clock buffer OE), so
//! bringing a port up or down is a single pin toggle:
//!
//! ```text
//! probe(port i)      → enable[i] high, port clean
//! set_config(port i) → decode blob → SaiConfig → port i active config
//! remove(port i)     → enable[i] low, active config forgotten
//! ```
//!
//! # Hardware Pins
//!
//! STM32H743: one output pin per SAI sub-block. Pin assignment is board
//! specific and supplied by the caller.
//!
//! The driver is shared by every [`dai::Dai`] of its type through a
//! `&'static dyn DaiOps`, so per-port state sits behind one blocking mutex.
//! Calls only arrive from inside the DAI core's device lock, which makes the
//! port lock uncontended in practice.

pub mod config;

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal::digital::OutputPin;
use platform::{DaiId, DaiOps, DaiType, DriverError};

pub use config::{ClockProvider, SaiConfig, SaiConfigError, SaiFormat, WordLength};

/// One SAI port: its enable pin and what the driver last applied to it.
struct SaiPort<P> {
    enable: P,
    enabled: bool,
    active: Option<SaiConfig>,
}

impl<P: OutputPin> SaiPort<P> {
    fn new(enable: P) -> Self {
        Self {
            enable,
            enabled: false,
            active: None,
        }
    }
}

/// DAI driver for the `N` ports of one SAI block.
pub struct SaiDai<P, const N: usize, M: RawMutex = CriticalSectionRawMutex> {
    dai_type: DaiType,
    ports: Mutex<M, RefCell<[SaiPort<P>; N]>>,
}

impl<P: OutputPin, const N: usize, M: RawMutex> SaiDai<P, N, M> {
    /// Create a driver for `dai_type`; port `i` is gated by `enable_pins[i]`.
    ///
    /// Pins are taken as-is; every port starts disabled and unconfigured.
    pub fn new(dai_type: DaiType, enable_pins: [P; N]) -> Self {
        Self {
            dai_type,
            ports: Mutex::new(RefCell::new(enable_pins.map(SaiPort::new))),
        }
    }

    /// Interface type this driver serves.
    pub fn dai_type(&self) -> DaiType {
        self.dai_type
    }

    /// Number of ports.
    pub const fn port_count(&self) -> usize {
        N
    }

    /// `true` while port `index` is probed.
    pub fn is_enabled(&self, index: u32) -> bool {
        self.with_port(index, |port| port.enabled).unwrap_or(false)
    }

    /// Configuration last applied to port `index`, if any.
    pub fn active_config(&self, index: u32) -> Option<SaiConfig> {
        self.with_port(index, |port| port.active).flatten()
    }

    fn with_port<R>(&self, index: u32, f: impl FnOnce(&mut SaiPort<P>) -> R) -> Option<R> {
        let slot = usize::try_from(index).ok()?;
        self.ports.lock(|cell| cell.borrow_mut().get_mut(slot).map(f))
    }

    /// Resolve `dai` to one of our ports and run `f` on it.
    fn on_port(
        &self,
        dai: DaiId,
        f: impl FnOnce(&mut SaiPort<P>) -> Result<(), DriverError>,
    ) -> Result<(), DriverError> {
        if dai.dai_type != self.dai_type {
            return Err(DriverError::NoDevice);
        }
        self.with_port(dai.index, f).unwrap_or(Err(DriverError::NoDevice))
    }
}

impl<P, const N: usize, M> DaiOps for SaiDai<P, N, M>
where
    P: OutputPin + Send,
    M: RawMutex + Sync,
{
    fn probe(&self, dai: DaiId) -> Result<(), DriverError> {
        self.on_port(dai, |port| {
            port.enable.set_high().map_err(|_| DriverError::Bus)?;
            port.enabled = true;
            port.active = None;
            #[cfg(feature = "defmt")]
            defmt::debug!("SAI {} enabled", dai);
            #[cfg(feature = "tracing")]
            tracing::debug!("SAI {} enabled", dai);
            Ok(())
        })
    }

    fn remove(&self, dai: DaiId) -> Result<(), DriverError> {
        self.on_port(dai, |port| {
            // The port is treated as down even if the pin write fails.
            let result = port.enable.set_low().map_err(|_| DriverError::Bus);
            port.enabled = false;
            port.active = None;
            #[cfg(feature = "defmt")]
            defmt::debug!("SAI {} disabled", dai);
            #[cfg(feature = "tracing")]
            tracing::debug!("SAI {} disabled", dai);
            result
        })
    }

    fn set_config(&self, dai: DaiId, blob: &[u8]) -> Result<(), DriverError> {
        self.on_port(dai, |port| {
            if !port.enabled {
                return Err(DriverError::InvalidState);
            }
            let config = SaiConfig::decode(blob).map_err(|_err| {
                #[cfg(feature = "defmt")]
                defmt::warn!("SAI {} rejected config: {}", dai, _err);
                #[cfg(feature = "tracing")]
                tracing::warn!("SAI {} rejected config: {}", dai, _err);
                DriverError::InvalidConfig
            })?;
            port.active = Some(config);
            #[cfg(feature = "defmt")]
            defmt::info!(
                "SAI {} configured: {=u32} Hz x {=u8} ch",
                dai,
                config.sample_rate_hz,
                config.channels
            );
            #[cfg(feature = "tracing")]
            tracing::info!(
                "SAI {} configured: {} Hz x {} ch",
                dai,
                config.sample_rate_hz,
                config.channels
            );
            Ok(())
        })
    }
}
