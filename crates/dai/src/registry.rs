//! Type registry and device-table lookup.
//!
//! The registry maps an interface type to the table of devices of that type.
//! It is written once during boot, before any other context can reach it, and
//! is read-only afterwards:
//!
//! ```text
//! boot:     let mut reg = DaiRegistry::new();  reg.install(&TYPES);
//! runtime:  reg.acquire(DaiType::SSP, 2, DaiFlags::CREATE)?   (shared &reg)
//! ```
//!
//! `install` takes `&mut self`, so the borrow checker enforces that no lookup
//! can run concurrently with it. Tables are small (bounded by the number of
//! hardware instances), so both lookups are linear scans.

use platform::DaiType;

use crate::device::Dai;
use crate::error::DaiError;
use crate::flags::DaiFlags;
use crate::lifecycle::DaiHandle;

/// All devices of one interface type.
pub struct DaiTypeInfo<'a> {
    dai_type: DaiType,
    dais: &'a [Dai],
}

impl<'a> DaiTypeInfo<'a> {
    /// Describe the device table `dais` for `dai_type`.
    pub const fn new(dai_type: DaiType, dais: &'a [Dai]) -> Self {
        Self { dai_type, dais }
    }

    /// Interface type served by this table.
    pub fn dai_type(&self) -> DaiType {
        self.dai_type
    }

    /// Every device of this type.
    pub fn dais(&self) -> &'a [Dai] {
        self.dais
    }

    /// The device with the given index, if present.
    pub fn find(&self, index: u32) -> Option<&'a Dai> {
        self.dais.iter().find(|dai| dai.index() == index)
    }
}

/// Process-wide mapping from interface type to device table.
pub struct DaiRegistry<'a> {
    types: &'a [DaiTypeInfo<'a>],
}

impl<'a> DaiRegistry<'a> {
    /// An empty registry; every lookup fails until [`install`](Self::install).
    pub const fn new() -> Self {
        Self { types: &[] }
    }

    /// Install the type table, replacing any previous installation.
    ///
    /// Type identifiers must be unique within `types`; with duplicates only the
    /// first entry is ever found.
    pub fn install(&mut self, types: &'a [DaiTypeInfo<'a>]) {
        self.types = types;
        dai_trace!("dai_install(): {} types", types.len());
    }

    /// Every installed type table.
    pub fn types(&self) -> &'a [DaiTypeInfo<'a>] {
        self.types
    }

    /// The device table for `dai_type`, if installed.
    pub fn find_type(&self, dai_type: DaiType) -> Option<&'a DaiTypeInfo<'a>> {
        self.types.iter().find(|info| info.dai_type == dai_type)
    }

    /// Take a reference on device `(dai_type, index)`.
    ///
    /// If nobody holds the device yet, `flags` must contain
    /// [`DaiFlags::CREATE`]; the hardware is then probed and any stale
    /// configuration discarded before the handle is returned.
    ///
    /// # Errors
    ///
    /// - [`DaiError::NotFound`] for an unknown type or index.
    /// - [`DaiError::NotReady`] if the device is inactive and `CREATE` is absent.
    /// - [`DaiError::ProbeFailed`] if the driver cannot activate the hardware.
    pub fn acquire(
        &self,
        dai_type: DaiType,
        index: u32,
        flags: DaiFlags,
    ) -> Result<DaiHandle<'a>, DaiError> {
        let Some(dai) = self
            .find_type(dai_type)
            .and_then(|info| info.find(index))
        else {
            dai_error!(
                "dai_get() error: type = {}, index = {} not found",
                dai_type,
                index
            );
            return Err(DaiError::NotFound { dai_type, index });
        };

        dai.get(flags)?;
        Ok(DaiHandle::new(dai))
    }
}

impl Default for DaiRegistry<'_> {
    fn default() -> Self {
        Self::new()
    }
}
