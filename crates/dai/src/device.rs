//! DAI device instance and its lock.
//!
//! A [`Dai`] lives in a statically allocated device table for the whole run of
//! the firmware. All mutable state sits behind one spinlock per device:
//!
//! ```text
//! Dai
//! ├── id, ops                      (immutable after construction)
//! └── spin::Mutex<DaiState>
//!     ├── ref_count                (0 ⇔ hardware inactive)
//!     ├── configs[..MAX_CONFIGS]   (owned blobs, insertion order)
//!     └── current                  (None or index < configs.len())
//! ```
//!
//! No code path ever holds two device locks at once.
//!
//! # Locking
//!
//! Every device owns its own [`spin::Mutex`]. Driver callbacks (`probe`,
//! `remove`, `set_config`) run with that lock held, so a slow driver stalls
//! later users of the same device only; acquire, release and configuration of
//! any other device proceed in parallel. Interrupts stay enabled. Contexts that
//! may preempt a lock holder on the same core (interrupt handlers) must not
//! touch a DAI.

use core::fmt;

use heapless::Vec;
use platform::{DaiId, DaiOps, DaiType};
use spin::Mutex;

use crate::blob::ConfigBlob;
use crate::config::MAX_CONFIGS;

/// Lock-protected part of a device.
pub(crate) struct DaiState {
    pub(crate) ref_count: u32,
    pub(crate) configs: Vec<ConfigBlob, MAX_CONFIGS>,
    pub(crate) current: Option<usize>,
}

impl DaiState {
    const fn new() -> Self {
        Self {
            ref_count: 0,
            configs: Vec::new(),
            current: None,
        }
    }

    /// Drop every stored blob and forget the selection.
    pub(crate) fn reset_configs(&mut self) {
        self.configs.clear();
        self.current = None;
    }
}

/// One physical DAI instance.
pub struct Dai {
    id: DaiId,
    ops: &'static dyn DaiOps,
    state: Mutex<DaiState>,
}

impl Dai {
    /// Create an inactive device served by `ops`.
    ///
    /// `const` so device tables can be placed in `static`s.
    pub const fn new(dai_type: DaiType, index: u32, ops: &'static dyn DaiOps) -> Self {
        Self {
            id: DaiId::new(dai_type, index),
            ops,
            state: Mutex::new(DaiState::new()),
        }
    }

    /// Type and index of this device.
    pub fn id(&self) -> DaiId {
        self.id
    }

    /// Interface type of this device.
    pub fn dai_type(&self) -> DaiType {
        self.id.dai_type
    }

    /// Index of this device within its type.
    pub fn index(&self) -> u32 {
        self.id.index
    }

    pub(crate) fn ops(&self) -> &'static dyn DaiOps {
        self.ops
    }

    /// Run `f` with exclusive access to the device state.
    ///
    /// The lock is released on every exit path of `f`, including early error
    /// returns. `f` must not re-enter this device.
    pub(crate) fn with_state<R>(&self, f: impl FnOnce(&mut DaiState) -> R) -> R {
        let mut state = self.state.lock();
        f(&mut state)
    }

    /// Number of users currently holding this device.
    pub fn ref_count(&self) -> u32 {
        self.with_state(|state| state.ref_count)
    }

    /// `true` while at least one user holds the device (hardware probed).
    pub fn is_active(&self) -> bool {
        self.ref_count() > 0
    }

    /// Number of stored configuration blobs.
    pub fn config_count(&self) -> usize {
        self.with_state(|state| state.configs.len())
    }

    /// Index of the selected configuration, if any.
    pub fn current_config(&self) -> Option<usize> {
        self.with_state(|state| state.current)
    }

    /// Run `f` over the stored blob at `index`, under the device lock.
    ///
    /// Returns `None` if no blob is stored at `index`.
    pub fn with_config<R>(&self, index: usize, f: impl FnOnce(&[u8]) -> R) -> Option<R> {
        self.with_state(|state| state.configs.get(index).map(|blob| f(blob.as_bytes())))
    }
}

impl fmt::Debug for Dai {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dai").field("id", &self.id).finish_non_exhaustive()
    }
}
