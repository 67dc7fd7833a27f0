//! DAI lifecycle core
//!
//! Tracks how many users hold each Digital Audio Interface instance, probes the
//! hardware on first acquisition, removes it on last release, and keeps a
//! bounded list of opaque configuration blobs per instance.
//!
//! # Components
//!
//! ```text
//! DaiRegistry ──find_type──▶ DaiTypeInfo ──find──▶ Dai ──▶ DaiOps (driver)
//!      │                                            ▲
//!      └──────────── acquire ──▶ DaiHandle ─────────┘
//!                                 ├── add_config / select_config
//!                                 └── release
//! ```
//!
//! - [`registry`] - type registry and device-table lookup
//! - [`lifecycle`] - reference-counted acquire/release and [`DaiHandle`]
//! - [`config_store`] - bounded configuration blobs per device
//! - [`device`] - [`Dai`] and its per-device lock
//!
//! # Example
//!
//! ```
//! use dai::{Dai, DaiFlags, DaiRegistry, DaiTypeInfo};
//! use platform::{mocks::MockDaiOps, DaiType};
//!
//! let ops = MockDaiOps::leaked();
//! let ssp: [Dai; 2] = [Dai::new(DaiType::SSP, 0, ops), Dai::new(DaiType::SSP, 1, ops)];
//! let types = [DaiTypeInfo::new(DaiType::SSP, &ssp)];
//!
//! let mut registry = DaiRegistry::new();
//! registry.install(&types);
//!
//! let ssp1 = registry.acquire(DaiType::SSP, 1, DaiFlags::CREATE)?;
//! let slot = ssp1.add_config(&[0x01, 0x02])?;
//! ssp1.select_config(slot)?;
//! ssp1.release();
//! # Ok::<(), dai::DaiError>(())
//! ```
//!
//! # Features
//!
//! - `defmt` - log through defmt (firmware builds)
//! - `tracing` - log through tracing (host builds)
//! - `std` - enable host mocks in `platform`

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

extern crate alloc;

#[macro_use]
mod log;

pub mod blob;
pub mod config;
pub mod config_store;
pub mod device;
pub mod error;
pub mod flags;
pub mod lifecycle;
pub mod registry;

pub use blob::ConfigBlob;
pub use config::MAX_CONFIGS;
pub use device::Dai;
pub use error::DaiError;
pub use flags::DaiFlags;
pub use lifecycle::DaiHandle;
pub use registry::{DaiRegistry, DaiTypeInfo};
