//! Hardware Abstraction Layer (HAL) for DAI lifecycle management
//!
//! This crate provides the trait-based contract between the DAI lifecycle core
//! and the drivers that own the actual serial audio hardware, enabling
//! development and testing without physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Firmware (concrete DAI drivers, board wiring)
//!         ↓
//! DAI core (registry, reference counting, configuration store)
//!         ↓
//! Platform HAL (this crate - identifiers, driver contract)
//!         ↓
//! Hardware Layer (Embassy HAL + PAC)
//! ```
//!
//! # Features
//!
//! - `std`: Enable standard library support and [`mocks`] (for testing)
//! - `defmt`: Enable defmt logging derives
//!
//! # Example
//!
//! ```no_run
//! use platform::{DaiId, DaiOps, DaiType};
//!
//! fn bring_up<D: DaiOps>(driver: &D) {
//!     driver.probe(DaiId::new(DaiType::SSP, 0)).ok();
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)] // unsafe fn body is not implicitly unsafe block
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)] // hardware accessors - callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

#[cfg(feature = "std")]
extern crate std;

pub mod dai;
pub mod mocks;

pub use dai::{DaiId, DaiOps, DaiType, DriverError};
