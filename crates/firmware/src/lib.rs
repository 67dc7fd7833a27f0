//! Board-level DAI drivers
//!
//! Concrete implementations of [`platform::DaiOps`] for the serial audio
//! hardware on the STM32H7 board. The DAI core (`dai` crate) owns reference
//! counting and configuration storage; this crate only knows how to switch a
//! port on or off and how to apply one configuration blob.
//!
//! # Architecture
//!
//! ```text
//! dai::DaiRegistry ──acquire/release──▶ dai::Dai
//!                                          │ probe / remove / set_config
//!                                          ▼
//!                                   audio::sai::SaiDai ──▶ enable GPIOs
//! ```
//!
//! # Features
//!
//! - `defmt` - Log through defmt (hardware builds)
//! - `tracing` - Log through tracing (host builds)
//! - `std` - Enable host mocks in `platform`

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
// Upgrade relevant warns to deny; keep pedantic as warn (too noisy for firmware)
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
// unsafe fn body is not implicitly unsafe block
// Logging discipline (allow println in tests via clippy.toml)
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![warn(clippy::dbg_macro)] // dbg! should not be left in committed code
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)] // common in Rust crates; not a real issue
#![allow(clippy::missing_errors_doc)] // most errors are self-explanatory
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod audio;

pub use audio::sai::{SaiConfig, SaiConfigError, SaiDai};
