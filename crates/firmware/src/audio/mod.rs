//! Audio subsystem - DAI drivers
//!
//! Vertically sliced: one sub-directory per hardware interface.
//!
//! # Structure
//!
//! - `sai/` - Serial Audio Interface ports ([`SaiDai`]) and their
//!   configuration wire format ([`SaiConfig`])
//!
//! # Dependency Injection
//!
//! The DAI core only sees the [`platform::DaiOps`] trait. Concrete drivers
//! are placed behind a `&'static` reference at the call site:
//!
//! ```rust,ignore
//! // Device tables live for the whole run, so the driver is leaked once at boot.
//! let ops: &'static SaiDai<Output<'static>, 2> =
//!     Box::leak(Box::new(SaiDai::new(DaiType::SAI, [pe2, pe3])));
//! let ports = [Dai::new(DaiType::SAI, 0, ops), Dai::new(DaiType::SAI, 1, ops)];
//! ```

pub mod sai;

pub use sai::{SaiConfig, SaiDai};
