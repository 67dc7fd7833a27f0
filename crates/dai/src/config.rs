//! Compile-time limits for the DAI core.

/// Number of configuration slots per device.
///
/// The host sends one blob per supported hardware variant (e.g. one per sample
/// rate / format combination) before selecting one. Slots are only reclaimed
/// when the last user releases the device.
pub const MAX_CONFIGS: usize = 8;

const _: () = assert!(MAX_CONFIGS > 0, "a device needs at least one configuration slot");
