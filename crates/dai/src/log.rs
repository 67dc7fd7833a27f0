//! Logging facade.
//!
//! Firmware builds route through `defmt`, host builds through `tracing`. With
//! neither feature enabled every call compiles to nothing. Format strings must
//! stay within the syntax both back-ends accept: positional `{}` only.

macro_rules! dai_trace {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(not(any(feature = "defmt", feature = "tracing")))]
        {
            $(let _ = &$arg;)*
        }
        #[cfg(feature = "defmt")]
        defmt::trace!($fmt $(, $arg)*);
        #[cfg(feature = "tracing")]
        tracing::trace!($fmt $(, $arg)*);
    }};
}

macro_rules! dai_error {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(not(any(feature = "defmt", feature = "tracing")))]
        {
            $(let _ = &$arg;)*
        }
        #[cfg(feature = "defmt")]
        defmt::error!($fmt $(, $arg)*);
        #[cfg(feature = "tracing")]
        tracing::error!($fmt $(, $arg)*);
    }};
}
