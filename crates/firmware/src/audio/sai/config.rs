//! SAI port configuration and its wire encoding.
//!
//! A configuration blob stored in the DAI core is a `postcard` encoding of
//! [`SaiConfig`]. The host builds it with [`SaiConfig::encode`]; the driver
//! turns it back into a typed value with [`SaiConfig::decode`] when the blob is
//! selected.
//!
//! ```text
//! SaiConfig ──encode──▶ [u8] ──add_config──▶ store ──select_config──▶ decode ──▶ port
//! ```

use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

/// Serial frame layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SaiFormat {
    /// Philips I²S, two slots per frame.
    I2s,
    /// Left-justified, two slots per frame.
    LeftJustified,
    /// DSP/TDM, up to [`MAX_TDM_SLOTS`] slots per frame.
    Dsp,
}

impl SaiFormat {
    /// Largest channel count the format can carry.
    pub const fn max_channels(self) -> u8 {
        match self {
            Self::I2s | Self::LeftJustified => 2,
            Self::Dsp => MAX_TDM_SLOTS,
        }
    }
}

/// Bits per sample slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WordLength {
    /// 16-bit slots.
    Bits16,
    /// 24-bit samples in 32-bit slots.
    Bits24,
    /// 32-bit slots.
    Bits32,
}

impl WordLength {
    /// Slot width in bits.
    pub const fn bits(self) -> u8 {
        match self {
            Self::Bits16 => 16,
            Self::Bits24 => 24,
            Self::Bits32 => 32,
        }
    }
}

/// Which side drives BCLK and the frame clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockProvider {
    /// The SAI block generates the bit and frame clocks.
    Sai,
    /// The codec generates them; the SAI follows.
    Codec,
}

/// Maximum slots per frame in DSP/TDM mode.
pub const MAX_TDM_SLOTS: u8 = 8;

/// Sample rates the SAI clock tree can produce.
pub const SUPPORTED_RATES_HZ: [u32; 9] = [
    8_000, 16_000, 32_000, 44_100, 48_000, 88_200, 96_000, 176_400, 192_000,
];

/// Permitted MCLK / fs ratios when MCLK is enabled.
pub const MCLK_FS_RATIOS: [u32; 3] = [128, 256, 512];

/// Upper bound on the encoded size of a [`SaiConfig`].
///
/// Three one-byte enum tags, one byte of channel count and two `u32`
/// varints of at most five bytes each.
pub const MAX_ENCODED_LEN: usize = 16;

/// Error from decoding, encoding or validating a [`SaiConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SaiConfigError {
    /// The blob is not a postcard encoding of `SaiConfig`.
    #[error("blob is not a valid SAI configuration")]
    Decode,
    /// The blob decodes but carries extra bytes after the configuration.
    #[error("{0} trailing bytes after SAI configuration")]
    TrailingBytes(usize),
    /// The output buffer is too small.
    #[error("encode buffer too small")]
    Encode,
    /// The sample rate is not one of [`SUPPORTED_RATES_HZ`].
    #[error("unsupported sample rate {0} Hz")]
    SampleRate(u32),
    /// Zero channels, or more than the format carries.
    #[error("{channels} channels out of range 1..={max}")]
    Channels {
        /// Requested channel count.
        channels: u8,
        /// Largest count the chosen format allows.
        max: u8,
    },
    /// MCLK is enabled but is not a permitted multiple of the sample rate.
    #[error("MCLK {mclk_hz} Hz is not 128/256/512 x {sample_rate_hz} Hz")]
    MclkRatio {
        /// Requested master clock.
        mclk_hz: u32,
        /// Requested sample rate.
        sample_rate_hz: u32,
    },
}

/// Configuration of one SAI port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SaiConfig {
    /// Frame layout.
    pub format: SaiFormat,
    /// Frame rate in Hz.
    pub sample_rate_hz: u32,
    /// Active slots per frame.
    pub channels: u8,
    /// Slot width.
    pub word_length: WordLength,
    /// Master clock output in Hz; `0` leaves MCLK disabled.
    pub mclk_hz: u32,
    /// Bit/frame clock direction.
    pub clock_provider: ClockProvider,
}

impl Default for SaiConfig {
    /// Stereo I²S at 48 kHz, 32-bit slots, MCLK = 256 fs, SAI as clock provider.
    fn default() -> Self {
        Self {
            format: SaiFormat::I2s,
            sample_rate_hz: 48_000,
            channels: 2,
            word_length: WordLength::Bits32,
            mclk_hz: 12_288_000,
            clock_provider: ClockProvider::Sai,
        }
    }
}

impl SaiConfig {
    /// Check every field against what the SAI block supports.
    pub fn validate(&self) -> Result<(), SaiConfigError> {
        if !SUPPORTED_RATES_HZ.contains(&self.sample_rate_hz) {
            return Err(SaiConfigError::SampleRate(self.sample_rate_hz));
        }

        let max = self.format.max_channels();
        if self.channels == 0 || self.channels > max {
            return Err(SaiConfigError::Channels {
                channels: self.channels,
                max,
            });
        }

        if self.mclk_hz != 0 {
            let ratio_ok = MCLK_FS_RATIOS.iter().any(|&ratio| {
                self.sample_rate_hz
                    .checked_mul(ratio)
                    .is_some_and(|mclk| mclk == self.mclk_hz)
            });
            if !ratio_ok {
                return Err(SaiConfigError::MclkRatio {
                    mclk_hz: self.mclk_hz,
                    sample_rate_hz: self.sample_rate_hz,
                });
            }
        }

        Ok(())
    }

    /// Bit clock in Hz: `fs × slots × slot width`.
    ///
    /// I²S and left-justified frames always carry two slots, even for mono.
    pub fn bclk_hz(&self) -> u32 {
        let slots = match self.format {
            SaiFormat::I2s | SaiFormat::LeftJustified => 2,
            SaiFormat::Dsp => u32::from(self.channels),
        };
        let slot_bits = match self.word_length {
            WordLength::Bits16 => 16,
            WordLength::Bits24 | WordLength::Bits32 => 32,
        };
        self.sample_rate_hz
            .saturating_mul(slots)
            .saturating_mul(slot_bits)
    }

    /// Encode into `buf`, returning the used prefix.
    ///
    /// A buffer of [`MAX_ENCODED_LEN`] bytes always suffices.
    pub fn encode<'b>(&self, buf: &'b mut [u8]) -> Result<&'b mut [u8], SaiConfigError> {
        postcard::to_slice(self, buf).map_err(|_| SaiConfigError::Encode)
    }

    /// Decode and validate a configuration blob.
    ///
    /// The whole blob must be consumed; trailing bytes are rejected.
    pub fn decode(blob: &[u8]) -> Result<Self, SaiConfigError> {
        let (config, rest): (Self, &[u8]) =
            postcard::take_from_bytes(blob).map_err(|_| SaiConfigError::Decode)?;
        if !rest.is_empty() {
            return Err(SaiConfigError::TrailingBytes(rest.len()));
        }
        config.validate()?;
        Ok(config)
    }
}
