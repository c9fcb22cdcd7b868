//! Platform configuration consumed by the system-init transfer.

use crate::protocol::ids::VIDEO_ARCH_OX;

/// UBWC tuning values passed through to firmware unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UbwcConfig {
    /// Number of DDR channels
    pub max_channels: u32,
    /// Minimum access length in bytes
    pub mal_length: u32,
    /// Highest bank bit
    pub highest_bank_bit: u32,
    /// Bank swizzle level 1
    pub bank_swzl_level1: u32,
    /// Bank swizzle level 2
    pub bank_swzl_level2: u32,
    /// Bank swizzle level 3
    pub bank_swzl_level3: u32,
    /// Bank spreading
    pub bank_spreading: u32,
}

impl Default for UbwcConfig {
    fn default() -> Self {
        Self {
            max_channels: 8,
            mal_length: 32,
            highest_bank_bit: 16,
            bank_swzl_level1: 0,
            bank_swzl_level2: 1,
            bank_swzl_level3: 1,
            bank_spreading: 1,
        }
    }
}

/// Per-platform values the encoder needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlatformConfig {
    /// Architecture id sent with `CMD_INIT`
    pub video_arch: u32,
    /// Allow firmware to power collapse between frames
    pub intra_frame_power_collapse: bool,
    /// UBWC tuning
    pub ubwc: UbwcConfig,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            video_arch: VIDEO_ARCH_OX,
            intra_frame_power_collapse: false,
            ubwc: UbwcConfig::default(),
        }
    }
}

impl PlatformConfig {
    /// Replace the UBWC tuning.
    #[must_use]
    pub const fn with_ubwc(mut self, ubwc: UbwcConfig) -> Self {
        self.ubwc = ubwc;
        self
    }

    /// Override the architecture id.
    #[must_use]
    pub const fn with_video_arch(mut self, video_arch: u32) -> Self {
        self.video_arch = video_arch;
        self
    }

    /// Enable or disable intra-frame power collapse.
    #[must_use]
    pub const fn with_intra_frame_power_collapse(mut self, enabled: bool) -> Self {
        self.intra_frame_power_collapse = enabled;
        self
    }
}
