//! Command and property identifiers placed in the packet `type` field.

/// Video hardware architecture reported to firmware in `CMD_INIT`.
pub const VIDEO_ARCH_OX: u32 = 0x1;

/// Command packet identifiers
pub mod cmd {
    /// First command id
    pub const BEGIN: u32 = 0x0100_0000;
    /// Bring up the firmware system
    pub const INIT: u32 = 0x0100_0001;
    /// Prepare for power collapse
    pub const POWER_COLLAPSE: u32 = 0x0100_0002;
    /// Open a session
    pub const OPEN: u32 = 0x0100_0003;
    /// Close a session
    pub const CLOSE: u32 = 0x0100_0004;
    /// Start streaming on a port
    pub const START: u32 = 0x0100_0005;
    /// Stop streaming on a port
    pub const STOP: u32 = 0x0100_0006;
    /// Drain pending frames
    pub const DRAIN: u32 = 0x0100_0007;
    /// Resume after a settings change
    pub const RESUME: u32 = 0x0100_0008;
    /// Queue or release a buffer
    pub const BUFFER: u32 = 0x0100_0009;
    /// Last command id
    pub const END: u32 = 0x0100_0fff;
}

/// Property packet identifiers
pub mod prop {
    /// First property id
    pub const BEGIN: u32 = 0x0300_0000;
    /// Firmware image version string
    pub const IMAGE_VERSION: u32 = 0x0300_0001;
    /// Allow power collapse between frames
    pub const INTRA_FRAME_POWER_COLLAPSE: u32 = 0x0300_0002;
    /// UBWC: number of memory channels
    pub const UBWC_MAX_CHANNELS: u32 = 0x0300_0003;
    /// UBWC: minimum access length
    pub const UBWC_MAL_LENGTH: u32 = 0x0300_0004;
    /// UBWC: highest bank bit
    pub const UBWC_HBB: u32 = 0x0300_0005;
    /// UBWC: bank swizzle level 1
    pub const UBWC_BANK_SWZL_LEVEL1: u32 = 0x0300_0006;
    /// UBWC: bank swizzle level 2
    pub const UBWC_BANK_SWZL_LEVEL2: u32 = 0x0300_0007;
    /// UBWC: bank swizzle level 3
    pub const UBWC_BANK_SWZL_LEVEL3: u32 = 0x0300_0008;
    /// UBWC: bank spreading
    pub const UBWC_BANK_SPREADING: u32 = 0x0300_0009;
    /// Firmware debug configuration
    pub const DEBUG_CONFIG: u32 = 0x0300_000a;
    /// Firmware log level
    pub const DEBUG_LOG_LEVEL: u32 = 0x0300_000b;
    /// Last property id
    pub const END: u32 = 0x0300_0fff;
}

/// Returns `true` if `packet_type` falls in the command id range.
#[must_use]
pub const fn is_command(packet_type: u32) -> bool {
    packet_type >= cmd::BEGIN && packet_type <= cmd::END
}

/// Returns `true` if `packet_type` falls in the property id range.
#[must_use]
pub const fn is_property(packet_type: u32) -> bool {
    packet_type >= prop::BEGIN && packet_type <= prop::END
}
