//! HFI wire enumerations and host flags

use std::fmt;

/// Host flags carried in every packet header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HostFlags(u32);

impl HostFlags {
    /// No flags
    pub const NONE: u32 = 0;
    /// Firmware must raise an interrupt when done
    pub const INTR_REQUIRED: u32 = 1 << 0;
    /// Firmware must send a response packet
    pub const RESPONSE_REQUIRED: u32 = 1 << 1;
    /// Firmware must not drop the packet
    pub const NON_DISCARDABLE: u32 = 1 << 2;
    /// Packet queries a property instead of setting it
    pub const GET_PROPERTY: u32 = 1 << 3;

    /// Create empty flags
    #[must_use]
    pub const fn new() -> Self {
        Self(Self::NONE)
    }

    /// Create from raw bits
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw bits
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Set a flag
    #[must_use]
    pub const fn with(mut self, flag: u32) -> Self {
        self.0 |= flag;
        self
    }

    /// Check if flag is set
    #[must_use]
    pub const fn has(self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }

    /// Flags used by blocking system commands: response, interrupt, never dropped.
    #[must_use]
    pub const fn blocking_command() -> Self {
        Self::new()
            .with(Self::RESPONSE_REQUIRED)
            .with(Self::INTR_REQUIRED)
            .with(Self::NON_DISCARDABLE)
    }

    /// Flags used by property queries.
    #[must_use]
    pub const fn property_query() -> Self {
        Self::new()
            .with(Self::RESPONSE_REQUIRED)
            .with(Self::INTR_REQUIRED)
            .with(Self::GET_PROPERTY)
    }
}

impl fmt::Display for HostFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.has(Self::INTR_REQUIRED) {
            parts.push("INTR_REQUIRED");
        }
        if self.has(Self::RESPONSE_REQUIRED) {
            parts.push("RESPONSE_REQUIRED");
        }
        if self.has(Self::NON_DISCARDABLE) {
            parts.push("NON_DISCARDABLE");
        }
        if self.has(Self::GET_PROPERTY) {
            parts.push("GET_PROPERTY");
        }
        if parts.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", parts.join(" | "))
        }
    }
}

/// Payload interpretation advertised in `payload_info`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PayloadKind {
    /// No payload
    None = 0x00,
    /// Unsigned 32-bit value
    U32 = 0x01,
    /// Signed 32-bit value
    S32 = 0x02,
    /// Unsigned 64-bit value
    U64 = 0x03,
    /// Signed 64-bit value
    S64 = 0x04,
    /// Fixed layout structure
    Structure = 0x05,
    /// Opaque blob
    Blob = 0x06,
    /// NUL terminated string
    String = 0x07,
    /// Q16 fixed point
    Q16 = 0x08,
    /// 32-bit value taken from an enumeration
    U32Enum = 0x09,
    /// Two 16-bit values packed in 32 bits
    Packed32 = 0x0a,
    /// Array of unsigned 32-bit values
    U32Array = 0x0b,
    /// Array of signed 32-bit values
    S32Array = 0x0c,
    /// Two 32-bit values packed in 64 bits
    Packed64 = 0x0d,
}

impl PayloadKind {
    /// Convert to wire value
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}

/// Stream a packet refers to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Port {
    /// Not bound to a stream
    #[default]
    None = 0x0,
    /// Compressed bitstream side
    Bitstream = 0x1,
    /// Uncompressed pixel side
    Raw = 0x2,
}

impl Port {
    /// Convert to wire value
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "NONE",
            Self::Bitstream => "BITSTREAM",
            Self::Raw => "RAW",
        };
        write!(f, "{name}")
    }
}

/// Buffer type as understood by firmware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum WireBufferType {
    /// Compressed bitstream
    Bitstream = 0x01,
    /// Uncompressed frame
    Raw = 0x02,
    /// Metadata attached to a bitstream or frame
    Metadata = 0x03,
    /// Firmware scratch memory
    Scratch = 0x04,
    /// Second scratch region
    Scratch1 = 0x05,
    /// Third scratch region
    Scratch2 = 0x06,
    /// Memory that persists across frames
    Persist = 0x07,
    /// Second persist region
    Persist1 = 0x08,
}

impl WireBufferType {
    /// Convert to wire value
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}

/// Codec identifier as understood by firmware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum WireCodec {
    /// H.264 decoder
    DecodeAvc = 0x01,
    /// H.264 encoder
    EncodeAvc = 0x02,
    /// HEVC decoder
    DecodeHevc = 0x03,
    /// HEVC encoder
    EncodeHevc = 0x04,
    /// VP9 decoder
    DecodeVp9 = 0x05,
    /// MPEG-2 decoder
    DecodeMpeg2 = 0x06,
}

impl WireCodec {
    /// Convert to wire value
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}

/// Host-side flags on a wire buffer descriptor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BufferFlags(u32);

impl BufferFlags {
    /// Buffer is being handed back and may be freed
    pub const RELEASE: u32 = 0x0000_0001;
    /// Firmware may read but must not write the buffer
    pub const READ_ONLY: u32 = 0x0000_0010;

    /// Create from raw bits
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw bits
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Insert a flag into the set.
    pub fn insert(&mut self, flag: u32) {
        self.0 |= flag;
    }

    /// Check whether the given flag is set.
    #[must_use]
    pub const fn contains(self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }
}
