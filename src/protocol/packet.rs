//! HFI packet header and outbound packet description.

use super::{Error, HostFlags, PACKET_HEADER_SIZE, PayloadKind, Port, Result};

/// Fixed 24-byte header in front of every packet payload.
///
/// ```text
/// [size][type][flags][payload_info][port][packet_id][payload ...]
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PacketHeader {
    size: u32,
    packet_type: u32,
    flags: u32,
    payload_info: u32,
    port: u32,
    packet_id: u32,
}

impl PacketHeader {
    /// Packet size including this header
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Command or property id
    #[must_use]
    pub const fn packet_type(&self) -> u32 {
        self.packet_type
    }

    /// Host flags
    #[must_use]
    pub const fn flags(&self) -> HostFlags {
        HostFlags::from_bits(self.flags)
    }

    /// Raw payload info
    #[must_use]
    pub const fn payload_info(&self) -> u32 {
        self.payload_info
    }

    /// Raw port
    #[must_use]
    pub const fn port(&self) -> u32 {
        self.port
    }

    /// Per-core packet sequence number
    #[must_use]
    pub const fn packet_id(&self) -> u32 {
        self.packet_id
    }

    /// Payload length implied by `size`
    #[must_use]
    pub const fn payload_len(&self) -> usize {
        (self.size as usize).saturating_sub(PACKET_HEADER_SIZE)
    }

    /// Write the header into the first 24 bytes of `out`.
    pub(crate) fn write_to(&self, out: &mut [u8]) {
        out[0..4].copy_from_slice(&self.size.to_ne_bytes());
        out[4..8].copy_from_slice(&self.packet_type.to_ne_bytes());
        out[8..12].copy_from_slice(&self.flags.to_ne_bytes());
        out[12..16].copy_from_slice(&self.payload_info.to_ne_bytes());
        out[16..20].copy_from_slice(&self.port.to_ne_bytes());
        out[20..24].copy_from_slice(&self.packet_id.to_ne_bytes());
    }

    /// Parse a packet header from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < PACKET_HEADER_SIZE {
            return Err(Error::BufferTooSmall {
                needed: PACKET_HEADER_SIZE,
                available: bytes.len(),
            });
        }

        Ok(Self {
            size: super::read_u32(bytes, 0),
            packet_type: super::read_u32(bytes, 4),
            flags: super::read_u32(bytes, 8),
            payload_info: super::read_u32(bytes, 12),
            port: super::read_u32(bytes, 16),
            packet_id: super::read_u32(bytes, 20),
        })
    }
}

/// Everything needed to encode one packet except its id.
#[derive(Debug, Clone, Copy)]
pub struct OutboundPacket<'a> {
    packet_type: u32,
    flags: HostFlags,
    payload_kind: PayloadKind,
    port: Port,
    payload: &'a [u8],
}

impl<'a> OutboundPacket<'a> {
    /// Create a packet with no payload, no flags and no port.
    #[must_use]
    pub const fn new(packet_type: u32) -> Self {
        Self {
            packet_type,
            flags: HostFlags::new(),
            payload_kind: PayloadKind::None,
            port: Port::None,
            payload: &[],
        }
    }

    /// Set host flags
    #[must_use]
    pub const fn flags(mut self, flags: HostFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the port
    #[must_use]
    pub const fn port(mut self, port: Port) -> Self {
        self.port = port;
        self
    }

    /// Attach a payload and its interpretation
    #[must_use]
    pub const fn payload(mut self, kind: PayloadKind, payload: &'a [u8]) -> Self {
        self.payload_kind = kind;
        self.payload = payload;
        self
    }

    /// Command or property id
    #[must_use]
    pub const fn packet_type(&self) -> u32 {
        self.packet_type
    }

    /// Payload bytes
    #[must_use]
    pub const fn payload_bytes(&self) -> &'a [u8] {
        self.payload
    }

    /// Bytes this packet occupies on the wire.
    #[must_use]
    pub const fn encoded_len(&self) -> usize {
        PACKET_HEADER_SIZE + self.payload.len()
    }

    pub(crate) fn header(&self, packet_id: u32) -> Result<PacketHeader> {
        let size = u32::try_from(self.encoded_len())
            .map_err(|_| Error::invalid("packet size exceeds u32"))?;

        Ok(PacketHeader {
            size,
            packet_type: self.packet_type,
            flags: self.flags.bits(),
            payload_info: self.payload_kind.as_u32(),
            port: self.port.as_u32(),
            packet_id,
        })
    }
}
