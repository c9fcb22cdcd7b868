//! Wire buffer descriptors built from driver buffers.

use super::mapping::{BufferRole, Domain, resolve_wire_buffer_type};
use super::{BufferFlags, WireBufferType};

/// Serialized size of a [`BufferDescriptor`].
pub const DESCRIPTOR_SIZE: usize = 48;

/// Attribute bits the driver keeps on its buffers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferAttr(u32);

impl BufferAttr {
    /// Buffer is still referenced by firmware
    pub const DEFERRED: u32 = 1 << 0;
    /// Firmware must treat the buffer as read only
    pub const READ_ONLY: u32 = 1 << 1;
    /// Buffer is about to be released
    pub const PENDING_RELEASE: u32 = 1 << 2;
    /// Buffer is queued to firmware
    pub const QUEUED: u32 = 1 << 3;
    /// Buffer was returned by firmware
    pub const DEQUEUED: u32 = 1 << 4;

    /// Create from raw bits
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
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
}

/// Driver-side view of a buffer, owned by the session.
#[derive(Debug, Clone, Copy)]
pub struct DriverBuffer {
    /// Role within the session
    pub role: BufferRole,
    /// Slot index
    pub index: u32,
    /// IOVA the firmware will access
    pub device_addr: u64,
    /// Allocated size
    pub buffer_size: u32,
    /// Start of valid data
    pub data_offset: u32,
    /// Length of valid data
    pub data_size: u32,
    /// Attribute bits
    pub attr: BufferAttr,
    /// Presentation timestamp
    pub timestamp: u64,
}

impl DriverBuffer {
    /// Empty buffer of the given role.
    #[must_use]
    pub const fn new(role: BufferRole) -> Self {
        Self {
            role,
            index: 0,
            device_addr: 0,
            buffer_size: 0,
            data_offset: 0,
            data_size: 0,
            attr: BufferAttr::from_bits(0),
            timestamp: 0,
        }
    }
}

/// Buffer descriptor as sent to firmware.
///
/// ```text
/// [type][index][base_address (8)][addr_offset][buffer_size]
/// [data_offset][data_size][flags][reserved][timestamp (8)]
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferDescriptor {
    buffer_type: u32,
    index: u32,
    base_address: u64,
    addr_offset: u32,
    buffer_size: u32,
    data_offset: u32,
    data_size: u32,
    flags: BufferFlags,
    timestamp: u64,
}

impl BufferDescriptor {
    /// Raw wire buffer type; 0 when the role has none.
    #[must_use]
    pub const fn buffer_type(&self) -> u32 {
        self.buffer_type
    }

    /// Slot index
    #[must_use]
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Device address
    #[must_use]
    pub const fn base_address(&self) -> u64 {
        self.base_address
    }

    /// Always 0
    #[must_use]
    pub const fn addr_offset(&self) -> u32 {
        self.addr_offset
    }

    /// Allocated size
    #[must_use]
    pub const fn buffer_size(&self) -> u32 {
        self.buffer_size
    }

    /// Start of valid data
    #[must_use]
    pub const fn data_offset(&self) -> u32 {
        self.data_offset
    }

    /// Length of valid data
    #[must_use]
    pub const fn data_size(&self) -> u32 {
        self.data_size
    }

    /// Host flags
    #[must_use]
    pub const fn flags(&self) -> BufferFlags {
        self.flags
    }

    /// Timestamp
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Serialize for use as a packet payload.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; DESCRIPTOR_SIZE] {
        let mut bytes = [0u8; DESCRIPTOR_SIZE];

        bytes[0..4].copy_from_slice(&self.buffer_type.to_ne_bytes());
        bytes[4..8].copy_from_slice(&self.index.to_ne_bytes());
        bytes[8..16].copy_from_slice(&self.base_address.to_ne_bytes());
        bytes[16..20].copy_from_slice(&self.addr_offset.to_ne_bytes());
        bytes[20..24].copy_from_slice(&self.buffer_size.to_ne_bytes());
        bytes[24..28].copy_from_slice(&self.data_offset.to_ne_bytes());
        bytes[28..32].copy_from_slice(&self.data_size.to_ne_bytes());
        bytes[32..36].copy_from_slice(&self.flags.bits().to_ne_bytes());
        // 36..40 reserved
        bytes[40..48].copy_from_slice(&self.timestamp.to_ne_bytes());

        bytes
    }
}

/// Build the wire descriptor for `buffer` in a session of `domain`.
///
/// A role without a wire type (logged by the mapper) leaves `buffer_type` at 0;
/// the descriptor is still produced.
#[must_use]
pub fn build_descriptor(domain: Domain, buffer: &DriverBuffer) -> BufferDescriptor {
    let mut desc = BufferDescriptor {
        buffer_type: resolve_wire_buffer_type(domain, buffer.role)
            .map_or(0, WireBufferType::as_u32),
        index: buffer.index,
        base_address: buffer.device_addr,
        addr_offset: 0,
        buffer_size: buffer.buffer_size,
        data_offset: buffer.data_offset,
        data_size: buffer.data_size,
        timestamp: buffer.timestamp,
        ..BufferDescriptor::default()
    };

    if buffer.attr.has(BufferAttr::READ_ONLY) {
        desc.flags.insert(BufferFlags::READ_ONLY);
    }
    if buffer.attr.has(BufferAttr::PENDING_RELEASE) {
        desc.flags.insert(BufferFlags::RELEASE);
    }

    desc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output_buffer() -> DriverBuffer {
        DriverBuffer {
            index: 3,
            device_addr: 0x1_2000_0000,
            buffer_size: 4096,
            data_offset: 16,
            data_size: 1000,
            timestamp: 33_333,
            ..DriverBuffer::new(BufferRole::Output)
        }
    }

    #[test]
    fn test_fields_copied() {
        let desc = build_descriptor(Domain::Decoder, &output_buffer());

        assert_eq!(desc.buffer_type(), WireBufferType::Raw.as_u32());
        assert_eq!(desc.index(), 3);
        assert_eq!(desc.base_address(), 0x1_2000_0000);
        assert_eq!(desc.addr_offset(), 0);
        assert_eq!(desc.buffer_size(), 4096);
        assert_eq!(desc.data_offset(), 16);
        assert_eq!(desc.data_size(), 1000);
        assert_eq!(desc.timestamp(), 33_333);
        assert_eq!(desc.flags().bits(), 0);
    }

    #[test]
    fn test_attribute_flags() {
        let mut buffer = output_buffer();
        buffer.attr = BufferAttr::default()
            .with(BufferAttr::READ_ONLY)
            .with(BufferAttr::PENDING_RELEASE)
            .with(BufferAttr::QUEUED)
            .with(BufferAttr::DEFERRED);

        let desc = build_descriptor(Domain::Encoder, &buffer);
        assert_eq!(
            desc.flags().bits(),
            BufferFlags::READ_ONLY | BufferFlags::RELEASE
        );
        assert_eq!(desc.buffer_type(), WireBufferType::Bitstream.as_u32());
    }

    #[test]
    fn test_queue_role_has_zero_type() {
        let desc = build_descriptor(Domain::Decoder, &DriverBuffer::new(BufferRole::Queue));
        assert_eq!(desc.buffer_type(), 0);
    }

    #[test]
    fn test_serialized_layout() {
        let mut buffer = output_buffer();
        buffer.attr = BufferAttr::default().with(BufferAttr::READ_ONLY);
        let bytes = build_descriptor(Domain::Decoder, &buffer).to_bytes();

        assert_eq!(&bytes[0..4], &WireBufferType::Raw.as_u32().to_ne_bytes());
        assert_eq!(&bytes[8..16], &0x1_2000_0000u64.to_ne_bytes());
        assert_eq!(&bytes[16..20], &[0; 4]);
        assert_eq!(&bytes[32..36], &BufferFlags::READ_ONLY.to_ne_bytes());
        assert_eq!(&bytes[36..40], &[0; 4]);
        assert_eq!(&bytes[40..48], &33_333u64.to_ne_bytes());
    }
}
