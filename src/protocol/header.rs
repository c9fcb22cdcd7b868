//! HFI transfer header
//!
//! Every transfer starts with a 16-byte header followed by `packet_count`
//! packets laid out back to back.

use super::{Error, HEADER_SIZE, Result};

/// Transfer header
///
/// # Wire Format
///
/// ```text
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                        Total Size (4)                         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                        Session ID (4)                         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                        Header ID (4)                          |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                       Packet Count (4)                        |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// Fields are in the platform's native byte order.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferHeader {
    total_size: u32,
    session_id: u32,
    header_id: u32,
    packet_count: u32,
}

impl TransferHeader {
    /// Create a new transfer header
    #[must_use]
    pub const fn new(session_id: u32, header_id: u32, packet_count: u32, total_size: u32) -> Self {
        Self {
            total_size,
            session_id,
            header_id,
            packet_count,
        }
    }

    /// Size of the whole transfer, header included
    #[must_use]
    pub const fn total_size(&self) -> u32 {
        self.total_size
    }

    /// Session the transfer belongs to (0 for system transfers)
    #[must_use]
    pub const fn session_id(&self) -> u32 {
        self.session_id
    }

    /// Per-core transfer sequence number
    #[must_use]
    pub const fn header_id(&self) -> u32 {
        self.header_id
    }

    /// Number of packets following the header
    #[must_use]
    pub const fn packet_count(&self) -> u32 {
        self.packet_count
    }

    /// Convert to bytes
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];

        bytes[0..4].copy_from_slice(&self.total_size.to_ne_bytes());
        bytes[4..8].copy_from_slice(&self.session_id.to_ne_bytes());
        bytes[8..12].copy_from_slice(&self.header_id.to_ne_bytes());
        bytes[12..16].copy_from_slice(&self.packet_count.to_ne_bytes());

        bytes
    }

    /// Parse from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(Error::BufferTooSmall {
                needed: HEADER_SIZE,
                available: bytes.len(),
            });
        }

        Ok(Self {
            total_size: super::read_u32(bytes, 0),
            session_id: super::read_u32(bytes, 4),
            header_id: super::read_u32(bytes, 8),
            packet_count: super::read_u32(bytes, 12),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_size() {
        assert_eq!(std::mem::size_of::<TransferHeader>(), HEADER_SIZE);
    }

    #[test]
    fn test_field_order() {
        let bytes = TransferHeader::new(7, 42, 3, 160).to_bytes();

        assert_eq!(&bytes[0..4], &160u32.to_ne_bytes());
        assert_eq!(&bytes[4..8], &7u32.to_ne_bytes());
        assert_eq!(&bytes[8..12], &42u32.to_ne_bytes());
        assert_eq!(&bytes[12..16], &3u32.to_ne_bytes());
    }

    #[test]
    fn test_from_bytes_short() {
        let result = TransferHeader::from_bytes(&[0u8; 15]);
        assert!(matches!(
            result,
            Err(Error::BufferTooSmall {
                needed: 16,
                available: 15
            })
        ));
    }
}
