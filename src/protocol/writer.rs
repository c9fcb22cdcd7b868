//! Bounded serialization of packets and transfer headers.
//!
//! [`encode_packet`] and [`encode_header`] are the two primitives; every
//! builder goes through [`PacketWriter`], which keeps the running offset and
//! packet count so the header always matches what was written.

use tracing::{error, trace};

use super::metrics::Metrics;
use super::{Error, HEADER_SIZE, OutboundPacket, PACKET_HEADER_SIZE, Result, TransferHeader};

/// Encode one packet at `*offset` and advance the offset past it.
///
/// Fails with [`Error::BufferTooSmall`] when fewer than
/// `24 + payload.len()` bytes remain; the buffer and offset are left untouched.
pub fn encode_packet(
    buf: &mut [u8],
    offset: &mut usize,
    packet: &OutboundPacket<'_>,
    packet_id: u32,
) -> Result<()> {
    let needed = packet.encoded_len();
    let available = buf.len().saturating_sub(*offset);

    if available < needed {
        error!(
            packet_type = packet.packet_type(),
            needed,
            available,
            "bad packet size"
        );
        Metrics::record_error();
        return Err(Error::BufferTooSmall { needed, available });
    }

    let header = packet.header(packet_id)?;
    let region = &mut buf[*offset..*offset + needed];
    region.fill(0);
    header.write_to(&mut region[..PACKET_HEADER_SIZE]);

    let payload = packet.payload_bytes();
    if !payload.is_empty() {
        region[PACKET_HEADER_SIZE..].copy_from_slice(payload);
    }

    trace!(
        packet_type = packet.packet_type(),
        packet_id,
        offset = *offset,
        size = needed,
        "packet encoded"
    );
    Metrics::record_packet(packet.packet_type(), payload.len());

    *offset += needed;
    Ok(())
}

/// Write the transfer header at offset 0.
pub fn encode_header(buf: &mut [u8], header: &TransferHeader) -> Result<()> {
    let Some(region) = buf.get_mut(..HEADER_SIZE) else {
        error!(available = buf.len(), "buffer cannot hold transfer header");
        Metrics::record_error();
        return Err(Error::BufferTooSmall {
            needed: HEADER_SIZE,
            available: buf.len(),
        });
    };

    region.fill(0);
    region.copy_from_slice(&header.to_bytes());
    Metrics::record_transfer();
    Ok(())
}

/// Cursor over a transfer buffer that reserves room for the header.
#[derive(Debug)]
pub struct PacketWriter<'buf> {
    buf: &'buf mut [u8],
    offset: usize,
    packet_count: u32,
}

impl<'buf> PacketWriter<'buf> {
    /// Start a transfer in `buf`; packets begin right after the header.
    pub fn new(buf: &'buf mut [u8]) -> Result<Self> {
        if buf.len() < HEADER_SIZE {
            error!(capacity = buf.len(), "invalid packet size");
            Metrics::record_error();
            return Err(Error::invalid("transfer buffer smaller than header"));
        }

        Ok(Self {
            buf,
            offset: HEADER_SIZE,
            packet_count: 0,
        })
    }

    /// Append one packet.
    pub fn append(&mut self, packet: &OutboundPacket<'_>, packet_id: u32) -> Result<()> {
        encode_packet(self.buf, &mut self.offset, packet, packet_id)?;
        self.packet_count += 1;
        Ok(())
    }

    /// Bytes written so far, header included.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Packets appended so far.
    #[must_use]
    pub const fn packet_count(&self) -> u32 {
        self.packet_count
    }

    /// Bytes left for further packets.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// Write the header for everything appended and return it.
    pub fn finish(self, session_id: u32, header_id: u32) -> Result<TransferHeader> {
        let total_size = u32::try_from(self.offset)
            .map_err(|_| Error::invalid("transfer size exceeds u32"))?;
        let header = TransferHeader::new(session_id, header_id, self.packet_count, total_size);
        encode_header(&mut *self.buf, &header)?;

        #[cfg(feature = "debug-tools")]
        trace!(bytes = ?&self.buf[..self.offset], "transfer dump");

        Ok(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{HostFlags, PacketHeader, PayloadKind, Port};

    fn u32_packet(value: &[u8; 4]) -> OutboundPacket<'_> {
        OutboundPacket::new(0x0300_0003).payload(PayloadKind::U32, value)
    }

    #[test]
    fn test_encode_packet_exact_fit() {
        let value = 9u32.to_ne_bytes();
        let mut buf = vec![0xAAu8; 16 + 28];
        let mut offset = 16;

        encode_packet(&mut buf, &mut offset, &u32_packet(&value), 3).unwrap();

        assert_eq!(offset, 44);
        let header = PacketHeader::from_bytes(&buf[16..]).unwrap();
        assert_eq!(header.size(), 28);
        assert_eq!(header.packet_id(), 3);
        assert_eq!(&buf[40..44], &value);
        assert!(buf[..16].iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn test_encode_packet_one_byte_short() {
        let value = 9u32.to_ne_bytes();
        let mut buf = vec![0xAAu8; 16 + 27];
        let mut offset = 16;

        let result = encode_packet(&mut buf, &mut offset, &u32_packet(&value), 3);

        assert_eq!(
            result,
            Err(Error::BufferTooSmall {
                needed: 28,
                available: 27
            })
        );
        assert_eq!(offset, 16);
        assert!(buf.iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn test_encode_packet_offset_past_end() {
        let mut buf = [0u8; 8];
        let mut offset = 16;

        let result = encode_packet(&mut buf, &mut offset, &OutboundPacket::new(1), 0);
        assert!(matches!(
            result,
            Err(Error::BufferTooSmall { available: 0, .. })
        ));
        assert_eq!(offset, 16);
    }

    #[test]
    fn test_encode_packet_zero_fills_stale_bytes() {
        let mut buf = vec![0xFFu8; 64];
        let mut offset = 16;
        let packet = OutboundPacket::new(0x0100_0002);

        encode_packet(&mut buf, &mut offset, &packet, 1).unwrap();

        let header = PacketHeader::from_bytes(&buf[16..40]).unwrap();
        assert_eq!(header.flags(), HostFlags::new());
        assert_eq!(header.port(), Port::None.as_u32());
        assert_eq!(header.payload_info(), PayloadKind::None.as_u32());
        assert!(buf[40..].iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_encode_header_fields() {
        let mut buf = [0xEEu8; 20];
        encode_header(&mut buf, &TransferHeader::new(4, 5, 6, 7)).unwrap();

        let header = TransferHeader::from_bytes(&buf).unwrap();
        assert_eq!(header, TransferHeader::new(4, 5, 6, 7));
        assert_eq!(&buf[16..], &[0xEE; 4]);
    }

    #[test]
    fn test_writer_rejects_tiny_buffer() {
        let mut buf = [0u8; HEADER_SIZE - 1];
        let result = PacketWriter::new(&mut buf);
        assert!(matches!(result, Err(Error::InvalidArgument { .. })));
        assert!(buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_writer_counts_and_finishes() {
        let value = 1u32.to_ne_bytes();
        let mut buf = vec![0u8; 256];
        let mut writer = PacketWriter::new(&mut buf).unwrap();

        writer.append(&u32_packet(&value), 10).unwrap();
        writer.append(&OutboundPacket::new(0x0100_0002), 11).unwrap();
        assert_eq!(writer.packet_count(), 2);
        assert_eq!(writer.offset(), 16 + 28 + 24);
        assert_eq!(writer.remaining(), 256 - 68);

        let header = writer.finish(0, 99).unwrap();
        assert_eq!(header.total_size(), 68);
        assert_eq!(header.packet_count(), 2);
        assert_eq!(TransferHeader::from_bytes(&buf).unwrap(), header);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: a packet fits iff the remaining capacity covers header and payload
            #[test]
            fn prop_fits_iff_capacity_allows(
                capacity in 0usize..256,
                offset in 0usize..256,
                payload in prop::collection::vec(any::<u8>(), 0..128),
            ) {
                let mut buf = vec![0x5Au8; capacity];
                let mut cursor = offset;
                let packet = OutboundPacket::new(0x0300_0001).payload(PayloadKind::Blob, &payload);
                let needed = PACKET_HEADER_SIZE + payload.len();

                let result = encode_packet(&mut buf, &mut cursor, &packet, 0);

                if capacity >= offset && capacity - offset >= needed {
                    prop_assert!(result.is_ok());
                    prop_assert_eq!(cursor, offset + needed);
                    prop_assert_eq!(&buf[offset + PACKET_HEADER_SIZE..cursor], &payload[..]);
                } else {
                    prop_assert!(
                        matches!(result, Err(Error::BufferTooSmall { .. })),
                        "expected BufferTooSmall"
                    );
                    prop_assert_eq!(cursor, offset);
                    prop_assert!(buf.iter().all(|&b| b == 0x5A));
                }
            }

            /// Property: final offset is the header plus every packet's size
            #[test]
            fn prop_offsets_accumulate(
                payload_lens in prop::collection::vec(0usize..64, 1..12),
            ) {
                let mut buf = vec![0u8; 4096];
                let mut writer = PacketWriter::new(&mut buf).unwrap();
                let scratch = [0u8; 64];

                for (id, len) in payload_lens.iter().enumerate() {
                    let packet = OutboundPacket::new(0x0300_0001)
                        .payload(PayloadKind::Blob, &scratch[..*len]);
                    writer.append(&packet, id as u32).unwrap();
                }

                let expected: usize = HEADER_SIZE
                    + payload_lens.iter().map(|len| PACKET_HEADER_SIZE + len).sum::<usize>();
                prop_assert_eq!(writer.offset(), expected);
                prop_assert_eq!(writer.packet_count() as usize, payload_lens.len());
            }
        }
    }
}
