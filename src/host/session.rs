//! Codec session as seen by the packet builders.

use bytes::{Bytes, BytesMut};

use crate::protocol::{
    BufferDescriptor, BufferRole, Codec, Domain, DriverBuffer, Port, Result, WireCodec,
    build_descriptor, resolve_port, resolve_wire_codec,
};

/// A decode or encode session with its pre-allocated transfer buffer.
#[derive(Debug)]
pub struct Session {
    session_id: u32,
    domain: Domain,
    codec: Codec,
    packet: Option<BytesMut>,
    transfer_len: usize,
}

impl Session {
    /// Create a session whose transfer buffer holds `packet_size` bytes.
    #[must_use]
    pub fn new(session_id: u32, domain: Domain, codec: Codec, packet_size: usize) -> Self {
        Self {
            session_id,
            domain,
            codec,
            packet: Some(BytesMut::zeroed(packet_size)),
            transfer_len: 0,
        }
    }

    /// Session id
    #[must_use]
    pub const fn session_id(&self) -> u32 {
        self.session_id
    }

    /// Decode or encode
    #[must_use]
    pub const fn domain(&self) -> Domain {
        self.domain
    }

    /// Driver codec
    #[must_use]
    pub const fn codec(&self) -> Codec {
        self.codec
    }

    /// Wire codec for this session.
    pub fn wire_codec(&self) -> Result<WireCodec> {
        resolve_wire_codec(self.codec, self.domain)
    }

    /// Port a buffer of `role` travels on in this session.
    pub fn port_for(&self, role: BufferRole) -> Result<Port> {
        resolve_port(self.domain, role)
    }

    /// Wire descriptor for one of this session's buffers.
    #[must_use]
    pub fn descriptor(&self, buffer: &DriverBuffer) -> BufferDescriptor {
        build_descriptor(self.domain, buffer)
    }

    /// Capacity of the transfer buffer, 0 once released.
    #[must_use]
    pub fn packet_size(&self) -> usize {
        self.packet.as_ref().map_or(0, BytesMut::len)
    }

    /// Drop the transfer buffer; later builders on this session fail.
    pub fn release_buffer(&mut self) {
        self.packet = None;
        self.transfer_len = 0;
    }

    /// Bytes of the last finalized transfer.
    #[must_use]
    pub fn transfer(&self) -> Option<&[u8]> {
        match (&self.packet, self.transfer_len) {
            (Some(packet), len) if len > 0 => Some(&packet[..len]),
            _ => None,
        }
    }

    /// Copy of the last finalized transfer for the transport to own.
    #[must_use]
    pub fn freeze_transfer(&self) -> Option<Bytes> {
        self.transfer().map(Bytes::copy_from_slice)
    }

    /// Transfer buffer, if still allocated. Invalidates the last transfer.
    pub(crate) fn packet_mut(&mut self) -> Option<&mut [u8]> {
        self.transfer_len = 0;
        self.packet.as_deref_mut()
    }

    pub(crate) fn set_transfer_len(&mut self, len: usize) {
        self.transfer_len = len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::WireBufferType;

    #[test]
    fn test_new_session() {
        let session = Session::new(5, Domain::Encoder, Codec::Hevc, 4096);

        assert_eq!(session.packet_size(), 4096);
        assert_eq!(session.wire_codec(), Ok(WireCodec::EncodeHevc));
        assert_eq!(session.port_for(BufferRole::Input), Ok(Port::Raw));
        assert!(session.transfer().is_none());
    }

    #[test]
    fn test_descriptor_uses_session_domain() {
        let session = Session::new(1, Domain::Decoder, Codec::Vp9, 64);
        let desc = session.descriptor(&DriverBuffer::new(BufferRole::Input));
        assert_eq!(desc.buffer_type(), WireBufferType::Bitstream.as_u32());
    }

    #[test]
    fn test_release_buffer() {
        let mut session = Session::new(1, Domain::Decoder, Codec::H264, 64);
        session.release_buffer();

        assert_eq!(session.packet_size(), 0);
        assert!(session.packet_mut().is_none());
    }
}
