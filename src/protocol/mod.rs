//! HFI wire format
//!
//! Layout of transfers and packets, the wire enumerations, the driver-to-wire
//! mapping tables and the bounded writer every builder uses.

mod descriptor;
mod error;
mod header;
pub mod ids;
mod mapping;
pub mod metrics;
mod packet;
mod types;
mod writer;

pub use descriptor::{BufferAttr, BufferDescriptor, DESCRIPTOR_SIZE, DriverBuffer, build_descriptor};
pub use error::{Error, Result};
pub use header::TransferHeader;
pub use mapping::{
    BufferRole, Codec, Domain, resolve_port, resolve_wire_buffer_type, resolve_wire_codec,
};
pub use packet::{OutboundPacket, PacketHeader};
pub use types::{BufferFlags, HostFlags, PayloadKind, Port, WireBufferType, WireCodec};
pub use writer::{PacketWriter, encode_header, encode_packet};

/// Transfer header size in bytes
pub const HEADER_SIZE: usize = 16;

/// Packet header size in bytes
pub const PACKET_HEADER_SIZE: usize = 24;

/// Session id used by system-level transfers
pub const SYSTEM_SESSION_ID: u32 = 0;

/// Read a native-endian u32; caller checks bounds.
fn read_u32(bytes: &[u8], at: usize) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[at..at + 4]);
    u32::from_ne_bytes(word)
}
