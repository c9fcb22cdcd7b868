//! Driver-level enums and their translation to wire codes.

use tracing::error;

use super::{Error, Port, Result, WireBufferType, WireCodec};

/// Whether a session decodes or encodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Domain {
    /// Bitstream in, frames out
    Decoder,
    /// Frames in, bitstream out
    Encoder,
}

impl TryFrom<u32> for Domain {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            0x1 => Ok(Self::Decoder),
            0x2 => Ok(Self::Encoder),
            _ => {
                error!(domain = value, "invalid domain");
                Err(Error::invalid("unknown session domain"))
            }
        }
    }
}

/// Role a buffer plays in a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BufferRole {
    /// Client-queued input
    Input,
    /// Client-queued output
    Output,
    /// Metadata for an input buffer
    InputMeta,
    /// Metadata for an output buffer
    OutputMeta,
    /// Driver-side queue bookkeeping, never sent to firmware
    Queue,
    /// Internal scratch
    Scratch,
    /// Internal scratch, second region
    Scratch1,
    /// Internal scratch, third region
    Scratch2,
    /// Internal persistent memory
    Persist,
    /// Internal persistent memory, second region
    Persist1,
}

impl TryFrom<u32> for BufferRole {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        let role = match value {
            1 => Self::Input,
            2 => Self::Output,
            3 => Self::InputMeta,
            4 => Self::OutputMeta,
            5 => Self::Queue,
            6 => Self::Scratch,
            7 => Self::Scratch1,
            8 => Self::Scratch2,
            9 => Self::Persist,
            10 => Self::Persist1,
            _ => {
                error!(buffer_type = value, "invalid buffer type");
                return Err(Error::invalid("unknown buffer type"));
            }
        };
        Ok(role)
    }
}

/// Driver-level codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Codec {
    /// H.264 / AVC
    H264,
    /// H.265 / HEVC
    Hevc,
    /// VP9
    Vp9,
    /// MPEG-2
    Mpeg2,
}

impl TryFrom<u32> for Codec {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            1 => Ok(Self::H264),
            2 => Ok(Self::Hevc),
            3 => Ok(Self::Vp9),
            4 => Ok(Self::Mpeg2),
            _ => {
                error!(codec = value, "invalid codec");
                Err(Error::invalid("unknown codec"))
            }
        }
    }
}

/// Port a client buffer travels on.
///
/// Decoders take bitstream in and hand raw frames out; encoders do the
/// opposite. Only client buffers (and their metadata) have a port.
pub fn resolve_port(domain: Domain, role: BufferRole) -> Result<Port> {
    use BufferRole::{Input, InputMeta, Output, OutputMeta};

    let port = match (domain, role) {
        (Domain::Decoder, Input | InputMeta) | (Domain::Encoder, Output | OutputMeta) => {
            Port::Bitstream
        }
        (Domain::Decoder, Output | OutputMeta) | (Domain::Encoder, Input | InputMeta) => Port::Raw,
        (_, role) => {
            error!(?role, ?domain, "invalid buffer type");
            return Err(Error::invalid("buffer type has no port"));
        }
    };
    Ok(port)
}

/// Wire buffer type for a driver buffer role.
pub fn resolve_wire_buffer_type(domain: Domain, role: BufferRole) -> Result<WireBufferType> {
    let wire = match (role, domain) {
        (BufferRole::Input, Domain::Decoder) | (BufferRole::Output, Domain::Encoder) => {
            WireBufferType::Bitstream
        }
        (BufferRole::Input, Domain::Encoder) | (BufferRole::Output, Domain::Decoder) => {
            WireBufferType::Raw
        }
        (BufferRole::InputMeta | BufferRole::OutputMeta, _) => WireBufferType::Metadata,
        (BufferRole::Scratch, _) => WireBufferType::Scratch,
        (BufferRole::Scratch1, _) => WireBufferType::Scratch1,
        (BufferRole::Scratch2, _) => WireBufferType::Scratch2,
        (BufferRole::Persist, _) => WireBufferType::Persist,
        (BufferRole::Persist1, _) => WireBufferType::Persist1,
        (BufferRole::Queue, _) => {
            error!(?role, "invalid buffer type");
            return Err(Error::invalid("buffer type has no wire type"));
        }
    };
    Ok(wire)
}

/// Wire codec id for a codec in a given domain.
///
/// VP9 and MPEG-2 are decode only.
pub fn resolve_wire_codec(codec: Codec, domain: Domain) -> Result<WireCodec> {
    let wire = match (codec, domain) {
        (Codec::H264, Domain::Decoder) => WireCodec::DecodeAvc,
        (Codec::H264, Domain::Encoder) => WireCodec::EncodeAvc,
        (Codec::Hevc, Domain::Decoder) => WireCodec::DecodeHevc,
        (Codec::Hevc, Domain::Encoder) => WireCodec::EncodeHevc,
        (Codec::Vp9, Domain::Decoder) => WireCodec::DecodeVp9,
        (Codec::Mpeg2, Domain::Decoder) => WireCodec::DecodeMpeg2,
        (Codec::Vp9 | Codec::Mpeg2, Domain::Encoder) => {
            error!(?codec, ?domain, "invalid codec");
            return Err(Error::invalid("codec not supported in this domain"));
        }
    };
    Ok(wire)
}
