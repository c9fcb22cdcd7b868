//! Transfer builders for system and session requests.
//!
//! Each builder reserves the transfer header, appends its packets in a fixed
//! order and writes the header last. A failure on any packet aborts the
//! transfer before the header is written, leaving the buffer inert.

use tracing::{debug, error, instrument};

use super::{CoreContext, Session};
use crate::protocol::ids::{cmd, prop};
use crate::protocol::{
    Error, HostFlags, OutboundPacket, PacketWriter, PayloadKind, Result, SYSTEM_SESSION_ID,
    TransferHeader,
};

/// Append `packet` with the core's next packet id.
///
/// The id is only consumed when the packet was written.
fn emit(
    core: &mut CoreContext,
    writer: &mut PacketWriter<'_>,
    packet: &OutboundPacket<'_>,
) -> Result<()> {
    writer.append(packet, core.packet_id())?;
    core.advance_packet_id();
    Ok(())
}

/// Run `fill` against a fresh writer over `buf` and finalize the header.
fn build_transfer<F>(
    core: &mut CoreContext,
    buf: &mut [u8],
    session_id: u32,
    what: &'static str,
    fill: F,
) -> Result<TransferHeader>
where
    F: FnOnce(&mut CoreContext, &mut PacketWriter<'_>) -> Result<()>,
{
    let mut writer =
        PacketWriter::new(buf).inspect_err(|err| error!(what, %err, "invalid params"))?;

    fill(&mut *core, &mut writer)
        .inspect_err(|err| error!(what, %err, "create packet failed"))?;

    let header = writer.finish(session_id, core.take_header_id())?;
    debug!(
        what,
        session_id,
        header_id = header.header_id(),
        packets = header.packet_count(),
        size = header.total_size(),
        "packet created"
    );
    Ok(header)
}

fn u32_property(packet_type: u32, value: &[u8; 4]) -> OutboundPacket<'_> {
    OutboundPacket::new(packet_type).payload(PayloadKind::U32, value)
}

/// System init: `CMD_INIT` followed by the power and UBWC properties.
#[instrument(level = "debug", skip(core, buf))]
pub fn sys_init(core: &mut CoreContext, buf: &mut [u8]) -> Result<TransferHeader> {
    let platform = *core.platform();
    let ubwc = platform.ubwc;

    build_transfer(core, buf, SYSTEM_SESSION_ID, "system init", |core, writer| {
        let arch = platform.video_arch.to_ne_bytes();
        let init = OutboundPacket::new(cmd::INIT)
            .flags(HostFlags::blocking_command())
            .payload(PayloadKind::U32, &arch);
        emit(core, writer, &init)?;

        let properties = [
            (
                prop::INTRA_FRAME_POWER_COLLAPSE,
                u32::from(platform.intra_frame_power_collapse),
            ),
            (prop::UBWC_MAX_CHANNELS, ubwc.max_channels),
            (prop::UBWC_MAL_LENGTH, ubwc.mal_length),
            (prop::UBWC_HBB, ubwc.highest_bank_bit),
            (prop::UBWC_BANK_SWZL_LEVEL1, ubwc.bank_swzl_level1),
            (prop::UBWC_BANK_SWZL_LEVEL2, ubwc.bank_swzl_level2),
            (prop::UBWC_BANK_SWZL_LEVEL3, ubwc.bank_swzl_level3),
            (prop::UBWC_BANK_SPREADING, ubwc.bank_spreading),
        ];
        for (packet_type, value) in properties {
            emit(core, writer, &u32_property(packet_type, &value.to_ne_bytes()))?;
        }
        Ok(())
    })
}

/// Query the firmware image version.
#[instrument(level = "debug", skip(core, buf))]
pub fn image_version(core: &mut CoreContext, buf: &mut [u8]) -> Result<TransferHeader> {
    build_transfer(core, buf, SYSTEM_SESSION_ID, "image version", |core, writer| {
        let query = OutboundPacket::new(prop::IMAGE_VERSION).flags(HostFlags::property_query());
        emit(core, writer, &query)
    })
}

/// Ask firmware to prepare for power collapse.
#[instrument(level = "debug", skip(core, buf))]
pub fn sys_pc_prep(core: &mut CoreContext, buf: &mut [u8]) -> Result<TransferHeader> {
    build_transfer(core, buf, SYSTEM_SESSION_ID, "power collapse", |core, writer| {
        emit(core, writer, &OutboundPacket::new(cmd::POWER_COLLAPSE))
    })
}

/// Configure firmware debug output.
///
/// The same value goes out as both the debug config and the log level.
// TODO: split into separate debug-config and log-level values once firmware
// documents the log-level encoding.
#[instrument(level = "debug", skip(core, buf))]
pub fn sys_debug_config(
    core: &mut CoreContext,
    buf: &mut [u8],
    debug_config: u32,
) -> Result<TransferHeader> {
    build_transfer(core, buf, SYSTEM_SESSION_ID, "debug", |core, writer| {
        let value = debug_config.to_ne_bytes();
        for packet_type in [prop::DEBUG_CONFIG, prop::DEBUG_LOG_LEVEL] {
            let packet = OutboundPacket::new(packet_type).payload(PayloadKind::U32Enum, &value);
            emit(core, writer, &packet)?;
        }
        Ok(())
    })
}

/// Send one command in the session's transfer buffer, addressed to `session_id`.
#[instrument(level = "debug", skip(core, session, packet), fields(packet_type = packet.packet_type()))]
pub fn session_command(
    core: &mut CoreContext,
    session: &mut Session,
    session_id: u32,
    packet: &OutboundPacket<'_>,
) -> Result<TransferHeader> {
    let Some(buf) = session.packet_mut() else {
        error!(session_id, "invalid params: session has no transfer buffer");
        return Err(Error::invalid("session has no transfer buffer"));
    };

    let header = build_transfer(core, buf, session_id, "command", |core, writer| {
        emit(core, writer, packet)
    })?;
    session.set_transfer_len(header.total_size() as usize);
    Ok(header)
}

/// Send one property in the session's transfer buffer, addressed to the session.
#[instrument(level = "debug", skip(core, session, packet), fields(packet_type = packet.packet_type()))]
pub fn session_property(
    core: &mut CoreContext,
    session: &mut Session,
    packet: &OutboundPacket<'_>,
) -> Result<TransferHeader> {
    let session_id = session.session_id();
    let Some(buf) = session.packet_mut() else {
        error!(session_id, "invalid params: session has no transfer buffer");
        return Err(Error::invalid("session has no transfer buffer"));
    };

    let header = build_transfer(core, buf, session_id, "property", |core, writer| {
        emit(core, writer, packet)
    })?;
    session.set_transfer_len(header.total_size() as usize);
    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::PlatformConfig;
    use crate::protocol::{HEADER_SIZE, PACKET_HEADER_SIZE, PacketHeader};

    #[test]
    fn test_failed_packet_keeps_counters() {
        let mut core = CoreContext::new(PlatformConfig::default());
        let mut buf = [0u8; HEADER_SIZE + PACKET_HEADER_SIZE - 1];

        let result = sys_pc_prep(&mut core, &mut buf);

        assert!(matches!(result, Err(Error::BufferTooSmall { .. })));
        assert_eq!(core.packet_id(), 0);
        assert_eq!(core.header_id(), 0);
    }

    #[test]
    fn test_power_collapse_layout() {
        let mut core = CoreContext::with_counters(PlatformConfig::default(), 40, 7);
        let mut buf = [0xFFu8; 64];

        let header = sys_pc_prep(&mut core, &mut buf).unwrap();

        assert_eq!(header.header_id(), 7);
        assert_eq!(header.session_id(), SYSTEM_SESSION_ID);
        assert_eq!(header.total_size(), 40);
        let packet = PacketHeader::from_bytes(&buf[HEADER_SIZE..]).unwrap();
        assert_eq!(packet.packet_type(), cmd::POWER_COLLAPSE);
        assert_eq!(packet.flags().bits(), HostFlags::NONE);
        assert_eq!(packet.packet_id(), 40);
        assert_eq!(core.packet_id(), 41);
        assert_eq!(core.header_id(), 8);
    }

    #[test]
    fn test_session_property_uses_own_id() {
        let mut core = CoreContext::new(PlatformConfig::default());
        let mut session = Session::new(
            0x33,
            crate::protocol::Domain::Decoder,
            crate::protocol::Codec::H264,
            128,
        );

        let header = session_property(&mut core, &mut session, &OutboundPacket::new(0x0300_0100))
            .unwrap();
        assert_eq!(header.session_id(), 0x33);
        assert_eq!(session.transfer().map(<[u8]>::len), Some(40));
    }
}
