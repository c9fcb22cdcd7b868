//! Per hardware-core state shared by every transfer built for that core.

use super::PlatformConfig;

/// Hardware-core context.
///
/// Owns the packet and header sequence counters. Builders take it by `&mut`,
/// so only one transfer can be under construction per core at a time; callers
/// sharing a core across threads hold a lock around the whole builder call.
#[derive(Debug, Clone)]
pub struct CoreContext {
    platform: PlatformConfig,
    packet_id: u32,
    header_id: u32,
}

impl CoreContext {
    /// Bring up a core with counters starting at zero.
    #[must_use]
    pub fn new(platform: PlatformConfig) -> Self {
        Self::with_counters(platform, 0, 0)
    }

    /// Bring up a core with explicit starting counters.
    #[must_use]
    pub fn with_counters(platform: PlatformConfig, packet_id: u32, header_id: u32) -> Self {
        Self {
            platform,
            packet_id,
            header_id,
        }
    }

    /// Platform configuration
    #[must_use]
    pub const fn platform(&self) -> &PlatformConfig {
        &self.platform
    }

    /// Id the next packet will carry.
    #[must_use]
    pub const fn packet_id(&self) -> u32 {
        self.packet_id
    }

    /// Id the next transfer header will carry.
    #[must_use]
    pub const fn header_id(&self) -> u32 {
        self.header_id
    }

    /// Mark the current packet id as used. Wraps on overflow.
    pub(crate) fn advance_packet_id(&mut self) {
        self.packet_id = self.packet_id.wrapping_add(1);
    }

    /// Take the current header id and advance. Wraps on overflow.
    pub(crate) fn take_header_id(&mut self) -> u32 {
        let id = self.header_id;
        self.header_id = self.header_id.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_wrap() {
        let mut core = CoreContext::with_counters(PlatformConfig::default(), u32::MAX, u32::MAX);

        core.advance_packet_id();
        assert_eq!(core.packet_id(), 0);

        assert_eq!(core.take_header_id(), u32::MAX);
        assert_eq!(core.header_id(), 0);
    }

    #[test]
    fn test_counters_are_independent() {
        let mut core = CoreContext::new(PlatformConfig::default());
        core.advance_packet_id();
        core.advance_packet_id();

        assert_eq!(core.packet_id(), 2);
        assert_eq!(core.header_id(), 0);
    }
}
