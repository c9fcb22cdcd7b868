//! Process-wide encoder counters.

use std::sync::atomic::{AtomicU64, Ordering};

use super::ids;

/// Track HFI encoder metrics without external dependencies.
pub(crate) struct Metrics;

static COMMAND_PACKETS: AtomicU64 = AtomicU64::new(0);
static PROPERTY_PACKETS: AtomicU64 = AtomicU64::new(0);
static OTHER_PACKETS: AtomicU64 = AtomicU64::new(0);
static PAYLOAD_BYTES: AtomicU64 = AtomicU64::new(0);
static TRANSFERS: AtomicU64 = AtomicU64::new(0);
static ERROR_COUNT: AtomicU64 = AtomicU64::new(0);

impl Metrics {
    #[inline]
    pub(crate) fn record_packet(packet_type: u32, payload_len: usize) {
        let counter = if ids::is_command(packet_type) {
            &COMMAND_PACKETS
        } else if ids::is_property(packet_type) {
            &PROPERTY_PACKETS
        } else {
            &OTHER_PACKETS
        };
        counter.fetch_add(1, Ordering::Relaxed);
        PAYLOAD_BYTES.fetch_add(payload_len as u64, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_transfer() {
        TRANSFERS.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_error() {
        ERROR_COUNT.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn totals() -> MetricsSnapshot {
        MetricsSnapshot {
            command_packets: COMMAND_PACKETS.load(Ordering::Relaxed),
            property_packets: PROPERTY_PACKETS.load(Ordering::Relaxed),
            other_packets: OTHER_PACKETS.load(Ordering::Relaxed),
            payload_bytes: PAYLOAD_BYTES.load(Ordering::Relaxed),
            transfers: TRANSFERS.load(Ordering::Relaxed),
            total_errors: ERROR_COUNT.load(Ordering::Relaxed),
        }
    }
}

/// Take a snapshot of the process-wide encoder counters.
#[must_use]
pub fn snapshot() -> MetricsSnapshot {
    Metrics::totals()
}

/// Lightweight snapshot of encoder counters.
#[derive(Default, Debug, Clone, Copy)]
pub struct MetricsSnapshot {
    /// Command packets encoded
    pub command_packets: u64,
    /// Property packets encoded
    pub property_packets: u64,
    /// Packets whose type is neither a command nor a property id
    pub other_packets: u64,
    /// Payload bytes copied into transfers
    pub payload_bytes: u64,
    /// Transfer headers written
    pub transfers: u64,
    /// Encode failures
    pub total_errors: u64,
}

impl MetricsSnapshot {
    /// Total packets encoded.
    #[must_use]
    pub fn total_packets(&self) -> u64 {
        self.command_packets + self.property_packets + self.other_packets
    }

    /// Average packets per transfer.
    #[must_use]
    pub fn avg_packets_per_transfer(&self) -> Option<u64> {
        if self.transfers == 0 {
            return None;
        }
        Some(self.total_packets() / self.transfers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_only_grow() {
        let before = snapshot();
        Metrics::record_packet(ids::cmd::INIT, 4);
        Metrics::record_packet(ids::prop::UBWC_HBB, 4);
        Metrics::record_transfer();
        let after = snapshot();

        assert!(after.command_packets > before.command_packets);
        assert!(after.property_packets > before.property_packets);
        assert!(after.payload_bytes >= before.payload_bytes + 8);
        assert!(after.transfers > before.transfers);
    }

    #[test]
    fn test_average_without_transfers() {
        assert_eq!(MetricsSnapshot::default().avg_packets_per_transfer(), None);
    }
}
