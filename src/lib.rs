//! HFI - Host-to-firmware interface packet encoder for video codec firmware
//!
//! The host talks to the video firmware through transfers: a 16-byte header
//! followed by one or more fixed-header packets carrying commands and
//! properties. This crate builds those transfers into caller-owned buffers.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hfi::{CoreContext, PlatformConfig, sys_init};
//!
//! let mut core = CoreContext::new(PlatformConfig::default());
//! let mut buf = vec![0u8; 4096];
//!
//! let header = sys_init(&mut core, &mut buf)?;
//! assert_eq!(header.packet_count(), 9);
//! # Ok::<(), hfi::Error>(())
//! ```
//!
//! # Features
//!
//! - **Bounded writes** - a packet is written whole or not at all
//! - **Explicit sequencing** - packet and header ids live on [`CoreContext`]
//! - **Exhaustive mapping** - driver enums map to wire codes through `match` tables
//! - **`serde`** - (de)serialize platform tables
//! - **`debug-tools`** - dump finalized transfers at trace level

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod host;
pub mod protocol;

pub use host::{
    CoreContext, PlatformConfig, Session, UbwcConfig, image_version, session_command,
    session_property, sys_debug_config, sys_init, sys_pc_prep,
};
pub use protocol::{
    Error, HEADER_SIZE, HostFlags, OutboundPacket, PACKET_HEADER_SIZE, PayloadKind, Port, Result,
    TransferHeader,
};

/// HFI interface revision this encoder targets
pub const VERSION: &str = "2.0";
