//! # picopub
//!
//! `no_std` MQTT 3.1.1 PUBLISH header codec.
//!
//! Serializes publish messages into the exact fixed + variable header layout
//! and decodes received bytes back into validated headers, rejecting any
//! packet that breaks the QoS / DUP / Packet Identifier rules.
//!
//! ## Features
//!
//! - **no_std** compatible - no standard library, no heap
//! - **Strict** - invalid QoS, DUP on QoS 0, missing or zero Packet
//!   Identifiers are errors, on both the send and the receive path
//! - **Zero-copy decode** - decoded topics and payloads borrow the input
//! - **Shared fixed header** - PUBLISH, PUBREL, SUBSCRIBE, UNSUBSCRIBE and the
//!   acknowledgements all go through [`HeaderCodec`]
//!
//! ## Example
//!
//! ```rust
//! use picopub::{HeaderCodec, PublishHeader};
//!
//! let mut builder = PublishHeader::builder("a/b");
//! builder.set_qos(1)?.set_retain(true).set_packet_id(42)?;
//!
//! let mut buffer = [0u8; 16];
//! let len = builder.encode(&mut buffer)?;
//! assert_eq!(&buffer[..len], &[0x33, 0x07, 0x00, 0x03, b'a', b'/', b'b', 0x00, 0x2A]);
//!
//! let (header, payload) = PublishHeader::decode(&buffer[..len])?;
//! assert_eq!(header.topic(), "a/b");
//! assert_eq!(header.packet_id().map(|id| id.get()), Some(42));
//! assert!(payload.is_empty());
//! # Ok::<(), picopub::Error>(())
//! ```
//!
//! ## Configuration
//!
//! Message storage is configured via const generics:
//!
//! - `MAX_TOPIC_NAME_LENGTH`: topic capacity of a [`PublishMessage`]
//! - `MAX_PAYLOAD_SIZE`: payload capacity of a [`PublishMessage`]
//!
//! The `defmt` cargo feature adds `defmt::Format` for the error and enum types.

#![no_std]

pub mod error;
pub mod message;
pub mod protocol;

pub use error::{Error, Result, Violation};
pub use message::PublishMessage;
pub use protocol::{
    FixedHeader, HeaderCodec, HeaderFlags, Packet, PacketId, PacketIdHeader, PacketType,
    PublishHeader, PublishHeaderBuilder, QoS,
};

/// Common message configurations
pub mod prelude {
    use super::PublishMessage;

    /// Small configuration: 32-byte topics, 64-byte payloads
    pub type SmallMessage = PublishMessage<32, 64>;

    /// Medium configuration: 64-byte topics, 256-byte payloads
    pub type MediumMessage = PublishMessage<64, 256>;

    /// Large configuration: 128-byte topics, 1 KiB payloads
    pub type LargeMessage = PublishMessage<128, 1024>;
}
