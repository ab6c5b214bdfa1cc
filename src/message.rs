//! Owned PUBLISH message
//!
//! Holds the topic and payload in fixed-capacity storage, plus the delivery
//! flags of the packet it was decoded from or will be encoded as. Headers
//! borrow the topic from here.

use heapless::{String, Vec};

use crate::error::{Error, Result};
use crate::protocol::flags::HeaderFlags;
use crate::protocol::header::HeaderCodec;
use crate::protocol::packet_id::PacketId;
use crate::protocol::packets::PublishHeader;
use crate::protocol::qos::QoS;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishMessage<const MAX_TOPIC_NAME_LENGTH: usize, const MAX_PAYLOAD_SIZE: usize> {
    topic: String<MAX_TOPIC_NAME_LENGTH>,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
    flags: HeaderFlags,
    packet_id: Option<PacketId>,
}

impl<const MAX_TOPIC_NAME_LENGTH: usize, const MAX_PAYLOAD_SIZE: usize>
    PublishMessage<MAX_TOPIC_NAME_LENGTH, MAX_PAYLOAD_SIZE>
{
    pub fn new(topic: &str, payload: &[u8]) -> Result<Self> {
        let mut message = Self::default();
        message.set_topic(topic)?;
        message.set_payload(payload)?;
        Ok(message)
    }

    pub fn topic(&self) -> &str {
        self.topic.as_str()
    }

    /// Replaces the topic. On error the previous topic is kept.
    pub fn set_topic(&mut self, topic: &str) -> Result<()> {
        self.topic = String::try_from(topic).map_err(|_| Error::TopicNameLengthExceeded {
            max_length: MAX_TOPIC_NAME_LENGTH,
            actual_length: topic.len(),
        })?;
        Ok(())
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Replaces the payload. On error the previous payload is kept.
    pub fn set_payload(&mut self, payload: &[u8]) -> Result<()> {
        self.payload = Vec::from_slice(payload).map_err(|_| Error::PayloadTooLarge {
            max_size: MAX_PAYLOAD_SIZE,
            actual_size: payload.len(),
        })?;
        Ok(())
    }

    pub fn header_flags(&self) -> HeaderFlags {
        self.flags
    }

    pub fn qos(&self) -> QoS {
        self.flags.qos
    }

    pub fn dup(&self) -> bool {
        self.flags.dup
    }

    pub fn retain(&self) -> bool {
        self.flags.retain
    }

    pub fn packet_id(&self) -> Option<PacketId> {
        self.packet_id
    }

    pub fn set_qos(&mut self, qos: QoS) {
        self.flags.qos = qos;
    }

    pub fn set_dup(&mut self, dup: bool) {
        self.flags.dup = dup;
    }

    pub fn set_retain(&mut self, retain: bool) {
        self.flags.retain = retain;
    }

    pub fn set_packet_id(&mut self, packet_id: Option<PacketId>) {
        self.packet_id = packet_id;
    }

    /// Validated header for the message's current flags and identifier.
    ///
    /// The flag setters above are plain writes; the QoS / DUP / identifier
    /// rules are enforced here.
    pub fn header(&self) -> Result<PublishHeader<'_>> {
        let mut builder = PublishHeader::builder(self.topic());
        builder
            .set_dup(self.flags.dup)
            .set_qos_level(self.flags.qos)
            .set_retain(self.flags.retain);
        if let Some(id) = self.packet_id {
            builder.set_packet_id(id.get())?;
        }
        builder.build()
    }

    /// Writes the complete PUBLISH packet. Returns the number of bytes written.
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize> {
        self.header()?.encode_with_payload(&self.payload, buffer)
    }

    /// Decodes a complete PUBLISH packet into a new message
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut message = Self::default();
        message.decode_from(bytes)?;
        Ok(message)
    }

    /// Decodes a complete PUBLISH packet into this message, storing its topic,
    /// payload, flags and identifier. The message is left unchanged on error.
    pub fn decode_from(&mut self, bytes: &[u8]) -> Result<()> {
        let (header, payload) = PublishHeader::decode(bytes)?;
        let mut decoded = Self::default();
        decoded.set_topic(header.topic())?;
        decoded.set_payload(payload)?;
        decoded.flags = header.header_flags();
        decoded.packet_id = header.packet_id();
        *self = decoded;
        Ok(())
    }
}

impl<const MAX_TOPIC_NAME_LENGTH: usize, const MAX_PAYLOAD_SIZE: usize> core::fmt::Display
    for PublishMessage<MAX_TOPIC_NAME_LENGTH, MAX_PAYLOAD_SIZE>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "PublishMessage {{ topic: {}, packet_id: {:?}, qos: {:?}, dup: {}, retain: {}, payload: {} bytes }}",
            self.topic,
            self.packet_id.map(PacketId::get),
            self.flags.qos,
            self.flags.dup,
            self.flags.retain,
            self.payload.len()
        )
    }
}
