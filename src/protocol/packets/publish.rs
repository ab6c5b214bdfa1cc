use log::{debug, warn};

use crate::error::{Error, Result, Violation};
use crate::protocol::flags::HeaderFlags;
use crate::protocol::header::{FixedHeader, HeaderCodec};
use crate::protocol::packet_id::PacketId;
use crate::protocol::packet_type::PacketType;
use crate::protocol::qos::QoS;
use crate::protocol::utils::{read_string, string_length, write_string, MAX_STRING_LENGTH};

/// Validated PUBLISH header: flags, Packet Identifier and the topic it belongs to.
///
/// A value of this type always holds `packet_id.is_some() == qos > 0` and never
/// carries DUP with QoS 0. The topic is borrowed from its owner: the message on
/// the send path, the receive buffer on the decode path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishHeader<'a> {
    topic: &'a str,
    flags: HeaderFlags,
    packet_id: Option<PacketId>,
}

impl<'a> PublishHeader<'a> {
    pub const fn builder(topic: &'a str) -> PublishHeaderBuilder<'a> {
        PublishHeaderBuilder::new(topic)
    }

    pub const fn topic(&self) -> &'a str {
        self.topic
    }

    pub const fn header_flags(&self) -> HeaderFlags {
        self.flags
    }

    pub const fn dup(&self) -> bool {
        self.flags.dup
    }

    pub const fn qos(&self) -> QoS {
        self.flags.qos
    }

    pub const fn retain(&self) -> bool {
        self.flags.retain
    }

    pub const fn packet_id(&self) -> Option<PacketId> {
        self.packet_id
    }

    pub const fn requires_packet_id(&self) -> bool {
        self.flags.qos.requires_packet_id()
    }

    /// Builder holding this header's state, e.g. to flag a retransmission
    pub const fn to_builder(&self) -> PublishHeaderBuilder<'a> {
        PublishHeaderBuilder {
            topic: self.topic,
            dup: self.flags.dup,
            qos: self.flags.qos,
            retain: self.flags.retain,
            packet_id: self.packet_id,
        }
    }
}

impl<'a> HeaderCodec<'a> for PublishHeader<'a> {
    fn packet_type(&self) -> PacketType {
        PacketType::Publish
    }

    fn flags(&self) -> u8 {
        self.flags.to_nibble()
    }

    fn variable_header_len(&self) -> usize {
        variable_header_len(self.topic, self.flags.qos)
    }

    fn validate(&self, _payload: &[u8]) -> Result<()> {
        validate_topic(self.topic)
    }

    fn encode_variable_header(&self, buffer: &mut [u8], offset: &mut usize) -> Result<()> {
        debug!(
            "PUBLISH: topic={} qos={} dup={} retain={}",
            self.topic, self.flags.qos as u8, self.flags.dup, self.flags.retain
        );
        encode_variable_header(self.topic, self.flags.qos, self.packet_id, buffer, offset)
    }

    fn decode_variable_header(
        fixed: &FixedHeader,
        bytes: &'a [u8],
        offset: &mut usize,
    ) -> Result<Self> {
        if fixed.packet_type != PacketType::Publish {
            return Err(Error::InvalidPacketType {
                packet_type: fixed.packet_type as u8,
            });
        }

        let flags = HeaderFlags::from_nibble(fixed.flags).map_err(|e| {
            warn!("PUBLISH rejected: flags {:04b}: {}", fixed.flags, e);
            e
        })?;
        if flags.dup && !flags.qos.requires_packet_id() {
            warn!("PUBLISH rejected: DUP set with QoS 0");
            return Err(Error::ProtocolViolation {
                violation: Violation::DupWithQos0,
            });
        }

        let topic = read_string(bytes, offset)?;
        let packet_id = if flags.qos.requires_packet_id() {
            let id = PacketId::read(bytes, offset).map_err(|e| {
                warn!("PUBLISH rejected: topic={}: {}", topic, e);
                e
            })?;
            Some(id)
        } else {
            None
        };

        debug!(
            "PUBLISH decoded: topic={} qos={} dup={} retain={} packet_id={:?}",
            topic,
            flags.qos as u8,
            flags.dup,
            flags.retain,
            packet_id.map(PacketId::get)
        );

        Ok(PublishHeader {
            topic,
            flags,
            packet_id,
        })
    }
}

impl core::fmt::Display for PublishHeader<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "PublishHeader {{ topic: {}, packet_id: {:?}, qos: {:?}, dup: {}, retain: {} }}",
            self.topic,
            self.packet_id.map(PacketId::get),
            self.flags.qos,
            self.flags.dup,
            self.flags.retain
        )
    }
}

/// Setter-driven configuration of an outgoing PUBLISH header.
///
/// Every setter validates immediately. [`build`](Self::build) applies the rules
/// that span several fields and yields a [`PublishHeader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishHeaderBuilder<'a> {
    topic: &'a str,
    dup: bool,
    qos: QoS,
    retain: bool,
    packet_id: Option<PacketId>,
}

impl<'a> PublishHeaderBuilder<'a> {
    pub const fn new(topic: &'a str) -> Self {
        PublishHeaderBuilder {
            topic,
            dup: false,
            qos: QoS::AtMostOnce,
            retain: false,
            packet_id: None,
        }
    }

    pub fn set_topic(&mut self, topic: &'a str) -> &mut Self {
        self.topic = topic;
        self
    }

    pub fn set_dup(&mut self, dup: bool) -> &mut Self {
        self.dup = dup;
        self
    }

    /// Fails with [`Error::InvalidProtocolValue`] outside 0..=2 and leaves
    /// the current level in place.
    pub fn set_qos(&mut self, qos: u8) -> Result<&mut Self> {
        let qos = QoS::from_u8(qos)?;
        Ok(self.set_qos_level(qos))
    }

    pub fn set_qos_level(&mut self, qos: QoS) -> &mut Self {
        self.qos = qos;
        self
    }

    pub fn set_retain(&mut self, retain: bool) -> &mut Self {
        self.retain = retain;
        self
    }

    /// Applies a packed nibble: bit 3 DUP, bits 2-1 QoS, bit 0 RETAIN, in
    /// that order.
    pub fn set_flags(&mut self, flags: u8) -> Result<&mut Self> {
        self.set_dup(flags & 0b1000 != 0);
        self.set_qos((flags >> 1) & 0b11)?;
        Ok(self.set_retain(flags & 0b0001 != 0))
    }

    /// With QoS 0 a zero identifier means "not set" and is accepted as a no-op;
    /// any other value is a protocol violation.
    pub fn set_packet_id(&mut self, id: u16) -> Result<&mut Self> {
        if self.qos.requires_packet_id() {
            self.packet_id = Some(PacketId::new(id)?);
        } else if id != 0 {
            return Err(Error::ProtocolViolation {
                violation: Violation::PacketIdWithQos0,
            });
        }
        Ok(self)
    }

    pub const fn topic(&self) -> &'a str {
        self.topic
    }

    pub const fn dup(&self) -> bool {
        self.dup
    }

    pub const fn qos(&self) -> QoS {
        self.qos
    }

    pub const fn retain(&self) -> bool {
        self.retain
    }

    pub const fn packet_id(&self) -> Option<PacketId> {
        self.packet_id
    }

    pub const fn requires_packet_id(&self) -> bool {
        self.qos.requires_packet_id()
    }

    pub const fn header_flags(&self) -> HeaderFlags {
        HeaderFlags::new(self.dup, self.qos, self.retain)
    }

    pub fn build(&self) -> Result<PublishHeader<'a>> {
        validate_topic(self.topic)?;
        if !self.qos.requires_packet_id() {
            if self.dup {
                return Err(Error::ProtocolViolation {
                    violation: Violation::DupWithQos0,
                });
            }
            // an identifier left over from an earlier QoS is never sent
            return Ok(PublishHeader {
                topic: self.topic,
                flags: self.header_flags(),
                packet_id: None,
            });
        }

        let packet_id = self.packet_id.ok_or(Error::MissingPacketIdentifier)?;
        Ok(PublishHeader {
            topic: self.topic,
            flags: self.header_flags(),
            packet_id: Some(packet_id),
        })
    }

    /// Writes the variable header alone: topic, then the Packet Identifier when
    /// QoS > 0. Returns the number of bytes written.
    pub fn encode_variable_header(&self, buffer: &mut [u8]) -> Result<usize> {
        let mut offset = 0;
        encode_variable_header(self.topic, self.qos, self.packet_id, buffer, &mut offset)?;
        Ok(offset)
    }

    /// Builds the header and writes fixed and variable header into `buffer`
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize> {
        self.build()?.encode(buffer)
    }
}

fn validate_topic(topic: &str) -> Result<()> {
    if topic.len() > MAX_STRING_LENGTH {
        warn!("PUBLISH rejected: topic of {} bytes", topic.len());
        return Err(Error::StringTooLong {
            length: topic.len(),
        });
    }
    Ok(())
}

fn variable_header_len(topic: &str, qos: QoS) -> usize {
    let mut len = string_length(topic);
    if qos.requires_packet_id() {
        len += PacketId::ENCODED_LEN;
    }
    len
}

fn encode_variable_header(
    topic: &str,
    qos: QoS,
    packet_id: Option<PacketId>,
    buffer: &mut [u8],
    offset: &mut usize,
) -> Result<()> {
    let packet_id = match (qos.requires_packet_id(), packet_id) {
        (true, Some(id)) => Some(id),
        (true, None) => return Err(Error::MissingPacketIdentifier),
        (false, _) => None,
    };
    if *offset + variable_header_len(topic, qos) > buffer.len() {
        return Err(Error::BufferTooSmall);
    }

    write_string(topic, buffer, offset)?;
    if let Some(id) = packet_id {
        id.write(buffer, offset)?;
    }
    Ok(())
}
