pub mod flags;
pub mod header;
pub mod packet_id;
pub mod packet_type;
pub mod packets;
pub mod qos;
pub mod utils;

pub use flags::HeaderFlags;
pub use header::{FixedHeader, HeaderCodec};
pub use packet_id::PacketId;
pub use packet_type::PacketType;
pub use packets::{Packet, PacketIdHeader, PublishHeader, PublishHeaderBuilder};
pub use qos::QoS;
