use crate::constants::{PACKET_COUNT_BYTES, PACKET_ID_SIZE, PACKET_ORIGIN_BYTES};

/// Origin chain slug encoded in the high 32 bits of a big-endian packet id
pub fn packet_origin_chain(packet_id: &[u8; PACKET_ID_SIZE]) -> u32 {
    let mut slug = [0u8; PACKET_ORIGIN_BYTES];
    slug.copy_from_slice(&packet_id[..PACKET_ORIGIN_BYTES]);
    u32::from_be_bytes(slug)
}

/// Packet count encoded in the low 64 bits of a big-endian packet id
pub fn packet_count(packet_id: &[u8; PACKET_ID_SIZE]) -> u64 {
    let mut count = [0u8; PACKET_COUNT_BYTES];
    count.copy_from_slice(&packet_id[PACKET_ID_SIZE - PACKET_COUNT_BYTES..]);
    u64::from_be_bytes(count)
}

#[cfg(test)]
pub(crate) fn make_packet_id(origin: u32, capacitor: [u8; 20], count: u64) -> [u8; PACKET_ID_SIZE] {
    let mut packet_id = [0u8; PACKET_ID_SIZE];
    packet_id[..4].copy_from_slice(&origin.to_be_bytes());
    packet_id[4..24].copy_from_slice(&capacitor);
    packet_id[24..].copy_from_slice(&count.to_be_bytes());
    packet_id
}
