//! Choice payload codec.
//!
//! The `choice` argument to a vote is an opaque payload produced client-side
//! (nominally an encrypted ballot). The ledger interprets it as a fixed
//! 2-byte big-endian option index.
//!
//! Leniency, inherited from the contract this ledger replaces: a payload
//! that is not exactly 2 bytes, or that decodes to an out-of-range index,
//! resolves to option 0 instead of rejecting the vote. Known gap — the vote
//! still counts, for option 0.

/// Exact length of a well-formed choice payload.
pub const CHOICE_PAYLOAD_LEN: usize = 2;

/// Resolve a raw choice payload to an option index for a poll with
/// `option_count` options. Never fails; malformed input resolves to 0.
pub fn resolve_choice(payload: &[u8], option_count: usize) -> usize {
    if payload.len() != CHOICE_PAYLOAD_LEN {
        return 0;
    }
    let index = u16::from_be_bytes([payload[0], payload[1]]) as usize;
    if index < option_count {
        index
    } else {
        0
    }
}

/// Encode an option index as a well-formed choice payload.
pub fn encode_choice(index: u16) -> [u8; CHOICE_PAYLOAD_LEN] {
    index.to_be_bytes()
}
