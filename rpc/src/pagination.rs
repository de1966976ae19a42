//! Cursor-based pagination for the poll list endpoint.
//!
//! The cursor is an opaque base64-encoded decimal offset. Clients pass the
//! `cursor` from a previous response to fetch the next page; an absent or
//! unparsable cursor starts from the beginning.

use serde::{Deserialize, Serialize};

/// Default page size when `count` is not specified.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Maximum allowed page size.
pub const MAX_PAGE_SIZE: u32 = 500;

/// Pagination parameters accepted by list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    pub cursor: Option<String>,
    pub count: Option<u32>,
}

impl PaginationParams {
    /// Effective page size, clamped to `[1, MAX_PAGE_SIZE]`.
    pub fn effective_count(&self) -> u32 {
        self.count
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// The offset this request starts from (0 for no/invalid cursor).
    pub fn offset(&self) -> u64 {
        self.cursor.as_deref().and_then(decode_cursor).unwrap_or(0)
    }
}

/// Pagination metadata included in list responses.
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    /// Cursor for the next page, absent on the last page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl PaginationMeta {
    /// Build the next-page cursor: present only when the page came back
    /// full, meaning more items may follow.
    pub fn after(offset: u64, returned: usize, page_size: u32) -> Self {
        let cursor = if (returned as u32) < page_size {
            None
        } else {
            Some(encode_cursor(offset + returned as u64))
        };
        Self { cursor }
    }
}

/// Encode a numeric offset into an opaque cursor string.
pub fn encode_cursor(offset: u64) -> String {
    base64_encode(offset.to_string().as_bytes())
}

/// Decode a cursor string back to a numeric offset.
pub fn decode_cursor(cursor: &str) -> Option<u64> {
    let bytes = base64_decode(cursor)?;
    std::str::from_utf8(&bytes).ok()?.parse().ok()
}

// Minimal base64 helpers (no extra dependency needed).

const B64_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

fn base64_encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len().div_ceil(3) * 4);
    for chunk in data.chunks(3) {
        let mut triple = (chunk[0] as u32) << 16;
        if let Some(&b) = chunk.get(1) {
            triple |= (b as u32) << 8;
        }
        if let Some(&b) = chunk.get(2) {
            triple |= b as u32;
        }
        out.push(B64_CHARS[((triple >> 18) & 0x3F) as usize] as char);
        out.push(B64_CHARS[((triple >> 12) & 0x3F) as usize] as char);
        out.push(if chunk.len() > 1 {
            B64_CHARS[((triple >> 6) & 0x3F) as usize] as char
        } else {
            '='
        });
        out.push(if chunk.len() > 2 {
            B64_CHARS[(triple & 0x3F) as usize] as char
        } else {
            '='
        });
    }
    out
}

fn base64_decode(input: &str) -> Option<Vec<u8>> {
    fn val(c: u8) -> Option<u32> {
        match c {
            b'A'..=b'Z' => Some((c - b'A') as u32),
            b'a'..=b'z' => Some((c - b'a' + 26) as u32),
            b'0'..=b'9' => Some((c - b'0' + 52) as u32),
            b'+' => Some(62),
            b'/' => Some(63),
            _ => None,
        }
    }
    let bytes: Vec<u8> = input.bytes().filter(|&b| b != b'=').collect();
    let mut out = Vec::new();
    for chunk in bytes.chunks(4) {
        let mut accum: u32 = 0;
        let mut bits = 0;
        for &b in chunk {
            accum = (accum << 6) | val(b)?;
            bits += 6;
        }
        accum <<= 24 - bits;
        out.push((accum >> 16) as u8);
        if chunk.len() > 2 {
            out.push((accum >> 8) as u8);
        }
        if chunk.len() > 3 {
            out.push(accum as u8);
        }
    }
    Some(out)
}
