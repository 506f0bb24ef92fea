//! Byte helpers shared by the parsers and the signature matcher.

/// Extracts a little-endian 16-bit unsigned integer from a buffer at a given offset.
///
/// # Arguments
///
/// - `buffer`: A slice of bytes from which the value will be extracted.
/// - `offset`: The offset within the buffer where the 16-bit value starts.
///
/// # Panics
///
/// Panics if the slice does not contain enough bytes starting from the offset.
pub fn u16_at(buffer: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([buffer[offset], buffer[offset + 1]])
}

/// Packs the first `len` bytes of `buffer` into a big-endian integer.
///
/// Returns `None` if `len` is greater than 8 or the buffer is too short.
pub fn be_key(buffer: &[u8], len: usize) -> Option<u64> {
    if len > 8 || buffer.len() < len {
        return None;
    }

    Some(
        buffer[..len]
            .iter()
            .fold(0u64, |key, byte| (key << 8) | u64::from(*byte)),
    )
}

/// Returns `true` if `needle` occurs anywhere in `haystack`.
pub fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|window| window == needle)
}
