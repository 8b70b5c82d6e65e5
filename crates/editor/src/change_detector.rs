// Chunk: docs/chunks/view_buffer_sync - Content fingerprinting
//!
//! Cheap content fingerprints used to skip redundant buffer rewrites.
//!
//! The same function is applied to the live surface text and to the bound
//! buffer's materialized content. When both fingerprints match the sync is
//! skipped.
//!
//! ## Known limitation
//!
//! Long content is fingerprinted from five sampled bytes plus its length.
//! An edit that keeps the length and touches none of the sampled offsets
//! produces the same fingerprint, so that edit is not synced until the next
//! change that does move the fingerprint. Short content is compared by
//! length alone, so a same-length replacement (typing over a selection of
//! equal size) aliases the same way.

use deskedit_buffer::TextBuffer;

/// Content below this many bytes is fingerprinted by length alone.
pub const SHORT_CONTENT_THRESHOLD: usize = 1000;

/// Fixed byte offsets sampled from long content (the midpoint and the last
/// byte are added per content).
const FIXED_SAMPLE_OFFSETS: [usize; 3] = [0, 100, 500];

/// A heuristic content fingerprint.
///
/// The two variants never compare equal to each other, so content that
/// crosses the short threshold always reads as changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fingerprint {
    /// Byte length of content shorter than [`SHORT_CONTENT_THRESHOLD`].
    Short(usize),
    /// Rolling combination of sampled bytes and the total length.
    Sampled(u64),
}

/// Computes the fingerprint of `content`.
pub fn fingerprint(content: &str) -> Fingerprint {
    let bytes = content.as_bytes();
    let len = bytes.len();
    if len < SHORT_CONTENT_THRESHOLD {
        return Fingerprint::Short(len);
    }

    let mut hash: u64 = 0;
    for offset in sample_offsets(len) {
        hash = hash.wrapping_mul(31).wrapping_add(u64::from(bytes[offset]));
    }
    Fingerprint::Sampled(hash.wrapping_add(len as u64))
}

/// Fingerprints the buffer's materialized content.
pub fn buffer_fingerprint(buffer: &TextBuffer) -> Fingerprint {
    fingerprint(&buffer.content())
}

/// Offsets sampled from content of `len` bytes, in folding order.
fn sample_offsets(len: usize) -> impl Iterator<Item = usize> {
    FIXED_SAMPLE_OFFSETS
        .into_iter()
        .chain([len / 2, len - 1])
        .filter(move |&offset| offset < len)
}
