//! Sliding-window text chunker.
//!
//! Splits document body text into [`Chunk`]s of at most `window` bytes,
//! cutting preferentially at whitespace so words stay intact. Consecutive
//! chunks of the same document share an `overlap` span, so a concept that
//! straddles a chunk boundary remains retrievable from at least one chunk.
//!
//! Boundaries are deterministic: identical text and parameters always
//! produce identical chunk texts, counts, and indices. All cut points are
//! snapped to UTF-8 character boundaries.

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::models::Chunk;

/// Split `text` into overlapping chunks for `document_id`.
///
/// `window` and `overlap` are byte budgets; `overlap` must be smaller than
/// `window` (validated at config load; out-of-range values are clamped
/// here rather than panicking). Whitespace-only pieces are dropped.
pub fn chunk_text(
    document_id: &str,
    destination: Option<&str>,
    text: &str,
    window: usize,
    overlap: usize,
) -> Vec<Chunk> {
    let len = text.len();
    let mut chunks = Vec::new();
    if len == 0 || window == 0 {
        return chunks;
    }
    let overlap = overlap.min(window.saturating_sub(1));

    let mut index: i64 = 0;
    let mut start = 0usize;
    while start < len {
        let mut end = floor_char_boundary(text, (start + window).min(len));
        if end < len {
            // Prefer the last whitespace inside the window, as long as the
            // cut still lands beyond the span the next chunk re-covers.
            if let Some(ws) = text[start..end].rfind(char::is_whitespace) {
                if ws > overlap {
                    end = start + ws;
                }
            }
        }
        if end <= start {
            break;
        }

        let piece = &text[start..end];
        if !piece.trim().is_empty() {
            chunks.push(make_chunk(document_id, destination, index, piece));
            index += 1;
        }

        if end >= len {
            break;
        }

        let next = floor_char_boundary(text, end - overlap.min(end));
        // Guarantee forward progress even when the overlap cannot be kept
        // (degenerate window/overlap combinations).
        start = if next > start { next } else { end };
    }

    chunks
}

fn make_chunk(document_id: &str, destination: Option<&str>, index: i64, text: &str) -> Chunk {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let hash = format!("{:x}", hasher.finalize());

    Chunk {
        id: Uuid::new_v4().to_string(),
        document_id: document_id.to_string(),
        chunk_index: index,
        destination: destination.map(|d| d.to_string()),
        text: text.to_string(),
        hash,
    }
}

/// Largest index `<= idx` that falls on a UTF-8 character boundary.
fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    if idx >= text.len() {
        return text.len();
    }
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}
