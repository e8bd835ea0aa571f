//! Splicing highlight chunks into a chunk buffer at text offsets.
//!
//! Offsets count bytes of `Text` payload only; every other chunk is
//! zero-width. Insertions must be visited in ascending offset order; the
//! walk advances a single cursor through the buffer and never backs up.

use crate::chunk::{Chunk, HighlightId};
use crate::format::FormatDelta;

/// One pending insertion: a chunk to place at a text offset.
#[derive(Debug)]
pub struct Insertion {
    pub offset: usize,
    pub chunk: Chunk,
}

/// Total byte length of `Text` payloads in the buffer.
#[must_use]
pub fn text_length(buffer: &[Chunk]) -> usize {
    buffer
        .iter()
        .map(|c| match c {
            Chunk::Text(s) => s.len(),
            _ => 0,
        })
        .sum()
}

/// Splice `insertions` (ascending by offset) into `buffer`.
///
/// An offset landing between chunks inserts before the chunk at that
/// position; an offset strictly inside a `Text` chunk splits it; an offset
/// equal to the total text length appends. Offsets beyond the total text
/// length clamp to the end: an earlier action (a gag) may have shortened or
/// emptied the buffer since the spans were computed against the line.
///
/// # Panics
///
/// Panics if the insertions are not in ascending offset order; that is a
/// programming error in the caller.
pub fn splice(buffer: &mut Vec<Chunk>, insertions: Vec<Insertion>) {
    let total = text_length(buffer);
    let mut idx = 0;
    let mut pos = 0;
    let mut last_offset = 0;
    for insertion in insertions {
        assert!(
            insertion.offset >= last_offset,
            "splice insertions must be in ascending offset order"
        );
        last_offset = insertion.offset;
        let offset = insertion.offset.min(total);

        loop {
            if pos == offset {
                buffer.insert(idx, insertion.chunk);
                idx += 1;
                break;
            }
            let chunk_len = match &buffer[idx] {
                Chunk::Text(s) => s.len(),
                _ => 0,
            };
            if pos + chunk_len > offset {
                // Split the text chunk around the insertion point.
                let split_at = offset - pos;
                let Chunk::Text(s) = buffer.remove(idx) else {
                    unreachable!("only text chunks have nonzero length");
                };
                let (head, tail) = s.split_at(split_at);
                let tail = tail.to_string();
                buffer.insert(idx, Chunk::Text(head.to_string()));
                buffer.insert(idx + 1, insertion.chunk);
                buffer.insert(idx + 2, Chunk::Text(tail));
                pos = offset;
                idx += 2;
                break;
            }
            pos += chunk_len;
            idx += 1;
        }
    }
}

/// Splice one open/close highlight pair around `[start, end)`.
pub fn splice_highlight(
    buffer: &mut Vec<Chunk>,
    id: HighlightId,
    delta: FormatDelta,
    start: usize,
    end: usize,
) {
    splice(
        buffer,
        vec![
            Insertion {
                offset: start,
                chunk: Chunk::Highlight(id, delta),
            },
            Insertion {
                offset: end,
                chunk: Chunk::Highlight(id, FormatDelta::new()),
            },
        ],
    );
}
