//! The filter framework: stateful transducers with postponement.
//!
//! A filter receives chunks whose tags it declared relevant and produces
//! zero or more chunks for the next stage. A filter working on a partial
//! protocol sequence (an `ESC[` cut in half by packetization, a dangling
//! Telnet IAC) postpones the tail; the dispatch layer coalesces it with the
//! next arriving chunk of the same kind before the filter sees it again.
//!
//! The pipeline is single-threaded; filters are plain mutable state with no
//! interior synchronization.

use crate::chunk::{Chunk, ChunkMask};
use crate::bus::Notification;

/// Collector for a filter's output during one `process` call.
#[derive(Debug, Default)]
pub struct FilterOutput {
    emitted: Vec<Chunk>,
    postponed: Option<Chunk>,
}

impl FilterOutput {
    /// Emit a chunk downstream.
    pub fn emit(&mut self, chunk: Chunk) {
        self.emitted.push(chunk);
    }

    /// Stash a partial chunk until the next packet supplies the rest.
    ///
    /// # Panics
    ///
    /// Panics on a second postpone within one `process` call; that is a
    /// programming error in the filter.
    pub fn postpone(&mut self, chunk: Chunk) {
        assert!(
            self.postponed.is_none(),
            "filter postponed two chunks without an intervening flush"
        );
        self.postponed = Some(chunk);
    }

    /// Consume the collector, returning emitted chunks and the postponed
    /// chunk, if any.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Chunk>, Option<Chunk>) {
        (self.emitted, self.postponed)
    }
}

/// A stateful transducer in the pipeline chain.
pub trait Filter {
    /// The chunk tags this filter's `process` wants to see. Chunks with
    /// other tags are forwarded around it unchanged.
    fn relevant_types(&self) -> ChunkMask;

    /// Transform one chunk into zero or more chunks, optionally postponing
    /// a partial tail via [`FilterOutput::postpone`].
    fn process(&mut self, chunk: Chunk, out: &mut FilterOutput);

    /// Return to the freshly-constructed state (called on reconnect).
    fn reset(&mut self);

    /// Transform outbound data (telnet escaping, CRLF fixup). Identity by
    /// default.
    #[must_use]
    fn format_outbound(&self, data: Vec<u8>) -> Vec<u8> {
        data
    }

    /// Receive a named notification from the pipeline bus.
    fn on_notification(&mut self, _note: &Notification<'_>) {}
}

/// One position in the filter chain: the filter plus its postponed chunk.
pub(crate) struct Stage {
    filter: Box<dyn Filter>,
    postponed: Option<Chunk>,
}

impl Stage {
    pub(crate) fn new(filter: Box<dyn Filter>) -> Self {
        Self {
            filter,
            postponed: None,
        }
    }

    pub(crate) fn filter(&self) -> &dyn Filter {
        self.filter.as_ref()
    }

    pub(crate) fn filter_mut(&mut self) -> &mut dyn Filter {
        self.filter.as_mut()
    }

    /// Feed one chunk through this stage, appending output to `downstream`.
    ///
    /// Dispatch rule:
    /// 1. A held postponed chunk is merged into a newly arriving coalescable
    ///    chunk. `PacketBoundary` never merges; the held chunk stays put so a
    ///    partial sequence can span packets.
    /// 2. On a tag mismatch the held chunk is forwarded downstream as-is.
    /// 3. Relevant chunks go through `process`; everything else passes
    ///    through unchanged.
    pub(crate) fn feed(&mut self, chunk: Chunk, downstream: &mut Vec<Chunk>) {
        let mut chunk = chunk;
        if let Some(held) = self.postponed.take() {
            if chunk.tag() == crate::chunk::ChunkTag::PacketBoundary {
                self.postponed = Some(held);
            } else {
                match held.coalesce(chunk) {
                    Ok(merged) => chunk = merged,
                    Err((held, original)) => {
                        downstream.push(held);
                        chunk = original;
                    }
                }
            }
        }

        if self.filter.relevant_types().contains(chunk.tag().into()) {
            let mut out = FilterOutput::default();
            self.filter.process(chunk, &mut out);
            let (emitted, postponed) = out.into_parts();
            self.postponed = postponed;
            downstream.extend(emitted);
        } else {
            downstream.push(chunk);
        }
    }

    pub(crate) fn reset(&mut self) {
        self.postponed = None;
        self.filter.reset();
    }
}
