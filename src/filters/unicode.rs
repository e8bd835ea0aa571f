//! Incremental byte-to-text decoding.
//!
//! Wraps an `encoding_rs` streaming decoder: partial multi-byte sequences
//! stay buffered inside the decoder between chunks, so this filter never
//! needs the postponement slot. Invalid input decodes to U+FFFD. The filter
//! listens for the `encoding_changed` notification and swaps decoders on the
//! fly.

use encoding_rs::{Decoder, Encoding};

use crate::bus::{ENCODING_CHANGED, Notification};
use crate::chunk::{Chunk, ChunkMask};
use crate::event::{LogLevel, emit_log};
use crate::filter::{Filter, FilterOutput};

/// Fallback used when a configured label is unknown.
pub const DEFAULT_ENCODING: &str = "latin1";

/// Filter decoding `Bytes` chunks into `Text` chunks.
pub struct UnicodeFilter {
    encoding: &'static Encoding,
    decoder: Decoder,
}

impl UnicodeFilter {
    /// Create a filter for the given encoding label, falling back to latin1
    /// (with a warning) when the label is unknown.
    #[must_use]
    pub fn new(label: &str) -> Self {
        let encoding = Self::resolve(label);
        Self {
            encoding,
            decoder: encoding.new_decoder_without_bom_handling(),
        }
    }

    fn resolve(label: &str) -> &'static Encoding {
        Encoding::for_label(label.as_bytes()).unwrap_or_else(|| {
            emit_log(
                LogLevel::Warn,
                &format!("unknown encoding label {label:?}, falling back to {DEFAULT_ENCODING}"),
            );
            Encoding::for_label(DEFAULT_ENCODING.as_bytes())
                .unwrap_or(encoding_rs::WINDOWS_1252)
        })
    }

    /// The canonical name of the active encoding.
    #[must_use]
    pub fn encoding_name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Swap to a new encoding, discarding any buffered partial sequence.
    pub fn set_encoding(&mut self, label: &str) {
        self.encoding = Self::resolve(label);
        self.decoder = self.encoding.new_decoder_without_bom_handling();
    }

    fn decode(&mut self, data: &[u8]) -> String {
        let mut text = String::with_capacity(
            self.decoder
                .max_utf8_buffer_length(data.len())
                .unwrap_or(data.len() * 3),
        );
        let mut input = data;
        loop {
            let (result, read, _replaced) = self.decoder.decode_to_string(input, &mut text, false);
            match result {
                encoding_rs::CoderResult::InputEmpty => break,
                encoding_rs::CoderResult::OutputFull => {
                    input = &input[read..];
                    text.reserve(
                        self.decoder
                            .max_utf8_buffer_length(input.len())
                            .unwrap_or(input.len() * 3),
                    );
                }
            }
        }
        text
    }
}

impl Filter for UnicodeFilter {
    fn relevant_types(&self) -> ChunkMask {
        ChunkMask::BYTES
    }

    fn process(&mut self, chunk: Chunk, out: &mut FilterOutput) {
        let Chunk::Bytes(data) = chunk else {
            return;
        };
        let text = self.decode(&data);
        if !text.is_empty() {
            out.emit(Chunk::Text(text));
        }
    }

    fn reset(&mut self) {
        self.decoder = self.encoding.new_decoder_without_bom_handling();
    }

    fn on_notification(&mut self, note: &Notification<'_>) {
        if note.name == ENCODING_CHANGED {
            self.set_encoding(note.value);
        }
    }
}
