//! Flow-control extraction: line structure out, CRLF fixup back.
//!
//! Splits decoded text on `\n` and `\r` into `Text` runs and `FlowControl`
//! separators, expanding tabs to eight spaces on the way. Outbound, a lone
//! `\n` becomes `\r\n` as telnet servers expect.

use crate::chunk::{Chunk, ChunkMask, FlowControlCode};
use crate::filter::{Filter, FilterOutput};

const TAB_REPLACEMENT: &str = "        ";

/// Filter carving `Text` chunks along line separators.
#[derive(Debug, Default)]
pub struct FlowControlFilter;

impl FlowControlFilter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Filter for FlowControlFilter {
    fn relevant_types(&self) -> ChunkMask {
        ChunkMask::TEXT
    }

    fn process(&mut self, chunk: Chunk, out: &mut FilterOutput) {
        let Chunk::Text(text) = chunk else {
            return;
        };
        let text = if text.contains('\t') {
            text.replace('\t', TAB_REPLACEMENT)
        } else {
            text
        };

        let mut run_start = 0;
        for (i, c) in text.char_indices() {
            let code = match c {
                '\n' => FlowControlCode::Linefeed,
                '\r' => FlowControlCode::CarriageReturn,
                _ => continue,
            };
            if run_start < i {
                out.emit(Chunk::Text(text[run_start..i].to_string()));
            }
            out.emit(Chunk::FlowControl(code));
            run_start = i + 1;
        }
        if run_start < text.len() {
            out.emit(Chunk::Text(text[run_start..].to_string()));
        }
    }

    fn reset(&mut self) {}

    fn format_outbound(&self, data: Vec<u8>) -> Vec<u8> {
        let needs_fixup = data
            .iter()
            .enumerate()
            .any(|(i, &b)| b == b'\n' && (i == 0 || data[i - 1] != b'\r'));
        if !needs_fixup {
            return data;
        }
        let mut fixed = Vec::with_capacity(data.len() + 8);
        let mut prev = 0u8;
        for &byte in &data {
            if byte == b'\n' && prev != b'\r' {
                fixed.push(b'\r');
            }
            fixed.push(byte);
            prev = byte;
        }
        fixed
    }
}
