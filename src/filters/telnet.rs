//! Telnet IAC extraction (RFC 854/855).
//!
//! Strips telnet command and option-negotiation sequences out of the byte
//! stream, turning doubled IAC into a literal 0xFF byte. Negotiation is
//! parsed and dropped; this client never volunteers options. A sequence cut
//! off by packetization is postponed until the next packet completes it.

use crate::chunk::{Chunk, ChunkMask};
use crate::filter::{Filter, FilterOutput};

/// Interpret As Command.
pub const IAC: u8 = 0xFF;

const SE: u8 = 240;
const SB: u8 = 250;
const WILL: u8 = 251;
const DONT: u8 = 254;

/// Longest subnegotiation body we will wait for before declaring the
/// sequence malformed and letting the bytes through as data.
const MAX_SUBNEGOTIATION: usize = 256;

enum Scan {
    /// A full sequence; `literal` marks a doubled IAC.
    Complete { consumed: usize, literal: bool },
    /// The tail might still become a sequence; postpone it.
    Incomplete,
    /// Malformed; skip `consumed` bytes and keep scanning.
    Malformed { consumed: usize },
}

/// Filter extracting telnet sequences from `Bytes` chunks.
#[derive(Debug, Default)]
pub struct TelnetFilter;

impl TelnetFilter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Classify the sequence starting at an IAC byte.
    fn scan_sequence(data: &[u8]) -> Scan {
        debug_assert_eq!(data[0], IAC);
        let Some(&command) = data.get(1) else {
            return Scan::Incomplete;
        };
        match command {
            IAC => Scan::Complete {
                consumed: 2,
                literal: true,
            },
            WILL..=DONT => {
                // Two-byte negotiation: IAC (WILL|WONT|DO|DONT) option.
                if data.len() < 3 {
                    Scan::Incomplete
                } else {
                    Scan::Complete {
                        consumed: 3,
                        literal: false,
                    }
                }
            }
            SB => Self::scan_subnegotiation(data),
            SE..=249 => Scan::Complete {
                consumed: 2,
                literal: false,
            },
            // IAC followed by a non-command byte: drop the IAC, keep the rest.
            _ => Scan::Malformed { consumed: 1 },
        }
    }

    /// Scan `IAC SB ... IAC SE`, honoring IAC IAC escapes in the body.
    fn scan_subnegotiation(data: &[u8]) -> Scan {
        let mut i: usize = 2;
        loop {
            if i.saturating_sub(2) > MAX_SUBNEGOTIATION {
                return Scan::Malformed { consumed: 2 };
            }
            match data.get(i) {
                None => return Scan::Incomplete,
                Some(&IAC) => match data.get(i + 1) {
                    None => return Scan::Incomplete,
                    Some(&SE) => {
                        return Scan::Complete {
                            consumed: i + 2,
                            literal: false,
                        };
                    }
                    Some(_) => i += 2,
                },
                Some(_) => i += 1,
            }
        }
    }
}

impl Filter for TelnetFilter {
    fn relevant_types(&self) -> ChunkMask {
        ChunkMask::BYTES
    }

    fn process(&mut self, chunk: Chunk, out: &mut FilterOutput) {
        let Chunk::Bytes(data) = chunk else {
            return;
        };

        let mut run_start = 0;
        let mut i = 0;
        while i < data.len() {
            if data[i] != IAC {
                i += 1;
                continue;
            }
            if run_start < i {
                out.emit(Chunk::Bytes(data[run_start..i].to_vec()));
            }
            match Self::scan_sequence(&data[i..]) {
                Scan::Complete { consumed, literal } => {
                    if literal {
                        out.emit(Chunk::Bytes(vec![IAC]));
                    }
                    i += consumed;
                    run_start = i;
                }
                Scan::Incomplete => {
                    out.postpone(Chunk::Bytes(data[i..].to_vec()));
                    return;
                }
                Scan::Malformed { consumed } => {
                    i += consumed;
                    run_start = i;
                }
            }
        }
        if run_start < data.len() {
            out.emit(Chunk::Bytes(data[run_start..].to_vec()));
        }
    }

    fn reset(&mut self) {}

    fn format_outbound(&self, data: Vec<u8>) -> Vec<u8> {
        if !data.contains(&IAC) {
            return data;
        }
        let mut escaped = Vec::with_capacity(data.len() + 4);
        for byte in data {
            if byte == IAC {
                escaped.push(IAC);
            }
            escaped.push(byte);
        }
        escaped
    }
}
