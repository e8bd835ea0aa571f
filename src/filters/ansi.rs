//! ANSI SGR parsing with highlight-bold color semantics.
//!
//! Recognizes `ESC [` and the single-byte CSI 0x9B, parameters as
//! `;`-separated decimals, and acts on the `m` (SGR) final byte. Other CSI
//! sequences are consumed and ignored without disturbing surrounding bytes.
//!
//! The filter tracks a `highlighted` flag and the active foreground
//! (dim, bright) pair: SGR 1 turns highlighting on and re-emits the bright
//! member of the pair, SGR 30-37 selects a new pair and emits the member
//! matching the current highlight state. `38;5;N` and `48;5;N` index the
//! literal 256-entry palette.

use crate::chunk::{Chunk, ChunkMask};
use crate::color::{ANSI_PAIRS, ColorPair};
use crate::filter::{Filter, FilterOutput};
use crate::format::{FormatDelta, FormatProperty, FormatValue};
use crate::palette;

const ESC: u8 = 0x1B;
const CSI_8BIT: u8 = 0x9B;

enum Scan {
    /// Full CSI sequence: parameter slice bounds and the final byte.
    Complete {
        consumed: usize,
        params_end: usize,
        final_byte: u8,
    },
    /// Tail could still grow into a sequence; postpone it.
    Incomplete,
    /// Not a sequence we track; skip the introducer.
    Malformed { consumed: usize },
}

/// One `;`-separated SGR field after lexing.
#[derive(Clone, Copy)]
enum SgrField {
    /// Empty field, an implicit 0 (reset).
    Empty,
    Num(u16),
    /// Digits that do not fit a parameter number; skipped entirely.
    Junk,
}

/// Filter translating SGR sequences in `Bytes` chunks into `Ansi` chunks.
#[derive(Debug, Default)]
pub struct AnsiFilter {
    highlighted: bool,
    foreground: Option<ColorPair>,
}

impl AnsiFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify the sequence starting at an ESC or 0x9B byte.
    fn scan_sequence(data: &[u8]) -> Scan {
        let params_start = if data[0] == CSI_8BIT {
            1
        } else {
            match data.get(1) {
                None => return Scan::Incomplete,
                Some(&b'[') => 2,
                // ESC not introducing a CSI: swallow the ESC alone.
                Some(_) => return Scan::Malformed { consumed: 1 },
            }
        };

        let mut i = params_start;
        while let Some(&byte) = data.get(i) {
            match byte {
                b'0'..=b'9' | b';' => i += 1,
                0x40..=0x7E => {
                    return Scan::Complete {
                        consumed: i + 1,
                        params_end: i,
                        final_byte: byte,
                    };
                }
                // Junk inside the parameter list: drop the introducer and
                // let the rest through as data.
                _ => {
                    return Scan::Malformed {
                        consumed: params_start,
                    };
                }
            }
        }
        Scan::Incomplete
    }

    /// Interpret one SGR parameter list, emitting `Ansi` chunks.
    fn apply_sgr(&mut self, params: &[u8], out: &mut FilterOutput) {
        let fields: Vec<SgrField> = params
            .split(|&b| b == b';')
            .map(|field| {
                if field.is_empty() {
                    return SgrField::Empty;
                }
                match std::str::from_utf8(field).ok().and_then(|s| s.parse().ok()) {
                    Some(n) => SgrField::Num(n),
                    None => SgrField::Junk,
                }
            })
            .collect();

        let mut delta = FormatDelta::new();
        let mut i = 0;
        while i < fields.len() {
            let param = match fields[i] {
                SgrField::Empty => 0,
                SgrField::Num(n) => n,
                SgrField::Junk => {
                    i += 1;
                    continue;
                }
            };
            match param {
                0 => {
                    if !delta.is_empty() {
                        out.emit(Chunk::Ansi(std::mem::take(&mut delta)));
                    }
                    out.emit(Chunk::Ansi(FormatDelta::new()));
                    self.highlighted = false;
                    self.foreground = None;
                }
                1 => {
                    self.highlighted = true;
                    delta.set(FormatProperty::Bold, FormatValue::Flag(true));
                    if let Some(pair) = self.foreground {
                        delta.set(FormatProperty::Color, FormatValue::Color(pair.bright));
                    }
                }
                3 => delta.set(FormatProperty::Italic, FormatValue::Flag(true)),
                4 => delta.set(FormatProperty::Underline, FormatValue::Flag(true)),
                5 => delta.set(FormatProperty::Blink, FormatValue::Flag(true)),
                7 => delta.set(FormatProperty::Reversed, FormatValue::Flag(true)),
                22 => {
                    self.highlighted = false;
                    delta.set(FormatProperty::Bold, FormatValue::Flag(false));
                    if let Some(pair) = self.foreground {
                        delta.set(FormatProperty::Color, FormatValue::Color(pair.dim));
                    }
                }
                23 => delta.set(FormatProperty::Italic, FormatValue::Flag(false)),
                24 => delta.set(FormatProperty::Underline, FormatValue::Flag(false)),
                30..=37 => {
                    let pair = ANSI_PAIRS[(param - 30) as usize];
                    self.foreground = Some(pair);
                    delta.set(
                        FormatProperty::Color,
                        FormatValue::Color(pair.select(self.highlighted)),
                    );
                }
                38 | 48 => {
                    // Extended color: expect `5;N`. Anything else aborts the
                    // remainder of the sequence.
                    let (Some(&SgrField::Num(5)), Some(&SgrField::Num(index))) =
                        (fields.get(i + 1), fields.get(i + 2))
                    else {
                        break;
                    };
                    if index > 255 {
                        break;
                    }
                    let color = palette::lookup(index as u8);
                    if param == 38 {
                        self.foreground = Some(ColorPair {
                            dim: color,
                            bright: color,
                        });
                        delta.set(FormatProperty::Color, FormatValue::Color(color));
                    } else {
                        delta.set(FormatProperty::Background, FormatValue::Color(color));
                    }
                    i += 2;
                }
                39 => {
                    self.foreground = None;
                    delta.unset(FormatProperty::Color);
                }
                40..=47 => {
                    let pair = ANSI_PAIRS[(param - 40) as usize];
                    delta.set(FormatProperty::Background, FormatValue::Color(pair.dim));
                }
                49 => delta.unset(FormatProperty::Background),
                // Unknown parameter: ignore it, keep the rest.
                _ => {}
            }
            i += 1;
        }
        if !delta.is_empty() {
            out.emit(Chunk::Ansi(delta));
        }
    }
}

impl Filter for AnsiFilter {
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
            if data[i] != ESC && data[i] != CSI_8BIT {
                i += 1;
                continue;
            }
            if run_start < i {
                out.emit(Chunk::Bytes(data[run_start..i].to_vec()));
            }
            match Self::scan_sequence(&data[i..]) {
                Scan::Complete {
                    consumed,
                    params_end,
                    final_byte,
                } => {
                    if final_byte == b'm' {
                        let offset = params_offset(&data[i..]);
                        self.apply_sgr(&data[i + offset..i + params_end], out);
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

    fn reset(&mut self) {
        self.highlighted = false;
        self.foreground = None;
    }
}

/// Offset of the parameter list within a sequence slice starting at the
/// introducer (1 for 0x9B, 2 for `ESC [`).
fn params_offset(seq: &[u8]) -> usize {
    if seq[0] == CSI_8BIT { 1 } else { 2 }
}
