//! The xterm 256-color palette as literal data.
//!
//! Entries 0-15 are the standard and bright ANSI colors, 16-231 the
//! 6x6x6 color cube, and 232-255 the grayscale ramp. The values are
//! spelled out so lookups match legacy client output byte for byte.

use crate::color::Rgb;

/// Palette entry for an SGR `38;5;N` / `48;5;N` parameter.
#[must_use]
pub const fn lookup(index: u8) -> Rgb {
    XTERM_256[index as usize]
}

/// The full 256-entry palette.
pub const XTERM_256: [Rgb; 256] = [
    rgb(0x00, 0x00, 0x00), rgb(0x80, 0x00, 0x00), rgb(0x00, 0x80, 0x00), rgb(0x80, 0x80, 0x00), // 0-3
    rgb(0x00, 0x00, 0x80), rgb(0x80, 0x00, 0x80), rgb(0x00, 0x80, 0x80), rgb(0xc0, 0xc0, 0xc0), // 4-7
    rgb(0x80, 0x80, 0x80), rgb(0xff, 0x00, 0x00), rgb(0x00, 0xff, 0x00), rgb(0xff, 0xff, 0x00), // 8-11
    rgb(0x00, 0x00, 0xff), rgb(0xff, 0x00, 0xff), rgb(0x00, 0xff, 0xff), rgb(0xff, 0xff, 0xff), // 12-15
    rgb(0x00, 0x00, 0x00), rgb(0x00, 0x00, 0x5f), rgb(0x00, 0x00, 0x87), rgb(0x00, 0x00, 0xaf), // 16-19
    rgb(0x00, 0x00, 0xd7), rgb(0x00, 0x00, 0xff), rgb(0x00, 0x5f, 0x00), rgb(0x00, 0x5f, 0x5f), // 20-23
    rgb(0x00, 0x5f, 0x87), rgb(0x00, 0x5f, 0xaf), rgb(0x00, 0x5f, 0xd7), rgb(0x00, 0x5f, 0xff), // 24-27
    rgb(0x00, 0x87, 0x00), rgb(0x00, 0x87, 0x5f), rgb(0x00, 0x87, 0x87), rgb(0x00, 0x87, 0xaf), // 28-31
    rgb(0x00, 0x87, 0xd7), rgb(0x00, 0x87, 0xff), rgb(0x00, 0xaf, 0x00), rgb(0x00, 0xaf, 0x5f), // 32-35
    rgb(0x00, 0xaf, 0x87), rgb(0x00, 0xaf, 0xaf), rgb(0x00, 0xaf, 0xd7), rgb(0x00, 0xaf, 0xff), // 36-39
    rgb(0x00, 0xd7, 0x00), rgb(0x00, 0xd7, 0x5f), rgb(0x00, 0xd7, 0x87), rgb(0x00, 0xd7, 0xaf), // 40-43
    rgb(0x00, 0xd7, 0xd7), rgb(0x00, 0xd7, 0xff), rgb(0x00, 0xff, 0x00), rgb(0x00, 0xff, 0x5f), // 44-47
    rgb(0x00, 0xff, 0x87), rgb(0x00, 0xff, 0xaf), rgb(0x00, 0xff, 0xd7), rgb(0x00, 0xff, 0xff), // 48-51
    rgb(0x5f, 0x00, 0x00), rgb(0x5f, 0x00, 0x5f), rgb(0x5f, 0x00, 0x87), rgb(0x5f, 0x00, 0xaf), // 52-55
    rgb(0x5f, 0x00, 0xd7), rgb(0x5f, 0x00, 0xff), rgb(0x5f, 0x5f, 0x00), rgb(0x5f, 0x5f, 0x5f), // 56-59
    rgb(0x5f, 0x5f, 0x87), rgb(0x5f, 0x5f, 0xaf), rgb(0x5f, 0x5f, 0xd7), rgb(0x5f, 0x5f, 0xff), // 60-63
    rgb(0x5f, 0x87, 0x00), rgb(0x5f, 0x87, 0x5f), rgb(0x5f, 0x87, 0x87), rgb(0x5f, 0x87, 0xaf), // 64-67
    rgb(0x5f, 0x87, 0xd7), rgb(0x5f, 0x87, 0xff), rgb(0x5f, 0xaf, 0x00), rgb(0x5f, 0xaf, 0x5f), // 68-71
    rgb(0x5f, 0xaf, 0x87), rgb(0x5f, 0xaf, 0xaf), rgb(0x5f, 0xaf, 0xd7), rgb(0x5f, 0xaf, 0xff), // 72-75
    rgb(0x5f, 0xd7, 0x00), rgb(0x5f, 0xd7, 0x5f), rgb(0x5f, 0xd7, 0x87), rgb(0x5f, 0xd7, 0xaf), // 76-79
    rgb(0x5f, 0xd7, 0xd7), rgb(0x5f, 0xd7, 0xff), rgb(0x5f, 0xff, 0x00), rgb(0x5f, 0xff, 0x5f), // 80-83
    rgb(0x5f, 0xff, 0x87), rgb(0x5f, 0xff, 0xaf), rgb(0x5f, 0xff, 0xd7), rgb(0x5f, 0xff, 0xff), // 84-87
    rgb(0x87, 0x00, 0x00), rgb(0x87, 0x00, 0x5f), rgb(0x87, 0x00, 0x87), rgb(0x87, 0x00, 0xaf), // 88-91
    rgb(0x87, 0x00, 0xd7), rgb(0x87, 0x00, 0xff), rgb(0x87, 0x5f, 0x00), rgb(0x87, 0x5f, 0x5f), // 92-95
    rgb(0x87, 0x5f, 0x87), rgb(0x87, 0x5f, 0xaf), rgb(0x87, 0x5f, 0xd7), rgb(0x87, 0x5f, 0xff), // 96-99
    rgb(0x87, 0x87, 0x00), rgb(0x87, 0x87, 0x5f), rgb(0x87, 0x87, 0x87), rgb(0x87, 0x87, 0xaf), // 100-103
    rgb(0x87, 0x87, 0xd7), rgb(0x87, 0x87, 0xff), rgb(0x87, 0xaf, 0x00), rgb(0x87, 0xaf, 0x5f), // 104-107
    rgb(0x87, 0xaf, 0x87), rgb(0x87, 0xaf, 0xaf), rgb(0x87, 0xaf, 0xd7), rgb(0x87, 0xaf, 0xff), // 108-111
    rgb(0x87, 0xd7, 0x00), rgb(0x87, 0xd7, 0x5f), rgb(0x87, 0xd7, 0x87), rgb(0x87, 0xd7, 0xaf), // 112-115
    rgb(0x87, 0xd7, 0xd7), rgb(0x87, 0xd7, 0xff), rgb(0x87, 0xff, 0x00), rgb(0x87, 0xff, 0x5f), // 116-119
    rgb(0x87, 0xff, 0x87), rgb(0x87, 0xff, 0xaf), rgb(0x87, 0xff, 0xd7), rgb(0x87, 0xff, 0xff), // 120-123
    rgb(0xaf, 0x00, 0x00), rgb(0xaf, 0x00, 0x5f), rgb(0xaf, 0x00, 0x87), rgb(0xaf, 0x00, 0xaf), // 124-127
    rgb(0xaf, 0x00, 0xd7), rgb(0xaf, 0x00, 0xff), rgb(0xaf, 0x5f, 0x00), rgb(0xaf, 0x5f, 0x5f), // 128-131
    rgb(0xaf, 0x5f, 0x87), rgb(0xaf, 0x5f, 0xaf), rgb(0xaf, 0x5f, 0xd7), rgb(0xaf, 0x5f, 0xff), // 132-135
    rgb(0xaf, 0x87, 0x00), rgb(0xaf, 0x87, 0x5f), rgb(0xaf, 0x87, 0x87), rgb(0xaf, 0x87, 0xaf), // 136-139
    rgb(0xaf, 0x87, 0xd7), rgb(0xaf, 0x87, 0xff), rgb(0xaf, 0xaf, 0x00), rgb(0xaf, 0xaf, 0x5f), // 140-143
    rgb(0xaf, 0xaf, 0x87), rgb(0xaf, 0xaf, 0xaf), rgb(0xaf, 0xaf, 0xd7), rgb(0xaf, 0xaf, 0xff), // 144-147
    rgb(0xaf, 0xd7, 0x00), rgb(0xaf, 0xd7, 0x5f), rgb(0xaf, 0xd7, 0x87), rgb(0xaf, 0xd7, 0xaf), // 148-151
    rgb(0xaf, 0xd7, 0xd7), rgb(0xaf, 0xd7, 0xff), rgb(0xaf, 0xff, 0x00), rgb(0xaf, 0xff, 0x5f), // 152-155
    rgb(0xaf, 0xff, 0x87), rgb(0xaf, 0xff, 0xaf), rgb(0xaf, 0xff, 0xd7), rgb(0xaf, 0xff, 0xff), // 156-159
    rgb(0xd7, 0x00, 0x00), rgb(0xd7, 0x00, 0x5f), rgb(0xd7, 0x00, 0x87), rgb(0xd7, 0x00, 0xaf), // 160-163
    rgb(0xd7, 0x00, 0xd7), rgb(0xd7, 0x00, 0xff), rgb(0xd7, 0x5f, 0x00), rgb(0xd7, 0x5f, 0x5f), // 164-167
    rgb(0xd7, 0x5f, 0x87), rgb(0xd7, 0x5f, 0xaf), rgb(0xd7, 0x5f, 0xd7), rgb(0xd7, 0x5f, 0xff), // 168-171
    rgb(0xd7, 0x87, 0x00), rgb(0xd7, 0x87, 0x5f), rgb(0xd7, 0x87, 0x87), rgb(0xd7, 0x87, 0xaf), // 172-175
    rgb(0xd7, 0x87, 0xd7), rgb(0xd7, 0x87, 0xff), rgb(0xd7, 0xaf, 0x00), rgb(0xd7, 0xaf, 0x5f), // 176-179
    rgb(0xd7, 0xaf, 0x87), rgb(0xd7, 0xaf, 0xaf), rgb(0xd7, 0xaf, 0xd7), rgb(0xd7, 0xaf, 0xff), // 180-183
    rgb(0xd7, 0xd7, 0x00), rgb(0xd7, 0xd7, 0x5f), rgb(0xd7, 0xd7, 0x87), rgb(0xd7, 0xd7, 0xaf), // 184-187
    rgb(0xd7, 0xd7, 0xd7), rgb(0xd7, 0xd7, 0xff), rgb(0xd7, 0xff, 0x00), rgb(0xd7, 0xff, 0x5f), // 188-191
    rgb(0xd7, 0xff, 0x87), rgb(0xd7, 0xff, 0xaf), rgb(0xd7, 0xff, 0xd7), rgb(0xd7, 0xff, 0xff), // 192-195
    rgb(0xff, 0x00, 0x00), rgb(0xff, 0x00, 0x5f), rgb(0xff, 0x00, 0x87), rgb(0xff, 0x00, 0xaf), // 196-199
    rgb(0xff, 0x00, 0xd7), rgb(0xff, 0x00, 0xff), rgb(0xff, 0x5f, 0x00), rgb(0xff, 0x5f, 0x5f), // 200-203
    rgb(0xff, 0x5f, 0x87), rgb(0xff, 0x5f, 0xaf), rgb(0xff, 0x5f, 0xd7), rgb(0xff, 0x5f, 0xff), // 204-207
    rgb(0xff, 0x87, 0x00), rgb(0xff, 0x87, 0x5f), rgb(0xff, 0x87, 0x87), rgb(0xff, 0x87, 0xaf), // 208-211
    rgb(0xff, 0x87, 0xd7), rgb(0xff, 0x87, 0xff), rgb(0xff, 0xaf, 0x00), rgb(0xff, 0xaf, 0x5f), // 212-215
    rgb(0xff, 0xaf, 0x87), rgb(0xff, 0xaf, 0xaf), rgb(0xff, 0xaf, 0xd7), rgb(0xff, 0xaf, 0xff), // 216-219
    rgb(0xff, 0xd7, 0x00), rgb(0xff, 0xd7, 0x5f), rgb(0xff, 0xd7, 0x87), rgb(0xff, 0xd7, 0xaf), // 220-223
    rgb(0xff, 0xd7, 0xd7), rgb(0xff, 0xd7, 0xff), rgb(0xff, 0xff, 0x00), rgb(0xff, 0xff, 0x5f), // 224-227
    rgb(0xff, 0xff, 0x87), rgb(0xff, 0xff, 0xaf), rgb(0xff, 0xff, 0xd7), rgb(0xff, 0xff, 0xff), // 228-231
    rgb(0x08, 0x08, 0x08), rgb(0x12, 0x12, 0x12), rgb(0x1c, 0x1c, 0x1c), rgb(0x26, 0x26, 0x26), // 232-235
    rgb(0x30, 0x30, 0x30), rgb(0x3a, 0x3a, 0x3a), rgb(0x44, 0x44, 0x44), rgb(0x4e, 0x4e, 0x4e), // 236-239
    rgb(0x58, 0x58, 0x58), rgb(0x62, 0x62, 0x62), rgb(0x6c, 0x6c, 0x6c), rgb(0x76, 0x76, 0x76), // 240-243
    rgb(0x80, 0x80, 0x80), rgb(0x8a, 0x8a, 0x8a), rgb(0x94, 0x94, 0x94), rgb(0x9e, 0x9e, 0x9e), // 244-247
    rgb(0xa8, 0xa8, 0xa8), rgb(0xb2, 0xb2, 0xb2), rgb(0xbc, 0xbc, 0xbc), rgb(0xc6, 0xc6, 0xc6), // 248-251
    rgb(0xd0, 0xd0, 0xd0), rgb(0xda, 0xda, 0xda), rgb(0xe4, 0xe4, 0xe4), rgb(0xee, 0xee, 0xee), // 252-255
];

const fn rgb(r: u8, g: u8, b: u8) -> Rgb {
    Rgb::new(r, g, b)
}
