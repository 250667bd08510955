//! Bundled printable-ASCII fonts (`' '..='~'`, 95 glyphs each).

/// 6×8 glyphs. Column 0 is blank spacing.
#[rustfmt::skip]
pub static ASCII_6X8: [[u8; 6]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x00, 0x2F, 0x00, 0x00], // !
    [0x00, 0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x00, 0x14, 0x7F, 0x14, 0x7F, 0x14], // #
    [0x00, 0x24, 0x2A, 0x7F, 0x2A, 0x12], // $
    [0x00, 0x62, 0x64, 0x08, 0x13, 0x23], // %
    [0x00, 0x36, 0x49, 0x55, 0x22, 0x50], // &
    [0x00, 0x00, 0x05, 0x03, 0x00, 0x00], // '
    [0x00, 0x00, 0x1C, 0x22, 0x41, 0x00], // (
    [0x00, 0x00, 0x41, 0x22, 0x1C, 0x00], // )
    [0x00, 0x14, 0x08, 0x3E, 0x08, 0x14], // *
    [0x00, 0x08, 0x08, 0x3E, 0x08, 0x08], // +
    [0x00, 0x00, 0x00, 0xA0, 0x60, 0x00], // ,
    [0x00, 0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x00, 0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x00, 0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x00, 0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x00, 0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x00, 0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x00, 0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x00, 0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x00, 0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x00, 0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x00, 0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x00, 0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x00, 0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x00, 0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x00, 0x32, 0x49, 0x59, 0x51, 0x3E], // @
    [0x00, 0x7C, 0x12, 0x11, 0x12, 0x7C], // A
    [0x00, 0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x00, 0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x00, 0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x00, 0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x00, 0x7F, 0x09, 0x09, 0x09, 0x01], // F
    [0x00, 0x3E, 0x41, 0x49, 0x49, 0x7A], // G
    [0x00, 0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x00, 0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x00, 0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x00, 0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x00, 0x7F, 0x02, 0x0C, 0x02, 0x7F], // M
    [0x00, 0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x00, 0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x00, 0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x00, 0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x00, 0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x00, 0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x00, 0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x00, 0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x00, 0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x00, 0x3F, 0x40, 0x38, 0x40, 0x3F], // W
    [0x00, 0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x00, 0x07, 0x08, 0x70, 0x08, 0x07], // Y
    [0x00, 0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x00, 0x7F, 0x41, 0x41, 0x00], // [
    [0x00, 0x02, 0x04, 0x08, 0x10, 0x20], // \
    [0x00, 0x00, 0x41, 0x41, 0x7F, 0x00], // ]
    [0x00, 0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x00, 0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x00, 0x01, 0x02, 0x04, 0x00], // `
    [0x00, 0x20, 0x54, 0x54, 0x54, 0x78], // a
    [0x00, 0x7F, 0x48, 0x44, 0x44, 0x38], // b
    [0x00, 0x38, 0x44, 0x44, 0x44, 0x20], // c
    [0x00, 0x38, 0x44, 0x44, 0x48, 0x7F], // d
    [0x00, 0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x00, 0x08, 0x7E, 0x09, 0x01, 0x02], // f
    [0x00, 0x18, 0xA4, 0xA4, 0xA4, 0x7C], // g
    [0x00, 0x7F, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x00, 0x44, 0x7D, 0x40, 0x00], // i
    [0x00, 0x40, 0x80, 0x84, 0x7D, 0x00], // j
    [0x00, 0x7F, 0x10, 0x28, 0x44, 0x00], // k
    [0x00, 0x00, 0x41, 0x7F, 0x40, 0x00], // l
    [0x00, 0x7C, 0x04, 0x18, 0x04, 0x78], // m
    [0x00, 0x7C, 0x08, 0x04, 0x04, 0x78], // n
    [0x00, 0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0x00, 0xFC, 0x24, 0x24, 0x24, 0x18], // p
    [0x00, 0x18, 0x24, 0x24, 0x18, 0xFC], // q
    [0x00, 0x7C, 0x08, 0x04, 0x04, 0x08], // r
    [0x00, 0x48, 0x54, 0x54, 0x54, 0x20], // s
    [0x00, 0x04, 0x3F, 0x44, 0x40, 0x20], // t
    [0x00, 0x3C, 0x40, 0x40, 0x20, 0x7C], // u
    [0x00, 0x1C, 0x20, 0x40, 0x20, 0x1C], // v
    [0x00, 0x3C, 0x40, 0x30, 0x40, 0x3C], // w
    [0x00, 0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x00, 0x1C, 0xA0, 0xA0, 0xA0, 0x7C], // y
    [0x00, 0x44, 0x64, 0x54, 0x4C, 0x44], // z
    [0x00, 0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x00, 0x7F, 0x00, 0x00], // |
    [0x00, 0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x00, 0x08, 0x04, 0x08, 0x10, 0x08], // ~
];

/// 8×16 glyphs: bytes 0–7 are the top page, 8–15 the bottom page.
#[rustfmt::skip]
pub static ASCII_8X16: [[u8; 16]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x00, 0xF8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x33, 0x30, 0x00, 0x00, 0x00], // !
    [0x00, 0x10, 0x0C, 0x06, 0x10, 0x0C, 0x06, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // "
    [0x40, 0xC0, 0x78, 0x40, 0xC0, 0x78, 0x40, 0x00, 0x04, 0x3F, 0x04, 0x04, 0x3F, 0x04, 0x04, 0x00], // #
    [0x00, 0x70, 0x88, 0xFC, 0x08, 0x30, 0x00, 0x00, 0x00, 0x18, 0x20, 0xFF, 0x21, 0x1E, 0x00, 0x00], // $
    [0xF0, 0x08, 0xF0, 0x00, 0xE0, 0x18, 0x00, 0x00, 0x00, 0x21, 0x1C, 0x03, 0x1E, 0x21, 0x1E, 0x00], // %
    [0x00, 0xF0, 0x08, 0x88, 0x70, 0x00, 0x00, 0x00, 0x1E, 0x21, 0x23, 0x24, 0x19, 0x27, 0x21, 0x10], // &
    [0x10, 0x16, 0x0E, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // '
    [0x00, 0x00, 0x00, 0xE0, 0x18, 0x04, 0x02, 0x00, 0x00, 0x00, 0x00, 0x07, 0x18, 0x20, 0x40, 0x00], // (
    [0x00, 0x02, 0x04, 0x18, 0xE0, 0x00, 0x00, 0x00, 0x00, 0x40, 0x20, 0x18, 0x07, 0x00, 0x00, 0x00], // )
    [0x40, 0x40, 0x80, 0xF0, 0x80, 0x40, 0x40, 0x00, 0x02, 0x02, 0x01, 0x0F, 0x01, 0x02, 0x02, 0x00], // *
    [0x00, 0x00, 0x00, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x01, 0x01, 0x01, 0x1F, 0x01, 0x01, 0x01, 0x00], // +
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80, 0xB0, 0x70, 0x00, 0x00, 0x00, 0x00, 0x00], // ,
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01], // -
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x30, 0x30, 0x00, 0x00, 0x00, 0x00, 0x00], // .
    [0x00, 0x00, 0x00, 0x00, 0x80, 0x60, 0x18, 0x04, 0x00, 0x60, 0x18, 0x06, 0x01, 0x00, 0x00, 0x00], // /
    [0x00, 0xE0, 0x10, 0x08, 0x08, 0x10, 0xE0, 0x00, 0x00, 0x0F, 0x10, 0x20, 0x20, 0x10, 0x0F, 0x00], // 0
    [0x00, 0x10, 0x10, 0xF8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x20, 0x20, 0x3F, 0x20, 0x20, 0x00, 0x00], // 1
    [0x00, 0x70, 0x08, 0x08, 0x08, 0x88, 0x70, 0x00, 0x00, 0x30, 0x28, 0x24, 0x22, 0x21, 0x30, 0x00], // 2
    [0x00, 0x30, 0x08, 0x88, 0x88, 0x48, 0x30, 0x00, 0x00, 0x18, 0x20, 0x20, 0x20, 0x11, 0x0E, 0x00], // 3
    [0x00, 0x00, 0xC0, 0x20, 0x10, 0xF8, 0x00, 0x00, 0x00, 0x07, 0x04, 0x24, 0x24, 0x3F, 0x24, 0x00], // 4
    [0x00, 0xF8, 0x08, 0x88, 0x88, 0x08, 0x08, 0x00, 0x00, 0x19, 0x21, 0x20, 0x20, 0x11, 0x0E, 0x00], // 5
    [0x00, 0xE0, 0x10, 0x88, 0x88, 0x18, 0x00, 0x00, 0x00, 0x0F, 0x11, 0x20, 0x20, 0x11, 0x0E, 0x00], // 6
    [0x00, 0x38, 0x08, 0x08, 0xC8, 0x38, 0x08, 0x00, 0x00, 0x00, 0x00, 0x3F, 0x00, 0x00, 0x00, 0x00], // 7
    [0x00, 0x70, 0x88, 0x08, 0x08, 0x88, 0x70, 0x00, 0x00, 0x1C, 0x22, 0x21, 0x21, 0x22, 0x1C, 0x00], // 8
    [0x00, 0xE0, 0x10, 0x08, 0x08, 0x10, 0xE0, 0x00, 0x00, 0x00, 0x31, 0x22, 0x22, 0x11, 0x0F, 0x00], // 9
    [0x00, 0x00, 0x00, 0xC0, 0xC0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x30, 0x30, 0x00, 0x00, 0x00], // :
    [0x00, 0x00, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80, 0x60, 0x00, 0x00, 0x00, 0x00], // ;
    [0x00, 0x00, 0x80, 0x40, 0x20, 0x10, 0x08, 0x00, 0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x00], // <
    [0x40, 0x40, 0x40, 0x40, 0x40, 0x40, 0x40, 0x00, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04, 0x00], // =
    [0x00, 0x08, 0x10, 0x20, 0x40, 0x80, 0x00, 0x00, 0x00, 0x20, 0x10, 0x08, 0x04, 0x02, 0x01, 0x00], // >
    [0x00, 0x70, 0x48, 0x08, 0x08, 0x08, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x30, 0x36, 0x01, 0x00, 0x00], // ?
    [0xC0, 0x30, 0xC8, 0x28, 0xE8, 0x10, 0xE0, 0x00, 0x07, 0x18, 0x27, 0x24, 0x23, 0x14, 0x0B, 0x00], // @
    [0x00, 0x00, 0xC0, 0x38, 0xE0, 0x00, 0x00, 0x00, 0x20, 0x3C, 0x23, 0x02, 0x02, 0x27, 0x38, 0x20], // A
    [0x08, 0xF8, 0x88, 0x88, 0x88, 0x70, 0x00, 0x00, 0x20, 0x3F, 0x20, 0x20, 0x20, 0x11, 0x0E, 0x00], // B
    [0xC0, 0x30, 0x08, 0x08, 0x08, 0x08, 0x38, 0x00, 0x07, 0x18, 0x20, 0x20, 0x20, 0x10, 0x08, 0x00], // C
    [0x08, 0xF8, 0x08, 0x08, 0x08, 0x10, 0xE0, 0x00, 0x20, 0x3F, 0x20, 0x20, 0x20, 0x10, 0x0F, 0x00], // D
    [0x08, 0xF8, 0x88, 0x88, 0xE8, 0x08, 0x10, 0x00, 0x20, 0x3F, 0x20, 0x20, 0x23, 0x20, 0x18, 0x00], // E
    [0x08, 0xF8, 0x88, 0x88, 0xE8, 0x08, 0x10, 0x00, 0x20, 0x3F, 0x20, 0x00, 0x03, 0x00, 0x00, 0x00], // F
    [0xC0, 0x30, 0x08, 0x08, 0x08, 0x38, 0x00, 0x00, 0x07, 0x18, 0x20, 0x20, 0x22, 0x1E, 0x02, 0x00], // G
    [0x08, 0xF8, 0x08, 0x00, 0x00, 0x08, 0xF8, 0x08, 0x20, 0x3F, 0x21, 0x01, 0x01, 0x21, 0x3F, 0x20], // H
    [0x00, 0x08, 0x08, 0xF8, 0x08, 0x08, 0x00, 0x00, 0x00, 0x20, 0x20, 0x3F, 0x20, 0x20, 0x00, 0x00], // I
    [0x00, 0x00, 0x08, 0x08, 0xF8, 0x08, 0x08, 0x00, 0xC0, 0x80, 0x80, 0x80, 0x7F, 0x00, 0x00, 0x00], // J
    [0x08, 0xF8, 0x88, 0xC0, 0x28, 0x18, 0x08, 0x00, 0x20, 0x3F, 0x20, 0x01, 0x26, 0x38, 0x20, 0x00], // K
    [0x08, 0xF8, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x20, 0x3F, 0x20, 0x20, 0x20, 0x20, 0x30, 0x00], // L
    [0x08, 0xF8, 0xF8, 0x00, 0xF8, 0xF8, 0x08, 0x00, 0x20, 0x3F, 0x00, 0x3F, 0x00, 0x3F, 0x20, 0x00], // M
    [0x08, 0xF8, 0x30, 0xC0, 0x00, 0x08, 0xF8, 0x08, 0x20, 0x3F, 0x20, 0x00, 0x07, 0x18, 0x3F, 0x00], // N
    [0xE0, 0x10, 0x08, 0x08, 0x08, 0x10, 0xE0, 0x00, 0x0F, 0x10, 0x20, 0x20, 0x20, 0x10, 0x0F, 0x00], // O
    [0x08, 0xF8, 0x08, 0x08, 0x08, 0x08, 0xF0, 0x00, 0x20, 0x3F, 0x21, 0x01, 0x01, 0x01, 0x00, 0x00], // P
    [0xE0, 0x10, 0x08, 0x08, 0x08, 0x10, 0xE0, 0x00, 0x0F, 0x18, 0x24, 0x24, 0x38, 0x50, 0x4F, 0x00], // Q
    [0x08, 0xF8, 0x88, 0x88, 0x88, 0x88, 0x70, 0x00, 0x20, 0x3F, 0x20, 0x00, 0x03, 0x0C, 0x30, 0x20], // R
    [0x00, 0x70, 0x88, 0x08, 0x08, 0x08, 0x38, 0x00, 0x00, 0x38, 0x20, 0x21, 0x21, 0x22, 0x1C, 0x00], // S
    [0x18, 0x08, 0x08, 0xF8, 0x08, 0x08, 0x18, 0x00, 0x00, 0x00, 0x20, 0x3F, 0x20, 0x00, 0x00, 0x00], // T
    [0x08, 0xF8, 0x08, 0x00, 0x00, 0x08, 0xF8, 0x08, 0x00, 0x1F, 0x20, 0x20, 0x20, 0x20, 0x1F, 0x00], // U
    [0x08, 0x78, 0x88, 0x00, 0x00, 0xC8, 0x38, 0x08, 0x00, 0x00, 0x07, 0x38, 0x0E, 0x01, 0x00, 0x00], // V
    [0xF8, 0x08, 0x00, 0xF8, 0x00, 0x08, 0xF8, 0x00, 0x03, 0x3C, 0x07, 0x00, 0x07, 0x3C, 0x03, 0x00], // W
    [0x08, 0x18, 0x68, 0x80, 0x80, 0x68, 0x18, 0x08, 0x20, 0x30, 0x2C, 0x03, 0x03, 0x2C, 0x30, 0x20], // X
    [0x08, 0x38, 0xC8, 0x00, 0xC8, 0x38, 0x08, 0x00, 0x00, 0x00, 0x20, 0x3F, 0x20, 0x00, 0x00, 0x00], // Y
    [0x10, 0x08, 0x08, 0x08, 0xC8, 0x38, 0x08, 0x00, 0x20, 0x38, 0x26, 0x21, 0x20, 0x20, 0x18, 0x00], // Z
    [0x00, 0x00, 0x00, 0xFE, 0x02, 0x02, 0x02, 0x00, 0x00, 0x00, 0x00, 0x7F, 0x40, 0x40, 0x40, 0x00], // [
    [0x00, 0x0C, 0x30, 0xC0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x06, 0x38, 0xC0, 0x00], // \
    [0x00, 0x02, 0x02, 0x02, 0xFE, 0x00, 0x00, 0x00, 0x00, 0x40, 0x40, 0x40, 0x7F, 0x00, 0x00, 0x00], // ]
    [0x00, 0x00, 0x04, 0x02, 0x02, 0x02, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // ^
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80], // _
    [0x00, 0x02, 0x02, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // `
    [0x00, 0x00, 0x80, 0x80, 0x80, 0x80, 0x00, 0x00, 0x00, 0x19, 0x24, 0x22, 0x22, 0x22, 0x3F, 0x20], // a
    [0x08, 0xF8, 0x00, 0x80, 0x80, 0x00, 0x00, 0x00, 0x00, 0x3F, 0x11, 0x20, 0x20, 0x11, 0x0E, 0x00], // b
    [0x00, 0x00, 0x00, 0x80, 0x80, 0x80, 0x00, 0x00, 0x00, 0x0E, 0x11, 0x20, 0x20, 0x20, 0x11, 0x00], // c
    [0x00, 0x00, 0x00, 0x80, 0x80, 0x88, 0xF8, 0x00, 0x00, 0x0E, 0x11, 0x20, 0x20, 0x10, 0x3F, 0x20], // d
    [0x00, 0x00, 0x80, 0x80, 0x80, 0x80, 0x00, 0x00, 0x00, 0x1F, 0x22, 0x22, 0x22, 0x22, 0x13, 0x00], // e
    [0x00, 0x80, 0x80, 0xF0, 0x88, 0x88, 0x88, 0x18, 0x00, 0x20, 0x20, 0x3F, 0x20, 0x20, 0x00, 0x00], // f
    [0x00, 0x00, 0x80, 0x80, 0x80, 0x80, 0x80, 0x00, 0x00, 0x6B, 0x94, 0x94, 0x94, 0x93, 0x60, 0x00], // g
    [0x08, 0xF8, 0x00, 0x80, 0x80, 0x80, 0x00, 0x00, 0x20, 0x3F, 0x21, 0x00, 0x00, 0x20, 0x3F, 0x20], // h
    [0x00, 0x80, 0x98, 0x98, 0x00, 0x00, 0x00, 0x00, 0x00, 0x20, 0x20, 0x3F, 0x20, 0x20, 0x00, 0x00], // i
    [0x00, 0x00, 0x00, 0x80, 0x98, 0x98, 0x00, 0x00, 0x00, 0xC0, 0x80, 0x80, 0x80, 0x7F, 0x00, 0x00], // j
    [0x08, 0xF8, 0x00, 0x00, 0x80, 0x80, 0x80, 0x00, 0x20, 0x3F, 0x24, 0x02, 0x2D, 0x30, 0x20, 0x00], // k
    [0x00, 0x08, 0x08, 0xF8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x20, 0x20, 0x3F, 0x20, 0x20, 0x00, 0x00], // l
    [0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x00, 0x20, 0x3F, 0x20, 0x00, 0x3F, 0x20, 0x00, 0x3F], // m
    [0x80, 0x80, 0x00, 0x80, 0x80, 0x80, 0x00, 0x00, 0x20, 0x3F, 0x21, 0x00, 0x00, 0x20, 0x3F, 0x20], // n
    [0x00, 0x00, 0x80, 0x80, 0x80, 0x80, 0x00, 0x00, 0x00, 0x1F, 0x20, 0x20, 0x20, 0x20, 0x1F, 0x00], // o
    [0x80, 0x80, 0x00, 0x80, 0x80, 0x00, 0x00, 0x00, 0x80, 0xFF, 0xA1, 0x20, 0x20, 0x11, 0x0E, 0x00], // p
    [0x00, 0x00, 0x00, 0x80, 0x80, 0x80, 0x80, 0x00, 0x00, 0x0E, 0x11, 0x20, 0x20, 0xA0, 0xFF, 0x80], // q
    [0x80, 0x80, 0x80, 0x00, 0x80, 0x80, 0x80, 0x00, 0x20, 0x20, 0x3F, 0x21, 0x20, 0x00, 0x01, 0x00], // r
    [0x00, 0x00, 0x80, 0x80, 0x80, 0x80, 0x80, 0x00, 0x00, 0x33, 0x24, 0x24, 0x24, 0x24, 0x19, 0x00], // s
    [0x00, 0x80, 0x80, 0xE0, 0x80, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F, 0x20, 0x20, 0x00, 0x00], // t
    [0x80, 0x80, 0x00, 0x00, 0x00, 0x80, 0x80, 0x00, 0x00, 0x1F, 0x20, 0x20, 0x20, 0x10, 0x3F, 0x20], // u
    [0x80, 0x80, 0x80, 0x00, 0x00, 0x80, 0x80, 0x80, 0x00, 0x01, 0x0E, 0x30, 0x08, 0x06, 0x01, 0x00], // v
    [0x80, 0x80, 0x00, 0x80, 0x00, 0x80, 0x80, 0x80, 0x0F, 0x30, 0x0C, 0x03, 0x0C, 0x30, 0x0F, 0x00], // w
    [0x00, 0x80, 0x80, 0x00, 0x80, 0x80, 0x80, 0x00, 0x00, 0x20, 0x31, 0x2E, 0x0E, 0x31, 0x20, 0x00], // x
    [0x80, 0x80, 0x80, 0x00, 0x00, 0x80, 0x80, 0x80, 0x80, 0x81, 0x8E, 0x70, 0x18, 0x06, 0x01, 0x00], // y
    [0x00, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x00, 0x00, 0x21, 0x30, 0x2C, 0x22, 0x21, 0x30, 0x00], // z
    [0x00, 0x00, 0x00, 0x00, 0x80, 0x7C, 0x02, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x3F, 0x40, 0x40], // {
    [0x00, 0x00, 0x00, 0x00, 0xFF, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0x00, 0x00, 0x00], // |
    [0x00, 0x02, 0x02, 0x7C, 0x80, 0x00, 0x00, 0x00, 0x00, 0x40, 0x40, 0x3F, 0x00, 0x00, 0x00, 0x00], // }
    [0x00, 0x06, 0x01, 0x01, 0x02, 0x02, 0x04, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // ~
];
