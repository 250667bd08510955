//! Glyph tables.
//!
//! All tables are stored in the panel's native layout: each byte is one
//! column of 8 vertical pixels, least significant bit at the top.
//!
//! | table   | glyph cell | entry type  | lookup                              |
//! |---------|------------|-------------|-------------------------------------|
//! | `small` | 6×8        | `[u8; 6]`   | `code - b' '`                       |
//! | `large` | 8×16       | `[u8; 16]`  | `code - b' '`, top page then bottom |
//! | `wide`  | 16×16      | `[u8; 16]`  | rows `2n` (top) and `2n + 1`        |

mod ascii;

pub use ascii::{ASCII_6X8, ASCII_8X16};

/// Character size selector for the text and number routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontSize {
    /// 6×8 glyphs, one page tall.
    Small,
    /// 8×16 glyphs, two pages tall.
    Large,
}

impl FontSize {
    /// Map a glyph height in pixels to a size: 16 selects [`FontSize::Large`],
    /// anything else [`FontSize::Small`].
    pub const fn from_height(pixels: u8) -> Self {
        if pixels == 16 {
            FontSize::Large
        } else {
            FontSize::Small
        }
    }

    /// Glyph width in columns.
    pub const fn cell_width(self) -> u8 {
        match self {
            FontSize::Small => 6,
            FontSize::Large => 8,
        }
    }

    /// Glyph height in pages.
    pub const fn pages(self) -> u8 {
        match self {
            FontSize::Small => 1,
            FontSize::Large => 2,
        }
    }
}

/// The set of glyph tables a driver renders from.
///
/// Tables are plain `&'static` slices so alternate fonts can be swapped in
/// through [`OledConfig`](crate::OledConfig) without touching driver code.
#[derive(Clone, Copy)]
pub struct FontSet {
    /// 6×8 ASCII glyphs starting at `' '`.
    pub small: &'static [[u8; 6]],
    /// 8×16 ASCII glyphs starting at `' '`.
    pub large: &'static [[u8; 16]],
    /// 16×16 glyphs for a secondary script, two rows per glyph.
    pub wide: &'static [[u8; 16]],
}

impl FontSet {
    /// The bundled printable-ASCII tables with no wide glyphs.
    pub const fn ascii() -> Self {
        Self {
            small: &ASCII_6X8,
            large: &ASCII_8X16,
            wide: &[],
        }
    }

    /// Replace the wide-glyph table.
    ///
    /// `table` holds two 16-byte rows per glyph, top half first, as produced
    /// by common column-major font generators.
    pub const fn with_wide(self, table: &'static [[u8; 16]]) -> Self {
        Self { wide: table, ..self }
    }

    /// Number of complete glyphs in the wide table.
    pub const fn wide_len(&self) -> usize {
        self.wide.len() / 2
    }

    /// Column bytes for `code` in the 6×8 table.
    pub fn small_glyph(&self, code: u8) -> Option<&'static [u8; 6]> {
        self.small.get(usize::from(code.checked_sub(b' ')?))
    }

    /// Top and bottom page bytes for `code` in the 8×16 table.
    pub fn large_glyph(&self, code: u8) -> Option<(&'static [u8], &'static [u8])> {
        let glyph = self.large.get(usize::from(code.checked_sub(b' ')?))?;
        Some(glyph.split_at(8))
    }

    /// Top and bottom rows of wide glyph `index`.
    pub fn wide_glyph(&self, index: u8) -> Option<(&'static [u8; 16], &'static [u8; 16])> {
        let row = usize::from(index) * 2;
        Some((self.wide.get(row)?, self.wide.get(row + 1)?))
    }
}

impl Default for FontSet {
    fn default() -> Self {
        Self::ascii()
    }
}
