//! Line-oriented text for the overlay.

use std::collections::HashMap;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::geometry::{GeometryBuilder, Quad, TextureSource};

/// Height of every glyph in pixels.
pub const GLYPH_HEIGHT: i32 = 8;

/// Horizontal gap after each glyph.
const GLYPH_SPACING: i32 = 1;

/// Glyph metrics and its layer in the font array texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub layer: u32,
    pub width: i32,
}

impl Glyph {
    /// Distance to the next glyph's origin.
    pub const fn advance(self) -> i32 {
        self.width + GLYPH_SPACING
    }
}

/// Bitmap font metrics. Building the glyph atlas itself happens elsewhere.
#[derive(Debug, Clone, Default)]
pub struct Font {
    glyphs: HashMap<char, Glyph>,
}

impl Font {
    pub fn new(glyphs: HashMap<char, Glyph>) -> Self {
        Self { glyphs }
    }

    /// Printable ASCII with every glyph `width` wide, one layer per character in code
    /// point order starting at the space.
    pub fn ascii(width: i32) -> Self {
        let glyphs = (b' '..=b'~')
            .map(|byte| {
                let glyph = Glyph {
                    layer: u32::from(byte - b' '),
                    width,
                };
                (char::from(byte), glyph)
            })
            .collect();
        Self { glyphs }
    }

    pub fn glyph(&self, character: char) -> Option<Glyph> {
        self.glyphs.get(&character).copied()
    }

    pub fn insert(&mut self, character: char, glyph: Glyph) {
        self.glyphs.insert(character, glyph);
    }

    /// Width of a rendered line. Characters without a glyph take no space.
    pub fn line_width(&self, line: &str) -> i32 {
        line.chars()
            .filter_map(|character| self.glyph(character))
            .map(Glyph::advance)
            .sum()
    }
}

/// One row of a [`TextList`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextRow {
    Line(String),
    /// Blank gap of the given height.
    Spacer(i32),
}

/// Vertical list of text lines. Each line takes `row_height`; spacers take their own height.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextList {
    row_height: i32,
    rows: Vec<TextRow>,
}

impl TextList {
    pub fn new(row_height: i32) -> Self {
        Self {
            row_height,
            rows: Vec::new(),
        }
    }

    pub fn add(&mut self, line: impl Into<String>) {
        self.rows.push(TextRow::Line(line.into()));
    }

    pub fn add_spacer(&mut self, height: i32) {
        self.rows.push(TextRow::Spacer(height));
    }

    pub fn rows(&self) -> &[TextRow] {
        &self.rows
    }

    /// Text of every line, skipping spacers.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().filter_map(|row| match row {
            TextRow::Line(line) => Some(line.as_str()),
            TextRow::Spacer(_) => None,
        })
    }

    pub fn row_height(&self) -> i32 {
        self.row_height
    }

    /// Widest line by `font` and the summed height of all rows.
    pub fn measure(&self, font: &Font) -> IVec2 {
        let width = self
            .lines()
            .map(|line| font.line_width(line))
            .max()
            .unwrap_or(0);
        let height = self
            .rows
            .iter()
            .map(|row| match row {
                TextRow::Line(_) => self.row_height,
                TextRow::Spacer(height) => *height,
            })
            .sum();
        IVec2::new(width, height)
    }

    pub(crate) fn emit(&self, origin: IVec2, font: &Font, out: &mut GeometryBuilder) {
        let mut y = origin.y;
        for row in &self.rows {
            match row {
                TextRow::Line(line) => {
                    emit_line(line, IVec2::new(origin.x, y), font, out);
                    y += self.row_height;
                }
                TextRow::Spacer(height) => y += height,
            }
        }
    }
}

fn emit_line(line: &str, origin: IVec2, font: &Font, out: &mut GeometryBuilder) {
    let mut x = origin.x;
    for character in line.chars() {
        let Some(glyph) = font.glyph(character) else {
            continue;
        };
        if !character.is_whitespace() {
            out.push(
                TextureSource::Font,
                Quad {
                    position: IVec2::new(x, origin.y),
                    size: IVec2::new(glyph.width, GLYPH_HEIGHT),
                    uv_origin: IVec2::ZERO,
                    uv_size: IVec2::new(glyph.width, GLYPH_HEIGHT),
                    layer: glyph.layer,
                    tint: Quad::WHITE,
                },
            );
        }
        x += glyph.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_the_widest_line() {
        let font = Font::ascii(5);
        let mut list = TextList::new(10);
        list.add("ab");
        list.add_spacer(6);
        list.add("abcd");

        assert_eq!(list.measure(&font), IVec2::new(24, 26));
    }

    #[test]
    fn unknown_characters_take_no_space() {
        let font = Font::ascii(5);
        assert_eq!(font.line_width("a\u{2603}b"), 12);
    }

    #[test]
    fn lines_advance_by_row_height_and_spacers() {
        let font = Font::ascii(5);
        let mut list = TextList::new(10);
        list.add("a");
        list.add_spacer(6);
        list.add("b c");

        let mut out = GeometryBuilder::new();
        list.emit(IVec2::new(4, 4), &font, &mut out);
        let batches = out.finish();

        assert_eq!(batches.len(), 1);
        let positions: Vec<_> = batches[0].quads.iter().map(|quad| quad.position).collect();
        // The space advances but draws nothing.
        assert_eq!(
            positions,
            [IVec2::new(4, 4), IVec2::new(4, 20), IVec2::new(16, 20)]
        );
        assert_eq!(batches[0].quads[2].layer, u32::from(b'c' - b' '));
    }
}
