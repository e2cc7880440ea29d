//! Glyph atlas and text layout
//!
//! Printable ASCII is rasterized once with `fontdue` and packed row by row
//! into an RGBA atlas (white with coverage in alpha), so text goes through
//! the same textured pipeline as sprites.

use std::collections::HashMap;

use fontdue::Font;
use glam::Vec2;

use super::shapes::{self, UvRect};
use super::vertex::Vertex;
use crate::sim::Rect;

const FIRST_CHAR: u8 = b' ';
const LAST_CHAR: u8 = b'~';
const ATLAS_WIDTH: u32 = 256;
const PADDING: u32 = 1;

/// Placement of one rasterized glyph
#[derive(Debug, Clone, Copy)]
pub struct Glyph {
    pub uv: UvRect,
    /// Bitmap size in pixels
    pub size: Vec2,
    /// Offset from the pen position on the baseline to the bitmap's top-left
    pub offset: Vec2,
    pub advance: f32,
}

/// CPU-side glyph atlas
#[derive(Debug)]
pub struct GlyphAtlas {
    pub width: u32,
    pub height: u32,
    /// RGBA8 pixels
    pub pixels: Vec<u8>,
    glyphs: HashMap<char, Glyph>,
    /// Baseline distance from the top of a line
    ascent: f32,
    line_height: f32,
}

impl GlyphAtlas {
    /// Rasterize printable ASCII at `px` pixels
    pub fn from_font(font: &Font, px: f32) -> Self {
        let rasterized: Vec<(char, fontdue::Metrics, Vec<u8>)> = (FIRST_CHAR..=LAST_CHAR)
            .map(char::from)
            .map(|ch| {
                let (metrics, bitmap) = font.rasterize(ch, px);
                (ch, metrics, bitmap)
            })
            .collect();

        // Shelf packing: glyphs left to right, new row when the width runs out
        let mut placements = Vec::with_capacity(rasterized.len());
        let (mut x, mut y, mut row_height) = (PADDING, PADDING, 0u32);
        for (_, metrics, _) in &rasterized {
            let (w, h) = (metrics.width as u32, metrics.height as u32);
            if x + w + PADDING > ATLAS_WIDTH {
                x = PADDING;
                y += row_height + PADDING;
                row_height = 0;
            }
            placements.push((x, y));
            x += w + PADDING;
            row_height = row_height.max(h);
        }
        let height = (y + row_height + PADDING).next_power_of_two();

        let mut pixels = vec![0u8; (ATLAS_WIDTH * height * 4) as usize];
        let mut glyphs = HashMap::with_capacity(rasterized.len());
        for ((ch, metrics, bitmap), (gx, gy)) in rasterized.iter().zip(placements) {
            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let coverage = bitmap[row * metrics.width + col];
                    let dst = (((gy as usize + row) * ATLAS_WIDTH as usize) + gx as usize + col) * 4;
                    pixels[dst..dst + 4].copy_from_slice(&[255, 255, 255, coverage]);
                }
            }

            let (w, h) = (metrics.width as f32, metrics.height as f32);
            glyphs.insert(
                *ch,
                Glyph {
                    uv: UvRect {
                        min: [gx as f32 / ATLAS_WIDTH as f32, gy as f32 / height as f32],
                        max: [
                            (gx as f32 + w) / ATLAS_WIDTH as f32,
                            (gy as f32 + h) / height as f32,
                        ],
                    },
                    size: Vec2::new(w, h),
                    offset: Vec2::new(metrics.xmin as f32, -(metrics.ymin as f32 + h)),
                    advance: metrics.advance_width,
                },
            );
        }

        let (ascent, line_height) = font
            .horizontal_line_metrics(px)
            .map(|m| (m.ascent, m.new_line_size))
            .unwrap_or((px, px * 1.2));

        log::info!(
            "Glyph atlas built: {} glyphs at {}px, {}x{}",
            glyphs.len(),
            px,
            ATLAS_WIDTH,
            height
        );

        Self {
            width: ATLAS_WIDTH,
            height,
            pixels,
            glyphs,
            ascent,
            line_height,
        }
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Width of `text` in pixels (unknown characters advance like a space)
    pub fn measure(&self, text: &str) -> f32 {
        text.chars().map(|ch| self.glyph(ch).map_or(0.0, |g| g.advance)).sum()
    }

    fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch).or_else(|| self.glyphs.get(&' '))
    }

    /// Triangles for `text` with its line box's top-left at `top_left`
    pub fn layout(&self, text: &str, top_left: Vec2, color: [f32; 4]) -> Vec<Vertex> {
        let mut vertices = Vec::with_capacity(text.len() * 6);
        let mut pen = Vec2::new(top_left.x, top_left.y + self.ascent);

        for ch in text.chars() {
            let Some(glyph) = self.glyph(ch) else {
                continue;
            };
            if glyph.size.x > 0.0 && glyph.size.y > 0.0 {
                let origin = (pen + glyph.offset).round();
                let rect = Rect::new(origin.x, origin.y, glyph.size.x, glyph.size.y);
                vertices.extend_from_slice(&shapes::quad(rect, glyph.uv, color));
            }
            pen.x += glyph.advance;
        }
        vertices
    }

    /// Atlas with no glyphs; text lays out to nothing
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![0; 4],
            glyphs: HashMap::new(),
            ascent: 10.0,
            line_height: 14.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_atlas() -> GlyphAtlas {
        let mut atlas = GlyphAtlas::empty();
        let block = Glyph {
            uv: UvRect::FULL,
            size: Vec2::new(6.0, 8.0),
            offset: Vec2::new(0.0, -8.0),
            advance: 7.0,
        };
        atlas.glyphs.insert('A', block);
        atlas.glyphs.insert(
            ' ',
            Glyph {
                size: Vec2::ZERO,
                advance: 4.0,
                ..block
            },
        );
        atlas
    }

    #[test]
    fn test_measure() {
        let atlas = fake_atlas();
        assert_eq!(atlas.measure("AA"), 14.0);
        assert_eq!(atlas.measure("A A"), 18.0);
        // Unknown characters fall back to a space
        assert_eq!(atlas.measure("A?"), 11.0);
    }

    #[test]
    fn test_layout_skips_blank_glyphs() {
        let atlas = fake_atlas();
        let v = atlas.layout("A A", Vec2::new(100.0, 50.0), [1.0; 4]);
        assert_eq!(v.len(), 12);

        // First glyph sits on the baseline (top + ascent)
        let top = v[..6].iter().map(|v| v.position[1]).fold(f32::MAX, f32::min);
        let bottom = v[..6].iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert_eq!(top, 52.0);
        assert_eq!(bottom, 60.0);

        // Second glyph is advanced past the space
        let left = v[6..].iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        assert_eq!(left, 111.0);
    }

    #[test]
    fn test_empty_atlas_draws_nothing() {
        let atlas = GlyphAtlas::empty();
        assert!(atlas.layout("Score: 10", Vec2::ZERO, [1.0; 4]).is_empty());
        assert_eq!(atlas.measure("Score"), 0.0);
    }
}
