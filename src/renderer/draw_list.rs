//! Immediate-mode draw list
//!
//! Scene code pushes textured triangles here in painter's order. Consecutive
//! draws that share a texture are merged into one batch, so the GPU side
//! issues one draw call per texture change.

use std::ops::Range;

use glam::Vec2;

use super::shapes::{self, UvRect};
use super::vertex::{Vertex, colors};
use crate::sim::{PLANET_TEXTURE_COUNT, Rect, WEAPON_COUNT, WeaponKind};

/// Handle of a texture registered with the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

/// Fixed texture slots. The renderer registers textures in this order.
pub mod tex {
    use super::*;

    /// 1×1 white texel for flat-colored shapes
    pub const WHITE: TextureId = TextureId(0);
    /// Glyph atlas
    pub const FONT: TextureId = TextureId(1);
    pub const BACKGROUND: [TextureId; 2] = [TextureId(2), TextureId(3)];
    pub const PLAYER: TextureId = TextureId(4);
    pub const ENEMY: TextureId = TextureId(5);
    pub const POWERUP: TextureId = TextureId(6);
    const WEAPON_BASE: usize = 7;
    const PLANET_BASE: usize = WEAPON_BASE + WEAPON_COUNT;
    /// Total number of slots
    pub const COUNT: usize = PLANET_BASE + PLANET_TEXTURE_COUNT;

    pub fn weapon(kind: WeaponKind) -> TextureId {
        TextureId(WEAPON_BASE + kind.index())
    }

    /// Planet texture, wrapping out-of-range indices
    pub fn planet(index: usize) -> TextureId {
        TextureId(PLANET_BASE + index % PLANET_TEXTURE_COUNT)
    }
}

/// A run of vertices drawn with one texture
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub texture: TextureId,
    pub vertices: Range<u32>,
}

/// Vertices plus the texture batches that cover them
#[derive(Debug, Default)]
pub struct DrawList {
    pub vertices: Vec<Vertex>,
    pub batches: Vec<Batch>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Append triangles drawn with `texture`
    pub fn push(&mut self, texture: TextureId, vertices: &[Vertex]) {
        if vertices.is_empty() {
            return;
        }

        let start = self.vertices.len() as u32;
        self.vertices.extend_from_slice(vertices);
        let end = self.vertices.len() as u32;

        match self.batches.last_mut() {
            Some(last) if last.texture == texture && last.vertices.end == start => {
                last.vertices.end = end;
            }
            _ => self.batches.push(Batch {
                texture,
                vertices: start..end,
            }),
        }
    }

    /// Whole texture stretched over `rect`
    pub fn sprite(&mut self, texture: TextureId, rect: Rect, color: [f32; 4]) {
        self.push(texture, &shapes::quad(rect, UvRect::FULL, color));
    }

    /// Whole texture centered on `center`, rotated by `angle_deg`
    pub fn sprite_rotated(
        &mut self,
        texture: TextureId,
        center: Vec2,
        size: Vec2,
        angle_deg: f32,
        color: [f32; 4],
    ) {
        let verts = shapes::rotated_quad(center, size.x, size.y, angle_deg, UvRect::FULL, color);
        self.push(texture, &verts);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: [f32; 4]) {
        self.push(tex::WHITE, &shapes::quad(rect, UvRect::SOLID, color));
    }

    /// Flat rectangle shaded from `left` to `right`
    pub fn gradient_rect(&mut self, rect: Rect, left: [f32; 4], right: [f32; 4]) {
        self.push(tex::WHITE, &shapes::gradient_quad(rect, left, right));
    }

    pub fn outline_rect(&mut self, rect: Rect, thickness: f32, color: [f32; 4]) {
        self.push(tex::WHITE, &shapes::rect_outline(rect, thickness, color));
    }

    pub fn ring(&mut self, center: Vec2, inner: f32, outer: f32, color: [f32; 4]) {
        self.push(tex::WHITE, &shapes::ring(center, inner, outer, color, 48));
    }

    /// Dim the whole screen
    pub fn overlay(&mut self, width: f32, height: f32) {
        self.fill_rect(Rect::new(0.0, 0.0, width, height), colors::OVERLAY);
    }

    /// Number of batches drawn with `texture`
    #[cfg(test)]
    pub fn batches_with(&self, texture: TextureId) -> usize {
        self.batches.iter().filter(|b| b.texture == texture).count()
    }

    /// Number of vertices drawn with `texture`
    #[cfg(test)]
    pub fn vertices_with(&self, texture: TextureId) -> usize {
        self.batches
            .iter()
            .filter(|b| b.texture == texture)
            .map(|b| b.vertices.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_texture_merges() {
        let mut list = DrawList::new();
        list.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), colors::WHITE);
        list.fill_rect(Rect::new(2.0, 0.0, 1.0, 1.0), colors::WHITE);
        assert_eq!(list.batches.len(), 1);
        assert_eq!(list.batches[0].vertices, 0..12);
    }

    #[test]
    fn test_texture_change_splits() {
        let mut list = DrawList::new();
        list.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), colors::WHITE);
        list.sprite(tex::PLAYER, Rect::new(0.0, 0.0, 48.0, 48.0), colors::WHITE);
        list.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), colors::WHITE);
        assert_eq!(list.batches.len(), 3);
        assert_eq!(list.batches_with(tex::WHITE), 2);
        assert_eq!(list.vertices_with(tex::PLAYER), 6);
    }

    #[test]
    fn test_empty_push_is_ignored() {
        let mut list = DrawList::new();
        list.push(tex::ENEMY, &[]);
        assert!(list.is_empty());
        assert!(list.batches.is_empty());
    }

    #[test]
    fn test_texture_slots_are_distinct() {
        let mut ids: Vec<usize> = vec![
            tex::WHITE.0,
            tex::FONT.0,
            tex::BACKGROUND[0].0,
            tex::BACKGROUND[1].0,
            tex::PLAYER.0,
            tex::ENEMY.0,
            tex::POWERUP.0,
        ];
        ids.extend(WeaponKind::ALL.iter().map(|k| tex::weapon(*k).0));
        ids.extend((0..PLANET_TEXTURE_COUNT).map(|i| tex::planet(i).0));
        let count = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), count);
        assert_eq!(count, tex::COUNT);
        assert_eq!(*ids.last().unwrap(), tex::COUNT - 1);
    }
}
