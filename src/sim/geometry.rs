//! Axis-aligned boxes and the one overlap test everything is built on
//!
//! World space is in pixels with the origin at the top-left corner and y
//! growing downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box (top-left position + size)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    /// Negative sizes are clamped to zero
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width.max(0.0), height.max(0.0)),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Box entirely left of the screen
    #[inline]
    pub fn is_off_left(&self) -> bool {
        self.right() < 0.0
    }

    /// The box adjusted by a hitbox tweak
    pub fn adjusted(&self, hitbox: Hitbox) -> Rect {
        Rect {
            pos: self.pos + Vec2::new(hitbox.offset_x, hitbox.offset_y),
            size: Vec2::new(self.size.x + hitbox.width_delta, self.size.y),
        }
    }
}

/// Per-call hitbox tweak applied to the first box of an overlap test
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hitbox {
    pub offset_x: f32,
    pub offset_y: f32,
    pub width_delta: f32,
}

impl Hitbox {
    /// Unmodified box
    pub const EXACT: Hitbox = Hitbox {
        offset_x: 0.0,
        offset_y: 0.0,
        width_delta: 0.0,
    };

    /// Widened symmetrically by `amount` (half on each side)
    pub fn widened(amount: f32) -> Self {
        Self {
            offset_x: -amount / 2.0,
            offset_y: 0.0,
            width_delta: amount,
        }
    }

    /// Narrowed symmetrically by `amount` (half from each side)
    pub fn inset(amount: f32) -> Self {
        Self {
            offset_x: amount / 2.0,
            offset_y: 0.0,
            width_delta: -amount,
        }
    }
}

/// Strict AABB overlap with `hitbox` applied to `a` only
///
/// Boxes that merely share an edge do not collide.
#[inline]
pub fn is_colliding(a: &Rect, b: &Rect, hitbox: Hitbox) -> bool {
    let ax = a.pos.x + hitbox.offset_x;
    let ay = a.pos.y + hitbox.offset_y;
    let aw = a.size.x + hitbox.width_delta;
    let ah = a.size.y;

    ax < b.right() && ax + aw > b.left() && ay < b.bottom() && ay + ah > b.top()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_and_separation() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(20.0, 0.0, 10.0, 10.0);
        assert!(is_colliding(&a, &b, Hitbox::EXACT));
        assert!(!is_colliding(&a, &c, Hitbox::EXACT));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!is_colliding(&a, &right, Hitbox::EXACT));
        assert!(!is_colliding(&a, &below, Hitbox::EXACT));
    }

    #[test]
    fn test_widened_hitbox_reaches_neighbour() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(14.0, 0.0, 10.0, 10.0);
        assert!(!is_colliding(&a, &b, Hitbox::EXACT));
        assert!(is_colliding(&a, &b, Hitbox::widened(20.0)));
    }

    #[test]
    fn test_inset_forgives_grazing_contact() {
        let a = Rect::new(0.0, 0.0, 30.0, 50.0);
        // Overlaps the outer 3px of `a` only
        let b = Rect::new(27.0, 10.0, 20.0, 20.0);
        assert!(is_colliding(&a, &b, Hitbox::EXACT));
        assert!(!is_colliding(&a, &b, Hitbox::inset(10.0)));
    }

    #[test]
    fn test_negative_size_clamped() {
        let r = Rect::new(0.0, 0.0, -5.0, 3.0);
        assert_eq!(r.width(), 0.0);
        assert_eq!(r.height(), 3.0);
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 0.0f32..200.0, ah in 0.0f32..200.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 0.0f32..200.0, bh in 0.0f32..200.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(
                is_colliding(&a, &b, Hitbox::EXACT),
                is_colliding(&b, &a, Hitbox::EXACT)
            );
        }

        #[test]
        fn adjacent_boxes_never_collide(
            x in -500.0f32..500.0, y in -500.0f32..500.0,
            w in 1.0f32..200.0, h in 1.0f32..200.0,
            w2 in 1.0f32..200.0,
        ) {
            let a = Rect::new(x, y, w, h);
            let b = Rect::new(a.right(), y, w2, h);
            prop_assert!(!is_colliding(&a, &b, Hitbox::EXACT));
        }
    }
}
