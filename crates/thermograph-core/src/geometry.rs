// File: crates/thermograph-core/src/geometry.rs
// Summary: Plot rectangle math shared by the renderer and pixel hit-testing.

use crate::types::Insets;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectI32 {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectI32 {
    pub const fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Area left over after removing `insets` from a `width` x `height` surface.
    /// Collapses to a 1px rect instead of going negative on tiny surfaces.
    pub fn inset(width: i32, height: i32, insets: &Insets) -> Self {
        let left = insets.left as i32;
        let top = insets.top as i32;
        let right = (width - insets.right as i32).max(left + 1);
        let bottom = (height - insets.bottom as i32).max(top + 1);
        Self { left, top, right, bottom }
    }

    pub const fn width(&self) -> i32 { self.right - self.left }
    pub const fn height(&self) -> i32 { self.bottom - self.top }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inset_never_inverts() {
        let r = RectI32::inset(10, 10, &Insets::new(64, 16, 16, 40));
        assert!(r.width() >= 1);
        assert!(r.height() >= 1);
    }

    #[test]
    fn inset_default_surface() {
        let r = RectI32::inset(800, 400, &Insets::default());
        assert_eq!(r, RectI32::from_ltrb(64, 16, 784, 360));
    }
}
