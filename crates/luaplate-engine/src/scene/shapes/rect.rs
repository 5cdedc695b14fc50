use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// Solid rectangle draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub color: Color,
}

impl RectCmd {
    #[inline]
    pub fn new(rect: Rect, color: Color) -> Self {
        Self { rect, color }
    }
}

impl DrawList {
    /// Records a filled rectangle.
    #[inline]
    pub fn push_fill_rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawCmd::Rect(RectCmd::new(rect, color)));
    }

    /// Records a 1px outline drawn inside `rect`.
    pub fn push_stroke_rect(&mut self, rect: Rect, color: Color) {
        for edge in rect.outline() {
            self.push_fill_rect(edge, color);
        }
    }

    /// Records a single pixel.
    #[inline]
    pub fn push_point(&mut self, x: i32, y: i32, color: Color) {
        self.push_fill_rect(Rect::from_pixels(x, y, 1, 1), color);
    }
}
