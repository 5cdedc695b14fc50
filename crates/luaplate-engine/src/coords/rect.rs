use super::Vec2;

/// Axis-aligned rectangle in pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Rectangle from integer pixel coordinates, as scripts pass them.
    #[inline]
    pub fn from_pixels(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self::new(x as f32, y as f32, w as f32, h as f32)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut x = self.origin.x;
        let mut y = self.origin.y;
        let mut w = self.size.x;
        let mut h = self.size.y;

        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }

        Rect::new(x, y, w, h)
    }

    /// The four 1px edges of the rectangle, inside its bounds.
    ///
    /// Thin rectangles collapse to fewer, non-overlapping edges so translucent
    /// outlines never paint a pixel twice.
    pub fn outline(self) -> Vec<Rect> {
        let r = self.normalized();
        if r.is_empty() {
            return Vec::new();
        }
        if r.size.x <= 2.0 || r.size.y <= 2.0 {
            return vec![r];
        }

        let Vec2 { x, y } = r.origin;
        let Vec2 { x: w, y: h } = r.size;
        vec![
            Rect::new(x, y, w, 1.0),
            Rect::new(x, y + h - 1.0, w, 1.0),
            Rect::new(x, y + 1.0, 1.0, h - 2.0),
            Rect::new(x + w - 1.0, y + 1.0, 1.0, h - 2.0),
        ]
    }
}
