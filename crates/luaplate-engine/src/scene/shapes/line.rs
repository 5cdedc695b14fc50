use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// 1px line between two pixel positions, both end pixels included.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCmd {
    pub from: Vec2,
    pub to: Vec2,
    pub color: Color,
}

impl LineCmd {
    #[inline]
    pub fn new(from: Vec2, to: Vec2, color: Color) -> Self {
        Self { from, to, color }
    }

    /// Center line of the stroked quad covering the line's pixels, in pixels.
    ///
    /// Endpoints move to pixel centers and extend by half a pixel so both end
    /// pixels are covered.
    pub fn segment(&self) -> (Vec2, Vec2) {
        let half = Vec2::new(0.5, 0.5);
        let a = self.from + half;
        let b = self.to + half;

        let d = b - a;
        let ext = d / d.length() * 0.5;
        (a - ext, b + ext)
    }
}

impl DrawList {
    /// Records a line. A zero-length line is recorded as a point.
    pub fn push_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        if x1 == x2 && y1 == y2 {
            self.push_point(x1, y1, color);
            return;
        }
        let from = Vec2::new(x1 as f32, y1 as f32);
        let to = Vec2::new(x2 as f32, y2 as f32);
        self.push(DrawCmd::Line(LineCmd::new(from, to, color)));
    }
}
