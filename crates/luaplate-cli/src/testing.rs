//! Recording `Surface` for frame loop and binding tests.

use luaplate_engine::{Control, Rgba, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    SetTitle(String),
    Resize(u32, u32),
    Fill(Rgba),
    Point(i32, i32, Rgba),
    Line(i32, i32, i32, i32, Rgba),
    Rect(i32, i32, i32, i32, Rgba),
    FillRect(i32, i32, i32, i32, Rgba),
    Poll,
    Render,
}

pub struct RecordingSurface {
    pub ops: Vec<Op>,
    color: Rgba,
    size: (u32, u32),
    /// Poll number (1-based) that reports `Stop`.
    stop_at: usize,
    polls: usize,
}

impl RecordingSurface {
    pub fn stopping_after(polls: usize) -> Self {
        Self {
            ops: Vec::new(),
            color: Rgba::WHITE,
            size: (640, 480),
            stop_at: polls,
            polls: 0,
        }
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::stopping_after(usize::MAX)
    }
}

impl Surface for RecordingSurface {
    fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    fn color(&self) -> Rgba {
        self.color
    }

    fn set_title(&mut self, title: &str) {
        self.ops.push(Op::SetTitle(title.to_string()));
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.ops.push(Op::Resize(width, height));
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn fill(&mut self) {
        self.ops.push(Op::Fill(self.color));
    }

    fn draw_point(&mut self, x: i32, y: i32) {
        self.ops.push(Op::Point(x, y, self.color));
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.ops.push(Op::Line(x1, y1, x2, y2, self.color));
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.ops.push(Op::Rect(x, y, w, h, self.color));
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.ops.push(Op::FillRect(x, y, w, h, self.color));
    }

    fn poll_event(&mut self) -> Control {
        self.ops.push(Op::Poll);
        self.polls += 1;
        if self.polls >= self.stop_at {
            Control::Stop
        } else {
            Control::Continue
        }
    }

    fn render(&mut self) {
        self.ops.push(Op::Render);
    }
}
