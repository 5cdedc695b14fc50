use crate::paint::Rgba;

/// Outcome of polling the window for input.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Control {
    Continue,
    Stop,
}

/// Drawing surface driven by a script.
///
/// Drawing calls record one command each in the current color and never
/// present; [`render`](Self::render) presents everything recorded since the
/// previous frame. Coordinates are pixels with a top-left origin.
pub trait Surface {
    /// Sets the draw color used by subsequent drawing calls.
    fn set_color(&mut self, color: Rgba);

    fn color(&self) -> Rgba;

    fn set_title(&mut self, title: &str);

    /// Requests a new window size; [`size`](Self::size) reports it immediately.
    fn resize(&mut self, width: u32, height: u32);

    fn size(&self) -> (u32, u32);

    /// Clears the whole surface with the current color, alpha written as is.
    fn fill(&mut self);

    fn draw_point(&mut self, x: i32, y: i32);

    /// 1px line, both end pixels included.
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32);

    /// 1px outline inside the rectangle.
    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32);

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32);

    /// Drains pending window events.
    fn poll_event(&mut self) -> Control;

    /// Presents the frame and waits out the frame delay.
    fn render(&mut self);
}
