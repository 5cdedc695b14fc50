use crate::paint::Rgba;

use super::DrawCmd;

/// Recorded draw stream for one frame.
///
/// Commands are kept in issue order. `clear_to` models a full-target clear:
/// everything recorded before it can never be visible, so it is dropped and
/// the clear color becomes the frame background. The background keeps the
/// packed straight-alpha color: a clear is a plain store, never a blend.
#[derive(Debug)]
pub struct DrawList {
    background: Rgba,
    items: Vec<DrawCmd>,
}

impl Default for DrawList {
    fn default() -> Self {
        Self {
            background: Rgba::BLACK,
            items: Vec::new(),
        }
    }
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the whole target with `color`.
    pub fn clear_to(&mut self, color: Rgba) {
        self.items.clear();
        self.background = color;
    }

    /// Drops recorded commands after a frame was presented.
    ///
    /// The background persists: frames that never clear start from the last
    /// clear color.
    #[inline]
    pub fn reset(&mut self) {
        self.items.clear();
    }

    #[inline]
    pub fn background(&self) -> Rgba {
        self.background
    }

    /// Returns items in issue (= paint) order.
    #[inline]
    pub fn items(&self) -> &[DrawCmd] {
        &self.items
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.items.push(cmd);
    }
}
