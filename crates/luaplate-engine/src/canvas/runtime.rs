use std::thread;
use std::time::Duration;

use winit::dpi::PhysicalSize;
use winit::event_loop::EventLoop;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::Window;

use crate::coords::Rect;
use crate::device::{Gpu, SurfaceErrorAction};
use crate::paint::{Color, Rgba};
use crate::render::shapes::quad::QuadRenderer;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::DrawList;
use crate::surface::{Control, Surface};

use super::platform::{Platform, WindowAttrs};
use super::CanvasConfig;

/// Startup pumps allowed for the platform to deliver `resumed`.
const STARTUP_PUMPS: usize = 8;

/// One window with a GPU renderer, drawn by recording commands and presenting
/// them on [`render`](Surface::render).
///
/// A canvas whose window or GPU could not be initialized stays usable but
/// inert: color and size state work, nothing is shown and `poll_event`
/// always returns [`Control::Stop`].
pub struct Canvas {
    // GPU resources go before the window entry that owns the device.
    renderer: QuadRenderer,
    draw_list: DrawList,
    platform: Platform,
    event_loop: Option<EventLoop<()>>,

    color: Rgba,
    size: (u32, u32),
    frame_delay: Duration,
}

impl Canvas {
    /// Creates the event loop, window and GPU context.
    ///
    /// Failures are logged and leave an inert canvas.
    pub fn new(config: CanvasConfig) -> Self {
        let event_loop = match EventLoop::new() {
            Ok(event_loop) => Some(event_loop),
            Err(e) => {
                log::error!("failed to create winit EventLoop: {e}");
                None
            }
        };
        let mut canvas = Self::with_event_loop(config, event_loop);
        canvas.start();
        canvas
    }

    fn with_event_loop(config: CanvasConfig, event_loop: Option<EventLoop<()>>) -> Self {
        let CanvasConfig {
            title,
            width,
            height,
            color,
            frame_delay,
            gpu,
        } = config;

        let mut platform = Platform::new(WindowAttrs {
            title,
            width,
            height,
            gpu,
        });
        if event_loop.is_none() {
            platform.shut_down();
        }

        Self {
            renderer: QuadRenderer::new(),
            draw_list: DrawList::new(),
            platform,
            event_loop,
            color,
            size: (width, height),
            frame_delay,
        }
    }

    fn start(&mut self) {
        let Some(event_loop) = self.event_loop.as_mut() else { return };

        for _ in 0..STARTUP_PUMPS {
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(Duration::ZERO), &mut self.platform)
            {
                log::error!("event loop exited during startup (code {code})");
                self.platform.shut_down();
                return;
            }
            if !self.platform.is_pending() {
                return;
            }
        }

        log::error!("platform did not resume the application; canvas is inert");
        self.platform.shut_down();
    }

    /// Releases the window and GPU context. Idempotent.
    pub fn close(&mut self) {
        self.renderer = QuadRenderer::new();
        self.draw_list.reset();
        self.platform.shut_down();
    }

    #[inline]
    fn current_color(&self) -> Color {
        self.color.into()
    }
}

impl Surface for Canvas {
    #[inline]
    fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    #[inline]
    fn color(&self) -> Rgba {
        self.color
    }

    fn set_title(&mut self, title: &str) {
        if let Some(entry) = self.platform.entry_mut() {
            entry.with_window(|w| w.set_title(title));
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        if width == 0 || height == 0 {
            log::debug!("ignoring window resize to {width}x{height}");
            return;
        }

        if let Some(entry) = self.platform.entry_mut() {
            entry.with_mut(|fields| {
                // `Some` means the platform applied the size synchronously.
                if let Some(size) = fields.window.request_inner_size(PhysicalSize::new(width, height)) {
                    fields.gpu.resize(size);
                }
            });
        }
    }

    #[inline]
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn fill(&mut self) {
        self.draw_list.clear_to(self.color);
    }

    fn draw_point(&mut self, x: i32, y: i32) {
        let color = self.current_color();
        self.draw_list.push_point(x, y, color);
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let color = self.current_color();
        self.draw_list.push_line(x1, y1, x2, y2, color);
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let color = self.current_color();
        self.draw_list.push_stroke_rect(Rect::from_pixels(x, y, w, h), color);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let color = self.current_color();
        self.draw_list.push_fill_rect(Rect::from_pixels(x, y, w, h), color);
    }

    fn poll_event(&mut self) -> Control {
        if !self.platform.is_live() {
            return Control::Stop;
        }
        let Some(event_loop) = self.event_loop.as_mut() else {
            return Control::Stop;
        };

        self.platform.input.clear();
        if let PumpStatus::Exit(code) =
            event_loop.pump_app_events(Some(Duration::ZERO), &mut self.platform)
        {
            log::debug!("event loop exited (code {code})");
            return Control::Stop;
        }

        if self.platform.input.stop_requested() {
            Control::Stop
        } else {
            Control::Continue
        }
    }

    fn render(&mut self) {
        let (renderer, draw_list) = (&mut self.renderer, &self.draw_list);
        let fatal = self.platform.entry_mut().is_some_and(|entry| {
            entry.with_mut(|fields| present(fields.window, fields.gpu, renderer, draw_list))
                == Some(SurfaceErrorAction::Fatal)
        });
        if fatal {
            log::error!("surface lost beyond recovery; closing canvas");
            self.close();
        }

        self.draw_list.reset();
        thread::sleep(self.frame_delay);
    }
}

impl Drop for Canvas {
    fn drop(&mut self) {
        self.close();
    }
}

/// Draws one frame: a clear pass with the list background, then the commands.
///
/// Returns the error action when no frame could be acquired.
fn present(
    window: &Window,
    gpu: &mut Gpu<'_>,
    renderer: &mut QuadRenderer,
    draw_list: &DrawList,
) -> Option<SurfaceErrorAction> {
    let mut frame = match gpu.begin_frame() {
        Ok(frame) => frame,
        Err(err) => {
            log::debug!("failed to acquire frame: {err}");
            return Some(gpu.handle_surface_error(err));
        }
    };

    // RenderTarget borrows the frame; dropped before submit() takes it.
    {
        let rctx = RenderCtx::from_gpu(gpu);
        let mut target = RenderTarget::for_frame(&mut frame);
        target.clear(draw_list.background());
        renderer.render(&rctx, &mut target, draw_list);
    }

    window.pre_present_notify();
    gpu.submit(frame);
    None
}
