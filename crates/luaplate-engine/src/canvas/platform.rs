use anyhow::{Context, Result};
use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::InputFrame;

#[self_referencing(pub_extras)]
pub(crate) struct WindowEntry {
    pub(super) window: Window,

    #[borrows(window)]
    #[covariant]
    pub(super) gpu: Gpu<'this>,
}

/// Window lifecycle as seen by the canvas.
pub(super) enum WindowState {
    /// Waiting for the platform to resume the application.
    Pending,
    Live(WindowEntry),
    /// Initialization failed or the canvas was closed; never recreated.
    Gone,
}

/// Attributes of the window to create on resume.
pub(super) struct WindowAttrs {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub gpu: GpuInit,
}

/// `winit` application handler driven by `pump_app_events`.
pub(super) struct Platform {
    attrs: WindowAttrs,
    pub state: WindowState,
    pub input: InputFrame,
}

impl Platform {
    pub fn new(attrs: WindowAttrs) -> Self {
        Self {
            attrs,
            state: WindowState::Pending,
            input: InputFrame::default(),
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self.state, WindowState::Pending)
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        matches!(self.state, WindowState::Live(_))
    }

    #[inline]
    pub fn entry_mut(&mut self) -> Option<&mut WindowEntry> {
        match &mut self.state {
            WindowState::Live(entry) => Some(entry),
            _ => None,
        }
    }

    /// Drops the window and its GPU context.
    pub fn shut_down(&mut self) {
        if self.is_live() {
            log::debug!("closing canvas window");
        }
        self.state = WindowState::Gone;
    }

    fn create_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let window_attrs = Window::default_attributes()
            .with_title(self.attrs.title.clone())
            .with_inner_size(PhysicalSize::new(self.attrs.width, self.attrs.height))
            .with_resizable(false);

        let window = event_loop
            .create_window(window_attrs)
            .context("failed to create window")?;

        let gpu_init = self.attrs.gpu.clone();
        WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("failed to initialize GPU for window")
    }
}

impl ApplicationHandler for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !self.is_pending() {
            return;
        }

        self.state = match self.create_entry(event_loop) {
            Ok(entry) => {
                log::debug!("canvas window created");
                WindowState::Live(entry)
            }
            Err(e) => {
                log::error!("canvas initialization failed: {e:#}");
                WindowState::Gone
            }
        };
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let (WindowEvent::Resized(size), Some(entry)) = (&event, self.entry_mut()) {
            let size = *size;
            entry.with_gpu_mut(|gpu| gpu.resize(size));
        }

        if let Some(ev) = translate_window_event(&event) {
            log::trace!("input event: {ev:?}");
            self.input.push_event(ev);
        }
    }
}
