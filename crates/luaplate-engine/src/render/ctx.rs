use crate::coords::Viewport;
use crate::device::{Gpu, GpuFrame};
use crate::paint::Rgba;

/// GPU handles a renderer needs for one frame.
///
/// `viewport` is the drawable size in physical pixels; canvas coordinates map
/// one-to-one onto it.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    pub viewport: Viewport,
}

impl<'a> RenderCtx<'a> {
    pub fn from_gpu(gpu: &'a Gpu<'_>) -> Self {
        Self {
            device: gpu.device(),
            queue: gpu.queue(),
            surface_format: gpu.surface_format(),
            viewport: gpu.viewport(),
        }
    }
}

/// The acquired frame's encoder and swapchain view.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    pub fn for_frame(frame: &'a mut GpuFrame) -> Self {
        Self {
            encoder: &mut frame.encoder,
            color_view: &frame.view,
        }
    }

    /// Records a pass that overwrites the whole view with `background`.
    ///
    /// The clear takes straight channels; only shader output is premultiplied.
    pub fn clear(&mut self, background: Rgba) {
        self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("luaplate clear"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(background.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
    }
}
