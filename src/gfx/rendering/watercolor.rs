//! Watercolor post-processing pass
//!
//! Renders the scene into an offscreen color target, then composites it to
//! the surface through a fullscreen pass that warps and tints the image with
//! a paper texture. The paper texture is the only asset the demo loads; when
//! it is missing or undecodable the pass simply is not created and the scene
//! renders directly to the surface.

use std::path::Path;

use thiserror::Error;

use crate::gfx::resources::texture_resource::TextureResource;
use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
    uniform_buffer::UniformBuffer,
};

#[derive(Debug, Error)]
pub enum WatercolorError {
    #[error("failed to read paper texture: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode paper texture: {0}")]
    Decode(#[from] image::ImageError),
}

/// Tunables mirrored into the shader each frame
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WatercolorSettings {
    /// UV wobble amplitude driven by paper grain
    pub scale: f32,
    /// Paper luminance above which fibers lighten the wash
    pub threshold: f32,
    /// Edge darkening factor for pigment pooling
    pub darkening: f32,
    /// Pigment density exponent
    pub pigment: f32,
}

impl Default for WatercolorSettings {
    fn default() -> Self {
        Self {
            scale: 0.025,
            threshold: 0.6,
            darkening: 2.0,
            pigment: 1.3,
        }
    }
}

/// Decodes the paper texture from disk into RGBA pixels.
///
/// Split out from GPU upload so the failure path is testable without a
/// device.
pub fn load_paper_image(path: &Path) -> Result<image::RgbaImage, WatercolorError> {
    let bytes = std::fs::read(path)?;
    let decoded = image::load_from_memory(&bytes)?;
    Ok(decoded.to_rgba8())
}

pub struct WatercolorPass {
    scene_texture: wgpu::Texture,
    scene_view: wgpu::TextureView,
    scene_sampler: wgpu::Sampler,
    paper: TextureResource,
    settings_ubo: UniformBuffer<WatercolorSettings>,
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: wgpu::BindGroup,
    pipeline: wgpu::RenderPipeline,
}

impl WatercolorPass {
    /// Creates the pass, loading the paper texture from `paper_path`.
    ///
    /// Fails only on the texture load; every other step is infallible
    /// construction.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        paper_path: &Path,
    ) -> Result<Self, WatercolorError> {
        let paper_image = load_paper_image(paper_path)?;
        let paper = TextureResource::from_rgba_pixels(
            device,
            queue,
            &paper_image,
            paper_image.width(),
            paper_image.height(),
            "Paper Texture",
        );

        let (scene_texture, scene_view) = create_scene_target(device, format, width, height);

        let scene_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Watercolor Scene Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let settings_ubo = UniformBuffer::with_content(
            device,
            "Watercolor Settings",
            &WatercolorSettings::default(),
        );

        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::color_texture())
            .next_binding_fragment(binding_types::filtering_sampler())
            .next_binding_fragment(binding_types::color_texture())
            .next_binding_fragment(binding_types::filtering_sampler())
            .next_binding_fragment(binding_types::uniform_buffer())
            .create(device, "Watercolor Bind Group");

        let bind_group = create_bind_group(
            device,
            &bind_group_layout,
            &scene_view,
            &scene_sampler,
            &paper,
            &settings_ubo,
        );

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("watercolor"),
            source: wgpu::ShaderSource::Wgsl(include_str!("watercolor.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Watercolor Layout"),
            bind_group_layouts: &[&bind_group_layout.layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("WATERCOLOR"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Ok(Self {
            scene_texture,
            scene_view,
            scene_sampler,
            paper,
            settings_ubo,
            bind_group_layout,
            bind_group,
            pipeline,
        })
    }

    /// The offscreen view the main pass should render into
    pub fn scene_view(&self) -> &wgpu::TextureView {
        &self.scene_view
    }

    /// Recreates the offscreen target after a window resize
    pub fn resize(&mut self, device: &wgpu::Device, format: wgpu::TextureFormat, width: u32, height: u32) {
        let (texture, view) = create_scene_target(device, format, width, height);
        self.scene_texture = texture;
        self.scene_view = view;
        self.bind_group = create_bind_group(
            device,
            &self.bind_group_layout,
            &self.scene_view,
            &self.scene_sampler,
            &self.paper,
            &self.settings_ubo,
        );
    }

    /// Updates the shader tunables
    pub fn set_settings(&self, queue: &wgpu::Queue, settings: WatercolorSettings) {
        self.settings_ubo.update_content(queue, settings);
    }

    /// Composites the offscreen scene onto `target`
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Watercolor Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}

fn create_scene_target(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Watercolor Scene Target"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}

fn create_bind_group(
    device: &wgpu::Device,
    layout: &BindGroupLayoutWithDesc,
    scene_view: &wgpu::TextureView,
    scene_sampler: &wgpu::Sampler,
    paper: &TextureResource,
    settings_ubo: &UniformBuffer<WatercolorSettings>,
) -> wgpu::BindGroup {
    BindGroupBuilder::new(layout)
        .texture(scene_view)
        .sampler(scene_sampler)
        .texture(&paper.view)
        .sampler(&paper.sampler)
        .resource(settings_ubo.binding_resource())
        .create(device, "Watercolor Bind Group")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_paper_texture_is_an_io_error() {
        let result = load_paper_image(Path::new("assets/definitely-not-here.png"));
        assert!(matches!(result, Err(WatercolorError::Io(_))));
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let dir = std::env::temp_dir().join("glade-watercolor-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("not-an-image.png");
        std::fs::write(&path, b"this is not a png").unwrap();

        let result = load_paper_image(&path);
        assert!(matches!(result, Err(WatercolorError::Decode(_))));
    }

    #[test]
    fn default_settings_match_the_tuned_effect() {
        let settings = WatercolorSettings::default();
        assert_eq!(settings.scale, 0.025);
        assert_eq!(settings.threshold, 0.6);
        assert_eq!(settings.darkening, 2.0);
        assert_eq!(settings.pigment, 1.3);
    }
}
