//! WGPU-based rendering engine
//!
//! Provides the multi-pass frame rendering for the scene: a depth-only sun
//! shadow pass, the forward pass with vertex colors, fog, and point lights,
//! and the optional watercolor composite.

use std::path::Path;
use std::sync::Arc;
use wgpu::{Device, TextureFormat};

use crate::gfx::{
    camera::camera_utils::CameraUniform,
    resources::{
        global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO, LightingConfig},
        material::MaterialBindings,
        texture_resource::TextureResource,
    },
    scene::{object::DrawMesh, scene::PointLight, scene::Scene},
};
use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder},
    binding_types,
};

use super::pipeline_manager::{PipelineConfig, PipelineManager};
use super::watercolor::{WatercolorError, WatercolorPass};

const SHADOW_MAP_SIZE: u32 = 2048;

/// Core rendering engine managing GPU resources and draw calls
///
/// The RenderEngine handles all low-level graphics operations including:
/// - Surface and device management
/// - Pipeline creation and management
/// - Depth buffer handling
/// - Sun shadow mapping
/// - Global uniform updates (camera, lights, fog)
/// - The optional watercolor post pass
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pub pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,

    shadow_map: TextureResource,
    shadow_bind_group: wgpu::BindGroup,

    lighting: LightingConfig,
    watercolor: Option<WatercolorPass>,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// # Panics
    /// Panics if unable to create wgpu adapter or device; the demo cannot
    /// run without a GPU.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> RenderEngine {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window).unwrap();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to request adapter!");

        let (device, queue) = {
            adapter
                .request_device(&wgpu::DeviceDescriptor {
                    label: Some("WGPU Device"),
                    required_features: wgpu::Features::default(),
                    required_limits: wgpu::Limits {
                        max_texture_dimension_2d: 4096,
                        ..wgpu::Limits::downlevel_defaults()
                    },
                    memory_hints: wgpu::MemoryHints::default(),
                    trace: wgpu::Trace::Off,
                })
                .await
                .expect("Failed to request a device!")
        };

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(surface_capabilities.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture = TextureResource::depth_buffer(&device, config.width, config.height);
        let shadow_map = TextureResource::shadow_map(&device, SHADOW_MAP_SIZE);

        // Shadow map binding for the forward pass: depth texture + comparison sampler
        let shadow_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::depth_texture())
            .next_binding_fragment(binding_types::comparison_sampler())
            .create(&device, "Shadow Bind Group");
        let shadow_bind_group = BindGroupBuilder::new(&shadow_layout)
            .texture(&shadow_map.view)
            .sampler(&shadow_map.sampler)
            .create(&device, "Shadow Bind Group");

        let lighting = LightingConfig::default();
        let global_ubo = GlobalUBO::new(&device, "Globals");
        let mut global_bindings = GlobalBindings::new(&device);
        global_bindings.create_bind_group(&device, &global_ubo);

        // Per-object transform layout, mirrored by Object::init_gpu_resources
        let transform_layout = BindGroupLayoutBuilder::new()
            .next_binding_vertex(binding_types::uniform_buffer())
            .create(&device, "Transform Bind Group");

        // Borrow the material layout shape from a throwaway instance
        let material_bindings = MaterialBindings::new(&device);

        let device_handle: Arc<Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());

        pipeline_manager.load_shader("scene", include_str!("scene.wgsl"));
        pipeline_manager.load_shader("shadow", include_str!("shadow_pass.wgsl"));

        let passes = [
            // Depth-only sun pass; no culling so thin geometry cannot leak
            // light through its backside
            (
                "shadow",
                PipelineConfig {
                    shader: "shadow",
                    layouts: vec![
                        global_bindings.bind_group_layouts(),
                        &transform_layout.layout,
                    ],
                    depth_format: Some(TextureResource::DEPTH_FORMAT),
                    color_target: None,
                    cull_mode: None,
                },
            ),
            (
                "scene",
                PipelineConfig {
                    shader: "scene",
                    layouts: vec![
                        global_bindings.bind_group_layouts(),
                        &transform_layout.layout,
                        material_bindings.bind_group_layouts(),
                        &shadow_layout.layout,
                    ],
                    depth_format: Some(TextureResource::DEPTH_FORMAT),
                    color_target: Some(wgpu::ColorTargetState {
                        format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    }),
                    cull_mode: Some(wgpu::Face::Back),
                },
            ),
        ];
        for (name, pass) in passes {
            if let Err(error) = pipeline_manager.build_pipeline(name, pass) {
                log::error!("{}", error);
            }
        }

        RenderEngine {
            device: device_handle,
            config,
            format,
            surface,
            queue: queue_handle,
            depth_texture,
            pipeline_manager,
            global_bindings,
            global_ubo,
            shadow_map,
            shadow_bind_group,
            lighting,
            watercolor: None,
        }
    }

    /// Tries to bring up the watercolor pass from a paper texture on disk.
    ///
    /// On failure the engine keeps rendering without the effect; the caller
    /// decides how loudly to report it.
    pub fn enable_watercolor(&mut self, paper_path: &Path) -> Result<(), WatercolorError> {
        let pass = WatercolorPass::new(
            &self.device,
            &self.queue,
            self.format,
            self.config.width,
            self.config.height,
            paper_path,
        )?;
        self.watercolor = Some(pass);
        Ok(())
    }

    /// Whether the watercolor pass is active
    pub fn watercolor_enabled(&self) -> bool {
        self.watercolor.is_some()
    }

    /// Renders one frame: sun shadow pass, forward pass, optional watercolor
    /// composite
    pub fn render_frame(&mut self, scene: &Scene) {
        let surface_texture = self
            .surface
            .get_current_texture()
            .expect("Failed to get surface texture!");

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        // PASS 1: sun shadow map. Crystals float every frame, so the map is
        // simply redrawn rather than cached.
        {
            let mut shadow_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shadow Depth Pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.shadow_map.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            shadow_pass.set_bind_group(0, self.global_bindings.bind_groups(), &[]);

            if let Some(shadow_pipeline) = self.pipeline_manager.pipeline("shadow") {
                shadow_pass.set_pipeline(shadow_pipeline);

                for object in scene.objects.iter() {
                    if !object.visible {
                        continue;
                    }
                    let Some(transform_bind_group) = object.transform_bind_group() else {
                        continue;
                    };
                    shadow_pass.set_bind_group(1, transform_bind_group, &[]);
                    for part in &object.parts {
                        shadow_pass.draw_mesh(&part.mesh);
                    }
                }
            }
        }

        // PASS 2: forward pass, into the watercolor target when active
        {
            let color_view = match &self.watercolor {
                Some(pass) => pass.scene_view(),
                None => &surface_texture_view,
            };
            let clear = self.lighting.fog_color;

            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear[0] as f64,
                            g: clear[1] as f64,
                            b: clear[2] as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.global_bindings.bind_groups(), &[]);
            render_pass.set_bind_group(3, &self.shadow_bind_group, &[]);

            if let Some(pipeline) = self.pipeline_manager.pipeline("scene") {
                render_pass.set_pipeline(pipeline);

                for object in scene.objects.iter() {
                    if !object.visible {
                        continue;
                    }
                    let Some(transform_bind_group) = object.transform_bind_group() else {
                        continue;
                    };
                    render_pass.set_bind_group(1, transform_bind_group, &[]);

                    for part in &object.parts {
                        let material = scene.material_for_part(part);
                        if let Some(material_bind_group) = material.get_bind_group() {
                            render_pass.set_bind_group(2, material_bind_group, &[]);
                            render_pass.draw_mesh(&part.mesh);
                        } else {
                            log::debug!(
                                "Skipping part of '{}' - material '{}' has no GPU resources",
                                object.name,
                                material.name
                            );
                        }
                    }
                }
            }
        }

        // PASS 3: watercolor composite
        if let Some(watercolor) = &self.watercolor {
            watercolor.render(&mut encoder, &surface_texture_view);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
    }

    /// Updates camera, lighting, and point-light uniforms
    ///
    /// Should be called each frame before [`Self::render_frame`].
    pub fn update(&mut self, camera_uniform: CameraUniform, point_lights: &[PointLight]) {
        update_global_ubo(
            &self.global_ubo,
            &self.queue,
            camera_uniform,
            &self.lighting,
            point_lights,
        );
    }

    /// Replaces the light rig (sun, ambient, hemisphere, fog)
    pub fn set_lighting(&mut self, lighting: LightingConfig) {
        self.lighting = lighting;
    }

    pub fn lighting(&self) -> LightingConfig {
        self.lighting
    }

    /// Resizes the surface, depth buffer, and watercolor target
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture = TextureResource::depth_buffer(&self.device, width, height);

        if let Some(watercolor) = &mut self.watercolor {
            watercolor.resize(&self.device, self.format, width, height);
        }
        // Shadow map keeps its fixed resolution
    }

    /// Returns current surface dimensions
    pub fn get_surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Returns reference to the wgpu device
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns reference to the wgpu command queue
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Returns the surface texture format
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }
}
