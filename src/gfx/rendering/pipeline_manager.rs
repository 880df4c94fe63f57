//! Named render pipelines over shared WGSL modules
//!
//! The demo draws with a fixed set of passes, so pipelines are built eagerly
//! during engine bring-up and looked up by name each frame. Every managed
//! pipeline consumes [`Vertex3D`] geometry; the watercolor composite builds
//! its own fullscreen pipeline outside the manager.

use std::{collections::HashMap, sync::Arc};

use wgpu::{
    BindGroupLayout, ColorTargetState, CompareFunction, DepthBiasState, DepthStencilState, Device,
    Face, FragmentState, FrontFace, PipelineCompilationOptions, PipelineLayoutDescriptor,
    PolygonMode, PrimitiveState, PrimitiveTopology, RenderPipeline, RenderPipelineDescriptor,
    ShaderModule, ShaderModuleDescriptor, ShaderSource, StencilState, TextureFormat, VertexState,
};

use crate::gfx::scene::vertex::Vertex3D;

/// Everything needed to build one of the demo's render pipelines
pub struct PipelineConfig<'a> {
    /// Name of a module previously registered with
    /// [`PipelineManager::load_shader`]
    pub shader: &'a str,
    /// Bind group layouts in slot order
    pub layouts: Vec<&'a BindGroupLayout>,
    pub depth_format: Option<TextureFormat>,
    /// `None` builds a depth-only pipeline with no fragment stage
    pub color_target: Option<ColorTargetState>,
    pub cull_mode: Option<Face>,
}

/// Owns the compiled shader modules and the pipelines built from them
pub struct PipelineManager {
    device: Arc<Device>,
    shaders: HashMap<String, ShaderModule>,
    pipelines: HashMap<String, RenderPipeline>,
}

impl PipelineManager {
    pub fn new(device: Arc<Device>) -> Self {
        Self {
            device,
            shaders: HashMap::new(),
            pipelines: HashMap::new(),
        }
    }

    /// Compiles a WGSL module under `name` for pipeline configs to reference
    pub fn load_shader(&mut self, name: &str, source: &str) {
        let module = self.device.create_shader_module(ShaderModuleDescriptor {
            label: Some(name),
            source: ShaderSource::Wgsl(source.into()),
        });
        self.shaders.insert(name.to_string(), module);
    }

    /// Builds a pipeline and stores it under `name`
    pub fn build_pipeline(&mut self, name: &str, config: PipelineConfig) -> Result<(), String> {
        let shader = self
            .shaders
            .get(config.shader)
            .ok_or_else(|| format!("pipeline '{}': shader '{}' not loaded", name, config.shader))?;

        let layout = self
            .device
            .create_pipeline_layout(&PipelineLayoutDescriptor {
                label: Some(name),
                bind_group_layouts: &config.layouts,
                push_constant_ranges: &[],
            });

        let color_targets = [config.color_target.clone()];
        let fragment = config.color_target.as_ref().map(|_| FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &color_targets,
            compilation_options: PipelineCompilationOptions::default(),
        });

        let depth_stencil = config.depth_format.map(|format| DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: CompareFunction::Less,
            stencil: StencilState::default(),
            bias: DepthBiasState::default(),
        });

        let pipeline = self
            .device
            .create_render_pipeline(&RenderPipelineDescriptor {
                label: Some(name),
                layout: Some(&layout),
                vertex: VertexState {
                    module: shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex3D::desc()],
                    compilation_options: PipelineCompilationOptions::default(),
                },
                fragment,
                primitive: PrimitiveState {
                    topology: PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: FrontFace::Ccw,
                    cull_mode: config.cull_mode,
                    polygon_mode: PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            });

        self.pipelines.insert(name.to_string(), pipeline);
        Ok(())
    }

    /// Looks up a built pipeline
    pub fn pipeline(&self, name: &str) -> Option<&RenderPipeline> {
        self.pipelines.get(name)
    }
}
