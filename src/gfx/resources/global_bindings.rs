//! Global uniform bindings for camera, lighting, and fog
//!
//! Manages the GPU uniform buffer and bind group for per-frame global state
//! shared by every object: camera matrices, the sun (with its shadow
//! projection), ambient and hemisphere terms, distance fog, and the point
//! lights that make the altar crystals glow.

use crate::{
    gfx::camera::{camera_utils::CameraUniform, orbit_camera::OPENGL_TO_WGPU_MATRIX},
    gfx::scene::scene::PointLight,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

use crate::gfx::resources::material::rgb;
use cgmath::InnerSpace;

/// Maximum number of point lights uploaded per frame; the five altars fit
/// comfortably
pub const MAX_POINT_LIGHTS: usize = 8;

/// GPU layout for one point light; must match `PointLight` in scene.wgsl
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightGpu {
    pub position: [f32; 3],
    pub range: f32,
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Global uniform buffer content structure
///
/// MUST match the Globals struct in the shaders exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
    sun_view_proj: [[f32; 4]; 4],

    sun_direction: [f32; 3],
    _pad0: f32,
    sun_color: [f32; 3],
    sun_intensity: f32,

    ambient_color: [f32; 3],
    ambient_intensity: f32,
    hemisphere_sky: [f32; 3],
    hemisphere_intensity: f32,
    hemisphere_ground: [f32; 3],
    _pad1: f32,

    fog_color: [f32; 3],
    fog_near: f32,
    fog_far: f32,
    point_light_count: u32,
    _pad2: [f32; 2],

    point_lights: [PointLightGpu; MAX_POINT_LIGHTS],
}

unsafe impl bytemuck::Pod for GlobalUBOContent {}
unsafe impl bytemuck::Zeroable for GlobalUBOContent {}

/// The scene's light rig and fog, in one place
#[derive(Copy, Clone, Debug)]
pub struct LightingConfig {
    pub sun_position: [f32; 3],
    pub sun_color: [f32; 3],
    pub sun_intensity: f32,
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    pub hemisphere_sky: [f32; 3],
    pub hemisphere_ground: [f32; 3],
    pub hemisphere_intensity: f32,
    pub fog_color: [f32; 3],
    pub fog_near: f32,
    pub fog_far: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            sun_position: [50.0, 80.0, 30.0],
            sun_color: rgb(0xfff8dc),
            sun_intensity: 0.8,
            ambient_color: [1.0, 1.0, 1.0],
            ambient_intensity: 0.6,
            hemisphere_sky: rgb(0x87ceeb),
            hemisphere_ground: rgb(0x6b8e23),
            hemisphere_intensity: 0.4,
            fog_color: rgb(0x87ceeb),
            fog_near: 50.0,
            fog_far: 200.0,
        }
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Builds the sun's orthographic shadow matrix.
///
/// The bounds cover the whole scattered scene; the wgpu clip-space
/// correction applies here for the same reason it does on the camera.
pub fn sun_view_proj(lighting: &LightingConfig) -> cgmath::Matrix4<f32> {
    let sun_pos = cgmath::Point3::new(
        lighting.sun_position[0],
        lighting.sun_position[1],
        lighting.sun_position[2],
    );
    let view = cgmath::Matrix4::look_at_rh(
        sun_pos,
        cgmath::Point3::new(0.0, 0.0, 0.0),
        cgmath::Vector3::unit_y(),
    );
    let proj = OPENGL_TO_WGPU_MATRIX * cgmath::ortho(-60.0, 60.0, -60.0, 60.0, 0.1, 200.0);
    proj * view
}

/// Updates the global uniform buffer with camera, lighting, and point lights
///
/// Should be called each frame; lights beyond [`MAX_POINT_LIGHTS`] are
/// dropped.
pub fn update_global_ubo(
    ubo: &GlobalUBO,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    lighting: &LightingConfig,
    point_lights: &[PointLight],
) {
    let sun_direction = -cgmath::Vector3::from(lighting.sun_position).normalize();

    let mut lights = [PointLightGpu {
        position: [0.0; 3],
        range: 0.0,
        color: [0.0; 3],
        intensity: 0.0,
    }; MAX_POINT_LIGHTS];
    let count = point_lights.len().min(MAX_POINT_LIGHTS);
    for (slot, light) in lights.iter_mut().zip(point_lights.iter()) {
        *slot = PointLightGpu {
            position: [light.position.x, light.position.y, light.position.z],
            range: light.range,
            color: light.color,
            intensity: light.intensity,
        };
    }

    let content = GlobalUBOContent {
        view_position: camera.view_position,
        view_proj: camera.view_proj,
        sun_view_proj: sun_view_proj(lighting).into(),
        sun_direction: sun_direction.into(),
        _pad0: 0.0,
        sun_color: lighting.sun_color,
        sun_intensity: lighting.sun_intensity,
        ambient_color: lighting.ambient_color,
        ambient_intensity: lighting.ambient_intensity,
        hemisphere_sky: lighting.hemisphere_sky,
        hemisphere_intensity: lighting.hemisphere_intensity,
        hemisphere_ground: lighting.hemisphere_ground,
        _pad1: 0.0,
        fog_color: lighting.fog_color,
        fog_near: lighting.fog_near,
        fog_far: lighting.fog_far,
        point_light_count: count as u32,
        _pad2: [0.0; 2],
        point_lights: lights,
    };

    ubo.update_content(queue, content);
}

/// Manages bind group layouts and bind groups for global uniforms
///
/// Bound to slot 0 in all render pipelines.
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform_buffer())
            .create(device, "Globals Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    /// Creates the bind group with the provided uniform buffer
    ///
    /// Must be called before any rendering operations that need global
    /// uniforms.
    pub fn create_bind_group(&mut self, device: &wgpu::Device, ubo: &GlobalUBO) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .create(device, "Global Bind Group"),
        );
    }

    pub fn bind_group_layouts(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    /// # Panics
    /// Panics if `create_bind_group()` hasn't been called yet
    pub fn bind_groups(&self) -> &wgpu::BindGroup {
        self.bind_group
            .as_ref()
            .expect("Bind group has not been created yet!")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ubo_content_is_tightly_packed() {
        // The WGSL mirror assumes vec4-aligned rows with no implicit padding
        assert_eq!(std::mem::size_of::<PointLightGpu>(), 32);
        assert_eq!(
            std::mem::size_of::<GlobalUBOContent>(),
            16 + 64 + 64 + 7 * 16 + MAX_POINT_LIGHTS * 32
        );
    }

    #[test]
    fn default_lighting_matches_scene_palette() {
        let lighting = LightingConfig::default();
        assert_eq!(lighting.fog_near, 50.0);
        assert_eq!(lighting.fog_far, 200.0);
        assert_eq!(lighting.fog_color, lighting.hemisphere_sky);
    }
}
