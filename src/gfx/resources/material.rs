//! Material system for the forward renderer
//!
//! Provides material definitions and centralized management with GPU resource
//! handling. Materials are stored in MaterialManager and parts reference them
//! by id. Beyond base color, materials carry the flags the scene needs:
//! emissive glow (crystals, stained glass), an unlit mode (sky dome), and a
//! per-material fog switch.

use std::collections::HashMap;
use wgpu::Device;

use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
    uniform_buffer::UniformBuffer,
};

/// Material ID for referencing materials
pub type MaterialId = String;

/// Converts `0xRRGGBB` hex colors into linear-ish RGB triples
pub fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// GPU uniform data for materials; must match `MaterialUniform` in scene.wgsl
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub base_color: [f32; 4],
    pub emissive: [f32; 3],
    pub emissive_strength: f32,
    pub shininess: f32,
    pub unlit: f32,
    pub fog: f32,
    _padding: f32,
}

type MaterialUBO = UniformBuffer<MaterialUniform>;

/// Material bind group management
pub struct MaterialBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl MaterialBindings {
    pub fn new(device: &Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::uniform_buffer())
            .create(device, "Material Bind Group");

        MaterialBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    pub fn create_bind_group(&mut self, device: &Device, ubo: &MaterialUBO) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .create(device, "Material Bind Group"),
        );
    }

    pub fn bind_group_layouts(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_groups(&self) -> &wgpu::BindGroup {
        self.bind_group
            .as_ref()
            .expect("Bind group has not been created yet!")
    }
}

/// Material definition
///
/// Contains material properties and GPU resources. Materials are stored
/// centrally in MaterialManager and shared between parts.
pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
    pub emissive: [f32; 3],
    pub emissive_strength: f32,
    pub shininess: f32,
    pub unlit: bool,
    pub fog: bool,

    // GPU resources - shared by all parts using this material
    material_ubo: Option<MaterialUBO>,
    material_bindings: Option<MaterialBindings>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            base_color: [0.8, 0.8, 0.8, 1.0],
            emissive: [0.0, 0.0, 0.0],
            emissive_strength: 0.0,
            shininess: 16.0,
            unlit: false,
            fog: true,
            material_ubo: None,
            material_bindings: None,
        }
    }
}

impl Material {
    /// Creates a new lit, fogged material
    ///
    /// # Arguments
    /// * `name` - Unique name for this material
    /// * `base_color` - RGB base color (multiplied with vertex color)
    /// * `shininess` - Specular exponent; 0 disables the highlight
    pub fn new(name: &str, base_color: [f32; 3], shininess: f32) -> Self {
        Self {
            name: name.to_string(),
            base_color: [base_color[0], base_color[1], base_color[2], 1.0],
            shininess,
            ..Default::default()
        }
    }

    /// Creates a material straight from a `0xRRGGBB` color
    pub fn from_hex(name: &str, hex: u32, shininess: f32) -> Self {
        Self::new(name, rgb(hex), shininess)
    }

    /// Builder pattern: Set alpha transparency
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.base_color[3] = alpha.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set emissive color and strength
    pub fn with_emission(mut self, color: [f32; 3], strength: f32) -> Self {
        self.emissive = color;
        self.emissive_strength = strength;
        self
    }

    /// Builder pattern: Skip lighting entirely (sky dome)
    pub fn unlit(mut self) -> Self {
        self.unlit = true;
        self
    }

    /// Builder pattern: Exclude this material from distance fog
    pub fn without_fog(mut self) -> Self {
        self.fog = false;
        self
    }

    /// Updates GPU resources for this material
    ///
    /// Must be called after material properties change to sync with GPU.
    pub fn update_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        if self.material_ubo.is_none() {
            self.material_ubo = Some(MaterialUBO::new(device, &self.name));
        }

        if self.material_bindings.is_none() {
            let mut bindings = MaterialBindings::new(device);
            bindings.create_bind_group(device, self.material_ubo.as_ref().unwrap());
            self.material_bindings = Some(bindings);
        }

        let uniform_data = MaterialUniform {
            base_color: self.base_color,
            emissive: self.emissive,
            emissive_strength: self.emissive_strength,
            shininess: self.shininess,
            unlit: if self.unlit { 1.0 } else { 0.0 },
            fog: if self.fog { 1.0 } else { 0.0 },
            _padding: 0.0,
        };

        if let Some(ubo) = &self.material_ubo {
            ubo.update_content(queue, uniform_data);
        }
    }

    /// Gets the bind group for rendering
    pub fn get_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.material_bindings.as_ref().map(|b| b.bind_groups())
    }

    /// Gets the bind group layout for pipeline creation
    pub fn get_bind_group_layout(&self) -> Option<&wgpu::BindGroupLayout> {
        self.material_bindings
            .as_ref()
            .map(|b| b.bind_group_layouts())
    }
}

/// Manages all materials in the scene
///
/// Centralized storage; parts reference materials by id rather than storing
/// material data directly, so GPU resources are shared.
pub struct MaterialManager {
    materials: HashMap<MaterialId, Material>,
    default_material_id: MaterialId,
}

impl MaterialManager {
    /// Creates a new material manager with a default material
    pub fn new() -> Self {
        let mut manager = Self {
            materials: HashMap::new(),
            default_material_id: "default".to_string(),
        };
        manager
            .materials
            .insert("default".to_string(), Material::default());
        manager
    }

    /// Adds a material to the library, replacing any previous one of the
    /// same name
    pub fn add_material(&mut self, material: Material) {
        self.materials.insert(material.name.clone(), material);
    }

    /// Gets a material by ID
    pub fn get_material(&self, id: &str) -> Option<&Material> {
        self.materials.get(id)
    }

    /// Gets a mutable material by ID
    pub fn get_material_mut(&mut self, id: &str) -> Option<&mut Material> {
        self.materials.get_mut(id)
    }

    /// Gets the default material
    pub fn get_default_material(&self) -> &Material {
        self.materials.get(&self.default_material_id).unwrap()
    }

    /// Gets a material with fallback to the default
    pub fn material_for_id(&self, id: &MaterialId) -> &Material {
        self.get_material(id)
            .unwrap_or_else(|| self.get_default_material())
    }

    /// Lists all material IDs
    pub fn list_materials(&self) -> Vec<&MaterialId> {
        self.materials.keys().collect()
    }

    /// Updates GPU resources for all materials
    ///
    /// Should be called when the GPU context is available or when materials
    /// have been modified.
    pub fn update_all_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        for material in self.materials.values_mut() {
            material.update_gpu_resources(device, queue);
        }
    }
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_decode_to_unit_range() {
        assert_eq!(rgb(0xffffff), [1.0, 1.0, 1.0]);
        assert_eq!(rgb(0x000000), [0.0, 0.0, 0.0]);
        let sky = rgb(0x87ceeb);
        assert!((sky[0] - 0x87 as f32 / 255.0).abs() < 1e-6);
        assert!((sky[1] - 0xce as f32 / 255.0).abs() < 1e-6);
        assert!((sky[2] - 0xeb as f32 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn builder_flags_round_trip() {
        let material = Material::from_hex("crystal", 0x9b59b6, 100.0)
            .with_alpha(0.9)
            .with_emission(rgb(0x9b59b6), 0.6);
        assert_eq!(material.base_color[3], 0.9);
        assert_eq!(material.emissive_strength, 0.6);
        assert!(!material.unlit);

        let sky = Material::from_hex("sky", 0x87ceeb, 0.0).unlit().without_fog();
        assert!(sky.unlit);
        assert!(!sky.fog);
    }

    #[test]
    fn manager_falls_back_to_default() {
        let mut manager = MaterialManager::new();
        manager.add_material(Material::from_hex("trunk", 0x4a3520, 4.0));
        assert_eq!(manager.material_for_id(&"trunk".to_string()).name, "trunk");
        assert_eq!(manager.material_for_id(&"missing".to_string()).name, "default");
    }
}
