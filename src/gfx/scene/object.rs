//! Composite scene objects
//!
//! An [`Object`] is a named transform node owning a list of [`Part`]s. Each
//! part pairs one mesh with one material, with its local offset already baked
//! into the vertex data, so a whole tree or altar renders as one logical unit
//! under a single transform.

use cgmath::{Matrix4, Rad, SquareMatrix, Vector3};
use wgpu::Device;

use crate::gfx::geometry::GeometryData;
use crate::gfx::resources::material::MaterialId;
use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder},
    binding_types,
};

use super::vertex::Vertex3D;

/// CPU-side mesh data plus its GPU buffers once uploaded
pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
}

impl Mesh {
    /// Builds a mesh from generated geometry. Missing vertex colors default
    /// to white so the material base color passes through unchanged.
    pub fn from_geometry(geometry: &GeometryData) -> Self {
        let vertices = (0..geometry.vertices.len())
            .map(|i| Vertex3D {
                position: geometry.vertices[i],
                normal: geometry.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                color: geometry.colors.get(i).copied().unwrap_or([1.0, 1.0, 1.0]),
            })
            .collect();

        Self {
            vertices,
            indices: geometry.indices.clone(),
            vertex_buffer: None,
            index_buffer: None,
            index_count: geometry.indices.len() as u32,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn vertices(&self) -> &[Vertex3D] {
        &self.vertices
    }

    fn init_gpu_resources(&mut self, device: &Device) {
        let vertex_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Vertex Buffer"),
                contents: bytemuck::cast_slice(&self.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );

        let index_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Index Buffer"),
                contents: bytemuck::cast_slice(&self.indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        self.vertex_buffer = Some(vertex_buffer);
        self.index_buffer = Some(index_buffer);
    }
}

/// One mesh of a composite object together with its material
pub struct Part {
    pub mesh: Mesh,
    pub material: MaterialId,
}

/// GPU resources backing an object's transform
pub struct ObjectGpuResources {
    pub transform_buffer: wgpu::Buffer,
    pub transform_bind_group: wgpu::BindGroup,
}

pub struct Object {
    pub name: String,
    pub parts: Vec<Part>,
    pub transform: Matrix4<f32>,
    pub visible: bool,
    pub gpu_resources: Option<ObjectGpuResources>,
}

impl Object {
    /// Create a new, empty object with identity transformation
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parts: Vec::new(),
            transform: Matrix4::identity(),
            visible: true,
            gpu_resources: None,
        }
    }

    /// Adds a part built from geometry, rendered with the named material
    pub fn add_part(&mut self, geometry: &GeometryData, material: &str) {
        self.parts.push(Part {
            mesh: Mesh::from_geometry(geometry),
            material: material.to_string(),
        });
    }

    /// Set translation
    pub fn set_translation(&mut self, translation: Vector3<f32>) {
        self.transform = Matrix4::from_translation(translation);
    }

    /// Set rotation around X axis
    pub fn set_rotation_x(&mut self, angle: Rad<f32>) {
        self.transform = Matrix4::from_angle_x(angle);
    }

    /// Create a complete transform from translation, yaw, and uniform scale
    pub fn set_transform_trs(
        &mut self,
        translation: Vector3<f32>,
        yaw: Rad<f32>,
        scale: f32,
    ) {
        let t = Matrix4::from_translation(translation);
        let r = Matrix4::from_angle_y(yaw);
        let s = Matrix4::from_scale(scale);
        self.transform = t * r * s; // Order matters: T * R * S
    }

    /// Update the transformation matrix and sync to GPU if resources exist
    pub fn update_transform(&mut self, queue: &wgpu::Queue) {
        if let Some(gpu_resources) = &self.gpu_resources {
            // cgmath matrices are column-major, which is what the GPU expects
            let transform_data: &[f32; 16] = self.transform.as_ref();
            queue.write_buffer(
                &gpu_resources.transform_buffer,
                0,
                bytemuck::cast_slice(transform_data),
            );
        }
    }

    /// Get the transform bind group for rendering
    pub fn transform_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources
            .as_ref()
            .map(|res| &res.transform_bind_group)
    }

    pub fn init_gpu_resources(&mut self, device: &Device) {
        for part in self.parts.iter_mut() {
            part.mesh.init_gpu_resources(device);
        }

        let transform_data: &[f32; 16] = self.transform.as_ref();
        let transform_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Transform Uniform Buffer"),
                contents: bytemuck::cast_slice(transform_data),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            },
        );

        // Must stay in sync with the transform slot the render pipelines declare
        let transform_layout = BindGroupLayoutBuilder::new()
            .next_binding_vertex(binding_types::uniform_buffer())
            .create(device, "Transform Bind Group");
        let transform_bind_group = BindGroupBuilder::new(&transform_layout)
            .resource(transform_buffer.as_entire_binding())
            .create(device, "Transform Bind Group");

        self.gpu_resources = Some(ObjectGpuResources {
            transform_buffer,
            transform_bind_group,
        });
    }
}

/// Draw helpers for meshes that have had their buffers uploaded
pub trait DrawMesh<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
}

impl<'a, 'b> DrawMesh<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        let vertex_buffer = match &mesh.vertex_buffer {
            Some(buffer) => buffer,
            None => return, // Skip drawing if not uploaded
        };
        let index_buffer = match &mesh.index_buffer {
            Some(buffer) => buffer,
            None => return,
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_cube;

    #[test]
    fn mesh_defaults_missing_colors_to_white() {
        let mesh = Mesh::from_geometry(&generate_cube());
        assert!(mesh.vertices().iter().all(|v| v.color == [1.0, 1.0, 1.0]));
    }

    #[test]
    fn parts_accumulate_with_their_materials() {
        let cube = generate_cube();
        let mut object = Object::new("altar");
        object.add_part(&cube, "stone");
        object.add_part(&cube, "stone");
        object.add_part(&cube, "gold");
        assert_eq!(object.parts.len(), 3);
        assert_eq!(object.parts[2].material, "gold");
    }

    #[test]
    fn trs_transform_translates_points() {
        use cgmath::{Point3, Transform};
        let mut object = Object::new("tree");
        object.set_transform_trs(Vector3::new(2.0, 0.0, -3.0), Rad(0.0), 1.0);
        let p = object.transform.transform_point(Point3::new(0.0, 0.0, 0.0));
        assert_eq!((p.x, p.y, p.z), (2.0, 0.0, -3.0));
    }
}
