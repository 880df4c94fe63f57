use cgmath::Vector3;
use wgpu::Device;

use crate::gfx::{
    camera::camera_utils::CameraManager,
    resources::material::{Material, MaterialManager},
};

use super::object::{Object, Part};

/// A point light attached to the scene, used for crystal glow
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    pub position: Vector3<f32>,
    pub color: [f32; 3],
    pub intensity: f32,
    pub range: f32,
}

/// Main scene containing objects, materials, lights, and camera
pub struct Scene {
    pub camera_manager: CameraManager,
    pub objects: Vec<Object>,
    pub material_manager: MaterialManager,
    pub point_lights: Vec<PointLight>,
}

impl Scene {
    /// Creates a new scene with the given camera manager
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            camera_manager,
            objects: Vec::new(),
            material_manager: MaterialManager::new(),
            point_lights: Vec::new(),
        }
    }

    /// Updates the scene (camera matrices, etc.)
    pub fn update(&mut self) {
        self.camera_manager.camera.update_view_proj();
    }

    /// Adds a material to the scene's material library
    pub fn add_material(&mut self, material: Material) {
        self.material_manager.add_material(material);
    }

    /// Adds an object and returns its index, which doubles as a stable handle
    /// for the animation updater
    pub fn add_object(&mut self, object: Object) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Adds a point light and returns its index
    pub fn add_point_light(&mut self, light: PointLight) -> usize {
        self.point_lights.push(light);
        self.point_lights.len() - 1
    }

    /// Gets mutable reference to an object by index
    pub fn object_mut(&mut self, index: usize) -> Option<&mut Object> {
        self.objects.get_mut(index)
    }

    /// Gets immutable reference to an object by index
    pub fn object(&self, index: usize) -> Option<&Object> {
        self.objects.get(index)
    }

    /// Gets material for rendering a part, falling back to the default
    /// material when the id is unknown
    pub fn material_for_part(&self, part: &Part) -> &Material {
        self.material_manager.material_for_id(&part.material)
    }

    /// Initializes GPU resources for all objects and materials
    ///
    /// Must be called after the GPU context is available and before rendering.
    pub fn init_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        for object in self.objects.iter_mut() {
            object.init_gpu_resources(device);
        }
        self.material_manager.update_all_gpu_resources(device, queue);
    }

    /// Syncs every object transform to the GPU; cheap enough for this scene
    /// to do unconditionally each frame
    pub fn update_all_transforms(&mut self, queue: &wgpu::Queue) {
        for object in &mut self.objects {
            if object.gpu_resources.is_some() {
                object.update_transform(queue);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{
        camera_controller::CameraController, camera_utils::CameraManager,
        orbit_camera::OrbitCamera,
    };
    use crate::gfx::scene::object::Object;
    use cgmath::Zero;

    fn test_scene() -> Scene {
        let camera = OrbitCamera::new(10.0, 0.5, 0.0, Vector3::zero(), 1.0);
        let controller = CameraController::new(0.005, 0.1);
        Scene::new(CameraManager::new(camera, controller))
    }

    #[test]
    fn object_indices_are_stable_handles() {
        let mut scene = test_scene();
        let a = scene.add_object(Object::new("a"));
        let b = scene.add_object(Object::new("b"));
        assert_eq!((a, b), (0, 1));
        assert_eq!(scene.object(b).unwrap().name, "b");
    }

    #[test]
    fn unknown_materials_fall_back_to_default() {
        let scene = test_scene();
        let mut object = Object::new("x");
        object.add_part(&crate::gfx::geometry::generate_cube(), "does-not-exist");
        let material = scene.material_for_part(&object.parts[0]);
        assert_eq!(material.name, "default");
    }
}
