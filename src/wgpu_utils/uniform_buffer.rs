//! Typed uniform buffers

use std::marker::PhantomData;

use wgpu::util::DeviceExt;

/// A GPU uniform buffer whose contents are always a single `T`
pub struct UniformBuffer<T> {
    buffer: wgpu::Buffer,
    marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> UniformBuffer<T> {
    /// Creates the buffer zero-initialized; contents arrive with the first
    /// [`Self::update_content`]
    pub fn new(device: &wgpu::Device, label: &str) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<T>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            buffer,
            marker: PhantomData,
        }
    }

    /// Creates the buffer with its initial contents in place
    pub fn with_content(device: &wgpu::Device, label: &str, content: &T) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(content),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            buffer,
            marker: PhantomData,
        }
    }

    pub fn update_content(&self, queue: &wgpu::Queue, content: T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&content));
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource<'_> {
        self.buffer.as_entire_binding()
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}
