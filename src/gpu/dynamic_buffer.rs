//! Dynamic GPU buffer management with automatic resizing
//!
//! Per-frame instance data (markers, badges, measurement lines) changes
//! size as annotations come and go. These buffers grow with a 2x strategy
//! and never shrink.

use std::marker::PhantomData;

/// Smallest allocation, in bytes.
const MIN_CAPACITY: u64 = 256;

/// A typed GPU buffer that grows when written past its capacity.
pub struct TypedBuffer<T> {
    buffer: wgpu::Buffer,
    capacity: u64,
    count: u32,
    usage: wgpu::BufferUsages,
    label: String,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Empty buffer with room for `capacity` items.
    #[must_use]
    pub fn with_capacity(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let bytes = ((capacity * size_of::<T>()) as u64).max(MIN_CAPACITY);
        Self {
            buffer: allocate(device, label, bytes, usage),
            capacity: bytes,
            count: 0,
            usage,
            label: label.to_owned(),
            _marker: PhantomData,
        }
    }

    /// Replace the contents, growing if necessary.
    ///
    /// Returns `true` if the buffer was reallocated.
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let needed = bytes.len() as u64;

        let reallocated = needed > self.capacity;
        if reallocated {
            let new_capacity = (needed * 2).max(self.capacity + MIN_CAPACITY);
            log::debug!(
                "growing {} buffer {} -> {} bytes",
                self.label,
                self.capacity,
                new_capacity
            );
            self.buffer =
                allocate(device, &self.label, new_capacity, self.usage);
            self.capacity = new_capacity;
        }

        if !bytes.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
        self.count = data.len() as u32;
        reallocated
    }

    /// The underlying buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Number of items written last.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Whether the last write was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

fn allocate(
    device: &wgpu::Device,
    label: &str,
    size: u64,
    usage: wgpu::BufferUsages,
) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size,
        usage: usage | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
