//! Frame readback and PNG export.

use std::path::{Path, PathBuf};

use web_time::{SystemTime, UNIX_EPOCH};

use crate::error::VitrineError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::RenderTarget;

/// File name for a screenshot taken at `unix_ms`.
#[must_use]
pub fn file_name(unix_ms: u128) -> String {
    format!("vitrine-{unix_ms}.png")
}

/// Row pitch for texture-to-buffer copies.
#[must_use]
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * 4;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Strip row padding and convert to tightly packed RGBA8.
#[must_use]
pub fn unpad_to_rgba(
    data: &[u8],
    width: u32,
    height: u32,
    padded_row: u32,
    bgra: bool,
) -> Vec<u8> {
    let row = (width * 4) as usize;
    let mut out = Vec::with_capacity(row * height as usize);
    for chunk in data.chunks(padded_row as usize).take(height as usize) {
        out.extend_from_slice(&chunk[..row.min(chunk.len())]);
    }
    if bgra {
        for px in out.chunks_exact_mut(4) {
            px.swap(0, 2);
        }
    }
    out
}

fn is_bgra(format: wgpu::TextureFormat) -> bool {
    matches!(
        format,
        wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb
    )
}

/// Copy `target` to host memory, blocking until the GPU is done.
///
/// # Errors
///
/// Returns [`VitrineError::Screenshot`] if the buffer cannot be mapped.
pub fn read_target(
    context: &RenderContext,
    target: &RenderTarget,
) -> Result<Vec<u8>, VitrineError> {
    let (width, height) = target.size;
    let padded_row = padded_bytes_per_row(width);
    let buffer = context.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Screenshot Readback"),
        size: u64::from(padded_row) * u64::from(height),
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = context.create_encoder("Screenshot Copy");
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture: &target.texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded_row),
                rows_per_image: Some(height),
            },
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
    context.submit(encoder);

    let slice = buffer.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    let _ = context.device.poll(wgpu::PollType::Wait);
    rx.recv()
        .map_err(|e| VitrineError::Screenshot(e.to_string()))?
        .map_err(|e| VitrineError::Screenshot(e.to_string()))?;

    let pixels = unpad_to_rgba(
        &slice.get_mapped_range(),
        width,
        height,
        padded_row,
        is_bgra(target.texture.format()),
    );
    buffer.unmap();
    Ok(pixels)
}

/// Write RGBA8 pixels as `vitrine-<unix-ms>.png` in `dir`.
///
/// # Errors
///
/// Returns [`VitrineError::Io`] if `dir` cannot be created and
/// [`VitrineError::Screenshot`] if encoding fails.
pub fn save_png(
    dir: &Path,
    pixels: Vec<u8>,
    (width, height): (u32, u32),
) -> Result<PathBuf, VitrineError> {
    std::fs::create_dir_all(dir)?;
    let unix_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis());
    let path = dir.join(file_name(unix_ms));
    let image = image::RgbaImage::from_raw(width, height, pixels)
        .ok_or_else(|| {
            VitrineError::Screenshot(
                "pixel buffer does not match image size".into(),
            )
        })?;
    image
        .save_with_format(&path, image::ImageFormat::Png)
        .map_err(|e| VitrineError::Screenshot(e.to_string()))?;
    log::info!("screenshot saved to {}", path.display());
    Ok(path)
}
