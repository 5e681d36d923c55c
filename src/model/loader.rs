//! glTF / GLB import and the detached background loader.
//!
//! The loader thread reads the file in chunks (reporting progress), parses
//! it, bakes node transforms into vertex positions and sends the finished
//! [`Model`] back over a channel. The owner polls the channel once per frame
//! without blocking.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use glam::{Mat4, Vec3};

use super::{Model, ModelMesh};
use crate::error::VitrineError;

/// Read granularity for progress reporting.
const CHUNK_SIZE: usize = 256 * 1024;

/// Share of the progress bar spent reading bytes; parsing fills the rest.
const READ_SHARE: f32 = 0.9;

/// Messages sent by the loader thread.
#[derive(Debug)]
pub enum LoadEvent {
    /// Fraction complete in [0, 1].
    Progress(f32),
    /// Import finished.
    Loaded(Box<Model>),
    /// Import failed; no retry is attempted.
    Failed(String),
}

/// Handle to a model import running on a background thread.
pub struct ModelLoader {
    rx: Receiver<LoadEvent>,
    finished: bool,
}

impl ModelLoader {
    /// Start importing `path` on a named background thread. The model is
    /// normalized to `normalize_size` (0 keeps native scale).
    ///
    /// # Errors
    ///
    /// Returns [`VitrineError::ThreadSpawn`] if the thread cannot be created.
    pub fn spawn(
        path: impl Into<PathBuf>,
        normalize_size: f32,
    ) -> Result<Self, VitrineError> {
        let path = path.into();
        let (tx, rx) = mpsc::channel();
        let _handle = std::thread::Builder::new()
            .name("vitrine-model-loader".into())
            .spawn(move || run_import(&path, normalize_size, &tx))
            .map_err(VitrineError::ThreadSpawn)?;
        Ok(Self {
            rx,
            finished: false,
        })
    }

    /// Drain all pending events without blocking.
    ///
    /// If the thread goes away without a final event, a single
    /// [`LoadEvent::Failed`] is synthesized.
    pub fn poll(&mut self) -> Vec<LoadEvent> {
        let mut events = Vec::new();
        while !self.finished {
            match self.rx.try_recv() {
                Ok(event) => {
                    if matches!(
                        event,
                        LoadEvent::Loaded(_) | LoadEvent::Failed(_)
                    ) {
                        self.finished = true;
                    }
                    events.push(event);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.finished = true;
                    events.push(LoadEvent::Failed(
                        "loader thread exited unexpectedly".into(),
                    ));
                }
            }
        }
        events
    }

    /// Whether a terminal event has been delivered.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

fn run_import(path: &Path, normalize_size: f32, tx: &Sender<LoadEvent>) {
    log::info!("loading {}", path.display());
    let result = load_file(path, |fraction| {
        let _ = tx.send(LoadEvent::Progress(fraction));
    });
    let event = match result {
        Ok(mut model) => {
            model.normalize(normalize_size);
            log::info!(
                "loaded '{}': {} meshes, {} triangles",
                model.name(),
                model.meshes().len(),
                model.triangle_count()
            );
            LoadEvent::Loaded(Box::new(model))
        }
        Err(e) => {
            log::error!("failed to load {}: {e}", path.display());
            LoadEvent::Failed(e.to_string())
        }
    };
    // The receiver may already be gone if the engine was dropped.
    let _ = tx.send(event);
}

/// Import a `.gltf` or `.glb` file synchronously, reporting read progress.
///
/// # Errors
///
/// Returns [`VitrineError::Io`] when the file cannot be read and
/// [`VitrineError::AssetLoad`] when it is not a usable glTF asset.
pub fn load_file(
    path: &Path,
    mut progress: impl FnMut(f32),
) -> Result<Model, VitrineError> {
    let mut file = std::fs::File::open(path)?;
    let total = file.metadata().map(|m| m.len() as usize).unwrap_or(0);

    let mut bytes = Vec::with_capacity(total);
    let mut chunk = vec![0u8; CHUNK_SIZE];
    progress(0.0);
    loop {
        let n = file.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        bytes.extend_from_slice(&chunk[..n]);
        if total > 0 {
            progress(READ_SHARE * (bytes.len() as f32 / total as f32).min(1.0));
        }
    }

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("model");
    let model = load_gltf_bytes(&bytes, path.parent(), name)?;
    progress(1.0);
    Ok(model)
}

/// Parse glTF JSON or GLB bytes. External buffers are resolved relative to
/// `base`.
///
/// # Errors
///
/// Returns [`VitrineError::AssetLoad`] on parse failure, missing buffers,
/// or when the asset contains no triangle geometry.
pub fn load_gltf_bytes(
    bytes: &[u8],
    base: Option<&Path>,
    name: &str,
) -> Result<Model, VitrineError> {
    let gltf = gltf::Gltf::from_slice(bytes)
        .map_err(|e| VitrineError::AssetLoad(format!("{name}: {e}")))?;
    let gltf::Gltf { document, blob } = gltf;
    let buffers = gltf::import_buffers(&document, base, blob)
        .map_err(|e| VitrineError::AssetLoad(format!("{name}: {e}")))?;

    let mut meshes = Vec::new();
    let roots: Vec<gltf::Node<'_>> = match document.default_scene() {
        Some(scene) => scene.nodes().collect(),
        None => document.scenes().flat_map(|s| s.nodes()).collect(),
    };

    if roots.is_empty() {
        // Scene-less asset: take every mesh as-is.
        for mesh in document.meshes() {
            read_mesh(&mesh, Mat4::IDENTITY, &buffers, &mut meshes);
        }
    } else {
        for node in roots {
            visit_node(&node, Mat4::IDENTITY, &buffers, &mut meshes);
        }
    }

    let model = Model::new(name, meshes);
    if model.triangle_count() == 0 {
        return Err(VitrineError::AssetLoad(format!(
            "{name}: no triangle geometry"
        )));
    }
    Ok(model)
}

fn visit_node(
    node: &gltf::Node<'_>,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut Vec<ModelMesh>,
) {
    let local = Mat4::from_cols_array_2d(&node.transform().matrix());
    let world = parent * local;
    if let Some(mesh) = node.mesh() {
        read_mesh(&mesh, world, buffers, out);
    }
    for child in node.children() {
        visit_node(&child, world, buffers, out);
    }
}

fn read_mesh(
    mesh: &gltf::Mesh<'_>,
    transform: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut Vec<ModelMesh>,
) {
    let name = mesh.name().unwrap_or("");
    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            log::debug!("skipping non-triangle primitive in '{name}'");
            continue;
        }
        let reader = primitive.reader(|buffer| {
            buffers.get(buffer.index()).map(|d| d.0.as_slice())
        });

        let Some(positions) = reader.read_positions() else {
            log::warn!("primitive in '{name}' has no positions");
            continue;
        };
        let positions: Vec<Vec3> = positions
            .map(|p| transform.transform_point3(Vec3::from_array(p)))
            .collect();

        let indices: Vec<u32> = reader.read_indices().map_or_else(
            || (0..positions.len() as u32).collect(),
            |i| i.into_u32().collect(),
        );

        out.push(ModelMesh::new(name, positions, indices));
    }
}
