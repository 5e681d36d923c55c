//! Crate-level error types.
//!
//! [`VitrineError`] covers failures of the surrounding machinery (asset
//! import, I/O, options, GPU, window). [`InteractionError`] is the local,
//! recoverable taxonomy for rejected user operations: none of its variants
//! end the session, and a rejected command never mutates state.

use std::fmt;

#[cfg(feature = "viewer")]
use crate::gpu::render_context::RenderContextError;

/// Errors produced by the vitrine crate.
#[derive(Debug)]
pub enum VitrineError {
    /// GPU context initialization failure.
    #[cfg(feature = "viewer")]
    Gpu(RenderContextError),
    /// Failed to load or parse the exhibit asset.
    AssetLoad(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn a background thread.
    ThreadSpawn(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
    /// Screenshot capture or encoding failure.
    Screenshot(String),
}

impl fmt::Display for VitrineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "viewer")]
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::AssetLoad(msg) => write!(f, "asset load error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
            Self::Screenshot(msg) => write!(f, "screenshot error: {msg}"),
        }
    }
}

impl std::error::Error for VitrineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "viewer")]
            Self::Gpu(e) => Some(e),
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(feature = "viewer")]
impl From<RenderContextError> for VitrineError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for VitrineError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// A user operation that was rejected without touching session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionError {
    /// Saving an annotation with an empty title.
    EmptyTitle,
    /// Saving an annotation before a surface point was staged.
    NoStagedPosition,
    /// Index outside the annotation list.
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of annotations at the time of the request.
        len: usize,
    },
    /// Starting a tour with no annotations.
    NoAnnotations,
    /// A third measurement point before the session was cleared.
    MeasurementComplete,
    /// Surface interaction before the model finished loading.
    ModelNotLoaded,
}

impl fmt::Display for InteractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "please enter a title"),
            Self::NoStagedPosition => {
                write!(f, "click on the model to choose a position first")
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "annotation {index} does not exist ({len} total)")
            }
            Self::NoAnnotations => {
                write!(f, "no annotations available for a tour")
            }
            Self::MeasurementComplete => write!(
                f,
                "measurement already has two points; toggle measuring to \
                 start over"
            ),
            Self::ModelNotLoaded => write!(f, "the model is not loaded yet"),
        }
    }
}

impl std::error::Error for InteractionError {}
