//! Crate-level error types.

use std::fmt;

/// Errors produced by the somaview crate.
#[derive(Debug)]
pub enum SomaError {
    /// A face references a vertex index outside the mesh's vertex buffer.
    InvalidFace {
        /// Index of the offending face.
        face: usize,
        /// The out-of-range vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
    /// Region classification was requested with no predicates.
    EmptyRegionTable,
    /// No sub-view with this name is configured.
    UnknownView(String),
    /// No mesh is cached under this key.
    UnknownMesh(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for SomaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFace {
                face,
                index,
                vertex_count,
            } => write!(
                f,
                "face {face} references vertex {index} but the mesh has \
                 {vertex_count} vertices"
            ),
            Self::EmptyRegionTable => write!(f, "region table is empty"),
            Self::UnknownView(name) => write!(f, "unknown view: {name}"),
            Self::UnknownMesh(key) => write!(f, "unknown mesh: {key}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for SomaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SomaError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
