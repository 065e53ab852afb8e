//! Error types for hemline.
//!
//! This module defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur while building or loading a triangulation.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The input has no triangles.
    #[error("triangulation has no faces")]
    EmptyMesh,

    /// A triangle references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A triangle repeats a vertex index.
    #[error("face {face} is degenerate (has duplicate vertices)")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// A neighbor record names a triangle that does not share the edge.
    #[error("face {face} lists neighbor {neighbor} which does not share the edge")]
    InvalidNeighbor {
        /// The face whose neighbor record is wrong.
        face: usize,
        /// The neighbor index it names.
        neighbor: usize,
    },

    /// A directed edge appears in more than one triangle, so the input is
    /// non-manifold or inconsistently oriented.
    #[error("directed edge ({v0}, {v1}) appears in more than one face")]
    NonManifoldEdge {
        /// Tail vertex of the edge.
        v0: usize,
        /// Head vertex of the edge.
        v1: usize,
    },

    /// The finished structure violates a half-edge invariant.
    #[error("broken topology: {details}")]
    BrokenTopology {
        /// Description of the violated invariant.
        details: String,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reading a mesh file.
    #[error("failed to load mesh from {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Error writing a mesh file.
    #[error("failed to save mesh to {path}: {message}")]
    SaveError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },

    /// Invalid argument to a builder.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
