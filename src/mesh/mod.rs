//! Core triangulation data structures.
//!
//! The primary type is [`Triangulation`], a half-edge (doubly-connected
//! edge list) representation of a planar triangulation with O(1)
//! adjacency queries. A triangulation is built once by
//! [`build_from_triangles`] or [`build_with_neighbors`] and is immutable
//! afterwards.
//!
//! # Index types
//!
//! Mesh elements are identified by type-safe index wrappers —
//! [`VertexId`], [`HalfEdgeId`] and [`FaceId`] — generic over the
//! underlying integer type (the [`MeshIndex`] trait: `u16`, `u32` or
//! `u64`), with a reserved sentinel standing in for "no twin yet" and
//! the synthetic outer region.
//!
//! # Construction
//!
//! ```
//! use hemline::mesh::{build_from_triangles, Triangulation};
//! use nalgebra::Point2;
//!
//! let points = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(0.5, 1.0),
//! ];
//! let tris = vec![[0, 1, 2]];
//!
//! let t: Triangulation = build_from_triangles(&points, &tris).unwrap();
//! assert_eq!(t.num_vertices(), 3);
//! ```

mod builder;
mod halfedge;
mod index;

pub use builder::{build_from_triangles, build_with_neighbors};
pub use halfedge::{Face, HalfEdge, Triangulation, Vertex, VertexFanIter};
pub use index::{FaceId, HalfEdgeId, MeshIndex, VertexId};
