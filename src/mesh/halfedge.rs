//! Half-edge triangulation data structure.
//!
//! This module provides a half-edge (doubly-connected edge list)
//! representation for planar triangulations. Every cross-reference is an
//! index into a flat array, and the structure is built once by
//! [`build_from_triangles`](crate::mesh::build_from_triangles) or
//! [`build_with_neighbors`](crate::mesh::build_with_neighbors) and only
//! queried afterwards.
//!
//! # Structure
//!
//! - Each undirected edge is split into two **half-edges** pointing in
//!   opposite directions, each knowing its **twin**, **next** and **prev**
//!   half-edge within its face, its **origin** and **target** vertex, and
//!   its incident face
//! - Each vertex stores one outgoing half-edge and a boundary flag
//! - Each face stores one representative half-edge
//!
//! # Boundary handling
//!
//! Every boundary edge of the domain gets an extra *exterior* half-edge
//! belonging to the synthetic outer region: its face is the sentinel, its
//! border flag is set, and `next`/`prev` restricted to the exterior
//! half-edges walk the boundary loop(s) of the domain.

use nalgebra::Point2;

use super::index::{FaceId, HalfEdgeId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};

/// A vertex of the triangulation.
#[derive(Debug, Clone)]
pub struct Vertex<I: MeshIndex = u32> {
    /// Position in the plane.
    pub position: Point2<f64>,

    /// True if the vertex lies on the domain boundary.
    pub border: bool,

    /// One outgoing half-edge whose origin is this vertex.
    pub halfedge: HalfEdgeId<I>,
}

impl<I: MeshIndex> Vertex<I> {
    /// Create a vertex at the given position, off the boundary, with no
    /// incident half-edge yet.
    pub fn new(position: Point2<f64>) -> Self {
        Self {
            position,
            border: false,
            halfedge: HalfEdgeId::invalid(),
        }
    }

    /// Create a vertex from coordinates.
    pub fn from_coords(x: f64, y: f64) -> Self {
        Self::new(Point2::new(x, y))
    }
}

/// A half-edge of the triangulation.
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge<I: MeshIndex = u32> {
    /// Tail vertex.
    pub origin: VertexId<I>,

    /// Head vertex.
    pub target: VertexId<I>,

    /// The opposite half-edge of the same undirected edge.
    pub twin: HalfEdgeId<I>,

    /// Next half-edge of the same face (counterclockwise).
    pub next: HalfEdgeId<I>,

    /// Previous half-edge of the same face (clockwise).
    pub prev: HalfEdgeId<I>,

    /// Incident face, or the sentinel for the outer region.
    pub face: FaceId<I>,

    /// True if the half-edge belongs to the outer region.
    ///
    /// During construction the flag is set transiently on interior
    /// half-edges whose twin has not been matched; the boundary
    /// synthesizer moves it onto the exterior copies.
    pub border: bool,
}

impl<I: MeshIndex> HalfEdge<I> {
    /// Create an unlinked half-edge.
    pub fn new() -> Self {
        Self {
            origin: VertexId::invalid(),
            target: VertexId::invalid(),
            twin: HalfEdgeId::invalid(),
            next: HalfEdgeId::invalid(),
            prev: HalfEdgeId::invalid(),
            face: FaceId::invalid(),
            border: false,
        }
    }
}

impl<I: MeshIndex> Default for HalfEdge<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// A face of the triangulation, stored as one representative half-edge.
///
/// The face list lets callers visit each triangle exactly once even though
/// it owns three half-edges.
#[derive(Debug, Clone, Copy)]
pub struct Face<I: MeshIndex = u32> {
    /// One half-edge on the cycle of this face.
    pub halfedge: HalfEdgeId<I>,
}

impl<I: MeshIndex> Face<I> {
    /// Create a face from its representative half-edge.
    pub fn new(halfedge: HalfEdgeId<I>) -> Self {
        Self { halfedge }
    }
}

/// A half-edge mesh over a planar triangulation.
///
/// Built once by [`build_from_triangles`](crate::mesh::build_from_triangles)
/// or [`build_with_neighbors`](crate::mesh::build_with_neighbors), then
/// immutable: the public API takes `&self` only, so a finished value can be
/// shared freely across threads.
#[derive(Debug, Clone)]
pub struct Triangulation<I: MeshIndex = u32> {
    pub(crate) vertices: Vec<Vertex<I>>,
    pub(crate) halfedges: Vec<HalfEdge<I>>,
    pub(crate) faces: Vec<Face<I>>,
}

impl<I: MeshIndex> Triangulation<I> {
    pub(crate) fn with_capacity(num_vertices: usize, num_faces: usize) -> Self {
        // 3 interior half-edges per face plus an exterior fringe.
        let num_halfedges = num_faces * 3 + num_faces / 2;
        Self {
            vertices: Vec::with_capacity(num_vertices),
            halfedges: Vec::with_capacity(num_halfedges),
            faces: Vec::with_capacity(num_faces),
        }
    }

    // ==================== Accessors ====================

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of half-edges, exterior ones included.
    #[inline]
    pub fn num_halfedges(&self) -> usize {
        self.halfedges.len()
    }

    /// Number of interior faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Get a vertex record. Panics on an out-of-range index.
    #[inline]
    pub fn vertex(&self, v: VertexId<I>) -> &Vertex<I> {
        &self.vertices[v.index()]
    }

    #[inline]
    pub(crate) fn vertex_mut(&mut self, v: VertexId<I>) -> &mut Vertex<I> {
        &mut self.vertices[v.index()]
    }

    /// Get a half-edge record. Panics on an out-of-range index.
    #[inline]
    pub fn halfedge(&self, e: HalfEdgeId<I>) -> &HalfEdge<I> {
        &self.halfedges[e.index()]
    }

    #[inline]
    pub(crate) fn halfedge_mut(&mut self, e: HalfEdgeId<I>) -> &mut HalfEdge<I> {
        &mut self.halfedges[e.index()]
    }

    /// Get a face record. Panics on an out-of-range index.
    #[inline]
    pub fn face(&self, f: FaceId<I>) -> &Face<I> {
        &self.faces[f.index()]
    }

    /// Position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point2<f64> {
        &self.vertex(v).position
    }

    // ==================== Navigation ====================

    /// Tail vertex of a half-edge.
    #[inline]
    pub fn origin(&self, e: HalfEdgeId<I>) -> VertexId<I> {
        self.halfedge(e).origin
    }

    /// Head vertex of a half-edge.
    #[inline]
    pub fn target(&self, e: HalfEdgeId<I>) -> VertexId<I> {
        self.halfedge(e).target
    }

    /// The opposite half-edge of the same undirected edge.
    #[inline]
    pub fn twin(&self, e: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(e).twin
    }

    /// Next half-edge of the same face, counterclockwise.
    #[inline]
    pub fn next(&self, e: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(e).next
    }

    /// Previous half-edge of the same face, clockwise.
    #[inline]
    pub fn prev(&self, e: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(e).prev
    }

    /// Incident face index, or the sentinel for exterior half-edges.
    #[inline]
    pub fn face_of(&self, e: HalfEdgeId<I>) -> FaceId<I> {
        self.halfedge(e).face
    }

    /// True if the half-edge belongs to the synthetic outer region.
    #[inline]
    pub fn is_border_face(&self, e: HalfEdgeId<I>) -> bool {
        self.halfedge(e).border
    }

    /// True if the half-edge belongs to an interior triangle.
    #[inline]
    pub fn is_interior_face(&self, e: HalfEdgeId<I>) -> bool {
        !self.is_border_face(e)
    }

    /// True if the vertex lies on the domain boundary.
    #[inline]
    pub fn is_border_vertex(&self, v: VertexId<I>) -> bool {
        self.vertex(v).border
    }

    /// One outgoing half-edge whose origin is `v`.
    #[inline]
    pub fn edge_of_vertex(&self, v: VertexId<I>) -> HalfEdgeId<I> {
        self.vertex(v).halfedge
    }

    /// The next outgoing half-edge around the origin of `e`, rotating
    /// counterclockwise.
    ///
    /// Repeated application visits every half-edge sharing `e`'s origin
    /// exactly once before returning to `e`. On an interior face the
    /// rotation advances two `next` steps (reaching the in-triangle
    /// half-edge whose target is the origin) and takes its twin; an
    /// exterior half-edge has no triangle to advance within, so the
    /// rotation takes `prev` then its twin instead.
    pub fn ccw_edge_to_vertex(&self, e: HalfEdgeId<I>) -> HalfEdgeId<I> {
        if self.is_border_face(e) {
            return self.twin(self.prev(e));
        }
        self.twin(self.next(self.next(e)))
    }

    /// The next outgoing half-edge around the origin of `e`, rotating
    /// clockwise.
    ///
    /// This is the exact inverse of [`ccw_edge_to_vertex`] for every
    /// half-edge, exterior ones included: the boundary loop links make
    /// `next(twin(e))` land on the right outgoing edge without a special
    /// case.
    ///
    /// [`ccw_edge_to_vertex`]: Self::ccw_edge_to_vertex
    pub fn cw_edge_to_vertex(&self, e: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.next(self.twin(e))
    }

    /// The vertex triple of the triangle incident to `e`, by walking
    /// `next` until returning to `e`'s origin.
    ///
    /// `e` must be an interior half-edge; exterior half-edges have no
    /// triangle and the walk panics.
    pub fn incident_face(&self, e: HalfEdgeId<I>) -> [VertexId<I>; 3] {
        let first = self.origin(e);
        let mut triangle = [VertexId::invalid(); 3];
        let mut walk = e;
        let mut i = 0;
        loop {
            walk = self.next(walk);
            let v = self.origin(walk);
            triangle[i] = v;
            if v == first {
                break;
            }
            i += 1;
        }
        triangle
    }

    /// Orientation test: true if the triangle's vertices wind
    /// counterclockwise (positive signed area).
    pub fn is_counterclockwise(&self, triangle: [VertexId<I>; 3]) -> bool {
        let p0 = self.position(triangle[0]);
        let p1 = self.position(triangle[1]);
        let p2 = self.position(triangle[2]);
        (p1 - p0).perp(&(p2 - p0)) > 0.0
    }

    /// Euclidean length of a half-edge.
    pub fn edge_length(&self, e: HalfEdgeId<I>) -> f64 {
        (self.position(self.target(e)) - self.position(self.origin(e))).norm()
    }

    /// Degree of a vertex: the number of outgoing half-edges.
    pub fn valence(&self, v: VertexId<I>) -> usize {
        self.vertex_fan(v).count()
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex ids.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.vertices.len()).map(VertexId::new)
    }

    /// Iterate over all half-edge ids, exterior ones included.
    pub fn halfedge_ids(&self) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        (0..self.halfedges.len()).map(HalfEdgeId::new)
    }

    /// Iterate over all face ids.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        (0..self.faces.len()).map(FaceId::new)
    }

    /// Iterate over the outgoing half-edges of `v` in counterclockwise
    /// fan order, starting from the stored incident half-edge.
    pub fn vertex_fan(&self, v: VertexId<I>) -> VertexFanIter<'_, I> {
        VertexFanIter::new(self, v)
    }

    // ==================== Validation ====================

    /// Check every structural invariant of the finished triangulation.
    ///
    /// Run by the builders before a value is returned; exposed so callers
    /// holding a triangulation from an untrusted source can re-check it.
    pub fn validate(&self) -> Result<()> {
        let fail = |details: String| Err(MeshError::BrokenTopology { details });

        let mut n_border = 0usize;
        for e in self.halfedge_ids() {
            let he = self.halfedge(e);
            if !(he.twin.is_valid() && he.next.is_valid() && he.prev.is_valid()) {
                return fail(format!("half-edge {:?} has unlinked references", e));
            }
            if self.twin(he.twin) != e {
                return fail(format!("twin of twin of {:?} is not itself", e));
            }
            if self.origin(he.twin) != he.target || self.target(he.twin) != he.origin {
                return fail(format!("{:?} and its twin disagree on endpoints", e));
            }
            if self.next(he.prev) != e || self.prev(he.next) != e {
                return fail(format!("next/prev around {:?} do not invert", e));
            }
            if self.origin(he.next) != he.target {
                return fail(format!("{:?} does not chain into its next", e));
            }
            if he.border != !he.face.is_valid() {
                return fail(format!("{:?} border flag disagrees with its face", e));
            }
            if he.border {
                n_border += 1;
                if !self.is_border_face(he.next) {
                    return fail(format!("border cycle leaves the boundary at {:?}", e));
                }
            } else {
                if self.next(self.next(he.next)) != e {
                    return fail(format!("face cycle through {:?} is not a triangle", e));
                }
                if self.face_of(he.next) != he.face {
                    return fail(format!("{:?} and its next lie in different faces", e));
                }
            }
        }

        if self.num_halfedges() != 3 * self.num_faces() + n_border {
            return fail(format!(
                "{} half-edges for {} faces and {} boundary edges",
                self.num_halfedges(),
                self.num_faces(),
                n_border
            ));
        }

        for f in self.face_ids() {
            let rep = self.face(f).halfedge;
            if !rep.is_valid() || self.face_of(rep) != f {
                return fail(format!("face {:?} has a stray representative", f));
            }
        }

        let mut on_border = vec![false; self.num_vertices()];
        for e in self.halfedge_ids() {
            if self.is_border_face(e) {
                on_border[self.origin(e).index()] = true;
            }
        }
        for v in self.vertex_ids() {
            let vr = self.vertex(v);
            if !vr.halfedge.is_valid() {
                return fail(format!("vertex {:?} has no incident half-edge", v));
            }
            if self.origin(vr.halfedge) != v {
                return fail(format!("incident half-edge of {:?} starts elsewhere", v));
            }
            if vr.border != on_border[v.index()] {
                return fail(format!(
                    "vertex {:?} border flag disagrees with incident half-edges",
                    v
                ));
            }
        }

        Ok(())
    }
}

/// Iterator over the outgoing half-edges of a vertex in counterclockwise
/// order.
pub struct VertexFanIter<'a, I: MeshIndex = u32> {
    mesh: &'a Triangulation<I>,
    start: HalfEdgeId<I>,
    current: HalfEdgeId<I>,
    done: bool,
}

impl<'a, I: MeshIndex> VertexFanIter<'a, I> {
    fn new(mesh: &'a Triangulation<I>, v: VertexId<I>) -> Self {
        let start = mesh.edge_of_vertex(v);
        Self {
            mesh,
            start,
            current: start,
            done: !start.is_valid(),
        }
    }
}

impl<'a, I: MeshIndex> Iterator for VertexFanIter<'a, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.current;
        self.current = self.mesh.ccw_edge_to_vertex(self.current);
        if self.current == self.start {
            self.done = true;
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::build_from_triangles;

    fn square() -> Triangulation<u32> {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let tris = vec![[0, 1, 2], [0, 2, 3]];
        build_from_triangles(&points, &tris).unwrap()
    }

    #[test]
    fn vertex_creation() {
        let v = Vertex::<u32>::from_coords(2.0, -1.0);
        assert_eq!(v.position, Point2::new(2.0, -1.0));
        assert!(!v.border);
        assert!(!v.halfedge.is_valid());
    }

    #[test]
    fn navigation_field_reads() {
        let t = square();
        for e in t.halfedge_ids() {
            assert_eq!(t.origin(e), t.target(t.twin(e)));
            assert_eq!(t.target(e), t.origin(t.twin(e)));
            assert_eq!(t.twin(t.twin(e)), e);
            assert_eq!(t.next(t.prev(e)), e);
            assert_eq!(t.prev(t.next(e)), e);
        }
    }

    #[test]
    fn ccw_fan_visits_each_outgoing_edge_once() {
        let t = square();
        for v in t.vertex_ids() {
            let fan: Vec<_> = t.vertex_fan(v).collect();
            let degree = t
                .halfedge_ids()
                .filter(|&e| t.origin(e) == v)
                .count();
            assert_eq!(fan.len(), degree);
            assert_eq!(t.valence(v), degree);
            for &e in &fan {
                assert_eq!(t.origin(e), v);
            }
            let mut sorted = fan.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), fan.len());
        }
    }

    #[test]
    fn cw_inverts_ccw_including_border_edges() {
        let t = square();
        for e in t.halfedge_ids() {
            assert_eq!(t.cw_edge_to_vertex(t.ccw_edge_to_vertex(e)), e);
            assert_eq!(t.ccw_edge_to_vertex(t.cw_edge_to_vertex(e)), e);
        }
    }

    #[test]
    fn incident_face_recovers_triangle() {
        let t = square();
        for f in t.face_ids() {
            let rep = t.face(f).halfedge;
            let tri = t.incident_face(rep);
            // Walk order puts the origin of `rep` last.
            assert_eq!(tri[2], t.origin(rep));
            assert!(t.is_counterclockwise(tri));
        }
    }

    #[test]
    fn orientation_predicate() {
        let t = square();
        let ccw = [VertexId::new(0), VertexId::new(1), VertexId::new(2)];
        let cw = [VertexId::new(2), VertexId::new(1), VertexId::new(0)];
        assert!(t.is_counterclockwise(ccw));
        assert!(!t.is_counterclockwise(cw));
    }

    #[test]
    fn edge_length_matches_geometry() {
        let t = square();
        let diagonal = t
            .halfedge_ids()
            .find(|&e| t.origin(e).index() == 0 && t.target(e).index() == 2)
            .unwrap();
        assert!((t.edge_length(diagonal) - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn validate_accepts_built_square() {
        assert!(square().validate().is_ok());
    }

    #[test]
    fn validate_rejects_tampering() {
        let mut t = square();
        let e = HalfEdgeId::new(0);
        let bad = t.twin(HalfEdgeId::new(1));
        t.halfedge_mut(e).twin = bad;
        assert!(matches!(
            t.validate(),
            Err(MeshError::BrokenTopology { .. })
        ));
    }
}
