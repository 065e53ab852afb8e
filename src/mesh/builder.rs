//! Triangulation construction.
//!
//! Two builders populate the half-edge store from raw triangle lists:
//! [`build_with_neighbors`] consumes an explicit per-triangle neighbor
//! table, while [`build_from_triangles`] discovers twins by hashing
//! directed edges. Both end with the same boundary synthesis pass, which
//! appends one exterior half-edge per unmatched boundary edge and links
//! the boundary loop(s), and both validate the finished structure before
//! returning it.

use std::collections::HashMap;

use nalgebra::Point2;

use super::halfedge::{Face, HalfEdge, Triangulation, Vertex};
use super::index::{FaceId, HalfEdgeId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};

/// Build a triangulation from points and a bare triangle list.
///
/// Twins are resolved by inserting every directed edge into a map and
/// probing for its reverse: a shared edge appears with opposite
/// orientation in its two incident triangles whenever the input is a
/// consistently oriented manifold triangulation. Unmatched edges lie on
/// the domain boundary and receive exterior twins.
///
/// # Errors
///
/// Fails on an empty triangle list, an out-of-range vertex index, a
/// triangle with repeated vertices, a directed edge shared by two
/// triangles (non-manifold or inconsistently oriented input), or a
/// finished structure that does not satisfy the half-edge invariants.
///
/// # Example
/// ```
/// use hemline::mesh::{build_from_triangles, Triangulation};
/// use nalgebra::Point2;
///
/// let points = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(0.5, 1.0),
/// ];
/// let tris = vec![[0, 1, 2]];
///
/// let t: Triangulation = build_from_triangles(&points, &tris).unwrap();
/// assert_eq!(t.num_faces(), 1);
/// assert_eq!(t.num_halfedges(), 6);
/// ```
pub fn build_from_triangles<I: MeshIndex>(
    points: &[Point2<f64>],
    tris: &[[usize; 3]],
) -> Result<Triangulation<I>> {
    check_triangles(points.len(), tris)?;
    let mut mesh = emit_interior(points, tris);

    // Directed edge -> half-edge index. The map is append-only until every
    // interior half-edge exists.
    let mut edge_map: HashMap<(usize, usize), HalfEdgeId<I>> =
        HashMap::with_capacity(3 * tris.len());
    for (i, tri) in tris.iter().enumerate() {
        for k in 0..3 {
            let key = (tri[k], tri[(k + 1) % 3]);
            if edge_map.insert(key, HalfEdgeId::new(3 * i + k)).is_some() {
                return Err(MeshError::NonManifoldEdge {
                    v0: key.0,
                    v1: key.1,
                });
            }
        }
    }

    for idx in 0..mesh.num_halfedges() {
        let e = HalfEdgeId::new(idx);
        if mesh.twin(e).is_valid() {
            continue;
        }
        let o = mesh.origin(e);
        let t = mesh.target(e);
        match edge_map.get(&(t.index(), o.index())) {
            Some(&m) => {
                mesh.halfedge_mut(e).twin = m;
                mesh.halfedge_mut(m).twin = e;
            }
            None => {
                mesh.halfedge_mut(e).border = true;
                mesh.vertex_mut(o).border = true;
                mesh.vertex_mut(t).border = true;
            }
        }
    }

    synthesize_boundary(&mut mesh);
    mesh.validate()?;
    Ok(mesh)
}

/// Build a triangulation from points, triangles and a neighbor table.
///
/// `neighbors[i][k]` is the triangle adjacent to triangle `i` across the
/// edge opposite vertex `k`, or `None` for a boundary edge (the `-1`
/// sentinel of the on-disk format). `border_flags` carries the per-vertex
/// boundary markers of the vertex records; construction may additionally
/// mark vertices that sit on unmatched edges, never clear them.
///
/// # Errors
///
/// Fails on the same input defects as [`build_from_triangles`], on slice
/// length mismatches, and on a neighbor record naming a triangle that
/// does not share the reversed edge.
pub fn build_with_neighbors<I: MeshIndex>(
    points: &[Point2<f64>],
    border_flags: &[bool],
    tris: &[[usize; 3]],
    neighbors: &[[Option<usize>; 3]],
) -> Result<Triangulation<I>> {
    if border_flags.len() != points.len() {
        return Err(MeshError::invalid_param(
            "border_flags",
            border_flags.len(),
            "must have one entry per point",
        ));
    }
    if neighbors.len() != tris.len() {
        return Err(MeshError::invalid_param(
            "neighbors",
            neighbors.len(),
            "must have one triple per triangle",
        ));
    }
    check_triangles(points.len(), tris)?;

    let mut mesh = emit_interior(points, tris);
    for (v, &flag) in border_flags.iter().enumerate() {
        mesh.vertex_mut(VertexId::new(v)).border = flag;
    }

    for (i, tri) in tris.iter().enumerate() {
        for k in 0..3 {
            let e = HalfEdgeId::new(3 * i + k);
            let origin = tri[k];
            let target = tri[(k + 1) % 3];
            // The neighbor across this edge is the one opposite the
            // remaining vertex of the triangle.
            match neighbors[i][(k + 2) % 3] {
                Some(n) => {
                    let twin = twin_in_neighbor(tris, i, n, origin, target)?;
                    mesh.halfedge_mut(e).twin = twin;
                }
                None => {
                    mesh.halfedge_mut(e).border = true;
                    mesh.vertex_mut(VertexId::new(origin)).border = true;
                    mesh.vertex_mut(VertexId::new(target)).border = true;
                }
            }
        }
    }

    synthesize_boundary(&mut mesh);
    mesh.validate()?;
    Ok(mesh)
}

/// Locate the half-edge of triangle `n` running `target -> origin`.
/// A triangle has three sides, so the scan is O(1).
fn twin_in_neighbor<I: MeshIndex>(
    tris: &[[usize; 3]],
    face: usize,
    n: usize,
    origin: usize,
    target: usize,
) -> Result<HalfEdgeId<I>> {
    let sides = tris.get(n).ok_or(MeshError::InvalidNeighbor {
        face,
        neighbor: n,
    })?;
    for j in 0..3 {
        if sides[j] == target && sides[(j + 1) % 3] == origin {
            return Ok(HalfEdgeId::new(3 * n + j));
        }
    }
    Err(MeshError::InvalidNeighbor { face, neighbor: n })
}

fn check_triangles(num_points: usize, tris: &[[usize; 3]]) -> Result<()> {
    if tris.is_empty() {
        return Err(MeshError::EmptyMesh);
    }
    for (fi, tri) in tris.iter().enumerate() {
        for &vi in tri {
            if vi >= num_points {
                return Err(MeshError::InvalidVertexIndex {
                    face: fi,
                    vertex: vi,
                });
            }
        }
        if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
            return Err(MeshError::DegenerateFace { face: fi });
        }
    }
    Ok(())
}

/// First wave: vertices, then three half-edges per triangle with fixed
/// next/prev links, grouped as `3i, 3i+1, 3i+2`, plus one representative
/// half-edge per face. Each vertex keeps the last half-edge seen with it
/// as origin; any outgoing half-edge satisfies the invariant.
fn emit_interior<I: MeshIndex>(
    points: &[Point2<f64>],
    tris: &[[usize; 3]],
) -> Triangulation<I> {
    let mut mesh = Triangulation::with_capacity(points.len(), tris.len());
    for &p in points {
        mesh.vertices.push(Vertex::new(p));
    }

    for (i, tri) in tris.iter().enumerate() {
        let base = 3 * i;
        for k in 0..3 {
            let origin = VertexId::new(tri[k]);
            mesh.halfedges.push(HalfEdge {
                origin,
                target: VertexId::new(tri[(k + 1) % 3]),
                twin: HalfEdgeId::invalid(),
                next: HalfEdgeId::new(base + (k + 1) % 3),
                prev: HalfEdgeId::new(base + (k + 2) % 3),
                face: FaceId::new(i),
                border: false,
            });
            mesh.vertex_mut(origin).halfedge = HalfEdgeId::new(base + k);
        }
        mesh.faces.push(Face::new(HalfEdgeId::new(base)));
    }
    mesh
}

/// Second wave: give every border half-edge an exterior twin and close the
/// boundary loop(s).
///
/// Pass 1 appends, for each interior half-edge still flagged border, an
/// exterior half-edge with the endpoints swapped and moves the border flag
/// onto it. Pass 2 links next/prev among the exterior half-edges through a
/// side table keyed by origin vertex, which keeps the stitching O(k) for k
/// boundary edges.
fn synthesize_boundary<I: MeshIndex>(mesh: &mut Triangulation<I>) {
    let n_interior = mesh.num_halfedges();

    for idx in 0..n_interior {
        let e = HalfEdgeId::new(idx);
        if !mesh.halfedge(e).border {
            continue;
        }
        let ext = HalfEdgeId::new(mesh.num_halfedges());
        let o = mesh.origin(e);
        let t = mesh.target(e);
        mesh.halfedges.push(HalfEdge {
            origin: t,
            target: o,
            twin: e,
            next: HalfEdgeId::invalid(),
            prev: HalfEdgeId::invalid(),
            face: FaceId::invalid(),
            border: true,
        });
        let he = mesh.halfedge_mut(e);
        he.border = false;
        he.twin = ext;
        mesh.vertex_mut(o).border = true;
        mesh.vertex_mut(t).border = true;
    }

    let mut outgoing: HashMap<usize, HalfEdgeId<I>> = HashMap::new();
    for idx in n_interior..mesh.num_halfedges() {
        let e = HalfEdgeId::new(idx);
        outgoing.insert(mesh.origin(e).index(), e);
    }
    for idx in n_interior..mesh.num_halfedges() {
        let e = HalfEdgeId::new(idx);
        if let Some(&n) = outgoing.get(&mesh.target(e).index()) {
            mesh.halfedge_mut(e).next = n;
            mesh.halfedge_mut(n).prev = e;
        }
    }
}
