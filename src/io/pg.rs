//! Boundary-ordered adjacency export.
//!
//! The pg format lists every half-edge as an `origin target` pair,
//! grouped per vertex in counterclockwise fan order: the first line holds
//! the vertex count, the second the half-edge count, then each vertex's
//! outgoing half-edges follow in rotation order. For a boundary vertex
//! the fan starts at the outgoing half-edge whose twin is a border
//! half-edge, so the fan reads off the incident edges from one side of
//! the boundary gap to the other; interior fans start at the stored
//! incident half-edge.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{MeshError, Result};
use crate::mesh::{MeshIndex, Triangulation};

/// Save a triangulation in the pg format.
///
/// # Example
///
/// ```no_run
/// use hemline::io::pg;
/// use hemline::mesh::{build_from_triangles, Triangulation};
/// use nalgebra::Point2;
///
/// let points = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(0.5, 1.0),
/// ];
/// let t: Triangulation = build_from_triangles(&points, &[[0, 1, 2]]).unwrap();
/// pg::save(&t, "mesh.pg").unwrap();
/// ```
pub fn save<P: AsRef<Path>, I: MeshIndex>(mesh: &Triangulation<I>, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write(mesh, &mut writer).map_err(|e| MeshError::SaveError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Write the pg representation to any writer.
pub fn write<I: MeshIndex, W: Write>(
    mesh: &Triangulation<I>,
    writer: &mut W,
) -> std::io::Result<()> {
    writeln!(writer, "{}", mesh.num_vertices())?;
    writeln!(writer, "{}", mesh.num_halfedges())?;

    for v in mesh.vertex_ids() {
        let start = if mesh.is_border_vertex(v) {
            mesh.vertex_fan(v)
                .find(|&e| mesh.is_border_face(mesh.twin(e)))
                .unwrap_or_else(|| mesh.edge_of_vertex(v))
        } else {
            mesh.edge_of_vertex(v)
        };

        let mut e = start;
        loop {
            writeln!(
                writer,
                "{} {}",
                mesh.origin(e).index(),
                mesh.target(e).index()
            )?;
            e = mesh.ccw_edge_to_vertex(e);
            if e == start {
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::build_from_triangles;
    use nalgebra::Point2;

    fn square() -> Triangulation<u32> {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        build_from_triangles(&points, &[[0, 1, 2], [0, 2, 3]]).unwrap()
    }

    #[test]
    fn exports_square_fans_border_first() {
        let t = square();
        let mut out = Vec::new();
        write(&t, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let expected = "\
4
10
0 1
0 2
0 3
1 2
1 0
2 3
2 0
2 1
3 0
3 2
";
        assert_eq!(text, expected);
    }

    #[test]
    fn pair_count_matches_halfedge_count() {
        let t = square();
        let mut out = Vec::new();
        write(&t, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        let n_vertices: usize = lines.next().unwrap().parse().unwrap();
        let n_halfedges: usize = lines.next().unwrap().parse().unwrap();
        assert_eq!(n_vertices, t.num_vertices());
        assert_eq!(n_halfedges, t.num_halfedges());
        assert_eq!(lines.count(), n_halfedges);
    }

    #[test]
    fn border_vertices_start_at_the_boundary_gap() {
        let t = square();
        let mut out = Vec::new();
        write(&t, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        // Group pairs per origin vertex and check the first half-edge of
        // every fan has a border twin.
        for group in text.lines().skip(2).collect::<Vec<_>>().chunk_by(|a, b| {
            a.split_whitespace().next() == b.split_whitespace().next()
        }) {
            let first = group[0];
            let mut it = first.split_whitespace();
            let o: usize = it.next().unwrap().parse().unwrap();
            let target: usize = it.next().unwrap().parse().unwrap();
            let e = t
                .halfedge_ids()
                .find(|&e| t.origin(e).index() == o && t.target(e).index() == target)
                .unwrap();
            assert!(t.is_border_face(t.twin(e)));
        }
    }
}
