//! Explicit-neighbor triple format support.
//!
//! Three parallel record streams describe the triangulation:
//!
//! - `.node` — a count line, then one record per vertex:
//!   `id x y border-marker`
//! - `.ele` — a count line, then one record per triangle:
//!   `id v0 v1 v2`
//! - `.neigh` — a count line, then one record per triangle:
//!   `id n0 n1 n2`, where `nk` is the triangle adjacent across the edge
//!   opposite vertex `k` and `-1` marks a boundary edge
//!
//! Count lines may carry trailing header fields (dimension, attribute
//! counts), which are ignored, and `#` comment lines are skipped
//! anywhere. Record ids are ignored; records are taken in file order.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use nalgebra::Point2;

use crate::error::Result;
use crate::io::{load_error, parse_field, Records};
use crate::mesh::{build_with_neighbors, MeshIndex, Triangulation};

/// Load a triangulation from `.node`, `.ele` and `.neigh` files.
///
/// The neighbor table resolves all interior twins directly, so no edge
/// hashing takes place.
///
/// # Example
///
/// ```no_run
/// use hemline::io::tri;
/// use hemline::mesh::Triangulation;
///
/// let t: Triangulation = tri::load("mesh.node", "mesh.ele", "mesh.neigh").unwrap();
/// ```
pub fn load<I: MeshIndex>(
    node: impl AsRef<Path>,
    ele: impl AsRef<Path>,
    neigh: impl AsRef<Path>,
) -> Result<Triangulation<I>> {
    let node = node.as_ref();
    let (points, border) = parse_nodes(BufReader::new(File::open(node)?))
        .map_err(|message| load_error(node, message))?;

    let ele = ele.as_ref();
    let tris = parse_triangles(BufReader::new(File::open(ele)?))
        .map_err(|message| load_error(ele, message))?;

    let neigh = neigh.as_ref();
    let neighbors = parse_neighbors(BufReader::new(File::open(neigh)?))
        .map_err(|message| load_error(neigh, message))?;

    build_with_neighbors(&points, &border, &tris, &neighbors)
}

fn record_count<B: BufRead>(
    records: &mut Records<B>,
    what: &str,
) -> std::result::Result<usize, String> {
    let header = records.expect_record(what)?;
    let token = header
        .split_whitespace()
        .next()
        .ok_or_else(|| format!("line {}: missing {what}", records.line()))?;
    parse_field(token, records.line(), what)
}

fn parse_nodes<B: BufRead>(
    reader: B,
) -> std::result::Result<(Vec<Point2<f64>>, Vec<bool>), String> {
    let mut records = Records::new(reader);
    let count = record_count(&mut records, "vertex count")?;

    let mut points = Vec::with_capacity(count);
    let mut border = Vec::with_capacity(count);
    for _ in 0..count {
        let record = records.expect_record("a vertex record")?;
        let line = records.line();
        let fields: Vec<&str> = record.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(format!("line {line}: expected `id x y border-marker`"));
        }
        let x: f64 = parse_field(fields[1], line, "x coordinate")?;
        let y: f64 = parse_field(fields[2], line, "y coordinate")?;
        let marker: i64 = parse_field(fields[3], line, "border marker")?;
        points.push(Point2::new(x, y));
        border.push(marker == 1);
    }
    Ok((points, border))
}

fn parse_triangles<B: BufRead>(reader: B) -> std::result::Result<Vec<[usize; 3]>, String> {
    let mut records = Records::new(reader);
    let count = record_count(&mut records, "triangle count")?;

    let mut tris = Vec::with_capacity(count);
    for _ in 0..count {
        let record = records.expect_record("a triangle record")?;
        let line = records.line();
        let fields: Vec<&str> = record.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(format!("line {line}: expected `id v0 v1 v2`"));
        }
        tris.push([
            parse_field(fields[1], line, "vertex index")?,
            parse_field(fields[2], line, "vertex index")?,
            parse_field(fields[3], line, "vertex index")?,
        ]);
    }
    Ok(tris)
}

fn parse_neighbors<B: BufRead>(
    reader: B,
) -> std::result::Result<Vec<[Option<usize>; 3]>, String> {
    let mut records = Records::new(reader);
    let count = record_count(&mut records, "neighbor count")?;

    let mut neighbors = Vec::with_capacity(count);
    for _ in 0..count {
        let record = records.expect_record("a neighbor record")?;
        let line = records.line();
        let fields: Vec<&str> = record.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(format!("line {line}: expected `id n0 n1 n2`"));
        }
        let mut triple = [None; 3];
        for (slot, &token) in triple.iter_mut().zip(&fields[1..4]) {
            let n: i64 = parse_field(token, line, "neighbor index")?;
            *slot = if n < 0 { None } else { Some(n as usize) };
        }
        neighbors.push(triple);
    }
    Ok(neighbors)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NODE: &str = "\
# unit square
4 2 0 1
0 0.0 0.0 1
1 1.0 0.0 1
2 1.0 1.0 1
3 0.0 1.0 1
";

    const ELE: &str = "\
2 3 0
0 0 1 2
1 0 2 3
";

    const NEIGH: &str = "\
2 3
0 -1 1 -1
1 -1 -1 0
";

    #[test]
    fn parses_node_records() {
        let (points, border) = parse_nodes(NODE.as_bytes()).unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(points[1], Point2::new(1.0, 0.0));
        assert!(border.iter().all(|&b| b));
    }

    #[test]
    fn parses_triangle_and_neighbor_records() {
        let tris = parse_triangles(ELE.as_bytes()).unwrap();
        assert_eq!(tris, vec![[0, 1, 2], [0, 2, 3]]);

        let neighbors = parse_neighbors(NEIGH.as_bytes()).unwrap();
        assert_eq!(
            neighbors,
            vec![[None, Some(1), None], [None, None, Some(0)]]
        );
    }

    #[test]
    fn builds_square_from_parsed_records() {
        let (points, border) = parse_nodes(NODE.as_bytes()).unwrap();
        let tris = parse_triangles(ELE.as_bytes()).unwrap();
        let neighbors = parse_neighbors(NEIGH.as_bytes()).unwrap();

        let t: Triangulation<u32> =
            build_with_neighbors(&points, &border, &tris, &neighbors).unwrap();
        assert_eq!(t.num_faces(), 2);
        assert_eq!(t.num_halfedges(), 10);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn rejects_short_vertex_record() {
        let err = parse_nodes("1\n0 0.5 0.5\n".as_bytes()).unwrap_err();
        assert!(err.contains("border-marker"));
    }

    #[test]
    fn rejects_truncated_stream() {
        let err = parse_triangles("2\n0 0 1 2\n".as_bytes()).unwrap_err();
        assert!(err.contains("unexpected end of input"));
    }

    #[test]
    fn rejects_bad_neighbor_index() {
        let err = parse_neighbors("1\n0 x -1 -1\n".as_bytes()).unwrap_err();
        assert!(err.contains("invalid neighbor index"));
    }
}
