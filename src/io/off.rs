//! OFF (Object File Format) support.
//!
//! The combined mesh format: an `OFF` header line, a counts line with the
//! vertex and face counts, then that many vertex records (x and y
//! coordinates; any further fields are ignored) and face records
//! (`3 v0 v1 v2`; only triangles are accepted). `#` comment lines may
//! appear anywhere. Twins are resolved by the hash builder, so the format
//! needs no adjacency records.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use nalgebra::Point2;

use crate::error::Result;
use crate::io::{load_error, parse_field, Records};
use crate::mesh::{build_from_triangles, MeshIndex, Triangulation};

/// Load a triangulation from an OFF file.
///
/// # Example
///
/// ```no_run
/// use hemline::io::off;
/// use hemline::mesh::Triangulation;
///
/// let t: Triangulation = off::load("mesh.off").unwrap();
/// ```
pub fn load<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<Triangulation<I>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let (points, tris) =
        parse(BufReader::new(file)).map_err(|message| load_error(path, message))?;
    build_from_triangles(&points, &tris)
}

type Parsed = (Vec<Point2<f64>>, Vec<[usize; 3]>);

fn parse<B: BufRead>(reader: B) -> std::result::Result<Parsed, String> {
    let mut records = Records::new(reader);

    let header = records.expect_record("OFF header")?;
    if header.split_whitespace().next() != Some("OFF") {
        return Err(format!("line {}: not an OFF file", records.line()));
    }

    let counts = records.expect_record("vertex and face counts")?;
    let mut fields = counts.split_whitespace();
    let line = records.line();
    let n_vertices: usize = match fields.next() {
        Some(tok) => parse_field(tok, line, "vertex count")?,
        None => return Err(format!("line {line}: missing vertex count")),
    };
    let n_faces: usize = match fields.next() {
        Some(tok) => parse_field(tok, line, "face count")?,
        None => return Err(format!("line {line}: missing face count")),
    };

    let mut points = Vec::with_capacity(n_vertices);
    for _ in 0..n_vertices {
        let record = records.expect_record("a vertex record")?;
        let line = records.line();
        let mut fields = record.split_whitespace();
        let mut coord = |what: &str| match fields.next() {
            Some(tok) => parse_field::<f64>(tok, line, what),
            None => Err(format!("line {line}: missing {what}")),
        };
        let x = coord("x coordinate")?;
        let y = coord("y coordinate")?;
        points.push(Point2::new(x, y));
    }

    let mut tris = Vec::with_capacity(n_faces);
    for _ in 0..n_faces {
        let record = records.expect_record("a face record")?;
        let line = records.line();
        let mut fields = record.split_whitespace();
        let mut index = |what: &str| match fields.next() {
            Some(tok) => parse_field::<usize>(tok, line, what),
            None => Err(format!("line {line}: missing {what}")),
        };
        let arity = index("face vertex count")?;
        if arity != 3 {
            return Err(format!("line {line}: face with {arity} vertices, only triangles are supported"));
        }
        tris.push([
            index("vertex index")?,
            index("vertex index")?,
            index("vertex index")?,
        ]);
    }

    Ok((points, tris))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = "\
OFF
# unit square, two triangles
4 2
0.0 0.0
1.0 0.0
1.0 1.0
0.0 1.0
3 0 1 2
3 0 2 3
";

    #[test]
    fn parses_square() {
        let (points, tris) = parse(SQUARE.as_bytes()).unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(tris, vec![[0, 1, 2], [0, 2, 3]]);
        assert_eq!(points[2], Point2::new(1.0, 1.0));

        let t: Triangulation<u32> = build_from_triangles(&points, &tris).unwrap();
        assert_eq!(t.num_halfedges(), 10);
    }

    #[test]
    fn ignores_extra_vertex_fields() {
        // Conventional OFF carries a z coordinate; it is ignored.
        let input = "OFF\n3 1\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n";
        let (points, tris) = parse(input.as_bytes()).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(tris.len(), 1);
    }

    #[test]
    fn comments_allowed_between_records() {
        let input = "# preamble\nOFF\n3 1\n0 0\n# middle\n1 0\n0 1\n3 0 1 2\n";
        let (points, tris) = parse(input.as_bytes()).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(tris.len(), 1);
    }

    #[test]
    fn rejects_wrong_header() {
        let err = parse("PLY\n3 1\n".as_bytes()).unwrap_err();
        assert!(err.contains("not an OFF file"));
    }

    #[test]
    fn rejects_non_triangle_face() {
        let input = "OFF\n4 1\n0 0\n1 0\n1 1\n0 1\n4 0 1 2 3\n";
        let err = parse(input.as_bytes()).unwrap_err();
        assert!(err.contains("only triangles"));
    }

    #[test]
    fn rejects_truncated_input() {
        let err = parse("OFF\n3 1\n0 0\n1 0\n".as_bytes()).unwrap_err();
        assert!(err.contains("unexpected end of input"));
    }

    #[test]
    fn rejects_bad_number() {
        let err = parse("OFF\n3 1\n0 zero\n1 0\n0 1\n3 0 1 2\n".as_bytes()).unwrap_err();
        assert!(err.contains("invalid y coordinate"));
    }
}
