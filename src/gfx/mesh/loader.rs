//! # Model Loader
//!
//! Parses a line-oriented, face-indexed mesh format (`v` / `vt` / `vn` /
//! `f` directives with 1-based `v/vt/vn` references) into flat vertex and
//! index buffers ready for GPU upload.
//!
//! The loader runs once at startup and fails fast: malformed numbers and
//! out-of-range face references are surfaced as [`LoadError`] values instead
//! of producing silently wrong geometry. Faces must be strict triangles.
//!
//! Vertices are emitted fresh for every face corner — there is no welding of
//! shared corners — so the index buffer is always the identity permutation
//! `0..vertices.len()`. Deduplication is deliberately out of scope.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use super::vertex::Vertex;

/// Errors produced while loading a model source.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be opened or read.
    #[error("model source unavailable: {0}")]
    SourceUnavailable(#[source] std::io::Error),

    /// A directive carried a missing or non-numeric token.
    #[error("line {line}: malformed {what} value")]
    ParseError { line: usize, what: &'static str },

    /// A face referenced an entry outside the parsed attribute arrays.
    /// Indices are 1-based, so 0 is also out of range.
    #[error("line {line}: {what} index {index} out of range (1..={len})")]
    MalformedIndex {
        line: usize,
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// A face listed something other than exactly three vertex references.
    #[error("line {line}: face with {arity} vertices, only triangles are supported")]
    UnsupportedFaceArity { line: usize, arity: usize },
}

/// Flattened mesh data produced by [`load_mesh`].
///
/// `vertices` holds three records per face in file order and `indices` is
/// the matching identity index buffer; both are immutable after loading.
#[derive(Debug, Clone)]
pub struct MeshBuffers {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    /// Number of triangles described by the buffers.
    pub fn face_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Loads a model from a file path.
///
/// Convenience wrapper around [`load_mesh`]; a missing or unreadable file
/// maps to [`LoadError::SourceUnavailable`].
pub fn load_mesh_file(path: impl AsRef<Path>) -> Result<MeshBuffers, LoadError> {
    let file = File::open(path).map_err(LoadError::SourceUnavailable)?;
    load_mesh(BufReader::new(file))
}

/// Parses a model from any buffered reader.
///
/// Recognized directives are `v x y z`, `vt u v`, `vn x y z`, and
/// `f a/b/c a/b/c a/b/c`. Blank lines, `#` comments, and unknown directives
/// are skipped. Guarantees `vertices.len() == indices.len() == 3 * faces`
/// with `indices[i] == i` on success.
pub fn load_mesh(source: impl BufRead) -> Result<MeshBuffers, LoadError> {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut tex_coords: Vec<[f32; 2]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();

    let mut vertices: Vec<Vertex> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    let mut face_count = 0usize;

    for (line_index, line) in source.lines().enumerate() {
        let line = line.map_err(LoadError::SourceUnavailable)?;
        let line_number = line_index + 1;

        let mut tokens = line.split_whitespace();
        let Some(tag) = tokens.next() else {
            continue;
        };

        match tag {
            "v" => {
                positions.push([
                    parse_float(&mut tokens, line_number, "position")?,
                    parse_float(&mut tokens, line_number, "position")?,
                    parse_float(&mut tokens, line_number, "position")?,
                ]);
            }
            "vt" => {
                tex_coords.push([
                    parse_float(&mut tokens, line_number, "texcoord")?,
                    parse_float(&mut tokens, line_number, "texcoord")?,
                ]);
            }
            "vn" => {
                normals.push([
                    parse_float(&mut tokens, line_number, "normal")?,
                    parse_float(&mut tokens, line_number, "normal")?,
                    parse_float(&mut tokens, line_number, "normal")?,
                ]);
            }
            "f" => {
                let references: Vec<&str> = tokens.collect();
                if references.len() != 3 {
                    return Err(LoadError::UnsupportedFaceArity {
                        line: line_number,
                        arity: references.len(),
                    });
                }

                for reference in references {
                    let (v, t, n) = parse_face_reference(reference, line_number)?;
                    vertices.push(Vertex {
                        position: *resolve(&positions, v, line_number, "vertex")?,
                        normal: *resolve(&normals, n, line_number, "normal")?,
                        tex_coords: *resolve(&tex_coords, t, line_number, "texcoord")?,
                    });
                    indices.push(indices.len() as u32);
                }
                face_count += 1;
            }
            // Comments and foreign directives (o, g, s, mtllib, ...) are
            // not part of the supported format and are skipped.
            _ => {}
        }
    }

    log::info!(
        "model loaded: {} vertices, {} faces",
        vertices.len(),
        face_count
    );

    Ok(MeshBuffers { vertices, indices })
}

fn parse_float<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    line: usize,
    what: &'static str,
) -> Result<f32, LoadError> {
    tokens
        .next()
        .and_then(|token| token.parse().ok())
        .ok_or(LoadError::ParseError { line, what })
}

/// Splits an `a/b/c` face reference into its three 1-based indices.
fn parse_face_reference(
    reference: &str,
    line: usize,
) -> Result<(usize, usize, usize), LoadError> {
    let mut parts = reference.split('/');
    let v = parse_index(parts.next(), line)?;
    let t = parse_index(parts.next(), line)?;
    let n = parse_index(parts.next(), line)?;
    if parts.next().is_some() {
        return Err(LoadError::ParseError {
            line,
            what: "face reference",
        });
    }
    Ok((v, t, n))
}

fn parse_index(part: Option<&str>, line: usize) -> Result<usize, LoadError> {
    part.and_then(|token| token.parse().ok())
        .ok_or(LoadError::ParseError {
            line,
            what: "face reference",
        })
}

/// Converts a 1-based file index into a checked 0-based array access.
fn resolve<'a, T>(
    pool: &'a [T],
    index: usize,
    line: usize,
    what: &'static str,
) -> Result<&'a T, LoadError> {
    if index == 0 || index > pool.len() {
        return Err(LoadError::MalformedIndex {
            line,
            what,
            index,
            len: pool.len(),
        });
    }
    Ok(&pool[index - 1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TRIANGLE: &str = "\
v 1.0 2.0 3.0
v 4.0 5.0 6.0
v 7.0 8.0 9.0
vt 0.0 0.0
vt 1.0 0.0
vt 0.0 1.0
vn 0.0 1.0 0.0
vn 1.0 0.0 0.0
vn 0.0 0.0 1.0
f 1/1/1 2/2/2 3/3/3
";

    fn load(source: &str) -> Result<MeshBuffers, LoadError> {
        load_mesh(Cursor::new(source))
    }

    #[test]
    fn triangle_produces_three_vertices_and_identity_indices() {
        let buffers = load(TRIANGLE).unwrap();
        assert_eq!(buffers.vertices.len(), 3);
        assert_eq!(buffers.indices.len(), 3);
        assert_eq!(buffers.face_count(), 1);
        for (i, index) in buffers.indices.iter().enumerate() {
            assert_eq!(*index as usize, i);
        }
    }

    #[test]
    fn face_references_dereference_the_right_attributes() {
        let buffers = load(TRIANGLE).unwrap();
        let first = buffers.vertices[0];
        assert_eq!(first.position, [1.0, 2.0, 3.0]);
        assert_eq!(first.tex_coords, [0.0, 0.0]);
        assert_eq!(first.normal, [0.0, 1.0, 0.0]);

        let second = buffers.vertices[1];
        assert_eq!(second.position, [4.0, 5.0, 6.0]);
        assert_eq!(second.tex_coords, [1.0, 0.0]);
        assert_eq!(second.normal, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn vertex_count_scales_with_face_count() {
        // Two faces over shared attributes: no welding, six fresh vertices.
        let source = format!("{TRIANGLE}f 3/3/3 2/2/2 1/1/1\n");
        let buffers = load(&source).unwrap();
        assert_eq!(buffers.vertices.len(), 6);
        assert_eq!(buffers.indices.len(), 6);
        assert_eq!(buffers.face_count(), 2);
        assert_eq!(buffers.indices, vec![0, 1, 2, 3, 4, 5]);
        // Shared corners are distinct records with equal contents.
        assert_eq!(buffers.vertices[0], buffers.vertices[5]);
    }

    #[test]
    fn quad_faces_are_rejected() {
        let source = format!("{TRIANGLE}f 1/1/1 2/2/2 3/3/3 1/1/1\n");
        match load(&source) {
            Err(LoadError::UnsupportedFaceArity { line: 11, arity: 4 }) => {}
            other => panic!("expected UnsupportedFaceArity, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_face_index_is_rejected() {
        let source = format!("{TRIANGLE}f 1/1/1 2/2/2 9/3/3\n");
        match load(&source) {
            Err(LoadError::MalformedIndex {
                what: "vertex",
                index: 9,
                len: 3,
                ..
            }) => {}
            other => panic!("expected MalformedIndex, got {other:?}"),
        }
    }

    #[test]
    fn zero_face_index_is_rejected() {
        // Indices are 1-based; 0 never refers to anything.
        let source = format!("{TRIANGLE}f 0/1/1 2/2/2 3/3/3\n");
        assert!(matches!(
            load(&source),
            Err(LoadError::MalformedIndex { index: 0, .. })
        ));
    }

    #[test]
    fn malformed_position_fails_fast() {
        let result = load("v 1.0 abc 3.0\n");
        match result {
            Err(LoadError::ParseError {
                line: 1,
                what: "position",
            }) => {}
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn missing_texcoord_component_fails_fast() {
        assert!(matches!(
            load("vt 0.5\n"),
            Err(LoadError::ParseError { what: "texcoord", .. })
        ));
    }

    #[test]
    fn incomplete_face_reference_fails_fast() {
        let source = format!("{TRIANGLE}f 1/1 2/2/2 3/3/3\n");
        assert!(matches!(
            load(&source),
            Err(LoadError::ParseError {
                what: "face reference",
                ..
            })
        ));
    }

    #[test]
    fn comments_blanks_and_foreign_directives_are_ignored() {
        let source = format!(
            "# exported by hand\n\no cube\ns off\nmtllib cube.mtl\n{TRIANGLE}"
        );
        let buffers = load(&source).unwrap();
        assert_eq!(buffers.vertices.len(), 3);
        assert_eq!(buffers.face_count(), 1);
    }

    #[test]
    fn missing_file_reports_source_unavailable() {
        match load_mesh_file("does/not/exist.obj") {
            Err(LoadError::SourceUnavailable(_)) => {}
            other => panic!("expected SourceUnavailable, got {other:?}"),
        }
    }
}
