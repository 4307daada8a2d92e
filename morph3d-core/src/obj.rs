/// Wavefront OBJ reader for vertex, vertex-normal and face records
use std::fs;
use std::path::Path;

use nalgebra::{Point3, Vector3};
use nom::{
    character::complete::{char, digit1, space0, space1},
    combinator::{all_consuming, map_res, opt},
    number::complete::float,
    sequence::preceded,
    IResult,
};

use crate::error::{MeshError, Result};
use crate::geometry::{Face, Mesh};

/// One face corner as written in the file, still 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawCorner {
    vertex: Option<usize>,
    normal: Option<usize>,
}

/// Read and parse an OBJ file.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so
/// exporters writing Latin-1 comments or group names still load.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| MeshError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);

    let mesh = parse_obj(&text).map_err(|source| MeshError::Load {
        path: path.to_path_buf(),
        source: Box::new(source),
    })?;

    log::debug!(
        "loaded {}: {} vertices, {} normals, {} triangles",
        path.display(),
        mesh.vertex_count(),
        mesh.normals().len(),
        mesh.face_count()
    );
    Ok(mesh)
}

/// Parse OBJ text into a triangulated mesh.
///
/// Only `v`, `vn` and `f` records are read; every other line is skipped.
/// Polygons are fan-triangulated around their first corner and faces with
/// fewer than three corners are dropped.
pub fn parse_obj(input: &str) -> Result<Mesh> {
    let mut vertices = Vec::new();
    let mut normals = Vec::new();
    let mut faces = Vec::new();

    for (i, line) in input.lines().enumerate() {
        let line_number = i + 1;
        let line = line.trim();
        let (keyword, rest) = match line.split_once(|c: char| c.is_whitespace()) {
            Some((keyword, rest)) => (keyword, rest),
            None => (line, ""),
        };

        match keyword {
            "v" => {
                let [x, y, z] = parse_record_vector(rest, line_number, "vertex")?;
                vertices.push(Point3::new(x, y, z));
            }
            "vn" => {
                let [x, y, z] = parse_record_vector(rest, line_number, "normal")?;
                normals.push(Vector3::new(x, y, z));
            }
            "f" => {
                let corners = rest
                    .split_whitespace()
                    .map(|token| parse_corner(token, line_number))
                    .collect::<Result<Vec<_>>>()?;
                triangulate(&corners, &mut faces);
            }
            _ => {}
        }
    }

    Mesh::new(vertices, faces, normals)
}

/// Split a polygon into a triangle fan sharing its first corner
fn triangulate(corners: &[RawCorner], faces: &mut Vec<Face>) {
    // Corners with an empty vertex field carry no position
    let corners: Vec<(usize, Option<usize>)> = corners
        .iter()
        .filter_map(|c| c.vertex.map(|v| (v - 1, c.normal.map(|n| n - 1))))
        .collect();

    if corners.len() < 3 {
        return;
    }

    let (first_vertex, first_normal) = corners[0];
    for pair in corners[1..].windows(2) {
        let (v1, n1) = pair[0];
        let (v2, n2) = pair[1];
        faces.push(Face::with_normals(
            [first_vertex, v1, v2],
            [first_normal, n1, n2],
        ));
    }
}

fn parse_record_vector(input: &str, line: usize, what: &str) -> Result<[f32; 3]> {
    match vector3(input) {
        Ok((rest, values)) if rest.is_empty() || rest.starts_with(|c: char| c.is_whitespace()) => {
            Ok(values)
        }
        _ => Err(MeshError::parse(
            line,
            format!("{what} record needs three numbers, got {:?}", input.trim()),
        )),
    }
}

fn vector3(input: &str) -> IResult<&str, [f32; 3]> {
    let (input, x) = preceded(space0, float)(input)?;
    let (input, y) = preceded(space1, float)(input)?;
    let (input, z) = preceded(space1, float)(input)?;
    Ok((input, [x, y, z]))
}

fn parse_corner(token: &str, line: usize) -> Result<RawCorner> {
    let corner = match all_consuming(corner_descriptor)(token) {
        Ok((_, corner)) => corner,
        Err(_) => {
            return Err(MeshError::parse(
                line,
                format!("malformed face corner {token:?}"),
            ))
        }
    };

    if corner.vertex == Some(0) || corner.normal == Some(0) {
        return Err(MeshError::parse(
            line,
            format!("face corner {token:?} uses index 0; indices start at 1"),
        ));
    }
    Ok(corner)
}

/// `v`, `v/t`, `v//n` or `v/t/n`, any field possibly empty
fn corner_descriptor(input: &str) -> IResult<&str, RawCorner> {
    let (input, vertex) = opt(index)(input)?;
    let (input, texture) = opt(preceded(char('/'), opt(index)))(input)?;
    let (input, normal) = match texture {
        Some(_) => opt(preceded(char('/'), opt(index)))(input)?,
        None => (input, None),
    };

    Ok((
        input,
        RawCorner {
            vertex,
            normal: normal.flatten(),
        },
    ))
}

fn index(input: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse::<usize>)(input)
}
