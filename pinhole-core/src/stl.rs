/// STL scene input, ASCII and binary
///
/// Facet normals are discarded; each facet becomes a three-vertex face.
use nom::{
    bytes::complete::{tag, take_till},
    character::complete::{multispace0, multispace1},
    combinator::map,
    multi::many0,
    number::complete::float,
    sequence::{preceded, terminated, tuple},
    IResult,
};

use crate::error::{RenderError, RenderResult};
use crate::geometry::{Face, Mesh};
use crate::vector::Vec3;

const HEADER_LEN: usize = 80;
const FACET_LEN: usize = 50;

/// Parse either STL flavour, trying ASCII first when the data starts with `solid`.
///
/// Binary files may also begin with "solid" in their free-form header, so a
/// failed ASCII parse falls back to binary. If both fail, the ASCII error is
/// the one reported.
pub fn parse_stl(data: &[u8]) -> RenderResult<Mesh> {
    let ascii_error = if data.starts_with(b"solid") {
        let parsed = std::str::from_utf8(data)
            .map_err(|e| RenderError::Stl(format!("invalid ASCII STL: {e}")))
            .and_then(parse_ascii_stl);
        match parsed {
            Ok(mesh) => return Ok(mesh),
            Err(e) => Some(e),
        }
    } else {
        None
    };

    parse_binary_stl(data).map_err(|binary_error| ascii_error.unwrap_or(binary_error))
}

pub fn parse_binary_stl(data: &[u8]) -> RenderResult<Mesh> {
    if data.len() < HEADER_LEN + 4 {
        return Err(RenderError::Stl("file too small to be a binary STL".into()));
    }

    let count = u32::from_le_bytes(read4(&data[HEADER_LEN..])) as usize;
    let body = &data[HEADER_LEN + 4..];
    if body.len() < count * FACET_LEN {
        return Err(RenderError::Stl(format!(
            "expected {count} facets, found {} bytes",
            body.len()
        )));
    }

    let mut mesh = Mesh::with_capacity(count);
    for facet in body.chunks_exact(FACET_LEN).take(count) {
        // 12 normal bytes, 3 x 12 vertex bytes, 2 attribute bytes
        let vertices = (0..3)
            .map(|i| read_vec3(&facet[12 + i * 12..]))
            .collect();
        mesh.add_face(Face::new(vertices)?);
    }
    Ok(mesh)
}

pub fn parse_ascii_stl(input: &str) -> RenderResult<Mesh> {
    match solid(input) {
        Ok((_, faces)) => Ok(Mesh::from_faces(faces)),
        Err(e) => Err(RenderError::Stl(format!("invalid ASCII STL: {e:?}"))),
    }
}

fn read4(bytes: &[u8]) -> [u8; 4] {
    [bytes[0], bytes[1], bytes[2], bytes[3]]
}

fn read_vec3(bytes: &[u8]) -> Vec3 {
    Vec3::new(
        f32::from_le_bytes(read4(bytes)),
        f32::from_le_bytes(read4(&bytes[4..])),
        f32::from_le_bytes(read4(&bytes[8..])),
    )
}

fn keyword<'a>(word: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    preceded(multispace0, tag(word))
}

fn solid(input: &str) -> IResult<&str, Vec<Face>> {
    let (input, _) = keyword("solid")(input)?;
    // Optional solid name runs to the end of the line
    let (input, _) = take_till(|c| c == '\n')(input)?;
    let (input, faces) = many0(facet)(input)?;
    let (input, _) = keyword("endsolid")(input)?;
    Ok((input, faces))
}

fn facet(input: &str) -> IResult<&str, Face> {
    let (input, _) = keyword("facet")(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, _normal) = triple(input)?;
    let (input, _) = keyword("outer")(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, (a, b, c)) = tuple((vertex, vertex, vertex))(input)?;
    let (input, _) = keyword("endloop")(input)?;
    let (input, _) = keyword("endfacet")(input)?;

    let face = Face::new(vec![a, b, c]).map_err(|_| {
        nom::Err::Failure(nom::error::Error::new(input, nom::error::ErrorKind::Verify))
    })?;
    Ok((input, face))
}

fn vertex(input: &str) -> IResult<&str, Vec3> {
    preceded(keyword("vertex"), triple)(input)
}

fn triple(input: &str) -> IResult<&str, Vec3> {
    map(
        tuple((
            preceded(multispace0, float),
            preceded(multispace1, float),
            terminated(preceded(multispace1, float), multispace0),
        )),
        |(x, y, z)| Vec3::new(x, y, z),
    )(input)
}
