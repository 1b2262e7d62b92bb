//! STL output for [`Solid`]s

use super::solid::Solid;
use crate::Result;
use std::io::Cursor;
use std::path::Path;

/// Convert a solid to binary STL bytes
pub fn to_stl_binary(solid: &Solid) -> Result<Vec<u8>> {
    use stl_io::{Normal, Triangle, Vertex};

    let mut triangles = Vec::<Triangle>::with_capacity(solid.triangle_count());
    for polygon in &solid.polygons {
        let n = polygon.plane.normal();
        for tri in polygon.triangulate() {
            triangles.push(Triangle {
                normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: tri.map(|v| {
                    Vertex::new([v.pos.x as f32, v.pos.y as f32, v.pos.z as f32])
                }),
            });
        }
    }

    let mut cursor = Cursor::new(Vec::new());
    stl_io::write_stl(&mut cursor, triangles.iter())?;
    Ok(cursor.into_inner())
}

/// Write a solid to `path` as binary STL
pub fn write_stl_file(solid: &Solid, path: &Path) -> Result<()> {
    let bytes = to_stl_binary(solid)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
