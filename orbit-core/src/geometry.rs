//! Meshes the hosts draw around the orbit target.
use nalgebra::{Point3, Vector3};

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Face normal from the winding order (counter-clockwise is front).
    pub fn face_normal(&self) -> Vector3<f32> {
        let [v0, v1, v2] = self.vertices.map(|v| v.position);
        (v1 - v0).cross(&(v2 - v0)).normalize()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Axis-aligned cube centred on the origin, two triangles per face.
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let axes = [Vector3::x(), Vector3::y(), Vector3::z()];
        let mut mesh = Self::new();

        for (i, axis) in axes.iter().enumerate() {
            // `u x v == axis` keeps every face counter-clockwise from outside.
            let u = axes[(i + 1) % 3];
            let v = axes[(i + 2) % 3];
            for sign in [1.0f32, -1.0] {
                let normal = axis * sign;
                let (u, v) = if sign > 0.0 { (u, v) } else { (v, u) };
                let corner = |a: f32, b: f32| {
                    Vertex::new(Point3::from((normal + u * a + v * b) * half), normal)
                };
                let (c0, c1, c2, c3) = (
                    corner(-1.0, -1.0),
                    corner(1.0, -1.0),
                    corner(1.0, 1.0),
                    corner(-1.0, 1.0),
                );
                mesh.triangles.push(Triangle::new(c0, c1, c2));
                mesh.triangles.push(Triangle::new(c0, c2, c3));
            }
        }

        mesh
    }
}

/// Indexed triangle covering the whole viewport in clip space.
///
/// Positions are `x, y, z`, uvs run to 2.0 on the oversized corners so the
/// visible quad spans `[0, 1]`.
pub struct ScreenTriangle;

impl ScreenTriangle {
    pub const POSITIONS: [f32; 9] = [
        -1.0, 3.0, 0.0, // top left
        -1.0, -1.0, 0.0, // bottom left
        3.0, -1.0, 0.0, // bottom right
    ];
    pub const UVS: [f32; 6] = [0.0, 2.0, 0.0, 0.0, 2.0, 0.0];
    pub const INDICES: [u16; 3] = [0, 1, 2];
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cube_faces_point_outward() {
        let cube = Mesh::cube(2.0);
        assert_eq!(cube.triangles.len(), 12);
        for triangle in &cube.triangles {
            let normal = triangle.face_normal();
            let declared = triangle.vertices[0].normal;
            assert_relative_eq!(normal.dot(&declared), 1.0, epsilon = 1e-5);
            for vertex in &triangle.vertices {
                assert_relative_eq!(vertex.position.coords.amax(), 1.0, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_screen_triangle_covers_viewport() {
        assert_eq!(ScreenTriangle::POSITIONS.len() / 3, ScreenTriangle::UVS.len() / 2);
        assert_eq!(ScreenTriangle::INDICES.len(), 3);
    }
}
