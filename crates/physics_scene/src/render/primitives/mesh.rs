//! Mesh representation and primitive generators
//!
//! Backend-agnostic indexed triangle geometry. Every generator records the
//! dimensions it was built from in [`MeshGeometry`], so a mesh can always be
//! compared against the collision shape created alongside it.
//!
//! All primitives are centered at the origin, Y-up, with counter-clockwise
//! winding seen from outside.

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::{constants::{PI, TAU}, Vec3};

/// 3D vertex with position, normal, and texture coordinate data
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in 3D space
    pub position: [f32; 3],

    /// Normal vector
    pub normal: [f32; 3],

    /// Texture coordinates
    pub tex_coord: [f32; 2],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// Dimensions a mesh was generated from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshGeometry {
    /// Axis-aligned box
    Cuboid {
        /// Half size along each axis
        half_extents: Vec3,
    },
    /// UV sphere
    Sphere {
        /// Sphere radius
        radius: f32,
    },
    /// Y-aligned capped cylinder
    Cylinder {
        /// Half of the cylinder height
        half_height: f32,
        /// Cylinder radius
        radius: f32,
    },
}

/// 3D mesh containing vertices and indices for rendering
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Vertex data
    pub vertices: Vec<Vertex>,

    /// Index data for triangles
    pub indices: Vec<u32>,

    /// Source dimensions
    pub geometry: MeshGeometry,
}

impl Mesh {
    /// Default horizontal segments for generated spheres
    pub const SPHERE_SEGMENTS: u32 = 32;

    /// Default vertical rings for generated spheres
    pub const SPHERE_RINGS: u32 = 16;

    /// Default radial segments for generated cylinders
    pub const CYLINDER_SEGMENTS: u32 = 32;

    /// Box with one quad per face, 24 vertices and 36 indices
    ///
    /// Faces do not share vertices so each keeps a flat normal.
    pub fn cuboid(half_extents: Vec3) -> Self {
        let (hx, hy, hz) = (half_extents.x, half_extents.y, half_extents.z);

        // (normal, u axis, v axis) per face; corners are normal ± u ± v
        let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (normal, u, v) in faces {
            let base = vertices.len() as u32;
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let corner = |axis: usize| normal[axis] + su * u[axis] + sv * v[axis];
                let position = [corner(0) * hx, corner(1) * hy, corner(2) * hz];
                let tex_coord = [(su + 1.0) * 0.5, (sv + 1.0) * 0.5];
                vertices.push(Vertex::new(position, normal, tex_coord));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }

        Self {
            vertices,
            indices,
            geometry: MeshGeometry::Cuboid { half_extents },
        }
    }

    /// UV sphere with `segments` around the Y axis and `rings` from pole to pole
    ///
    /// Pole rows keep one vertex per segment so texture seams stay clean;
    /// the degenerate triangles touching the poles are skipped.
    pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> Self {
        let segments = segments.max(3);
        let rings = rings.max(2);

        let mut vertices = Vec::with_capacity(((segments + 1) * (rings + 1)) as usize);
        for iy in 0..=rings {
            let v = iy as f32 / rings as f32;
            let theta = v * PI;
            for ix in 0..=segments {
                let u = ix as f32 / segments as f32;
                let phi = u * TAU;
                let normal = [
                    -phi.cos() * theta.sin(),
                    theta.cos(),
                    phi.sin() * theta.sin(),
                ];
                let position = [normal[0] * radius, normal[1] * radius, normal[2] * radius];
                vertices.push(Vertex::new(position, normal, [u, 1.0 - v]));
            }
        }

        let row = segments + 1;
        let mut indices = Vec::new();
        for iy in 0..rings {
            for ix in 0..segments {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != rings - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self {
            vertices,
            indices,
            geometry: MeshGeometry::Sphere { radius },
        }
    }

    /// Capped cylinder aligned with the Y axis
    pub fn cylinder(half_height: f32, radius: f32, segments: u32) -> Self {
        let segments = segments.max(3);
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        // Side wall: a bottom and top vertex per segment boundary
        for ix in 0..=segments {
            let u = ix as f32 / segments as f32;
            let (sin, cos) = (u * TAU).sin_cos();
            let normal = [sin, 0.0, cos];
            vertices.push(Vertex::new([radius * sin, -half_height, radius * cos], normal, [u, 0.0]));
            vertices.push(Vertex::new([radius * sin, half_height, radius * cos], normal, [u, 1.0]));
        }
        for ix in 0..segments {
            let bottom = ix * 2;
            let top = bottom + 1;
            let next_bottom = bottom + 2;
            let next_top = bottom + 3;
            indices.extend_from_slice(&[bottom, next_bottom, next_top, next_top, top, bottom]);
        }

        // Caps: center vertex plus a ring with flat normals
        for (y, ny) in [(half_height, 1.0_f32), (-half_height, -1.0_f32)] {
            let center = vertices.len() as u32;
            vertices.push(Vertex::new([0.0, y, 0.0], [0.0, ny, 0.0], [0.5, 0.5]));
            for ix in 0..=segments {
                let (sin, cos) = (ix as f32 / segments as f32 * TAU).sin_cos();
                vertices.push(Vertex::new(
                    [radius * sin, y, radius * cos],
                    [0.0, ny, 0.0],
                    [0.5 + 0.5 * sin, 0.5 + 0.5 * cos],
                ));
            }
            for ix in 0..segments {
                let current = center + 1 + ix;
                let next = current + 1;
                if ny > 0.0 {
                    indices.extend_from_slice(&[center, current, next]);
                } else {
                    indices.extend_from_slice(&[center, next, current]);
                }
            }
        }

        Self {
            vertices,
            indices,
            geometry: MeshGeometry::Cylinder { half_height, radius },
        }
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Half size of the axis-aligned bounds of the vertex positions
    pub fn bounds_half_extents(&self) -> Vec3 {
        self.vertices.iter().fold(Vec3::zeros(), |acc, vertex| {
            let p = Vec3::from(vertex.position);
            acc.zip_map(&p, |a, b| a.max(b.abs()))
        })
    }

    /// Raw vertex bytes for buffer upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn assert_indices_valid(mesh: &Mesh) {
        assert_eq!(mesh.indices.len() % 3, 0);
        for &idx in &mesh.indices {
            assert!((idx as usize) < mesh.vertices.len(), "Index {} is out of bounds", idx);
        }
    }

    #[test]
    fn test_cuboid_structure() {
        let mesh = Mesh::cuboid(Vec3::new(0.5, 1.0, 2.0));
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert_indices_valid(&mesh);
    }

    #[test]
    fn test_cuboid_bounds_match_half_extents() {
        let half_extents = Vec3::new(0.5, 1.0, 2.0);
        let mesh = Mesh::cuboid(half_extents);
        assert_relative_eq!(mesh.bounds_half_extents(), half_extents, epsilon = EPSILON);
    }

    #[test]
    fn test_cuboid_normals_point_outward() {
        let mesh = Mesh::cuboid(Vec3::new(1.0, 1.0, 1.0));
        for vertex in &mesh.vertices {
            let p = Vec3::from(vertex.position);
            let n = Vec3::from(vertex.normal);
            assert!(p.dot(&n) > 0.0, "Normal {:?} points inward at {:?}", n, p);
        }
    }

    #[test]
    fn test_sphere_vertices_on_radius() {
        let radius = 1.5;
        let mesh = Mesh::uv_sphere(radius, 16, 8);
        assert_indices_valid(&mesh);
        assert_eq!(mesh.vertices.len(), 17 * 9);
        for vertex in &mesh.vertices {
            assert_relative_eq!(Vec3::from(vertex.position).norm(), radius, epsilon = EPSILON);
        }
        // Poles contribute one triangle per segment, inner rings two
        assert_eq!(mesh.triangle_count(), (16 * 2 * 8 - 2 * 16) as usize);
    }

    #[test]
    fn test_cylinder_bounds() {
        let mesh = Mesh::cylinder(0.75, 0.5, Mesh::CYLINDER_SEGMENTS);
        assert_indices_valid(&mesh);
        let bounds = mesh.bounds_half_extents();
        assert_relative_eq!(bounds.y, 0.75, epsilon = EPSILON);
        assert_relative_eq!(bounds.x, 0.5, epsilon = EPSILON);
        assert_relative_eq!(bounds.z, 0.5, epsilon = EPSILON);
    }

    #[test]
    fn test_vertex_bytes_length() {
        let mesh = Mesh::cuboid(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(mesh.vertex_bytes().len(), 24 * std::mem::size_of::<Vertex>());
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
    }
}
