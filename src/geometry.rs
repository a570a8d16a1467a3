//! Procedural geometry for the demo's shape presets.
//!
//! Meshes use the interleaved `position.xyz, normal.xyz` vertex layout the
//! renderer consumes directly. Texture coordinates are not stored: both
//! projections derive them from the world-space surface point at shading
//! time.

use std::f32::consts::PI;

use glam::Vec3;
use serde::{Deserialize, Serialize};

const TAU: f32 = 2.0 * PI;

/// CPU-side mesh buffers ready for upload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshData {
    /// Interleaved `x y z nx ny nz` per vertex.
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 6
    }

    fn push_vertex(&mut self, position: Vec3, normal: Vec3) {
        self.vertices
            .extend_from_slice(&[position.x, position.y, position.z]);
        self.vertices
            .extend_from_slice(&[normal.x, normal.y, normal.z]);
    }
}

/// Named geometry-generation strategies.
///
/// Every renderable object is the same generic shaded primitive; only the
/// preset differs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GeometryPreset {
    Sphere { radius: f32 },
    Cylinder { radius: f32, height: f32 },
    Box { size: f32 },
    Torus { radius: f32, tube: f32 },
    TorusKnot { radius: f32, tube: f32 },
}

impl GeometryPreset {
    pub fn generate(&self) -> MeshData {
        match *self {
            GeometryPreset::Sphere { radius } => sphere(radius, 40, 40),
            GeometryPreset::Cylinder { radius, height } => cylinder(radius, height, 40, 40),
            GeometryPreset::Box { size } => subdivided_box(size, 40),
            GeometryPreset::Torus { radius, tube } => torus(radius, tube, 400, 400),
            GeometryPreset::TorusKnot { radius, tube } => torus_knot(radius, tube, 400, 400),
        }
    }
}

/// UV sphere: `rings + 1` latitude rows of `segments + 1` vertices, with a
/// duplicated column for the texture seam.
fn sphere(radius: f32, segments: u32, rings: u32) -> MeshData {
    let mut mesh = MeshData::default();

    for ring in 0..=rings {
        let phi = ring as f32 / rings as f32 * PI;
        for seg in 0..=segments {
            let theta = seg as f32 / segments as f32 * TAU;
            let normal = Vec3::new(
                phi.sin() * theta.cos(),
                phi.cos(),
                phi.sin() * theta.sin(),
            );
            mesh.push_vertex(normal * radius, normal);
        }
    }

    for ring in 0..rings {
        for seg in 0..segments {
            let current = ring * (segments + 1) + seg;
            let next = current + segments + 1;
            mesh.indices
                .extend_from_slice(&[current, next, current + 1]);
            mesh.indices.extend_from_slice(&[current + 1, next, next + 1]);
        }
    }

    mesh
}

/// Cylinder along the Y axis with height-segmented sides and capped ends.
fn cylinder(radius: f32, height: f32, radial_segments: u32, height_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let half = height / 2.0;

    // Side wall: rows from top to bottom, radial normals.
    for row in 0..=height_segments {
        let y = half - row as f32 / height_segments as f32 * height;
        for seg in 0..=radial_segments {
            let theta = seg as f32 / radial_segments as f32 * TAU;
            let normal = Vec3::new(theta.cos(), 0.0, theta.sin());
            mesh.push_vertex(Vec3::new(normal.x * radius, y, normal.z * radius), normal);
        }
    }
    for row in 0..height_segments {
        for seg in 0..radial_segments {
            let current = row * (radial_segments + 1) + seg;
            let next = current + radial_segments + 1;
            mesh.indices
                .extend_from_slice(&[current, next, current + 1]);
            mesh.indices.extend_from_slice(&[current + 1, next, next + 1]);
        }
    }

    // End caps: center fan with flat normals.
    for &(y, normal) in &[(half, Vec3::Y), (-half, -Vec3::Y)] {
        let center = mesh.vertex_count() as u32;
        mesh.push_vertex(Vec3::new(0.0, y, 0.0), normal);
        for seg in 0..radial_segments {
            let theta = seg as f32 / radial_segments as f32 * TAU;
            mesh.push_vertex(
                Vec3::new(theta.cos() * radius, y, theta.sin() * radius),
                normal,
            );
        }
        for seg in 0..radial_segments {
            let current = center + 1 + seg;
            let next = center + 1 + (seg + 1) % radial_segments;
            if normal.y > 0.0 {
                mesh.indices.extend_from_slice(&[center, current, next]);
            } else {
                mesh.indices.extend_from_slice(&[center, next, current]);
            }
        }
    }

    mesh
}

/// Cube with each face subdivided into a `segments x segments` grid, so
/// per-vertex (Gouraud) evaluation has something to interpolate over.
fn subdivided_box(size: f32, segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let half = size / 2.0;

    let faces: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::new(0.0, 0.0, -1.0), Vec3::Y),
        (-Vec3::X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::new(0.0, 0.0, -1.0)),
        (-Vec3::Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (-Vec3::Z, -Vec3::X, Vec3::Y),
    ];

    for (normal, u_dir, v_dir) in faces {
        let base = mesh.vertex_count() as u32;
        for j in 0..=segments {
            let v = j as f32 / segments as f32 * size - half;
            for i in 0..=segments {
                let u = i as f32 / segments as f32 * size - half;
                mesh.push_vertex(normal * half + u_dir * u + v_dir * v, normal);
            }
        }
        for j in 0..segments {
            for i in 0..segments {
                let current = base + j * (segments + 1) + i;
                let next = current + segments + 1;
                mesh.indices
                    .extend_from_slice(&[current, next, current + 1]);
                mesh.indices.extend_from_slice(&[current + 1, next, next + 1]);
            }
        }
    }

    mesh
}

/// Torus in the XY plane with tube cross sections around the main ring.
fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();

    for j in 0..=radial_segments {
        let v = j as f32 / radial_segments as f32 * TAU;
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * TAU;
            let ring_center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let position = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            mesh.push_vertex(position, (position - ring_center).normalize());
        }
    }

    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = (tubular_segments + 1) * j + i - 1;
            let b = (tubular_segments + 1) * (j - 1) + i - 1;
            let c = (tubular_segments + 1) * (j - 1) + i;
            let d = (tubular_segments + 1) * j + i;
            mesh.indices.extend_from_slice(&[a, b, d]);
            mesh.indices.extend_from_slice(&[b, c, d]);
        }
    }

    mesh
}

/// (2,3) torus knot: a tube swept along the knot curve using a frame built
/// from neighboring curve samples.
fn torus_knot(radius: f32, tube: f32, tubular_segments: u32, radial_segments: u32) -> MeshData {
    const P: f32 = 2.0;
    const Q: f32 = 3.0;

    let knot_point = |u: f32| -> Vec3 {
        let qu_over_p = Q / P * u;
        let cs = qu_over_p.cos();
        Vec3::new(
            radius * (2.0 + cs) * 0.5 * u.cos(),
            radius * (2.0 + cs) * 0.5 * u.sin(),
            radius * qu_over_p.sin() * 0.5,
        )
    };

    let mut mesh = MeshData::default();

    for i in 0..=tubular_segments {
        let u = i as f32 / tubular_segments as f32 * P * TAU;
        let p1 = knot_point(u);
        let p2 = knot_point(u + 0.01);

        let tangent = p2 - p1;
        let bitangent = tangent.cross(p2 + p1).normalize();
        let normal = bitangent.cross(tangent).normalize();

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            let position = p1 + cx * normal + cy * bitangent;
            mesh.push_vertex(position, (position - p1).normalize());
        }
    }

    for i in 1..=tubular_segments {
        for j in 1..=radial_segments {
            let a = (radial_segments + 1) * (i - 1) + j - 1;
            let b = (radial_segments + 1) * i + j - 1;
            let c = (radial_segments + 1) * i + j;
            let d = (radial_segments + 1) * (i - 1) + j;
            mesh.indices.extend_from_slice(&[a, b, d]);
            mesh.indices.extend_from_slice(&[b, c, d]);
        }
    }

    mesh
}
