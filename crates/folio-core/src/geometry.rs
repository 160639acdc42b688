//! Triangle meshes for the polyhedra used by the hero scene.
//!
//! Subdivision follows the usual polyhedron convention: detail `n` splits
//! every base face into `(n + 1)²` triangles and pushes the new vertices onto
//! the circumscribed sphere. Detail 0 meshes get flat normals, subdivided ones
//! smooth spherical normals.

use glam::Vec3;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Icosahedron { radius: f32, detail: u32 },
    Tetrahedron { radius: f32 },
    Octahedron { radius: f32 },
    Dodecahedron { radius: f32 },
}

/// Non-indexed triangle list.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
}

impl Shape {
    pub fn build(self) -> Mesh {
        match self {
            Shape::Icosahedron { radius, detail } => {
                let (verts, faces) = icosahedron();
                polyhedron(&verts, &faces, radius, detail)
            }
            Shape::Tetrahedron { radius } => polyhedron(
                &[
                    Vec3::new(1.0, 1.0, 1.0),
                    Vec3::new(-1.0, -1.0, 1.0),
                    Vec3::new(-1.0, 1.0, -1.0),
                    Vec3::new(1.0, -1.0, -1.0),
                ],
                &[[2, 1, 0], [0, 3, 2], [1, 3, 0], [2, 3, 1]],
                radius,
                0,
            ),
            Shape::Octahedron { radius } => polyhedron(
                &[
                    Vec3::X,
                    Vec3::NEG_X,
                    Vec3::Y,
                    Vec3::NEG_Y,
                    Vec3::Z,
                    Vec3::NEG_Z,
                ],
                &[
                    [0, 2, 4],
                    [0, 4, 3],
                    [0, 3, 5],
                    [0, 5, 2],
                    [1, 2, 5],
                    [1, 5, 3],
                    [1, 3, 4],
                    [1, 4, 2],
                ],
                radius,
                0,
            ),
            Shape::Dodecahedron { radius } => dodecahedron(radius),
        }
    }
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Unique triangle edges as a line list (two points per edge).
    pub fn edges(&self) -> Vec<[f32; 3]> {
        let mut unique: Vec<(Vec3, Vec3)> = Vec::new();
        for tri in self.vertices.chunks_exact(3) {
            for (a, b) in [(0, 1), (1, 2), (2, 0)] {
                let pa = Vec3::from_array(tri[a].position);
                let pb = Vec3::from_array(tri[b].position);
                let known = unique.iter().any(|(qa, qb)| {
                    (same_point(pa, *qa) && same_point(pb, *qb))
                        || (same_point(pa, *qb) && same_point(pb, *qa))
                });
                if !known {
                    unique.push((pa, pb));
                }
            }
        }
        unique
            .into_iter()
            .flat_map(|(a, b)| [a.to_array(), b.to_array()])
            .collect()
    }
}

#[inline]
fn same_point(a: Vec3, b: Vec3) -> bool {
    a.distance_squared(b) < 1.0e-8
}

fn icosahedron() -> (Vec<Vec3>, Vec<[usize; 3]>) {
    let t = (1.0 + 5f32.sqrt()) / 2.0;
    let verts = vec![
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ];
    let faces = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];
    (verts, faces)
}

fn polyhedron(verts: &[Vec3], faces: &[[usize; 3]], radius: f32, detail: u32) -> Mesh {
    let mut tris: Vec<[Vec3; 3]> = Vec::with_capacity(faces.len() * ((detail + 1).pow(2) as usize));
    for f in faces {
        subdivide(verts[f[0]], verts[f[1]], verts[f[2]], detail, &mut tris);
    }
    let smooth = detail > 0;
    let mut mesh = Mesh::default();
    for tri in tris {
        let [a, b, c] = tri.map(|p| p.normalize() * radius);
        push_triangle(&mut mesh, a, b, c, smooth);
    }
    mesh
}

fn subdivide(a: Vec3, b: Vec3, c: Vec3, detail: u32, out: &mut Vec<[Vec3; 3]>) {
    let cols = (detail + 1) as usize;
    let mut grid: Vec<Vec<Vec3>> = Vec::with_capacity(cols + 1);
    for i in 0..=cols {
        let ai = a.lerp(c, i as f32 / cols as f32);
        let bi = b.lerp(c, i as f32 / cols as f32);
        let rows = cols - i;
        let row = (0..=rows)
            .map(|j| {
                if rows == 0 {
                    ai
                } else {
                    ai.lerp(bi, j as f32 / rows as f32)
                }
            })
            .collect();
        grid.push(row);
    }
    for i in 0..cols {
        for j in 0..(2 * (cols - i) - 1) {
            let k = j / 2;
            if j % 2 == 0 {
                out.push([grid[i][k + 1], grid[i + 1][k], grid[i][k]]);
            } else {
                out.push([grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]);
            }
        }
    }
}

/// Dual of the icosahedron: one pentagon per icosahedron vertex, spanned by
/// the centroids of the five faces around it.
fn dodecahedron(radius: f32) -> Mesh {
    let (verts, faces) = icosahedron();
    let centroids: Vec<Vec3> = faces
        .iter()
        .map(|f| ((verts[f[0]] + verts[f[1]] + verts[f[2]]) / 3.0).normalize() * radius)
        .collect();
    let mut mesh = Mesh::default();
    for (vi, v) in verts.iter().enumerate() {
        let axis = v.normalize();
        let u = axis.any_orthonormal_vector();
        let w = axis.cross(u);
        let mut ring: Vec<Vec3> = faces
            .iter()
            .zip(&centroids)
            .filter(|(f, _)| f.contains(&vi))
            .map(|(_, c)| *c)
            .collect();
        ring.sort_by(|p, q| {
            let ap = p.dot(w).atan2(p.dot(u));
            let aq = q.dot(w).atan2(q.dot(u));
            ap.total_cmp(&aq)
        });
        for k in 1..ring.len() - 1 {
            push_triangle(&mut mesh, ring[0], ring[k], ring[k + 1], false);
        }
    }
    mesh
}

fn push_triangle(mesh: &mut Mesh, a: Vec3, b: Vec3, c: Vec3, smooth: bool) {
    // keep counter-clockwise winding when seen from outside
    let centroid = (a + b + c) / 3.0;
    let (b, c) = if (b - a).cross(c - a).dot(centroid) < 0.0 {
        (c, b)
    } else {
        (b, c)
    };
    let flat = (b - a).cross(c - a).normalize_or_zero();
    for p in [a, b, c] {
        let n = if smooth { p.normalize_or_zero() } else { flat };
        mesh.vertices.push(MeshVertex {
            position: p.to_array(),
            normal: n.to_array(),
        });
    }
}
