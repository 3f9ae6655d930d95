use std::{
    collections::{HashMap, VecDeque},
    f64::consts::PI,
};

use nalgebra::Vector3;

use crate::utils::{
    distance::distance_to_triangle,
    types::{ComponentIdx, FaceIdx, Vertex3, VertexIdx},
};

/// Triangle surface mesh.
///
/// Holds every input vertex, so face indices are indices into the input point set. Faces wind
/// counter-clockwise when seen from outside once [`Mesh::fix_normals`] ran.
///
/// ```
/// use alpha_shape::Mesh;
///
/// let vertices = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
/// let faces = vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];
/// let mesh = Mesh::new(vertices, faces);
///
/// assert!(mesh.is_closed());
/// assert!((mesh.volume() - 1.0 / 6.0).abs() < 1e-12);
/// assert!(mesh.contains_point(&[0.1, 0.1, 0.1], 1e-9));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex3>,
    faces: Vec<[VertexIdx; 3]>,
}

fn vector(v: &Vertex3) -> Vector3<f64> {
    Vector3::new(v[0], v[1], v[2])
}

/// Undirected edge key.
fn edge(a: VertexIdx, b: VertexIdx) -> (VertexIdx, VertexIdx) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

fn has_directed_edge(face: &[VertexIdx; 3], a: VertexIdx, b: VertexIdx) -> bool {
    (0..3).any(|i| face[i] == a && face[(i + 1) % 3] == b)
}

impl Mesh {
    pub const fn new(vertices: Vec<Vertex3>, faces: Vec<[VertexIdx; 3]>) -> Self {
        Self { vertices, faces }
    }

    pub fn vertices(&self) -> &[Vertex3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[[VertexIdx; 3]] {
        &self.faces
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Number of distinct vertices referenced by at least one face.
    pub fn num_referenced_vertices(&self) -> usize {
        let mut referenced = vec![false; self.vertices.len()];
        for &v in self.faces.iter().flatten() {
            referenced[v] = true;
        }
        referenced.into_iter().filter(|&r| r).count()
    }

    fn edge_faces(&self) -> HashMap<(VertexIdx, VertexIdx), Vec<FaceIdx>> {
        let mut edges: HashMap<_, Vec<FaceIdx>> = HashMap::new();
        for (face_idx, face) in self.faces.iter().enumerate() {
            for i in 0..3 {
                edges
                    .entry(edge(face[i], face[(i + 1) % 3]))
                    .or_default()
                    .push(face_idx);
            }
        }
        edges
    }

    /// Every edge is shared by an even number of faces, i.e. the surface has no border.
    pub fn is_closed(&self) -> bool {
        self.edge_faces().values().all(|faces| faces.len() % 2 == 0)
    }

    /// Faces grouped into edge-connected components.
    pub fn components(&self) -> Vec<Vec<FaceIdx>> {
        let edge_faces = self.edge_faces();
        let mut component_of: Vec<Option<ComponentIdx>> = vec![None; self.faces.len()];
        let mut components = Vec::new();

        for start in 0..self.faces.len() {
            if component_of[start].is_some() {
                continue;
            }

            let component_idx = components.len();
            let mut component = vec![start];
            component_of[start] = Some(component_idx);
            let mut queue = VecDeque::from([start]);

            while let Some(face_idx) = queue.pop_front() {
                let face = self.faces[face_idx];
                for i in 0..3 {
                    for &neighbor in &edge_faces[&edge(face[i], face[(i + 1) % 3])] {
                        if component_of[neighbor].is_none() {
                            component_of[neighbor] = Some(component_idx);
                            component.push(neighbor);
                            queue.push_back(neighbor);
                        }
                    }
                }
            }

            components.push(component);
        }

        components
    }

    pub fn num_components(&self) -> usize {
        self.components().len()
    }

    /// Signed volume enclosed by the given faces, positive for outward facing normals.
    fn signed_volume_of(&self, faces: impl Iterator<Item = FaceIdx>) -> f64 {
        let mut faces = faces.peekable();
        let Some(&first) = faces.peek() else {
            return 0.0;
        };
        // relative to a mesh vertex, to keep the products small
        let origin = vector(&self.vertices[self.faces[first][0]]);

        faces
            .map(|face_idx| {
                let [a, b, c] = self.faces[face_idx].map(|v| vector(&self.vertices[v]) - origin);
                a.dot(&b.cross(&c))
            })
            .sum::<f64>()
            / 6.0
    }

    /// Signed enclosed volume, only meaningful for closed meshes.
    pub fn volume(&self) -> f64 {
        self.signed_volume_of(0..self.faces.len())
    }

    fn flip(&mut self, face_idx: FaceIdx) {
        self.faces[face_idx].swap(1, 2);
    }

    /// Makes face windings consistent across shared edges and turns every component's normals outward.
    pub fn fix_normals(&mut self) {
        let now = std::time::Instant::now();

        let edge_faces = self.edge_faces();
        let mut visited = vec![false; self.faces.len()];
        let mut flipped = 0;

        for component in self.components() {
            let start = component[0];
            visited[start] = true;
            let mut queue = VecDeque::from([start]);

            while let Some(face_idx) = queue.pop_front() {
                let face = self.faces[face_idx];
                for i in 0..3 {
                    let (a, b) = (face[i], face[(i + 1) % 3]);
                    for &neighbor in &edge_faces[&edge(a, b)] {
                        if visited[neighbor] {
                            continue;
                        }
                        visited[neighbor] = true;
                        // a consistent neighbor traverses the shared edge the other way round
                        if has_directed_edge(&self.faces[neighbor], a, b) {
                            self.flip(neighbor);
                            flipped += 1;
                        }
                        queue.push_back(neighbor);
                    }
                }
            }

            if self.signed_volume_of(component.iter().copied()) < 0.0 {
                for &face_idx in &component {
                    self.flip(face_idx);
                }
                flipped += component.len();
            }
        }

        log::trace!(
            "Fixed normals, flipped {} of {} faces in {:.4} µs",
            flipped,
            self.faces.len(),
            now.elapsed().as_micros()
        );
    }

    /// Distance from `p` to the closest point of the mesh surface.
    pub fn distance_to_surface(&self, p: &Vertex3) -> f64 {
        self.faces
            .iter()
            .map(|&[a, b, c]| {
                distance_to_triangle(p, &self.vertices[a], &self.vertices[b], &self.vertices[c])
            })
            .fold(f64::INFINITY, f64::min)
    }

    /// Generalized winding number of the surface around `p`, `±1` inside a closed mesh, `0` outside.
    pub fn winding_number(&self, p: &Vertex3) -> f64 {
        let p = vector(p);
        let total: f64 = self
            .faces
            .iter()
            .map(|face| {
                let [a, b, c] = face.map(|v| vector(&self.vertices[v]) - p);
                solid_angle(&a, &b, &c)
            })
            .sum();
        total / (4.0 * PI)
    }

    /// `p` lies within `tolerance` of the surface or inside of it.
    pub fn contains_point(&self, p: &Vertex3, tolerance: f64) -> bool {
        if self.faces.is_empty() {
            return false;
        }
        self.distance_to_surface(p) <= tolerance || self.winding_number(p).abs() > 0.5
    }
}

/// Signed solid angle of the triangle `a, b, c` seen from the origin (Van Oosterom and Strackee).
fn solid_angle(a: &Vector3<f64>, b: &Vector3<f64>, c: &Vector3<f64>) -> f64 {
    let (la, lb, lc) = (a.norm(), b.norm(), c.norm());
    let numerator = a.dot(&b.cross(c));
    let denominator = la * lb * lc + a.dot(b) * lc + a.dot(c) * lb + b.dot(c) * la;
    2.0 * numerator.atan2(denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_cube() -> Mesh {
        let vertices = vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
            [0.0, 1.0, 1.0],
        ];
        // outward windings
        let faces = vec![
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            [0, 1, 5],
            [0, 5, 4],
            [3, 6, 2],
            [3, 7, 6],
            [0, 4, 7],
            [0, 7, 3],
            [1, 2, 6],
            [1, 6, 5],
        ];
        Mesh::new(vertices, faces)
    }

    #[test]
    fn test_cube_properties() {
        let cube = unit_cube();

        assert!(cube.is_closed());
        assert_eq!(cube.num_components(), 1);
        assert_eq!(cube.num_referenced_vertices(), 8);
        assert_relative_eq!(cube.volume(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_open_mesh() {
        let mut cube = unit_cube();
        cube.faces.pop();

        assert!(!cube.is_closed());
        assert_eq!(cube.num_components(), 1);
    }

    #[test]
    fn test_fix_normals_repairs_scrambled_windings() {
        let expected = unit_cube();
        let mut cube = unit_cube();
        for face_idx in [0, 3, 4, 9, 11] {
            cube.flip(face_idx);
        }
        assert!(cube.volume() < 1.0);

        cube.fix_normals();

        assert_relative_eq!(cube.volume(), 1.0, epsilon = 1e-12);
        for (face, expected_face) in cube.faces().iter().zip(expected.faces()) {
            assert!(has_directed_edge(face, expected_face[0], expected_face[1]));
        }
    }

    #[test]
    fn test_fix_normals_turns_inside_out_mesh() {
        let mut cube = unit_cube();
        for face_idx in 0..cube.num_faces() {
            cube.flip(face_idx);
        }
        assert_relative_eq!(cube.volume(), -1.0, epsilon = 1e-12);

        cube.fix_normals();
        assert_relative_eq!(cube.volume(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_components() {
        let mut vertices = unit_cube().vertices().to_vec();
        let mut faces = unit_cube().faces().to_vec();
        vertices.extend(unit_cube().vertices().iter().map(|v| [v[0] + 3.0, v[1], v[2]]));
        faces.extend(unit_cube().faces().iter().map(|f| f.map(|v| v + 8)));
        let mesh = Mesh::new(vertices, faces);

        assert_eq!(mesh.num_components(), 2);
        assert!(mesh.is_closed());
        assert_relative_eq!(mesh.volume(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_containment() {
        let cube = unit_cube();
        let tolerance = 1e-9;

        assert!(cube.contains_point(&[0.5, 0.5, 0.5], tolerance));
        assert!(cube.contains_point(&[0.0, 0.0, 0.0], tolerance));
        assert!(cube.contains_point(&[1.0, 0.5, 0.25], tolerance));
        assert!(!cube.contains_point(&[1.5, 0.5, 0.5], tolerance));
        assert!(!cube.contains_point(&[-0.1, -0.1, -0.1], tolerance));

        assert_relative_eq!(cube.winding_number(&[0.3, 0.6, 0.2]), 1.0, epsilon = 1e-9);
        assert_relative_eq!(cube.winding_number(&[2.0, 2.0, 2.0]), 0.0, epsilon = 1e-9);
        assert_relative_eq!(cube.distance_to_surface(&[0.5, 0.5, 2.0]), 1.0, epsilon = 1e-12);
        assert_relative_eq!(cube.distance_to_surface(&[2.0, 2.0, 0.5]), 2.0_f64.sqrt(), epsilon = 1e-12);

        assert!(!Mesh::default().contains_point(&[0.0, 0.0, 0.0], tolerance));
    }
}
