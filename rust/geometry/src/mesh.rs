// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use nalgebra::Point3;

use crate::document::Color;

/// Self-contained triangle mesh for one geometric face.
///
/// A full part is a flat sequence of these records with no shared structure;
/// each carries its own point list, color, and a copy of the object's
/// transparency. Constructed during export and discarded after the scene
/// file is written.
#[derive(Debug, Clone)]
pub struct FaceMesh {
    /// Vertex positions
    pub points: Vec<Point3<f64>>,
    /// Triangle index triples into `points`
    pub faces: Vec<[u32; 3]>,
    /// Display color; the alpha channel is dropped on export
    pub color: Color,
    /// Transparency in [0,1]
    pub transparency: f64,
}

impl FaceMesh {
    /// Create a face mesh
    pub fn new(
        points: Vec<Point3<f64>>,
        faces: Vec<[u32; 3]>,
        color: Color,
        transparency: f64,
    ) -> Self {
        Self {
            points,
            faces,
            color,
            transparency,
        }
    }

    /// Check if the mesh carries no geometry
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() || self.faces.is_empty()
    }

    /// Number of vertices
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mesh = FaceMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
            Color::rgb(1.0, 0.0, 0.0),
            0.0,
        );
        assert!(!mesh.is_empty());
        assert_eq!(mesh.point_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
    }
}
