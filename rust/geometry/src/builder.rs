// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh building
//!
//! Converts every geometric face of every document object into an
//! independent [`FaceMesh`] record for scene export.

use crate::document::{Color, Document, SolidObject};
use crate::error::Result;
use crate::mesh::FaceMesh;

/// Tessellation deviation tolerance in length units.
/// Smaller is finer; coarser loses shape fidelity.
pub const MESH_DEVIATION: f64 = 0.03;

/// Build one mesh per face of a single object.
///
/// Color assignment: when the object view carries at least as many colors as
/// faces, each face gets its own entry; otherwise the first entry paints
/// every face. An optional uniform `scale` multiplies every output point
/// (unit conversion, e.g. mm to 0.1 inch).
pub fn object_meshes<O: SolidObject>(obj: &O, scale: Option<f64>) -> Result<Vec<FaceMesh>> {
    let colors = obj.face_colors();
    let face_count = obj.face_count();
    let per_face = colors.len() >= face_count;

    let mut meshes = Vec::with_capacity(face_count);
    for index in 0..face_count {
        let mut face = obj.tessellate_face(index, MESH_DEVIATION)?;

        if let Some(factor) = scale {
            for p in &mut face.points {
                p.coords *= factor;
            }
        }

        let color = if per_face {
            colors.get(index).copied().unwrap_or(Color::DEFAULT)
        } else {
            colors.first().copied().unwrap_or(Color::DEFAULT)
        };

        meshes.push(FaceMesh::new(
            face.points,
            face.triangles,
            color,
            obj.transparency(),
        ));
    }
    Ok(meshes)
}

/// Build the meshes of every object in the document, in document order
pub fn document_meshes<D: Document>(doc: &D, scale: Option<f64>) -> Result<Vec<FaceMesh>> {
    let mut meshes = Vec::new();
    for obj in doc.objects() {
        meshes.extend(object_meshes(obj, scale)?);
    }
    tracing::debug!(mesh_count = meshes.len(), "document meshes built");
    Ok(meshes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{SceneDocument, SceneSolid};
    use nalgebra::Point3;

    fn two_triangle_solid() -> SceneSolid {
        SceneSolid::new(
            "wedge",
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
            ],
            vec![vec![0, 1, 2], vec![0, 1, 3]],
        )
    }

    #[test]
    fn test_one_mesh_per_face() {
        let meshes = object_meshes(&two_triangle_solid(), None).unwrap();
        assert_eq!(meshes.len(), 2);
        assert_eq!(meshes[0].triangle_count(), 1);
        assert_eq!(meshes[0].point_count(), 3);
    }

    #[test]
    fn test_object_color_fallback() {
        // One color for two faces: the first entry paints both
        let solid = two_triangle_solid().with_colors(vec![Color::rgb(1.0, 0.0, 0.0)]);
        let meshes = object_meshes(&solid, None).unwrap();
        assert_eq!(meshes[0].color, Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(meshes[1].color, Color::rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_per_face_colors() {
        let solid = two_triangle_solid()
            .with_colors(vec![Color::rgb(1.0, 0.0, 0.0), Color::rgb(0.0, 1.0, 0.0)]);
        let meshes = object_meshes(&solid, None).unwrap();
        assert_eq!(meshes[0].color, Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(meshes[1].color, Color::rgb(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_transparency_copied_to_every_mesh() {
        let solid = two_triangle_solid().with_transparency(0.5);
        let meshes = object_meshes(&solid, None).unwrap();
        assert!(meshes.iter().all(|m| m.transparency == 0.5));
    }

    #[test]
    fn test_scale_multiplies_points() {
        let meshes = object_meshes(&two_triangle_solid(), Some(2.0)).unwrap();
        assert_eq!(meshes[0].points[1], Point3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_document_meshes_concatenate() {
        let doc = SceneDocument::new(vec![two_triangle_solid(), two_triangle_solid()]);
        let meshes = document_meshes(&doc, None).unwrap();
        assert_eq!(meshes.len(), 4);
    }
}
