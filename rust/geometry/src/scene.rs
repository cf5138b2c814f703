// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory faceted scene
//!
//! [`SceneDocument`] is the capability-trait implementation backing the
//! batch tool: solids are polygon-faceted (loaded from the STEP carrier),
//! so tessellation is a fan split and any positive deviation bound holds
//! trivially. Transforms are applied eagerly to every point.

use nalgebra::{Point3, Rotation3, Unit, Vector3};
use padup_core::{BoundingBox, StepSolid};
use std::path::Path;

use crate::document::{Color, Document, ScaleFactor, SolidObject, TessellatedFace};
use crate::error::{Error, Result};

/// One faceted solid with its display attributes
#[derive(Debug, Clone)]
pub struct SceneSolid {
    label: String,
    points: Vec<Point3<f64>>,
    loops: Vec<Vec<u32>>,
    colors: Vec<Color>,
    transparency: f64,
}

impl SceneSolid {
    /// Create a solid from points and polygon loops
    pub fn new(label: impl Into<String>, points: Vec<Point3<f64>>, loops: Vec<Vec<u32>>) -> Self {
        Self {
            label: label.into(),
            points,
            loops,
            colors: vec![Color::DEFAULT],
            transparency: 0.0,
        }
    }

    /// Replace the per-face color table
    pub fn with_colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = colors;
        self
    }

    /// Set the object transparency
    pub fn with_transparency(mut self, transparency: f64) -> Self {
        self.transparency = transparency;
        self
    }

    /// Vertex positions
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    fn map_points(&mut self, f: impl Fn(&Point3<f64>) -> Point3<f64>) {
        for p in &mut self.points {
            *p = f(p);
        }
    }
}

impl From<StepSolid> for SceneSolid {
    fn from(solid: StepSolid) -> Self {
        let points = solid
            .points
            .iter()
            .map(|p| Point3::new(p[0], p[1], p[2]))
            .collect();
        SceneSolid::new(solid.name, points, solid.faces)
    }
}

impl From<&SceneSolid> for StepSolid {
    fn from(solid: &SceneSolid) -> Self {
        StepSolid {
            name: solid.label.clone(),
            points: solid.points.iter().map(|p| [p.x, p.y, p.z]).collect(),
            faces: solid.loops.clone(),
        }
    }
}

impl SolidObject for SceneSolid {
    fn label(&self) -> &str {
        &self.label
    }

    fn bounding_box(&self) -> BoundingBox {
        let mut points = self.points.iter();
        let first = points
            .next()
            .map(|p| BoundingBox::from_point(p.x, p.y, p.z))
            .unwrap_or_else(|| BoundingBox::from_point(0.0, 0.0, 0.0));
        points.fold(first, |mut bbox, p| {
            bbox.expand(p.x, p.y, p.z);
            bbox
        })
    }

    fn face_count(&self) -> usize {
        self.loops.len()
    }

    /// Fan-triangulate one polygon loop. The geometry is already faceted,
    /// so the deviation bound is met exactly and the parameter is unused.
    fn tessellate_face(&self, index: usize, _deviation: f64) -> Result<TessellatedFace> {
        let polygon = self.loops.get(index).ok_or_else(|| Error::FaceOutOfRange {
            label: self.label.clone(),
            index,
            count: self.loops.len(),
        })?;
        if polygon.len() < 3 {
            return Err(Error::DegenerateFace(polygon.len()));
        }

        let points: Vec<Point3<f64>> = polygon
            .iter()
            .map(|i| {
                self.points
                    .get(*i as usize)
                    .copied()
                    .ok_or_else(|| Error::PointOutOfRange {
                        label: self.label.clone(),
                        index: *i as usize,
                        count: self.points.len(),
                    })
            })
            .collect::<Result<_>>()?;
        let triangles: Vec<[u32; 3]> = (1..polygon.len() as u32 - 1)
            .map(|i| [0, i, i + 1])
            .collect();

        Ok(TessellatedFace { points, triangles })
    }

    fn face_colors(&self) -> &[Color] {
        &self.colors
    }

    fn transparency(&self) -> f64 {
        self.transparency
    }
}

/// In-memory document over faceted solids
#[derive(Debug, Clone, Default)]
pub struct SceneDocument {
    solids: Vec<SceneSolid>,
}

impl SceneDocument {
    /// Create a document from solids
    pub fn new(solids: Vec<SceneSolid>) -> Self {
        Self { solids }
    }

    /// Build a document from STEP carrier solids
    pub fn from_step_solids(solids: Vec<StepSolid>) -> Self {
        Self::new(solids.into_iter().map(SceneSolid::from).collect())
    }

    /// Load a document from a STEP file
    pub fn open(path: &Path) -> Result<Self> {
        let solids = padup_core::read_step_file(path)?;
        Ok(Self::from_step_solids(solids))
    }

    /// Write the document back to a STEP file
    pub fn save(&self, path: &Path) -> Result<()> {
        let solids: Vec<StepSolid> = self.solids.iter().map(StepSolid::from).collect();
        padup_core::save_step(path, &solids)?;
        Ok(())
    }

    /// Add a solid to the document
    pub fn push(&mut self, solid: SceneSolid) {
        self.solids.push(solid);
    }
}

impl Document for SceneDocument {
    type Object = SceneSolid;

    fn objects(&self) -> &[SceneSolid] {
        &self.solids
    }

    fn translate_all(&mut self, delta: Vector3<f64>) {
        for solid in &mut self.solids {
            solid.map_points(|p| p + delta);
        }
    }

    fn rotate_all(&mut self, angle_deg: f64, axis: Vector3<f64>) {
        if axis.norm() < 1e-12 {
            tracing::warn!("ignoring rotation about a zero-length axis");
            return;
        }
        let rotation =
            Rotation3::from_axis_angle(&Unit::new_normalize(axis), angle_deg.to_radians());
        for solid in &mut self.solids {
            solid.map_points(|p| rotation * p);
        }
    }

    fn scale_all(&mut self, factors: ScaleFactor) {
        let f = factors.vector();
        for solid in &mut self.solids {
            solid.map_points(|p| Point3::new(p.x * f.x, p.y * f.y, p.z * f.z));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> SceneSolid {
        SceneSolid::new(
            "square",
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![vec![0, 1, 2, 3]],
        )
    }

    #[test]
    fn test_bounding_box() {
        let bbox = unit_square().bounding_box();
        assert_eq!(bbox.x_min, 0.0);
        assert_eq!(bbox.x_max, 1.0);
        assert_eq!(bbox.z_min, 0.0);
        assert_eq!(bbox.z_max, 0.0);
    }

    #[test]
    fn test_quad_fan_triangulation() {
        let face = unit_square().tessellate_face(0, 0.03).unwrap();
        assert_eq!(face.points.len(), 4);
        assert_eq!(face.triangles, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_tessellate_out_of_range() {
        let err = unit_square().tessellate_face(1, 0.03).unwrap_err();
        assert!(matches!(err, Error::FaceOutOfRange { index: 1, .. }));
    }

    #[test]
    fn test_loop_with_dangling_point_index() {
        let solid = SceneSolid::new(
            "broken",
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![vec![0, 1, 9]],
        );
        let err = solid.tessellate_face(0, 0.03).unwrap_err();
        assert!(matches!(
            err,
            Error::PointOutOfRange {
                index: 9,
                count: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_degenerate_loop() {
        let solid = SceneSolid::new(
            "line",
            vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
            vec![vec![0, 1]],
        );
        assert!(matches!(
            solid.tessellate_face(0, 0.03),
            Err(Error::DegenerateFace(2))
        ));
    }

    #[test]
    fn test_translate_all() {
        let mut doc = SceneDocument::new(vec![unit_square()]);
        doc.translate_all(Vector3::new(3.0, -1.0, 2.0));

        let bbox = doc.objects()[0].bounding_box();
        assert_eq!(bbox.x_min, 3.0);
        assert_eq!(bbox.y_min, -1.0);
        assert_eq!(bbox.z_min, 2.0);
    }

    #[test]
    fn test_rotate_all_about_origin() {
        let mut doc = SceneDocument::new(vec![unit_square()]);
        doc.rotate_all(90.0, Vector3::z());

        // (1,0,0) -> (0,1,0)
        let p = doc.objects()[0].points()[1];
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_scale_all_per_axis() {
        let mut doc = SceneDocument::new(vec![unit_square()]);
        doc.scale_all(ScaleFactor::PerAxis(Vector3::new(2.0, 3.0, 1.0)));

        let bbox = doc.objects()[0].bounding_box();
        assert_eq!(bbox.x_max, 2.0);
        assert_eq!(bbox.y_max, 3.0);
    }

    #[test]
    fn test_step_solid_round_trip() {
        let solid = unit_square();
        let step: StepSolid = (&solid).into();
        let back: SceneSolid = step.into();
        assert_eq!(back.points(), solid.points());
        assert_eq!(back.face_count(), 1);
    }
}
