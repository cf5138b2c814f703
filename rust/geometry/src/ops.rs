// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Alignment and transform operations
//!
//! Each alignment computes one scalar translation component from the
//! combined document bounds and requests a rigid translation with a single
//! non-zero component. Re-invoking an alignment on already-aligned geometry
//! is a no-op by construction.

use nalgebra::Vector3;
use padup_core::{reduce, BoundingBox, PadSpec};

use crate::document::{Axis, Document, ScaleFactor};
use crate::error::Result;

/// Combined bounds of every object in the document.
///
/// Fails with the reducer's empty-input error when the document holds no
/// objects; callers must guarantee a non-empty document.
pub fn document_bounds<D: Document>(doc: &D) -> Result<BoundingBox> {
    use crate::document::SolidObject;
    let boxes: Vec<BoundingBox> = doc.objects().iter().map(|o| o.bounding_box()).collect();
    Ok(reduce(&boxes)?)
}

/// Edge or middle alignment request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    XLeft,
    XRight,
    XMiddle,
    YBottom,
    YTop,
    YMiddle,
    ZBottom,
    ZTop,
    ZMiddle,
}

impl Alignment {
    /// Translation taking the chosen bound (or center) to zero
    fn translation(self, b: &BoundingBox) -> Vector3<f64> {
        match self {
            Alignment::XLeft => Axis::X.component(-b.x_min),
            Alignment::XRight => Axis::X.component(-b.x_max),
            Alignment::XMiddle => Axis::X.component(-b.center_x()),
            Alignment::YBottom => Axis::Y.component(-b.y_min),
            Alignment::YTop => Axis::Y.component(-b.y_max),
            Alignment::YMiddle => Axis::Y.component(-b.center_y()),
            Alignment::ZBottom => Axis::Z.component(-b.z_min),
            Alignment::ZTop => Axis::Z.component(-b.z_max),
            Alignment::ZMiddle => Axis::Z.component(-b.center_z()),
        }
    }
}

/// Align all objects so the chosen bound sits at coordinate zero
pub fn align<D: Document>(doc: &mut D, alignment: Alignment) -> Result<()> {
    let bounds = document_bounds(doc)?;
    doc.translate_all(alignment.translation(&bounds));
    tracing::debug!(?alignment, "aligned document");
    Ok(())
}

/// Translate all objects so pin 1 lands at zero along the given axis
pub fn offset_pins<D: Document>(doc: &mut D, axis: Axis, spec: &PadSpec) {
    doc.translate_all(axis.component(spec.offset()));
}

/// Rotate all objects 90 degrees about the X axis, centered at the origin
pub fn rotate_x90<D: Document>(doc: &mut D) {
    doc.rotate_all(90.0, Vector3::x());
}

/// Rotate all objects 90 degrees about the Y axis, centered at the origin
pub fn rotate_y90<D: Document>(doc: &mut D) {
    doc.rotate_all(90.0, Vector3::y());
}

/// Rotate all objects 90 degrees about the Z axis, centered at the origin
pub fn rotate_z90<D: Document>(doc: &mut D) {
    doc.rotate_all(90.0, Vector3::z());
}

/// Scale all objects around the origin
pub fn scale<D: Document>(doc: &mut D, factors: impl Into<ScaleFactor>) {
    doc.scale_all(factors.into());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{SceneDocument, SceneSolid};
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn bar(x0: f64, x1: f64) -> SceneSolid {
        SceneSolid::new(
            "bar",
            vec![
                Point3::new(x0, -1.0, 0.0),
                Point3::new(x1, -1.0, 0.0),
                Point3::new(x1, 1.0, 0.0),
                Point3::new(x0, 1.0, 2.0),
            ],
            vec![vec![0, 1, 2, 3]],
        )
    }

    #[test]
    fn test_align_left_zeroes_x_min() {
        let mut doc = SceneDocument::new(vec![bar(-3.0, 5.0)]);
        align(&mut doc, Alignment::XLeft).unwrap();

        let bounds = document_bounds(&doc).unwrap();
        assert_relative_eq!(bounds.x_min, 0.0);
        assert_relative_eq!(bounds.x_max, 8.0);
    }

    #[test]
    fn test_align_left_is_idempotent() {
        let mut doc = SceneDocument::new(vec![bar(-3.0, 5.0)]);
        align(&mut doc, Alignment::XLeft).unwrap();
        align(&mut doc, Alignment::XLeft).unwrap();

        let bounds = document_bounds(&doc).unwrap();
        assert_relative_eq!(bounds.x_min, 0.0);
    }

    #[test]
    fn test_align_middle_centers_extent() {
        let mut doc = SceneDocument::new(vec![bar(2.0, 6.0)]);
        align(&mut doc, Alignment::XMiddle).unwrap();

        let bounds = document_bounds(&doc).unwrap();
        assert_relative_eq!(bounds.x_min, -2.0);
        assert_relative_eq!(bounds.x_max, 2.0);
    }

    #[test]
    fn test_align_z_top() {
        let mut doc = SceneDocument::new(vec![bar(0.0, 1.0)]);
        align(&mut doc, Alignment::ZTop).unwrap();

        let bounds = document_bounds(&doc).unwrap();
        assert_relative_eq!(bounds.z_max, 0.0);
        assert_relative_eq!(bounds.z_min, -2.0);
    }

    #[test]
    fn test_align_spans_all_objects() {
        let mut doc = SceneDocument::new(vec![bar(-3.0, 0.0), bar(2.0, 5.0)]);
        align(&mut doc, Alignment::XLeft).unwrap();

        let bounds = document_bounds(&doc).unwrap();
        assert_relative_eq!(bounds.x_min, 0.0);
        assert_relative_eq!(bounds.x_max, 8.0);
    }

    #[test]
    fn test_empty_document_bounds_is_error() {
        let doc = SceneDocument::default();
        assert!(document_bounds(&doc).is_err());
    }

    #[test]
    fn test_offset_pins_even_row() {
        let mut doc = SceneDocument::new(vec![bar(0.0, 1.0)]);
        let spec = PadSpec { pins: 8, pitch: 1.27 };
        offset_pins(&mut doc, Axis::X, &spec);

        let bounds = document_bounds(&doc).unwrap();
        assert_relative_eq!(bounds.x_min, 4.445, epsilon = 1e-9);
    }

    #[test]
    fn test_offset_pins_null_spec_is_noop() {
        let mut doc = SceneDocument::new(vec![bar(0.0, 1.0)]);
        offset_pins(&mut doc, Axis::Y, &PadSpec::NULL);

        let bounds = document_bounds(&doc).unwrap();
        assert_relative_eq!(bounds.y_min, -1.0);
    }

    #[test]
    fn test_rotate_then_align_bottom() {
        let mut doc = SceneDocument::new(vec![bar(0.0, 4.0)]);
        rotate_x90(&mut doc);
        align(&mut doc, Alignment::ZBottom).unwrap();

        let bounds = document_bounds(&doc).unwrap();
        assert_relative_eq!(bounds.z_min, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_uniform_scale() {
        let mut doc = SceneDocument::new(vec![bar(0.0, 2.0)]);
        scale(&mut doc, 0.5);

        let bounds = document_bounds(&doc).unwrap();
        assert_relative_eq!(bounds.x_max, 1.0);
        assert_relative_eq!(bounds.y_min, -0.5);
    }
}
