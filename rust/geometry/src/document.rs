// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Document capability surface
//!
//! The original tooling mutated an ambient "active document" inside the host
//! application. Here the host surface is an explicit pair of traits: a
//! [`SolidObject`] answers shape/view queries for one part, a [`Document`]
//! enumerates objects and applies whole-document transforms. Operations take
//! a document handle; an in-memory scene or a real host binding can satisfy
//! the traits equally.

use nalgebra::{Point3, Vector3};
use padup_core::BoundingBox;

use crate::error::Result;

/// RGBA display color, channels in [0,1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    /// Neutral opaque gray used when an object view carries no color entries
    pub const DEFAULT: Color = Color {
        r: 0.8,
        g: 0.8,
        b: 0.8,
        a: 1.0,
    };

    /// Opaque color from RGB channels
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Color from RGBA channels
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

/// Triangle mesh for a single geometric face
#[derive(Debug, Clone)]
pub struct TessellatedFace {
    /// Vertex positions local to this face
    pub points: Vec<Point3<f64>>,
    /// Triangle index triples into `points`
    pub triangles: Vec<[u32; 3]>,
}

/// Uniform or per-axis scale request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleFactor {
    Uniform(f64),
    PerAxis(Vector3<f64>),
}

impl ScaleFactor {
    /// Per-axis factors regardless of variant
    pub fn vector(self) -> Vector3<f64> {
        match self {
            ScaleFactor::Uniform(f) => Vector3::new(f, f, f),
            ScaleFactor::PerAxis(v) => v,
        }
    }
}

impl From<f64> for ScaleFactor {
    fn from(f: f64) -> Self {
        ScaleFactor::Uniform(f)
    }
}

impl From<Vector3<f64>> for ScaleFactor {
    fn from(v: Vector3<f64>) -> Self {
        ScaleFactor::PerAxis(v)
    }
}

/// World axis selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Unit vector along the axis
    pub fn unit(self) -> Vector3<f64> {
        match self {
            Axis::X => Vector3::x(),
            Axis::Y => Vector3::y(),
            Axis::Z => Vector3::z(),
        }
    }

    /// Vector with `value` on this axis and zero elsewhere
    pub fn component(self, value: f64) -> Vector3<f64> {
        self.unit() * value
    }
}

/// Shape and view queries for one solid part
pub trait SolidObject {
    /// Display label of the object
    fn label(&self) -> &str;

    /// Axis-aligned bounds of the solid
    fn bounding_box(&self) -> BoundingBox;

    /// Number of geometric faces
    fn face_count(&self) -> usize;

    /// Triangulate one face within the given deviation tolerance
    /// (smaller is finer)
    fn tessellate_face(&self, index: usize, deviation: f64) -> Result<TessellatedFace>;

    /// Per-face display colors; may be shorter than `face_count`, in which
    /// case the first entry paints every face
    fn face_colors(&self) -> &[Color];

    /// Object transparency in [0,1]
    fn transparency(&self) -> f64;
}

/// A set of solid objects with whole-document transform requests.
///
/// Rotation and scale are centered at the world origin.
pub trait Document {
    type Object: SolidObject;

    /// All objects currently in the document
    fn objects(&self) -> &[Self::Object];

    /// Rigid translation of every object
    fn translate_all(&mut self, delta: Vector3<f64>);

    /// Rotation of every object about an axis through the origin
    fn rotate_all(&mut self, angle_deg: f64, axis: Vector3<f64>);

    /// Scale of every object relative to the origin
    fn scale_all(&mut self, factors: ScaleFactor);
}
