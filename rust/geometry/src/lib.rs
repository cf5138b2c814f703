// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Padup Geometry
//!
//! Document operations for footprint preparation: an explicit capability
//! surface over solid objects, an in-memory faceted scene, alignment and
//! transform operations, per-face mesh building, and VRML 2.0 scene export.
//! Uses nalgebra for points, vectors, and rotations.

pub mod builder;
pub mod document;
pub mod error;
pub mod mesh;
pub mod ops;
pub mod scene;
pub mod vrml;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use builder::{document_meshes, object_meshes, MESH_DEVIATION};
pub use document::{Axis, Color, Document, ScaleFactor, SolidObject, TessellatedFace};
pub use error::{Error, Result};
pub use mesh::FaceMesh;
pub use ops::{align, document_bounds, offset_pins, rotate_x90, rotate_y90, rotate_z90, scale, Alignment};
pub use scene::{SceneDocument, SceneSolid};
pub use vrml::{export_scene, write_scene, VRML_HEADER};
