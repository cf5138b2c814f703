// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned bounding boxes
//!
//! Per-object boxes are reduced into one combined box before alignment
//! operations. Kept plain-f64 so the core crate carries no math dependency.

use crate::error::{Error, Result};

/// Axis-aligned bounding box in f64 precision
///
/// Invariant: min <= max per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub z_min: f64,
    pub z_max: f64,
}

impl BoundingBox {
    /// Create a box from explicit extents
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64, z_min: f64, z_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
            z_min,
            z_max,
        }
    }

    /// Degenerate box containing a single point
    pub fn from_point(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, x, y, y, z, z)
    }

    /// Expand the box to include a point
    #[inline]
    pub fn expand(&mut self, x: f64, y: f64, z: f64) {
        self.x_min = self.x_min.min(x);
        self.x_max = self.x_max.max(x);
        self.y_min = self.y_min.min(y);
        self.y_max = self.y_max.max(y);
        self.z_min = self.z_min.min(z);
        self.z_max = self.z_max.max(z);
    }

    /// Smallest box containing both boxes
    #[inline]
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x_min: self.x_min.min(other.x_min),
            x_max: self.x_max.max(other.x_max),
            y_min: self.y_min.min(other.y_min),
            y_max: self.y_max.max(other.y_max),
            z_min: self.z_min.min(other.z_min),
            z_max: self.z_max.max(other.z_max),
        }
    }

    /// Center of the X extent
    #[inline]
    pub fn center_x(&self) -> f64 {
        (self.x_min + self.x_max) / 2.0
    }

    /// Center of the Y extent
    #[inline]
    pub fn center_y(&self) -> f64 {
        (self.y_min + self.y_max) / 2.0
    }

    /// Center of the Z extent
    #[inline]
    pub fn center_z(&self) -> f64 {
        (self.z_min + self.z_max) / 2.0
    }
}

/// Fold a sequence of boxes into the smallest box containing all of them.
///
/// Pure and order-independent. An empty input is an explicit
/// [`Error::EmptyBounds`] instead of the reference's unconditional read of
/// the first element.
pub fn reduce(boxes: &[BoundingBox]) -> Result<BoundingBox> {
    let (first, rest) = boxes.split_first().ok_or(Error::EmptyBounds)?;
    Ok(rest.iter().fold(*first, |acc, b| acc.union(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_two_boxes() {
        let a = BoundingBox::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0);
        let b = BoundingBox::new(-1.0, 0.5, 2.0, 3.0, -2.0, 2.0);

        let combined = reduce(&[a, b]).unwrap();
        assert_eq!(combined.x_min, -1.0);
        assert_eq!(combined.x_max, 1.0);
        assert_eq!(combined.y_min, 0.0);
        assert_eq!(combined.y_max, 3.0);
        assert_eq!(combined.z_min, -2.0);
        assert_eq!(combined.z_max, 2.0);
    }

    #[test]
    fn test_reduce_is_order_independent() {
        let a = BoundingBox::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0);
        let b = BoundingBox::new(-1.0, 0.5, 2.0, 3.0, -2.0, 2.0);
        let c = BoundingBox::new(0.2, 4.0, -1.0, 0.0, 1.0, 1.5);

        let forward = reduce(&[a, b, c]).unwrap();
        let backward = reduce(&[c, b, a]).unwrap();
        let rotated = reduce(&[b, c, a]).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward, rotated);
    }

    #[test]
    fn test_reduce_single_box_is_identity() {
        let a = BoundingBox::new(-3.0, 5.0, 1.0, 2.0, 0.0, 0.5);
        assert_eq!(reduce(&[a]).unwrap(), a);
    }

    #[test]
    fn test_reduce_empty_is_error() {
        assert!(matches!(reduce(&[]), Err(Error::EmptyBounds)));
    }

    #[test]
    fn test_expand_and_centers() {
        let mut b = BoundingBox::from_point(1.0, 2.0, 3.0);
        b.expand(-1.0, 4.0, 3.0);
        assert_eq!(b.x_min, -1.0);
        assert_eq!(b.x_max, 1.0);
        assert_eq!(b.center_x(), 0.0);
        assert_eq!(b.center_y(), 3.0);
        assert_eq!(b.center_z(), 3.0);
    }
}
