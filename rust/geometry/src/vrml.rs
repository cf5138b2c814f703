// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! VRML 2.0 scene export
//!
//! Writes the mesh sequence as one `Shape{...}` block per face mesh. The
//! grammar is fixed: downstream viewers consume this file byte-for-byte, so
//! points are formatted to 3 decimals, color and transparency to 6, and each
//! face's index triple is terminated with a literal `-1`. The color's alpha
//! channel is dropped.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::mesh::FaceMesh;

/// Mandatory first line of the scene file
pub const VRML_HEADER: &str = "#VRML V2.0 utf8";

/// Serialize the scene to any writer
pub fn write_scene<W: Write>(out: &mut W, meshes: &[FaceMesh]) -> io::Result<()> {
    write!(out, "{VRML_HEADER}\n\n")?;

    for mesh in meshes {
        write!(out, "Shape {{ geometry IndexedFaceSet \n{{ coordIndex [")?;
        for (i, face) in mesh.faces.iter().enumerate() {
            if i > 0 {
                write!(out, ",")?;
            }
            write!(out, "{},{},{},-1", face[0], face[1], face[2])?;
        }
        write!(out, "]\n")?;

        write!(out, "coord Coordinate {{ point [")?;
        for (i, p) in mesh.points.iter().enumerate() {
            if i > 0 {
                write!(out, ",")?;
            }
            write!(out, "{:.3} {:.3} {:.3}", p.x, p.y, p.z)?;
        }
        write!(out, "]\n}}")?;
        write!(out, "}}\n")?;

        write!(
            out,
            "appearance Appearance{{material Material{{diffuseColor {:.6} {:.6} {:.6}\n",
            mesh.color.r, mesh.color.g, mesh.color.b
        )?;
        write!(out, "transparency {:.6}}}}}", mesh.transparency)?;
        write!(out, "}}\n")?;
    }
    Ok(())
}

/// Write the scene file at `path`.
///
/// A write failure propagates as-is; no partial-file cleanup is attempted.
pub fn export_scene(path: &Path, meshes: &[FaceMesh]) -> Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    write_scene(&mut out, meshes)?;
    out.flush()?;
    tracing::info!(path = %path.display(), shapes = meshes.len(), "scene file written");
    Ok(())
}
