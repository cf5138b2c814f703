// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One batch session: load the model, apply the requested operations in
//! order, export the VRML preview, save the STEP file.

use anyhow::{bail, Context};
use std::path::{Path, PathBuf};

use padup_core::{parse_pad_spec, sibling_exchange_file, temp_path, wrl_path, PadSpec};
use padup_geometry::{
    align, document_meshes, export_scene, offset_pins, rotate_x90, rotate_y90, rotate_z90, scale,
    Alignment, Axis, ScaleFactor, SceneDocument, Vector3,
};

use crate::config::{resolve_input, Config};

/// One requested document operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    Align(Alignment),
    RotateX,
    RotateY,
    RotateZ,
    Scale(ScaleFactor),
    Pad(Axis),
}

/// Parsed invocation
#[derive(Debug, Clone)]
pub struct Session {
    /// Main model file: a `.step` path, or a `.wrl` name to resolve through
    /// the model library
    pub input: PathBuf,
    /// Operations applied in order
    pub operations: Vec<Operation>,
    /// Save to a `tmp_`-prefixed copy instead of overwriting the original
    pub temp_copy: bool,
    /// Optional uniform scale applied to exported scene points only
    pub wrl_scale: Option<f64>,
}

/// Parse one operation token
pub fn parse_operation(token: &str) -> Option<Operation> {
    if let Some(value) = token.strip_prefix("scale=") {
        return parse_scale(value).map(Operation::Scale);
    }
    let op = match token {
        "align-x-left" => Operation::Align(Alignment::XLeft),
        "align-x-right" => Operation::Align(Alignment::XRight),
        "align-x-middle" => Operation::Align(Alignment::XMiddle),
        "align-y-top" => Operation::Align(Alignment::YTop),
        "align-y-bottom" => Operation::Align(Alignment::YBottom),
        "align-y-middle" => Operation::Align(Alignment::YMiddle),
        "align-z-top" => Operation::Align(Alignment::ZTop),
        "align-z-bottom" => Operation::Align(Alignment::ZBottom),
        "align-z-middle" => Operation::Align(Alignment::ZMiddle),
        "rotate-x" => Operation::RotateX,
        "rotate-y" => Operation::RotateY,
        "rotate-z" => Operation::RotateZ,
        "pad-x" => Operation::Pad(Axis::X),
        "pad-y" => Operation::Pad(Axis::Y),
        "pad-z" => Operation::Pad(Axis::Z),
        _ => return None,
    };
    Some(op)
}

/// `scale=0.3937` or `scale=1,1,2`
fn parse_scale(value: &str) -> Option<ScaleFactor> {
    if let Some((x, rest)) = value.split_once(',') {
        let (y, z) = rest.split_once(',')?;
        Some(ScaleFactor::PerAxis(Vector3::new(
            x.trim().parse().ok()?,
            y.trim().parse().ok()?,
            z.trim().parse().ok()?,
        )))
    } else {
        value.trim().parse().ok().map(ScaleFactor::Uniform)
    }
}

/// Run the session to completion
pub fn run(session: &Session, config: &Config) -> anyhow::Result<()> {
    let input = resolve_input(&session.input);
    let step_path = locate_model(&input, config)?;

    let mut doc = SceneDocument::open(&step_path)
        .with_context(|| format!("loading {}", step_path.display()))?;
    tracing::info!(path = %step_path.display(), "model loaded");

    let mut pad_spec: Option<PadSpec> = None;
    for op in &session.operations {
        match op {
            Operation::Align(alignment) => align(&mut doc, *alignment)?,
            Operation::RotateX => rotate_x90(&mut doc),
            Operation::RotateY => rotate_y90(&mut doc),
            Operation::RotateZ => rotate_z90(&mut doc),
            Operation::Scale(factors) => scale(&mut doc, *factors),
            Operation::Pad(axis) => {
                let spec = pad_spec.get_or_insert_with(|| load_pad_spec(&step_path));
                offset_pins(&mut doc, *axis, spec);
            }
        }
    }

    let meshes = document_meshes(&doc, session.wrl_scale)?;
    let scene_path = wrl_path(&step_path);
    export_scene(&scene_path, &meshes)
        .with_context(|| format!("writing {}", scene_path.display()))?;

    let out_path = if session.temp_copy {
        temp_path(&step_path)
    } else {
        step_path.clone()
    };
    doc.save(&out_path)
        .with_context(|| format!("writing {}", out_path.display()))?;
    tracing::info!(path = %out_path.display(), "model saved");

    Ok(())
}

/// A `.wrl` input names a mesh file; the model to process is its sibling
/// exchange file, searched next to the input and then in the model library.
fn locate_model(input: &Path, config: &Config) -> anyhow::Result<PathBuf> {
    // Mesh files come in as .wrl or .WRL depending on the library
    let is_mesh = input
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("wrl"));
    if !is_mesh {
        return Ok(input.to_path_buf());
    }

    let mesh_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut search_dirs: Vec<PathBuf> = Vec::new();
    if let Some(parent) = input.parent() {
        search_dirs.push(parent.to_path_buf());
    }
    if let Some(lib) = &config.model_lib_dir {
        search_dirs.push(lib.clone());
    }

    for dir in &search_dirs {
        if let Some(found) = sibling_exchange_file(dir, &mesh_name) {
            tracing::info!(path = %found.display(), "sibling exchange file found");
            return Ok(found);
        }
    }
    bail!("no exchange file matching {mesh_name} in the search directories");
}

/// Parse the pad spec out of the model filename. Lookup failures are
/// recoverable: warn and fall back to the null spec (zero offset).
fn load_pad_spec(path: &Path) -> PadSpec {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match parse_pad_spec(&name) {
        Ok(spec) => {
            tracing::info!(pins = spec.pins, pitch = spec.pitch, "pad spec parsed");
            spec
        }
        Err(err) => {
            tracing::warn!("{err}; proceeding with zero pad offset");
            PadSpec::NULL
        }
    }
}
