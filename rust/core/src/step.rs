// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Faceted STEP (ISO-10303-21) subset reader/writer
//!
//! Carries already-faceted solids between sessions:
//! `MANIFOLD_SOLID_BREP`/`FACETED_BREP` → `CLOSED_SHELL` → face →
//! `FACE_OUTER_BOUND`/`FACE_BOUND` → `POLY_LOOP` → `CARTESIAN_POINT`.
//!
//! This is an exchange carrier, not a CAD kernel: B-rep surfaces are never
//! evaluated, and bounds whose loop is not a `POLY_LOOP` (edge loops on
//! curved faces) are skipped. A solid where every bound is skipped carries
//! no usable geometry and is a parse error. The writer emits the same subset
//! the reader accepts.

use memchr::memchr;
use nom::{
    character::complete::{char, multispace0},
    multi::separated_list1,
    number::complete::double,
    sequence::{delimited, preceded},
    IResult,
};
use rustc_hash::FxHashMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};

/// One faceted solid carried by an exchange file
#[derive(Debug, Clone, PartialEq)]
pub struct StepSolid {
    /// Product label, may be empty
    pub name: String,
    /// Distinct vertex coordinates
    pub points: Vec<[f64; 3]>,
    /// Planar polygon loops indexing into `points`
    pub faces: Vec<Vec<u32>>,
}

const SOLID_TYPES: [&str; 2] = ["MANIFOLD_SOLID_BREP", "FACETED_BREP"];
const SHELL_TYPES: [&str; 2] = ["CLOSED_SHELL", "OPEN_SHELL"];
const FACE_TYPES: [&str; 3] = ["ADVANCED_FACE", "FACE_SURFACE", "FACE"];
const BOUND_TYPES: [&str; 2] = ["FACE_OUTER_BOUND", "FACE_BOUND"];

/// Line-oriented scanner over the DATA section entities
pub struct EntityScanner<'a> {
    content: &'a str,
    position: usize,
}

impl<'a> EntityScanner<'a> {
    /// Create a new scanner
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            position: 0,
        }
    }

    /// Restart scanning from the beginning
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Scan for the next entity.
    /// Returns (entity_id, type_name, full entity text including `;`).
    pub fn next_entity(&mut self) -> Option<(u32, &'a str, &'a str)> {
        let bytes = self.content.as_bytes();

        let start = self.position + memchr(b'#', &bytes[self.position..])?;
        let end_offset = memchr(b';', &bytes[start..])?;
        let end = start + end_offset + 1;

        // Entity ID directly after '#'
        let id_start = start + 1;
        let id_end = self.content[id_start..end]
            .find(|c: char| !c.is_ascii_digit())
            .map(|i| id_start + i)
            .unwrap_or(end);
        let id = self.content[id_start..id_end].parse::<u32>().ok()?;

        // Type name between '=' and the attribute list
        let eq_pos = self.content[id_end..end].find('=')?;
        let type_start = id_end + eq_pos + 1;
        let type_start = self.content[type_start..end]
            .find(|c: char| !c.is_whitespace())
            .map(|i| type_start + i)?;
        let type_end = self.content[type_start..end]
            .find(|c: char| c == '(' || c.is_whitespace())
            .map(|i| type_start + i)
            .unwrap_or(end);

        let type_name = &self.content[type_start..type_end];
        let text = &self.content[start..end];

        self.position = end;
        Some((id, type_name, text))
    }
}

struct RawEntity<'a> {
    type_name: &'a str,
    text: &'a str,
}

/// Parse the faceted solids out of STEP file content.
///
/// Fails with [`Error::StepParse`] when the content carries no recognizable
/// solid or a reference chain is broken.
pub fn read_step(content: &str) -> Result<Vec<StepSolid>> {
    let mut entities: FxHashMap<u32, RawEntity> = FxHashMap::default();
    let mut roots: Vec<u32> = Vec::new();

    let mut scanner = EntityScanner::new(content);
    while let Some((id, type_name, text)) = scanner.next_entity() {
        if SOLID_TYPES.contains(&type_name) {
            roots.push(id);
        }
        entities.insert(id, RawEntity { type_name, text });
    }

    if roots.is_empty() {
        return Err(Error::StepParse(
            "no faceted solid entity found".to_string(),
        ));
    }

    roots
        .iter()
        .map(|id| assemble_solid(*id, &entities))
        .collect()
}

/// Read and parse a STEP file from disk
pub fn read_step_file(path: &Path) -> Result<Vec<StepSolid>> {
    let content = fs::read_to_string(path)?;
    read_step(&content)
}

fn assemble_solid(root: u32, entities: &FxHashMap<u32, RawEntity>) -> Result<StepSolid> {
    let brep = &entities[&root];
    let name = quoted_name(brep.text).unwrap_or("").to_string();

    let shell_id = entity_refs(brep.text)
        .into_iter()
        .find(|id| matches_type(entities, *id, &SHELL_TYPES))
        .ok_or_else(|| Error::StepParse(format!("solid #{root} has no shell")))?;

    let mut points: Vec<[f64; 3]> = Vec::new();
    let mut faces: Vec<Vec<u32>> = Vec::new();
    let mut point_index: FxHashMap<u32, u32> = FxHashMap::default();

    for face_id in typed_refs(entities, &entities[&shell_id], &FACE_TYPES) {
        for bound_id in typed_refs(entities, &entities[&face_id], &BOUND_TYPES) {
            let loop_ids = typed_refs(entities, &entities[&bound_id], &["POLY_LOOP"]);
            let Some(loop_id) = loop_ids.into_iter().next() else {
                continue;
            };

            let mut polygon = Vec::new();
            for point_id in entity_refs(entities[&loop_id].text) {
                let local = match point_index.get(&point_id) {
                    Some(i) => *i,
                    None => {
                        let raw = entities.get(&point_id).ok_or_else(|| {
                            Error::StepParse(format!("dangling point reference #{point_id}"))
                        })?;
                        let coords = point_coords(raw.text).ok_or_else(|| {
                            Error::StepParse(format!("unreadable CARTESIAN_POINT #{point_id}"))
                        })?;
                        let i = points.len() as u32;
                        points.push(coords);
                        point_index.insert(point_id, i);
                        i
                    }
                };
                polygon.push(local);
            }
            if polygon.len() >= 3 {
                faces.push(polygon);
            }
        }
    }

    // An empty solid would report a phantom bounding box at the origin and
    // corrupt whole-document alignment downstream.
    if points.is_empty() || faces.is_empty() {
        return Err(Error::StepParse(format!(
            "solid #{root} carries no faceted geometry"
        )));
    }

    Ok(StepSolid {
        name,
        points,
        faces,
    })
}

fn matches_type(entities: &FxHashMap<u32, RawEntity>, id: u32, types: &[&str]) -> bool {
    entities
        .get(&id)
        .map_or(false, |e| types.contains(&e.type_name))
}

/// References out of an entity, filtered to the given target types
fn typed_refs(
    entities: &FxHashMap<u32, RawEntity>,
    entity: &RawEntity,
    types: &[&str],
) -> Vec<u32> {
    entity_refs(entity.text)
        .into_iter()
        .filter(|id| matches_type(entities, *id, types))
        .collect()
}

/// All `#N` references in an entity's attribute list (its own ID excluded)
fn entity_refs(text: &str) -> Vec<u32> {
    let bytes = text.as_bytes();
    let body_start = memchr(b'=', bytes).map(|i| i + 1).unwrap_or(0);

    let mut refs = Vec::new();
    let mut pos = body_start;
    while let Some(off) = memchr(b'#', &bytes[pos..]) {
        let digit_start = pos + off + 1;
        let mut end = digit_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > digit_start {
            if let Ok(id) = text[digit_start..end].parse() {
                refs.push(id);
            }
        }
        pos = end.max(digit_start);
    }
    refs
}

/// First quoted attribute, conventionally the entity name
fn quoted_name(text: &str) -> Option<&str> {
    let start = text.find('\'')? + 1;
    let end = text[start..].find('\'')? + start;
    Some(&text[start..end])
}

/// Parenthesized comma-separated float list: `(1.,2.5,-3.E-1)`
fn float_list(input: &str) -> IResult<&str, Vec<f64>> {
    delimited(
        char('('),
        separated_list1(
            delimited(multispace0, char(','), multispace0),
            preceded(multispace0, double),
        ),
        preceded(multispace0, char(')')),
    )(input)
}

/// Extract coordinates from a CARTESIAN_POINT entity.
/// Handles both `CARTESIAN_POINT('',(x,y,z))` and the nameless
/// `CARTESIAN_POINT((x,y,z))` form; a missing Z defaults to 0.
fn point_coords(text: &str) -> Option<[f64; 3]> {
    let outer = text.find('(')?;
    let inner = text[outer + 1..].find('(')? + outer + 1;

    let (_, coords) = float_list(&text[inner..]).ok()?;
    let x = *coords.first()?;
    let y = coords.get(1).copied()?;
    let z = coords.get(2).copied().unwrap_or(0.0);
    Some([x, y, z])
}

fn fmt_coord(v: f64) -> String {
    format!("{v:.6}")
}

/// Serialize faceted solids as a STEP file.
///
/// Fails with [`Error::StepParse`] when a face references a point index
/// outside the solid's point list.
pub fn write_step<W: Write>(out: &mut W, solids: &[StepSolid]) -> Result<()> {
    writeln!(out, "ISO-10303-21;")?;
    writeln!(out, "HEADER;")?;
    writeln!(out, "FILE_DESCRIPTION(('faceted part model'),'2;1');")?;
    writeln!(out, "FILE_NAME('','',(''),(''),'padup','','');")?;
    writeln!(out, "FILE_SCHEMA(('AUTOMOTIVE_DESIGN'));")?;
    writeln!(out, "ENDSEC;")?;
    writeln!(out, "DATA;")?;

    let mut next_id: u32 = 1;
    let mut take_id = || {
        let id = next_id;
        next_id += 1;
        id
    };

    for solid in solids {
        let point_ids: Vec<u32> = solid
            .points
            .iter()
            .map(|_| take_id())
            .collect();
        for (p, id) in solid.points.iter().zip(&point_ids) {
            writeln!(
                out,
                "#{id}=CARTESIAN_POINT('',({},{},{}));",
                fmt_coord(p[0]),
                fmt_coord(p[1]),
                fmt_coord(p[2]),
            )?;
        }

        let mut face_ids = Vec::with_capacity(solid.faces.len());
        for polygon in &solid.faces {
            let loop_id = take_id();
            let mut refs = Vec::with_capacity(polygon.len());
            for i in polygon {
                let point_id = point_ids.get(*i as usize).ok_or_else(|| {
                    Error::StepParse(format!(
                        "face index {i} out of range for solid '{}' ({} points)",
                        solid.name,
                        point_ids.len()
                    ))
                })?;
                refs.push(format!("#{point_id}"));
            }
            writeln!(out, "#{loop_id}=POLY_LOOP('',({}));", refs.join(","))?;

            let bound_id = take_id();
            writeln!(out, "#{bound_id}=FACE_OUTER_BOUND('',#{loop_id},.T.);")?;

            let face_id = take_id();
            writeln!(out, "#{face_id}=ADVANCED_FACE('',(#{bound_id}),$,.T.);")?;
            face_ids.push(face_id);
        }

        let shell_id = take_id();
        let face_refs: Vec<String> = face_ids.iter().map(|id| format!("#{id}")).collect();
        writeln!(
            out,
            "#{shell_id}=CLOSED_SHELL('',({}));",
            face_refs.join(",")
        )?;

        let brep_id = take_id();
        // Quotes in labels would break the quoted-name convention
        let label = solid.name.replace('\'', "_");
        writeln!(
            out,
            "#{brep_id}=MANIFOLD_SOLID_BREP('{label}',#{shell_id});"
        )?;
    }

    writeln!(out, "ENDSEC;")?;
    writeln!(out, "END-ISO-10303-21;")?;
    Ok(())
}

/// Write faceted solids to a STEP file on disk
pub fn save_step(path: &Path, solids: &[StepSolid]) -> Result<()> {
    let file = fs::File::create(path)?;
    let mut out = BufWriter::new(file);
    write_step(&mut out, solids)?;
    out.flush()?;
    Ok(())
}
