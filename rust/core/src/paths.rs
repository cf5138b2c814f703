// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sibling file path derivation
//!
//! A processed model keeps its STEP file and its VRML preview side by side;
//! these helpers derive one path from the other.

use std::path::{Path, PathBuf};

/// Extensions probed when looking for the exchange file next to a mesh file,
/// in order; first existing wins.
pub const EXCHANGE_EXTENSIONS: [&str; 4] = ["step", "STEP", "stp", "STP"];

/// Same directory, filename prefixed with `tmp_`
pub fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("tmp_{name}"))
}

/// Same directory and basename, extension replaced with `.wrl`
pub fn wrl_path(path: &Path) -> PathBuf {
    path.with_extension("wrl")
}

/// Locate the exchange-format file matching a mesh filename under `dir`.
///
/// `mesh_name` may use either path separator; only its final component is
/// used. Each extension in [`EXCHANGE_EXTENSIONS`] is tried in turn. A miss
/// is a normal outcome, not an error.
pub fn sibling_exchange_file(dir: &Path, mesh_name: &str) -> Option<PathBuf> {
    let normalized = mesh_name.replace('\\', "/");
    let name = normalized.rsplit('/').next().unwrap_or(&normalized);
    let stem = Path::new(name).file_stem()?.to_string_lossy().into_owned();

    for ext in EXCHANGE_EXTENSIONS {
        let candidate = dir.join(format!("{stem}.{ext}"));
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}
