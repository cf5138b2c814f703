// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during document and mesh processing
#[derive(Error, Debug)]
pub enum Error {
    #[error("face index {index} out of range for '{label}' ({count} faces)")]
    FaceOutOfRange {
        label: String,
        index: usize,
        count: usize,
    },

    #[error("degenerate face loop with {0} points")]
    DegenerateFace(usize),

    #[error("point index {index} out of range for '{label}' ({count} points)")]
    PointOutOfRange {
        label: String,
        index: usize,
        count: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("core error: {0}")]
    Core(#[from] padup_core::Error),
}
