// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the host-independent core
#[derive(Error, Debug)]
pub enum Error {
    #[error("no pad/pitch pattern in filename: {0}")]
    PadPatternMissing(String),

    #[error("malformed pad/pitch value '{value}' in filename: {filename}")]
    PadValueMalformed { filename: String, value: String },

    #[error("zero pin count or pitch in filename: {0}")]
    PadValueZero(String),

    #[error("cannot reduce an empty sequence of bounding boxes")]
    EmptyBounds,

    #[error("STEP parse error: {0}")]
    StepParse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Pad/pitch lookup failures are warned about and replaced with the null
    /// spec; everything else aborts the session.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::PadPatternMissing(_)
                | Error::PadValueMalformed { .. }
                | Error::PadValueZero(_)
        )
    }
}
