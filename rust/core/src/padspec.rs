// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pad/pitch extraction from part filenames
//!
//! Connector and IC model filenames encode pin count and pin spacing as
//! `<pins>x<pitch>mm`, e.g. `PinHeader_08x1.27mm.step`. The parsed spec
//! drives the centering offset that puts pin 1 at the origin.

use nom::{
    bytes::complete::tag,
    character::complete::{char, digit1, one_of},
    combinator::recognize,
    multi::many1,
    sequence::tuple,
    IResult,
};

use crate::error::{Error, Result};

/// Pin count and pitch parsed from a filename
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PadSpec {
    /// Number of pins in one row
    pub pins: u32,
    /// Pin spacing in millimeters
    pub pitch: f64,
}

impl PadSpec {
    /// The "nothing found" spec; its offset is zero
    pub const NULL: PadSpec = PadSpec { pins: 0, pitch: 0.0 };

    /// Check whether this is the null spec
    pub fn is_null(&self) -> bool {
        self.pins == 0 || self.pitch == 0.0
    }

    /// Distance to move a row of pins centered on the origin so that pin 1
    /// lands at coordinate zero.
    ///
    /// Convention (kept exactly as observed in real footprint data, do not
    /// generalize): pins are numbered outward from the centerline, pin 1
    /// adjacent to it. Even count: `(pins/2 - 0.5) * pitch`; odd count:
    /// `floor(pins/2) * pitch`; zero pins: 0.
    pub fn offset(&self) -> f64 {
        if self.pins == 0 {
            return 0.0;
        }
        let half = (self.pins / 2) as f64;
        if self.pins % 2 == 0 {
            (half - 0.5) * self.pitch
        } else {
            half * self.pitch
        }
    }
}

/// Match `<digits>x<digits-and-dots>mm` at the start of the input.
/// Returns the two raw digit groups; numeric validation happens afterwards
/// so a malformed group is reported as such rather than as "no match".
fn pad_pattern(input: &str) -> IResult<&str, (&str, &str)> {
    let (rest, (pins, _, pitch, _)) = tuple((
        digit1,
        char('x'),
        recognize(many1(one_of("0123456789."))),
        tag("mm"),
    ))(input)?;
    Ok((rest, (pins, pitch)))
}

/// Extract the pad spec from a filename.
///
/// Scans for the leftmost occurrence of the `<pins>x<pitch>mm` pattern.
/// Failures are explicit rather than swallowed:
///
/// - [`Error::PadPatternMissing`] when the pattern is absent
/// - [`Error::PadValueMalformed`] when a matched group does not parse
/// - [`Error::PadValueZero`] when either parsed value is zero
///
/// All three are recoverable; callers warn and fall back to [`PadSpec::NULL`].
pub fn parse_pad_spec(filename: &str) -> Result<PadSpec> {
    for (start, c) in filename.char_indices() {
        if !c.is_ascii_digit() {
            continue;
        }
        let Ok((_, (pins_raw, pitch_raw))) = pad_pattern(&filename[start..]) else {
            continue;
        };

        let pins: u32 = pins_raw.parse().map_err(|_| Error::PadValueMalformed {
            filename: filename.to_string(),
            value: pins_raw.to_string(),
        })?;
        let pitch: f64 = pitch_raw.parse().map_err(|_| Error::PadValueMalformed {
            filename: filename.to_string(),
            value: pitch_raw.to_string(),
        })?;

        if pins == 0 || pitch == 0.0 {
            return Err(Error::PadValueZero(filename.to_string()));
        }
        return Ok(PadSpec { pins, pitch });
    }

    Err(Error::PadPatternMissing(filename.to_string()))
}
