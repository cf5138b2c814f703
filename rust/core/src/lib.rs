// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Padup Core
//!
//! Host-independent leaves of the footprint preparation pipeline:
//!
//! - **Pad/pitch parsing**: extract pin count and spacing from part
//!   filenames with [nom](https://docs.rs/nom) and compute the pin-1
//!   centering offset
//! - **Bounding boxes**: fold per-object boxes into one combined box
//! - **Path helpers**: derive temp / `.wrl` sibling paths and locate the
//!   exchange file matching a mesh filename
//! - **STEP carrier**: faceted ISO-10303-21 subset reader/writer with
//!   [memchr](https://docs.rs/memchr)-based entity scanning
//!
//! ## Quick start
//!
//! ```rust
//! use padup_core::{parse_pad_spec, PadSpec};
//!
//! let spec = parse_pad_spec("PinHeader_08x1.27mm.step").unwrap();
//! assert_eq!(spec.pins, 8);
//! assert!((spec.offset() - 4.445).abs() < 1e-9);
//! ```

pub mod bounds;
pub mod error;
pub mod padspec;
pub mod paths;
pub mod step;

pub use bounds::{reduce, BoundingBox};
pub use error::{Error, Result};
pub use padspec::{parse_pad_spec, PadSpec};
pub use paths::{sibling_exchange_file, temp_path, wrl_path, EXCHANGE_EXTENSIONS};
pub use step::{read_step, read_step_file, save_step, write_step, EntityScanner, StepSolid};
