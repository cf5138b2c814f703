// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! padup - batch preparation of STEP part models for footprint libraries
//!
//! Usage: padup <model> [operations...] [tmp] [--wrl-scale <factor>]

use std::path::PathBuf;

mod config;
mod session;

use config::Config;
use session::{Operation, Session};

fn print_usage() {
    println!("padup - prepare STEP part models for footprint libraries");
    println!();
    println!("Usage: padup <model> [operations...] [options]");
    println!();
    println!("  <model>    Path to a .step file, or a .wrl name whose sibling");
    println!("             exchange file is looked up next to it and in the");
    println!("             model library ($KISYS3DMOD). Relative paths are");
    println!("             resolved against the executable's directory.");
    println!();
    println!("Operations (applied in order):");
    println!("  align-<axis>-<edge>   Align the model on one axis; <axis> is");
    println!("                        x, y or z; <edge> is left/right/middle,");
    println!("                        top/bottom/middle, or top/bottom/middle");
    println!("  rotate-x|y|z          Rotate 90 degrees about a world axis");
    println!("  scale=<f>             Uniform scale, e.g. scale=0.3937");
    println!("  scale=<x>,<y>,<z>     Per-axis scale, e.g. scale=1,1,2");
    println!("  pad-x|y|z             Shift by the pin-row offset parsed from");
    println!("                        the model filename (NNxP.PPmm)");
    println!();
    println!("Options:");
    println!("  tmp                   Save to a tmp_-prefixed copy instead of");
    println!("                        overwriting the original");
    println!("  --wrl-scale <f>       Scale exported scene points only");
    println!();
    println!("The processed model is always exported alongside as a VRML 2.0");
    println!("scene with the same stem and a .wrl extension.");
}

fn build_session(args: &[String]) -> Result<Session, String> {
    let input = PathBuf::from(&args[0]);
    let mut operations: Vec<Operation> = Vec::new();
    let mut temp_copy = false;
    let mut wrl_scale: Option<f64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "tmp" => temp_copy = true,
            "--wrl-scale" => {
                i += 1;
                let value = args.get(i).ok_or("--wrl-scale requires a value")?;
                wrl_scale = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid --wrl-scale value: {value}"))?,
                );
            }
            token => match session::parse_operation(token) {
                Some(op) => operations.push(op),
                None => return Err(format!("unknown operation: {token}")),
            },
        }
        i += 1;
    }

    Ok(Session {
        input,
        operations,
        temp_copy,
        wrl_scale,
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args[0] == "--help" || args[0] == "-h" {
        print_usage();
        return;
    }

    let session = match build_session(&args) {
        Ok(session) => session,
        Err(message) => {
            eprintln!("Error: {message}");
            eprintln!();
            print_usage();
            std::process::exit(2);
        }
    };

    let config = Config::from_env();
    if let Err(err) = session::run(&session, &config) {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use padup_geometry::Alignment;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_session_full_invocation() {
        let session = build_session(&strings(&[
            "PinHeader_08x1.27mm.step",
            "rotate-x",
            "align-z-bottom",
            "pad-x",
            "tmp",
            "--wrl-scale",
            "0.3937",
        ]))
        .unwrap();

        assert_eq!(session.input, PathBuf::from("PinHeader_08x1.27mm.step"));
        assert_eq!(
            session.operations,
            vec![
                Operation::RotateX,
                Operation::Align(Alignment::ZBottom),
                Operation::Pad(padup_geometry::Axis::X),
            ]
        );
        assert!(session.temp_copy);
        assert_eq!(session.wrl_scale, Some(0.3937));
    }

    #[test]
    fn test_build_session_rejects_unknown_token() {
        let err = build_session(&strings(&["part.step", "align-sideways"])).unwrap_err();
        assert!(err.contains("align-sideways"));
    }

    #[test]
    fn test_build_session_wrl_scale_needs_value() {
        assert!(build_session(&strings(&["part.step", "--wrl-scale"])).is_err());
        assert!(build_session(&strings(&["part.step", "--wrl-scale", "x"])).is_err());
    }
}
