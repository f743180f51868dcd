//! Retrieves information about the version of pawnstorm from Git and the build
//! environment. This information is written to the output directory and is
//! printed by the command loop on startup.

use std::path::Path;
use std::{env, fs, io};

fn generate_file(filename: &str, contents: &str) -> io::Result<()> {
    let out_dir = env::var_os("OUT_DIR")
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "OUT_DIR is not set"))?;
    fs::write(Path::new(&out_dir).join(filename), contents)
}

fn generate_build_info() -> io::Result<()> {
    let features = format!(
        "{}popcnt {}bmi1",
        if cfg!(target_feature = "popcnt") {
            "+"
        } else {
            "-"
        },
        if cfg!(target_feature = "bmi1") {
            "+"
        } else {
            "-"
        }
    );
    generate_file("features", &features)
}

fn main() -> shadow_rs::SdResult<()> {
    generate_build_info()?;
    shadow_rs::new()
}
