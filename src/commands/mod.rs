//! Command implementations

mod detect;
mod list;
mod scan;

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::Context;

pub use detect::detect;
pub use list::{grammars, types};
pub use scan::{ScanArgs, scan};

/// Read `file`, or standard input when it is `None` or `-`
fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        },
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).context("failed to read standard input")?;
            Ok(text)
        },
    }
}
