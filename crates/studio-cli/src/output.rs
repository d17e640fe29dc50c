//! Result serialization to JSON and CSV artifacts.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Write a value as pretty JSON to `path`, or to stdout when no path is
/// given.
pub fn write_json<T: Serialize>(value: &T, path: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;

    match path {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write {:?}", path))?;
            tracing::info!("Wrote JSON result to {:?}", path);
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Write paired columns as CSV under the given header line.
pub fn write_csv_pairs(header: &str, xs: &[f64], ys: &[f64], path: &Path) -> Result<()> {
    let mut f = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {:?}", path))?;

    writeln!(f, "{}", header)?;
    for (x, y) in xs.iter().zip(ys.iter()) {
        writeln!(f, "{},{}", x, y)?;
    }

    tracing::info!("Wrote CSV to {:?}", path);
    Ok(())
}
