//! Driver - Write, Check or Print
//!
//! The manifest is generated fully in memory before any file is touched.
//! Output streams are passed in so the binary and the tests share one path.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::diff::{first_difference, Difference};
use crate::generator::{GenerateError, ManifestGenerator};
use crate::hashing::manifest_digest;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Write the manifest to the output path
    #[default]
    Write,
    /// Compare the output path against freshly generated text
    Check,
    /// Print the manifest to stdout
    Stdout,
}

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Written,
    UpToDate,
    Mismatch(Difference),
    Printed,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Mismatch(_))
    }
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Run one mode against `catalog`.
///
/// User-facing messages go to `out`; the mismatch diagnostic goes to `err`.
pub fn run(
    mode: Mode,
    catalog: &Catalog<'_>,
    output_path: &Path,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<Outcome, DriverError> {
    let content = ManifestGenerator::new().generate(catalog)?;
    debug!(digest = %manifest_digest(&content), bytes = content.len(), "generated manifest");

    match mode {
        Mode::Write => {
            fs::write(output_path, &content).map_err(|source| DriverError::Write {
                path: output_path.to_path_buf(),
                source,
            })?;
            info!(path = %output_path.display(), "wrote manifest");
            writeln!(out, "Wrote {}", output_path.display())?;
            Ok(Outcome::Written)
        }
        Mode::Check => {
            let existing = fs::read_to_string(output_path).map_err(|source| DriverError::Read {
                path: output_path.to_path_buf(),
                source,
            })?;
            debug!(digest = %manifest_digest(&existing), path = %output_path.display(), "read existing manifest");

            let name = display_name(output_path);
            match first_difference(&existing, &content) {
                None => {
                    info!(path = %output_path.display(), "manifest up to date");
                    writeln!(out, "OK: {} is up to date.", name)?;
                    Ok(Outcome::UpToDate)
                }
                Some(difference) => {
                    writeln!(err, "MISMATCH: {} differs from generated output.", name)?;
                    writeln!(err, "{}", difference)?;
                    Ok(Outcome::Mismatch(difference))
                }
            }
        }
        Mode::Stdout => {
            out.write_all(content.as_bytes())?;
            out.flush()?;
            Ok(Outcome::Printed)
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}
