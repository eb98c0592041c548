//! kustomization-gen - Deterministic kustomization.yaml Generator
//!
//! The base kustomization for notebook and runtime ImageStreams is a long,
//! highly repetitive file: every image gets the same replacement stanzas
//! with different parameters. This crate expresses that pattern as code.
//!
//! Catalog -> validation -> generator -> driver (write / check / stdout).

pub mod catalog;
pub mod manifest;
pub mod template;
pub mod validation;
pub mod generator;
pub mod diff;
pub mod hashing;
pub mod driver;

pub use catalog::{Catalog, Runtime, Workbench};
pub use manifest::{Kustomization, Replacement, TagGeneration};
pub use validation::{ValidationReport, ValidationViolation, Validator, ViolationSeverity};
pub use generator::{generate, replacements, GenerateError, ManifestGenerator};
pub use diff::{first_difference, Difference, Side};
pub use driver::{run, DriverError, Mode, Outcome};

/// Where the generated manifest lives, relative to the repository root.
///
/// Resolved against the working directory at run time.
pub const DEFAULT_OUTPUT_FILE: &str = "manifests/base/kustomization.yaml";
