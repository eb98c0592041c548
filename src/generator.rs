//! Manifest Generator - Single Entry Point
//!
//! `generate` always validates the catalog first. No bypass.

use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::{Catalog, Runtime, Workbench};
use crate::manifest::{Replacement, ReplacementTarget, TagGeneration};
use crate::template::{render_template, TemplateError};
use crate::validation::Validator;

#[cfg(feature = "test-hooks")]
use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(feature = "test-hooks")]
static VALIDATION_CALL_COUNT: AtomicU32 = AtomicU32::new(0);

#[cfg(feature = "test-hooks")]
pub fn get_validation_call_count() -> u32 {
    VALIDATION_CALL_COUNT.load(Ordering::SeqCst)
}

#[cfg(feature = "test-hooks")]
pub fn reset_validation_call_count() {
    VALIDATION_CALL_COUNT.store(0, Ordering::SeqCst);
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),
}

const DOCUMENT_TEMPLATE: &str = r#"---
apiVersion: kustomize.config.k8s.io/v1beta1
kind: Kustomization
resources:
{resources}

configMapGenerator:
  - envs:
      - params.env
      - params-latest.env
    name: notebook-image-params
  - envs:
      - commit.env
      - commit-latest.env
    name: notebook-image-commithash
generatorOptions:
  disableNameSuffixHash: true

labels:
  - includeSelectors: true
    pairs:
      component.opendatahub.io/name: notebooks
      opendatahub.io/component: "true"
replacements:
{replacements}
"#;

const REPLACEMENT_TEMPLATE: &str = "  - source:
      fieldPath: {field_path}
      kind: {kind}
      name: {name}
      version: {version}
    targets:
      {targets}";

const TARGET_TEMPLATE: &str = "- fieldPaths:
    {field_paths}
  select:
    group: {group}
    kind: {kind}
    name: {name}
    version: {version}";

/// The generator - validates, then renders
pub struct ManifestGenerator {
    validator: Validator,
}

impl ManifestGenerator {
    pub fn new() -> Self {
        Self { validator: Validator::new() }
    }

    /// Produce the full kustomization.yaml content.
    ///
    /// Validation errors abort; warnings are logged and generation continues.
    pub fn generate(&self, catalog: &Catalog<'_>) -> Result<String, GenerateError> {
        #[cfg(feature = "test-hooks")]
        VALIDATION_CALL_COUNT.fetch_add(1, Ordering::SeqCst);

        let report = self.validator.validate(catalog);
        for warning in report.warnings() {
            warn!(rule = warning.rule, "{}", warning.message);
        }
        if !report.is_valid() {
            let messages: Vec<_> = report.errors().map(|v| v.to_string()).collect();
            return Err(GenerateError::InvalidCatalog(messages.join("; ")));
        }

        let replacements = replacements(catalog);
        debug!(
            workbenches = catalog.workbenches.len(),
            runtimes = catalog.runtimes.len(),
            replacements = replacements.len(),
            "rendering kustomization"
        );

        let resources = resource_lines(catalog);
        let blocks = replacements
            .iter()
            .map(render_replacement)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(render_template(
            DOCUMENT_TEMPLATE,
            &[("resources", resources.as_str()), ("replacements", blocks.join("\n").as_str())],
        )?)
    }
}

impl Default for ManifestGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate with a default generator.
pub fn generate(catalog: &Catalog<'_>) -> Result<String, GenerateError> {
    ManifestGenerator::new().generate(catalog)
}

/// All replacement stanzas in output order: workbench params, workbench
/// commits, then runtime params.
pub fn replacements(catalog: &Catalog<'_>) -> Vec<Replacement> {
    let mut out = Vec::with_capacity(catalog.replacement_count());
    out.extend(catalog.workbenches.iter().flat_map(workbench_params));
    out.extend(catalog.workbenches.iter().flat_map(workbench_commits));
    out.extend(catalog.runtimes.iter().map(runtime_params));
    out
}

fn workbench_params(wb: &Workbench) -> [Replacement; 2] {
    [
        Replacement::params(wb.param_key, TagGeneration::N, wb.imagestream),
        Replacement::params(wb.param_key, TagGeneration::NMinus1, wb.imagestream),
    ]
}

fn workbench_commits(wb: &Workbench) -> [Replacement; 2] {
    [
        Replacement::commit(wb.param_key, TagGeneration::N, wb.imagestream),
        Replacement::commit(wb.param_key, TagGeneration::NMinus1, wb.imagestream),
    ]
}

fn runtime_params(rt: &Runtime) -> Replacement {
    Replacement::params(rt.param_key, TagGeneration::N, rt.imagestream)
}

fn resource_lines(catalog: &Catalog<'_>) -> String {
    let files = catalog
        .workbenches
        .iter()
        .map(|wb| wb.resource_file)
        .chain(catalog.runtime_resource_files.iter().copied());
    files.map(|file| format!("  - {}", file)).collect::<Vec<_>>().join("\n")
}

fn render_replacement(replacement: &Replacement) -> Result<String, TemplateError> {
    let targets = replacement
        .targets
        .iter()
        .map(render_target)
        .collect::<Result<Vec<_>, _>>()?;
    let source = &replacement.source;

    render_template(
        REPLACEMENT_TEMPLATE,
        &[
            ("field_path", source.field_path.as_str()),
            ("kind", source.kind.as_str()),
            ("name", source.name.as_str()),
            ("version", source.version.as_str()),
            ("targets", targets.join("\n").as_str()),
        ],
    )
}

fn render_target(target: &ReplacementTarget) -> Result<String, TemplateError> {
    let field_paths: Vec<_> = target.field_paths.iter().map(|path| format!("- {}", path)).collect();
    let select = &target.select;

    render_template(
        TARGET_TEMPLATE,
        &[
            ("field_paths", field_paths.join("\n").as_str()),
            ("group", select.group.as_str()),
            ("kind", select.kind.as_str()),
            ("name", select.name.as_str()),
            ("version", select.version.as_str()),
        ],
    )
}
