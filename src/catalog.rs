//! Image Catalog - Compiled-In Source of Truth
//!
//! Order matters everywhere in this file: it is the order the generated
//! kustomization.yaml lists resources and replacements in.

/// A workbench image. Two tags are retained: N (index 0) and N-1 (index 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Workbench {
    /// Prefix of the generated ConfigMap keys, e.g. `odh-workbench-jupyter-minimal-cpu-py312-ubi9`
    pub param_key: &'static str,
    /// Name of the ImageStream the replacements patch
    pub imagestream: &'static str,
    /// Resource file listed under `resources:`
    pub resource_file: &'static str,
}

impl Workbench {
    pub const fn new(param_key: &'static str, imagestream: &'static str, resource_file: &'static str) -> Self {
        Self { param_key, imagestream, resource_file }
    }
}

/// A pipeline runtime image. Only the N tag (index 0) is retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Runtime {
    pub param_key: &'static str,
    pub imagestream: &'static str,
    pub resource_file: &'static str,
}

impl Runtime {
    pub const fn new(param_key: &'static str, imagestream: &'static str, resource_file: &'static str) -> Self {
        Self { param_key, imagestream, resource_file }
    }
}

/// Ordered view over the three catalog tables.
///
/// `runtime_resource_files` is kept separate from the runtimes'
/// own `resource_file`: the resources section has always listed runtime files
/// in a different order than the replacements section patches them.
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    pub workbenches: &'a [Workbench],
    pub runtime_resource_files: &'a [&'static str],
    pub runtimes: &'a [Runtime],
}

impl<'a> Catalog<'a> {
    pub fn new(
        workbenches: &'a [Workbench],
        runtime_resource_files: &'a [&'static str],
        runtimes: &'a [Runtime],
    ) -> Self {
        Self { workbenches, runtime_resource_files, runtimes }
    }

    pub fn empty() -> Self {
        Self::new(&[], &[], &[])
    }

    /// Number of replacement stanzas this catalog produces (`4W + R`).
    pub fn replacement_count(&self) -> usize {
        4 * self.workbenches.len() + self.runtimes.len()
    }

    /// Every param key, workbenches first, in catalog order.
    pub fn param_keys(&self) -> impl Iterator<Item = &'static str> + 'a {
        let (workbenches, runtimes) = (self.workbenches, self.runtimes);
        workbenches
            .iter()
            .map(|wb| wb.param_key)
            .chain(runtimes.iter().map(|rt| rt.param_key))
    }
}

impl Catalog<'static> {
    /// The catalog shipped with the manifests.
    pub fn builtin() -> Self {
        Self::new(WORKBENCHES, RUNTIME_RESOURCE_FILES, RUNTIMES)
    }
}

impl Default for Catalog<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

pub static WORKBENCHES: &[Workbench] = &[
    Workbench::new(
        "odh-workbench-jupyter-minimal-cpu-py312-ubi9",
        "jupyter-minimal-notebook",
        "jupyter-minimal-notebook-imagestream.yaml",
    ),
    Workbench::new(
        "odh-workbench-jupyter-datascience-cpu-py312-ubi9",
        "jupyter-datascience-notebook",
        "jupyter-datascience-notebook-imagestream.yaml",
    ),
    Workbench::new(
        "odh-workbench-jupyter-minimal-cuda-py312-ubi9",
        "jupyter-minimal-gpu-notebook",
        "jupyter-minimal-gpu-notebook-imagestream.yaml",
    ),
    Workbench::new(
        "odh-workbench-jupyter-pytorch-cuda-py312-ubi9",
        "jupyter-pytorch-notebook",
        "jupyter-pytorch-notebook-imagestream.yaml",
    ),
    Workbench::new(
        "odh-workbench-jupyter-tensorflow-cuda-py312-ubi9",
        "jupyter-tensorflow-notebook",
        "jupyter-tensorflow-notebook-imagestream.yaml",
    ),
    Workbench::new(
        "odh-workbench-jupyter-trustyai-cpu-py312-ubi9",
        "jupyter-trustyai-notebook",
        "jupyter-trustyai-notebook-imagestream.yaml",
    ),
    Workbench::new(
        "odh-workbench-codeserver-datascience-cpu-py312-ubi9",
        "code-server-notebook",
        "code-server-notebook-imagestream.yaml",
    ),
    Workbench::new(
        "odh-workbench-rstudio-minimal-cpu-py312-c9s",
        "rstudio-notebook",
        "rstudio-notebook-imagestream.yaml",
    ),
    Workbench::new(
        "odh-workbench-rstudio-minimal-cuda-py312-c9s",
        "rstudio-gpu-notebook",
        "rstudio-gpu-notebook-imagestream.yaml",
    ),
    Workbench::new(
        "odh-workbench-jupyter-minimal-rocm-py312-ubi9",
        "jupyter-rocm-minimal",
        "jupyter-rocm-minimal-notebook-imagestream.yaml",
    ),
    Workbench::new(
        "odh-workbench-jupyter-pytorch-rocm-py312-ubi9",
        "jupyter-rocm-pytorch",
        "jupyter-rocm-pytorch-notebook-imagestream.yaml",
    ),
    Workbench::new(
        "odh-workbench-jupyter-tensorflow-rocm-py312-ubi9",
        "jupyter-rocm-tensorflow",
        "jupyter-rocm-tensorflow-notebook-imagestream.yaml",
    ),
    Workbench::new(
        "odh-workbench-jupyter-pytorch-llmcompressor-cuda-py312-ubi9",
        "jupyter-pytorch-llmcompressor",
        "jupyter-pytorch-llmcompressor-imagestream.yaml",
    ),
];

/// Runtime files in `resources:` order (not the replacements order).
pub static RUNTIME_RESOURCE_FILES: &[&str] = &[
    "runtime-datascience-imagestream.yaml",
    "runtime-minimal-imagestream.yaml",
    "runtime-pytorch-imagestream.yaml",
    "runtime-rocm-pytorch-imagestream.yaml",
    "runtime-rocm-tensorflow-imagestream.yaml",
    "runtime-tensorflow-imagestream.yaml",
    "runtime-pytorch-llmcompressor-imagestream.yaml",
];

/// Runtimes in `replacements:` order.
pub static RUNTIMES: &[Runtime] = &[
    Runtime::new(
        "odh-pipeline-runtime-minimal-cpu-py312-ubi9",
        "runtime-minimal",
        "runtime-minimal-imagestream.yaml",
    ),
    Runtime::new(
        "odh-pipeline-runtime-datascience-cpu-py312-ubi9",
        "runtime-datascience",
        "runtime-datascience-imagestream.yaml",
    ),
    Runtime::new(
        "odh-pipeline-runtime-pytorch-cuda-py312-ubi9",
        "runtime-pytorch",
        "runtime-pytorch-imagestream.yaml",
    ),
    Runtime::new(
        "odh-pipeline-runtime-pytorch-rocm-py312-ubi9",
        "runtime-rocm-pytorch",
        "runtime-rocm-pytorch-imagestream.yaml",
    ),
    Runtime::new(
        "odh-pipeline-runtime-tensorflow-cuda-py312-ubi9",
        "runtime-tensorflow",
        "runtime-tensorflow-imagestream.yaml",
    ),
    Runtime::new(
        "odh-pipeline-runtime-tensorflow-rocm-py312-ubi9",
        "runtime-rocm-tensorflow",
        "runtime-rocm-tensorflow-imagestream.yaml",
    ),
    Runtime::new(
        "odh-pipeline-runtime-pytorch-llmcompressor-cuda-py312-ubi9",
        "runtime-pytorch-llmcompressor",
        "runtime-pytorch-llmcompressor-imagestream.yaml",
    ),
];
