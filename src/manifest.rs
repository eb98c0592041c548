//! Kustomization Document Model
//!
//! Typed mirror of the parts of kustomization.yaml this crate writes. The
//! generator renders these by template so the text layout stays exact; the
//! serde derives let the output be parsed back for inspection.

use serde::{Deserialize, Serialize};

pub const IMAGESTREAM_GROUP: &str = "image.openshift.io";
pub const IMAGESTREAM_KIND: &str = "ImageStream";
pub const CONFIGMAP_KIND: &str = "ConfigMap";
pub const RESOURCE_VERSION: &str = "v1";

/// ConfigMap holding image references, keyed `<param_key>-n` / `-n-1`.
pub const PARAMS_CONFIGMAP: &str = "notebook-image-params";
/// ConfigMap holding build commits, keyed `<param_key>-commit-n` / `-commit-n-1`.
pub const COMMIT_CONFIGMAP: &str = "notebook-image-commithash";
pub const BUILD_COMMIT_ANNOTATION: &str = "opendatahub.io/notebook-build-commit";

/// Which retained tag a replacement feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagGeneration {
    /// Current tag, `spec.tags.0`
    N,
    /// Previous tag, `spec.tags.1`
    NMinus1,
}

impl TagGeneration {
    pub fn index(self) -> usize {
        match self {
            Self::N => 0,
            Self::NMinus1 => 1,
        }
    }

    /// Key suffix used in the generated ConfigMaps.
    pub fn key_suffix(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::NMinus1 => "n-1",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplacementSource {
    pub field_path: String,
    pub kind: String,
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSelector {
    pub group: String,
    pub kind: String,
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplacementTarget {
    pub field_paths: Vec<String>,
    pub select: TargetSelector,
}

/// One `replacements:` stanza.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub source: ReplacementSource,
    pub targets: Vec<ReplacementTarget>,
}

impl Replacement {
    /// Copy `data.<key>` of a generated ConfigMap into `target_field` of an ImageStream.
    pub fn configmap_to_imagestream(
        configmap: &str,
        key: &str,
        target_field: &str,
        imagestream: &str,
    ) -> Self {
        Self {
            source: ReplacementSource {
                field_path: format!("data.{}", key),
                kind: CONFIGMAP_KIND.to_string(),
                name: configmap.to_string(),
                version: RESOURCE_VERSION.to_string(),
            },
            targets: vec![ReplacementTarget {
                field_paths: vec![target_field.to_string()],
                select: TargetSelector {
                    group: IMAGESTREAM_GROUP.to_string(),
                    kind: IMAGESTREAM_KIND.to_string(),
                    name: imagestream.to_string(),
                    version: RESOURCE_VERSION.to_string(),
                },
            }],
        }
    }

    /// Image reference for one tag generation.
    pub fn params(param_key: &str, generation: TagGeneration, imagestream: &str) -> Self {
        Self::configmap_to_imagestream(
            PARAMS_CONFIGMAP,
            &format!("{}-{}", param_key, generation.key_suffix()),
            &format!("spec.tags.{}.from.name", generation.index()),
            imagestream,
        )
    }

    /// Build commit annotation for one tag generation.
    pub fn commit(param_key: &str, generation: TagGeneration, imagestream: &str) -> Self {
        Self::configmap_to_imagestream(
            COMMIT_CONFIGMAP,
            &format!("{}-commit-{}", param_key, generation.key_suffix()),
            &format!("spec.tags.{}.annotations.[{}]", generation.index(), BUILD_COMMIT_ANNOTATION),
            imagestream,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigMapGenerator {
    pub envs: Vec<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorOptions {
    pub disable_name_suffix_hash: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub include_selectors: bool,
    pub pairs: std::collections::BTreeMap<String, String>,
}

/// The whole generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kustomization {
    pub api_version: String,
    pub kind: String,
    #[serde(default)]
    pub resources: Option<Vec<String>>,
    pub config_map_generator: Vec<ConfigMapGenerator>,
    pub generator_options: GeneratorOptions,
    pub labels: Vec<Label>,
    #[serde(default)]
    pub replacements: Option<Vec<Replacement>>,
}
