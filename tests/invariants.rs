//! Contract Invariant Tests
//!
//! These tests verify the guarantees the committed manifest relies on.

use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

use kustomization_gen::{
    catalog::{RUNTIMES, RUNTIME_RESOURCE_FILES, WORKBENCHES},
    generate, replacements, run, Catalog, Difference, Kustomization, Mode, Outcome, Runtime, TagGeneration,
    Workbench,
};

const COMMITTED: &str = include_str!("../manifests/base/kustomization.yaml");

fn parse(text: &str) -> Kustomization {
    serde_yaml::from_str(text).unwrap()
}

fn resources_of(text: &str) -> Vec<String> {
    parse(text).resources.unwrap_or_default()
}

fn small_catalog_workbenches() -> Vec<Workbench> {
    vec![
        Workbench::new("wb-a", "stream-a", "a-imagestream.yaml"),
        Workbench::new("wb-b", "stream-b", "b-imagestream.yaml"),
        Workbench::new("wb-c", "stream-c", "c-imagestream.yaml"),
    ]
}

#[test]
fn invariant_builtin_matches_committed_manifest() {
    let generated = generate(&Catalog::builtin()).unwrap();
    assert_eq!(generated, COMMITTED);
}

#[test]
fn invariant_generation_deterministic() {
    let catalog = Catalog::builtin();
    assert_eq!(generate(&catalog).unwrap(), generate(&catalog).unwrap());
}

#[test]
fn invariant_replacement_cardinality() {
    let workbenches = small_catalog_workbenches();
    let runtimes = [Runtime::new("rt-a", "runtime-a", "rt-a.yaml")];
    let files = ["rt-a.yaml"];

    for (catalog, expected) in [
        (Catalog::builtin(), 4 * 13 + 7),
        (Catalog::new(&workbenches, &files, &runtimes), 4 * 3 + 1),
        (Catalog::new(&workbenches, &[], &[]), 12),
        (Catalog::new(&[], &files, &runtimes), 1),
    ] {
        let text = generate(&catalog).unwrap();
        assert_eq!(text.matches("\n  - source:\n").count(), expected);
        assert_eq!(replacements(&catalog).len(), expected);
        assert_eq!(parse(&text).replacements.unwrap_or_default().len(), expected);
    }
}

#[test]
fn invariant_rendered_stanzas_match_typed_model() {
    let catalog = Catalog::builtin();
    let parsed = parse(&generate(&catalog).unwrap());
    assert_eq!(parsed.replacements.unwrap(), replacements(&catalog));
}

#[test]
fn invariant_workbench_order_followed() {
    let mut workbenches = small_catalog_workbenches();
    workbenches.reverse();
    let catalog = Catalog::new(&workbenches, &[], &[]);

    let text = generate(&catalog).unwrap();
    assert_eq!(
        resources_of(&text),
        vec!["c-imagestream.yaml", "b-imagestream.yaml", "a-imagestream.yaml"]
    );

    let targets: Vec<String> = parse(&text)
        .replacements
        .unwrap()
        .into_iter()
        .map(|r| r.targets[0].select.name.clone())
        .collect();
    assert_eq!(
        targets,
        vec![
            "stream-c", "stream-c", "stream-b", "stream-b", "stream-a", "stream-a",
            "stream-c", "stream-c", "stream-b", "stream-b", "stream-a", "stream-a",
        ]
    );
}

#[test]
fn invariant_builtin_permutations_keep_order() {
    let mut rotated = WORKBENCHES.to_vec();
    rotated.rotate_left(5);
    let catalog = Catalog::new(&rotated, RUNTIME_RESOURCE_FILES, RUNTIMES);

    let resources = resources_of(&generate(&catalog).unwrap());
    let expected: Vec<_> = rotated
        .iter()
        .map(|wb| wb.resource_file)
        .chain(RUNTIME_RESOURCE_FILES.iter().copied())
        .collect();
    assert_eq!(resources, expected);
}

#[test]
fn invariant_runtime_listing_independent_of_runtime_order() {
    let mut runtimes = RUNTIMES.to_vec();
    runtimes.reverse();
    let catalog = Catalog::new(WORKBENCHES, RUNTIME_RESOURCE_FILES, &runtimes);

    let text = generate(&catalog).unwrap();
    assert_eq!(resources_of(&text), resources_of(COMMITTED));

    let runtime_targets: Vec<String> = parse(&text)
        .replacements
        .unwrap()
        .into_iter()
        .skip(4 * WORKBENCHES.len())
        .map(|r| r.targets[0].select.name.clone())
        .collect();
    let expected: Vec<_> = runtimes.iter().map(|rt| rt.imagestream).collect();
    assert_eq!(runtime_targets, expected);
}

#[test]
fn invariant_tag_index_pairing() {
    let catalog = Catalog::builtin();
    let all = replacements(&catalog);
    let w = catalog.workbenches.len();
    let (params, rest) = all.split_at(2 * w);
    let (commits, runtimes) = rest.split_at(2 * w);

    for (pairs, wb) in [params, commits].into_iter().flat_map(|group| group.chunks(2).zip(catalog.workbenches)) {
        let (n, prev) = (&pairs[0], &pairs[1]);
        assert!(n.source.field_path.ends_with("-n"));
        assert_eq!(prev.source.field_path, format!("{}-1", n.source.field_path));
        assert!(n.source.field_path.contains(wb.param_key));
        assert_eq!(
            prev.targets[0].field_paths[0],
            n.targets[0].field_paths[0].replacen("spec.tags.0.", "spec.tags.1.", 1)
        );
        assert!(n.targets[0].field_paths[0].starts_with("spec.tags.0."));
    }

    for (r, rt) in runtimes.iter().zip(catalog.runtimes) {
        assert_eq!(r.source.field_path, format!("data.{}-{}", rt.param_key, TagGeneration::N.key_suffix()));
        assert_eq!(r.targets[0].field_paths, vec!["spec.tags.0.from.name"]);
    }
}

#[test]
fn invariant_empty_catalog_keeps_headers() {
    let text = generate(&Catalog::empty()).unwrap();

    let headers: Vec<&str> = text
        .lines()
        .filter(|line| !line.starts_with(' ') && !line.is_empty() && *line != "---")
        .collect();
    assert_eq!(
        headers,
        vec![
            "apiVersion: kustomize.config.k8s.io/v1beta1",
            "kind: Kustomization",
            "resources:",
            "configMapGenerator:",
            "generatorOptions:",
            "labels:",
            "replacements:",
        ]
    );

    let parsed = parse(&text);
    assert_eq!(parsed.resources, None);
    assert_eq!(parsed.replacements, None);
    assert_eq!(parsed.config_map_generator.len(), 2);
}

#[test]
fn invariant_write_then_check_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kustomization.yaml");
    let catalog = Catalog::builtin();
    let (mut out, mut err) = (Vec::new(), Vec::new());

    assert_eq!(run(Mode::Write, &catalog, &path, &mut out, &mut err).unwrap(), Outcome::Written);
    assert_eq!(run(Mode::Check, &catalog, &path, &mut out, &mut err).unwrap(), Outcome::UpToDate);
    assert!(err.is_empty());
}

#[test]
fn invariant_check_reports_changed_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kustomization.yaml");

    let mut lines: Vec<String> = COMMITTED.lines().map(String::from).collect();
    assert_eq!(lines[11], "  - rstudio-notebook-imagestream.yaml");
    lines[11] = "  - rstudiO-notebook-imagestream.yaml".to_string();
    fs::write(&path, lines.join("\n") + "\n").unwrap();

    let (mut out, mut err) = (Vec::new(), Vec::new());
    let outcome = run(Mode::Check, &Catalog::builtin(), &path, &mut out, &mut err).unwrap();

    assert_eq!(
        outcome,
        Outcome::Mismatch(Difference::Line {
            line: 12,
            existing: "  - rstudiO-notebook-imagestream.yaml".to_string(),
            generated: "  - rstudio-notebook-imagestream.yaml".to_string(),
        })
    );
    assert_eq!(
        String::from_utf8(err).unwrap(),
        "MISMATCH: kustomization.yaml differs from generated output.\n\
         \x20 First difference at line 12:\n\
         \x20   existing:  \"  - rstudiO-notebook-imagestream.yaml\"\n\
         \x20   generated: \"  - rstudio-notebook-imagestream.yaml\"\n"
    );
}

#[test]
fn invariant_check_reports_truncated_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kustomization.yaml");
    let truncated: String = COMMITTED.lines().take(800).map(|l| format!("{}\n", l)).collect();
    fs::write(&path, truncated).unwrap();

    let (mut out, mut err) = (Vec::new(), Vec::new());
    run(Mode::Check, &Catalog::builtin(), &path, &mut out, &mut err).unwrap();
    assert!(String::from_utf8(err).unwrap().ends_with("  existing has 10 fewer lines than generated\n"));
}

#[test]
fn invariant_duplicate_param_key_rejected() {
    let workbenches = [Workbench::new("same", "a", "a.yaml")];
    let runtimes = [Runtime::new("same", "b", "b.yaml")];
    let catalog = Catalog::new(&workbenches, &["b.yaml"], &runtimes);

    let result = generate(&catalog);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Invalid catalog"));
}
