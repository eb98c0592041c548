//! Catalog Validation - Rule/Policy Separation
//!
//! Rules produce structured violations.
//! Policy: errors block generation, warnings are only reported.

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use crate::catalog::Catalog;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationViolation {
    pub rule: &'static str,
    pub severity: ViolationSeverity,
    pub message: String,
}

impl std::fmt::Display for ValidationViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.rule, self.message)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub violations: Vec<ValidationViolation>,
}

impl ValidationReport {
    /// False iff any violation is an error.
    pub fn is_valid(&self) -> bool {
        !self.violations.iter().any(|v| v.severity == ViolationSeverity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationViolation> {
        self.violations.iter().filter(|v| v.severity == ViolationSeverity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationViolation> {
        self.violations.iter().filter(|v| v.severity == ViolationSeverity::Warning)
    }
}

/// Catalog rule trait - produces violations
pub trait CatalogRule {
    fn name(&self) -> &'static str;
    fn check(&self, catalog: &Catalog<'_>) -> Vec<ValidationViolation>;
}

// --- Concrete Rules ---

/// Param keys share the two generated ConfigMaps, so they must not collide.
pub struct UniqueParamKeysRule;

impl CatalogRule for UniqueParamKeysRule {
    fn name(&self) -> &'static str { "unique_param_keys" }

    fn check(&self, catalog: &Catalog<'_>) -> Vec<ValidationViolation> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order = vec![];
        for key in catalog.param_keys() {
            let count = counts.entry(key).or_insert(0);
            if *count == 0 {
                order.push(key);
            }
            *count += 1;
        }

        order
            .into_iter()
            .filter(|key| counts[key] > 1)
            .map(|key| ValidationViolation {
                rule: self.name(),
                severity: ViolationSeverity::Error,
                message: format!("param key {:?} used {} times", key, counts[key]),
            })
            .collect()
    }
}

pub struct NonEmptyFieldsRule;

impl NonEmptyFieldsRule {
    fn violation(&self, what: String) -> ValidationViolation {
        ValidationViolation {
            rule: self.name(),
            severity: ViolationSeverity::Error,
            message: format!("{} is empty", what),
        }
    }
}

impl CatalogRule for NonEmptyFieldsRule {
    fn name(&self) -> &'static str { "non_empty_fields" }

    fn check(&self, catalog: &Catalog<'_>) -> Vec<ValidationViolation> {
        let mut violations = vec![];

        for (i, wb) in catalog.workbenches.iter().enumerate() {
            for (field, value) in [
                ("param_key", wb.param_key),
                ("imagestream", wb.imagestream),
                ("resource_file", wb.resource_file),
            ] {
                if value.is_empty() {
                    violations.push(self.violation(format!("workbench #{} {}", i, field)));
                }
            }
        }

        for (i, rt) in catalog.runtimes.iter().enumerate() {
            for (field, value) in [
                ("param_key", rt.param_key),
                ("imagestream", rt.imagestream),
                ("resource_file", rt.resource_file),
            ] {
                if value.is_empty() {
                    violations.push(self.violation(format!("runtime #{} {}", i, field)));
                }
            }
        }

        for (i, file) in catalog.runtime_resource_files.iter().enumerate() {
            if file.is_empty() {
                violations.push(self.violation(format!("runtime resource file #{}", i)));
            }
        }

        violations
    }
}

/// The runtime resource listing and the runtimes being patched should name
/// the same files, even though their orders differ.
pub struct RuntimeResourceListingRule;

impl CatalogRule for RuntimeResourceListingRule {
    fn name(&self) -> &'static str { "runtime_resource_listing" }

    fn check(&self, catalog: &Catalog<'_>) -> Vec<ValidationViolation> {
        let listed: BTreeSet<&str> = catalog.runtime_resource_files.iter().copied().collect();
        let patched: BTreeSet<&str> = catalog.runtimes.iter().map(|rt| rt.resource_file).collect();

        let unpatched = listed.difference(&patched).map(|file| ValidationViolation {
            rule: self.name(),
            severity: ViolationSeverity::Warning,
            message: format!("{} is listed as a resource but no runtime patches it", file),
        });
        let unlisted = patched.difference(&listed).map(|file| ValidationViolation {
            rule: self.name(),
            severity: ViolationSeverity::Warning,
            message: format!("{} is patched by a runtime but not listed as a resource", file),
        });

        unpatched.chain(unlisted).collect()
    }
}

/// Validator orchestrates rules
pub struct Validator {
    rules: Vec<Box<dyn CatalogRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(UniqueParamKeysRule),
                Box::new(NonEmptyFieldsRule),
                Box::new(RuntimeResourceListingRule),
            ],
        }
    }

    pub fn validate(&self, catalog: &Catalog<'_>) -> ValidationReport {
        let violations = self.rules.iter().flat_map(|rule| rule.check(catalog)).collect();
        ValidationReport { violations }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
