use serde::Serialize;
use std::collections::BTreeMap;

use super::dependency::{Dependency, DependencyKind, PinningStrategy};

/// Everything extracted from a single workflow document.
///
/// `dependencies` follows document order: jobs as they appear, and within a job
/// its runners, then its container, then its steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    /// Top-level `name:` of the workflow
    #[serde(rename = "workflow_name")]
    pub declared_name: Option<String>,
    /// Keys of the jobs that are well-formed mappings
    #[serde(rename = "jobs")]
    pub job_identifiers: Vec<String>,
    pub total_steps: usize,
    pub dependencies: Vec<Dependency>,
}

impl AnalysisResult {
    /// Iterate over dependencies of a given kind, preserving order.
    pub fn of_kind(&self, kind: DependencyKind) -> impl Iterator<Item = &Dependency> {
        self.dependencies.iter().filter(move |d| d.kind == kind)
    }

    /// Count dependencies per pinning strategy. Strategies with no dependency are
    /// reported with a zero count.
    #[must_use]
    pub fn pinning_counts(&self) -> BTreeMap<PinningStrategy, usize> {
        let mut counts: BTreeMap<PinningStrategy, usize> =
            PinningStrategy::ALL.iter().map(|p| (*p, 0)).collect();
        for dep in &self.dependencies {
            *counts.entry(dep.pinning).or_default() += 1;
        }
        counts
    }

    /// Returns true if every action dependency is pinned to a commit SHA.
    /// Runners and containers are not considered.
    #[must_use]
    pub fn is_fully_pinned(&self) -> bool {
        self.of_kind(DependencyKind::Action)
            .all(Dependency::is_sha_pinned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(name: &str, version: &str, pinning: PinningStrategy) -> Dependency {
        Dependency::new(
            DependencyKind::Action,
            name,
            Some(version.to_string()),
            pinning,
            format!("{name}@{version}"),
        )
    }

    fn runner(label: &str) -> Dependency {
        Dependency::new(
            DependencyKind::Runner,
            label,
            None,
            PinningStrategy::Unpinned,
            label,
        )
    }

    #[test]
    fn pinning_counts_include_zero_entries() {
        let result = AnalysisResult {
            dependencies: vec![
                runner("ubuntu-latest"),
                action("actions/checkout", "v4", PinningStrategy::Tag),
                action("actions/cache", "v3", PinningStrategy::Tag),
            ],
            ..AnalysisResult::default()
        };

        let counts = result.pinning_counts();
        assert_eq!(counts[&PinningStrategy::Tag], 2);
        assert_eq!(counts[&PinningStrategy::Unpinned], 1);
        assert_eq!(counts[&PinningStrategy::Sha], 0);
        assert_eq!(counts[&PinningStrategy::Branch], 0);
    }

    #[test]
    fn fully_pinned_ignores_runners() {
        let result = AnalysisResult {
            dependencies: vec![
                runner("ubuntu-latest"),
                action(
                    "actions/checkout",
                    "8e8c483db84b4bee98b60c0593521ed34d9990e8",
                    PinningStrategy::Sha,
                ),
            ],
            ..AnalysisResult::default()
        };
        assert!(result.is_fully_pinned());
    }

    #[test]
    fn tag_reference_is_not_fully_pinned() {
        let result = AnalysisResult {
            dependencies: vec![action("actions/checkout", "v4", PinningStrategy::Tag)],
            ..AnalysisResult::default()
        };
        assert!(!result.is_fully_pinned());
    }

    #[test]
    fn serializes_with_report_field_names() {
        let result = AnalysisResult {
            declared_name: Some("CI".to_string()),
            job_identifiers: vec!["build".to_string()],
            total_steps: 2,
            dependencies: vec![runner("ubuntu-latest")],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["workflow_name"], "CI");
        assert_eq!(json["jobs"][0], "build");
        assert_eq!(json["total_steps"], 2);
        assert_eq!(json["dependencies"][0]["type"], "runner");
    }
}
