//! Classification of individual references found in a workflow.
//!
//! Splitting is deliberately naive: container references split on the first
//! `:`, action references on the last `@`. Consumers of the output rely on
//! these exact split points.

use regex::Regex;
use std::sync::LazyLock;

use super::dependency::{Dependency, DependencyKind, PinningStrategy};
use super::document::Node;

const DOCKER_PREFIX: &str = "docker://";

/// Branch names recognized as mutable branch references
const BRANCH_NAMES: [&str; 4] = ["main", "master", "develop", "dev"];

static SHA_PATTERN: LazyLock<Regex> = LazyLock::new(|| compile(r"^[0-9a-f]{40}$"));
static SEMVER_PATTERN: LazyLock<Regex> = LazyLock::new(|| compile(r"^v?\d+\.\d+\.\d+"));

#[expect(clippy::expect_used, reason = "patterns are literals checked by tests")]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("invalid built-in pattern")
}

/// Classify the ref of an action reference (the part after `@`).
///
/// Rules, first match wins:
/// - 40 lowercase hex characters → [`PinningStrategy::Sha`]
/// - `MAJOR.MINOR.PATCH` prefix, optional leading `v` → [`PinningStrategy::Tag`]
/// - `main`, `master`, `develop` or `dev` → [`PinningStrategy::Branch`]
/// - anything else → [`PinningStrategy::Tag`]
///
/// The fallback does not attempt to tell custom tags from unknown branches;
/// every unrecognized ref counts as a tag.
#[must_use]
pub fn pinning_strategy(version_ref: &str) -> PinningStrategy {
    if SHA_PATTERN.is_match(version_ref) {
        PinningStrategy::Sha
    } else if SEMVER_PATTERN.is_match(version_ref) {
        PinningStrategy::Tag
    } else if BRANCH_NAMES.contains(&version_ref) {
        PinningStrategy::Branch
    } else {
        PinningStrategy::Tag
    }
}

/// Runner dependencies for a job's `runs-on:` value.
/// Accepts a label or a sequence of labels; anything else yields nothing.
#[must_use]
pub fn runner_dependencies(runs_on: &Node) -> Vec<Dependency> {
    let labels: Vec<&str> = match runs_on {
        Node::String(label) => vec![label.as_str()],
        Node::Sequence(items) => items.iter().filter_map(Node::as_str).collect(),
        Node::Mapping(_) | Node::Scalar(_) => Vec::new(),
    };

    labels
        .into_iter()
        .filter(|label| !label.is_empty())
        .map(|label| {
            Dependency::new(
                DependencyKind::Runner,
                label,
                None,
                PinningStrategy::Unpinned,
                label,
            )
        })
        .collect()
}

/// Container dependency for a job's `container:` value, either an image string
/// or a mapping with an `image:` field.
#[must_use]
pub fn container_dependency(container: &Node) -> Option<Dependency> {
    let image = match container {
        Node::String(image) => image.as_str(),
        Node::Mapping(_) => container.get("image").and_then(Node::as_str)?,
        Node::Sequence(_) | Node::Scalar(_) => return None,
    };
    image_dependency(image, image)
}

/// Split an image reference on its first `:`. Any version counts as a tag,
/// including digests.
fn image_dependency(image: &str, raw_reference: &str) -> Option<Dependency> {
    let (name, version, pinning) = match image.split_once(':') {
        Some((name, version)) => (name, Some(version.to_string()), PinningStrategy::Tag),
        None => (image, None, PinningStrategy::Unpinned),
    };

    if name.is_empty() {
        return None;
    }

    Some(Dependency::new(
        DependencyKind::Container,
        name,
        version,
        pinning,
        raw_reference,
    ))
}

/// Dependency for a step's `uses:` value.
///
/// Local actions (`./` or `../`) are part of the repository and yield nothing.
/// `docker://` references are classified as containers.
#[must_use]
pub fn action_dependency(uses: &str) -> Option<Dependency> {
    if uses.is_empty() {
        return None;
    }

    if let Some(image) = uses.strip_prefix(DOCKER_PREFIX) {
        return image_dependency(image, uses);
    }

    if uses.starts_with("./") || uses.starts_with("../") {
        return None;
    }

    // Anything other than exactly one `@` is recorded as unpinned under its raw name
    let dependency = match uses.rsplit_once('@') {
        Some((name, version_ref)) if !name.contains('@') => Dependency::new(
            DependencyKind::Action,
            name,
            Some(version_ref.to_string()),
            pinning_strategy(version_ref),
            uses,
        ),
        Some(_) | None => Dependency::new(
            DependencyKind::Action,
            uses,
            None,
            PinningStrategy::Unpinned,
            uses,
        ),
    };

    (!dependency.name.is_empty()).then_some(dependency)
}
