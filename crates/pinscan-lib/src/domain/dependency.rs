use serde::Serialize;
use std::fmt;

/// What kind of external artifact a workflow depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DependencyKind {
    /// Reusable action referenced from a step's `uses:`
    #[serde(rename = "action")]
    Action,
    /// Runner label requested by a job's `runs-on:`
    #[serde(rename = "runner")]
    Runner,
    /// Container image from a job's `container:` or a `docker://` step
    #[serde(rename = "container")]
    Container,
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyKind::Action => write!(f, "action"),
            DependencyKind::Runner => write!(f, "runner"),
            DependencyKind::Container => write!(f, "container"),
        }
    }
}

/// How tightly a dependency reference is bound to an immutable artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PinningStrategy {
    /// Full 40-character commit SHA
    #[serde(rename = "sha")]
    Sha,
    /// Tag reference, semantic or otherwise
    #[serde(rename = "tag")]
    Tag,
    /// Well-known branch name
    #[serde(rename = "branch")]
    Branch,
    /// No version reference at all
    #[serde(rename = "unpinned")]
    Unpinned,
}

impl PinningStrategy {
    /// All strategies, from most to least reproducible.
    pub const ALL: [PinningStrategy; 4] = [
        PinningStrategy::Sha,
        PinningStrategy::Tag,
        PinningStrategy::Branch,
        PinningStrategy::Unpinned,
    ];
}

impl fmt::Display for PinningStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinningStrategy::Sha => write!(f, "sha"),
            PinningStrategy::Tag => write!(f, "tag"),
            PinningStrategy::Branch => write!(f, "branch"),
            PinningStrategy::Unpinned => write!(f, "unpinned"),
        }
    }
}

/// A single external reference discovered in a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Dependency {
    #[serde(rename = "type")]
    pub kind: DependencyKind,
    /// Action ID, image name or runner label. Never empty.
    pub name: String,
    /// Ref after `@` or tag after `:`, if any
    pub version: Option<String>,
    #[serde(rename = "pinning_strategy")]
    pub pinning: PinningStrategy,
    /// The reference exactly as written in the workflow
    pub raw_reference: String,
}

impl Dependency {
    #[must_use]
    pub fn new(
        kind: DependencyKind,
        name: impl Into<String>,
        version: Option<String>,
        pinning: PinningStrategy,
        raw_reference: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            version,
            pinning,
            raw_reference: raw_reference.into(),
        }
    }

    /// Returns true if this dependency is bound to a commit SHA
    #[must_use]
    pub fn is_sha_pinned(&self) -> bool {
        self.pinning == PinningStrategy::Sha
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.kind, self.raw_reference, self.pinning)
    }
}
