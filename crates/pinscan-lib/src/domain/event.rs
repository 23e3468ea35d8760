/// A change to a workflow file, as announced on the event queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowEvent {
    pub repository: RepositoryRef,
    /// Path of the workflow file within the repository
    pub workflow_path: String,
    /// Ref the workflow was triggered on
    pub workflow_ref: String,
    pub commit: CommitInfo,
    pub event_type: String,
    pub timestamp: String,
}

/// Repository that owns a workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
    /// `owner/name`
    pub full_name: String,
}

/// Commit that introduced the workflow change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub sha: String,
    pub message: String,
    pub author: String,
}

impl WorkflowEvent {
    /// Where to read the workflow content for this event: the workflow file at
    /// the commit that changed it.
    #[must_use]
    pub fn content_location(&self) -> ContentLocation {
        ContentLocation {
            owner: self.repository.owner.clone(),
            repo: self.repository.name.clone(),
            path: self.workflow_path.clone(),
            git_ref: self.commit.sha.clone(),
        }
    }
}

/// Coordinates of a file in a remote repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLocation {
    pub owner: String,
    pub repo: String,
    pub path: String,
    /// Branch, tag or commit SHA
    pub git_ref: String,
}

impl std::fmt::Display for ContentLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}@{}", self.owner, self.repo, self.path, self.git_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> WorkflowEvent {
        WorkflowEvent {
            repository: RepositoryRef {
                owner: "octo".to_string(),
                name: "app".to_string(),
                full_name: "octo/app".to_string(),
            },
            workflow_path: ".github/workflows/ci.yml".to_string(),
            workflow_ref: "refs/heads/main".to_string(),
            commit: CommitInfo {
                sha: "8e8c483db84b4bee98b60c0593521ed34d9990e8".to_string(),
                message: "ci: bump checkout".to_string(),
                author: "octocat".to_string(),
            },
            event_type: "push".to_string(),
            timestamp: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn content_location_reads_at_commit() {
        let location = event().content_location();
        assert_eq!(location.owner, "octo");
        assert_eq!(location.repo, "app");
        assert_eq!(location.path, ".github/workflows/ci.yml");
        assert_eq!(location.git_ref, "8e8c483db84b4bee98b60c0593521ed34d9990e8");
    }

    #[test]
    fn content_location_display() {
        let location = event().content_location();
        assert_eq!(
            location.to_string(),
            "octo/app/.github/workflows/ci.yml@8e8c483db84b4bee98b60c0593521ed34d9990e8"
        );
    }
}
