use log::debug;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Folder that marks a repository as having Github configuration
pub const GITHUB_DIR: &str = ".github";

/// Workflow folder, relative to the repository root
pub const WORKFLOWS_DIR: &str = ".github/workflows";

/// Reasons a directory cannot be scanned for workflows
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{} is not inside a git repository", start.display())]
    NotARepository {
        start: PathBuf,
        #[source]
        source: Box<gix_discover::upwards::Error>,
    },

    #[error("repository at {} is bare, it has no workflow files on disk", git_dir.display())]
    Bare { git_dir: PathBuf },

    #[error("no .github folder in {}", root.display())]
    NoGithubFolder { root: PathBuf },
}

/// Locate the work tree whose workflows should be scanned, walking up from
/// `start` to the enclosing git repository. The work tree must hold a
/// `.github` folder.
///
/// # Errors
///
/// Returns a [`RepoError`] when `start` is outside a repository, the
/// repository is bare, or its root has no `.github` folder.
pub fn find_root(start: &Path) -> Result<PathBuf, RepoError> {
    let (discovered, _trust) =
        gix_discover::upwards(start).map_err(|source| RepoError::NotARepository {
            start: start.to_path_buf(),
            source: Box::new(source),
        })?;

    let (git_dir, work_tree) = discovered.into_repository_and_work_tree_directories();
    let root = work_tree.ok_or(RepoError::Bare { git_dir })?;
    debug!("Repository root: {}", root.display());

    if root.join(GITHUB_DIR).is_dir() {
        Ok(root)
    } else {
        Err(RepoError::NoGithubFolder { root })
    }
}
