use thiserror::Error;

use super::event::ContentLocation;

/// Errors a content source may report
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(
        "GITHUB_TOKEN environment variable is required for this operation.\n\
         Set it with: export GITHUB_TOKEN=<your-token>"
    )]
    TokenRequired,

    #[error("failed to fetch {location}: {reason}")]
    Failed {
        location: ContentLocation,
        reason: String,
    },
}

/// Source of raw workflow text stored in a remote repository
pub trait ContentSource {
    /// Fetch the text of the file at `location`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::TokenRequired`] if the source needs credentials it does not have.
    /// Returns [`FetchError::Failed`] if the file cannot be retrieved or decoded.
    fn fetch(&self, location: &ContentLocation) -> Result<String, FetchError>;
}
